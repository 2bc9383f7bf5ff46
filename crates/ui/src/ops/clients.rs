//! Client lifecycle actions

use super::report;
use kc_console_admin::AdminClient;
use kc_console_core::Notify;
use kc_console_model::ClientRepresentation;

/// Create a client from the wizard, returning its id
pub async fn create_client(
    api: &AdminClient,
    client: &ClientRepresentation,
    alerts: &mut impl Notify,
) -> Option<String> {
    report(
        api.create_client(client).await,
        "Client created successfully",
        "Could not create client:",
        alerts,
    )
}

/// Create a client from an imported JSON document, returning its id
pub async fn import_client(
    api: &AdminClient,
    client: &ClientRepresentation,
    alerts: &mut impl Notify,
) -> Option<String> {
    let mut draft = client.clone();
    // ids are assigned by the server
    draft.id = None;
    report(
        api.create_client(&draft).await,
        "Client imported",
        "Could not import client:",
        alerts,
    )
}

pub async fn save_client(
    api: &AdminClient,
    client: &ClientRepresentation,
    alerts: &mut impl Notify,
) -> bool {
    report(
        api.update_client(client.id(), client).await,
        "Client successfully updated",
        "Client could not be updated:",
        alerts,
    )
    .is_some()
}

pub async fn delete_client(api: &AdminClient, id: &str, alerts: &mut impl Notify) -> bool {
    report(
        api.delete_client(id).await,
        "The client has been deleted",
        "Could not delete client:",
        alerts,
    )
    .is_some()
}

/// Regenerate the secret of a confidential client, returning the new value
pub async fn regenerate_secret(
    api: &AdminClient,
    id: &str,
    alerts: &mut impl Notify,
) -> Option<String> {
    report(
        api.regenerate_client_secret(id).await,
        "New client secret has been generated",
        "Could not regenerate client secret:",
        alerts,
    )
    .map(|credential| credential.value.unwrap_or_default())
}
