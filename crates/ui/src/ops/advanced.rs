//! Revocation and clustering actions of the client advanced tab

use super::{failure_message, report};
use kc_console_admin::AdminClient;
use kc_console_core::{ConsoleResult, Notify};
use kc_console_model::form::now_seconds;
use kc_console_model::{ClientRepresentation, ClusterAction, GlobalRequestResult};

async fn update_not_before(
    api: &AdminClient,
    client: &ClientRepresentation,
    not_before: i64,
) -> ConsoleResult<ClientRepresentation> {
    let mut updated = client.clone();
    updated.not_before = Some(not_before);
    api.update_client(updated.id(), &updated).await?;
    Ok(updated)
}

/// Revoke every token issued before now; returns the updated client
pub async fn set_not_before_now(
    api: &AdminClient,
    client: &ClientRepresentation,
    alerts: &mut impl Notify,
) -> Option<ClientRepresentation> {
    report(
        update_not_before(api, client, now_seconds()).await,
        "Not Before set for client",
        "Could not set Not Before:",
        alerts,
    )
}

pub async fn clear_not_before(
    api: &AdminClient,
    client: &ClientRepresentation,
    alerts: &mut impl Notify,
) -> Option<ClientRepresentation> {
    report(
        update_not_before(api, client, 0).await,
        "Not Before cleared for client",
        "Could not clear Not Before:",
        alerts,
    )
}

fn report_cluster(
    result: ConsoleResult<GlobalRequestResult>,
    action: ClusterAction,
    failure: &str,
    alerts: &mut impl Notify,
) {
    match result {
        Ok(result) => {
            for (message, variant) in result.alerts(action) {
                alerts.add_alert(message, variant);
            }
        }
        Err(err) => {
            tracing::warn!("{}: {}", failure, err);
            alerts.danger(failure_message(failure, &err));
        }
    }
}

/// Push the not-before policy to the client's admin URL
pub async fn push_revocation(api: &AdminClient, client_id: &str, alerts: &mut impl Notify) {
    report_cluster(
        api.push_revocation(client_id).await,
        ClusterAction::PushRevocation,
        "Could not push revocation policy:",
        alerts,
    );
}

pub async fn test_cluster_availability(
    api: &AdminClient,
    client_id: &str,
    alerts: &mut impl Notify,
) {
    report_cluster(
        api.test_nodes_available(client_id).await,
        ClusterAction::TestAvailability,
        "Could not test cluster availability:",
        alerts,
    );
}

/// Save the node re-registration timeout, in seconds
pub async fn save_node_timeout(
    api: &AdminClient,
    client: &ClientRepresentation,
    seconds: u64,
    alerts: &mut impl Notify,
) -> Option<ClientRepresentation> {
    let Ok(timeout) = i64::try_from(seconds) else {
        alerts.danger(format!(
            "Client could not be updated: 'Timeout of {seconds} seconds is out of range'"
        ));
        return None;
    };
    let mut updated = client.clone();
    updated.node_re_registration_timeout = Some(timeout);
    report(
        api.update_client(updated.id(), &updated).await,
        "Client successfully updated",
        "Client could not be updated:",
        alerts,
    )
    .map(|_| updated)
}

pub async fn register_node(
    api: &AdminClient,
    client_id: &str,
    host: &str,
    alerts: &mut impl Notify,
) -> bool {
    report(
        api.register_node(client_id, host.trim()).await,
        "Node successfully added",
        "Could not add node:",
        alerts,
    )
    .is_some()
}

pub async fn delete_node(
    api: &AdminClient,
    client_id: &str,
    host: &str,
    alerts: &mut impl Notify,
) -> bool {
    report(
        api.delete_node(client_id, host).await,
        "Node successfully removed",
        "Could not delete node:",
        alerts,
    )
    .is_some()
}
