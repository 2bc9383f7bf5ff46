//! Identity providers

use super::report;
use kc_console_admin::AdminClient;
use kc_console_core::Notify;
use kc_console_model::IdentityProviderRepresentation;

/// Create a provider, returning its alias
pub async fn create_provider(
    api: &AdminClient,
    provider: &IdentityProviderRepresentation,
    alerts: &mut impl Notify,
) -> Option<String> {
    report(
        api.create_identity_provider(provider).await,
        "Identity provider successfully created",
        "Could not create the identity provider:",
        alerts,
    )
}

pub async fn delete_provider(api: &AdminClient, alias: &str, alerts: &mut impl Notify) -> bool {
    report(
        api.delete_identity_provider(alias).await,
        "Provider successfully deleted",
        "Could not delete the provider:",
        alerts,
    )
    .is_some()
}
