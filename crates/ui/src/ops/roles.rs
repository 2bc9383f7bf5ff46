//! Realm roles

use super::report;
use kc_console_admin::AdminClient;
use kc_console_core::Notify;
use kc_console_model::RoleRepresentation;

/// Create a realm role, returning it as stored
pub async fn create_role(
    api: &AdminClient,
    role: &RoleRepresentation,
    alerts: &mut impl Notify,
) -> Option<RoleRepresentation> {
    report(
        api.create_role(role).await,
        "Role created",
        "Could not create role:",
        alerts,
    )
}

pub async fn save_role(api: &AdminClient, role: &RoleRepresentation, alerts: &mut impl Notify) -> bool {
    report(
        api.update_role(role.id(), role).await,
        "The role has been saved",
        "Could not update role:",
        alerts,
    )
    .is_some()
}

pub async fn delete_role(api: &AdminClient, id: &str, alerts: &mut impl Notify) -> bool {
    report(
        api.delete_role(id).await,
        "The role has been deleted",
        "Could not delete role:",
        alerts,
    )
    .is_some()
}
