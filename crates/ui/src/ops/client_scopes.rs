//! Client scope catalogue and per-client scope assignment

use super::{BulkOutcome, report};
use kc_console_admin::AdminClient;
use kc_console_core::{ClientScopeType, ConsoleResult, Notify};
use kc_console_model::{ClientScopeRepresentation, ClientScopeRow, assigned_scope_rows};

const SCOPE_UPDATED: &str = "Scope mapping successfully updated";
const SCOPE_UPDATE_FAILED: &str = "Could not update scope mapping";

/// Assigned scope rows for a client, joined with the realm catalogue
///
/// The three lists are fetched concurrently. The catalogue is returned too so
/// the add dialog can offer what is left.
pub async fn load_client_scopes(
    api: &AdminClient,
    client_id: &str,
) -> ConsoleResult<(Vec<ClientScopeRow>, Vec<ClientScopeRepresentation>)> {
    let (defaults, optionals, catalogue) = futures::future::try_join3(
        api.client_scopes_of(client_id, ClientScopeType::Default),
        api.client_scopes_of(client_id, ClientScopeType::Optional),
        api.list_client_scopes(),
    )
    .await?;
    Ok((assigned_scope_rows(&defaults, &optionals, &catalogue), catalogue))
}

/// Assign the selected scopes to a client as `kind`
pub async fn add_client_scopes(
    api: &AdminClient,
    client_id: &str,
    scopes: &[ClientScopeRepresentation],
    kind: ClientScopeType,
    alerts: &mut impl Notify,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::new();
    for scope in scopes {
        let result = api.add_client_scope(client_id, scope.id(), kind).await;
        outcome.record(
            &result,
            &format!("{} {}:", SCOPE_UPDATE_FAILED, scope.name()),
            alerts,
        );
    }
    outcome.summarize(SCOPE_UPDATED, SCOPE_UPDATE_FAILED, alerts);
    outcome
}

/// Move one assigned scope to another type: remove, then add back
///
/// When the add fails the scope is put back under its old type. If that
/// fails too the scope is no longer assigned, and the alert names it.
async fn retype(
    api: &AdminClient,
    client_id: &str,
    row: &ClientScopeRow,
    kind: ClientScopeType,
    alerts: &mut impl Notify,
) -> ConsoleResult<()> {
    api.remove_client_scope(client_id, &row.id, row.kind).await?;
    let Err(err) = api.add_client_scope(client_id, &row.id, kind).await else {
        return Ok(());
    };

    if let Err(restore) = api.add_client_scope(client_id, &row.id, row.kind).await {
        tracing::error!("Scope {} left unassigned from client {}: {}", row.name, client_id, restore);
        alerts.danger(format!(
            "Client scope {} was removed from the client and could not be restored: '{}'",
            row.name, restore
        ));
    }
    Err(err)
}

pub async fn change_scope_type(
    api: &AdminClient,
    client_id: &str,
    row: &ClientScopeRow,
    kind: ClientScopeType,
    alerts: &mut impl Notify,
) -> bool {
    if row.kind == kind {
        return true;
    }
    let result = retype(api, client_id, row, kind, alerts).await;
    report(
        result,
        SCOPE_UPDATED,
        &format!("{}:", SCOPE_UPDATE_FAILED),
        alerts,
    )
    .is_some()
}

/// Change the type of every selected row; rows already of `kind` are skipped
pub async fn change_scope_types(
    api: &AdminClient,
    client_id: &str,
    rows: &[ClientScopeRow],
    kind: ClientScopeType,
    alerts: &mut impl Notify,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::new();
    for row in rows.iter().filter(|r| r.kind != kind) {
        let result = retype(api, client_id, row, kind, alerts).await;
        outcome.record(
            &result,
            &format!("{} {}:", SCOPE_UPDATE_FAILED, row.name),
            alerts,
        );
    }
    outcome.summarize(SCOPE_UPDATED, SCOPE_UPDATE_FAILED, alerts);
    outcome
}

pub async fn remove_client_scope(
    api: &AdminClient,
    client_id: &str,
    row: &ClientScopeRow,
    alerts: &mut impl Notify,
) -> bool {
    report(
        api.remove_client_scope(client_id, &row.id, row.kind).await,
        "Scope mapping successfully removed",
        "Could not remove scope mapping:",
        alerts,
    )
    .is_some()
}

// ============================================================================
// Realm Catalogue
// ============================================================================

pub async fn save_client_scope(
    api: &AdminClient,
    scope: &ClientScopeRepresentation,
    alerts: &mut impl Notify,
) -> bool {
    report(
        api.update_client_scope(scope.id(), scope).await,
        "Client scope updated",
        "Could not update client scope:",
        alerts,
    )
    .is_some()
}

pub async fn delete_client_scope(api: &AdminClient, id: &str, alerts: &mut impl Notify) -> bool {
    report(
        api.delete_client_scope(id).await,
        "The client scope has been deleted",
        "Could not delete client scope:",
        alerts,
    )
    .is_some()
}
