//! Users section

use super::report;
use futures::future::join_all;
use kc_console_admin::AdminClient;
use kc_console_core::{ConsoleResult, Notify};
use kc_console_model::{UserRow, can_list_without_search};

/// Whether the users section may list without a search term
///
/// Federation providers and the user count are fetched concurrently.
pub async fn users_listable(api: &AdminClient) -> ConsoleResult<bool> {
    let (providers, count) =
        futures::future::try_join(api.user_federation_providers(), api.count_users()).await?;
    Ok(can_list_without_search(providers.len(), count))
}

/// One page of users with their lockout state
///
/// When the realm is brute-force protected, each user's status is fetched
/// concurrently; a failed status lookup leaves that user unlocked.
pub async fn load_user_rows(
    api: &AdminClient,
    first: usize,
    max: usize,
    search: Option<&str>,
    brute_force_protected: bool,
) -> ConsoleResult<Vec<UserRow>> {
    let users = api.list_users(first, max, search).await?;
    if !brute_force_protected {
        return Ok(users.iter().map(|u| UserRow::new(u, None)).collect());
    }

    let statuses = join_all(users.iter().map(|u| api.brute_force_status(u.id()))).await;
    Ok(users
        .iter()
        .zip(statuses)
        .map(|(user, status)| {
            if let Err(err) = &status {
                tracing::debug!("No brute force status for {}: {}", user.username(), err);
            }
            UserRow::new(user, status.ok().as_ref())
        })
        .collect())
}

pub async fn delete_user(api: &AdminClient, id: &str, alerts: &mut impl Notify) -> bool {
    report(
        api.delete_user(id).await,
        "The user has been deleted",
        "The user could not be deleted:",
        alerts,
    )
    .is_some()
}
