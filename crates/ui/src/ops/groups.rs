//! Groups, their members and attributes

use super::{BulkOutcome, report};
use futures::future::try_join_all;
use kc_console_admin::AdminClient;
use kc_console_core::{ConsoleError, ConsoleResult, Notify};
use kc_console_model::{
    GroupRepresentation, GroupRow, MemberRow, UserRepresentation, group_rows, merge_members,
};

/// Every group joined with its member count
///
/// Member counts are fetched concurrently once the group list is in.
pub async fn load_group_rows(api: &AdminClient) -> ConsoleResult<Vec<GroupRow>> {
    let groups = api.list_groups(None).await?;
    let counts = try_join_all(groups.iter().map(|group| async move {
        api.group_members(group.id()).await.map(|members| members.len())
    }))
    .await?;
    Ok(group_rows(&groups, &counts))
}

/// Members of a group, optionally including members of every sub-group
pub async fn load_members(
    api: &AdminClient,
    group: &GroupRepresentation,
    include_sub_groups: bool,
) -> ConsoleResult<Vec<MemberRow>> {
    let direct = api.group_members(group.id()).await?;
    let inherited = if include_sub_groups {
        try_join_all(group.descendants().into_iter().map(|sub| async move {
            let users = api.group_members(sub.id()).await?;
            Ok::<_, ConsoleError>((sub.name().to_string(), users))
        }))
        .await?
    } else {
        Vec::new()
    };
    Ok(merge_members(&direct, &inherited))
}

/// Create a group, under `parent` when given; returns the new id
pub async fn create_group(
    api: &AdminClient,
    parent: Option<&str>,
    name: &str,
    alerts: &mut impl Notify,
) -> Option<String> {
    let group = GroupRepresentation::named(name.trim());
    let result = match parent {
        Some(parent_id) => api.create_child_group(parent_id, &group).await,
        None => api.create_group(&group).await,
    };
    report(result, "Group created", "Could not create group:", alerts)
}

pub async fn save_group(
    api: &AdminClient,
    group: &GroupRepresentation,
    alerts: &mut impl Notify,
) -> bool {
    report(
        api.update_group(group.id(), group).await,
        "Group updated",
        "Could not update group:",
        alerts,
    )
    .is_some()
}

/// Delete the selected groups
///
/// Every delete is issued even after a failure; the summary names the outcome
/// of the whole batch.
pub async fn delete_groups(
    api: &AdminClient,
    groups: &[GroupRow],
    alerts: &mut impl Notify,
) -> BulkOutcome {
    let results = futures::future::join_all(groups.iter().map(|g| api.delete_group(&g.id))).await;

    let mut outcome = BulkOutcome::new();
    for (group, result) in groups.iter().zip(results) {
        outcome.record(
            &result,
            &format!("Error deleting group {}:", group.name),
            alerts,
        );
    }
    let success = if outcome.total() == 1 {
        "Group deleted"
    } else {
        "Groups deleted"
    };
    outcome.summarize(success, "Could not delete groups", alerts);
    outcome
}

/// Join the selected users to a group
pub async fn add_members(
    api: &AdminClient,
    group_id: &str,
    users: &[UserRepresentation],
    alerts: &mut impl Notify,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::new();
    for user in users {
        let result = api.join_group(user.id(), group_id).await;
        outcome.record(
            &result,
            &format!("Could not add {} to the group:", user.username()),
            alerts,
        );
    }
    let success = match outcome.succeeded {
        1 => "1 user added to the group".to_string(),
        n => format!("{} users added to the group", n),
    };
    outcome.summarize(&success, "Could not add users to the group", alerts);
    outcome
}
