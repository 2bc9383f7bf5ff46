//! Groups and their members

use crate::user::UserRepresentation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_groups: Vec<GroupRepresentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GroupRepresentation {
    /// A new group draft
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// This group's descendants, depth first
    pub fn descendants(&self) -> Vec<&GroupRepresentation> {
        let mut groups = Vec::new();
        for child in &self.sub_groups {
            groups.push(child);
            groups.extend(child.descendants());
        }
        groups
    }

    /// Ids of this group's descendants, depth first
    pub fn descendant_ids(&self) -> Vec<String> {
        self.descendants()
            .into_iter()
            .map(|g| g.id().to_string())
            .collect()
    }
}

/// A group listed with its member count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub id: String,
    pub name: String,
    pub path: String,
    pub members: usize,
}

/// Join groups with their member counts, positionally
pub fn group_rows(groups: &[GroupRepresentation], member_counts: &[usize]) -> Vec<GroupRow> {
    groups
        .iter()
        .zip(member_counts.iter().copied())
        .map(|(group, members)| GroupRow {
            id: group.id().to_string(),
            name: group.name().to_string(),
            path: group.path.clone().unwrap_or_default(),
            members,
        })
        .collect()
}

/// A member row; `membership` names the sub-group a member comes from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub membership: String,
}

/// Merge direct members with members of sub-groups, first occurrence wins
pub fn merge_members(
    direct: &[UserRepresentation],
    inherited: &[(String, Vec<UserRepresentation>)],
) -> Vec<MemberRow> {
    let mut rows: Vec<MemberRow> = Vec::new();
    let sources = std::iter::once(("", direct))
        .chain(inherited.iter().map(|(group, users)| (group.as_str(), users.as_slice())));

    for (group, users) in sources {
        for user in users {
            if rows.iter().any(|r| r.id == user.id()) {
                continue;
            }
            rows.push(MemberRow {
                id: user.id().to_string(),
                username: user.username().to_string(),
                email: user.email.clone().unwrap_or_default(),
                membership: group.to_string(),
            });
        }
    }
    rows
}

/// Users that can still be added to a group
pub fn non_members(users: &[UserRepresentation], members: &[MemberRow]) -> Vec<UserRepresentation> {
    users
        .iter()
        .filter(|u| !members.iter().any(|m| m.id == u.id()))
        .cloned()
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user(id: &str, username: &str) -> UserRepresentation {
        UserRepresentation {
            id: Some(id.to_string()),
            username: Some(username.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_rows_join_counts() {
        let mut admins = GroupRepresentation::named("admins");
        admins.id = Some("g1".to_string());
        let mut devs = GroupRepresentation::named("devs");
        devs.id = Some("g2".to_string());

        let rows = group_rows(&[admins, devs], &[3, 0]);
        assert_eq!(rows[0].members, 3);
        assert_eq!(rows[1].name, "devs");
        assert_eq!(rows[1].members, 0);
    }

    #[test]
    fn test_descendant_ids() {
        let mut root = GroupRepresentation::named("root");
        let mut child = GroupRepresentation::named("child");
        child.id = Some("c".to_string());
        let mut grandchild = GroupRepresentation::named("grandchild");
        grandchild.id = Some("gc".to_string());
        child.sub_groups.push(grandchild);
        root.sub_groups.push(child);

        assert_eq!(root.descendant_ids(), vec!["c", "gc"]);
    }

    #[test]
    fn test_merge_members_dedupes() {
        let direct = vec![user("1", "alice")];
        let inherited = vec![(
            "child".to_string(),
            vec![user("1", "alice"), user("2", "bob")],
        )];

        let rows = merge_members(&direct, &inherited);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].membership, "");
        assert_eq!(rows[1].username, "bob");
        assert_eq!(rows[1].membership, "child");
    }

    #[test]
    fn test_non_members() {
        let members = merge_members(&[user("1", "alice")], &[]);
        let rest = non_members(&[user("1", "alice"), user("2", "bob")], &members);
        assert_eq!(rest, vec![user("2", "bob")]);
    }
}
