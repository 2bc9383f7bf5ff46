//! Realm and client roles

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_role: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RoleRepresentation {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn is_composite(&self) -> bool {
        self.composite.unwrap_or(false)
    }
}

/// Roles sorted by name, ignoring case
pub fn sort_roles(mut roles: Vec<RoleRepresentation>) -> Vec<RoleRepresentation> {
    roles.sort_by_key(|r| r.name().to_lowercase());
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_roles_case_insensitive() {
        let role = |n: &str| RoleRepresentation {
            name: Some(n.to_string()),
            ..Default::default()
        };
        let sorted = sort_roles(vec![role("uma_protection"), role("Admin"), role("manage")]);
        let names: Vec<&str> = sorted.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Admin", "manage", "uma_protection"]);
    }
}
