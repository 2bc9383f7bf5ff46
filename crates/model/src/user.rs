//! Users and their brute-force lockout status

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Above this many users the console asks for a search before listing
pub const LIST_USERS_LIMIT: u64 = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federation_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl UserRepresentation {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Attack-detection state of one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BruteForceStatus {
    #[serde(default)]
    pub num_failures: u32,
    #[serde(default)]
    pub disabled: bool,
    #[serde(rename = "lastIPFailure", skip_serializing_if = "Option::is_none")]
    pub last_ip_failure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_failure: Option<i64>,
}

/// A user listed with its lockout state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub enabled: bool,
    pub temporarily_disabled: bool,
}

impl UserRow {
    pub fn new(user: &UserRepresentation, brute: Option<&BruteForceStatus>) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            first_name: user.first_name.clone().unwrap_or_default(),
            enabled: user.is_enabled(),
            temporarily_disabled: brute.is_some_and(|b| b.disabled),
        }
    }

    /// Status labels shown in the users table
    pub fn status_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if !self.enabled {
            labels.push("Disabled");
        }
        if self.temporarily_disabled {
            labels.push("Temporarily disabled");
        }
        labels
    }
}

/// Whether users may be listed without a search term
///
/// Listing is only offered when no user federation provider is configured
/// and the realm is small.
pub fn can_list_without_search(federation_providers: usize, user_count: u64) -> bool {
    federation_providers == 0 && user_count <= LIST_USERS_LIMIT
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_labels() {
        let mut user = UserRepresentation {
            id: Some("u1".to_string()),
            username: Some("jdoe".to_string()),
            enabled: Some(false),
            ..Default::default()
        };
        let locked = BruteForceStatus {
            disabled: true,
            num_failures: 5,
            ..Default::default()
        };

        let row = UserRow::new(&user, Some(&locked));
        assert_eq!(row.status_labels(), vec!["Disabled", "Temporarily disabled"]);

        user.enabled = None;
        let row = UserRow::new(&user, None);
        assert!(row.status_labels().is_empty());
    }

    #[test]
    fn test_can_list_without_search() {
        assert!(can_list_without_search(0, 100));
        assert!(!can_list_without_search(0, 101));
        assert!(!can_list_without_search(1, 3));
    }
}
