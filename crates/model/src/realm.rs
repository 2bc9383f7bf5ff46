//! Realm-level representations: the realm itself, authentication flows,
//! components, server info and the signed-in admin

use crate::client_scope::ProtocolMapperRepresentation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Component type of user federation providers
pub const USER_STORAGE_PROVIDER: &str = "org.keycloak.storage.UserStorageProvider";

/// Provider id of flows that only make sense for client authentication
const CLIENT_FLOW_PROVIDER: &str = "client-flow";

/// Realm used when the admin's home realm is unknown
pub const DEFAULT_REALM: &str = "master";

// ============================================================================
// Realm
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brute_force_protected: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RealmRepresentation {
    pub fn is_brute_force_protected(&self) -> bool {
        self.brute_force_protected.unwrap_or(false)
    }
}

// ============================================================================
// Authentication Flows
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationFlowRepresentation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub alias: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub top_level: bool,
    #[serde(default)]
    pub built_in: bool,
}

/// Flows selectable as client overrides: no client flows, sorted by alias
pub fn override_flow_options(
    flows: &[AuthenticationFlowRepresentation],
) -> Vec<AuthenticationFlowRepresentation> {
    let mut options: Vec<AuthenticationFlowRepresentation> = flows
        .iter()
        .filter(|f| f.provider_id.as_deref() != Some(CLIENT_FLOW_PROVIDER))
        .cloned()
        .collect();
    options.sort_by(|a, b| a.alias.cmp(&b.alias));
    options
}

/// Flows a broker can run after sign-in: top-level override candidates
pub fn broker_flow_options(
    flows: &[AuthenticationFlowRepresentation],
) -> Vec<AuthenticationFlowRepresentation> {
    override_flow_options(flows)
        .into_iter()
        .filter(|f| f.top_level)
        .collect()
}

// ============================================================================
// Components
// ============================================================================

/// A pluggable provider instance configured in the realm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub config: BTreeMap<String, Vec<String>>,
}

// ============================================================================
// Server Info
// ============================================================================

/// The parts of `/admin/serverinfo` the console relies on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfoRepresentation {
    /// Protocol → mapper types it supports
    #[serde(default)]
    pub protocol_mapper_types: BTreeMap<String, Vec<ProtocolMapperTypeRepresentation>>,
    /// Protocol → predefined mappers that can be added to scopes
    #[serde(default)]
    pub builtin_protocol_mappers: BTreeMap<String, Vec<ProtocolMapperRepresentation>>,
    /// Protocol → adapter configuration formats
    #[serde(default)]
    pub client_installations: BTreeMap<String, Vec<ClientInstallationRepresentation>>,
}

impl ServerInfoRepresentation {
    pub fn mapper_types(&self, protocol: &str) -> &[ProtocolMapperTypeRepresentation] {
        self.protocol_mapper_types
            .get(protocol)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn mapper_type(&self, protocol: &str, id: &str) -> Option<&ProtocolMapperTypeRepresentation> {
        self.mapper_types(protocol).iter().find(|t| t.id == id)
    }

    pub fn builtin_mappers(&self, protocol: &str) -> &[ProtocolMapperRepresentation] {
        self.builtin_protocol_mappers
            .get(protocol)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn installations(&self, protocol: &str) -> &[ClientInstallationRepresentation] {
        self.client_installations
            .get(protocol)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMapperTypeRepresentation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub help_text: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub properties: Vec<ConfigPropertyRepresentation>,
}

impl ProtocolMapperTypeRepresentation {
    /// Options of a list property, e.g. the claim JSON types
    pub fn property_options(&self, name: &str) -> &[String] {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.options.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPropertyRepresentation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub help_text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub options: Vec<String>,
}

/// An adapter configuration format a client can be exported in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInstallationRepresentation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub download_only: bool,
    #[serde(default)]
    pub display_type: String,
    #[serde(default)]
    pub help_text: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub media_type: String,
}

// ============================================================================
// Who Am I
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIRepresentation {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub realm: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default)]
    pub create_realm: bool,
    /// Realm name → admin roles held in it
    #[serde(rename = "realm_access", default)]
    pub realm_access: BTreeMap<String, Vec<String>>,
}

/// The signed-in admin as seen from a home realm
#[derive(Debug, Clone, PartialEq)]
pub struct WhoAmI {
    home_realm: Option<String>,
    me: WhoAmIRepresentation,
}

impl WhoAmI {
    pub fn new(home_realm: Option<String>, me: WhoAmIRepresentation) -> Self {
        Self { home_realm, me }
    }

    pub fn display_name(&self) -> &str {
        &self.me.display_name
    }

    /// Home realm, `master` when none was given
    pub fn home_realm(&self) -> &str {
        self.home_realm.as_deref().unwrap_or(DEFAULT_REALM)
    }

    pub fn can_create_realm(&self) -> bool {
        self.me.create_realm
    }

    pub fn realm_access(&self) -> &BTreeMap<String, Vec<String>> {
        &self.me.realm_access
    }

    pub fn locale(&self) -> &str {
        self.me.locale.as_deref().unwrap_or("en")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn whoami_mock() -> WhoAmIRepresentation {
        serde_json::from_value(json!({
            "userId": "c6f2b4b8",
            "realm": "master",
            "displayName": "Stan Silvert",
            "locale": "en",
            "createRealm": false,
            "realm_access": {
                "master": ["view-realm", "manage-users", "view-clients"],
                "demo": ["view-users"],
                "test": ["manage-clients", "query-groups"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_whoami_display_name() {
        let whoami = WhoAmI::new(Some("master".to_string()), whoami_mock());
        assert_eq!(whoami.display_name(), "Stan Silvert");
        assert!(!whoami.can_create_realm());
    }

    #[test]
    fn test_whoami_home_realm() {
        let whoami = WhoAmI::new(Some("myrealm".to_string()), whoami_mock());
        assert_eq!(whoami.home_realm(), "myrealm");
        let whoami = WhoAmI::new(None, whoami_mock());
        assert_eq!(whoami.home_realm(), "master");
    }

    #[test]
    fn test_whoami_realm_access() {
        let whoami = WhoAmI::new(None, whoami_mock());
        assert_eq!(whoami.realm_access().len(), 3);
        assert_eq!(whoami.realm_access()["master"].len(), 3);
    }

    #[test]
    fn test_override_flow_options() {
        let flow = |id: &str, alias: &str, provider: &str| AuthenticationFlowRepresentation {
            id: id.to_string(),
            alias: alias.to_string(),
            provider_id: Some(provider.to_string()),
            ..Default::default()
        };
        let flows = vec![
            flow("1", "registration", "basic-flow"),
            flow("2", "clients", "client-flow"),
            flow("3", "browser", "basic-flow"),
            flow("4", "direct grant", "basic-flow"),
        ];

        let aliases: Vec<String> = override_flow_options(&flows)
            .into_iter()
            .map(|f| f.alias)
            .collect();
        assert_eq!(aliases, vec!["browser", "direct grant", "registration"]);
    }

    #[test]
    fn test_server_info_lookup() {
        let info: ServerInfoRepresentation = serde_json::from_value(json!({
            "protocolMapperTypes": {
                "openid-connect": [{
                    "id": "oidc-usermodel-realm-role-mapper",
                    "name": "User Realm Role",
                    "category": "Token mapper",
                    "priority": 0,
                    "properties": [{
                        "name": "jsonType.label",
                        "label": "Claim JSON Type",
                        "type": "List",
                        "options": ["String", "long", "int", "boolean", "JSON"]
                    }]
                }]
            },
            "systemInfo": { "version": "12.0.0" }
        }))
        .unwrap();

        let mapper_type = info
            .mapper_type("openid-connect", "oidc-usermodel-realm-role-mapper")
            .unwrap();
        assert_eq!(mapper_type.property_options("jsonType.label").len(), 5);
        assert!(info.mapper_types("saml").is_empty());
        assert!(info.installations("openid-connect").is_empty());
    }
}
