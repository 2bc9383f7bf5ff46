//! Client scopes and protocol mappers

use crate::realm::ProtocolMapperTypeRepresentation;
use kc_console_core::ClientScopeType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute controlling whether the consent screen lists the scope
pub const ATTR_DISPLAY_ON_CONSENT: &str = "display.on.consent.screen";
/// Attribute holding the text shown on the consent screen
pub const ATTR_CONSENT_TEXT: &str = "consent.screen.text";
/// Attribute controlling whether the scope name is included in tokens
pub const ATTR_INCLUDE_IN_TOKEN_SCOPE: &str = "include.in.token.scope";

// ============================================================================
// Representations
// ============================================================================

/// A named bundle of protocol mappers that can be attached to clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientScopeRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_mappers: Option<Vec<ProtocolMapperRepresentation>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ClientScopeRepresentation {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn protocol(&self) -> &str {
        self.protocol.as_deref().unwrap_or("")
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.as_ref()?.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        self.attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
    }

    /// Missing attribute counts as shown, like the server does
    pub fn display_on_consent(&self) -> bool {
        self.attribute(ATTR_DISPLAY_ON_CONSENT) != Some("false")
    }

    pub fn mappers(&self) -> &[ProtocolMapperRepresentation] {
        self.protocol_mappers.as_deref().unwrap_or(&[])
    }
}

/// A rule mapping user or session data into a token claim or assertion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMapperRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Id of the mapper type (e.g. `oidc-usermodel-realm-role-mapper`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_mapper: Option<String>,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProtocolMapperRepresentation {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn mapper_type(&self) -> &str {
        self.protocol_mapper.as_deref().unwrap_or("")
    }
}

// ============================================================================
// Client Scope Rows
// ============================================================================

/// A scope assigned to a client, as listed in the client's scopes tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientScopeRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ClientScopeType,
    pub description: String,
}

/// Rows for a client's assigned scopes: optional ones first, then defaults
///
/// Descriptions come from the realm catalogue because the per-client lists
/// only carry ids and names.
pub fn assigned_scope_rows(
    default_scopes: &[ClientScopeRepresentation],
    optional_scopes: &[ClientScopeRepresentation],
    catalogue: &[ClientScopeRepresentation],
) -> Vec<ClientScopeRow> {
    let describe = |id: &str| {
        catalogue
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.description().to_string())
            .unwrap_or_default()
    };

    let tagged = optional_scopes
        .iter()
        .map(|s| (s, ClientScopeType::Optional))
        .chain(default_scopes.iter().map(|s| (s, ClientScopeType::Default)));

    tagged
        .map(|(scope, kind)| ClientScopeRow {
            id: scope.id().to_string(),
            name: scope.name().to_string(),
            kind,
            description: describe(scope.id()),
        })
        .collect()
}

/// Realm scopes of the client's protocol that are not assigned yet
pub fn unassigned_scopes(
    catalogue: &[ClientScopeRepresentation],
    assigned: &[ClientScopeRow],
    protocol: &str,
) -> Vec<ClientScopeRepresentation> {
    catalogue
        .iter()
        .filter(|scope| !assigned.iter().any(|row| row.name == scope.name()))
        .filter(|scope| scope.protocol() == protocol)
        .cloned()
        .collect()
}

// ============================================================================
// Mapper Rows
// ============================================================================

/// A mapper of a client scope joined with its type metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapperRow {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub priority: i32,
}

/// Mapper rows ordered by type priority
///
/// Mappers whose type the server does not advertise are listed last with
/// their raw type id.
pub fn mapper_rows(
    mappers: &[ProtocolMapperRepresentation],
    types: &[ProtocolMapperTypeRepresentation],
) -> Vec<MapperRow> {
    let mut rows: Vec<MapperRow> = mappers
        .iter()
        .map(|mapper| {
            let mapper_type = types.iter().find(|t| t.id == mapper.mapper_type());
            MapperRow {
                id: mapper.id().to_string(),
                name: mapper.name().to_string(),
                category: mapper_type.map(|t| t.category.clone()).unwrap_or_default(),
                type_name: mapper_type
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| mapper.mapper_type().to_string()),
                priority: mapper_type.map(|t| t.priority).unwrap_or(i32::MAX),
            }
        })
        .collect();
    rows.sort_by_key(|r| r.priority);
    rows
}

/// Built-in mappers not already present (by name) on the scope
pub fn available_builtin_mappers(
    builtin: &[ProtocolMapperRepresentation],
    existing: &[ProtocolMapperRepresentation],
) -> Vec<ProtocolMapperRepresentation> {
    builtin
        .iter()
        .filter(|b| !existing.iter().any(|e| e.name() == b.name()))
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

    fn scope(id: &str, name: &str, protocol: &str, description: &str) -> ClientScopeRepresentation {
        ClientScopeRepresentation {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            protocol: Some(protocol.to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    fn catalogue() -> Vec<ClientScopeRepresentation> {
        vec![
            scope("1", "email", "openid-connect", "OpenID Connect built-in scope: email"),
            scope("2", "profile", "openid-connect", "OpenID Connect built-in scope: profile"),
            scope("3", "phone", "openid-connect", "OpenID Connect built-in scope: phone"),
            scope("4", "role_list", "saml", "SAML role list"),
        ]
    }

    #[test]
    fn test_assigned_rows_optional_first_with_descriptions() {
        let rows = assigned_scope_rows(
            &[scope("1", "email", "", "")],
            &[scope("3", "phone", "", "")],
            &catalogue(),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "phone");
        assert_eq!(rows[0].kind, ClientScopeType::Optional);
        assert_eq!(rows[1].kind, ClientScopeType::Default);
        assert_eq!(rows[1].description, "OpenID Connect built-in scope: email");
    }

    #[test]
    fn test_unassigned_scopes_match_protocol() {
        let rows = assigned_scope_rows(&[scope("1", "email", "", "")], &[], &catalogue());
        let rest = unassigned_scopes(&catalogue(), &rows, "openid-connect");
        let names: Vec<&str> = rest.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["profile", "phone"]);
    }

    #[test]
    fn test_mapper_rows_sorted_by_priority() {
        let types = vec![
            ProtocolMapperTypeRepresentation {
                id: "oidc-usermodel-attribute-mapper".to_string(),
                name: "User Attribute".to_string(),
                category: "Token mapper".to_string(),
                priority: 10,
                ..Default::default()
            },
            ProtocolMapperTypeRepresentation {
                id: "oidc-full-name-mapper".to_string(),
                name: "User's full name".to_string(),
                category: "Token mapper".to_string(),
                priority: 1,
                ..Default::default()
            },
        ];
        let mappers = vec![
            ProtocolMapperRepresentation {
                id: Some("a".to_string()),
                name: Some("locale".to_string()),
                protocol_mapper: Some("oidc-usermodel-attribute-mapper".to_string()),
                ..Default::default()
            },
            ProtocolMapperRepresentation {
                id: Some("b".to_string()),
                name: Some("custom".to_string()),
                protocol_mapper: Some("acme-mapper".to_string()),
                ..Default::default()
            },
            ProtocolMapperRepresentation {
                id: Some("c".to_string()),
                name: Some("full name".to_string()),
                protocol_mapper: Some("oidc-full-name-mapper".to_string()),
                ..Default::default()
            },
        ];

        let rows = mapper_rows(&mappers, &types);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["full name", "locale", "custom"]);
        assert_eq!(rows[2].type_name, "acme-mapper");
    }

    #[test]
    fn test_available_builtin_mappers() {
        let named = |n: &str| ProtocolMapperRepresentation {
            name: Some(n.to_string()),
            ..Default::default()
        };
        let available =
            available_builtin_mappers(&[named("email"), named("family name")], &[named("email")]);
        assert_eq!(available, vec![named("family name")]);
    }

    #[test]
    fn test_display_on_consent_default() {
        let mut s = scope("1", "email", "openid-connect", "");
        assert!(s.display_on_consent());
        s.set_attribute(ATTR_DISPLAY_ON_CONSENT, "false");
        assert!(!s.display_on_consent());
    }
}
