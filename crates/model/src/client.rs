//! Client representations
//!
//! Clients are the OAuth/OIDC/SAML relying parties registered in a realm.
//! Representations are kept verbatim: fields the console does not know about
//! are carried in `extra` so an update never drops server data.

use crate::client_scope::ProtocolMapperRepresentation;
use kc_console_core::{AlertVariant, Protocol};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute holding the access token signature algorithm
pub const ATTR_ACCESS_TOKEN_ALG: &str = "access.token.signed.response.alg";
/// Attribute holding the ID token signature algorithm
pub const ATTR_ID_TOKEN_ALG: &str = "id.token.signed.response.alg";
/// Attribute holding the user info signature algorithm
pub const ATTR_USER_INFO_ALG: &str = "user.info.response.signature.alg";
/// Attribute holding the request object signature algorithm
pub const ATTR_REQUEST_OBJECT_ALG: &str = "request.object.signature.alg";
/// Attribute excluding session state from the authorization response
pub const ATTR_EXCLUDE_SESSION_STATE: &str = "exclude.session.state.from.auth.response";
/// Attribute holding the client-specific access token lifespan
pub const ATTR_ACCESS_TOKEN_LIFESPAN: &str = "access.token.lifespan";
/// Attribute holding the PKCE challenge method
pub const ATTR_PKCE_METHOD: &str = "pkce.code.challenge.method";
/// Attribute holding the SAML assertion lifespan
pub const ATTR_ASSERTION_LIFESPAN: &str = "saml.assertion.lifespan";

/// Key of the browser flow in authentication flow binding overrides
pub const FLOW_BROWSER: &str = "browser";
/// Key of the direct grant flow in authentication flow binding overrides
pub const FLOW_DIRECT_GRANT: &str = "direct_grant";

// ============================================================================
// Client
// ============================================================================

/// A client as exchanged with the admin API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_client: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_authenticator_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uris: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_flow_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_flow_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_access_grants_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_accounts_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_services_enabled: Option<bool>,
    /// Revocation time in seconds since the epoch, 0 when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<i64>,
    /// Seconds after which a cluster node must re-register, -1 when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_re_registration_timeout: Option<i64>,
    /// Cluster node host → last registration (seconds since the epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_nodes: Option<BTreeMap<String, i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_flow_binding_overrides: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_client_scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_client_scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_mappers: Option<Vec<ProtocolMapperRepresentation>>,
    /// Fields not modelled above, preserved across updates
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ClientRepresentation {
    /// A new client draft for the given protocol
    pub fn new(client_id: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            client_id: Some(client_id.into()),
            protocol: Some(protocol.as_str().to_string()),
            enabled: Some(true),
            standard_flow_enabled: Some(true),
            ..Default::default()
        }
    }

    pub fn client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or("")
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Parsed protocol; clients without one are OpenID Connect
    pub fn protocol(&self) -> Option<Protocol> {
        match self.protocol.as_deref() {
            None => Some(Protocol::OpenIdConnect),
            Some(p) => Protocol::parse(p),
        }
    }

    pub fn is_oidc(&self) -> bool {
        self.protocol() == Some(Protocol::OpenIdConnect)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn is_public(&self) -> bool {
        self.public_client.unwrap_or(false)
    }

    pub fn is_bearer_only(&self) -> bool {
        self.bearer_only.unwrap_or(false)
    }

    /// Confidential OIDC clients have credentials to manage
    pub fn has_credentials(&self) -> bool {
        self.is_oidc() && !self.is_public()
    }

    pub fn not_before(&self) -> i64 {
        self.not_before.unwrap_or(0)
    }

    /// Attribute value, if set
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.as_ref()?.get(key).map(String::as_str)
    }

    /// Set or, for an empty value, remove an attribute
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let attributes = self.attributes.get_or_insert_with(BTreeMap::new);
        if value.is_empty() {
            attributes.remove(key);
        } else {
            attributes.insert(key.to_string(), value);
        }
    }

    /// Flow id bound for the given key (`browser`, `direct_grant`)
    pub fn flow_override(&self, key: &str) -> Option<&str> {
        self.authentication_flow_binding_overrides
            .as_ref()?
            .get(key)
            .map(String::as_str)
    }

    /// Bind a flow for the given key; an empty id removes the override
    pub fn set_flow_override(&mut self, key: &str, flow_id: &str) {
        let overrides = self
            .authentication_flow_binding_overrides
            .get_or_insert_with(BTreeMap::new);
        if flow_id.is_empty() {
            overrides.remove(key);
        } else {
            overrides.insert(key.to_string(), flow_id.to_string());
        }
    }

    /// Registered cluster nodes sorted by host
    pub fn nodes(&self) -> Vec<(String, i64)> {
        self.registered_nodes
            .as_ref()
            .map(|n| n.iter().map(|(k, v)| (k.clone(), *v)).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Client secret as returned by `client-secret`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRepresentation {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

// ============================================================================
// Global Request Result
// ============================================================================

/// Outcome of a request the server fans out to cluster nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRequestResult {
    #[serde(default)]
    pub success_requests: Option<Vec<String>>,
    #[serde(default)]
    pub failed_requests: Option<Vec<String>>,
}

/// Action whose fan-out result is being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterAction {
    /// Pushing the revocation policy to the client's admin URL / nodes
    PushRevocation,
    /// Checking registered cluster nodes are reachable
    TestAvailability,
}

impl ClusterAction {
    fn success_message(&self, nodes: &str) -> String {
        match self {
            ClusterAction::PushRevocation => format!("Successfully push notBefore to: {}", nodes),
            ClusterAction::TestAvailability => {
                format!("Successfully verified availability for {}", nodes)
            }
        }
    }

    fn failure_message(&self, nodes: &str) -> String {
        match self {
            ClusterAction::PushRevocation => format!("Failed to push notBefore to: {}", nodes),
            ClusterAction::TestAvailability => {
                format!("Failed to verify availability for: {}", nodes)
            }
        }
    }
}

/// Warning shown when a fan-out reached nobody
pub const NO_PUSH_SENT: &str =
    "No push sent. No admin URI configured or no registered cluster nodes available";

impl GlobalRequestResult {
    pub fn successes(&self) -> &[String] {
        self.success_requests.as_deref().unwrap_or(&[])
    }

    pub fn failures(&self) -> &[String] {
        self.failed_requests.as_deref().unwrap_or(&[])
    }

    /// Alerts describing this result
    ///
    /// Nothing sent is a warning; any failure adds a danger alert after the
    /// success alert.
    pub fn alerts(&self, action: ClusterAction) -> Vec<(String, AlertVariant)> {
        let successes = self.successes();
        let failures = self.failures();

        if successes.is_empty() && failures.is_empty() {
            return vec![(NO_PUSH_SENT.to_string(), AlertVariant::Warning)];
        }

        let mut alerts = vec![(
            action.success_message(&successes.join(", ")),
            AlertVariant::Success,
        )];
        if !failures.is_empty() {
            alerts.push((
                action.failure_message(&failures.join(", ")),
                AlertVariant::Danger,
            ));
        }
        alerts
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

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let raw = json!({
            "id": "8f1c",
            "clientId": "account",
            "fullScopeAllowed": false,
            "surrogateAuthRequired": false,
            "attributes": { "pkce.code.challenge.method": "S256" }
        });

        let client: ClientRepresentation = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(client.client_id(), "account");
        assert_eq!(client.attribute(ATTR_PKCE_METHOD), Some("S256"));
        assert_eq!(client.extra.get("fullScopeAllowed"), Some(&json!(false)));
        assert_eq!(serde_json::to_value(&client).unwrap(), raw);
    }

    #[test]
    fn test_protocol_defaults_to_oidc() {
        let client = ClientRepresentation::default();
        assert!(client.is_oidc());
        assert!(client.has_credentials());

        let saml = ClientRepresentation::new("sp", Protocol::Saml);
        assert!(!saml.is_oidc());
        assert!(!saml.has_credentials());
    }

    #[test]
    fn test_set_attribute_empty_removes() {
        let mut client = ClientRepresentation::default();
        client.set_attribute(ATTR_ACCESS_TOKEN_ALG, "RS256");
        assert_eq!(client.attribute(ATTR_ACCESS_TOKEN_ALG), Some("RS256"));
        client.set_attribute(ATTR_ACCESS_TOKEN_ALG, "");
        assert_eq!(client.attribute(ATTR_ACCESS_TOKEN_ALG), None);
    }

    #[test]
    fn test_flow_override() {
        let mut client = ClientRepresentation::default();
        client.set_flow_override(FLOW_BROWSER, "flow-1");
        assert_eq!(client.flow_override(FLOW_BROWSER), Some("flow-1"));
        client.set_flow_override(FLOW_BROWSER, "");
        assert_eq!(client.flow_override(FLOW_BROWSER), None);
    }

    #[test]
    fn test_request_result_nothing_sent() {
        let result = GlobalRequestResult::default();
        assert_eq!(
            result.alerts(ClusterAction::PushRevocation),
            vec![(NO_PUSH_SENT.to_string(), AlertVariant::Warning)]
        );
    }

    #[test]
    fn test_request_result_partial_failure() {
        let result = GlobalRequestResult {
            success_requests: Some(vec!["http://a".to_string()]),
            failed_requests: Some(vec!["http://b".to_string(), "http://c".to_string()]),
        };
        let alerts = result.alerts(ClusterAction::TestAvailability);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].1, AlertVariant::Success);
        assert_eq!(
            alerts[1],
            (
                "Failed to verify availability for: http://b, http://c".to_string(),
                AlertVariant::Danger
            )
        );
    }

    #[test]
    fn test_request_result_all_succeeded() {
        let result: GlobalRequestResult =
            serde_json::from_value(json!({ "successRequests": ["http://app/admin"] })).unwrap();
        assert_eq!(
            result.alerts(ClusterAction::PushRevocation),
            vec![(
                "Successfully push notBefore to: http://app/admin".to_string(),
                AlertVariant::Success
            )]
        );
    }
}
