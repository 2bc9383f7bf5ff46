//! Identity providers brokered by the realm
//!
//! Only OpenID Connect providers can be added from the console. Their
//! endpoints come from the provider's discovery document, fetched from a URL
//! or read from an uploaded metadata file.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Provider id of generic OpenID Connect brokers
pub const OIDC_PROVIDER_ID: &str = "oidc";

/// Flow run the first time a user signs in through a provider
pub const DEFAULT_FIRST_BROKER_LOGIN_FLOW: &str = "first broker login";

/// Placeholder shown in the discovery endpoint field
pub const DISCOVERY_PLACEHOLDER: &str = "https://hostname/.well-known/openid-configuration";

/// Message shown when a discovery document is unusable
pub const NO_VALID_METADATA: &str = "No valid metadata was found at this URL";

/// Provider config keys edited by the console
pub mod config_keys {
    pub const CLIENT_ID: &str = "clientId";
    pub const CLIENT_SECRET: &str = "clientSecret";
    pub const AUTHORIZATION_URL: &str = "authorizationUrl";
    pub const TOKEN_URL: &str = "tokenUrl";
    pub const USER_INFO_URL: &str = "userInfoUrl";
    pub const LOGOUT_URL: &str = "logoutUrl";
    pub const ISSUER: &str = "issuer";
    pub const JWKS_URL: &str = "jwksUrl";
    pub const USE_JWKS_URL: &str = "useJwksUrl";
    pub const VALIDATE_SIGNATURE: &str = "validateSignature";
    pub const HIDE_ON_LOGIN_PAGE: &str = "hideOnLoginPage";
    pub const SYNC_MODE: &str = "syncMode";
}

// ============================================================================
// Sync Mode
// ============================================================================

/// How user data from the provider is applied on later logins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Copy the user once, on first login
    #[default]
    Import,
    /// Behaviour of mappers created before sync modes existed
    Legacy,
    /// Overwrite the user on every login
    Force,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Import => "IMPORT",
            SyncMode::Legacy => "LEGACY",
            SyncMode::Force => "FORCE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SyncMode::Import => "Import",
            SyncMode::Legacy => "Legacy",
            SyncMode::Force => "Force",
        }
    }

    /// Parse a config value, ignoring case
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(value))
    }

    pub fn all() -> &'static [SyncMode] {
        &[SyncMode::Import, SyncMode::Legacy, SyncMode::Force]
    }
}

// ============================================================================
// Identity Provider
// ============================================================================

/// An identity provider as exchanged with the admin API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_token: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_broker_login_flow_alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_broker_login_flow_alias: Option<String>,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl IdentityProviderRepresentation {
    /// A new OpenID Connect provider draft with the server's defaults
    pub fn new_oidc() -> Self {
        let mut config = BTreeMap::new();
        config.insert(
            config_keys::SYNC_MODE.to_string(),
            SyncMode::default().as_str().to_string(),
        );
        Self {
            alias: Some(OIDC_PROVIDER_ID.to_string()),
            provider_id: Some(OIDC_PROVIDER_ID.to_string()),
            enabled: Some(true),
            store_token: Some(false),
            trust_email: Some(false),
            link_only: Some(false),
            first_broker_login_flow_alias: Some(DEFAULT_FIRST_BROKER_LOGIN_FLOW.to_string()),
            post_broker_login_flow_alias: Some(String::new()),
            config,
            ..Default::default()
        }
    }

    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or("")
    }

    pub fn provider_id(&self) -> &str {
        self.provider_id.as_deref().unwrap_or("")
    }

    /// Display name, falling back to the alias
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.alias())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn config_value(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    pub fn set_config(&mut self, key: &str, value: impl Into<String>) {
        self.config.insert(key.to_string(), value.into());
    }

    /// Boolean config entry; config values are strings on the wire
    pub fn config_flag(&self, key: &str) -> bool {
        self.config_value(key) == Some("true")
    }

    pub fn sync_mode(&self) -> SyncMode {
        self.config_value(config_keys::SYNC_MODE)
            .and_then(SyncMode::parse)
            .unwrap_or_default()
    }

    /// Take the provider's endpoints from its discovery document
    pub fn apply_discovery(&mut self, metadata: &OidcConfiguration) {
        use config_keys::*;

        let endpoints = [
            (AUTHORIZATION_URL, &metadata.authorization_endpoint),
            (TOKEN_URL, &metadata.token_endpoint),
            (USER_INFO_URL, &metadata.userinfo_endpoint),
            (LOGOUT_URL, &metadata.end_session_endpoint),
            (ISSUER, &metadata.issuer),
            (JWKS_URL, &metadata.jwks_uri),
        ];
        for (key, value) in endpoints {
            match value {
                Some(url) => self.set_config(key, url.clone()),
                None => {
                    self.config.remove(key);
                }
            }
        }

        let signed = metadata.jwks_uri.is_some();
        self.set_config(VALIDATE_SIGNATURE, signed.to_string());
        self.set_config(USE_JWKS_URL, signed.to_string());
    }

    /// Whether the endpoints needed to sign in are known
    pub fn has_endpoints(&self) -> bool {
        [config_keys::AUTHORIZATION_URL, config_keys::TOKEN_URL]
            .iter()
            .all(|key| self.config_value(key).is_some_and(|v| !v.trim().is_empty()))
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// An OpenID Connect discovery document (`.well-known/openid-configuration`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OidcConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userinfo_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_session_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwks_uri: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl OidcConfiguration {
    /// A document is usable when it names both sign-in endpoints
    pub fn is_valid(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.authorization_endpoint) && present(&self.token_endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn google() -> OidcConfiguration {
        serde_json::from_value(json!({
            "issuer": "https://accounts.example.com",
            "authorization_endpoint": "https://accounts.example.com/o/oauth2/v2/auth",
            "token_endpoint": "https://oauth2.example.com/token",
            "userinfo_endpoint": "https://openidconnect.example.com/v1/userinfo",
            "jwks_uri": "https://www.example.com/oauth2/v3/certs",
            "scopes_supported": ["openid", "email"]
        }))
        .unwrap()
    }

    #[test]
    fn test_discovery_fills_endpoints() {
        let mut provider = IdentityProviderRepresentation::new_oidc();
        assert!(!provider.has_endpoints());

        provider.apply_discovery(&google());
        assert!(provider.has_endpoints());
        assert_eq!(
            provider.config_value(config_keys::TOKEN_URL),
            Some("https://oauth2.example.com/token")
        );
        assert_eq!(provider.config_value(config_keys::LOGOUT_URL), None);
        assert!(provider.config_flag(config_keys::VALIDATE_SIGNATURE));
        assert!(provider.config_flag(config_keys::USE_JWKS_URL));
    }

    #[test]
    fn test_rediscovery_drops_stale_endpoints() {
        let mut provider = IdentityProviderRepresentation::new_oidc();
        provider.set_config(config_keys::LOGOUT_URL, "https://old/logout");
        provider.set_config(config_keys::JWKS_URL, "https://old/certs");

        let mut metadata = google();
        metadata.jwks_uri = None;
        provider.apply_discovery(&metadata);

        assert_eq!(provider.config_value(config_keys::LOGOUT_URL), None);
        assert_eq!(provider.config_value(config_keys::JWKS_URL), None);
        assert!(!provider.config_flag(config_keys::VALIDATE_SIGNATURE));
    }

    #[test]
    fn test_document_validity() {
        assert!(google().is_valid());
        assert!(!OidcConfiguration::default().is_valid());

        let error: OidcConfiguration =
            serde_json::from_value(json!({ "error": "not found" })).unwrap();
        assert!(!error.is_valid());
        assert!(error.extra.contains_key("error"));
    }

    #[test]
    fn test_new_provider_defaults() {
        let provider = IdentityProviderRepresentation::new_oidc();
        assert_eq!(provider.alias(), "oidc");
        assert_eq!(provider.provider_id(), OIDC_PROVIDER_ID);
        assert_eq!(provider.sync_mode(), SyncMode::Import);
        assert_eq!(
            provider.first_broker_login_flow_alias.as_deref(),
            Some(DEFAULT_FIRST_BROKER_LOGIN_FLOW)
        );

        let json = serde_json::to_value(&provider).unwrap();
        assert_eq!(json["providerId"], "oidc");
        assert_eq!(json["config"]["syncMode"], "IMPORT");
    }

    #[test]
    fn test_sync_mode_parse() {
        assert_eq!(SyncMode::parse("force"), Some(SyncMode::Force));
        assert_eq!(SyncMode::parse("LEGACY"), Some(SyncMode::Legacy));
        assert_eq!(SyncMode::parse("sometimes"), None);

        let mut provider = IdentityProviderRepresentation::new_oidc();
        provider.set_config(config_keys::SYNC_MODE, "bogus");
        assert_eq!(provider.sync_mode(), SyncMode::Import);
    }

    #[test]
    fn test_display_name_falls_back_to_alias() {
        let mut provider = IdentityProviderRepresentation::new_oidc();
        assert_eq!(provider.display_name(), "oidc");
        provider.display_name = Some("Corporate SSO".to_string());
        assert_eq!(provider.display_name(), "Corporate SSO");
    }
}
