//! Shared value types for the admin console
//!
//! Small enums and value objects used by the model, the admin client and the
//! UI alike.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Protocols
// ============================================================================

/// Login protocol a client or client scope speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Protocol {
    #[default]
    #[serde(rename = "openid-connect")]
    OpenIdConnect,
    #[serde(rename = "saml")]
    Saml,
}

impl Protocol {
    /// Wire name used by the admin API
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::OpenIdConnect => "openid-connect",
            Protocol::Saml => "saml",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Protocol::OpenIdConnect => "OpenID Connect",
            Protocol::Saml => "SAML",
        }
    }

    /// Parse the wire name
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "openid-connect" => Some(Protocol::OpenIdConnect),
            "saml" => Some(Protocol::Saml),
            _ => None,
        }
    }

    /// Get all protocols
    pub fn all() -> &'static [Protocol] {
        &[Protocol::OpenIdConnect, Protocol::Saml]
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Client Scope Assignment
// ============================================================================

/// How a client scope is attached to a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientScopeType {
    #[default]
    Default,
    Optional,
}

impl ClientScopeType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ClientScopeType::Default => "Default",
            ClientScopeType::Optional => "Optional",
        }
    }

    /// Path segment of the admin API collection holding scopes of this type
    pub fn collection(&self) -> &'static str {
        match self {
            ClientScopeType::Default => "default-client-scopes",
            ClientScopeType::Optional => "optional-client-scopes",
        }
    }

    /// Parse a lowercase name as used in select options
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(ClientScopeType::Default),
            "optional" => Some(ClientScopeType::Optional),
            _ => None,
        }
    }

    /// Lowercase name used in select options
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientScopeType::Default => "default",
            ClientScopeType::Optional => "optional",
        }
    }

    /// Get all scope types
    pub fn all() -> &'static [ClientScopeType] {
        &[ClientScopeType::Default, ClientScopeType::Optional]
    }
}

impl std::fmt::Display for ClientScopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Time Units
// ============================================================================

/// Unit offered by time selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    #[default]
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    /// Number of seconds in one unit
    pub fn seconds(&self) -> u64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 3_600,
            TimeUnit::Day => 86_400,
        }
    }

    /// Get display name (plural)
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeUnit::Second => "Seconds",
            TimeUnit::Minute => "Minutes",
            TimeUnit::Hour => "Hours",
            TimeUnit::Day => "Days",
        }
    }

    /// Lowercase name used in select options
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
        }
    }

    /// Parse a lowercase name
    pub fn parse(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|u| u.as_str() == value)
    }

    /// Units from smallest to largest
    pub fn all() -> &'static [TimeUnit] {
        &[TimeUnit::Second, TimeUnit::Minute, TimeUnit::Hour, TimeUnit::Day]
    }
}

// ============================================================================
// Field Errors
// ============================================================================

/// Inline validation messages keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field; the first error recorded for a field wins
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Error message for a field, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Owned error message for a field, convenient for component props
    pub fn message(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over (field, message) pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when no errors were recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_protocol_wire_names() {
        assert_eq!(Protocol::parse("openid-connect"), Some(Protocol::OpenIdConnect));
        assert_eq!(Protocol::parse("saml"), Some(Protocol::Saml));
        assert_eq!(Protocol::parse("docker-v2"), None);
        assert_eq!(
            serde_json::to_string(&Protocol::OpenIdConnect).unwrap(),
            "\"openid-connect\""
        );
    }

    #[test]
    fn test_scope_type_collection() {
        assert_eq!(
            ClientScopeType::Default.collection(),
            "default-client-scopes"
        );
        assert_eq!(
            ClientScopeType::Optional.collection(),
            "optional-client-scopes"
        );
        assert_eq!(ClientScopeType::parse("optional"), Some(ClientScopeType::Optional));
    }

    #[test]
    fn test_time_unit_seconds() {
        assert_eq!(TimeUnit::Day.seconds(), 86_400);
        assert_eq!(TimeUnit::parse("hour"), Some(TimeUnit::Hour));
        assert_eq!(TimeUnit::parse("week"), None);
    }

    #[test]
    fn test_field_errors_first_wins() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Required field");
        errors.add("name", "Too long");
        errors.add("description", "Max length 255");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("Required field"));
        assert_eq!(
            errors.to_string(),
            "description: Max length 255, name: Required field"
        );
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
