//! Form validation rules
//!
//! Drafts are checked before submit; every failing field gets one inline
//! message. Uniqueness and naming rules stay with the server.

use crate::client::ClientRepresentation;
use crate::client_scope::ClientScopeRepresentation;
use crate::group::GroupRepresentation;
use crate::identity_provider::{IdentityProviderRepresentation, config_keys};
use crate::role::RoleRepresentation;
use kc_console_core::{FieldErrors, Validatable};

/// Message shown under an empty required field
pub const REQUIRED: &str = "Required field";

/// Maximum length of free-text description fields
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

// ============================================================================
// Rules
// ============================================================================

/// Record an error when `value` is missing or blank
pub fn required(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if value.is_none_or(|v| v.trim().is_empty()) {
        errors.add(field, REQUIRED);
    }
}

/// Record an error when `value` is longer than `max` characters
pub fn max_length(errors: &mut FieldErrors, field: &str, value: Option<&str>, max: usize) {
    if value.is_some_and(|v| v.chars().count() > max) {
        errors.add(field, format!("Max length is {}", max));
    }
}

// ============================================================================
// Drafts
// ============================================================================

impl Validatable for ClientRepresentation {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "protocol", self.protocol.as_deref());
        required(&mut errors, "clientId", self.client_id.as_deref());
        errors.into_result()
    }
}

impl Validatable for ClientScopeRepresentation {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", self.name.as_deref());
        max_length(
            &mut errors,
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        );
        errors.into_result()
    }
}

impl Validatable for RoleRepresentation {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", self.name.as_deref());
        max_length(
            &mut errors,
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        );
        errors.into_result()
    }
}

impl Validatable for GroupRepresentation {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", self.name.as_deref());
        errors.into_result()
    }
}

/// Client credentials are required; endpoints must have been discovered
impl Validatable for IdentityProviderRepresentation {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "alias", self.alias.as_deref());
        required(&mut errors, config_keys::CLIENT_ID, self.config_value(config_keys::CLIENT_ID));
        required(
            &mut errors,
            config_keys::CLIENT_SECRET,
            self.config_value(config_keys::CLIENT_SECRET),
        );
        if !self.has_endpoints() {
            errors.add("discoveryEndpoint", REQUIRED);
        }
        errors.into_result()
    }
}

/// A cluster node registered by hand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDraft {
    pub host: String,
}

impl Validatable for NodeDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "host", Some(&self.host));
        errors.into_result()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kc_console_core::Protocol;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_name_required() {
        let role = RoleRepresentation::default();
        let errors = role.field_errors();
        assert_eq!(errors.get("name"), Some(REQUIRED));
        assert!(errors.get("description").is_none());
    }

    #[test]
    fn test_role_description_max_length() {
        let role = RoleRepresentation {
            name: Some("auditor".to_string()),
            description: Some("x".repeat(256)),
            ..Default::default()
        };
        assert_eq!(role.field_errors().get("description"), Some("Max length is 255"));

        let role = RoleRepresentation {
            description: Some("x".repeat(255)),
            ..role
        };
        assert!(role.is_valid());
    }

    #[test]
    fn test_client_draft() {
        let blank = ClientRepresentation::default();
        assert_eq!(blank.field_errors().len(), 2);

        let draft = ClientRepresentation::new("my-app", Protocol::OpenIdConnect);
        assert!(draft.is_valid());

        let spaces = ClientRepresentation::new("   ", Protocol::Saml);
        assert_eq!(spaces.field_errors().get("clientId"), Some(REQUIRED));
    }

    #[test]
    fn test_group_and_node() {
        assert!(!GroupRepresentation::default().is_valid());
        assert!(GroupRepresentation::named("admins").is_valid());
        assert!(!NodeDraft::default().is_valid());
        assert!(NodeDraft { host: "10.0.0.7".to_string() }.is_valid());
    }

    #[test]
    fn test_identity_provider_draft() {
        let mut provider = IdentityProviderRepresentation::new_oidc();
        let errors = provider.field_errors();
        assert_eq!(errors.get("clientId"), Some(REQUIRED));
        assert_eq!(errors.get("clientSecret"), Some(REQUIRED));
        assert_eq!(errors.get("discoveryEndpoint"), Some(REQUIRED));
        assert!(errors.get("alias").is_none());

        provider.set_config(config_keys::CLIENT_ID, "console");
        provider.set_config(config_keys::CLIENT_SECRET, "s3cret");
        provider.set_config(config_keys::AUTHORIZATION_URL, "https://idp/auth");
        provider.set_config(config_keys::TOKEN_URL, "https://idp/token");
        assert!(provider.is_valid());
    }
}
