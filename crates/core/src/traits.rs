//! Core traits for the admin console
//!
//! Behaviors shared across crates: form-level validation of representations
//! and the sink that action outcomes are reported into.

use crate::alert::AlertVariant;
use crate::types::FieldErrors;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for form drafts that can be checked before submission
///
/// Validation failures block the submit and are rendered next to the
/// offending fields, so errors are collected per field instead of failing on
/// the first one.
///
/// # Example
///
/// ```rust,ignore
/// use kc_console_core::{FieldErrors, Validatable};
///
/// struct GroupDraft {
///     name: String,
/// }
///
/// impl Validatable for GroupDraft {
///     fn validate(&self) -> Result<(), FieldErrors> {
///         let mut errors = FieldErrors::new();
///         if self.name.trim().is_empty() {
///             errors.add("name", "Required field");
///         }
///         errors.into_result()
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the draft, returning every field error found
    fn validate(&self) -> Result<(), FieldErrors>;

    /// Check if the draft is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Field errors, empty when valid
    fn field_errors(&self) -> FieldErrors {
        self.validate().err().unwrap_or_default()
    }
}

// ============================================================================
// Notify Trait
// ============================================================================

/// Destination for user-facing action outcomes
///
/// The running application reports into the global alert queue; tests report
/// into a local [`AlertQueue`](crate::AlertQueue) and inspect it afterwards.
pub trait Notify {
    fn add_alert(&mut self, message: impl Into<String>, variant: AlertVariant);

    fn success(&mut self, message: impl Into<String>) {
        self.add_alert(message, AlertVariant::Success);
    }

    fn danger(&mut self, message: impl Into<String>) {
        self.add_alert(message, AlertVariant::Danger);
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.add_alert(message, AlertVariant::Warning);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlertQueue;

    struct Draft {
        name: String,
    }

    impl Validatable for Draft {
        fn validate(&self) -> Result<(), FieldErrors> {
            let mut errors = FieldErrors::new();
            if self.name.is_empty() {
                errors.add("name", "Required field");
            }
            errors.into_result()
        }
    }

    #[test]
    fn test_validatable_defaults() {
        let valid = Draft {
            name: "admins".to_string(),
        };
        let invalid = Draft {
            name: String::new(),
        };

        assert!(valid.is_valid());
        assert!(valid.field_errors().is_empty());
        assert!(!invalid.is_valid());
        assert_eq!(invalid.field_errors().get("name"), Some("Required field"));
    }

    #[test]
    fn test_notify_shorthands() {
        let mut queue = AlertQueue::new();
        queue.success("saved");
        queue.danger("failed");
        queue.warning("careful");

        let variants: Vec<AlertVariant> = queue.alerts().iter().map(|a| a.variant).collect();
        assert_eq!(
            variants,
            vec![
                AlertVariant::Success,
                AlertVariant::Danger,
                AlertVariant::Warning
            ]
        );
    }
}
