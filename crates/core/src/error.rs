//! Error types for the admin console
//!
//! A single error enum covers everything the console can fail on: the admin
//! REST API answering with a non-success status, the transport failing before
//! an answer arrives, client-side validation, configuration and local file IO.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the admin console
#[derive(Debug, Error)]
pub enum ConsoleError {
    // ========================================================================
    // Admin API Errors
    // ========================================================================
    /// The server answered with a non-success status
    #[error("Request failed with status code {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Connection error: {0}")]
    Transport(String),

    /// Obtaining an access token failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A resource looked up by name or id does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single form field failed validation
    #[error("Field '{field}' is invalid: {message}")]
    FieldValidation { field: String, message: String },

    // ========================================================================
    // IO & Serialization Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl ConsoleError {
    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ConsoleError::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        ConsoleError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the server rejected the request as a duplicate
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConsoleError::NotFound(_)) || self.status() == Some(404)
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConsoleError::Validation(_) | ConsoleError::FieldValidation { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ConsoleError::Io(_) | ConsoleError::FileRead { .. } | ConsoleError::FileWrite { .. }
        )
    }
}

/// Result type alias using ConsoleError
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> ConsoleResult<T>;
}

impl<T, E: Into<ConsoleError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> ConsoleResult<T> {
        self.map_err(|e| {
            let err: ConsoleError = e.into();
            ConsoleError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ConsoleError::api(409, "Client app already exists");
        assert_eq!(
            err.to_string(),
            "Request failed with status code 409: Client app already exists"
        );
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(ConsoleError::api(404, "Could not find client").is_not_found());
        assert!(ConsoleError::NotFound("role admin".to_string()).is_not_found());
        assert!(!ConsoleError::Transport("refused".to_string()).is_not_found());
    }

    #[test]
    fn test_validation_error() {
        let err = ConsoleError::field_validation("name", "Required field");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Field 'name' is invalid: Required field");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_error_with_context() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.with_context("Exporting client").unwrap_err();
        assert_eq!(err.to_string(), "Exporting client: IO error: denied");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConsoleError = io_err.into();
        assert!(err.is_io());
    }
}
