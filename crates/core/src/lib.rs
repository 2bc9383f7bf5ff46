//! # Console Core
//!
//! Core types, traits, and error handling for the identity admin console.
//!
//! This crate provides the foundational building blocks used by the model,
//! the admin REST client and the UI:
//!
//! - **Alerts**: the transient notification queue (`AlertQueue`, `AlertVariant`)
//! - **Config**: `ConsoleConfig` loaded from TOML and the environment
//! - **Traits**: `Validatable` for form drafts, `Notify` for outcome reporting
//! - **Errors**: unified error handling with `ConsoleError` and `ConsoleResult`
//!

pub mod alert;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use alert::{ALERT_TIMEOUT, Alert, AlertQueue, AlertVariant};
pub use config::{AuthConfig, ConsoleConfig, PAGE_SIZES};
pub use error::{ConsoleError, ConsoleResult, ResultExt};
pub use traits::{Notify, Validatable};
pub use types::{ClientScopeType, FieldErrors, Protocol, TimeUnit};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
