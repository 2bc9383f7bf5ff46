//! # Console UI
//!
//! Dioxus Desktop UI for the identity admin console.
//!
//! This crate provides the windows, pages and dialogs used to manage one
//! realm of an identity server through its admin REST API.
//!
//! ## Features
//!
//! - Clients: list, create, import, export, settings, credentials and the
//!   advanced tab (revocation, cluster nodes, token settings, flow overrides)
//! - Client scopes with their protocol mappers
//! - Groups, members and attributes
//! - Users, with search-first listing for large realms
//! - Realm roles and their attributes
//! - Identity providers, with an OpenID Connect form fed by discovery
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod hooks;
pub mod ops;
pub mod pages;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use kc_console_admin;
pub use kc_console_core;
pub use kc_console_model;

pub use app::App;
pub use state::{APP_STATE, AppState, Dialog, GlobalAlerts, Page, UiState};

use kc_console_admin::AdminClient;
use kc_console_core::{ConsoleConfig, ConsoleResult};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Admin Console";

/// Window title
pub const TITLE: &str = "Admin Console - Identity Server";

/// Stylesheet embedded into the window head
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the desktop console against the configured server
///
/// Fails before any window opens when the configuration is invalid or the
/// HTTP client cannot be built. Authentication happens lazily on the first
/// request.
///
/// # Example
///
/// ```rust,ignore
/// fn main() -> anyhow::Result<()> {
///     let config = kc_console_core::ConsoleConfig::load()?;
///     kc_console_ui::launch(config)?;
///     Ok(())
/// }
/// ```
pub fn launch(config: ConsoleConfig) -> ConsoleResult<()> {
    config.validate()?;
    let client = AdminClient::new(&config)?;

    tracing::info!(
        "Starting {} v{} for realm '{}' on {}",
        NAME,
        VERSION,
        client.realm(),
        client.server_url()
    );

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(format!("{} ({})", TITLE, client.realm()))
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1400.0, 900.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(800.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .with_context(client)
        .with_context(config)
        .launch(App);

    Ok(())
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_title() {
        assert!(TITLE.contains(NAME));
    }

    #[test]
    fn test_styles_loaded() {
        assert!(!get_styles().is_empty());
        assert!(STYLES.contains(".data-table"));
    }
}
