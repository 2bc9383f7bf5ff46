//! # UI Hooks
//!
//! Custom Dioxus hooks for the admin console:
//! - Access to the shared admin REST client
//! - Confirm dialogs (toggle handle plus modal element)

// ============================================================================
// Module Declarations
// ============================================================================

pub mod use_admin_client;
pub mod use_confirm_dialog;

// ============================================================================
// Re-exports
// ============================================================================

pub use use_admin_client::{use_admin_client, use_page_size};
pub use use_confirm_dialog::{
    ConfirmAction, ConfirmDialogConfig, ConfirmState, ConfirmToggle, confirm_action,
    use_confirm_dialog,
};
