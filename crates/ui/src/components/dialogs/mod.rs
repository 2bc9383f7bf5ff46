//! # Dialog Components
//!
//! Modal dialogs opened through [`Dialog`](crate::state::Dialog) and rendered
//! above the current page by the app's dialog overlay.
//!
//! ## Dialogs
//!
//! - **CreateGroupDialog**: top-level or child group
//! - **AddClientScopeDialog**: assign realm scopes to a client
//! - **AddMemberDialog**: add users to a group
//! - **RegisterNodeDialog**: register a cluster node by hand
//! - **DownloadAdapterDialog**: preview and save adapter configuration
//!
//! Each dialog closes itself through `finish_dialog` after a successful
//! change so the page's tables reload.

// ============================================================================
// Module Declarations
// ============================================================================

pub mod add_client_scope;
pub mod add_member;
pub mod create_group;
pub mod download_adapter;
pub mod register_node;

// ============================================================================
// Re-exports
// ============================================================================

pub use add_client_scope::AddClientScopeDialog;
pub use add_member::AddMemberDialog;
pub use create_group::CreateGroupDialog;
pub use download_adapter::DownloadAdapterDialog;
pub use register_node::RegisterNodeDialog;
