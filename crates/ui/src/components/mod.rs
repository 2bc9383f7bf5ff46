//! # UI Components
//!
//! Reusable Dioxus components for the admin console:
//! - **DataTable**: generic, loader-driven table with search, paging,
//!   selection and row actions
//! - **Alerts**: toast stack over the global alert queue
//! - **Modal**: dialog frame and the confirm modal behind `use_confirm_dialog`
//! - **Inputs**: text, select, checkbox and switch controls
//! - **Form fields**: multi-line lists, key/value attributes, time selector
//! - **Layout**: page header, tabs, empty state, spinner
//! - **Dialogs**: create group, add client scope, add member, register node,
//!   download adapter config
//!
//! ## Component Hierarchy
//!
//! ```text
//! Page
//! ├── ViewHeader
//! ├── Tabs
//! └── DataTable
//!     ├── toolbar (search, page actions)
//!     ├── rows (column formatters, row actions)
//!     └── Pagination
//!
//! DialogOverlay
//! └── CreateGroupDialog | AddClientScopeDialog | AddMemberDialog | ...
//!     └── Modal
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod alerts;
pub mod data_table;
pub mod dialogs;
pub mod form_fields;
pub mod inputs;
pub mod layout;
pub mod modal;

// ============================================================================
// Re-exports
// ============================================================================

pub use alerts::AlertPanel;

pub use data_table::{
    Column, DataTable, Loader, RowAction, RowSelection, SearchMode, TableState, field_text, or_dash,
};

pub use form_fields::{KeyValueInput, MultiLineInput, TimeSelector};

pub use inputs::{Checkbox, FormGroup, Select, SelectOption, Switch, TextArea, TextInput};

pub use layout::{EmptyState, FormSection, LoadError, Spinner, Tabs, ViewHeader};

pub use modal::{ButtonVariant, ConfirmModal, Modal};

pub use dialogs::{
    AddClientScopeDialog, AddMemberDialog, CreateGroupDialog, DownloadAdapterDialog,
    RegisterNodeDialog,
};
