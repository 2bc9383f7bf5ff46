//! Application State Management for the admin console
//!
//! Global state lives in one Dioxus 0.7 `GlobalSignal`: the active page and
//! dialog, the alert queue, and the realm-wide metadata fetched once at
//! startup (server info, the signed-in admin).

use dioxus::prelude::*;
use kc_console_core::{AlertQueue, AlertVariant, Notify};
use kc_console_model::{ServerInfoRepresentation, WhoAmI};

// ============================================================================
// Page Navigation
// ============================================================================

/// Application pages
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Clients,
    ClientDetails(String),
    CreateClient,
    ImportClient,
    ClientScopes,
    ClientScopeDetails(String),
    MappingDetails {
        scope_id: String,
        mapper_id: String,
    },
    Groups,
    GroupDetails(String),
    Users,
    RealmRoles,
    /// Role details; `None` is the new role form
    RoleDetails(Option<String>),
    IdentityProviders,
    AddOidcProvider,
}

impl Page {
    /// Pages listed in the sidebar
    pub const SECTIONS: [Page; 6] = [
        Page::Clients,
        Page::ClientScopes,
        Page::RealmRoles,
        Page::Users,
        Page::Groups,
        Page::IdentityProviders,
    ];

    /// Get the display name for this page
    pub fn display_name(&self) -> &'static str {
        match self {
            Page::Clients => "Clients",
            Page::ClientDetails(_) => "Client details",
            Page::CreateClient => "Create client",
            Page::ImportClient => "Import client",
            Page::ClientScopes => "Client scopes",
            Page::ClientScopeDetails(_) => "Client scope details",
            Page::MappingDetails { .. } => "Mapping details",
            Page::Groups => "Groups",
            Page::GroupDetails(_) => "Group details",
            Page::Users => "Users",
            Page::RealmRoles => "Realm roles",
            Page::RoleDetails(None) => "Create role",
            Page::RoleDetails(Some(_)) => "Role details",
            Page::IdentityProviders => "Identity providers",
            Page::AddOidcProvider => "Add OpenID Connect provider",
        }
    }

    /// Get the icon emoji for this page (for UI display)
    pub fn icon(&self) -> &'static str {
        match self.section() {
            Page::Clients => "🧩",
            Page::ClientScopes => "📜",
            Page::Groups => "👥",
            Page::Users => "👤",
            Page::IdentityProviders => "🔗",
            _ => "🎭",
        }
    }

    /// The sidebar section this page belongs to
    pub fn section(&self) -> Page {
        match self {
            Page::ClientDetails(_) | Page::CreateClient | Page::ImportClient => Page::Clients,
            Page::ClientScopeDetails(_) | Page::MappingDetails { .. } => Page::ClientScopes,
            Page::GroupDetails(_) => Page::Groups,
            Page::RoleDetails(_) => Page::RealmRoles,
            Page::AddOidcProvider => Page::IdentityProviders,
            page => page.clone(),
        }
    }
}

// ============================================================================
// UI State
// ============================================================================

/// General UI state (navigation, dialogs, sidebar)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Currently active page
    pub active_page: Page,
    /// Active dialog (if any)
    pub active_dialog: Option<Dialog>,
    /// Whether the sidebar is collapsed
    pub sidebar_collapsed: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to a page, closing any open dialog
    pub fn navigate(&mut self, page: Page) {
        tracing::debug!("Navigating to {:?}", page);
        self.active_page = page;
        self.active_dialog = None;
    }

    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = None;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }
}

/// Modal dialogs opened above the current page
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Create a group, top level or under `parent`
    CreateGroup { parent: Option<String> },
    /// Assign realm scopes to a client
    AddClientScope { client_id: String, protocol: String },
    /// Add users to a group
    AddMember { group_id: String },
    /// Register a cluster node by hand
    RegisterNode { client_id: String },
    /// Download an adapter configuration
    DownloadAdapter { client_id: String, protocol: String },
}

// ============================================================================
// App State
// ============================================================================

/// Complete application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub ui: UiState,
    /// Visible notifications
    pub alerts: AlertQueue,
    /// Server capabilities, loaded once after sign-in
    pub server_info: Option<ServerInfoRepresentation>,
    /// The signed-in admin
    pub whoami: Option<WhoAmI>,
    /// Bumped after a dialog changes data the current page shows
    pub data_version: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark data shown by the current page as stale
    pub fn invalidate(&mut self) {
        self.data_version += 1;
    }
}

/// Global application state signal
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::new);

/// Navigate from anywhere in the component tree
pub fn navigate(page: Page) {
    APP_STATE.write().ui.navigate(page);
}

pub fn close_dialog() {
    APP_STATE.write().ui.close_dialog();
}

/// Close the dialog after it changed data, reloading the page's tables
pub fn finish_dialog() {
    let mut state = APP_STATE.write();
    state.ui.close_dialog();
    state.invalidate();
}

// ============================================================================
// Global Alerts
// ============================================================================

/// [`Notify`] sink writing into the global alert queue
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalAlerts;

impl Notify for GlobalAlerts {
    fn add_alert(&mut self, message: impl Into<String>, variant: AlertVariant) {
        APP_STATE.write().alerts.add(message, variant);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_pages_belong_to_sections() {
        assert_eq!(Page::ClientDetails("c1".into()).section(), Page::Clients);
        assert_eq!(
            Page::MappingDetails {
                scope_id: "s".into(),
                mapper_id: "m".into()
            }
            .section(),
            Page::ClientScopes
        );
        assert_eq!(Page::RoleDetails(None).section(), Page::RealmRoles);
        assert_eq!(Page::Users.section(), Page::Users);
        assert_eq!(Page::AddOidcProvider.section(), Page::IdentityProviders);
        assert!(Page::SECTIONS.contains(&Page::AddOidcProvider.section()));
    }

    #[test]
    fn test_navigate_closes_dialog() {
        let mut ui = UiState::new();
        ui.show_dialog(Dialog::CreateGroup { parent: None });
        ui.navigate(Page::Groups);

        assert_eq!(ui.active_page, Page::Groups);
        assert!(ui.active_dialog.is_none());
    }

    #[test]
    fn test_role_page_names() {
        assert_eq!(Page::RoleDetails(None).display_name(), "Create role");
        assert_eq!(
            Page::RoleDetails(Some("r1".into())).display_name(),
            "Role details"
        );
    }

    #[test]
    fn test_invalidate_bumps_version() {
        let mut state = AppState::new();
        state.invalidate();
        state.invalidate();
        assert_eq!(state.data_version, 2);
    }
}
