//! Main Application Component for the admin console
//!
//! The root component renders the window layout: toolbar, sidebar, the
//! active page, the dialog overlay and the alert stack. Realm-wide metadata
//! (server info, the signed-in admin) is fetched once on mount.

use dioxus::prelude::*;
use kc_console_core::Notify;
use kc_console_model::WhoAmI;

use crate::components::{
    AddClientScopeDialog, AddMemberDialog, AlertPanel, CreateGroupDialog, DownloadAdapterDialog,
    RegisterNodeDialog,
};
use crate::hooks::use_admin_client;
use crate::pages::{
    AddOidcProviderPage, ClientDetailsPage, ClientScopeDetailsPage, ClientScopesPage, ClientsPage,
    CreateClientPage, GroupDetailsPage, GroupsPage, IdentityProvidersPage, ImportClientPage,
    MappingDetailsPage, RealmRolesPage, RoleDetailsPage, UsersPage,
};
use crate::state::{APP_STATE, Dialog, GlobalAlerts, Page};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    let api = use_admin_client();

    use_future(move || {
        let api = api.clone();
        async move {
            let (info, me) = futures::future::join(api.server_info(), api.whoami()).await;

            match info {
                Ok(info) => APP_STATE.write().server_info = Some(info),
                Err(err) => {
                    tracing::error!("Could not load server info: {}", err);
                    GlobalAlerts.danger(format!("Could not load server info '{}'", err));
                }
            }

            match me {
                Ok(me) => {
                    let whoami = WhoAmI::new(Some(api.auth_realm().to_string()), me);
                    tracing::info!("Signed in as {}", whoami.display_name());
                    APP_STATE.write().whoami = Some(whoami);
                }
                Err(err) => tracing::warn!("Could not load the signed-in admin: {}", err),
            }
        }
    });

    rsx! {
        div {
            class: "app-container h-screen w-screen flex flex-col bg-slate-900 text-slate-100 overflow-hidden",

            Toolbar {}

            div {
                class: "flex flex-1 overflow-hidden",
                Sidebar {}
                MainContent {}
            }

            DialogOverlay {}
            AlertPanel {}
        }
    }
}

// ============================================================================
// Toolbar Component
// ============================================================================

/// Top bar: console title, managed realm and the signed-in admin
#[component]
fn Toolbar() -> Element {
    let api = use_admin_client();
    let realm = api.realm().to_string();

    let state = APP_STATE.read();
    let admin = state
        .whoami
        .as_ref()
        .map(|me| me.display_name().to_string())
        .filter(|name| !name.is_empty());
    drop(state);

    rsx! {
        header {
            class: "toolbar h-12 bg-slate-800 border-b border-slate-700 flex items-center px-4 gap-2 shrink-0",

            div {
                class: "flex items-center gap-2 mr-4",
                span { class: "text-xl", "🔐" }
                span { class: "font-semibold text-sm", "{crate::NAME}" }
            }

            span {
                class: "px-2 py-0.5 rounded bg-slate-700 text-xs text-slate-300",
                title: "Realm",
                "{realm}"
            }

            div { class: "flex-1" }

            ToolbarButton {
                icon: "⟳",
                label: "Refresh",
                onclick: move |_| APP_STATE.write().invalidate(),
            }

            if let Some(admin) = admin {
                span {
                    class: "flex items-center gap-1 text-sm text-slate-300",
                    span { "👤" }
                    "{admin}"
                }
            }
        }
    }
}

#[component]
fn ToolbarButton(icon: &'static str, label: &'static str, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            class: "flex items-center gap-1.5 px-3 py-1.5 rounded text-sm hover:bg-slate-700 transition-colors",
            title: "{label}",
            onclick: move |e| onclick.call(e),
            span { "{icon}" }
            span { "{label}" }
        }
    }
}

// ============================================================================
// Sidebar Component
// ============================================================================

/// Section navigation; detail pages highlight their parent section
#[component]
fn Sidebar() -> Element {
    let state = APP_STATE.read();
    let collapsed = state.ui.sidebar_collapsed;
    let current = state.ui.active_page.section();
    drop(state);

    rsx! {
        aside {
            class: "sidebar flex flex-col shrink-0 bg-slate-800 border-r border-slate-700 transition-all",
            style: if collapsed { "width: 60px;" } else { "width: 220px;" },

            div {
                class: "h-12 flex items-center justify-between px-3 border-b border-slate-700",

                if !collapsed {
                    span { class: "text-sm font-semibold text-slate-300", "Manage" }
                }

                button {
                    class: "w-8 h-8 flex items-center justify-center rounded hover:bg-slate-700 text-slate-400 hover:text-slate-200 transition-colors",
                    title: if collapsed { "Expand sidebar" } else { "Collapse sidebar" },
                    onclick: move |_| APP_STATE.write().ui.toggle_sidebar(),
                    if collapsed { "☰" } else { "✕" }
                }
            }

            nav {
                class: "flex-1 py-4 overflow-y-auto",
                for page in Page::SECTIONS {
                    SidebarItem {
                        key: "{page.display_name()}",
                        page: page.clone(),
                        active: page == current,
                        collapsed,
                    }
                }
            }
        }
    }
}

#[component]
fn SidebarItem(page: Page, active: bool, collapsed: bool) -> Element {
    let icon = page.icon();
    let name = page.display_name();
    let colors = if active {
        "bg-indigo-600 text-white"
    } else {
        "text-slate-300 hover:bg-slate-700"
    };
    let layout = if collapsed {
        "justify-center w-11 h-11 mx-auto my-1"
    } else {
        "gap-3 px-4 py-2.5 mx-2 my-0.5"
    };

    rsx! {
        button {
            class: "flex items-center rounded-lg text-left transition-colors {layout} {colors}",
            style: if collapsed { "" } else { "width: calc(100% - 16px);" },
            title: "{name}",
            onclick: move |_| APP_STATE.write().ui.navigate(page.clone()),
            span { class: "text-xl", "{icon}" }
            if !collapsed {
                span { class: "text-sm font-medium", "{name}" }
            }
        }
    }
}

// ============================================================================
// Main Content Component
// ============================================================================

/// Renders the active page
#[component]
fn MainContent() -> Element {
    let page = APP_STATE.read().ui.active_page.clone();

    rsx! {
        main {
            class: "flex-1 overflow-auto bg-slate-900",

            match page {
                Page::Clients => rsx! { ClientsPage {} },
                Page::ClientDetails(id) => rsx! { ClientDetailsPage { key: "{id}", id } },
                Page::CreateClient => rsx! { CreateClientPage {} },
                Page::ImportClient => rsx! { ImportClientPage {} },
                Page::ClientScopes => rsx! { ClientScopesPage {} },
                Page::ClientScopeDetails(id) => rsx! { ClientScopeDetailsPage { key: "{id}", id } },
                Page::MappingDetails { scope_id, mapper_id } => rsx! {
                    MappingDetailsPage { key: "{mapper_id}", scope_id, mapper_id }
                },
                Page::Groups => rsx! { GroupsPage {} },
                Page::GroupDetails(id) => rsx! { GroupDetailsPage { key: "{id}", id } },
                Page::Users => rsx! { UsersPage {} },
                Page::RealmRoles => rsx! { RealmRolesPage {} },
                Page::RoleDetails(id) => {
                    let key = id.clone().unwrap_or_default();
                    rsx! { RoleDetailsPage { key: "{key}", id } }
                }
                Page::IdentityProviders => rsx! { IdentityProvidersPage {} },
                Page::AddOidcProvider => rsx! { AddOidcProviderPage {} },
            }
        }
    }
}

// ============================================================================
// Dialog Overlay
// ============================================================================

/// The open dialog, if any; each dialog draws its own modal frame
#[component]
fn DialogOverlay() -> Element {
    let Some(dialog) = APP_STATE.read().ui.active_dialog.clone() else {
        return rsx! {};
    };

    match dialog {
        Dialog::CreateGroup { parent } => rsx! { CreateGroupDialog { parent } },
        Dialog::AddClientScope { client_id, protocol } => rsx! {
            AddClientScopeDialog { client_id, protocol }
        },
        Dialog::AddMember { group_id } => rsx! { AddMemberDialog { group_id } },
        Dialog::RegisterNode { client_id } => rsx! { RegisterNodeDialog { client_id } },
        Dialog::DownloadAdapter { client_id, protocol } => rsx! {
            DownloadAdapterDialog { client_id, protocol }
        },
    }
}
