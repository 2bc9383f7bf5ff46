//! Clients section: paginated, server-searched client list

use dioxus::prelude::*;
use kc_console_core::{ConsoleError, Notify};
use kc_console_model::ClientRepresentation;

use crate::components::{
    ButtonVariant, Column, DataTable, EmptyState, Loader, RowAction, SearchMode, ViewHeader,
    or_dash,
};
use crate::file_ops;
use crate::hooks::{ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog, use_page_size};
use crate::ops::{self, failure_message};
use crate::state::{GlobalAlerts, Page, navigate};

/// Export a client to a JSON file, reporting the outcome
pub(crate) async fn export_with_alerts(client: ClientRepresentation) {
    match file_ops::export_client(&client).await {
        Ok(_) => GlobalAlerts.success("Client exported"),
        Err(ConsoleError::Cancelled) => {}
        Err(err) => GlobalAlerts.danger(failure_message("Could not export client:", &err)),
    }
}

pub(crate) fn client_link(client: &ClientRepresentation) -> Element {
    let id = client.id().to_string();
    let label = client.client_id().to_string();
    rsx! {
        button {
            class: "text-indigo-400 hover:text-indigo-300 hover:underline",
            onclick: move |_| navigate(Page::ClientDetails(id.clone())),
            "{label}"
        }
    }
}

#[component]
pub fn ClientsPage() -> Element {
    let api = use_admin_client();
    let page_size = use_page_size();
    let refresh = use_signal(|| 0u64);
    let pending = use_signal(|| None::<ClientRepresentation>);

    let pending_name = pending
        .read()
        .as_ref()
        .map(|c| c.client_id().to_string())
        .unwrap_or_default();

    let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: format!("Delete {} ?", pending_name),
        message: "If you delete this client, all associated data will be removed.".into(),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            move || {
                let api = api.clone();
                let mut refresh = refresh;
                let client = pending.peek().clone();
                async move {
                    let Some(client) = client else {
                        return;
                    };
                    if ops::clients::delete_client(&api, client.id(), &mut GlobalAlerts).await {
                        *refresh.write() += 1;
                    }
                }
            }
        }),
    });

    let loader = use_hook(|| {
        let api = api.clone();
        Loader::new(move |first, max, search: Option<String>| {
            let api = api.clone();
            async move { api.list_clients(first, max, search.as_deref()).await }
        })
    });

    let columns = use_hook(|| {
        vec![
            Column::render("clientId", "Client ID", client_link),
            Column::text("protocol", "Type", |c: &ClientRepresentation| {
                c.protocol()
                    .map(|p| p.display_name().to_string())
                    .unwrap_or_else(|| c.protocol.clone().unwrap_or_default())
            }),
            Column::text("description", "Description", |c: &ClientRepresentation| {
                or_dash(c.description())
            }),
            Column::text("baseUrl", "Home URL", |c: &ClientRepresentation| {
                or_dash(c.base_url.as_deref().unwrap_or(""))
            }),
        ]
    });

    let actions = use_hook(|| {
        vec![
            RowAction::new("Export", |client: ClientRepresentation| {
                spawn(export_with_alerts(client));
            }),
            RowAction::new("Delete", move |client: ClientRepresentation| {
                let mut pending = pending;
                pending.set(Some(client));
                toggle_delete.toggle();
            }),
        ]
    });

    rsx! {
        div {
            class: "clients-page",

            ViewHeader {
                title: "Clients".to_string(),
                subtitle: "Clients are applications and services that can request authentication of a user.".to_string(),
            }

            div {
                class: "p-8",
                DataTable {
                    loader,
                    columns,
                    actions,
                    search: SearchMode::Server,
                    search_placeholder: "Search for client".to_string(),
                    paginated: true,
                    page_size,
                    refresh,
                    toolbar: rsx! {
                        button {
                            class: ButtonVariant::Primary.class(),
                            onclick: move |_| navigate(Page::CreateClient),
                            "Create client"
                        }
                        button {
                            class: ButtonVariant::Link.class(),
                            onclick: move |_| navigate(Page::ImportClient),
                            "Import client"
                        }
                    },
                    empty: rsx! {
                        EmptyState {
                            title: "No clients".to_string(),
                            message: "Clients are applications and services that can request authentication of a user.".to_string(),
                            action_label: "Create client".to_string(),
                            on_action: move |_| navigate(Page::CreateClient),
                        }
                    },
                }
            }

            {delete_dialog}
        }
    }
}
