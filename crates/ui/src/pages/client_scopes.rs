//! Client scopes section: the realm's scope catalogue

use dioxus::prelude::*;
use kc_console_core::{ConsoleError, Protocol};
use kc_console_model::ClientScopeRepresentation;

use crate::components::{
    ButtonVariant, Column, DataTable, EmptyState, Loader, RowAction, SearchMode, ViewHeader,
    or_dash,
};
use crate::hooks::{ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog};
use crate::ops;
use crate::state::{GlobalAlerts, Page, navigate};

fn scope_link(scope: &ClientScopeRepresentation) -> Element {
    let id = scope.id().to_string();
    let label = scope.name().to_string();
    rsx! {
        button {
            class: "text-indigo-400 hover:text-indigo-300 hover:underline",
            onclick: move |_| navigate(Page::ClientScopeDetails(id.clone())),
            "{label}"
        }
    }
}

#[component]
pub fn ClientScopesPage() -> Element {
    let api = use_admin_client();
    let refresh = use_signal(|| 0u64);
    let pending = use_signal(|| None::<ClientScopeRepresentation>);

    let pending_name = pending
        .read()
        .as_ref()
        .map(|s| s.name().to_string())
        .unwrap_or_default();

    let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: format!("Delete client scope {}?", pending_name),
        message: "Clients using this scope lose the claims and role mappings it provides.".into(),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            move || {
                let api = api.clone();
                let mut refresh = refresh;
                let scope = pending.peek().clone();
                async move {
                    let Some(scope) = scope else {
                        return;
                    };
                    if ops::client_scopes::delete_client_scope(&api, scope.id(), &mut GlobalAlerts).await {
                        *refresh.write() += 1;
                    }
                }
            }
        }),
    });

    let loader = use_hook(|| {
        let api = api.clone();
        Loader::new(move |_, _, _| {
            let api = api.clone();
            async move {
                let mut scopes = api.list_client_scopes().await?;
                scopes.sort_by_key(|s| s.name().to_lowercase());
                Ok::<_, ConsoleError>(scopes)
            }
        })
    });

    let columns = use_hook(|| {
        vec![
            Column::render("name", "Name", scope_link),
            Column::text("protocol", "Protocol", |s: &ClientScopeRepresentation| {
                Protocol::parse(s.protocol())
                    .map(|p| p.display_name().to_string())
                    .unwrap_or_else(|| s.protocol().to_string())
            }),
            Column::text("description", "Description", |s: &ClientScopeRepresentation| {
                or_dash(s.description())
            }),
        ]
    });

    let actions = use_hook(|| {
        vec![RowAction::new("Delete", move |scope: ClientScopeRepresentation| {
            let mut pending = pending;
            pending.set(Some(scope));
            toggle_delete.toggle();
        })]
    });

    rsx! {
        div {
            class: "client-scopes-page",

            ViewHeader {
                title: "Client scopes".to_string(),
                subtitle: "Client scopes are a common set of protocol mappers and roles shared between clients.".to_string(),
            }

            div {
                class: "p-8",
                DataTable {
                    loader,
                    columns,
                    actions,
                    search: SearchMode::local(|s: &ClientScopeRepresentation| s.name()),
                    search_placeholder: "Search by name".to_string(),
                    refresh,
                    empty: rsx! {
                        EmptyState {
                            title: "No client scopes".to_string(),
                            message: "This realm has no client scopes yet.".to_string(),
                        }
                    },
                }
            }

            {delete_dialog}
        }
    }
}
