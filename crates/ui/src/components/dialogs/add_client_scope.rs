//! Assign realm client scopes to a client

use dioxus::prelude::*;
use kc_console_core::{ClientScopeType, ConsoleError};
use kc_console_model::unassigned_scopes;
use std::collections::BTreeSet;

use crate::components::{ButtonVariant, Checkbox, LoadError, Modal, Select, SelectOption, Spinner};
use crate::hooks::use_admin_client;
use crate::ops;
use crate::state::{GlobalAlerts, close_dialog, finish_dialog};

/// Lists realm scopes of the client's protocol that are not assigned yet
#[component]
pub fn AddClientScopeDialog(client_id: String, protocol: String) -> Element {
    let api = use_admin_client();
    let mut selected = use_signal(BTreeSet::<String>::new);
    let mut kind = use_signal(ClientScopeType::default);
    let mut busy = use_signal(|| false);

    let available = use_resource({
        let api = api.clone();
        let client_id = client_id.clone();
        let protocol = protocol.clone();
        move || {
            let api = api.clone();
            let client_id = client_id.clone();
            let protocol = protocol.clone();
            async move {
                let (rows, catalogue) = ops::client_scopes::load_client_scopes(&api, &client_id).await?;
                Ok::<_, ConsoleError>(unassigned_scopes(&catalogue, &rows, &protocol))
            }
        }
    });

    let title = format!("Add client scopes to {}", client_id);

    let add = move |_: MouseEvent| {
        if busy() {
            return;
        }
        let scopes: Vec<_> = match &*available.read() {
            Some(Ok(scopes)) => scopes
                .iter()
                .filter(|s| selected.read().contains(s.id()))
                .cloned()
                .collect(),
            _ => return,
        };
        busy.set(true);

        let api = api.clone();
        let client_id = client_id.clone();
        let kind = kind();
        spawn(async move {
            let outcome =
                ops::client_scopes::add_client_scopes(&api, &client_id, &scopes, kind, &mut GlobalAlerts).await;
            busy.set(false);
            if outcome.succeeded > 0 {
                finish_dialog();
            }
        });
    };

    let type_options: Vec<SelectOption> = ClientScopeType::all()
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.display_name()))
        .collect();

    let body = match &*available.read() {
        None => rsx! { Spinner {} },
        Some(Err(err)) => rsx! { LoadError { message: err.to_string() } },
        Some(Ok(scopes)) if scopes.is_empty() => rsx! {
            p { class: "py-6 text-center text-slate-400", "All client scopes of this protocol are already assigned." }
        },
        Some(Ok(scopes)) => rsx! {
            div {
                class: "max-h-80 overflow-y-auto mb-6 divide-y divide-slate-700",
                for scope in scopes.iter().cloned() {
                    div {
                        key: "{scope.id()}",
                        class: "flex items-start gap-3 py-2",
                        Checkbox {
                            checked: selected.read().contains(scope.id()),
                            on_change: {
                                let id = scope.id().to_string();
                                move |_| {
                                    let mut set = selected.write();
                                    if !set.remove(&id) {
                                        set.insert(id.clone());
                                    }
                                }
                            },
                        }
                        div {
                            p { class: "text-sm text-slate-100", "{scope.name()}" }
                            p { class: "text-xs text-slate-400", "{scope.description()}" }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        Modal {
            title,
            width: "max-w-2xl".to_string(),
            on_close: move |_| close_dialog(),

            {body}

            div {
                class: "flex items-end justify-between gap-3",
                div {
                    class: "w-48",
                    Select {
                        label: "Assigned type".to_string(),
                        value: kind().as_str().to_string(),
                        options: type_options,
                        on_change: move |value: String| {
                            if let Some(parsed) = ClientScopeType::parse(&value) {
                                kind.set(parsed);
                            }
                        },
                    }
                }
                div {
                    class: "flex gap-3",
                    button {
                        r#type: "button",
                        class: ButtonVariant::Primary.class(),
                        disabled: busy() || selected.read().is_empty(),
                        onclick: add,
                        "Add"
                    }
                    button {
                        r#type: "button",
                        class: ButtonVariant::Secondary.class(),
                        onclick: move |_| close_dialog(),
                        "Cancel"
                    }
                }
            }
        }
    }
}
