//! Add users to a group

use dioxus::prelude::*;
use kc_console_core::ConsoleError;
use kc_console_model::{UserRepresentation, merge_members, non_members};
use std::collections::BTreeSet;

use crate::components::{ButtonVariant, Checkbox, LoadError, Modal, Spinner, TextInput};
use crate::hooks::use_admin_client;
use crate::ops;
use crate::state::{GlobalAlerts, close_dialog, finish_dialog};

/// How many users the dialog lists per search
const MAX_CANDIDATES: usize = 100;

/// Users that are not direct members yet, searchable by username, name or email
#[component]
pub fn AddMemberDialog(group_id: String) -> Element {
    let api = use_admin_client();
    let mut search = use_signal(String::new);
    let mut applied = use_signal(String::new);
    let mut selected = use_signal(BTreeSet::<String>::new);
    let mut busy = use_signal(|| false);

    let candidates = use_resource({
        let api = api.clone();
        let group_id = group_id.clone();
        move || {
            let api = api.clone();
            let group_id = group_id.clone();
            let term = applied();
            async move {
                let search = Some(term.as_str()).filter(|s| !s.is_empty());
                let (users, members) = futures::future::try_join(
                    api.list_users(0, MAX_CANDIDATES, search),
                    api.group_members(&group_id),
                )
                .await?;
                Ok::<_, ConsoleError>(non_members(&users, &merge_members(&members, &[])))
            }
        }
    });

    let picked = move || -> Vec<UserRepresentation> {
        match &*candidates.read() {
            Some(Ok(users)) => users
                .iter()
                .filter(|u| selected.read().contains(u.id()))
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    };

    let add = move |_: MouseEvent| {
        let users = picked();
        if busy() || users.is_empty() {
            return;
        }
        busy.set(true);

        let api = api.clone();
        let group_id = group_id.clone();
        spawn(async move {
            let outcome = ops::groups::add_members(&api, &group_id, &users, &mut GlobalAlerts).await;
            busy.set(false);
            if outcome.succeeded > 0 {
                finish_dialog();
            }
        });
    };

    let body = match &*candidates.read() {
        None => rsx! { Spinner {} },
        Some(Err(err)) => rsx! { LoadError { message: err.to_string() } },
        Some(Ok(users)) if users.is_empty() => rsx! {
            p { class: "py-6 text-center text-slate-400", "No users to add" }
        },
        Some(Ok(users)) => rsx! {
            table {
                class: "w-full text-sm text-slate-200",
                thead {
                    class: "text-slate-400",
                    tr {
                        th { class: "w-8" }
                        th { class: "px-3 py-2 text-left font-medium", "Username" }
                        th { class: "px-3 py-2 text-left font-medium", "Email" }
                        th { class: "px-3 py-2 text-left font-medium", "Last name" }
                        th { class: "px-3 py-2 text-left font-medium", "First name" }
                    }
                }
                tbody {
                    for user in users.iter().cloned() {
                        tr {
                            key: "{user.id()}",
                            class: "border-t border-slate-700",
                            td {
                                class: "px-1",
                                Checkbox {
                                    checked: selected.read().contains(user.id()),
                                    on_change: {
                                        let id = user.id().to_string();
                                        move |_| {
                                            let mut set = selected.write();
                                            if !set.remove(&id) {
                                                set.insert(id.clone());
                                            }
                                        }
                                    },
                                }
                            }
                            td { class: "px-3 py-2", "{user.username()}" }
                            td { class: "px-3 py-2", {user.email.clone().unwrap_or_default()} }
                            td { class: "px-3 py-2", {user.last_name.clone().unwrap_or_default()} }
                            td { class: "px-3 py-2", {user.first_name.clone().unwrap_or_default()} }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        Modal {
            title: "Add member".to_string(),
            width: "max-w-3xl".to_string(),
            on_close: move |_| close_dialog(),

            div {
                class: "mb-4 w-80",
                TextInput {
                    value: search(),
                    placeholder: "Search users (press Enter)".to_string(),
                    on_change: move |value: String| search.set(value),
                    on_enter: move |value: String| {
                        selected.write().clear();
                        applied.set(value.trim().to_string());
                    },
                }
            }

            div { class: "max-h-96 overflow-y-auto mb-6", {body} }

            div {
                class: "flex justify-end gap-3",
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
