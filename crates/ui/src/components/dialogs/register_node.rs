//! Register a cluster node manually

use dioxus::prelude::*;
use kc_console_core::{FieldErrors, Validatable};
use kc_console_model::NodeDraft;

use crate::components::{ButtonVariant, Modal, TextInput};
use crate::hooks::use_admin_client;
use crate::ops;
use crate::state::{GlobalAlerts, close_dialog, finish_dialog};

#[component]
pub fn RegisterNodeDialog(client_id: String) -> Element {
    let api = use_admin_client();
    let mut host = use_signal(String::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut busy = use_signal(|| false);

    let save = use_callback(move |()| {
        let draft = NodeDraft { host: host() };
        if let Err(field_errors) = draft.validate() {
            errors.set(field_errors);
            return;
        }
        if busy() {
            return;
        }
        busy.set(true);

        let api = api.clone();
        let client_id = client_id.clone();
        spawn(async move {
            let added = ops::advanced::register_node(&api, &client_id, &draft.host, &mut GlobalAlerts).await;
            busy.set(false);
            if added {
                finish_dialog();
            }
        });
    });

    rsx! {
        Modal {
            title: "Add node".to_string(),
            on_close: move |_| close_dialog(),

            div {
                class: "mb-6",
                TextInput {
                    value: host(),
                    label: "Host".to_string(),
                    placeholder: "node1.example.org".to_string(),
                    required: true,
                    error: errors.read().message("host"),
                    on_change: move |value: String| {
                        host.set(value);
                        errors.set(FieldErrors::new());
                    },
                    on_enter: move |_| save.call(()),
                }
            }

            div {
                class: "flex justify-end gap-3",
                button {
                    r#type: "button",
                    class: ButtonVariant::Primary.class(),
                    disabled: busy(),
                    onclick: move |_| save.call(()),
                    "Save"
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
