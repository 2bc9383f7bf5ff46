//! Create group modal

use dioxus::prelude::*;
use kc_console_core::{FieldErrors, Validatable};
use kc_console_model::GroupRepresentation;

use crate::components::{ButtonVariant, Modal, TextInput};
use crate::hooks::use_admin_client;
use crate::ops;
use crate::state::{GlobalAlerts, close_dialog, finish_dialog};

/// Create a top-level group, or a child of `parent`
#[component]
pub fn CreateGroupDialog(parent: Option<String>) -> Element {
    let api = use_admin_client();
    let mut name = use_signal(String::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut busy = use_signal(|| false);

    let title = if parent.is_some() { "Create child group" } else { "Create a group" };

    let submit = use_callback(move |()| {
        let draft = GroupRepresentation::named(name.read().trim());
        if let Err(field_errors) = draft.validate() {
            errors.set(field_errors);
            return;
        }
        if busy() {
            return;
        }
        busy.set(true);

        let api = api.clone();
        let parent = parent.clone();
        spawn(async move {
            let created =
                ops::groups::create_group(&api, parent.as_deref(), draft.name(), &mut GlobalAlerts).await;
            busy.set(false);
            if created.is_some() {
                finish_dialog();
            }
        });
    });

    rsx! {
        Modal {
            title: title.to_string(),
            on_close: move |_| close_dialog(),

            div {
                class: "mb-6",
                TextInput {
                    value: name(),
                    label: "Name".to_string(),
                    required: true,
                    error: errors.read().message("name"),
                    on_change: move |value: String| {
                        name.set(value);
                        errors.set(FieldErrors::new());
                    },
                    on_enter: move |_| submit.call(()),
                }
            }

            div {
                class: "flex justify-end gap-3",
                button {
                    r#type: "button",
                    class: ButtonVariant::Primary.class(),
                    disabled: busy(),
                    onclick: move |_| submit.call(()),
                    "Create"
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
