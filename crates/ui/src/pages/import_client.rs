//! Import client from an exported JSON file

use dioxus::prelude::*;
use kc_console_core::{ConsoleError, FieldErrors, Notify, Validatable};
use kc_console_model::ClientRepresentation;

use crate::components::{ButtonVariant, FormSection, TextArea, TextInput, ViewHeader};
use crate::file_ops;
use crate::hooks::use_admin_client;
use crate::ops::{self, failure_message};
use crate::state::{GlobalAlerts, Page, navigate};

#[component]
pub fn ImportClientPage() -> Element {
    let api = use_admin_client();
    let mut client = use_signal(|| None::<ClientRepresentation>);
    let mut source = use_signal(String::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut busy = use_signal(|| false);

    let browse = move |_: MouseEvent| {
        spawn(async move {
            match file_ops::import_client_file().await {
                Ok((parsed, path)) => {
                    source.set(path.display().to_string());
                    errors.set(FieldErrors::new());
                    client.set(Some(parsed));
                }
                Err(ConsoleError::Cancelled) => {}
                Err(err) => GlobalAlerts.danger(failure_message("Could not read client file:", &err)),
            }
        });
    };

    let save = move |_: MouseEvent| {
        let Some(draft) = client.read().clone() else {
            return;
        };
        if let Err(field_errors) = draft.validate() {
            errors.set(field_errors);
            return;
        }
        if busy() {
            return;
        }
        busy.set(true);

        let api = api.clone();
        spawn(async move {
            let created = ops::clients::import_client(&api, &draft, &mut GlobalAlerts).await;
            busy.set(false);
            if let Some(id) = created {
                navigate(Page::ClientDetails(id));
            }
        });
    };

    let draft = client.read().clone();
    let preview = draft
        .as_ref()
        .and_then(|c| serde_json::to_string_pretty(c).ok())
        .unwrap_or_default();

    rsx! {
        div {
            class: "import-client-page",

            ViewHeader {
                title: "Import client".to_string(),
                subtitle: "Import a client from a JSON file exported by this or another realm.".to_string(),
            }

            div {
                class: "p-8",
                FormSection {
                    title: "Resource file".to_string(),
                    div {
                        class: "flex items-center gap-3",
                        button {
                            r#type: "button",
                            class: ButtonVariant::Secondary.class(),
                            onclick: browse,
                            "Browse..."
                        }
                        span { class: "text-sm text-slate-400 truncate", "{source}" }
                    }
                    if !preview.is_empty() {
                        TextArea { value: preview, readonly: true, monospace: true, rows: 10 }
                    }
                }

                if let Some(draft) = draft {
                    FormSection {
                        title: "General Settings".to_string(),
                        TextInput {
                            value: draft.client_id.clone().unwrap_or_default(),
                            label: "Client ID".to_string(),
                            required: true,
                            error: errors.read().message("clientId"),
                            on_change: move |value: String| {
                                if let Some(c) = client.write().as_mut() {
                                    c.client_id = Some(value);
                                }
                                errors.set(FieldErrors::new());
                            },
                        }
                        TextInput {
                            value: draft.name.clone().unwrap_or_default(),
                            label: "Name".to_string(),
                            on_change: move |value: String| {
                                if let Some(c) = client.write().as_mut() {
                                    c.name = Some(value);
                                }
                            },
                        }
                        TextArea {
                            value: draft.description.clone().unwrap_or_default(),
                            label: "Description".to_string(),
                            on_change: move |value: String| {
                                if let Some(c) = client.write().as_mut() {
                                    c.description = Some(value);
                                }
                            },
                        }
                        TextInput {
                            value: draft.protocol().map(|p| p.display_name().to_string()).unwrap_or_default(),
                            label: "Type".to_string(),
                            readonly: true,
                            error: errors.read().message("protocol"),
                        }
                    }
                }

                div {
                    class: "flex gap-3",
                    button {
                        r#type: "button",
                        class: ButtonVariant::Primary.class(),
                        disabled: busy() || client.read().is_none(),
                        onclick: save,
                        "Save"
                    }
                    button {
                        r#type: "button",
                        class: ButtonVariant::Link.class(),
                        onclick: move |_| navigate(Page::Clients),
                        "Cancel"
                    }
                }
            }
        }
    }
}
