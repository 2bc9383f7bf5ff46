//! Adapter configuration download
//!
//! Formats come from the server's client installation providers for the
//! client's protocol. The selected format is fetched and previewed; download
//! saves it under the provider's file name.

use dioxus::prelude::*;
use kc_console_core::{ConsoleError, Notify};
use kc_console_model::ClientInstallationRepresentation;

use crate::components::{ButtonVariant, LoadError, Modal, Select, SelectOption, Spinner, TextArea};
use crate::file_ops;
use crate::hooks::use_admin_client;
use crate::state::{APP_STATE, GlobalAlerts, close_dialog};

/// Providers offered for `protocol`, download-only ones last
fn installation_formats(protocol: &str) -> Vec<ClientInstallationRepresentation> {
    let state = APP_STATE.read();
    let mut formats: Vec<ClientInstallationRepresentation> = state
        .server_info
        .as_ref()
        .map(|info| info.installations(protocol).to_vec())
        .unwrap_or_default();
    drop(state);

    formats.sort_by_key(|f| f.download_only);
    formats
}

#[component]
pub fn DownloadAdapterDialog(client_id: String, protocol: String) -> Element {
    let api = use_admin_client();
    let formats = use_hook(|| installation_formats(&protocol));
    let mut provider = use_signal(|| formats.first().map(|f| f.id.clone()).unwrap_or_default());

    let snippet = use_resource({
        let api = api.clone();
        let client_id = client_id.clone();
        move || {
            let api = api.clone();
            let client_id = client_id.clone();
            let provider = provider();
            async move {
                if provider.is_empty() {
                    return Err(ConsoleError::NotFound("No adapter formats available".into()));
                }
                api.client_installation(&client_id, &provider).await
            }
        }
    });

    let selected = formats.iter().find(|f| f.id == provider()).cloned();
    let options: Vec<SelectOption> = formats
        .iter()
        .map(|f| SelectOption::new(f.id.clone(), f.display_type.clone()))
        .collect();

    let download = {
        let selected = selected.clone();
        move |_: MouseEvent| {
            let Some(format) = selected.clone() else {
                return;
            };
            let content = match &*snippet.read() {
                Some(Ok(content)) => content.clone(),
                _ => return,
            };
            spawn(async move {
                match file_ops::save_download(&format.filename, &content).await {
                    Ok(path) => tracing::info!("Saved adapter config to {}", path.display()),
                    Err(ConsoleError::Cancelled) => {}
                    Err(err) => GlobalAlerts.danger(format!("Could not save adapter config: '{}'", err)),
                }
            });
        }
    };

    let preview = match &*snippet.read() {
        None => rsx! { Spinner {} },
        Some(Err(err)) => rsx! { LoadError { message: err.to_string() } },
        Some(Ok(content)) => rsx! {
            TextArea {
                value: content.clone(),
                label: "Details".to_string(),
                readonly: true,
                monospace: true,
                rows: 12,
            }
        },
    };

    rsx! {
        Modal {
            title: "Download adapter configs".to_string(),
            width: "max-w-2xl".to_string(),
            on_close: move |_| close_dialog(),

            div {
                class: "space-y-4 mb-6",
                Select {
                    label: "Format option".to_string(),
                    value: provider(),
                    options,
                    help_text: selected.as_ref().map(|f| f.help_text.clone()),
                    on_change: move |value: String| provider.set(value),
                }
                {preview}
            }

            div {
                class: "flex justify-end gap-3",
                button {
                    r#type: "button",
                    class: ButtonVariant::Primary.class(),
                    disabled: selected.is_none(),
                    onclick: download,
                    "Download"
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
