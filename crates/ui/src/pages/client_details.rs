//! Client details: header actions and the per-client tabs
//!
//! The page keeps an editable draft of the client next to the last copy read
//! from the server. Tabs edit the draft; each save sends the whole client and
//! reloads it.

use dioxus::prelude::*;
use kc_console_core::ConsoleError;
use kc_console_model::form::{from_multi_line, to_multi_line};
use kc_console_model::{ClientRepresentation, RoleRepresentation, sort_roles};

use crate::components::{
    ButtonVariant, Column, DataTable, FormSection, LoadError, Loader, MultiLineInput, SearchMode,
    Select, SelectOption, Spinner, Switch, Tabs, TextArea, TextInput, ViewHeader, or_dash,
};
use crate::hooks::{ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog};
use crate::ops;
use crate::pages::client_advanced::AdvancedTab;
use crate::pages::client_scopes_tab::ClientScopesTab;
use crate::pages::clients::export_with_alerts;
use crate::state::{APP_STATE, Dialog, GlobalAlerts, Page, navigate};

const ATTR_LOGIN_THEME: &str = "login_theme";

/// Client authenticators offered on the credentials tab
const AUTHENTICATORS: [(&str, &str); 4] = [
    ("client-secret", "Client Id and Secret"),
    ("client-jwt", "Signed Jwt"),
    ("client-secret-jwt", "Signed Jwt with Client Secret"),
    ("client-x509", "X509 Certificate"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClientTab {
    Settings,
    Credentials,
    Roles,
    ClientScopes,
    Advanced,
}

impl ClientTab {
    fn label(&self) -> &'static str {
        match self {
            ClientTab::Settings => "Settings",
            ClientTab::Credentials => "Credentials",
            ClientTab::Roles => "Roles",
            ClientTab::ClientScopes => "Client scopes",
            ClientTab::Advanced => "Advanced",
        }
    }

    /// Tabs shown for a client; credentials only exist for confidential ones
    fn for_client(client: &ClientRepresentation) -> Vec<ClientTab> {
        let mut tabs = vec![ClientTab::Settings];
        if client.has_credentials() {
            tabs.push(ClientTab::Credentials);
        }
        tabs.extend([ClientTab::Roles, ClientTab::ClientScopes, ClientTab::Advanced]);
        tabs
    }
}

/// Settings draft ready to send: list fields without blank rows
fn settings_for_save(draft: &ClientRepresentation) -> ClientRepresentation {
    let mut client = draft.clone();
    client.redirect_uris = Some(from_multi_line(draft.redirect_uris.as_deref().unwrap_or(&[])));
    client.web_origins = Some(from_multi_line(draft.web_origins.as_deref().unwrap_or(&[])));
    client
}

#[component]
pub fn ClientDetailsPage(id: String) -> Element {
    let api = use_admin_client();
    let mut draft = use_signal(ClientRepresentation::default);
    let mut active = use_signal(|| ClientTab::Settings);
    // dialogs such as "Register node" change the client
    let data_version = use_memo(|| APP_STATE.read().data_version);

    let mut client = use_resource({
        let api = api.clone();
        let id = id.clone();
        move || {
            let api = api.clone();
            let id = id.clone();
            let _ = data_version();
            async move {
                let client = api.get_client(&id).await?;
                draft.set(client.clone());
                Ok::<_, ConsoleError>(client)
            }
        }
    });

    let (toggle_disable, disable_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: "Disable client?".into(),
        message: "If you disable this client, you cannot initiate a login or obtain access tokens."
            .into(),
        continue_label: "Disable".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            move || {
                let api = api.clone();
                let mut client = client;
                let mut updated = draft.peek().clone();
                updated.enabled = Some(false);
                async move {
                    if ops::clients::save_client(&api, &updated, &mut GlobalAlerts).await {
                        client.restart();
                    }
                }
            }
        }),
    });

    let client_name = draft.read().client_id().to_string();
    let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: format!("Delete {} ?", client_name),
        message: "If you delete this client, all associated data will be removed.".into(),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            move || {
                let api = api.clone();
                let id = draft.peek().id().to_string();
                async move {
                    if ops::clients::delete_client(&api, &id, &mut GlobalAlerts).await {
                        navigate(Page::Clients);
                    }
                }
            }
        }),
    });

    let enable = move |on: bool| {
        if !on {
            toggle_disable.toggle();
            return;
        }
        let api = api.clone();
        let mut updated = draft.read().clone();
        updated.enabled = Some(true);
        spawn(async move {
            if ops::clients::save_client(&api, &updated, &mut GlobalAlerts).await {
                client.restart();
            }
        });
    };

    let saved = match &*client.read() {
        None => return rsx! { Spinner {} },
        Some(Err(err)) => return rsx! { LoadError { message: err.to_string() } },
        Some(Ok(saved)) => saved.clone(),
    };

    let current = draft.read().clone();
    let tabs = ClientTab::for_client(&current);
    let tab = if tabs.contains(&active()) { active() } else { ClientTab::Settings };
    let active_index = tabs.iter().position(|t| *t == tab).unwrap_or(0);
    let tab_labels: Vec<String> = tabs.iter().map(|t| t.label().to_string()).collect();
    let protocol = current.protocol.clone().unwrap_or_default();
    let badge = current
        .protocol()
        .map(|p| p.display_name().to_string())
        .unwrap_or_else(|| protocol.clone());

    let reload = move |_: ()| client.restart();

    let body = match tab {
        ClientTab::Settings => rsx! {
            SettingsTab { draft, saved: saved.clone(), on_saved: reload }
        },
        ClientTab::Credentials => rsx! {
            CredentialsTab { draft, on_saved: reload }
        },
        ClientTab::Roles => rsx! {
            ClientRolesTab { client_id: current.id().to_string() }
        },
        ClientTab::ClientScopes => rsx! {
            ClientScopesTab { client_id: current.id().to_string(), protocol: protocol.clone() }
        },
        ClientTab::Advanced => rsx! {
            AdvancedTab { draft, saved: saved.clone(), on_saved: reload }
        },
    };

    let download = {
        let client_id = current.id().to_string();
        let protocol = protocol.clone();
        move |_: MouseEvent| {
            APP_STATE.write().ui.show_dialog(Dialog::DownloadAdapter {
                client_id: client_id.clone(),
                protocol: protocol.clone(),
            });
        }
    };

    rsx! {
        div {
            class: "client-details-page",

            ViewHeader {
                title: current.client_id().to_string(),
                badge,
                actions: rsx! {
                    Switch {
                        checked: current.is_enabled(),
                        on_label: "Enabled".to_string(),
                        off_label: "Disabled".to_string(),
                        on_change: enable,
                    }
                    button {
                        class: ButtonVariant::Secondary.class(),
                        onclick: download,
                        "Download adapter config"
                    }
                    button {
                        class: ButtonVariant::Secondary.class(),
                        onclick: move |_| {
                            spawn(export_with_alerts(draft.read().clone()));
                        },
                        "Export"
                    }
                    button {
                        class: ButtonVariant::Danger.class(),
                        onclick: move |_| toggle_delete.toggle(),
                        "Delete"
                    }
                },
            }

            Tabs {
                tabs: tab_labels,
                active: active_index,
                on_select: move |index: usize| {
                    if let Some(next) = tabs.get(index) {
                        active.set(*next);
                    }
                },
            }

            div { class: "p-8", {body} }

            {disable_dialog}
            {delete_dialog}
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

#[component]
fn SettingsTab(
    draft: Signal<ClientRepresentation>,
    saved: ClientRepresentation,
    on_saved: EventHandler<()>,
) -> Element {
    let api = use_admin_client();
    let mut draft = draft;
    let mut busy = use_signal(|| false);

    let save = move |_: MouseEvent| {
        if busy() {
            return;
        }
        busy.set(true);
        let api = api.clone();
        let client = settings_for_save(&draft.read());
        spawn(async move {
            let ok = ops::clients::save_client(&api, &client, &mut GlobalAlerts).await;
            busy.set(false);
            if ok {
                on_saved.call(());
            }
        });
    };

    let current = draft.read().clone();
    let is_oidc = current.is_oidc();

    rsx! {
        FormSection {
            title: "General Settings".to_string(),
            TextInput {
                value: current.client_id().to_string(),
                label: "Client ID".to_string(),
                readonly: true,
            }
            TextInput {
                value: current.name.clone().unwrap_or_default(),
                label: "Name".to_string(),
                on_change: move |value: String| draft.write().name = Some(value),
            }
            TextArea {
                value: current.description.clone().unwrap_or_default(),
                label: "Description".to_string(),
                on_change: move |value: String| draft.write().description = Some(value),
            }
        }

        FormSection {
            title: "Access settings".to_string(),
            TextInput {
                value: current.root_url.clone().unwrap_or_default(),
                label: "Root URL".to_string(),
                input_type: "url".to_string(),
                on_change: move |value: String| draft.write().root_url = Some(value),
            }
            TextInput {
                value: current.base_url.clone().unwrap_or_default(),
                label: "Home URL".to_string(),
                input_type: "url".to_string(),
                on_change: move |value: String| draft.write().base_url = Some(value),
            }
            MultiLineInput {
                label: "Valid redirect URIs".to_string(),
                rows: to_multi_line(current.redirect_uris.as_deref()),
                add_label: "Add valid redirect URIs".to_string(),
                on_change: move |rows: Vec<String>| draft.write().redirect_uris = Some(rows),
            }
            if is_oidc {
                MultiLineInput {
                    label: "Web origins".to_string(),
                    rows: to_multi_line(current.web_origins.as_deref()),
                    add_label: "Add web origins".to_string(),
                    on_change: move |rows: Vec<String>| draft.write().web_origins = Some(rows),
                }
            }
            TextInput {
                value: current.admin_url.clone().unwrap_or_default(),
                label: "Admin URL".to_string(),
                input_type: "url".to_string(),
                on_change: move |value: String| draft.write().admin_url = Some(value),
            }
        }

        FormSection {
            title: "Login settings".to_string(),
            TextInput {
                value: current.attribute(ATTR_LOGIN_THEME).unwrap_or_default().to_string(),
                label: "Login theme".to_string(),
                placeholder: "Choose...".to_string(),
                on_change: move |value: String| draft.write().set_attribute(ATTR_LOGIN_THEME, value),
            }
            Switch {
                label: "Consent required".to_string(),
                checked: current.consent_required.unwrap_or(false),
                on_change: move |on: bool| draft.write().consent_required = Some(on),
            }
        }

        div {
            class: "flex gap-3",
            button {
                r#type: "button",
                class: ButtonVariant::Primary.class(),
                disabled: busy(),
                onclick: save,
                "Save"
            }
            button {
                r#type: "button",
                class: ButtonVariant::Link.class(),
                onclick: move |_| draft.set(saved.clone()),
                "Revert"
            }
        }
    }
}

// ============================================================================
// Credentials
// ============================================================================

#[component]
fn CredentialsTab(draft: Signal<ClientRepresentation>, on_saved: EventHandler<()>) -> Element {
    let api = use_admin_client();
    let mut draft = draft;
    let mut revealed = use_signal(|| false);
    let client_id = draft.read().id().to_string();

    let secret = use_resource({
        let api = api.clone();
        let client_id = client_id.clone();
        move || {
            let api = api.clone();
            let client_id = client_id.clone();
            async move {
                let credential = api.client_secret(&client_id).await?;
                Ok::<_, ConsoleError>(credential.value.unwrap_or_default())
            }
        }
    });
    let regenerated = use_signal(|| None::<String>);

    let (toggle_regenerate, regenerate_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: "Regenerate secret for this client?".into(),
        message: "If you regenerate the secret, applications using the current one can no longer authenticate."
            .into(),
        continue_label: "Yes".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            move || {
                let api = api.clone();
                let client_id = client_id.clone();
                let mut regenerated = regenerated;
                let mut secret = secret;
                async move {
                    if let Some(value) =
                        ops::clients::regenerate_secret(&api, &client_id, &mut GlobalAlerts).await
                    {
                        regenerated.set(Some(value));
                        secret.restart();
                    }
                }
            }
        }),
    });

    let save = move |_: MouseEvent| {
        let api = api.clone();
        let client = draft.read().clone();
        spawn(async move {
            if ops::clients::save_client(&api, &client, &mut GlobalAlerts).await {
                on_saved.call(());
            }
        });
    };

    let authenticator_options: Vec<SelectOption> = AUTHENTICATORS
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect();
    let authenticator = draft
        .read()
        .client_authenticator_type
        .clone()
        .unwrap_or_else(|| AUTHENTICATORS[0].0.to_string());
    let uses_secret = authenticator.starts_with("client-secret");

    let secret_field = match (regenerated(), &*secret.read()) {
        (Some(value), _) => rsx! { SecretField { value, revealed: revealed() } },
        (None, None) => rsx! { Spinner {} },
        (None, Some(Err(err))) => rsx! { LoadError { message: err.to_string() } },
        (None, Some(Ok(value))) => rsx! { SecretField { value: value.clone(), revealed: revealed() } },
    };

    rsx! {
        FormSection {
            title: "Client Authenticator".to_string(),
            Select {
                value: authenticator,
                options: authenticator_options,
                on_change: move |value: String| draft.write().client_authenticator_type = Some(value),
            }
            div {
                button {
                    r#type: "button",
                    class: ButtonVariant::Primary.class(),
                    onclick: save,
                    "Save"
                }
            }
        }

        if uses_secret {
            FormSection {
                title: "Secret".to_string(),
                div {
                    class: "flex items-end gap-3",
                    div { class: "flex-1", {secret_field} }
                    button {
                        r#type: "button",
                        class: ButtonVariant::Secondary.class(),
                        onclick: move |_| revealed.toggle(),
                        if revealed() { "Hide" } else { "Show" }
                    }
                    button {
                        r#type: "button",
                        class: ButtonVariant::Secondary.class(),
                        onclick: move |_| toggle_regenerate.toggle(),
                        "Regenerate"
                    }
                }
            }
        }

        {regenerate_dialog}
    }
}

#[component]
fn SecretField(value: String, revealed: bool) -> Element {
    rsx! {
        TextInput {
            value,
            readonly: true,
            input_type: if revealed { "text".to_string() } else { "password".to_string() },
        }
    }
}

// ============================================================================
// Roles
// ============================================================================

#[component]
fn ClientRolesTab(client_id: String) -> Element {
    let api = use_admin_client();

    let loader = use_hook(|| {
        let api = api.clone();
        let client_id = client_id.clone();
        Loader::new(move |_, _, _| {
            let api = api.clone();
            let client_id = client_id.clone();
            async move { api.client_roles(&client_id).await.map(sort_roles) }
        })
    });

    let columns = use_hook(|| {
        vec![
            Column::text("name", "Role name", |r: &RoleRepresentation| r.name().to_string()),
            Column::text("composite", "Composite", |r: &RoleRepresentation| {
                if r.is_composite() { "True" } else { "False" }.to_string()
            }),
            Column::text("description", "Description", |r: &RoleRepresentation| {
                or_dash(r.description())
            }),
        ]
    });

    rsx! {
        DataTable {
            loader,
            columns,
            search: SearchMode::local(|r: &RoleRepresentation| r.name()),
            search_placeholder: "Search role".to_string(),
            empty: rsx! {
                p { class: "py-10 text-center text-slate-400", "No roles for this client" }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_console_core::Protocol;

    #[test]
    fn test_public_clients_have_no_credentials_tab() {
        let mut client = ClientRepresentation::new("app", Protocol::OpenIdConnect);
        client.public_client = Some(true);
        assert!(!ClientTab::for_client(&client).contains(&ClientTab::Credentials));

        client.public_client = Some(false);
        assert_eq!(ClientTab::for_client(&client)[1], ClientTab::Credentials);
    }

    #[test]
    fn test_settings_drop_blank_rows() {
        let mut client = ClientRepresentation::new("app", Protocol::OpenIdConnect);
        client.redirect_uris = Some(vec!["https://app/*".into(), "  ".into()]);
        client.web_origins = Some(vec![String::new()]);

        let saved = settings_for_save(&client);
        assert_eq!(saved.redirect_uris, Some(vec!["https://app/*".to_string()]));
        assert_eq!(saved.web_origins, Some(Vec::new()));
    }
}
