//! Add an OpenID Connect identity provider
//!
//! The provider's endpoints come from its discovery document: fetched when
//! the discovery URL field loses focus, or read from an uploaded metadata
//! file when discovery is switched off. Client credentials and the advanced
//! broker settings are edited on the same draft, which is posted on Add.

use dioxus::prelude::*;
use kc_console_core::{ConsoleError, FieldErrors, Notify, Validatable};
use kc_console_model::identity_provider::{DISCOVERY_PLACEHOLDER, NO_VALID_METADATA, config_keys};
use kc_console_model::{
    AuthenticationFlowRepresentation, IdentityProviderRepresentation, OidcConfiguration, SyncMode,
    broker_flow_options,
};

use crate::components::{
    ButtonVariant, FormGroup, FormSection, Modal, Select, SelectOption, Switch, TextArea,
    TextInput, ViewHeader,
};
use crate::file_ops;
use crate::hooks::use_admin_client;
use crate::ops::{self, failure_message};
use crate::state::{GlobalAlerts, Page, navigate};

/// Where the provider metadata came from, and whether it was usable
#[derive(Debug, Clone, PartialEq, Default)]
enum Discovery {
    #[default]
    Idle,
    Running,
    Found(OidcConfiguration),
    Failed,
}

impl Discovery {
    fn error(&self) -> Option<String> {
        matches!(self, Discovery::Failed).then(|| NO_VALID_METADATA.to_string())
    }

    fn metadata(&self) -> Option<&OidcConfiguration> {
        match self {
            Discovery::Found(metadata) => Some(metadata),
            _ => None,
        }
    }

    /// A blur only fetches again after the URL was edited or the last try failed
    fn should_fetch(&self, url: &str) -> bool {
        !url.trim().is_empty() && matches!(self, Discovery::Idle | Discovery::Failed)
    }
}

fn flow_options(flows: &[AuthenticationFlowRepresentation]) -> Vec<SelectOption> {
    broker_flow_options(flows)
        .into_iter()
        .map(|flow| SelectOption::plain(flow.alias))
        .collect()
}

fn sync_mode_options() -> Vec<SelectOption> {
    SyncMode::all()
        .iter()
        .map(|m| SelectOption::new(m.as_str(), m.display_name()))
        .collect()
}

#[component]
pub fn AddOidcProviderPage() -> Element {
    let api = use_admin_client();
    let mut provider = use_signal(IdentityProviderRepresentation::new_oidc);
    let mut errors = use_signal(FieldErrors::new);
    let mut use_discovery = use_signal(|| true);
    let mut discovery_url = use_signal(String::new);
    let mut discovery = use_signal(Discovery::default);
    let mut metadata_source = use_signal(String::new);
    let mut show_metadata = use_signal(|| false);
    let mut busy = use_signal(|| false);

    let flows = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let flows = api.authentication_flows().await?;
                Ok::<_, ConsoleError>(flow_options(&flows))
            }
        }
    });

    let discover = {
        let api = api.clone();
        move |url: String| {
            if !discovery.peek().should_fetch(&url) {
                return;
            }
            discovery.set(Discovery::Running);
            let api = api.clone();
            spawn(async move {
                let result = api.discover_oidc(&url).await;
                // the URL was edited while the request ran
                if *discovery_url.peek() != url {
                    return;
                }
                match result {
                    Ok(metadata) => {
                        provider.write().apply_discovery(&metadata);
                        errors.set(FieldErrors::new());
                        discovery.set(Discovery::Found(metadata));
                    }
                    Err(err) => {
                        tracing::warn!("Discovery at {} failed: {}", url, err);
                        discovery.set(Discovery::Failed);
                    }
                }
            });
        }
    };

    let browse = move |_: MouseEvent| {
        spawn(async move {
            match file_ops::import_metadata_file().await {
                Ok((metadata, path)) => {
                    metadata_source.set(path.display().to_string());
                    provider.write().apply_discovery(&metadata);
                    errors.set(FieldErrors::new());
                    discovery.set(Discovery::Found(metadata));
                }
                Err(ConsoleError::Cancelled) => {}
                Err(err) if err.is_io() => {
                    GlobalAlerts.danger(failure_message("Could not read metadata file:", &err));
                }
                Err(err) => {
                    tracing::warn!("Unusable provider metadata: {}", err);
                    discovery.set(Discovery::Failed);
                }
            }
        });
    };

    let save = move |_: MouseEvent| {
        if busy() {
            return;
        }
        let draft = provider.read().clone();
        if let Err(field_errors) = draft.validate() {
            errors.set(field_errors);
            return;
        }
        busy.set(true);

        let api = api.clone();
        spawn(async move {
            let created = ops::identity_providers::create_provider(&api, &draft, &mut GlobalAlerts).await;
            busy.set(false);
            if created.is_some() {
                navigate(Page::IdentityProviders);
            }
        });
    };

    let draft = provider.read().clone();
    let state = discovery.read().clone();
    let field_errors = errors.read().clone();
    let endpoint_error = state
        .error()
        .or_else(|| field_errors.message("discoveryEndpoint"));
    let discovering = (state == Discovery::Running).then(|| "Discovering...".to_string());
    let flow_choices = match &*flows.read() {
        Some(Ok(options)) => options.clone(),
        _ => Vec::new(),
    };
    let metadata_json = state
        .metadata()
        .and_then(|m| serde_json::to_string_pretty(m).ok())
        .unwrap_or_default();

    rsx! {
        div {
            class: "add-oidc-provider-page",

            ViewHeader {
                title: "Add OpenID Connect provider".to_string(),
                subtitle: "Users sign in through an external OpenID Connect server.".to_string(),
            }

            div {
                class: "p-8",

                FormSection {
                    title: "General settings".to_string(),
                    TextInput {
                        value: draft.alias().to_string(),
                        label: "Alias".to_string(),
                        required: true,
                        error: field_errors.message("alias"),
                        on_change: move |value: String| provider.write().alias = Some(value),
                    }
                    TextInput {
                        value: draft.display_name.clone().unwrap_or_default(),
                        label: "Display name".to_string(),
                        on_change: move |value: String| provider.write().display_name = Some(value),
                    }
                }

                FormSection {
                    title: "OpenID Connect settings".to_string(),
                    Switch {
                        label: "Use discovery endpoint".to_string(),
                        checked: use_discovery(),
                        on_change: move |on: bool| {
                            use_discovery.set(on);
                            discovery.set(Discovery::Idle);
                        },
                    }

                    if use_discovery() {
                        TextInput {
                            value: discovery_url(),
                            label: "Discovery endpoint".to_string(),
                            placeholder: DISCOVERY_PLACEHOLDER.to_string(),
                            input_type: "url".to_string(),
                            required: true,
                            help_text: discovering,
                            error: endpoint_error.clone(),
                            on_change: move |value: String| {
                                discovery_url.set(value);
                                discovery.set(Discovery::Idle);
                            },
                            on_blur: discover.clone(),
                            on_enter: discover,
                        }
                    } else {
                        FormGroup {
                            label: "Import config".to_string(),
                            error: endpoint_error.clone(),
                            div {
                                class: "flex items-center gap-3",
                                button {
                                    r#type: "button",
                                    class: ButtonVariant::Secondary.class(),
                                    onclick: browse,
                                    "Browse..."
                                }
                                span { class: "text-sm text-slate-400 truncate", "{metadata_source}" }
                            }
                        }
                    }

                    if !metadata_json.is_empty() {
                        button {
                            r#type: "button",
                            class: ButtonVariant::Link.class(),
                            onclick: move |_| show_metadata.set(true),
                            "View metadata"
                        }
                    }

                    if draft.has_endpoints() {
                        TextInput {
                            value: draft.config_value(config_keys::AUTHORIZATION_URL).unwrap_or_default().to_string(),
                            label: "Authorization URL".to_string(),
                            readonly: true,
                        }
                        TextInput {
                            value: draft.config_value(config_keys::TOKEN_URL).unwrap_or_default().to_string(),
                            label: "Token URL".to_string(),
                            readonly: true,
                        }
                    }

                    TextInput {
                        value: draft.config_value(config_keys::CLIENT_ID).unwrap_or_default().to_string(),
                        label: "Client ID".to_string(),
                        required: true,
                        error: field_errors.message(config_keys::CLIENT_ID),
                        on_change: move |value: String| {
                            provider.write().set_config(config_keys::CLIENT_ID, value);
                        },
                    }
                    TextInput {
                        value: draft.config_value(config_keys::CLIENT_SECRET).unwrap_or_default().to_string(),
                        label: "Client Secret".to_string(),
                        input_type: "password".to_string(),
                        required: true,
                        error: field_errors.message(config_keys::CLIENT_SECRET),
                        on_change: move |value: String| {
                            provider.write().set_config(config_keys::CLIENT_SECRET, value);
                        },
                    }
                }

                FormSection {
                    title: "Advanced settings".to_string(),
                    Switch {
                        label: "Store tokens".to_string(),
                        checked: draft.store_token.unwrap_or(false),
                        on_change: move |on: bool| provider.write().store_token = Some(on),
                    }
                    Switch {
                        label: "Trust Email".to_string(),
                        checked: draft.trust_email.unwrap_or(false),
                        on_change: move |on: bool| provider.write().trust_email = Some(on),
                    }
                    Switch {
                        label: "Account linking only".to_string(),
                        checked: draft.link_only.unwrap_or(false),
                        on_change: move |on: bool| provider.write().link_only = Some(on),
                    }
                    Switch {
                        label: "Hide on login page".to_string(),
                        checked: draft.config_flag(config_keys::HIDE_ON_LOGIN_PAGE),
                        on_change: move |on: bool| {
                            provider.write().set_config(config_keys::HIDE_ON_LOGIN_PAGE, on.to_string());
                        },
                    }
                    Select {
                        label: "First login flow".to_string(),
                        value: draft.first_broker_login_flow_alias.clone().unwrap_or_default(),
                        options: flow_choices.clone(),
                        on_change: move |alias: String| {
                            provider.write().first_broker_login_flow_alias = Some(alias);
                        },
                    }
                    Select {
                        label: "Post login flow".to_string(),
                        value: draft.post_broker_login_flow_alias.clone().unwrap_or_default(),
                        options: flow_choices,
                        placeholder: "None".to_string(),
                        on_change: move |alias: String| {
                            provider.write().post_broker_login_flow_alias = Some(alias);
                        },
                    }
                    Select {
                        label: "Sync mode".to_string(),
                        value: draft.sync_mode().as_str().to_string(),
                        options: sync_mode_options(),
                        on_change: move |mode: String| {
                            provider.write().set_config(config_keys::SYNC_MODE, mode);
                        },
                    }
                }

                div {
                    class: "flex gap-3",
                    button {
                        r#type: "button",
                        class: ButtonVariant::Primary.class(),
                        disabled: busy(),
                        onclick: save,
                        "Add"
                    }
                    button {
                        r#type: "button",
                        class: ButtonVariant::Link.class(),
                        onclick: move |_| navigate(Page::IdentityProviders),
                        "Cancel"
                    }
                }
            }

            if show_metadata() {
                Modal {
                    title: "Discovery results".to_string(),
                    width: "max-w-2xl".to_string(),
                    on_close: move |_| show_metadata.set(false),
                    TextArea { value: metadata_json, readonly: true, monospace: true, rows: 20 }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flow(alias: &str, provider_id: &str, top_level: bool) -> AuthenticationFlowRepresentation {
        AuthenticationFlowRepresentation {
            id: alias.to_string(),
            alias: alias.to_string(),
            provider_id: Some(provider_id.to_string()),
            top_level,
            ..Default::default()
        }
    }

    #[test]
    fn test_broker_flows_are_top_level() {
        let flows = vec![
            flow("first broker login", "basic-flow", true),
            flow("browser", "basic-flow", true),
            flow("clients", "client-flow", true),
            flow("forms", "basic-flow", false),
        ];
        let labels: Vec<String> = flow_options(&flows).into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["browser", "first broker login"]);
    }

    #[test]
    fn test_discovery_refetch_rules() {
        assert!(Discovery::Idle.should_fetch("https://idp/.well-known/openid-configuration"));
        assert!(!Discovery::Idle.should_fetch("  "));
        assert!(!Discovery::Running.should_fetch("https://idp"));
        assert!(!Discovery::Found(OidcConfiguration::default()).should_fetch("https://idp"));
        assert!(Discovery::Failed.should_fetch("https://idp"));
    }

    #[test]
    fn test_failed_discovery_message() {
        assert_eq!(Discovery::Failed.error().as_deref(), Some(NO_VALID_METADATA));
        assert_eq!(Discovery::Idle.error(), None);
    }

    #[test]
    fn test_sync_mode_options() {
        let values: Vec<String> = sync_mode_options().into_iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["IMPORT", "LEGACY", "FORCE"]);
    }
}
