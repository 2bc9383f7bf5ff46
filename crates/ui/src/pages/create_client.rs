//! Create client wizard
//!
//! Two steps over one client draft:
//! 1. General settings: client type, client id, name, description
//! 2. Capability config: authentication, authorization and the enabled flows
//!
//! The draft is validated before leaving step one; Save posts it and opens
//! the new client's details.

use dioxus::prelude::*;
use kc_console_core::{FieldErrors, Protocol, Validatable};
use kc_console_model::ClientRepresentation;

use crate::components::{
    ButtonVariant, Checkbox, FormGroup, FormSection, Select, SelectOption, Switch, TextArea,
    TextInput, ViewHeader,
};
use crate::hooks::use_admin_client;
use crate::ops;
use crate::state::{GlobalAlerts, Page, navigate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    General,
    Capability,
}

/// New client draft with the defaults of the create form
fn new_client_draft() -> ClientRepresentation {
    let mut client = ClientRepresentation::new("", Protocol::OpenIdConnect);
    client.public_client = Some(true);
    client.standard_flow_enabled = Some(true);
    client.direct_access_grants_enabled = Some(true);
    client.implicit_flow_enabled = Some(false);
    client.service_accounts_enabled = Some(false);
    client.authorization_services_enabled = Some(false);
    client
}

/// Client authentication on means a confidential client
fn set_client_authentication(client: &mut ClientRepresentation, on: bool) {
    client.public_client = Some(!on);
    if !on {
        client.service_accounts_enabled = Some(false);
        client.authorization_services_enabled = Some(false);
    }
}

/// Authorization needs a confidential client with a service account
fn set_authorization(client: &mut ClientRepresentation, on: bool) {
    client.authorization_services_enabled = Some(on);
    if on {
        client.public_client = Some(false);
        client.service_accounts_enabled = Some(true);
    }
}

#[component]
pub fn CreateClientPage() -> Element {
    let api = use_admin_client();
    let mut client = use_signal(new_client_draft);
    let mut errors = use_signal(FieldErrors::new);
    let mut step = use_signal(|| Step::General);
    let mut busy = use_signal(|| false);

    let next = move |_: MouseEvent| match client.read().validate() {
        Ok(()) => step.set(Step::Capability),
        Err(field_errors) => errors.set(field_errors),
    };

    let save = move |_: MouseEvent| {
        if busy() {
            return;
        }
        let draft = client.read().clone();
        if let Err(field_errors) = draft.validate() {
            errors.set(field_errors);
            step.set(Step::General);
            return;
        }
        busy.set(true);

        let api = api.clone();
        spawn(async move {
            let created = ops::clients::create_client(&api, &draft, &mut GlobalAlerts).await;
            busy.set(false);
            if let Some(id) = created {
                navigate(Page::ClientDetails(id));
            }
        });
    };

    let draft = client.read().clone();
    let is_oidc = draft.is_oidc();
    let protocol_options: Vec<SelectOption> = Protocol::all()
        .iter()
        .map(|p| SelectOption::new(p.as_str(), p.display_name()))
        .collect();

    let body = match step() {
        Step::General => rsx! {
            FormSection {
                title: "General Settings".to_string(),
                Select {
                    label: "Client type".to_string(),
                    value: draft.protocol.clone().unwrap_or_default(),
                    options: protocol_options,
                    required: true,
                    error: errors.read().message("protocol"),
                    on_change: move |value: String| {
                        client.write().protocol = Some(value);
                        errors.set(FieldErrors::new());
                    },
                }
                TextInput {
                    value: draft.client_id.clone().unwrap_or_default(),
                    label: "Client ID".to_string(),
                    required: true,
                    error: errors.read().message("clientId"),
                    on_change: move |value: String| {
                        client.write().client_id = Some(value);
                        errors.set(FieldErrors::new());
                    },
                }
                TextInput {
                    value: draft.name.clone().unwrap_or_default(),
                    label: "Name".to_string(),
                    on_change: move |value: String| client.write().name = Some(value),
                }
                TextArea {
                    value: draft.description.clone().unwrap_or_default(),
                    label: "Description".to_string(),
                    on_change: move |value: String| client.write().description = Some(value),
                }
            }
        },
        Step::Capability => rsx! {
            FormSection {
                title: "Capability config".to_string(),
                if is_oidc {
                    Switch {
                        label: "Client authentication".to_string(),
                        checked: !draft.is_public(),
                        help_text: "On for confidential clients that authenticate with a secret.".to_string(),
                        on_change: move |on: bool| set_client_authentication(&mut client.write(), on),
                    }
                    Switch {
                        label: "Authorization".to_string(),
                        checked: draft.authorization_services_enabled.unwrap_or(false),
                        on_change: move |on: bool| set_authorization(&mut client.write(), on),
                    }
                    FormGroup {
                        label: "Authentication flow".to_string(),
                        div {
                            class: "grid grid-cols-2 gap-3",
                            Checkbox {
                                label: "Standard flow".to_string(),
                                checked: draft.standard_flow_enabled.unwrap_or(false),
                                on_change: move |on: bool| client.write().standard_flow_enabled = Some(on),
                            }
                            Checkbox {
                                label: "Direct access grants".to_string(),
                                checked: draft.direct_access_grants_enabled.unwrap_or(false),
                                on_change: move |on: bool| client.write().direct_access_grants_enabled = Some(on),
                            }
                            Checkbox {
                                label: "Implicit flow".to_string(),
                                checked: draft.implicit_flow_enabled.unwrap_or(false),
                                on_change: move |on: bool| client.write().implicit_flow_enabled = Some(on),
                            }
                            Checkbox {
                                label: "Service accounts".to_string(),
                                checked: draft.service_accounts_enabled.unwrap_or(false),
                                disabled: draft.is_public(),
                                on_change: move |on: bool| client.write().service_accounts_enabled = Some(on),
                            }
                        }
                    }
                } else {
                    p { class: "text-sm text-slate-400", "SAML clients have no capability settings." }
                }
            }
        },
    };

    rsx! {
        div {
            class: "create-client-page",

            ViewHeader { title: "Create client".to_string() }

            div {
                class: "flex gap-8 p-8",

                ol {
                    class: "w-48 shrink-0 space-y-3 text-sm",
                    li {
                        class: if step() == Step::General { "text-indigo-400 font-medium" } else { "text-slate-400" },
                        "1. General Settings"
                    }
                    li {
                        class: if step() == Step::Capability { "text-indigo-400 font-medium" } else { "text-slate-400" },
                        "2. Capability config"
                    }
                }

                div {
                    class: "flex-1",
                    {body}

                    div {
                        class: "flex gap-3",
                        if step() == Step::General {
                            button {
                                r#type: "button",
                                class: ButtonVariant::Primary.class(),
                                onclick: next,
                                "Next"
                            }
                        } else {
                            button {
                                r#type: "button",
                                class: ButtonVariant::Primary.class(),
                                disabled: busy(),
                                onclick: save,
                                "Save"
                            }
                            button {
                                r#type: "button",
                                class: ButtonVariant::Secondary.class(),
                                onclick: move |_| step.set(Step::General),
                                "Back"
                            }
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_is_public_oidc() {
        let draft = new_client_draft();
        assert!(draft.is_oidc());
        assert!(draft.is_public());
        assert!(!draft.is_valid(), "client id is required");
    }

    #[test]
    fn test_authorization_forces_confidential() {
        let mut draft = new_client_draft();
        set_authorization(&mut draft, true);
        assert!(!draft.is_public());
        assert_eq!(draft.service_accounts_enabled, Some(true));

        set_client_authentication(&mut draft, false);
        assert!(draft.is_public());
        assert_eq!(draft.authorization_services_enabled, Some(false));
    }
}
