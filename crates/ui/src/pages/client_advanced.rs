//! Advanced client settings: revocation, clustering, token and flow overrides

use dioxus::prelude::*;
use kc_console_core::ConsoleError;
use kc_console_model::client::{
    ATTR_ACCESS_TOKEN_ALG, ATTR_ACCESS_TOKEN_LIFESPAN, ATTR_ASSERTION_LIFESPAN,
    ATTR_EXCLUDE_SESSION_STATE, ATTR_ID_TOKEN_ALG, ATTR_PKCE_METHOD, ATTR_REQUEST_OBJECT_ALG,
    ATTR_USER_INFO_ALG, FLOW_BROWSER, FLOW_DIRECT_GRANT,
};
use kc_console_model::{
    ClientRepresentation, format_not_before, format_timestamp, override_flow_options,
};

use crate::components::{
    ButtonVariant, FormSection, LoadError, Select, SelectOption, Spinner, Switch, TextInput,
    TimeSelector,
};
use crate::hooks::{ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog};
use crate::ops;
use crate::state::{APP_STATE, Dialog, GlobalAlerts};

const SIGNATURE_ALGORITHMS: [&str; 12] = [
    "RS256", "RS384", "RS512", "HS256", "HS384", "HS512", "ES256", "ES384", "ES512", "PS256",
    "PS384", "PS512",
];

const PKCE_METHODS: [&str; 2] = ["plain", "S256"];

/// Algorithm choices; the empty value leaves the realm default in place
fn algorithm_options(extra: &[&str]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "any"))
        .chain(extra.iter().map(|alg| SelectOption::plain(*alg)))
        .chain(SIGNATURE_ALGORITHMS.iter().map(|alg| SelectOption::plain(*alg)))
        .collect()
}

/// Attribute holding a number of seconds; unset and garbage read as zero
fn attribute_seconds(client: &ClientRepresentation, key: &str) -> u64 {
    client
        .attribute(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Zero clears the attribute so the realm setting applies
fn set_attribute_seconds(client: &mut ClientRepresentation, key: &str, seconds: u64) {
    let value = if seconds == 0 { String::new() } else { seconds.to_string() };
    client.set_attribute(key, value);
}

#[component]
pub fn AdvancedTab(
    draft: Signal<ClientRepresentation>,
    saved: ClientRepresentation,
    on_saved: EventHandler<()>,
) -> Element {
    let api = use_admin_client();
    let mut draft = draft;
    let pending_node = use_signal(|| None::<String>);

    let flows = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let flows = api.authentication_flows().await?;
                Ok::<_, ConsoleError>(override_flow_options(&flows))
            }
        }
    });

    let save = use_callback({
        let api = api.clone();
        move |()| {
            let api = api.clone();
            let client = draft.read().clone();
            spawn(async move {
                if ops::clients::save_client(&api, &client, &mut GlobalAlerts).await {
                    on_saved.call(());
                }
            });
        }
    });
    let revert = use_callback({
        let saved = saved.clone();
        move |()| draft.set(saved.clone())
    });

    let node_name = pending_node.read().clone().unwrap_or_default();
    let (toggle_delete_node, delete_node_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: format!("Delete node {}?", node_name),
        message: "The node will be removed from the registered cluster nodes of this client.".into(),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            let client_id = saved.id().to_string();
            move || {
                let api = api.clone();
                let client_id = client_id.clone();
                let host = pending_node.peek().clone();
                async move {
                    let Some(host) = host else {
                        return;
                    };
                    if ops::advanced::delete_node(&api, &client_id, &host, &mut GlobalAlerts).await {
                        on_saved.call(());
                    }
                }
            }
        }),
    });

    let current = draft.read().clone();
    let is_oidc = current.is_oidc();
    let nodes = saved.nodes();
    let client_id = saved.id().to_string();

    let set_now = {
        let api = api.clone();
        let saved = saved.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            let saved = saved.clone();
            spawn(async move {
                if ops::advanced::set_not_before_now(&api, &saved, &mut GlobalAlerts).await.is_some() {
                    on_saved.call(());
                }
            });
        }
    };
    let clear = {
        let api = api.clone();
        let saved = saved.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            let saved = saved.clone();
            spawn(async move {
                if ops::advanced::clear_not_before(&api, &saved, &mut GlobalAlerts).await.is_some() {
                    on_saved.call(());
                }
            });
        }
    };
    let push = {
        let api = api.clone();
        let client_id = client_id.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            let client_id = client_id.clone();
            spawn(async move {
                ops::advanced::push_revocation(&api, &client_id, &mut GlobalAlerts).await;
            });
        }
    };
    let save_timeout = {
        let api = api.clone();
        let saved = saved.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            let saved = saved.clone();
            let seconds = draft.read().node_re_registration_timeout.unwrap_or(0).max(0) as u64;
            spawn(async move {
                if ops::advanced::save_node_timeout(&api, &saved, seconds, &mut GlobalAlerts)
                    .await
                    .is_some()
                {
                    on_saved.call(());
                }
            });
        }
    };
    let test_availability = {
        let api = api.clone();
        let client_id = client_id.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            let client_id = client_id.clone();
            spawn(async move {
                ops::advanced::test_cluster_availability(&api, &client_id, &mut GlobalAlerts).await;
            });
        }
    };
    let register = {
        let client_id = client_id.clone();
        move |_: MouseEvent| {
            APP_STATE.write().ui.show_dialog(Dialog::RegisterNode {
                client_id: client_id.clone(),
            });
        }
    };

    let flow_section = match &*flows.read() {
        None => rsx! { Spinner {} },
        Some(Err(err)) => rsx! { LoadError { message: err.to_string() } },
        Some(Ok(options)) => {
            let options: Vec<SelectOption> = std::iter::once(SelectOption::new("", "Choose..."))
                .chain(options.iter().map(|f| SelectOption::new(f.id.clone(), f.alias.clone())))
                .collect();
            rsx! {
                Select {
                    label: "Browser Flow".to_string(),
                    value: current.flow_override(FLOW_BROWSER).unwrap_or_default().to_string(),
                    options: options.clone(),
                    on_change: move |id: String| draft.write().set_flow_override(FLOW_BROWSER, &id),
                }
                if is_oidc {
                    Select {
                        label: "Direct Grant Flow".to_string(),
                        value: current.flow_override(FLOW_DIRECT_GRANT).unwrap_or_default().to_string(),
                        options,
                        on_change: move |id: String| draft.write().set_flow_override(FLOW_DIRECT_GRANT, &id),
                    }
                }
            }
        }
    };

    rsx! {
        FormSection {
            title: "Revocation".to_string(),
            description: "Revoke tokens issued before a point in time and push the policy to the client.".to_string(),
            TextInput {
                value: format_not_before(saved.not_before()),
                label: "Not Before".to_string(),
                readonly: true,
            }
            div {
                class: "flex gap-3",
                button { r#type: "button", class: ButtonVariant::Secondary.class(), onclick: set_now, "Set to now" }
                button { r#type: "button", class: ButtonVariant::Secondary.class(), onclick: clear, "Clear" }
                button { r#type: "button", class: ButtonVariant::Secondary.class(), onclick: push, "Push" }
            }
        }

        if is_oidc {
            FormSection {
                title: "Clustering".to_string(),
                TimeSelector {
                    label: "Node Re-registration timeout".to_string(),
                    seconds: current.node_re_registration_timeout.unwrap_or(0).max(0) as u64,
                    on_change: move |seconds: u64| {
                        draft.write().node_re_registration_timeout = i64::try_from(seconds).ok();
                    },
                }
                div {
                    button { r#type: "button", class: ButtonVariant::Secondary.class(), onclick: save_timeout, "Save" }
                }

                div {
                    class: "flex items-center justify-between",
                    h4 { class: "text-sm font-medium text-slate-200", "Registered cluster nodes" }
                    div {
                        class: "flex gap-3",
                        button {
                            r#type: "button",
                            class: ButtonVariant::Secondary.class(),
                            onclick: register,
                            "Register node manually"
                        }
                        button {
                            r#type: "button",
                            class: ButtonVariant::Secondary.class(),
                            disabled: nodes.is_empty(),
                            onclick: test_availability,
                            "Test cluster availability"
                        }
                    }
                }
                if nodes.is_empty() {
                    p { class: "text-sm text-slate-400", "No nodes registered" }
                } else {
                    table {
                        class: "w-full text-sm text-slate-200",
                        thead {
                            class: "text-slate-400",
                            tr {
                                th { class: "px-3 py-2 text-left font-medium", "Node host" }
                                th { class: "px-3 py-2 text-left font-medium", "Last registration" }
                                th { class: "w-24" }
                            }
                        }
                        tbody {
                            for (host, registered) in nodes.iter().cloned() {
                                tr {
                                    key: "{host}",
                                    class: "border-t border-slate-700",
                                    td { class: "px-3 py-2", "{host}" }
                                    td { class: "px-3 py-2", {format_timestamp(registered)} }
                                    td {
                                        class: "px-3 py-2 text-right",
                                        button {
                                            class: "text-red-400 hover:text-red-300",
                                            onclick: move |_| {
                                                let mut pending_node = pending_node;
                                                pending_node.set(Some(host.clone()));
                                                toggle_delete_node.toggle();
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            FormSection {
                title: "Fine grain OpenID Connect configuration".to_string(),
                Select {
                    label: "Access token signature algorithm".to_string(),
                    value: current.attribute(ATTR_ACCESS_TOKEN_ALG).unwrap_or_default().to_string(),
                    options: algorithm_options(&[]),
                    on_change: move |alg: String| draft.write().set_attribute(ATTR_ACCESS_TOKEN_ALG, alg),
                }
                Select {
                    label: "ID token signature algorithm".to_string(),
                    value: current.attribute(ATTR_ID_TOKEN_ALG).unwrap_or_default().to_string(),
                    options: algorithm_options(&[]),
                    on_change: move |alg: String| draft.write().set_attribute(ATTR_ID_TOKEN_ALG, alg),
                }
                Select {
                    label: "User info signed response algorithm".to_string(),
                    value: current.attribute(ATTR_USER_INFO_ALG).unwrap_or_default().to_string(),
                    options: algorithm_options(&["unsigned"]),
                    on_change: move |alg: String| draft.write().set_attribute(ATTR_USER_INFO_ALG, alg),
                }
                Select {
                    label: "Request object signature algorithm".to_string(),
                    value: current.attribute(ATTR_REQUEST_OBJECT_ALG).unwrap_or_default().to_string(),
                    options: algorithm_options(&["none"]),
                    on_change: move |alg: String| draft.write().set_attribute(ATTR_REQUEST_OBJECT_ALG, alg),
                }
                SectionButtons { on_save: save, on_revert: revert }
            }

            FormSection {
                title: "Open ID Connect Compatibility Modes".to_string(),
                Switch {
                    label: "Exclude Session State From Authentication Response".to_string(),
                    checked: current.attribute(ATTR_EXCLUDE_SESSION_STATE) == Some("true"),
                    on_change: move |on: bool| {
                        draft.write().set_attribute(ATTR_EXCLUDE_SESSION_STATE, on.to_string());
                    },
                }
                SectionButtons { on_save: save, on_revert: revert }
            }
        }

        FormSection {
            title: "Advanced settings".to_string(),
            if is_oidc {
                TimeSelector {
                    label: "Access Token Lifespan".to_string(),
                    seconds: attribute_seconds(&current, ATTR_ACCESS_TOKEN_LIFESPAN),
                    help_text: "Zero inherits the realm setting.".to_string(),
                    on_change: move |seconds: u64| {
                        set_attribute_seconds(&mut draft.write(), ATTR_ACCESS_TOKEN_LIFESPAN, seconds);
                    },
                }
                Select {
                    label: "Proof Key for Code Exchange Code Challenge Method".to_string(),
                    value: current.attribute(ATTR_PKCE_METHOD).unwrap_or_default().to_string(),
                    placeholder: "Choose...".to_string(),
                    options: PKCE_METHODS.iter().map(|m| SelectOption::plain(*m)).collect::<Vec<_>>(),
                    on_change: move |method: String| draft.write().set_attribute(ATTR_PKCE_METHOD, method),
                }
            } else {
                TimeSelector {
                    label: "Assertion Lifespan".to_string(),
                    seconds: attribute_seconds(&current, ATTR_ASSERTION_LIFESPAN),
                    on_change: move |seconds: u64| {
                        set_attribute_seconds(&mut draft.write(), ATTR_ASSERTION_LIFESPAN, seconds);
                    },
                }
            }
            SectionButtons { on_save: save, on_revert: revert }
        }

        FormSection {
            title: "Authentication flow overrides".to_string(),
            {flow_section}
            SectionButtons { on_save: save, on_revert: revert }
        }

        {delete_node_dialog}
    }
}

#[component]
fn SectionButtons(on_save: Callback<()>, on_revert: Callback<()>) -> Element {
    rsx! {
        div {
            class: "flex gap-3",
            button {
                r#type: "button",
                class: ButtonVariant::Secondary.class(),
                onclick: move |_| on_save.call(()),
                "Save"
            }
            button {
                r#type: "button",
                class: ButtonVariant::Link.class(),
                onclick: move |_| on_revert.call(()),
                "Reload"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_console_core::Protocol;

    #[test]
    fn test_lifespan_attribute_round_trip() {
        let mut client = ClientRepresentation::new("app", Protocol::OpenIdConnect);
        assert_eq!(attribute_seconds(&client, ATTR_ACCESS_TOKEN_LIFESPAN), 0);

        set_attribute_seconds(&mut client, ATTR_ACCESS_TOKEN_LIFESPAN, 300);
        assert_eq!(client.attribute(ATTR_ACCESS_TOKEN_LIFESPAN), Some("300"));

        set_attribute_seconds(&mut client, ATTR_ACCESS_TOKEN_LIFESPAN, 0);
        assert_eq!(client.attribute(ATTR_ACCESS_TOKEN_LIFESPAN), None);
    }

    #[test]
    fn test_algorithm_options_start_with_default() {
        let options = algorithm_options(&["none"]);
        assert_eq!(options[0].value, "");
        assert_eq!(options[1].value, "none");
        assert_eq!(options.len(), SIGNATURE_ALGORITHMS.len() + 2);
    }
}
