//! Mapping details: edit one protocol mapper of a client scope
//!
//! Mapper config keys are dotted (`claim.name`). The form edits them under
//! form-safe keys and [`FormKeyMap`] restores the originals before saving.

use dioxus::prelude::*;
use kc_console_core::ConsoleError;
use kc_console_model::form::mapper_keys;
use kc_console_model::{FormKeyMap, ProtocolMapperRepresentation};
use std::collections::BTreeMap;

use crate::components::{
    ButtonVariant, Checkbox, FormGroup, FormSection, LoadError, Select, SelectOption, Spinner,
    Switch, TextInput, ViewHeader,
};
use crate::hooks::{ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog};
use crate::ops;
use crate::state::{APP_STATE, GlobalAlerts, Page, navigate};

/// Form values of a loaded mapper, keyed the way the form edits them
#[derive(Debug, Clone, Default, PartialEq)]
struct MapperForm {
    keys: FormKeyMap,
    values: BTreeMap<String, String>,
}

impl MapperForm {
    fn load(mapper: &ProtocolMapperRepresentation) -> Self {
        let (keys, values) = FormKeyMap::to_form(&mapper.config);
        Self { keys, values }
    }

    fn get(&self, original: &str) -> String {
        self.values
            .get(&self.keys.form_key_for(original))
            .cloned()
            .unwrap_or_default()
    }

    fn flag(&self, original: &str) -> bool {
        self.get(original) == "true"
    }

    fn set(&mut self, original: &str, value: impl Into<String>) {
        let key = self.keys.form_key_for(original);
        self.values.insert(key, value.into());
    }
}

#[component]
pub fn MappingDetailsPage(scope_id: String, mapper_id: String) -> Element {
    let api = use_admin_client();
    let mut form = use_signal(MapperForm::default);
    let mut busy = use_signal(|| false);

    let mapper = use_resource({
        let api = api.clone();
        let scope_id = scope_id.clone();
        let mapper_id = mapper_id.clone();
        move || {
            let api = api.clone();
            let scope_id = scope_id.clone();
            let mapper_id = mapper_id.clone();
            async move {
                let mapper = api.get_protocol_mapper(&scope_id, &mapper_id).await?;
                form.set(MapperForm::load(&mapper));
                Ok::<_, ConsoleError>(mapper)
            }
        }
    });

    let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: "Delete mapping?".into(),
        message: "This mapper is removed from the client scope and from tokens issued with it."
            .into(),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            let scope_id = scope_id.clone();
            let mapper_id = mapper_id.clone();
            move || {
                let api = api.clone();
                let scope_id = scope_id.clone();
                let mapper_id = mapper_id.clone();
                async move {
                    if ops::mappers::delete_mapper(&api, &scope_id, &mapper_id, &mut GlobalAlerts).await {
                        navigate(Page::ClientScopeDetails(scope_id));
                    }
                }
            }
        }),
    });

    let loaded = match &*mapper.read() {
        None => return rsx! { Spinner {} },
        Some(Err(err)) => return rsx! { LoadError { message: err.to_string() } },
        Some(Ok(loaded)) => loaded.clone(),
    };

    let save = {
        let loaded = loaded.clone();
        let scope_id = scope_id.clone();
        move |_: MouseEvent| {
            if busy() {
                return;
            }
            busy.set(true);
            let api = api.clone();
            let loaded = loaded.clone();
            let scope_id = scope_id.clone();
            let current = form.read().clone();
            spawn(async move {
                ops::mappers::save_mapper(
                    &api,
                    &scope_id,
                    &loaded,
                    &current.values,
                    &current.keys,
                    &mut GlobalAlerts,
                )
                .await;
                busy.set(false);
            });
        }
    };

    let protocol = loaded.protocol.clone().unwrap_or_default();
    let json_types: Vec<SelectOption> = APP_STATE
        .read()
        .server_info
        .as_ref()
        .and_then(|info| info.mapper_type(&protocol, loaded.mapper_type()))
        .map(|t| {
            t.property_options(mapper_keys::JSON_TYPE)
                .iter()
                .map(|o| SelectOption::plain(o.clone()))
                .collect()
        })
        .unwrap_or_default();

    let current = form.read().clone();
    let back = scope_id.clone();

    rsx! {
        div {
            class: "mapping-details-page",

            ViewHeader {
                title: loaded.name().to_string(),
                subtitle: loaded.id().to_string(),
                badge: protocol.clone(),
                actions: rsx! {
                    button {
                        class: ButtonVariant::Danger.class(),
                        onclick: move |_| toggle_delete.toggle(),
                        "Delete"
                    }
                },
            }

            div {
                class: "p-8",
                FormSection {
                    title: "Mapper details".to_string(),
                    TextInput {
                        value: current.get(mapper_keys::ROLE_PREFIX),
                        label: "Realm role prefix".to_string(),
                        on_change: move |value: String| form.write().set(mapper_keys::ROLE_PREFIX, value),
                    }
                    Switch {
                        label: "Multivalued".to_string(),
                        checked: current.flag(mapper_keys::MULTIVALUED),
                        on_change: move |on: bool| form.write().set(mapper_keys::MULTIVALUED, on.to_string()),
                    }
                    TextInput {
                        value: current.get(mapper_keys::CLAIM_NAME),
                        label: "Token claim name".to_string(),
                        on_change: move |value: String| form.write().set(mapper_keys::CLAIM_NAME, value),
                    }
                    Select {
                        label: "Claim JSON type".to_string(),
                        value: current.get(mapper_keys::JSON_TYPE),
                        placeholder: "Choose...".to_string(),
                        options: json_types,
                        on_change: move |value: String| form.write().set(mapper_keys::JSON_TYPE, value),
                    }
                    FormGroup {
                        label: "Add claim to".to_string(),
                        div {
                            class: "flex gap-6",
                            Checkbox {
                                label: "ID token".to_string(),
                                checked: current.flag(mapper_keys::ID_TOKEN_CLAIM),
                                on_change: move |on: bool| form.write().set(mapper_keys::ID_TOKEN_CLAIM, on.to_string()),
                            }
                            Checkbox {
                                label: "Access token".to_string(),
                                checked: current.flag(mapper_keys::ACCESS_TOKEN_CLAIM),
                                on_change: move |on: bool| form.write().set(mapper_keys::ACCESS_TOKEN_CLAIM, on.to_string()),
                            }
                            Checkbox {
                                label: "User info".to_string(),
                                checked: current.flag(mapper_keys::USERINFO_TOKEN_CLAIM),
                                on_change: move |on: bool| form.write().set(mapper_keys::USERINFO_TOKEN_CLAIM, on.to_string()),
                            }
                        }
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
                        onclick: move |_| navigate(Page::ClientScopeDetails(back.clone())),
                        "Cancel"
                    }
                }
            }

            {delete_dialog}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> ProtocolMapperRepresentation {
        let mut mapper = ProtocolMapperRepresentation::default();
        mapper.config.insert("claim.name".into(), "groups".into());
        mapper.config.insert("multivalued".into(), "true".into());
        mapper
    }

    #[test]
    fn test_form_reads_dotted_keys() {
        let form = MapperForm::load(&mapper());
        assert_eq!(form.get(mapper_keys::CLAIM_NAME), "groups");
        assert!(form.flag(mapper_keys::MULTIVALUED));
        assert!(!form.flag(mapper_keys::ID_TOKEN_CLAIM));
    }

    #[test]
    fn test_new_values_restore_to_dotted_keys() {
        let mut form = MapperForm::load(&mapper());
        form.set(mapper_keys::ACCESS_TOKEN_CLAIM, "true");
        form.set(mapper_keys::CLAIM_NAME, "roles");

        let config = form.keys.restore(&form.values);
        assert_eq!(config.get("access.token.claim").map(String::as_str), Some("true"));
        assert_eq!(config.get("claim.name").map(String::as_str), Some("roles"));
    }
}
