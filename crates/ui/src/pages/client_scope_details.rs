//! Client scope details: settings form and protocol mappers

use dioxus::prelude::*;
use kc_console_core::{ConsoleError, FieldErrors, Protocol, Validatable};
use kc_console_model::client_scope::{
    ATTR_CONSENT_TEXT, ATTR_DISPLAY_ON_CONSENT, ATTR_INCLUDE_IN_TOKEN_SCOPE,
};
use kc_console_model::{
    ClientScopeRepresentation, MapperRow, ProtocolMapperRepresentation,
    available_builtin_mappers, mapper_rows,
};
use std::collections::BTreeSet;

use crate::components::{
    ButtonVariant, Checkbox, Column, DataTable, EmptyState, FormSection, LoadError, Loader, Modal,
    RowAction, SearchMode, Spinner, Switch, Tabs, TextArea, TextInput, ViewHeader,
};
use crate::hooks::use_admin_client;
use crate::ops;
use crate::state::{APP_STATE, GlobalAlerts, Page, navigate};

#[component]
pub fn ClientScopeDetailsPage(id: String) -> Element {
    let api = use_admin_client();
    let mut draft = use_signal(ClientScopeRepresentation::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut active = use_signal(|| 0usize);
    let mut busy = use_signal(|| false);

    let mut scope = use_resource({
        let api = api.clone();
        let id = id.clone();
        move || {
            let api = api.clone();
            let id = id.clone();
            async move {
                let scope = api.get_client_scope(&id).await?;
                draft.set(scope.clone());
                Ok::<_, ConsoleError>(scope)
            }
        }
    });

    let save = move |_: MouseEvent| {
        let current = draft.read().clone();
        if let Err(field_errors) = current.validate() {
            errors.set(field_errors);
            return;
        }
        if busy() {
            return;
        }
        busy.set(true);
        let api = api.clone();
        spawn(async move {
            let ok = ops::client_scopes::save_client_scope(&api, &current, &mut GlobalAlerts).await;
            busy.set(false);
            if ok {
                scope.restart();
            }
        });
    };

    let saved = match &*scope.read() {
        None => return rsx! { Spinner {} },
        Some(Err(err)) => return rsx! { LoadError { message: err.to_string() } },
        Some(Ok(saved)) => saved.clone(),
    };

    let current = draft.read().clone();
    let protocol_label = Protocol::parse(current.protocol())
        .map(|p| p.display_name().to_string())
        .unwrap_or_else(|| current.protocol().to_string());
    let display_on_consent = current.display_on_consent();

    let body = if active() == 0 {
        rsx! {
            FormSection {
                title: "Settings".to_string(),
                TextInput {
                    value: current.name.clone().unwrap_or_default(),
                    label: "Name".to_string(),
                    required: true,
                    error: errors.read().message("name"),
                    on_change: move |value: String| {
                        draft.write().name = Some(value);
                        errors.set(FieldErrors::new());
                    },
                }
                TextArea {
                    value: current.description.clone().unwrap_or_default(),
                    label: "Description".to_string(),
                    error: errors.read().message("description"),
                    on_change: move |value: String| {
                        draft.write().description = Some(value);
                        errors.set(FieldErrors::new());
                    },
                }
                TextInput {
                    value: protocol_label,
                    label: "Protocol".to_string(),
                    readonly: true,
                }
                Switch {
                    label: "Display on consent screen".to_string(),
                    checked: display_on_consent,
                    on_change: move |on: bool| {
                        draft.write().set_attribute(ATTR_DISPLAY_ON_CONSENT, on.to_string());
                    },
                }
                if display_on_consent {
                    TextArea {
                        value: current.attribute(ATTR_CONSENT_TEXT).unwrap_or_default().to_string(),
                        label: "Consent screen text".to_string(),
                        on_change: move |value: String| {
                            draft.write().set_attribute(ATTR_CONSENT_TEXT, value);
                        },
                    }
                }
                Switch {
                    label: "Include in token scope".to_string(),
                    checked: current.attribute(ATTR_INCLUDE_IN_TOKEN_SCOPE) != Some("false"),
                    on_change: move |on: bool| {
                        draft.write().set_attribute(ATTR_INCLUDE_IN_TOKEN_SCOPE, on.to_string());
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
                    "Save"
                }
                button {
                    r#type: "button",
                    class: ButtonVariant::Link.class(),
                    onclick: move |_| {
                        errors.set(FieldErrors::new());
                        draft.set(saved.clone());
                    },
                    "Revert"
                }
            }
        }
    } else {
        rsx! {
            MapperList { scope_id: id.clone(), protocol: current.protocol().to_string() }
        }
    };

    rsx! {
        div {
            class: "client-scope-details-page",

            ViewHeader {
                title: current.name().to_string(),
                badge: "Client scope".to_string(),
            }

            Tabs {
                tabs: vec!["Settings".to_string(), "Mappers".to_string()],
                active: active(),
                on_select: move |index: usize| active.set(index),
            }

            div { class: "p-8", {body} }
        }
    }
}

// ============================================================================
// Mappers
// ============================================================================

#[component]
fn MapperList(scope_id: String, protocol: String) -> Element {
    let api = use_admin_client();
    let refresh = use_signal(|| 0u64);
    let mut picking = use_signal(|| false);
    let existing = use_signal(Vec::<ProtocolMapperRepresentation>::new);

    let loader = use_hook(|| {
        let api = api.clone();
        let scope_id = scope_id.clone();
        let protocol = protocol.clone();
        Loader::new(move |_, _, _| {
            let api = api.clone();
            let scope_id = scope_id.clone();
            let protocol = protocol.clone();
            let mut existing = existing;
            async move {
                let scope = api.get_client_scope(&scope_id).await?;
                existing.set(scope.mappers().to_vec());
                let state = APP_STATE.peek();
                let types = state
                    .server_info
                    .as_ref()
                    .map(|info| info.mapper_types(&protocol))
                    .unwrap_or(&[]);
                Ok::<_, ConsoleError>(mapper_rows(scope.mappers(), types))
            }
        })
    });

    let columns = use_hook(|| {
        let scope_id = scope_id.clone();
        vec![
            Column::render("name", "Name", move |row: &MapperRow| {
                let page = Page::MappingDetails {
                    scope_id: scope_id.clone(),
                    mapper_id: row.id.clone(),
                };
                let label = row.name.clone();
                rsx! {
                    button {
                        class: "text-indigo-400 hover:text-indigo-300 hover:underline",
                        onclick: move |_| navigate(page.clone()),
                        "{label}"
                    }
                }
            }),
            Column::text("category", "Category", |row: &MapperRow| row.category.clone()),
            Column::text("type", "Type", |row: &MapperRow| row.type_name.clone()),
            Column::text("priority", "Priority", |row: &MapperRow| row.priority.to_string()),
        ]
    });

    let actions = use_hook(|| {
        let api = api.clone();
        let scope_id = scope_id.clone();
        vec![RowAction::new("Delete", move |row: MapperRow| {
            let api = api.clone();
            let scope_id = scope_id.clone();
            let mut refresh = refresh;
            spawn(async move {
                if ops::mappers::delete_mapper(&api, &scope_id, &row.id, &mut GlobalAlerts).await {
                    *refresh.write() += 1;
                }
            });
        })]
    });

    let builtin = APP_STATE
        .read()
        .server_info
        .as_ref()
        .map(|info| available_builtin_mappers(info.builtin_mappers(&protocol), &existing.read()))
        .unwrap_or_default();

    rsx! {
        DataTable {
            loader,
            columns,
            actions,
            search: SearchMode::local(|row: &MapperRow| row.name.as_str()),
            search_placeholder: "Search for mapper".to_string(),
            refresh,
            toolbar: rsx! {
                button {
                    class: ButtonVariant::Primary.class(),
                    onclick: move |_| picking.set(true),
                    "Add predefined mapper"
                }
            },
            empty: rsx! {
                EmptyState {
                    title: "No mappers".to_string(),
                    message: "If you want to add mappers, please click the button below to add some predefined mappers.".to_string(),
                    action_label: "Add predefined mapper".to_string(),
                    on_action: move |_| picking.set(true),
                }
            },
        }

        if picking() {
            BuiltinMapperPicker {
                scope_id: scope_id.clone(),
                mappers: builtin,
                on_close: move |added: bool| {
                    picking.set(false);
                    if added {
                        let mut refresh = refresh;
                        *refresh.write() += 1;
                    }
                },
            }
        }
    }
}

/// Predefined mappers of the protocol not yet on the scope
#[component]
fn BuiltinMapperPicker(
    scope_id: String,
    mappers: Vec<ProtocolMapperRepresentation>,
    on_close: EventHandler<bool>,
) -> Element {
    let api = use_admin_client();
    let mut selected = use_signal(BTreeSet::<String>::new);
    let mut busy = use_signal(|| false);

    let add = {
        let mappers = mappers.clone();
        move |_: MouseEvent| {
            let picked: Vec<ProtocolMapperRepresentation> = mappers
                .iter()
                .filter(|m| selected.read().contains(m.name()))
                .cloned()
                .collect();
            if busy() || picked.is_empty() {
                return;
            }
            busy.set(true);
            let api = api.clone();
            let scope_id = scope_id.clone();
            spawn(async move {
                let added = ops::mappers::add_builtin_mappers(&api, &scope_id, &picked, &mut GlobalAlerts).await;
                busy.set(false);
                if added {
                    on_close.call(true);
                }
            });
        }
    };

    rsx! {
        Modal {
            title: "Add predefined mappers".to_string(),
            width: "max-w-2xl".to_string(),
            on_close: move |_| on_close.call(false),

            div {
                class: "max-h-96 overflow-y-auto mb-6 space-y-2",
                if mappers.is_empty() {
                    p { class: "py-6 text-center text-slate-400", "All predefined mappers are already added" }
                }
                for mapper in mappers.iter().cloned() {
                    Checkbox {
                        key: "{mapper.name()}",
                        label: mapper.name().to_string(),
                        checked: selected.read().contains(mapper.name()),
                        on_change: {
                            let name = mapper.name().to_string();
                            move |_| {
                                let mut set = selected.write();
                                if !set.remove(&name) {
                                    set.insert(name.clone());
                                }
                            }
                        },
                    }
                }
            }

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
                    onclick: move |_| on_close.call(false),
                    "Cancel"
                }
            }
        }
    }
}
