//! Realm role form: create a role, or edit one with its attributes

use dioxus::prelude::*;
use kc_console_core::{FieldErrors, Validatable};
use kc_console_model::form::{attributes_to_rows, rows_to_attributes};
use kc_console_model::{KeyValue, RoleRepresentation};

use crate::components::{
    ButtonVariant, FormSection, KeyValueInput, LoadError, Spinner, Tabs, TextArea, TextInput,
    ViewHeader,
};
use crate::hooks::{ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog};
use crate::ops;
use crate::state::{GlobalAlerts, Page, navigate};

#[component]
pub fn RoleDetailsPage(id: Option<String>) -> Element {
    match id {
        None => rsx! {
            div {
                class: "role-details-page",
                ViewHeader { title: "Create role".to_string() }
                div {
                    class: "p-8",
                    RoleForm { role: RoleRepresentation::default() }
                }
            }
        },
        Some(id) => rsx! { RoleEditor { id } },
    }
}

#[component]
fn RoleEditor(id: String) -> Element {
    let api = use_admin_client();
    let mut active = use_signal(|| 0usize);

    let mut role = use_resource({
        let api = api.clone();
        let id = id.clone();
        move || {
            let api = api.clone();
            let id = id.clone();
            async move { api.get_role(&id).await }
        }
    });

    let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: "Delete role?".into(),
        message: "This action will permanently delete the role and cannot be undone.".into(),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            let id = id.clone();
            move || {
                let api = api.clone();
                let id = id.clone();
                async move {
                    if ops::roles::delete_role(&api, &id, &mut GlobalAlerts).await {
                        navigate(Page::RealmRoles);
                    }
                }
            }
        }),
    });

    let loaded = match &*role.read() {
        None => return rsx! { Spinner {} },
        Some(Err(err)) => return rsx! { LoadError { message: err.to_string() } },
        Some(Ok(loaded)) => loaded.clone(),
    };

    let body = if active() == 0 {
        rsx! { RoleForm { role: loaded.clone(), on_saved: move |_: ()| role.restart() } }
    } else {
        rsx! { RoleAttributes { role: loaded.clone(), on_saved: move |_: ()| role.restart() } }
    };

    rsx! {
        div {
            class: "role-details-page",

            ViewHeader {
                title: loaded.name().to_string(),
                badge: if loaded.is_composite() { Some("Composite".to_string()) } else { None },
                actions: rsx! {
                    button {
                        class: ButtonVariant::Danger.class(),
                        onclick: move |_| toggle_delete.toggle(),
                        "Delete"
                    }
                },
            }

            Tabs {
                tabs: vec!["Details".to_string(), "Attributes".to_string()],
                active: active(),
                on_select: move |index: usize| active.set(index),
            }

            div { class: "p-8", {body} }

            {delete_dialog}
        }
    }
}

/// Name and description; a role without id is created on save
#[component]
fn RoleForm(role: RoleRepresentation, #[props(default)] on_saved: EventHandler<()>) -> Element {
    let api = use_admin_client();
    let creating = role.id.is_none();
    let mut draft = use_signal(|| role.clone());
    let mut errors = use_signal(FieldErrors::new);
    let mut busy = use_signal(|| false);

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
            if creating {
                let created = ops::roles::create_role(&api, &current, &mut GlobalAlerts).await;
                busy.set(false);
                if let Some(created) = created {
                    navigate(Page::RoleDetails(Some(created.id().to_string())));
                }
            } else {
                let ok = ops::roles::save_role(&api, &current, &mut GlobalAlerts).await;
                busy.set(false);
                if ok {
                    on_saved.call(());
                }
            }
        });
    };

    let current = draft.read().clone();

    rsx! {
        FormSection {
            title: "Role details".to_string(),
            TextInput {
                value: current.name.clone().unwrap_or_default(),
                label: "Role name".to_string(),
                required: true,
                readonly: !creating,
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
        }

        div {
            class: "flex gap-3",
            button {
                r#type: "button",
                class: ButtonVariant::Primary.class(),
                disabled: busy(),
                onclick: save,
                if creating { "Create" } else { "Save" }
            }
            button {
                r#type: "button",
                class: ButtonVariant::Link.class(),
                onclick: move |_| {
                    if creating {
                        navigate(Page::RealmRoles);
                    } else {
                        errors.set(FieldErrors::new());
                        draft.set(role.clone());
                    }
                },
                if creating { "Cancel" } else { "Revert" }
            }
        }
    }
}

#[component]
fn RoleAttributes(role: RoleRepresentation, on_saved: EventHandler<()>) -> Element {
    let api = use_admin_client();
    let initial = attributes_to_rows(role.attributes.as_ref());
    let mut rows = use_signal(|| initial.clone());
    let mut busy = use_signal(|| false);

    let save = {
        let role = role.clone();
        move |_: MouseEvent| {
            if busy() {
                return;
            }
            busy.set(true);
            let api = api.clone();
            let mut updated = role.clone();
            updated.attributes = Some(rows_to_attributes(&rows.read()));
            spawn(async move {
                let ok = ops::roles::save_role(&api, &updated, &mut GlobalAlerts).await;
                busy.set(false);
                if ok {
                    on_saved.call(());
                }
            });
        }
    };

    rsx! {
        FormSection {
            title: "Attributes".to_string(),
            KeyValueInput {
                rows: rows(),
                on_change: move |next: Vec<KeyValue>| rows.set(next),
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
                onclick: move |_| rows.set(initial.clone()),
                "Revert"
            }
        }
    }
}
