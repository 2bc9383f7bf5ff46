//! Realm roles section

use dioxus::prelude::*;
use kc_console_model::RoleRepresentation;

use crate::components::{
    ButtonVariant, Column, DataTable, EmptyState, Loader, RowAction, SearchMode, ViewHeader,
    or_dash,
};
use crate::hooks::{
    ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog, use_page_size,
};
use crate::ops;
use crate::state::{GlobalAlerts, Page, navigate};

fn composite_text(role: &RoleRepresentation) -> String {
    if role.is_composite() { "True" } else { "False" }.to_string()
}

#[component]
pub fn RealmRolesPage() -> Element {
    let api = use_admin_client();
    let page_size = use_page_size();
    let refresh = use_signal(|| 0u64);
    let pending = use_signal(|| None::<RoleRepresentation>);

    let pending_name = pending
        .read()
        .as_ref()
        .map(|r| r.name().to_string())
        .unwrap_or_default();

    let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: "Delete role?".into(),
        message: format!(
            "This action will permanently delete the role {} and cannot be undone.",
            pending_name
        ),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            move || {
                let api = api.clone();
                let mut refresh = refresh;
                let role = pending.peek().clone();
                async move {
                    let Some(role) = role else {
                        return;
                    };
                    if ops::roles::delete_role(&api, role.id(), &mut GlobalAlerts).await {
                        *refresh.write() += 1;
                    }
                }
            }
        }),
    });

    let loader = use_hook(|| {
        let api = api.clone();
        Loader::new(move |first, max, search: Option<String>| {
            let api = api.clone();
            async move { api.list_roles(first, max, search.as_deref()).await }
        })
    });

    let columns = use_hook(|| {
        vec![
            Column::render("name", "Role name", |role: &RoleRepresentation| {
                let id = role.id().to_string();
                let label = role.name().to_string();
                rsx! {
                    button {
                        class: "text-indigo-400 hover:text-indigo-300 hover:underline",
                        onclick: move |_| navigate(Page::RoleDetails(Some(id.clone()))),
                        "{label}"
                    }
                }
            }),
            Column::text("composite", "Composite", composite_text),
            Column::text("description", "Description", |role: &RoleRepresentation| {
                or_dash(role.description())
            }),
        ]
    });

    let actions = use_hook(|| {
        vec![
            RowAction::new("Edit", |role: RoleRepresentation| {
                navigate(Page::RoleDetails(Some(role.id().to_string())));
            }),
            RowAction::new("Delete", move |role: RoleRepresentation| {
                let mut pending = pending;
                pending.set(Some(role));
                toggle_delete.toggle();
            }),
        ]
    });

    rsx! {
        div {
            class: "realm-roles-page",

            ViewHeader {
                title: "Realm roles".to_string(),
                subtitle: "Realm roles are the roles you define for use in the current realm.".to_string(),
            }

            div {
                class: "p-8",
                DataTable {
                    loader,
                    columns,
                    actions,
                    search: SearchMode::Server,
                    search_placeholder: "Search role by name".to_string(),
                    paginated: true,
                    page_size,
                    refresh,
                    toolbar: rsx! {
                        button {
                            class: ButtonVariant::Primary.class(),
                            onclick: move |_| navigate(Page::RoleDetails(None)),
                            "Create role"
                        }
                    },
                    empty: rsx! {
                        EmptyState {
                            title: "No realm roles".to_string(),
                            message: "You haven't created any realm roles for this realm. Create a realm role to get started.".to_string(),
                            action_label: "Create realm role".to_string(),
                            on_action: move |_| navigate(Page::RoleDetails(None)),
                        }
                    },
                }
            }

            {delete_dialog}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_text() {
        let mut role = RoleRepresentation::default();
        assert_eq!(composite_text(&role), "False");
        role.composite = Some(true);
        assert_eq!(composite_text(&role), "True");
    }
}
