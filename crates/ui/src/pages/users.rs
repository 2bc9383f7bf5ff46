//! Users section
//!
//! Large realms, and realms backed by a user federation provider, are not
//! listed up front: the page asks for a search term first.

use dioxus::prelude::*;
use kc_console_core::ConsoleError;
use kc_console_model::UserRow;

use crate::components::{
    ButtonVariant, Column, DataTable, LoadError, Loader, RowAction, SearchMode, Spinner, TextInput,
    ViewHeader, or_dash,
};
use crate::hooks::{
    ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog, use_page_size,
};
use crate::ops;
use crate::state::GlobalAlerts;

fn status_text(row: &UserRow) -> String {
    or_dash(&row.status_labels().join(", "))
}

/// What the page knows about the realm before it lists anyone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RealmFacts {
    listable: bool,
    brute_force_protected: bool,
}

#[component]
pub fn UsersPage() -> Element {
    let api = use_admin_client();
    let mut initial_search = use_signal(|| None::<String>);
    let mut search_input = use_signal(String::new);

    let facts = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let (listable, realm) =
                    futures::future::try_join(ops::users::users_listable(&api), api.get_realm()).await?;
                Ok::<_, ConsoleError>(RealmFacts {
                    listable,
                    brute_force_protected: realm.is_brute_force_protected(),
                })
            }
        }
    });

    let content = match &*facts.read() {
        None => rsx! { Spinner {} },
        Some(Err(err)) => rsx! { LoadError { message: err.to_string() } },
        Some(Ok(facts)) if !facts.listable && initial_search.read().is_none() => rsx! {
            div {
                class: "max-w-xl mx-auto py-16 text-center space-y-4",
                h3 { class: "text-lg font-medium text-slate-100", "Search for users" }
                p {
                    class: "text-sm text-slate-400",
                    "This realm may have a federated provider or many users. Search for a user by username, email, first or last name."
                }
                TextInput {
                    value: search_input(),
                    placeholder: "Search user (press Enter)".to_string(),
                    on_change: move |value: String| search_input.set(value),
                    on_enter: move |value: String| {
                        let term = value.trim().to_string();
                        if !term.is_empty() {
                            initial_search.set(Some(term));
                        }
                    },
                }
            }
        },
        Some(Ok(facts)) => rsx! {
            UserTable {
                brute_force_protected: facts.brute_force_protected,
                initial_search: initial_search(),
            }
        },
    };

    rsx! {
        div {
            class: "users-page",

            ViewHeader {
                title: "Users".to_string(),
                subtitle: "Users are the people in this realm who can sign in.".to_string(),
            }

            div { class: "p-8", {content} }
        }
    }
}

#[component]
fn UserTable(brute_force_protected: bool, initial_search: Option<String>) -> Element {
    let api = use_admin_client();
    let page_size = use_page_size();
    let refresh = use_signal(|| 0u64);
    let pending = use_signal(|| None::<UserRow>);

    let pending_name = pending
        .read()
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_default();

    let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: format!("Delete user {}?", pending_name),
        message: "The user and all of their sessions will be removed.".into(),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            move || {
                let api = api.clone();
                let mut refresh = refresh;
                let user = pending.peek().clone();
                async move {
                    let Some(user) = user else {
                        return;
                    };
                    if ops::users::delete_user(&api, &user.id, &mut GlobalAlerts).await {
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
            async move {
                ops::users::load_user_rows(&api, first, max, search.as_deref(), brute_force_protected)
                    .await
            }
        })
    });

    let columns = use_hook(|| {
        vec![
            Column::text("username", "Username", |u: &UserRow| u.username.clone()),
            Column::text("email", "Email", |u: &UserRow| or_dash(&u.email)),
            Column::text("lastName", "Last name", |u: &UserRow| or_dash(&u.last_name)),
            Column::text("firstName", "First name", |u: &UserRow| or_dash(&u.first_name)),
            Column::text("status", "Status", status_text),
        ]
    });

    let actions = use_hook(|| {
        vec![RowAction::new("Delete", move |user: UserRow| {
            let mut pending = pending;
            pending.set(Some(user));
            toggle_delete.toggle();
        })]
    });

    rsx! {
        DataTable {
            loader,
            columns,
            actions,
            search: SearchMode::Server,
            search_placeholder: "Search user".to_string(),
            initial_search,
            paginated: true,
            page_size,
            refresh,
            empty: rsx! {
                p { class: "py-10 text-center text-slate-400", "No users found" }
            },
        }

        {delete_dialog}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_console_model::{BruteForceStatus, UserRepresentation};

    #[test]
    fn test_status_text() {
        let mut user = UserRepresentation {
            id: Some("u1".into()),
            username: Some("alice".into()),
            enabled: Some(true),
            ..Default::default()
        };
        assert_eq!(status_text(&UserRow::new(&user, None)), "—");

        user.enabled = Some(false);
        let locked = BruteForceStatus {
            disabled: true,
            ..Default::default()
        };
        assert_eq!(
            status_text(&UserRow::new(&user, Some(&locked))),
            "Disabled, Temporarily disabled"
        );
    }
}
