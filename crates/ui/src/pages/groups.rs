//! Groups section: top-level groups with member counts

use dioxus::prelude::*;
use kc_console_model::GroupRow;

use crate::components::{
    ButtonVariant, Column, DataTable, EmptyState, Loader, RowAction, SearchMode, ViewHeader,
};
use crate::hooks::{ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog};
use crate::ops;
use crate::state::{APP_STATE, Dialog, GlobalAlerts, Page, navigate};

fn open_create_group() {
    APP_STATE
        .write()
        .ui
        .show_dialog(Dialog::CreateGroup { parent: None });
}

fn delete_title(count: usize) -> String {
    if count == 1 {
        "Delete group?".to_string()
    } else {
        format!("Delete {} groups?", count)
    }
}

#[component]
pub fn GroupsPage() -> Element {
    let api = use_admin_client();
    let refresh = use_signal(|| 0u64);
    let mut selected = use_signal(Vec::<GroupRow>::new);
    // rows the confirm dialog deletes: the selection or a single row action
    let pending = use_signal(Vec::<GroupRow>::new);

    let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: delete_title(pending.read().len()),
        message: "Subgroups and role mappings of the deleted groups are removed as well.".into(),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            move || {
                let api = api.clone();
                let mut refresh = refresh;
                let groups = pending.peek().clone();
                async move {
                    let outcome = ops::groups::delete_groups(&api, &groups, &mut GlobalAlerts).await;
                    if outcome.succeeded > 0 {
                        *refresh.write() += 1;
                    }
                }
            }
        }),
    });

    let loader = use_hook(|| {
        let api = api.clone();
        Loader::new(move |_, _, _| {
            let api = api.clone();
            async move { ops::groups::load_group_rows(&api).await }
        })
    });

    let columns = use_hook(|| {
        vec![
            Column::render("name", "Group name", |row: &GroupRow| {
                let id = row.id.clone();
                let label = row.name.clone();
                rsx! {
                    button {
                        class: "text-indigo-400 hover:text-indigo-300 hover:underline",
                        onclick: move |_| navigate(Page::GroupDetails(id.clone())),
                        "{label}"
                    }
                }
            }),
            Column::text("members", "Members", |row: &GroupRow| row.members.to_string()),
        ]
    });

    let actions = use_hook(|| {
        vec![RowAction::new("Delete", move |row: GroupRow| {
            let mut pending = pending;
            pending.set(vec![row]);
            toggle_delete.toggle();
        })]
    });

    let delete_selected = move |_: MouseEvent| {
        let rows = selected.read().clone();
        if rows.is_empty() {
            return;
        }
        let mut pending = pending;
        pending.set(rows);
        toggle_delete.toggle();
    };

    rsx! {
        div {
            class: "groups-page",

            ViewHeader {
                title: "Groups".to_string(),
                subtitle: "A user group is a set of attributes and role mappings you can apply to a set of users.".to_string(),
            }

            div {
                class: "p-8",
                DataTable {
                    loader,
                    columns,
                    actions,
                    search: SearchMode::local(|row: &GroupRow| row.name.as_str()),
                    search_placeholder: "Search group".to_string(),
                    selectable: true,
                    on_selection_change: move |rows: Vec<GroupRow>| selected.set(rows),
                    refresh,
                    toolbar: rsx! {
                        button {
                            class: ButtonVariant::Primary.class(),
                            onclick: move |_| open_create_group(),
                            "Create group"
                        }
                        button {
                            class: ButtonVariant::Secondary.class(),
                            disabled: selected.read().is_empty(),
                            onclick: delete_selected,
                            "Delete"
                        }
                    },
                    empty: rsx! {
                        EmptyState {
                            title: "No groups in this realm".to_string(),
                            message: "You haven't created any groups in this realm. Create a group to get started.".to_string(),
                            action_label: "Create group".to_string(),
                            on_action: move |_| open_create_group(),
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
    fn test_delete_title_counts_groups() {
        assert_eq!(delete_title(1), "Delete group?");
        assert_eq!(delete_title(3), "Delete 3 groups?");
    }
}
