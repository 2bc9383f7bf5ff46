//! Group details: child groups, members and attributes

use dioxus::prelude::*;
use kc_console_core::ConsoleError;
use kc_console_model::form::{attributes_to_rows, rows_to_attributes};
use kc_console_model::{GroupRepresentation, KeyValue, MemberRow};

use crate::components::{
    ButtonVariant, Checkbox, Column, DataTable, EmptyState, FormSection, KeyValueInput, LoadError,
    Loader, SearchMode, Spinner, Tabs, ViewHeader, or_dash,
};
use crate::hooks::use_admin_client;
use crate::ops;
use crate::state::{APP_STATE, Dialog, GlobalAlerts, Page, navigate};

const TABS: [&str; 3] = ["Child groups", "Members", "Attributes"];

#[component]
pub fn GroupDetailsPage(id: String) -> Element {
    let api = use_admin_client();
    let mut active = use_signal(|| 0usize);
    let data_version = use_memo(|| APP_STATE.read().data_version);

    let mut group = use_resource({
        let api = api.clone();
        let id = id.clone();
        move || {
            let api = api.clone();
            let id = id.clone();
            let _ = data_version();
            async move { api.get_group(&id).await }
        }
    });

    let loaded = match &*group.read() {
        None => return rsx! { Spinner {} },
        Some(Err(err)) => return rsx! { LoadError { message: err.to_string() } },
        Some(Ok(loaded)) => loaded.clone(),
    };

    let body = match active() {
        0 => rsx! { ChildGroups { group_id: id.clone() } },
        1 => rsx! { GroupMembers { group_id: id.clone() } },
        _ => rsx! {
            GroupAttributes { group: loaded.clone(), on_saved: move |_: ()| group.restart() }
        },
    };

    rsx! {
        div {
            class: "group-details-page",

            ViewHeader {
                title: loaded.name().to_string(),
                subtitle: loaded.path.clone().unwrap_or_default(),
            }

            Tabs {
                tabs: TABS.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
                active: active(),
                on_select: move |index: usize| active.set(index),
            }

            div { class: "p-8", {body} }
        }
    }
}

// ============================================================================
// Child Groups
// ============================================================================

#[component]
fn ChildGroups(group_id: String) -> Element {
    let api = use_admin_client();

    let loader = use_hook(|| {
        let api = api.clone();
        let group_id = group_id.clone();
        Loader::new(move |_, _, _| {
            let api = api.clone();
            let group_id = group_id.clone();
            async move {
                let group = api.get_group(&group_id).await?;
                Ok::<_, ConsoleError>(group.sub_groups)
            }
        })
    });

    let columns = use_hook(|| {
        vec![
            Column::render("name", "Group name", |g: &GroupRepresentation| {
                let id = g.id().to_string();
                let label = g.name().to_string();
                rsx! {
                    button {
                        class: "text-indigo-400 hover:text-indigo-300 hover:underline",
                        onclick: move |_| navigate(Page::GroupDetails(id.clone())),
                        "{label}"
                    }
                }
            }),
            Column::text("path", "Path", |g: &GroupRepresentation| {
                or_dash(g.path.as_deref().unwrap_or(""))
            }),
        ]
    });

    let create_child = move |_: ()| {
        APP_STATE.write().ui.show_dialog(Dialog::CreateGroup {
            parent: Some(group_id.clone()),
        });
    };

    rsx! {
        DataTable {
            loader,
            columns,
            search: SearchMode::local(|g: &GroupRepresentation| g.name()),
            search_placeholder: "Search group".to_string(),
            empty: rsx! {
                EmptyState {
                    title: "No child groups".to_string(),
                    message: "This group has no child groups yet.".to_string(),
                    action_label: "Create child group".to_string(),
                    on_action: create_child,
                }
            },
        }
    }
}

// ============================================================================
// Members
// ============================================================================

#[component]
fn GroupMembers(group_id: String) -> Element {
    let api = use_admin_client();
    let mut include_sub_groups = use_signal(|| false);
    let mut refresh = use_signal(|| 0u64);

    let loader = use_hook(|| {
        let api = api.clone();
        let group_id = group_id.clone();
        Loader::new(move |_, _, _| {
            let api = api.clone();
            let group_id = group_id.clone();
            let include = *include_sub_groups.peek();
            async move {
                let group = api.get_group(&group_id).await?;
                ops::groups::load_members(&api, &group, include).await
            }
        })
    });

    let columns = use_hook(|| {
        vec![
            Column::text("username", "Name", |m: &MemberRow| m.username.clone()),
            Column::text("email", "Email", |m: &MemberRow| or_dash(&m.email)),
            Column::text("membership", "Membership", |m: &MemberRow| m.membership.clone()),
        ]
    });

    let add_member = move |_: MouseEvent| {
        APP_STATE.write().ui.show_dialog(Dialog::AddMember {
            group_id: group_id.clone(),
        });
    };

    rsx! {
        DataTable {
            loader,
            columns,
            search: SearchMode::local(|m: &MemberRow| m.username.as_str()),
            search_placeholder: "Search member".to_string(),
            refresh,
            toolbar: rsx! {
                button {
                    class: ButtonVariant::Primary.class(),
                    onclick: add_member,
                    "Add member"
                }
                Checkbox {
                    label: "Include sub-group users".to_string(),
                    checked: include_sub_groups(),
                    on_change: move |on: bool| {
                        include_sub_groups.set(on);
                        *refresh.write() += 1;
                    },
                }
            },
            empty: rsx! {
                p { class: "py-10 text-center text-slate-400", "No members in this group" }
            },
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

#[component]
fn GroupAttributes(group: GroupRepresentation, on_saved: EventHandler<()>) -> Element {
    let api = use_admin_client();
    let initial = attributes_to_rows(group.attributes.as_ref());
    let mut rows = use_signal(|| initial.clone());
    let mut busy = use_signal(|| false);

    let save = {
        let group = group.clone();
        move |_: MouseEvent| {
            if busy() {
                return;
            }
            busy.set(true);
            let api = api.clone();
            let mut updated = group.clone();
            updated.attributes = Some(rows_to_attributes(&rows.read()));
            spawn(async move {
                let ok = ops::groups::save_group(&api, &updated, &mut GlobalAlerts).await;
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
