//! Client scopes assigned to one client

use dioxus::prelude::*;
use kc_console_core::ClientScopeType;
use kc_console_model::ClientScopeRow;

use crate::components::{
    ButtonVariant, Column, DataTable, EmptyState, Loader, RowAction, SearchMode, Select,
    SelectOption, or_dash,
};
use crate::hooks::use_admin_client;
use crate::ops;
use crate::state::{APP_STATE, Dialog, GlobalAlerts};

fn type_options() -> Vec<SelectOption> {
    ClientScopeType::all()
        .iter()
        .map(|kind| SelectOption::new(kind.as_str(), kind.display_name()))
        .collect()
}

#[component]
pub fn ClientScopesTab(client_id: String, protocol: String) -> Element {
    let api = use_admin_client();
    let refresh = use_signal(|| 0u64);
    let mut selected = use_signal(Vec::<ClientScopeRow>::new);

    let loader = use_hook(|| {
        let api = api.clone();
        let client_id = client_id.clone();
        Loader::new(move |_, _, _| {
            let api = api.clone();
            let client_id = client_id.clone();
            async move {
                ops::client_scopes::load_client_scopes(&api, &client_id)
                    .await
                    .map(|(rows, _)| rows)
            }
        })
    });

    let columns = use_hook(|| {
        let api = api.clone();
        let client_id = client_id.clone();
        vec![
            Column::text("name", "Assigned client scope", |row: &ClientScopeRow| row.name.clone()),
            Column::render("kind", "Assigned type", move |row: &ClientScopeRow| {
                let api = api.clone();
                let client_id = client_id.clone();
                let row = row.clone();
                rsx! {
                    Select {
                        value: row.kind.as_str().to_string(),
                        options: type_options(),
                        on_change: move |value: String| {
                            let Some(kind) = ClientScopeType::parse(&value) else {
                                return;
                            };
                            let api = api.clone();
                            let client_id = client_id.clone();
                            let row = row.clone();
                            let mut refresh = refresh;
                            spawn(async move {
                                ops::client_scopes::change_scope_type(
                                    &api,
                                    &client_id,
                                    &row,
                                    kind,
                                    &mut GlobalAlerts,
                                )
                                .await;
                                *refresh.write() += 1;
                            });
                        },
                    }
                }
            }),
            Column::text("description", "Description", |row: &ClientScopeRow| {
                or_dash(&row.description)
            }),
        ]
    });

    let actions = use_hook(|| {
        let api = api.clone();
        let client_id = client_id.clone();
        vec![RowAction::new("Remove", move |row: ClientScopeRow| {
            let api = api.clone();
            let client_id = client_id.clone();
            let mut refresh = refresh;
            spawn(async move {
                if ops::client_scopes::remove_client_scope(&api, &client_id, &row, &mut GlobalAlerts)
                    .await
                {
                    *refresh.write() += 1;
                }
            });
        })]
    });

    let change_selected = {
        let api = api.clone();
        let client_id = client_id.clone();
        move |value: String| {
            let Some(kind) = ClientScopeType::parse(&value) else {
                return;
            };
            let rows = selected.read().clone();
            if rows.is_empty() {
                return;
            }
            let api = api.clone();
            let client_id = client_id.clone();
            let mut refresh = refresh;
            spawn(async move {
                ops::client_scopes::change_scope_types(&api, &client_id, &rows, kind, &mut GlobalAlerts)
                    .await;
                *refresh.write() += 1;
            });
        }
    };

    let open_add = {
        let client_id = client_id.clone();
        let protocol = protocol.clone();
        move |_| {
            APP_STATE.write().ui.show_dialog(Dialog::AddClientScope {
                client_id: client_id.clone(),
                protocol: protocol.clone(),
            });
        }
    };
    let open_add_from_empty = open_add.clone();

    rsx! {
        DataTable {
            loader,
            columns,
            actions,
            search: SearchMode::local(|row: &ClientScopeRow| row.name.as_str()),
            search_placeholder: "Search by name".to_string(),
            selectable: true,
            on_selection_change: move |rows: Vec<ClientScopeRow>| selected.set(rows),
            refresh,
            toolbar: rsx! {
                button {
                    class: ButtonVariant::Primary.class(),
                    onclick: move |_: MouseEvent| open_add(()),
                    "Add client scope"
                }
                div {
                    class: "w-44",
                    Select {
                        value: String::new(),
                        placeholder: "Change type".to_string(),
                        options: type_options(),
                        disabled: selected.read().is_empty(),
                        on_change: change_selected,
                    }
                }
            },
            empty: rsx! {
                EmptyState {
                    title: "No client scopes".to_string(),
                    message: "There are no client scopes assigned to this client.".to_string(),
                    action_label: "Add client scope".to_string(),
                    on_action: move |_| open_add_from_empty(()),
                }
            },
        }
    }
}
