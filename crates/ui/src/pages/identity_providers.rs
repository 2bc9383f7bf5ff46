//! Identity providers section

use dioxus::prelude::*;
use kc_console_model::IdentityProviderRepresentation;

use crate::components::{
    ButtonVariant, Column, DataTable, EmptyState, Loader, RowAction, SearchMode, ViewHeader,
};
use crate::hooks::{ConfirmDialogConfig, confirm_action, use_admin_client, use_confirm_dialog};
use crate::ops;
use crate::state::{GlobalAlerts, Page, navigate};

fn enabled_text(provider: &IdentityProviderRepresentation) -> String {
    if provider.is_enabled() { "Enabled" } else { "Disabled" }.to_string()
}

#[component]
pub fn IdentityProvidersPage() -> Element {
    let api = use_admin_client();
    let refresh = use_signal(|| 0u64);
    let pending = use_signal(|| None::<IdentityProviderRepresentation>);

    let pending_alias = pending
        .read()
        .as_ref()
        .map(|p| p.alias().to_string())
        .unwrap_or_default();

    let (toggle_delete, delete_dialog) = use_confirm_dialog(ConfirmDialogConfig {
        title: "Delete provider?".into(),
        message: format!(
            "This will permanently delete the provider {}.",
            pending_alias
        ),
        continue_label: "Delete".into(),
        variant: ButtonVariant::Danger,
        on_confirm: confirm_action({
            let api = api.clone();
            move || {
                let api = api.clone();
                let mut refresh = refresh;
                let provider = pending.peek().clone();
                async move {
                    let Some(provider) = provider else {
                        return;
                    };
                    if ops::identity_providers::delete_provider(&api, provider.alias(), &mut GlobalAlerts)
                        .await
                    {
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
            async move { api.list_identity_providers().await }
        })
    });

    let columns = use_hook(|| {
        vec![
            Column::text("alias", "Name", |p: &IdentityProviderRepresentation| {
                p.display_name().to_string()
            }),
            Column::new("providerId", "Provider"),
            Column::text("enabled", "Status", enabled_text),
        ]
    });

    let actions = use_hook(|| {
        vec![RowAction::new("Delete", move |provider: IdentityProviderRepresentation| {
            let mut pending = pending;
            pending.set(Some(provider));
            toggle_delete.toggle();
        })]
    });

    rsx! {
        div {
            class: "identity-providers-page",

            ViewHeader {
                title: "Identity providers".to_string(),
                subtitle: "Identity providers let users sign in to this realm with an account from another service.".to_string(),
            }

            div {
                class: "p-8",
                DataTable {
                    loader,
                    columns,
                    actions,
                    search: SearchMode::local(|p: &IdentityProviderRepresentation| p.alias()),
                    search_placeholder: "Search for provider".to_string(),
                    refresh,
                    toolbar: rsx! {
                        button {
                            class: ButtonVariant::Primary.class(),
                            onclick: move |_| navigate(Page::AddOidcProvider),
                            "Add OpenID Connect provider"
                        }
                    },
                    empty: rsx! {
                        EmptyState {
                            title: "No identity providers".to_string(),
                            message: "Add an identity provider so users can sign in with an existing account.".to_string(),
                            action_label: "Add OpenID Connect provider".to_string(),
                            on_action: move |_| navigate(Page::AddOidcProvider),
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
    fn test_enabled_text() {
        let mut provider = IdentityProviderRepresentation::new_oidc();
        assert_eq!(enabled_text(&provider), "Enabled");
        provider.enabled = Some(false);
        assert_eq!(enabled_text(&provider), "Disabled");
    }
}
