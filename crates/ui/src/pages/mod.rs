//! Page Components for the admin console
//!
//! One page per [`Page`](crate::state::Page) variant.
//!
//! ## Available Pages
//!
//! - **ClientsPage**, **CreateClientPage**, **ImportClientPage**,
//!   **ClientDetailsPage** (settings, credentials, roles, client scopes, advanced)
//! - **ClientScopesPage**, **ClientScopeDetailsPage**, **MappingDetailsPage**
//! - **GroupsPage**, **GroupDetailsPage**
//! - **UsersPage**
//! - **RealmRolesPage**, **RoleDetailsPage**
//! - **IdentityProvidersPage**, **AddOidcProviderPage**

pub mod add_oidc_provider;
pub mod client_advanced;
pub mod client_details;
pub mod client_scope_details;
pub mod client_scopes;
pub mod client_scopes_tab;
pub mod clients;
pub mod create_client;
pub mod group_details;
pub mod groups;
pub mod identity_providers;
pub mod import_client;
pub mod mapping_details;
pub mod realm_roles;
pub mod role_details;
pub mod users;

// Re-export page components for convenience
pub use add_oidc_provider::AddOidcProviderPage;
pub use client_details::ClientDetailsPage;
pub use client_scope_details::ClientScopeDetailsPage;
pub use client_scopes::ClientScopesPage;
pub use clients::ClientsPage;
pub use create_client::CreateClientPage;
pub use group_details::GroupDetailsPage;
pub use groups::GroupsPage;
pub use identity_providers::IdentityProvidersPage;
pub use import_client::ImportClientPage;
pub use mapping_details::MappingDetailsPage;
pub use realm_roles::RealmRolesPage;
pub use role_details::RoleDetailsPage;
pub use users::UsersPage;
