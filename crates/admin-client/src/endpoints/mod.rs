//! Endpoint groups, one `impl AdminClient` block per admin resource

mod client_scopes;
mod clients;
mod groups;
mod identity_providers;
mod realm;
mod roles;
mod users;
