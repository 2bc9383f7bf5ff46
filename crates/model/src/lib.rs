//! # Console Model
//!
//! Representations exchanged with the admin REST API, plus the pure logic the
//! console applies to them before rendering or submitting:
//!
//! - **Representations**: clients, client scopes, mappers, groups, users,
//!   roles, identity providers and realm-level resources, tolerant of
//!   unknown fields
//! - **Rows**: table projections joined from several responses
//! - **Forms**: invertible transforms between representations and form drafts
//! - **Validation**: `Validatable` impls for submitted drafts
//! - **Filtering**: client-side search over fetched collections

pub mod client;
pub mod client_scope;
pub mod filter;
pub mod form;
pub mod group;
pub mod identity_provider;
pub mod realm;
pub mod role;
pub mod user;
pub mod validation;

pub use client::{
    ClientRepresentation, ClusterAction, CredentialRepresentation, GlobalRequestResult,
    NO_PUSH_SENT,
};
pub use client_scope::{
    ClientScopeRepresentation, ClientScopeRow, MapperRow, ProtocolMapperRepresentation,
    assigned_scope_rows, available_builtin_mappers, mapper_rows, unassigned_scopes,
};
pub use filter::filter_by;
pub use form::{FormKeyMap, KeyValue, TimeValue, format_not_before, format_timestamp};
pub use group::{GroupRepresentation, GroupRow, MemberRow, group_rows, merge_members, non_members};
pub use identity_provider::{IdentityProviderRepresentation, OidcConfiguration, SyncMode};
pub use realm::{
    AuthenticationFlowRepresentation, ClientInstallationRepresentation, ComponentRepresentation,
    ConfigPropertyRepresentation, ProtocolMapperTypeRepresentation, RealmRepresentation,
    ServerInfoRepresentation, WhoAmI, WhoAmIRepresentation, broker_flow_options,
    override_flow_options,
};
pub use role::{RoleRepresentation, sort_roles};
pub use user::{BruteForceStatus, LIST_USERS_LIMIT, UserRepresentation, UserRow, can_list_without_search};
pub use validation::NodeDraft;
