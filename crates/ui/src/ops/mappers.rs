//! Protocol mappers of a client scope

use super::report;
use kc_console_admin::AdminClient;
use kc_console_core::Notify;
use kc_console_model::{FormKeyMap, ProtocolMapperRepresentation};
use std::collections::BTreeMap;

/// Add predefined mappers to a scope
pub async fn add_builtin_mappers(
    api: &AdminClient,
    scope_id: &str,
    mappers: &[ProtocolMapperRepresentation],
    alerts: &mut impl Notify,
) -> bool {
    if mappers.is_empty() {
        return false;
    }
    report(
        api.add_protocol_mappers(scope_id, mappers).await,
        "Mapping successfully created",
        "Could not create mapping:",
        alerts,
    )
    .is_some()
}

/// Save a mapper edited through its form
///
/// `form` holds the config under form-safe keys; `keys` restores the original
/// dotted keys before the mapper is sent.
pub async fn save_mapper(
    api: &AdminClient,
    scope_id: &str,
    mapper: &ProtocolMapperRepresentation,
    form: &BTreeMap<String, String>,
    keys: &FormKeyMap,
    alerts: &mut impl Notify,
) -> bool {
    let mut updated = mapper.clone();
    updated.config = keys.restore(form);
    report(
        api.update_protocol_mapper(scope_id, &updated).await,
        "Mapping successfully updated",
        "Could not update mapping:",
        alerts,
    )
    .is_some()
}

pub async fn delete_mapper(
    api: &AdminClient,
    scope_id: &str,
    mapper_id: &str,
    alerts: &mut impl Notify,
) -> bool {
    report(
        api.delete_protocol_mapper(scope_id, mapper_id).await,
        "Mapping successfully deleted",
        "Could not delete mapping:",
        alerts,
    )
    .is_some()
}
