//! Console actions against a mocked admin API
//!
//! Each test drives one op end to end and inspects the alerts it reported.

use kc_console_admin::AdminClient;
use kc_console_core::{AlertQueue, AlertVariant, ClientScopeType, ConsoleConfig};
use kc_console_model::client::NO_PUSH_SENT;
use kc_console_model::{
    ClientRepresentation, ClientScopeRow, FormKeyMap, GroupRow, ProtocolMapperRepresentation,
    format_not_before,
};
use kc_console_ui::ops;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> AdminClient {
    let mut config = ConsoleConfig {
        server_url: server.uri(),
        realm: "test".to_string(),
        ..Default::default()
    };
    config.auth.access_token = Some("test-token".to_string());
    AdminClient::new(&config).unwrap()
}

fn new_client(client_id: &str) -> ClientRepresentation {
    ClientRepresentation {
        client_id: Some(client_id.to_string()),
        protocol: Some("openid-connect".to_string()),
        ..Default::default()
    }
}

fn messages(alerts: &AlertQueue) -> Vec<(String, AlertVariant)> {
    alerts
        .alerts()
        .iter()
        .map(|a| (a.message.clone(), a.variant))
        .collect()
}

// ============================================================================
// Clients
// ============================================================================

#[tokio::test]
async fn test_duplicate_client_reports_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/realms/test/clients"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "errorMessage": "Client account already exists" })),
        )
        .mount(&server)
        .await;

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    let created = ops::clients::create_client(&api, &new_client("account"), &mut alerts).await;

    assert_eq!(created, None);
    assert_eq!(
        messages(&alerts),
        vec![(
            "Could not create client: 'Request failed with status code 409: Client account already exists'"
                .to_string(),
            AlertVariant::Danger
        )]
    );
}

#[tokio::test]
async fn test_created_client_is_listed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/realms/test/clients"))
        .and(body_partial_json(json!({ "clientId": "my-app" })))
        .respond_with(ResponseTemplate::new(201).insert_header(
            "Location",
            format!("{}/admin/realms/test/clients/a1b2", server.uri()).as_str(),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/test/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a1b2", "clientId": "my-app", "protocol": "openid-connect" }
        ])))
        .mount(&server)
        .await;

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    let created = ops::clients::create_client(&api, &new_client("my-app"), &mut alerts).await;

    assert_eq!(created.as_deref(), Some("a1b2"));
    assert!(alerts.contains("Client created successfully"));

    let listed = api.list_clients(0, 11, None).await.unwrap();
    assert!(listed.iter().any(|c| c.client_id() == "my-app"));
}

#[tokio::test]
async fn test_deleted_client_leaves_list() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/realms/test/clients/a1b2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    assert!(ops::clients::delete_client(&api, "a1b2", &mut alerts).await);
    assert_eq!(alerts.last().map(|a| a.variant), Some(AlertVariant::Success));

    Mock::given(method("GET"))
        .and(path("/admin/realms/test/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "c9", "clientId": "account", "protocol": "openid-connect" }
        ])))
        .mount(&server)
        .await;

    let listed = api.list_clients(0, 11, None).await.unwrap();
    assert!(listed.iter().all(|c| c.id() != "a1b2"));
}

// ============================================================================
// Advanced Tab
// ============================================================================

#[tokio::test]
async fn test_not_before_set_then_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/test/clients/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    let client = ClientRepresentation {
        id: Some("c1".to_string()),
        ..new_client("my-app")
    };

    let revoked = ops::advanced::set_not_before_now(&api, &client, &mut alerts)
        .await
        .unwrap();
    assert!(revoked.not_before() > 0);
    assert_ne!(format_not_before(revoked.not_before()), "None");

    let cleared = ops::advanced::clear_not_before(&api, &revoked, &mut alerts)
        .await
        .unwrap();
    assert_eq!(cleared.not_before(), 0);
    assert_eq!(format_not_before(cleared.not_before()), "None");

    assert_eq!(
        messages(&alerts),
        vec![
            ("Not Before set for client".to_string(), AlertVariant::Success),
            ("Not Before cleared for client".to_string(), AlertVariant::Success),
        ]
    );
}

#[tokio::test]
async fn test_push_without_targets_warns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/realms/test/clients/c1/push-revocation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "successRequests": [],
            "failedRequests": []
        })))
        .mount(&server)
        .await;

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    ops::advanced::push_revocation(&api, "c1", &mut alerts).await;

    assert_eq!(
        messages(&alerts),
        vec![(NO_PUSH_SENT.to_string(), AlertVariant::Warning)]
    );
}

// ============================================================================
// Mappers
// ============================================================================

#[tokio::test]
async fn test_save_mapper_restores_dotted_keys() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/test/client-scopes/s1/protocol-mappers/models/m1"))
        .and(body_partial_json(json!({
            "config": {
                "claim.name": "realm_roles",
                "access.token.claim": "false"
            }
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = BTreeMap::new();
    config.insert("claim.name".to_string(), "realm_roles".to_string());
    config.insert("access.token.claim".to_string(), "true".to_string());
    let mapper = ProtocolMapperRepresentation {
        id: Some("m1".to_string()),
        name: Some("realm roles".to_string()),
        protocol: Some("openid-connect".to_string()),
        config,
        ..Default::default()
    };

    let (keys, mut form) = FormKeyMap::to_form(&mapper.config);
    assert!(form.keys().all(|k| !k.contains('.')));
    for (key, value) in form.iter_mut() {
        if key.starts_with("access") {
            *value = "false".to_string();
        }
    }

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    assert!(ops::mappers::save_mapper(&api, "s1", &mapper, &form, &keys, &mut alerts).await);
    assert!(alerts.contains("Mapping successfully updated"));
}

// ============================================================================
// Client Scopes
// ============================================================================

fn profile_row() -> ClientScopeRow {
    ClientScopeRow {
        id: "s1".to_string(),
        name: "profile".to_string(),
        kind: ClientScopeType::Default,
        description: String::new(),
    }
}

async fn mount_failed_retype(server: &MockServer, restore_status: u16) {
    Mock::given(method("DELETE"))
        .and(path("/admin/realms/test/clients/c1/default-client-scopes/s1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/test/clients/c1/optional-client-scopes/s1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "errorMessage": "unknown_error" })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/test/clients/c1/default-client-scopes/s1"))
        .respond_with(ResponseTemplate::new(restore_status))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_failed_retype_restores_old_type() {
    let server = MockServer::start().await;
    mount_failed_retype(&server, 204).await;

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    let changed = ops::client_scopes::change_scope_type(
        &api,
        "c1",
        &profile_row(),
        ClientScopeType::Optional,
        &mut alerts,
    )
    .await;

    assert!(!changed);
    assert_eq!(
        messages(&alerts),
        vec![(
            "Could not update scope mapping: 'Request failed with status code 500: unknown_error'"
                .to_string(),
            AlertVariant::Danger
        )]
    );
}

#[tokio::test]
async fn test_unrestored_scope_is_named() {
    let server = MockServer::start().await;
    mount_failed_retype(&server, 503).await;

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    let changed = ops::client_scopes::change_scope_type(
        &api,
        "c1",
        &profile_row(),
        ClientScopeType::Optional,
        &mut alerts,
    )
    .await;

    assert!(!changed);
    assert_eq!(
        messages(&alerts),
        vec![
            (
                "Client scope profile was removed from the client and could not be restored: 'Request failed with status code 503: Service Unavailable'"
                    .to_string(),
                AlertVariant::Danger
            ),
            (
                "Could not update scope mapping: 'Request failed with status code 500: unknown_error'"
                    .to_string(),
                AlertVariant::Danger
            ),
        ]
    );
}

// ============================================================================
// Groups
// ============================================================================

#[tokio::test]
async fn test_delete_groups_reports_each_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/realms/test/groups/g1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/realms/test/groups/g2"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Could not find group" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rows = vec![
        GroupRow {
            id: "g1".to_string(),
            name: "one".to_string(),
            path: "/one".to_string(),
            members: 0,
        },
        GroupRow {
            id: "g2".to_string(),
            name: "two".to_string(),
            path: "/two".to_string(),
            members: 3,
        },
    ];

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    let outcome = ops::groups::delete_groups(&api, &rows, &mut alerts).await;

    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.failed, 1);
    assert_eq!(
        messages(&alerts),
        vec![
            (
                "Error deleting group two: 'Request failed with status code 404: Could not find group'"
                    .to_string(),
                AlertVariant::Danger
            ),
            (
                "Could not delete groups (1 of 2 failed)".to_string(),
                AlertVariant::Danger
            ),
        ]
    );
}

#[tokio::test]
async fn test_delete_single_group() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/realms/test/groups/g1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let rows = vec![GroupRow {
        id: "g1".to_string(),
        name: "one".to_string(),
        path: "/one".to_string(),
        members: 0,
    }];

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    let outcome = ops::groups::delete_groups(&api, &rows, &mut alerts).await;

    assert!(outcome.is_complete());
    assert_eq!(
        messages(&alerts),
        vec![("Group deleted".to_string(), AlertVariant::Success)]
    );
}

#[tokio::test]
async fn test_out_of_range_timeout_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/test/clients/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    let client = ClientRepresentation {
        id: Some("c1".to_string()),
        ..new_client("my-app")
    };

    let saved = ops::advanced::save_node_timeout(&api, &client, u64::MAX, &mut alerts).await;

    assert_eq!(saved, None);
    assert_eq!(
        messages(&alerts),
        vec![(
            format!(
                "Client could not be updated: 'Timeout of {} seconds is out of range'",
                u64::MAX
            ),
            AlertVariant::Danger
        )]
    );
}

#[tokio::test]
async fn test_node_timeout_saved() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/test/clients/c1"))
        .and(body_partial_json(json!({ "nodeReRegistrationTimeout": 3600 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_client(&server);
    let mut alerts = AlertQueue::new();
    let client = ClientRepresentation {
        id: Some("c1".to_string()),
        ..new_client("my-app")
    };

    let saved = ops::advanced::save_node_timeout(&api, &client, 3_600, &mut alerts)
        .await
        .unwrap();
    assert_eq!(saved.node_re_registration_timeout, Some(3_600));
    assert!(alerts.contains("Client successfully updated"));
}
