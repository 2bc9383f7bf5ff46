//! `clients` resource and its sub-resources

use crate::AdminClient;
use kc_console_core::{ClientScopeType, ConsoleResult};
use kc_console_model::{
    ClientRepresentation, ClientScopeRepresentation, CredentialRepresentation,
    GlobalRequestResult, RoleRepresentation,
};
use serde_json::json;
use urlencoding::encode;

impl AdminClient {
    fn client_url(&self, id: &str, sub: &str) -> String {
        if sub.is_empty() {
            self.realm_url(&format!("clients/{}", encode(id)))
        } else {
            self.realm_url(&format!("clients/{}/{}", encode(id), sub))
        }
    }

    /// One page of clients; a search term matches client ids by substring
    pub async fn list_clients(
        &self,
        first: usize,
        max: usize,
        search: Option<&str>,
    ) -> ConsoleResult<Vec<ClientRepresentation>> {
        let mut query = vec![("first", first.to_string()), ("max", max.to_string())];
        if let Some(term) = search.filter(|s| !s.is_empty()) {
            query.push(("clientId", term.to_string()));
            query.push(("search", "true".to_string()));
        }
        self.get_query(&self.realm_url("clients"), &query).await
    }

    /// Clients whose client id is exactly `client_id`
    pub async fn find_clients(&self, client_id: &str) -> ConsoleResult<Vec<ClientRepresentation>> {
        self.get_query(
            &self.realm_url("clients"),
            &[("clientId", client_id.to_string())],
        )
        .await
    }

    pub async fn get_client(&self, id: &str) -> ConsoleResult<ClientRepresentation> {
        self.get(&self.client_url(id, "")).await
    }

    /// Create a client, returning its internal id
    pub async fn create_client(&self, client: &ClientRepresentation) -> ConsoleResult<String> {
        let id = self.create(&self.realm_url("clients"), client).await?;
        tracing::info!("Created client '{}' ({})", client.client_id(), id);
        Ok(id)
    }

    pub async fn update_client(&self, id: &str, client: &ClientRepresentation) -> ConsoleResult<()> {
        self.put(&self.client_url(id, ""), client).await
    }

    pub async fn delete_client(&self, id: &str) -> ConsoleResult<()> {
        self.delete(&self.client_url(id, "")).await?;
        tracing::info!("Deleted client {}", id);
        Ok(())
    }

    pub async fn client_roles(&self, id: &str) -> ConsoleResult<Vec<RoleRepresentation>> {
        self.get(&self.client_url(id, "roles")).await
    }

    // ========================================================================
    // Client Scopes
    // ========================================================================

    /// Scopes attached to a client as `kind`
    pub async fn client_scopes_of(
        &self,
        id: &str,
        kind: ClientScopeType,
    ) -> ConsoleResult<Vec<ClientScopeRepresentation>> {
        self.get(&self.client_url(id, kind.collection())).await
    }

    pub async fn add_client_scope(
        &self,
        id: &str,
        scope_id: &str,
        kind: ClientScopeType,
    ) -> ConsoleResult<()> {
        let sub = format!("{}/{}", kind.collection(), encode(scope_id));
        self.put_empty(&self.client_url(id, &sub)).await
    }

    pub async fn remove_client_scope(
        &self,
        id: &str,
        scope_id: &str,
        kind: ClientScopeType,
    ) -> ConsoleResult<()> {
        let sub = format!("{}/{}", kind.collection(), encode(scope_id));
        self.delete(&self.client_url(id, &sub)).await
    }

    // ========================================================================
    // Revocation & Clustering
    // ========================================================================

    pub async fn push_revocation(&self, id: &str) -> ConsoleResult<GlobalRequestResult> {
        self.post_empty(&self.client_url(id, "push-revocation")).await
    }

    pub async fn test_nodes_available(&self, id: &str) -> ConsoleResult<GlobalRequestResult> {
        self.get(&self.client_url(id, "test-nodes-available")).await
    }

    pub async fn register_node(&self, id: &str, host: &str) -> ConsoleResult<()> {
        self.post_no_response(&self.client_url(id, "nodes"), &json!({ "node": host }))
            .await
    }

    pub async fn delete_node(&self, id: &str, host: &str) -> ConsoleResult<()> {
        self.delete(&self.client_url(id, &format!("nodes/{}", encode(host))))
            .await
    }

    // ========================================================================
    // Credentials & Installation
    // ========================================================================

    pub async fn client_secret(&self, id: &str) -> ConsoleResult<CredentialRepresentation> {
        self.get(&self.client_url(id, "client-secret")).await
    }

    pub async fn regenerate_client_secret(
        &self,
        id: &str,
    ) -> ConsoleResult<CredentialRepresentation> {
        self.post_empty(&self.client_url(id, "client-secret")).await
    }

    /// Adapter configuration rendered by an installation provider
    pub async fn client_installation(&self, id: &str, provider: &str) -> ConsoleResult<String> {
        let sub = format!("installation/providers/{}", encode(provider));
        self.get_text(&self.client_url(id, &sub)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use kc_console_core::ClientScopeType;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_clients_with_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/test/clients"))
            .and(query_param("first", "0"))
            .and(query_param("max", "11"))
            .and(query_param("clientId", "acc"))
            .and(query_param("search", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "1", "clientId": "account", "protocol": "openid-connect" }
            ])))
            .mount(&server)
            .await;

        let clients = test_client(&server)
            .list_clients(0, 11, Some("acc"))
            .await
            .unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].client_id(), "account");
    }

    #[tokio::test]
    async fn test_scope_type_paths() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/realms/test/clients/c1/optional-client-scopes/s1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/admin/realms/test/clients/c1/default-client-scopes/s1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .remove_client_scope("c1", "s1", ClientScopeType::Default)
            .await
            .unwrap();
        client
            .add_client_scope("c1", "s1", ClientScopeType::Optional)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_node() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/realms/test/clients/c1/nodes"))
            .and(body_json(json!({ "node": "10.0.0.7" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .register_node("c1", "10.0.0.7")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_push_revocation_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/realms/test/clients/c1/push-revocation"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "successRequests": ["http://app:8080/admin"],
                "failedRequests": []
            })))
            .mount(&server)
            .await;

        let result = test_client(&server).push_revocation("c1").await.unwrap();
        assert_eq!(result.successes(), ["http://app:8080/admin".to_string()]);
        assert!(result.failures().is_empty());
    }
}
