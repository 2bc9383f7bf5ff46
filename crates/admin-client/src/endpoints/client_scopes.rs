//! `client-scopes` resource and scope protocol mappers

use crate::AdminClient;
use kc_console_core::ConsoleResult;
use kc_console_model::{ClientScopeRepresentation, ProtocolMapperRepresentation};
use urlencoding::encode;

impl AdminClient {
    fn scope_url(&self, id: &str) -> String {
        self.realm_url(&format!("client-scopes/{}", encode(id)))
    }

    fn mapper_url(&self, scope_id: &str, mapper_id: &str) -> String {
        format!(
            "{}/protocol-mappers/models/{}",
            self.scope_url(scope_id),
            encode(mapper_id)
        )
    }

    pub async fn list_client_scopes(&self) -> ConsoleResult<Vec<ClientScopeRepresentation>> {
        self.get(&self.realm_url("client-scopes")).await
    }

    pub async fn get_client_scope(&self, id: &str) -> ConsoleResult<ClientScopeRepresentation> {
        self.get(&self.scope_url(id)).await
    }

    pub async fn create_client_scope(
        &self,
        scope: &ClientScopeRepresentation,
    ) -> ConsoleResult<String> {
        self.create(&self.realm_url("client-scopes"), scope).await
    }

    pub async fn update_client_scope(
        &self,
        id: &str,
        scope: &ClientScopeRepresentation,
    ) -> ConsoleResult<()> {
        self.put(&self.scope_url(id), scope).await
    }

    pub async fn delete_client_scope(&self, id: &str) -> ConsoleResult<()> {
        self.delete(&self.scope_url(id)).await?;
        tracing::info!("Deleted client scope {}", id);
        Ok(())
    }

    // ========================================================================
    // Protocol Mappers
    // ========================================================================

    pub async fn get_protocol_mapper(
        &self,
        scope_id: &str,
        mapper_id: &str,
    ) -> ConsoleResult<ProtocolMapperRepresentation> {
        self.get(&self.mapper_url(scope_id, mapper_id)).await
    }

    pub async fn update_protocol_mapper(
        &self,
        scope_id: &str,
        mapper: &ProtocolMapperRepresentation,
    ) -> ConsoleResult<()> {
        self.put(&self.mapper_url(scope_id, mapper.id()), mapper).await
    }

    pub async fn delete_protocol_mapper(&self, scope_id: &str, mapper_id: &str) -> ConsoleResult<()> {
        self.delete(&self.mapper_url(scope_id, mapper_id)).await
    }

    /// Add predefined mappers to a scope in one call
    pub async fn add_protocol_mappers(
        &self,
        scope_id: &str,
        mappers: &[ProtocolMapperRepresentation],
    ) -> ConsoleResult<()> {
        let url = format!("{}/protocol-mappers/add-models", self.scope_url(scope_id));
        self.post_no_response(&url, &mappers).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use kc_console_model::ProtocolMapperRepresentation;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_update_mapper_keeps_dotted_keys() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/realms/test/client-scopes/s1/protocol-mappers/models/m1"))
            .and(body_json(json!({
                "id": "m1",
                "name": "realm roles",
                "protocol": "openid-connect",
                "protocolMapper": "oidc-usermodel-realm-role-mapper",
                "config": { "claim.name": "realm_access.roles", "multivalued": "true" }
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mapper: ProtocolMapperRepresentation = serde_json::from_value(json!({
            "id": "m1",
            "name": "realm roles",
            "protocol": "openid-connect",
            "protocolMapper": "oidc-usermodel-realm-role-mapper",
            "config": { "claim.name": "realm_access.roles", "multivalued": "true" }
        }))
        .unwrap();

        test_client(&server)
            .update_protocol_mapper("s1", &mapper)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_scope_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/admin/realms/test/client-scopes/gone"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "error": "Could not find client scope" })),
            )
            .mount(&server)
            .await;

        let err = test_client(&server)
            .delete_client_scope("gone")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }
}
