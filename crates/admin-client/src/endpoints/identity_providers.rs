//! Realm `identity-provider/instances` and provider discovery

use crate::AdminClient;
use kc_console_core::{ConsoleError, ConsoleResult};
use kc_console_model::identity_provider::NO_VALID_METADATA;
use kc_console_model::{IdentityProviderRepresentation, OidcConfiguration};
use urlencoding::encode;

impl AdminClient {
    fn identity_provider_url(&self, alias: &str) -> String {
        self.realm_url(&format!("identity-provider/instances/{}", encode(alias)))
    }

    pub async fn list_identity_providers(&self) -> ConsoleResult<Vec<IdentityProviderRepresentation>> {
        self.get(&self.realm_url("identity-provider/instances")).await
    }

    /// Create a provider; returns its alias
    pub async fn create_identity_provider(
        &self,
        provider: &IdentityProviderRepresentation,
    ) -> ConsoleResult<String> {
        let alias = self
            .create(&self.realm_url("identity-provider/instances"), provider)
            .await?;
        tracing::info!("Created identity provider '{}'", alias);
        Ok(alias)
    }

    pub async fn delete_identity_provider(&self, alias: &str) -> ConsoleResult<()> {
        self.delete(&self.identity_provider_url(alias)).await?;
        tracing::info!("Deleted identity provider {}", alias);
        Ok(())
    }

    /// Fetch and check an OpenID Connect discovery document
    ///
    /// The document lives on the provider, not on the admin API, so the
    /// admin token is not sent along.
    pub async fn discover_oidc(&self, url: &str) -> ConsoleResult<OidcConfiguration> {
        let metadata: OidcConfiguration = self.get_public(url.trim()).await?;
        if !metadata.is_valid() {
            return Err(ConsoleError::validation(NO_VALID_METADATA));
        }
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use kc_console_model::IdentityProviderRepresentation;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_returns_alias() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/realms/test/identity-provider/instances"))
            .and(body_partial_json(json!({ "alias": "oidc", "providerId": "oidc" })))
            .respond_with(ResponseTemplate::new(201).insert_header(
                "Location",
                format!("{}/admin/realms/test/identity-provider/instances/oidc", server.uri()).as_str(),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_client(&server);
        let alias = api
            .create_identity_provider(&IdentityProviderRepresentation::new_oidc())
            .await
            .unwrap();
        assert_eq!(alias, "oidc");
    }

    #[tokio::test]
    async fn test_discovery_sends_no_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/realms/partner/.well-known/openid-configuration"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/realms/partner/.well-known/openid-configuration"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "issuer": "https://idp/realms/partner",
                "authorization_endpoint": "https://idp/auth",
                "token_endpoint": "https://idp/token"
            })))
            .mount(&server)
            .await;

        let api = test_client(&server);
        let url = format!("{}/realms/partner/.well-known/openid-configuration", server.uri());
        let metadata = api.discover_oidc(&url).await.unwrap();
        assert_eq!(metadata.token_endpoint.as_deref(), Some("https://idp/token"));
    }

    #[tokio::test]
    async fn test_discovery_rejects_documents_without_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/openid-configuration"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issuer": "x" })))
            .mount(&server)
            .await;

        let api = test_client(&server);
        let url = format!("{}/.well-known/openid-configuration", server.uri());
        let err = api.discover_oidc(&url).await.unwrap_err();
        assert!(err.to_string().contains("No valid metadata"));
    }
}
