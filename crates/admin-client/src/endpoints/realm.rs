//! Realm-level reads: the realm, its components and flows, server info and
//! the signed-in admin

use crate::AdminClient;
use kc_console_core::ConsoleResult;
use kc_console_model::realm::USER_STORAGE_PROVIDER;
use kc_console_model::{
    AuthenticationFlowRepresentation, ComponentRepresentation, RealmRepresentation,
    ServerInfoRepresentation, WhoAmIRepresentation,
};
use urlencoding::encode;

impl AdminClient {
    pub async fn get_realm(&self) -> ConsoleResult<RealmRepresentation> {
        self.get(&self.realm_url("")).await
    }

    /// Components of the given provider type
    pub async fn components(&self, provider_type: &str) -> ConsoleResult<Vec<ComponentRepresentation>> {
        self.get_query(
            &self.realm_url("components"),
            &[("type", provider_type.to_string())],
        )
        .await
    }

    /// User federation providers configured in the realm
    pub async fn user_federation_providers(&self) -> ConsoleResult<Vec<ComponentRepresentation>> {
        self.components(USER_STORAGE_PROVIDER).await
    }

    pub async fn authentication_flows(&self) -> ConsoleResult<Vec<AuthenticationFlowRepresentation>> {
        self.get(&self.realm_url("authentication/flows")).await
    }

    pub async fn server_info(&self) -> ConsoleResult<ServerInfoRepresentation> {
        self.get(&self.admin_url("serverinfo")).await
    }

    /// The signed-in admin, as seen from their own realm
    pub async fn whoami(&self) -> ConsoleResult<WhoAmIRepresentation> {
        let path = format!("{}/console/whoami", encode(self.auth_realm()));
        self.get(&self.admin_url(&path)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_federation_providers_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/test/components"))
            .and(query_param("type", "org.keycloak.storage.UserStorageProvider"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "ldap", "name": "ldap", "providerId": "ldap" }
            ])))
            .mount(&server)
            .await;

        let providers = test_client(&server)
            .user_federation_providers()
            .await
            .unwrap();
        assert_eq!(providers.len(), 1);
    }

    #[tokio::test]
    async fn test_realm_and_whoami() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "test",
                "realm": "test",
                "bruteForceProtected": true,
                "sslRequired": "external"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/master/console/whoami"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": "u1",
                "realm": "master",
                "displayName": "admin",
                "createRealm": true,
                "realm_access": { "test": ["manage-clients"] }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(client.get_realm().await.unwrap().is_brute_force_protected());
        let me = client.whoami().await.unwrap();
        assert_eq!(me.display_name, "admin");
        assert!(me.create_realm);
    }
}
