//! HTTP plumbing shared by every endpoint group
//!
//! `AdminClient` is cheap to clone: clones share one connection pool and one
//! token cache.

use crate::auth::TokenCache;
use kc_console_core::{AuthConfig, ConsoleConfig, ConsoleError, ConsoleResult};
use reqwest::header::LOCATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Handle on the admin REST API of one realm
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    server_url: String,
    realm: String,
    auth: AuthConfig,
    tokens: TokenCache,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("server_url", &self.inner.server_url)
            .field("realm", &self.inner.realm)
            .finish_non_exhaustive()
    }
}

impl PartialEq for AdminClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl AdminClient {
    /// Build a client from the console configuration
    pub fn new(config: &ConsoleConfig) -> ConsoleResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(transport)?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                server_url: config.server_url.trim_end_matches('/').to_string(),
                realm: config.realm.clone(),
                auth: config.auth.clone(),
                tokens: TokenCache::default(),
            }),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.inner.server_url
    }

    /// Realm all realm-scoped calls are made against
    pub fn realm(&self) -> &str {
        &self.inner.realm
    }

    /// Realm the signed-in admin belongs to
    pub fn auth_realm(&self) -> &str {
        &self.inner.auth.realm
    }

    // ========================================================================
    // URLs
    // ========================================================================

    /// `{server}/admin/realms/{realm}/{path}`; an empty path is the realm itself
    pub fn realm_url(&self, path: &str) -> String {
        let base = format!(
            "{}/admin/realms/{}",
            self.inner.server_url,
            urlencoding::encode(&self.inner.realm)
        );
        if path.is_empty() {
            base
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        }
    }

    /// `{server}/admin/{path}`
    pub fn admin_url(&self, path: &str) -> String {
        format!("{}/admin/{}", self.inner.server_url, path.trim_start_matches('/'))
    }

    fn token_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.inner.server_url,
            urlencoding::encode(&self.inner.auth.realm)
        )
    }

    // ========================================================================
    // Requests
    // ========================================================================

    async fn request(&self, method: Method, url: &str) -> ConsoleResult<RequestBuilder> {
        let token = self
            .inner
            .tokens
            .token(&self.inner.http, &self.token_url(), &self.inner.auth)
            .await?;
        tracing::debug!("{} {}", method, url);
        Ok(self.inner.http.request(method, url).bearer_auth(token))
    }

    /// GET a JSON document
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ConsoleResult<T> {
        self.get_query(url, &[]).await
    }

    /// GET a JSON document with query parameters
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> ConsoleResult<T> {
        let response = self
            .request(Method::GET, url)
            .await?
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        handle_response(response).await
    }

    /// GET a JSON document from outside the admin API; no token is sent
    pub async fn get_public<T: DeserializeOwned>(&self, url: &str) -> ConsoleResult<T> {
        tracing::debug!("GET {} (no token)", url);
        let response = self.inner.http.get(url).send().await.map_err(transport)?;
        handle_response(response).await
    }

    /// GET a body as text, whatever its media type
    pub async fn get_text(&self, url: &str) -> ConsoleResult<String> {
        let response = self
            .request(Method::GET, url)
            .await?
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response).await?;
        response.text().await.map_err(transport)
    }

    /// POST a JSON body and return the id from the `Location` header
    pub async fn create<B: Serialize>(&self, url: &str, body: &B) -> ConsoleResult<String> {
        let response = self
            .request(Method::POST, url)
            .await?
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response).await?;
        location_id(&response).ok_or_else(|| {
            ConsoleError::internal(format!("no Location header in response from {}", url))
        })
    }

    /// POST a JSON body and decode the JSON answer
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ConsoleResult<T> {
        let response = self
            .request(Method::POST, url)
            .await?
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        handle_response(response).await
    }

    /// POST without a body and decode the JSON answer
    pub async fn post_empty<T: DeserializeOwned>(&self, url: &str) -> ConsoleResult<T> {
        let response = self
            .request(Method::POST, url)
            .await?
            .send()
            .await
            .map_err(transport)?;
        handle_response(response).await
    }

    /// POST a JSON body, ignoring any answer
    pub async fn post_no_response<B: Serialize>(&self, url: &str, body: &B) -> ConsoleResult<()> {
        let response = self
            .request(Method::POST, url)
            .await?
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await.map(drop)
    }

    /// PUT a JSON body
    pub async fn put<B: Serialize>(&self, url: &str, body: &B) -> ConsoleResult<()> {
        let response = self
            .request(Method::PUT, url)
            .await?
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await.map(drop)
    }

    /// PUT without a body, used by link-style endpoints
    pub async fn put_empty(&self, url: &str) -> ConsoleResult<()> {
        let response = self
            .request(Method::PUT, url)
            .await?
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await.map(drop)
    }

    pub async fn delete(&self, url: &str) -> ConsoleResult<()> {
        let response = self
            .request(Method::DELETE, url)
            .await?
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await.map(drop)
    }
}

// ============================================================================
// Responses
// ============================================================================

pub(crate) fn transport(err: reqwest::Error) -> ConsoleError {
    ConsoleError::Transport(err.to_string())
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> ConsoleResult<T> {
    let response = check_status(response).await?;
    let body = response.text().await.map_err(transport)?;
    Ok(serde_json::from_str(&body)?)
}

/// Turn a non-success response into `ConsoleError::Api`
async fn check_status(response: Response) -> ConsoleResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    tracing::warn!("Admin API answered {}: {}", status.as_u16(), message);
    Err(ConsoleError::api(status.as_u16(), message))
}

/// Backend message of an error body
///
/// The admin API answers with `{"errorMessage": ...}`, the token endpoint with
/// `{"error": ..., "error_description": ...}`; anything else is shown raw.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["errorMessage", "error_description", "error"] {
            if let Some(serde_json::Value::String(message)) = fields.get(key) {
                return message.clone();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

/// Last path segment of the `Location` header
fn location_id(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)?
        .to_str()
        .ok()?
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(|id| urlencoding::decode(id).map(|d| d.into_owned()).unwrap_or_else(|_| id.to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Client against a mock server, authenticated with a static token
    pub(crate) fn test_client(server: &MockServer) -> AdminClient {
        let mut config = ConsoleConfig {
            server_url: server.uri(),
            realm: "test".to_string(),
            ..Default::default()
        };
        config.auth.access_token = Some("test-token".to_string());
        AdminClient::new(&config).unwrap()
    }

    #[test]
    fn test_error_message_sources() {
        assert_eq!(
            error_message(
                StatusCode::CONFLICT,
                r#"{"errorMessage":"Client my-app already exists"}"#
            ),
            "Client my-app already exists"
        );
        assert_eq!(
            error_message(
                StatusCode::UNAUTHORIZED,
                r#"{"error":"invalid_grant","error_description":"Invalid user credentials"}"#
            ),
            "Invalid user credentials"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down\n"), "upstream down");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }

    #[test]
    fn test_urls() {
        let config = ConsoleConfig {
            server_url: "http://localhost:8180/auth/".to_string(),
            realm: "my realm".to_string(),
            ..Default::default()
        };
        let client = AdminClient::new(&config).unwrap();
        assert_eq!(
            client.realm_url("clients"),
            "http://localhost:8180/auth/admin/realms/my%20realm/clients"
        );
        assert_eq!(client.realm_url(""), "http://localhost:8180/auth/admin/realms/my%20realm");
        assert_eq!(client.admin_url("serverinfo"), "http://localhost:8180/auth/admin/serverinfo");
    }

    #[tokio::test]
    async fn test_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/test/clients"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let clients: Vec<serde_json::Value> = client.get(&client.realm_url("clients")).await.unwrap();
        assert!(clients.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_carries_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/realms/test/clients"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({ "errorMessage": "Client my-app already exists" })),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .create(&client.realm_url("clients"), &json!({ "clientId": "my-app" }))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(
            err.to_string(),
            "Request failed with status code 409: Client my-app already exists"
        );
    }

    #[tokio::test]
    async fn test_create_reads_location() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/realms/test/groups"))
            .respond_with(ResponseTemplate::new(201).insert_header(
                "Location",
                format!("{}/admin/realms/test/groups/5a1e", server.uri()).as_str(),
            ))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let id = client
            .create(&client.realm_url("groups"), &json!({ "name": "admins" }))
            .await
            .unwrap();
        assert_eq!(id, "5a1e");
    }

    #[tokio::test]
    async fn test_password_grant_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/realms/master/protocol/openid-connect/token"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("username=admin"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "access_token": "granted", "expires_in": 60 })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/master/users/count"))
            .and(header("authorization", "Bearer granted"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(3)))
            .expect(2)
            .mount(&server)
            .await;

        let mut config = ConsoleConfig {
            server_url: server.uri(),
            ..Default::default()
        };
        config.auth.username = Some("admin".to_string());
        config.auth.password = Some("admin".to_string());
        let client = AdminClient::new(&config).unwrap();

        let url = client.realm_url("users/count");
        let first: u64 = client.get(&url).await.unwrap();
        let second: u64 = client.get(&url).await.unwrap();
        assert_eq!((first, second), (3, 3));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let config = ConsoleConfig {
            server_url: "http://127.0.0.1:9".to_string(),
            auth: AuthConfig {
                access_token: Some("t".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let client = AdminClient::new(&config).unwrap();
        let err = client.delete(&client.realm_url("clients/x")).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Transport(_)));
    }
}
