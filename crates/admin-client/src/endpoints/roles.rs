//! Realm `roles` and `roles-by-id`

use crate::AdminClient;
use kc_console_core::ConsoleResult;
use kc_console_model::RoleRepresentation;
use urlencoding::encode;

impl AdminClient {
    fn role_by_id_url(&self, id: &str) -> String {
        self.realm_url(&format!("roles-by-id/{}", encode(id)))
    }

    /// One page of realm roles, optionally filtered by name
    pub async fn list_roles(
        &self,
        first: usize,
        max: usize,
        search: Option<&str>,
    ) -> ConsoleResult<Vec<RoleRepresentation>> {
        let mut query = vec![("first", first.to_string()), ("max", max.to_string())];
        if let Some(term) = search.filter(|s| !s.is_empty()) {
            query.push(("search", term.to_string()));
        }
        self.get_query(&self.realm_url("roles"), &query).await
    }

    pub async fn get_role_by_name(&self, name: &str) -> ConsoleResult<RoleRepresentation> {
        self.get(&self.realm_url(&format!("roles/{}", encode(name))))
            .await
    }

    /// Create a realm role and return it as stored, id included
    ///
    /// The server locates new roles by name, so the role is read back.
    pub async fn create_role(&self, role: &RoleRepresentation) -> ConsoleResult<RoleRepresentation> {
        self.post_no_response(&self.realm_url("roles"), role).await?;
        tracing::info!("Created role '{}'", role.name());
        self.get_role_by_name(role.name()).await
    }

    pub async fn get_role(&self, id: &str) -> ConsoleResult<RoleRepresentation> {
        self.get(&self.role_by_id_url(id)).await
    }

    pub async fn update_role(&self, id: &str, role: &RoleRepresentation) -> ConsoleResult<()> {
        self.put(&self.role_by_id_url(id), role).await
    }

    pub async fn delete_role(&self, id: &str) -> ConsoleResult<()> {
        self.delete(&self.role_by_id_url(id)).await?;
        tracing::info!("Deleted role {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use kc_console_model::RoleRepresentation;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_role_reads_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/realms/test/roles"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/test/roles/auditor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "r1",
                "name": "auditor",
                "composite": false,
                "clientRole": false
            })))
            .mount(&server)
            .await;

        let role = RoleRepresentation {
            name: Some("auditor".to_string()),
            ..Default::default()
        };
        let created = test_client(&server).create_role(&role).await.unwrap();
        assert_eq!(created.id(), "r1");
    }
}
