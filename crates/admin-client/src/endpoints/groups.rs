//! `groups` resource

use crate::AdminClient;
use kc_console_core::ConsoleResult;
use kc_console_model::{GroupRepresentation, UserRepresentation};
use urlencoding::encode;

impl AdminClient {
    fn group_url(&self, id: &str) -> String {
        self.realm_url(&format!("groups/{}", encode(id)))
    }

    /// Top-level groups with their sub-group trees
    pub async fn list_groups(&self, search: Option<&str>) -> ConsoleResult<Vec<GroupRepresentation>> {
        let query: Vec<(&str, String)> = search
            .filter(|s| !s.is_empty())
            .map(|s| vec![("search", s.to_string())])
            .unwrap_or_default();
        self.get_query(&self.realm_url("groups"), &query).await
    }

    pub async fn get_group(&self, id: &str) -> ConsoleResult<GroupRepresentation> {
        self.get(&self.group_url(id)).await
    }

    /// Create a top-level group, returning its id
    pub async fn create_group(&self, group: &GroupRepresentation) -> ConsoleResult<String> {
        let id = self.create(&self.realm_url("groups"), group).await?;
        tracing::info!("Created group '{}' ({})", group.name(), id);
        Ok(id)
    }

    /// Create a group under `parent_id`, returning its id
    pub async fn create_child_group(
        &self,
        parent_id: &str,
        group: &GroupRepresentation,
    ) -> ConsoleResult<String> {
        let url = format!("{}/children", self.group_url(parent_id));
        self.create(&url, group).await
    }

    pub async fn update_group(&self, id: &str, group: &GroupRepresentation) -> ConsoleResult<()> {
        self.put(&self.group_url(id), group).await
    }

    pub async fn delete_group(&self, id: &str) -> ConsoleResult<()> {
        self.delete(&self.group_url(id)).await?;
        tracing::info!("Deleted group {}", id);
        Ok(())
    }

    /// Direct members of a group
    pub async fn group_members(&self, id: &str) -> ConsoleResult<Vec<UserRepresentation>> {
        self.get(&format!("{}/members", self.group_url(id))).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use kc_console_model::GroupRepresentation;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_groups_with_sub_groups() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/test/groups"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "g1",
                    "name": "admins",
                    "path": "/admins",
                    "subGroups": [{ "id": "g2", "name": "leads", "path": "/admins/leads" }]
                }
            ])))
            .mount(&server)
            .await;

        let groups = test_client(&server).list_groups(None).await.unwrap();
        assert_eq!(groups[0].sub_groups[0].name(), "leads");
        assert_eq!(groups[0].descendant_ids(), vec!["g2"]);
    }

    #[tokio::test]
    async fn test_create_child_group() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/realms/test/groups/g1/children"))
            .and(body_json(json!({ "name": "leads" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Location", "http://kc/admin/realms/test/groups/g2"),
            )
            .mount(&server)
            .await;

        let id = test_client(&server)
            .create_child_group("g1", &GroupRepresentation::named("leads"))
            .await
            .unwrap();
        assert_eq!(id, "g2");
    }
}
