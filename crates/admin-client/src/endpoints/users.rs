//! `users` resource and brute-force detection

use crate::AdminClient;
use kc_console_core::ConsoleResult;
use kc_console_model::{BruteForceStatus, UserRepresentation};
use urlencoding::encode;

impl AdminClient {
    fn user_url(&self, id: &str) -> String {
        self.realm_url(&format!("users/{}", encode(id)))
    }

    /// One page of users matching `search` against username, name and email
    pub async fn list_users(
        &self,
        first: usize,
        max: usize,
        search: Option<&str>,
    ) -> ConsoleResult<Vec<UserRepresentation>> {
        let mut query = vec![("first", first.to_string()), ("max", max.to_string())];
        if let Some(term) = search.filter(|s| !s.is_empty()) {
            query.push(("search", term.to_string()));
        }
        self.get_query(&self.realm_url("users"), &query).await
    }

    pub async fn count_users(&self) -> ConsoleResult<u64> {
        self.get(&self.realm_url("users/count")).await
    }

    pub async fn delete_user(&self, id: &str) -> ConsoleResult<()> {
        self.delete(&self.user_url(id)).await?;
        tracing::info!("Deleted user {}", id);
        Ok(())
    }

    /// Make a user a member of a group
    pub async fn join_group(&self, user_id: &str, group_id: &str) -> ConsoleResult<()> {
        let url = format!("{}/groups/{}", self.user_url(user_id), encode(group_id));
        self.put_empty(&url).await
    }

    pub async fn brute_force_status(&self, user_id: &str) -> ConsoleResult<BruteForceStatus> {
        self.get(&self.realm_url(&format!(
            "attack-detection/brute-force/users/{}",
            encode(user_id)
        )))
        .await
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
    async fn test_list_users_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/test/users"))
            .and(query_param("search", "jdoe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "u1", "username": "jdoe", "enabled": false }
            ])))
            .mount(&server)
            .await;

        let users = test_client(&server)
            .list_users(0, 21, Some("jdoe"))
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert!(!users[0].is_enabled());
    }

    #[tokio::test]
    async fn test_join_group_and_brute_force() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/realms/test/users/u1/groups/g1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/test/attack-detection/brute-force/users/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "numFailures": 3,
                "disabled": true,
                "lastIPFailure": "10.0.0.1",
                "lastFailure": 1600000000000i64
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.join_group("u1", "g1").await.unwrap();
        let status = client.brute_force_status("u1").await.unwrap();
        assert!(status.disabled);
        assert_eq!(status.num_failures, 3);
    }
}
