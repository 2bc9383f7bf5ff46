//! Bearer token acquisition
//!
//! A configured access token is used as is. Otherwise the console signs in
//! with the password grant and keeps the token until shortly before it
//! expires.

use crate::client::{error_message, transport};
use kc_console_core::{AuthConfig, ConsoleError, ConsoleResult};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Tokens are renewed this long before the server says they expire
const EXPIRY_MARGIN: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now + EXPIRY_MARGIN < at)
    }
}

#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// A valid bearer token, signing in when none is cached
    pub(crate) async fn token(
        &self,
        http: &reqwest::Client,
        token_url: &str,
        auth: &AuthConfig,
    ) -> ConsoleResult<String> {
        if let Some(token) = &auth.access_token {
            return Ok(token.clone());
        }

        // held across the grant so concurrent requests sign in once
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.value.clone());
        }

        let token = password_grant(http, token_url, auth).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}

async fn password_grant(
    http: &reqwest::Client,
    token_url: &str,
    auth: &AuthConfig,
) -> ConsoleResult<CachedToken> {
    let (Some(username), Some(password)) = (&auth.username, &auth.password) else {
        return Err(ConsoleError::Auth(
            "no access token or username/password configured".to_string(),
        ));
    };

    tracing::debug!("Requesting admin token for '{}' from {}", username, token_url);
    let response = http
        .post(token_url)
        .form(&[
            ("grant_type", "password"),
            ("client_id", auth.client_id.as_str()),
            ("username", username.as_str()),
            ("password", password.as_str()),
        ])
        .send()
        .await
        .map_err(transport)?;

    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    if !status.is_success() {
        return Err(ConsoleError::Auth(error_message(status, &body)));
    }

    let token: TokenResponse = serde_json::from_str(&body)?;
    tracing::info!("Signed in to realm '{}' as '{}'", auth.realm, username);
    Ok(CachedToken {
        value: token.access_token,
        expires_at: token
            .expires_in
            .map(|secs| Instant::now() + Duration::from_secs(secs)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_freshness() {
        let now = Instant::now();
        let token = |secs: Option<u64>| CachedToken {
            value: "t".to_string(),
            expires_at: secs.map(|s| now + Duration::from_secs(s)),
        };

        assert!(token(None).is_fresh(now));
        assert!(token(Some(300)).is_fresh(now));
        assert!(!token(Some(5)).is_fresh(now));
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let cache = TokenCache::default();
        let err = cache
            .token(
                &reqwest::Client::new(),
                "http://localhost:1/token",
                &AuthConfig::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Auth(_)));
    }
}
