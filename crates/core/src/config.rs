//! Console configuration
//!
//! Settings are read from a TOML file (missing file means defaults) and then
//! overridden by `KC_CONSOLE_*` environment variables.

use crate::error::{ConsoleError, ConsoleResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "KC_CONSOLE_CONFIG";

/// Page sizes offered by paginated tables
pub const PAGE_SIZES: &[usize] = &[10, 20, 50, 100];

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Server URL, without trailing slash (e.g. http://localhost:8180/auth)
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Realm managed by the console
    #[serde(default = "default_realm")]
    pub realm: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Initial page size of paginated tables
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// How the console obtains its bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Realm the admin account lives in
    #[serde(default = "default_realm")]
    pub realm: String,

    /// Client used for the password grant
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Admin username for the password grant
    pub username: Option<String>,

    /// Admin password for the password grant
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Pre-issued access token; skips the password grant when set
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
}

fn default_server_url() -> String {
    "http://localhost:8180/auth".to_string()
}

fn default_realm() -> String {
    "master".to_string()
}

fn default_client_id() -> String {
    "admin-cli".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> usize {
    10
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            realm: default_realm(),
            client_id: default_client_id(),
            username: None,
            password: None,
            access_token: None,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            realm: default_realm(),
            request_timeout_secs: default_timeout(),
            page_size: default_page_size(),
            auth: AuthConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load from the default location, then apply environment overrides
    pub fn load() -> ConsoleResult<Self> {
        let path = Self::config_path();
        let mut config = match &path {
            Some(p) => Self::load_from(p)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; a missing file yields defaults
    pub fn load_from(path: &Path) -> ConsoleResult<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConsoleError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| ConsoleError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.normalize();
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> ConsoleResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConsoleError::InvalidConfig(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content).map_err(|e| ConsoleError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Config file path: `$KC_CONSOLE_CONFIG`, else `~/.config/kc-console/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }
        let home = std::env::var("HOME").ok()?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("kc-console")
                .join("config.toml"),
        )
    }

    /// Apply `KC_CONSOLE_*` overrides through the given lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("KC_CONSOLE_SERVER_URL") {
            self.server_url = url;
        }
        if let Some(realm) = lookup("KC_CONSOLE_REALM") {
            self.realm = realm;
        }
        if let Some(username) = lookup("KC_CONSOLE_USERNAME") {
            self.auth.username = Some(username);
        }
        if let Some(password) = lookup("KC_CONSOLE_PASSWORD") {
            self.auth.password = Some(password);
        }
        if let Some(token) = lookup("KC_CONSOLE_TOKEN") {
            self.auth.access_token = Some(token);
        }
    }

    fn normalize(&mut self) {
        while self.server_url.ends_with('/') {
            self.server_url.pop();
        }
    }

    /// Check the settings are usable
    pub fn validate(&self) -> ConsoleResult<()> {
        if self.server_url.is_empty() {
            return Err(ConsoleError::InvalidConfig("server_url is empty".to_string()));
        }
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConsoleError::InvalidConfig(format!(
                "server_url must start with http:// or https://, got '{}'",
                self.server_url
            )));
        }
        if self.realm.trim().is_empty() {
            return Err(ConsoleError::InvalidConfig("realm is empty".to_string()));
        }
        if self.page_size == 0 || self.page_size > 100 {
            return Err(ConsoleError::InvalidConfig(format!(
                "page_size must be between 1 and 100, got {}",
                self.page_size
            )));
        }
        Ok(())
    }

    /// Base of every realm-scoped admin endpoint
    pub fn admin_realm_url(&self) -> String {
        format!("{}/admin/realms/{}", self.server_url, self.realm)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConsoleConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.auth.client_id, "admin-cli");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
server_url = "https://sso.example.com/auth/"
realm = "acme"

[auth]
username = "admin"
"#,
        )
        .unwrap();

        let config = ConsoleConfig::load_from(&path).unwrap();
        assert_eq!(config.server_url, "https://sso.example.com/auth");
        assert_eq!(config.realm, "acme");
        assert_eq!(config.auth.realm, "master");
        assert_eq!(config.auth.username.as_deref(), Some("admin"));
        assert_eq!(config.page_size, 10);
        assert_eq!(
            config.admin_realm_url(),
            "https://sso.example.com/auth/admin/realms/acme"
        );
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server_url = [").unwrap();

        let err = ConsoleConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidConfig(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("KC_CONSOLE_REALM", "test"),
            ("KC_CONSOLE_TOKEN", "abc"),
        ]
        .into_iter()
        .collect();

        let mut config = ConsoleConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.realm, "test");
        assert_eq!(config.auth.access_token.as_deref(), Some("abc"));
        assert_eq!(config.server_url, "http://localhost:8180/auth");
    }

    #[test]
    fn test_validate() {
        let mut config = ConsoleConfig::default();
        assert!(config.validate().is_ok());

        config.server_url = "localhost:8180".to_string();
        assert!(config.validate().is_err());

        config.server_url = "http://localhost:8180".to_string();
        config.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_round_trip_skips_secrets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = ConsoleConfig::default();
        config.auth.password = Some("secret".to_string());
        config.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("secret"));
        let loaded = ConsoleConfig::load_from(&path).unwrap();
        assert_eq!(loaded.auth.password, None);
        assert_eq!(loaded.realm, config.realm);
    }
}
