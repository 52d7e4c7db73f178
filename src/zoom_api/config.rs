//! Client configuration.
//!
//! Configuration can be loaded from a TOML document or from `ZOOM_*` environment
//! variables. Every field has a default except the credentials themselves.
//!
//! ```toml
//! [api]
//! endpoint = "https://api.zoom.us/v2"
//! timeout = 60
//!
//! [server_to_server]
//! account_id = "abc"
//! client_id = "def"
//! client_secret = "ghi"
//! ```

use crate::zoom_api::types::ZoomError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.zoom.us/v2";
pub const DEFAULT_AUTHORIZE_URI: &str = "https://zoom.us/oauth/authorize";
pub const DEFAULT_TOKEN_URI: &str = "https://zoom.us/oauth/token";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Complete client configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub api: ApiConfig,
    pub oauth2: OAuth2Config,
    pub server_to_server: ServerToServerConfig,
}

/// REST API endpoint settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is resolved against
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Reject settings that would make every request fail
    pub fn validate(&self) -> Result<(), ZoomError> {
        if self.timeout == 0 {
            return Err(ZoomError::Config(
                "api.timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

/// OAuth 2.0 app settings for the authorization-code flow
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OAuth2Config {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_uri: String,
    pub authorize_uri: String,
    /// Also used as the Server-to-Server token exchange endpoint
    pub token_uri: String,
}

impl Default for OAuth2Config {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: SecretString::from(String::new()),
            redirect_uri: String::new(),
            authorize_uri: DEFAULT_AUTHORIZE_URI.to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
        }
    }
}

impl Clone for OAuth2Config {
    fn clone(&self) -> Self {
        Self {
            client_id: self.client_id.clone(),
            client_secret: SecretString::from(self.client_secret.expose_secret().to_owned()),
            redirect_uri: self.redirect_uri.clone(),
            authorize_uri: self.authorize_uri.clone(),
            token_uri: self.token_uri.clone(),
        }
    }
}

/// Server-to-Server OAuth app credentials
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerToServerConfig {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

impl Default for ServerToServerConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            client_id: String::new(),
            client_secret: SecretString::from(String::new()),
        }
    }
}

impl Clone for ServerToServerConfig {
    fn clone(&self) -> Self {
        Self {
            account_id: self.account_id.clone(),
            client_id: self.client_id.clone(),
            client_secret: SecretString::from(self.client_secret.expose_secret().to_owned()),
        }
    }
}

impl Clone for ZoomConfig {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            oauth2: self.oauth2.clone(),
            server_to_server: self.server_to_server.clone(),
        }
    }
}

impl ZoomConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ZoomError> {
        let config: Self = toml::from_str(source).map_err(|e| {
            tracing::error!("Failed to parse Zoom configuration: {}", e);
            ZoomError::Config(format!("Invalid TOML configuration: {}", e))
        })?;
        config.api.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ZoomError> {
        let path = path.as_ref();
        tracing::debug!("Loading Zoom configuration from {}", path.display());

        let source = std::fs::read_to_string(path).map_err(|e| {
            ZoomError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&source)
    }

    /// Build configuration from `ZOOM_*` environment variables
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `ZOOM_API_ENDPOINT` | `api.endpoint` |
    /// | `ZOOM_TIMEOUT` | `api.timeout` (seconds) |
    /// | `ZOOM_CLIENT_ID` | `oauth2.client_id`, `server_to_server.client_id` |
    /// | `ZOOM_CLIENT_SECRET` | `oauth2.client_secret`, `server_to_server.client_secret` |
    /// | `ZOOM_REDIRECT_URI` | `oauth2.redirect_uri` |
    /// | `ZOOM_AUTHORIZE_URI` | `oauth2.authorize_uri` |
    /// | `ZOOM_TOKEN_URI` | `oauth2.token_uri` |
    /// | `ZOOM_ACCOUNT_ID` | `server_to_server.account_id` |
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ZoomError> {
        let mut config = Self::default();

        if let Some(endpoint) = env_var("ZOOM_API_ENDPOINT") {
            config.api.endpoint = endpoint;
        }
        if let Some(timeout) = env_var("ZOOM_TIMEOUT") {
            config.api.timeout = timeout.trim().parse().map_err(|_| {
                ZoomError::Config(format!("ZOOM_TIMEOUT must be a number of seconds, got '{}'", timeout))
            })?;
            if config.api.timeout == 0 {
                return Err(ZoomError::Config(
                    "ZOOM_TIMEOUT must be at least 1 second, got '0'".to_string(),
                ));
            }
        }
        if let Some(client_id) = env_var("ZOOM_CLIENT_ID") {
            config.oauth2.client_id = client_id.clone();
            config.server_to_server.client_id = client_id;
        }
        if let Some(secret) = env_var("ZOOM_CLIENT_SECRET") {
            config.oauth2.client_secret = SecretString::from(secret.clone());
            config.server_to_server.client_secret = SecretString::from(secret);
        }
        if let Some(redirect_uri) = env_var("ZOOM_REDIRECT_URI") {
            config.oauth2.redirect_uri = redirect_uri;
        }
        if let Some(authorize_uri) = env_var("ZOOM_AUTHORIZE_URI") {
            config.oauth2.authorize_uri = authorize_uri;
        }
        if let Some(token_uri) = env_var("ZOOM_TOKEN_URI") {
            config.oauth2.token_uri = token_uri;
        }
        if let Some(account_id) = env_var("ZOOM_ACCOUNT_ID") {
            config.server_to_server.account_id = account_id;
        }

        tracing::debug!(
            "Loaded Zoom configuration from environment: endpoint={}, timeout={}s",
            config.api.endpoint,
            config.api.timeout
        );

        Ok(config)
    }

    /// Override the API base URL (builder pattern)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api.endpoint = endpoint.into();
        self
    }

    /// Override the request timeout (builder pattern)
    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.api.timeout = timeout;
        self
    }

    /// Override the token endpoint (builder pattern)
    pub fn with_token_uri(mut self, token_uri: impl Into<String>) -> Self {
        self.oauth2.token_uri = token_uri.into();
        self
    }

    /// Set Server-to-Server credentials (builder pattern)
    pub fn with_server_to_server(
        mut self,
        account_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.server_to_server = ServerToServerConfig {
            account_id: account_id.into(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        };
        self
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ALL_VARS: [&str; 8] = [
        "ZOOM_API_ENDPOINT",
        "ZOOM_TIMEOUT",
        "ZOOM_CLIENT_ID",
        "ZOOM_CLIENT_SECRET",
        "ZOOM_REDIRECT_URI",
        "ZOOM_AUTHORIZE_URI",
        "ZOOM_TOKEN_URI",
        "ZOOM_ACCOUNT_ID",
    ];

    fn clear_env() {
        for name in ALL_VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ZoomConfig::default();
        assert_eq!(config.api.endpoint, "https://api.zoom.us/v2");
        assert_eq!(config.api.timeout(), Duration::from_secs(60));
        assert_eq!(config.oauth2.token_uri, "https://zoom.us/oauth/token");
        assert_eq!(config.oauth2.authorize_uri, "https://zoom.us/oauth/authorize");
        assert!(config.server_to_server.account_id.is_empty());
    }

    #[test]
    fn test_from_toml_partial_sections() {
        let config = ZoomConfig::from_toml_str(
            r#"
            [api]
            timeout = 15

            [server_to_server]
            account_id = "acc"
            client_id = "cid"
            client_secret = "shh"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.api.timeout, 15);
        assert_eq!(config.server_to_server.account_id, "acc");
        assert_eq!(config.server_to_server.client_secret.expose_secret(), "shh");
        assert_eq!(config.oauth2.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = ZoomConfig::from_toml_str("[api]\ntimeout = \"soon\"");
        assert!(matches!(result, Err(ZoomError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nendpoint = \"http://localhost:9000/v2\"").unwrap();

        let config = ZoomConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.endpoint, "http://localhost:9000/v2");
    }

    #[test]
    fn test_from_missing_file() {
        let result = ZoomConfig::from_file("/nonexistent/zoom.toml");
        assert!(matches!(result, Err(ZoomError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        std::env::set_var("ZOOM_TIMEOUT", "30");
        std::env::set_var("ZOOM_CLIENT_ID", "client-123");
        std::env::set_var("ZOOM_CLIENT_SECRET", "secret-456");
        std::env::set_var("ZOOM_ACCOUNT_ID", "account-789");

        let config = ZoomConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.api.timeout, 30);
        assert_eq!(config.api.endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.oauth2.client_id, "client-123");
        assert_eq!(config.server_to_server.client_id, "client-123");
        assert_eq!(config.server_to_server.client_secret.expose_secret(), "secret-456");
        assert_eq!(config.server_to_server.account_id, "account-789");
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_timeout() {
        clear_env();
        std::env::set_var("ZOOM_TIMEOUT", "sixty");

        let result = ZoomConfig::from_env();
        clear_env();

        assert!(matches!(result, Err(ZoomError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_zero_timeout() {
        clear_env();
        std::env::set_var("ZOOM_TIMEOUT", "0");

        let result = ZoomConfig::from_env();
        clear_env();

        match result {
            Err(ZoomError::Config(message)) => assert!(message.contains("ZOOM_TIMEOUT")),
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_toml_zero_timeout() {
        let result = ZoomConfig::from_toml_str("[api]\ntimeout = 0");
        assert!(matches!(result, Err(ZoomError::Config(_))));
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let config = ZoomConfig::default().with_server_to_server("acc", "cid", "top-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("top-secret"));
    }
}
