//! Request authentication.
//!
//! A client authenticates either with a caller-owned bearer token (usually obtained
//! through the OAuth authorization-code flow) or with Server-to-Server OAuth app
//! credentials, which [`TokenProvider`] exchanges for short-lived access tokens and
//! caches in memory until shortly before they expire.

use crate::zoom_api::config::{ServerToServerConfig, DEFAULT_TOKEN_URI};
use crate::zoom_api::types::{ApiError, ZoomError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::{Arc, RwLock};

/// Seconds subtracted from `expires_in` so a token is never sent right as it expires
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// Server-to-Server OAuth app credentials
#[derive(Debug)]
pub struct ServerToServerCredentials {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

impl ServerToServerCredentials {
    pub fn new(
        account_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    /// All three fields are present
    pub fn is_complete(&self) -> bool {
        !self.account_id.is_empty()
            && !self.client_id.is_empty()
            && !self.client_secret.expose_secret().is_empty()
    }

    /// `Basic` authorization value for the token endpoint
    fn basic_auth(&self) -> String {
        basic_auth(&self.client_id, &self.client_secret)
    }
}

/// `Basic base64(client_id:client_secret)`
pub(crate) fn basic_auth(client_id: &str, client_secret: &SecretString) -> String {
    let pair = format!("{}:{}", client_id, client_secret.expose_secret());
    format!("Basic {}", BASE64.encode(pair))
}

impl Clone for ServerToServerCredentials {
    fn clone(&self) -> Self {
        Self {
            account_id: self.account_id.clone(),
            client_id: self.client_id.clone(),
            client_secret: SecretString::from(self.client_secret.expose_secret().to_owned()),
        }
    }
}

impl From<&ServerToServerConfig> for ServerToServerCredentials {
    fn from(config: &ServerToServerConfig) -> Self {
        Self {
            account_id: config.account_id.clone(),
            client_id: config.client_id.clone(),
            client_secret: SecretString::from(config.client_secret.expose_secret().to_owned()),
        }
    }
}

/// How a client authenticates. Exactly one mode is active at a time.
#[derive(Debug)]
pub enum Credentials {
    /// Caller-supplied access token, sent as-is. The caller owns its refresh.
    BearerToken(SecretString),
    /// Account credentials exchanged for access tokens on demand
    ServerToServer(ServerToServerCredentials),
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::BearerToken(SecretString::from(token.into()))
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Credentials::BearerToken(_) => AuthMode::BearerToken,
            Credentials::ServerToServer(_) => AuthMode::ServerToServer,
        }
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        match self {
            Credentials::BearerToken(token) => {
                Credentials::BearerToken(SecretString::from(token.expose_secret().to_owned()))
            }
            Credentials::ServerToServer(creds) => Credentials::ServerToServer(creds.clone()),
        }
    }
}

/// Active authentication mode, without the secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    BearerToken,
    ServerToServer,
}

/// An access token obtained from the token endpoint
#[derive(Debug)]
pub struct CachedToken {
    value: SecretString,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: SecretString::from(value.into()),
            expires_at,
        }
    }

    /// Build the cache entry for a token issued at `issued_at`
    pub fn from_exchange(response: &TokenResponse, issued_at: DateTime<Utc>) -> Self {
        let lifetime = response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        Self {
            value: SecretString::from(response.access_token.clone()),
            expires_at: issued_at + Duration::seconds(lifetime - EXPIRY_BUFFER_SECS),
        }
    }

    pub fn value(&self) -> &SecretString {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Utc::now())
    }
}

impl Clone for CachedToken {
    fn clone(&self) -> Self {
        Self {
            value: SecretString::from(self.value.expose_secret().to_owned()),
            expires_at: self.expires_at,
        }
    }
}

/// Token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Supplies the bearer token for each request
///
/// In Server-to-Server mode the most recent access token is cached in a single
/// slot shared by all clones of the provider. The slot is replaced wholesale on
/// refresh. Refreshes are not deduplicated: two callers that observe an expired
/// token at the same time each perform an exchange and the last one wins.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    credentials: Credentials,
    token_url: String,
    http: reqwest::Client,
    cache: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenProvider {
    /// Create a provider using the default token endpoint
    pub fn new(credentials: Credentials, http: reqwest::Client) -> Self {
        Self {
            credentials,
            token_url: DEFAULT_TOKEN_URI.to_string(),
            http,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Override the token endpoint (builder pattern)
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Seed the cache with a previously obtained token (builder pattern)
    pub fn with_cached_token(self, token: CachedToken) -> Self {
        if let Ok(mut slot) = self.cache.write() {
            *slot = Some(token);
        }
        self
    }

    pub fn mode(&self) -> AuthMode {
        self.credentials.mode()
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// A snapshot of the cached Server-to-Server token, if any
    pub fn cached_token(&self) -> Option<CachedToken> {
        self.cache.read().ok().and_then(|slot| slot.clone())
    }

    /// Return a usable access token, exchanging credentials if needed
    ///
    /// # Errors
    ///
    /// Returns an `Unauthorized` API error when the Server-to-Server credentials are
    /// incomplete, or when the token exchange fails for any reason (including
    /// network faults).
    pub async fn get_token(&self) -> Result<SecretString, ZoomError> {
        let creds = match &self.credentials {
            Credentials::BearerToken(token) => {
                return Ok(SecretString::from(token.expose_secret().to_owned()));
            }
            Credentials::ServerToServer(creds) => creds,
        };

        {
            let slot = self.cache.read().map_err(|e| {
                ApiError::unauthorized(format!("Token cache lock poisoned: {}", e), 0)
            })?;

            if let Some(token) = slot.as_ref() {
                if token.is_valid_at(Utc::now()) {
                    tracing::debug!("Using cached Server-to-Server token (expires_at={})", token.expires_at);
                    return Ok(SecretString::from(token.value.expose_secret().to_owned()));
                }
                tracing::debug!("Cached Server-to-Server token expired at {}", token.expires_at);
            }
            // Lock is released here before await
        }

        if !creds.is_complete() {
            tracing::error!("Server-to-Server OAuth credentials are incomplete");
            return Err(ApiError::unauthorized(
                "Server-to-Server OAuth credentials not configured.",
                0,
            )
            .into());
        }

        let token = self.exchange(creds).await?;
        let value = SecretString::from(token.value.expose_secret().to_owned());

        let mut slot = self.cache.write().map_err(|e| {
            ApiError::unauthorized(format!("Token cache lock poisoned: {}", e), 0)
        })?;
        *slot = Some(token);

        Ok(value)
    }

    /// Exchange account credentials for a fresh access token
    async fn exchange(&self, creds: &ServerToServerCredentials) -> Result<CachedToken, ZoomError> {
        tracing::info!(
            "Requesting Server-to-Server OAuth token: account_id={}",
            creds.account_id
        );

        let issued_at = Utc::now();
        let response = self
            .http
            .post(&self.token_url)
            .header("Authorization", creds.basic_auth())
            .form(&[
                ("grant_type", "account_credentials"),
                ("account_id", creds.account_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send token request: {}", e);
                ApiError::unauthorized(
                    format!("Failed to obtain Server-to-Server OAuth token: {}", e),
                    0,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Token exchange failed: HTTP {} - {}", status.as_u16(), body);
            return Err(ApiError::unauthorized(
                format!("Failed to obtain Server-to-Server OAuth token: {}", body),
                status.as_u16(),
            )
            .into());
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse token response: {}", e);
            ApiError::unauthorized(
                format!("Failed to parse Server-to-Server OAuth token response: {}", e),
                status.as_u16(),
            )
        })?;

        let token = CachedToken::from_exchange(&token_response, issued_at);
        tracing::info!(
            "Server-to-Server token obtained: expires_at={}",
            token.expires_at
        );
        tracing::debug!("Access token length: {}", token_response.access_token.len());

        Ok(token)
    }
}
