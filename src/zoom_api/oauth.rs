//! OAuth 2.0 authorization-code flow helpers.
//!
//! The caller redirects the user to [`OAuthClient::authorize_url`], receives the
//! `code` on its redirect URI, and trades it for tokens with
//! [`OAuthClient::exchange_code`]. The resulting access token is handed to
//! [`ZoomClient::set_token`](crate::zoom_api::client::ZoomClient::set_token).
//! Sessions, state verification and token storage are left to the caller.

use crate::zoom_api::auth::basic_auth;
use crate::zoom_api::config::OAuth2Config;
use crate::zoom_api::types::{ApiError, ZoomError};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Tokens returned by the authorization-code and refresh grants
#[derive(Debug)]
pub struct OAuthToken {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    pub token_type: Option<String>,
    /// Lifetime of the access token in seconds
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
}

#[derive(Deserialize)]
struct RawToken {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

impl From<RawToken> for OAuthToken {
    fn from(raw: RawToken) -> Self {
        Self {
            access_token: SecretString::from(raw.access_token),
            refresh_token: raw.refresh_token.map(SecretString::from),
            token_type: raw.token_type,
            expires_in: raw.expires_in,
            scope: raw.scope,
        }
    }
}

/// Client for the user-facing OAuth app endpoints
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: OAuth2Config,
    http: reqwest::Client,
}

impl OAuthClient {
    pub fn new(config: OAuth2Config, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// URL to send the user to for consent
    ///
    /// Carries `response_type=code`, the client ID, the redirect URI and `state`.
    pub fn authorize_url(&self, state: &str) -> Result<Url, ZoomError> {
        let mut url = Url::parse(&self.config.authorize_uri).map_err(|e| {
            ZoomError::Config(format!(
                "Invalid authorize URI '{}': {}",
                self.config.authorize_uri, e
            ))
        })?;

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("state", state);

        Ok(url)
    }

    /// Trade an authorization code for tokens
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthToken, ZoomError> {
        tracing::info!("Exchanging OAuth authorization code");
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ])
        .await
    }

    /// Obtain a new access token with a refresh token
    pub async fn refresh(&self, refresh_token: &SecretString) -> Result<OAuthToken, ZoomError> {
        tracing::info!("Refreshing OAuth access token");
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.expose_secret()),
        ])
        .await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<OAuthToken, ZoomError> {
        if self.config.client_id.is_empty() || self.config.client_secret.expose_secret().is_empty() {
            return Err(ApiError::unauthorized("OAuth client credentials not configured.", 0).into());
        }

        let response = self
            .http
            .post(&self.config.token_uri)
            .header(
                "Authorization",
                basic_auth(&self.config.client_id, &self.config.client_secret),
            )
            .form(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send OAuth token request: {}", e);
                ApiError::unauthorized(format!("Failed to obtain OAuth token: {}", e), 0)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("OAuth token request failed: HTTP {} - {}", status.as_u16(), body);
            return Err(ApiError::unauthorized(
                format!("Failed to obtain OAuth token: {}", body),
                status.as_u16(),
            )
            .into());
        }

        let raw: RawToken = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OAuth token response: {}", e);
            ApiError::unauthorized(
                format!("Failed to parse OAuth token response: {}", e),
                status.as_u16(),
            )
        })?;

        tracing::debug!("OAuth access token length: {}", raw.access_token.len());
        Ok(raw.into())
    }
}
