use crate::zoom_api::auth::{AuthMode, Credentials, ServerToServerCredentials, TokenProvider};
use crate::zoom_api::config::ZoomConfig;
use crate::zoom_api::oauth::OAuthClient;
use crate::zoom_api::pagination::PaginationEnvelope;
use crate::zoom_api::records::{Record, User};
use crate::zoom_api::resources::{Meetings, Reports, Users, Webinars};
use crate::zoom_api::types::{classify, ApiError, ZoomError};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

/// Decoded body of a successful call plus the pagination fields found in it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Parsed JSON body; `Value::Null` when the server sent no content
    pub body: Value,
    pub pagination: Option<PaginationEnvelope>,
}

impl ApiResponse {
    /// Map the body onto a single record
    pub fn into_record<T: Record>(self) -> Result<T, ZoomError> {
        T::from_json(self.body)
    }
}

/// Query parameters and JSON body for one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter (builder pattern)
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Set the JSON body (builder pattern)
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn page_size(self, page_size: u32) -> Self {
        self.query("page_size", page_size)
    }

    /// Request the page following a previous response
    pub fn next_page_token(self, token: impl Into<String>) -> Self {
        self.query("next_page_token", token.into())
    }
}

/// HTTP client for the Zoom REST API
///
/// A client starts without credentials. Configure one of the two modes before
/// making calls:
///
/// - [`set_token`](Self::set_token) for a bearer token you already hold, such as
///   one returned by [`OAuthClient::exchange_code`]
/// - [`use_server_to_server`](Self::use_server_to_server) to exchange the
///   configured Server-to-Server app credentials for tokens on demand
///
/// Switching modes discards the previous one. Clones share the connection pool
/// and the Server-to-Server token cache.
///
/// # Example
///
/// ```no_run
/// use zoom_sdk::{RequestOptions, ZoomClient, ZoomConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ZoomConfig::default().with_server_to_server("account", "client", "secret");
/// let mut client = ZoomClient::new(config)?;
/// client.use_server_to_server();
///
/// let meetings = client
///     .meetings()
///     .list("me", RequestOptions::new().page_size(30))
///     .await?;
///
/// for meeting in meetings.upcoming().iter() {
///     println!("{} starts at {:?}", meeting.uuid, meeting.start_time);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ZoomClient {
    /// API base URL without a trailing slash
    base_url: String,
    config: ZoomConfig,
    http: reqwest::Client,
    auth: Option<TokenProvider>,
}

impl ZoomClient {
    /// Create a client with no credentials configured
    ///
    /// # Arguments
    ///
    /// * `config` - API endpoint, timeout and app credentials
    ///
    /// # Returns
    ///
    /// Returns `Err(ZoomError::Config)` if the timeout is zero or the underlying
    /// HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use zoom_sdk::{ZoomClient, ZoomConfig};
    ///
    /// let mut client = ZoomClient::new(ZoomConfig::default()).unwrap();
    /// client.set_token("eyJhbGci...");
    /// ```
    pub fn new(config: ZoomConfig) -> Result<Self, ZoomError> {
        config.api.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.api.timeout())
            .build()
            .map_err(|e| ZoomError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = config.api.endpoint.trim_end_matches('/').to_string();
        tracing::debug!("Creating ZoomClient with base URL: {}", base_url);

        Ok(Self {
            base_url,
            config,
            http,
            auth: None,
        })
    }

    /// Create a client from `ZOOM_*` environment variables
    pub fn from_env() -> Result<Self, ZoomError> {
        Self::new(ZoomConfig::from_env()?)
    }

    /// Authenticate with a caller-supplied bearer token
    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        let token = token.into();
        tracing::debug!("Using bearer token authentication (token length: {})", token.len());
        self.set_token_provider(TokenProvider::new(Credentials::bearer(token), self.http.clone()))
    }

    /// Authenticate with the Server-to-Server credentials from the configuration
    pub fn use_server_to_server(&mut self) -> &mut Self {
        let credentials = ServerToServerCredentials::from(&self.config.server_to_server);
        self.set_server_to_server(credentials)
    }

    /// Authenticate with explicit Server-to-Server credentials
    pub fn set_server_to_server(&mut self, credentials: ServerToServerCredentials) -> &mut Self {
        tracing::debug!(
            "Using Server-to-Server authentication: account_id={}",
            credentials.account_id
        );
        let provider = TokenProvider::new(Credentials::ServerToServer(credentials), self.http.clone())
            .with_token_url(self.config.oauth2.token_uri.clone());
        self.set_token_provider(provider)
    }

    /// Replace the authentication strategy wholesale
    pub fn set_token_provider(&mut self, provider: TokenProvider) -> &mut Self {
        self.auth = Some(provider);
        self
    }

    /// The active authentication mode, if any
    pub fn auth_mode(&self) -> Option<AuthMode> {
        self.auth.as_ref().map(TokenProvider::mode)
    }

    /// The active token provider, shared with clones of this client
    pub fn token_provider(&self) -> Option<&TokenProvider> {
        self.auth.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Meeting endpoints
    pub fn meetings(&self) -> Meetings<'_> {
        Meetings::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn webinars(&self) -> Webinars<'_> {
        Webinars::new(self)
    }

    /// Report endpoints (past meeting participants)
    pub fn reports(&self) -> Reports<'_> {
        Reports::new(self)
    }

    /// Authorization-code flow helpers built from the `oauth2` configuration
    pub fn oauth(&self) -> OAuthClient {
        OAuthClient::new(self.config.oauth2.clone(), self.http.clone())
    }

    /// The user the credentials belong to
    pub async fn me(&self) -> Result<User, ZoomError> {
        self.request(Method::GET, "users/me", RequestOptions::new())
            .await?
            .into_record()
    }

    /// Send one authenticated call to the API
    ///
    /// `path` is resolved against the configured base URL; a leading `/` is
    /// ignored. The JSON body (`{}` when not set) is only sent for POST, PUT
    /// and PATCH.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` when no credentials are configured, before any network I/O
    /// - `Unauthorized`, `NotFound`, `Validation` or `Generic` for non-2xx responses
    /// - `Connection` for network failures and timeouts
    /// - `Parse` when a successful response is not JSON
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ZoomError> {
        let token = self.authorization().await?;
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        tracing::debug!("Sending {} request to: {}", method, url);

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header("Authorization", format!("Bearer {}", token.expose_secret()))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");

        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }

        if method == Method::POST || method == Method::PUT || method == Method::PATCH {
            let body = options.body.unwrap_or_else(|| json!({}));
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send {} request to {}: {}", method, url, e);
            ZoomError::from(e)
        })?;

        let status = response.status();
        tracing::debug!("Received response with status: {}", status);

        let text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            ZoomError::from(e)
        })?;

        if !status.is_success() {
            tracing::error!("Request failed: HTTP {} - {}", status.as_u16(), text);
            let body = serde_json::from_str(&text).unwrap_or(Value::Null);
            return Err(classify(status.as_u16(), &body).into());
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                tracing::error!("Failed to parse response: {}", e);
                ZoomError::Parse(format!("Failed to parse response JSON: {}", e))
            })?
        };

        let pagination = PaginationEnvelope::from_body(&body);
        Ok(ApiResponse { body, pagination })
    }

    /// GET `path`; see [`request`](Self::request)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use zoom_sdk::{RequestOptions, ZoomClient};
    ///
    /// # async fn example(client: &ZoomClient) -> Result<(), zoom_sdk::ZoomError> {
    /// let response = client
    ///     .get("users/me/recordings", RequestOptions::new().query("from", "2024-03-01"))
    ///     .await?;
    /// println!("{}", response.body["total_records"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ZoomError> {
        self.request(Method::GET, path, options).await
    }

    /// POST `path` with the JSON body from `options`
    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ZoomError> {
        self.request(Method::POST, path, options).await
    }

    /// PATCH `path`; Zoom usually answers with an empty body, giving `Value::Null`
    pub async fn patch(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ZoomError> {
        self.request(Method::PATCH, path, options).await
    }

    /// PUT `path` with the JSON body from `options`
    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ZoomError> {
        self.request(Method::PUT, path, options).await
    }

    /// DELETE `path`; no body is sent
    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ZoomError> {
        self.request(Method::DELETE, path, options).await
    }

    /// Resolve the bearer token for the next call
    async fn authorization(&self) -> Result<SecretString, ZoomError> {
        let provider = match &self.auth {
            Some(provider) => provider,
            None => return Err(not_configured()),
        };

        let token = provider.get_token().await?;
        if token.expose_secret().is_empty() {
            return Err(not_configured());
        }
        Ok(token)
    }
}

fn not_configured() -> ZoomError {
    tracing::error!("No authentication method configured");
    ApiError::unauthorized(
        "No authentication method configured. Use set_token() or use_server_to_server().",
        0,
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoom_api::types::ApiErrorKind;

    fn client() -> ZoomClient {
        ZoomClient::new(ZoomConfig::default()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = ZoomClient::new(ZoomConfig::default().with_endpoint("http://localhost:9000/v2/"))
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/v2");
        assert_eq!(client.auth_mode(), None);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = ZoomClient::new(ZoomConfig::default().with_timeout_secs(0));
        assert!(matches!(result, Err(ZoomError::Config(_))));
    }

    #[test]
    fn test_switching_modes_replaces_credentials() {
        let mut client = client();

        client.set_token("abc");
        assert_eq!(client.auth_mode(), Some(AuthMode::BearerToken));

        client.use_server_to_server();
        assert_eq!(client.auth_mode(), Some(AuthMode::ServerToServer));

        client.set_token("def");
        assert_eq!(client.auth_mode(), Some(AuthMode::BearerToken));
    }

    #[test]
    fn test_server_to_server_uses_configured_token_uri() {
        let config = ZoomConfig::default().with_token_uri("http://localhost:1234/oauth/token");
        let mut client = ZoomClient::new(config).unwrap();
        client.use_server_to_server();

        assert_eq!(
            client.token_provider().map(TokenProvider::token_url),
            Some("http://localhost:1234/oauth/token")
        );
    }

    #[test]
    fn test_request_options_builder() {
        let options = RequestOptions::new()
            .query("type", "scheduled")
            .page_size(30)
            .next_page_token("tok")
            .body(json!({"topic": "Standup"}));

        assert_eq!(
            options.query,
            vec![
                ("type".to_string(), "scheduled".to_string()),
                ("page_size".to_string(), "30".to_string()),
                ("next_page_token".to_string(), "tok".to_string()),
            ]
        );
        assert_eq!(options.body, Some(json!({"topic": "Standup"})));
    }

    #[tokio::test]
    async fn test_request_without_credentials_fails_locally() {
        let err = client()
            .request(Method::GET, "/users/me", RequestOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ApiErrorKind::Unauthorized));
        assert_eq!(err.status(), Some(0));
    }

    #[tokio::test]
    async fn test_empty_bearer_token_counts_as_unconfigured() {
        let mut client = client();
        client.set_token("");

        let err = client.get("users/me", RequestOptions::new()).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(0));
    }

    #[tokio::test]
    async fn test_incomplete_server_to_server_fails_locally() {
        let mut client = client();
        client.use_server_to_server();

        let err = client.get("users/me", RequestOptions::new()).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(0));
    }
}
