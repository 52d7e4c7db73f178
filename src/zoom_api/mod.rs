/// Zoom REST API integration module
///
/// ## Request Flow
///
/// 1. Caller configures a [`ZoomClient`] with a bearer token or Server-to-Server credentials
/// 2. [`ZoomClient::request`] resolves a bearer token through the [`TokenProvider`],
///    exchanging Server-to-Server credentials only when the cached token has expired
/// 3. The call is sent; non-2xx responses are classified into an [`ApiError`]
/// 4. Successful bodies come back with their pagination fields
/// 5. Resource services map bodies onto typed records or a [`PagedCollection`]
pub mod auth;
pub mod client;
pub mod collection;
pub mod config;
pub mod oauth;
pub mod pagination;
pub mod records;
pub mod resources;
pub mod types;

pub use auth::{AuthMode, CachedToken, Credentials, ServerToServerCredentials, TokenProvider};
pub use client::{ApiResponse, RequestOptions, ZoomClient};
pub use collection::PagedCollection;
pub use config::{ApiConfig, OAuth2Config, ServerToServerConfig, ZoomConfig};
pub use oauth::{OAuthClient, OAuthToken};
pub use pagination::PaginationEnvelope;
pub use records::{
    CustomAttribute, CustomQuestion, LicenseInfo, ListRecord, Meeting, MeetingType, Participant,
    ParticipantStatus, Record, Registrant, User, UserSettings, UserType,
};
pub use resources::{Meetings, Reports, Users, Webinars};
pub use types::{ApiError, ApiErrorKind, FieldErrors, ZoomError};
