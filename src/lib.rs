//! Zoom SDK
//!
//! A Rust library for the Zoom REST API.
//!
//! This SDK provides:
//! - Bearer token and Server-to-Server OAuth authentication with in-memory token caching
//! - A request dispatcher that classifies failures into typed errors
//! - Typed records (meetings, users, participants, registrants, user settings)
//! - Paginated collections with domain filters
//! - OAuth authorization-code helpers
//!
//! # Example
//!
//! ```no_run
//! use zoom_sdk::{RequestOptions, ZoomClient, ZoomConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads ZOOM_ACCOUNT_ID, ZOOM_CLIENT_ID, ZOOM_CLIENT_SECRET, ...
//! let mut client = ZoomClient::new(ZoomConfig::from_env()?)?;
//! client.use_server_to_server();
//!
//! let me = client.me().await?;
//! println!("Signed in as {}", me.full_name());
//!
//! let page = client
//!     .reports()
//!     .meeting_participants("85746065432", RequestOptions::new().page_size(300))
//!     .await?;
//! println!(
//!     "{} participants, {} still connected, average {:.0}s",
//!     page.count(),
//!     page.still_in_meeting().count(),
//!     page.average_duration()
//! );
//!
//! if let Some(token) = page.next_page_token() {
//!     let _next = client
//!         .reports()
//!         .meeting_participants("85746065432", RequestOptions::new().next_page_token(token))
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

#![recursion_limit = "256"]

pub mod zoom_api;

// Re-export commonly used types
pub use zoom_api::{
    auth::{AuthMode, CachedToken, Credentials, ServerToServerCredentials, TokenProvider},
    client::{ApiResponse, RequestOptions, ZoomClient},
    collection::PagedCollection,
    config::ZoomConfig,
    oauth::{OAuthClient, OAuthToken},
    pagination::PaginationEnvelope,
    records::{
        CustomAttribute, CustomQuestion, LicenseInfo, ListRecord, Meeting, MeetingType,
        Participant, ParticipantStatus, Record, Registrant, User, UserSettings, UserType,
    },
    types::{ApiError, ApiErrorKind, ZoomError},
};
