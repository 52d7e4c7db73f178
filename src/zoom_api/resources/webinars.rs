use super::path_id;
use crate::zoom_api::client::{ApiResponse, RequestOptions, ZoomClient};
use crate::zoom_api::types::ZoomError;
use reqwest::Method;
use serde_json::Value;
use std::fmt::Display;

/// Webinar endpoints
///
/// Webinars have no typed record; every call returns the decoded body and its
/// pagination as-is.
#[derive(Debug, Clone, Copy)]
pub struct Webinars<'a> {
    client: &'a ZoomClient,
}

impl<'a> Webinars<'a> {
    pub(crate) fn new(client: &'a ZoomClient) -> Self {
        Self { client }
    }

    /// Schedule a webinar for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The host's user ID or email, or `"me"`
    /// * `body` - Webinar definition (`topic`, `type`, `start_time`, ...)
    ///
    /// # Returns
    ///
    /// Returns the created webinar as raw JSON in `ApiResponse::body`.
    pub async fn create(&self, user_id: &str, body: Value) -> Result<ApiResponse, ZoomError> {
        let path = format!("users/{}/webinars", path_id(user_id));
        self.client
            .request(Method::POST, &path, RequestOptions::new().body(body))
            .await
    }

    /// One page of a user's webinars, with the page's pagination envelope
    pub async fn list(&self, user_id: &str, options: RequestOptions) -> Result<ApiResponse, ZoomError> {
        let path = format!("users/{}/webinars", path_id(user_id));
        self.client.request(Method::GET, &path, options).await
    }

    /// Fetch a webinar by numeric ID or UUID
    pub async fn get(
        &self,
        webinar_id: impl Display,
        options: RequestOptions,
    ) -> Result<ApiResponse, ZoomError> {
        let path = format!("webinars/{}", path_id(webinar_id));
        self.client.request(Method::GET, &path, options).await
    }

    /// Update a webinar's details
    ///
    /// # Arguments
    ///
    /// * `webinar_id` - The webinar's numeric ID
    /// * `body` - The fields to change
    ///
    /// # Returns
    ///
    /// Returns the response as-is; Zoom answers `204 No Content`, so `body` is `Null`.
    pub async fn update(&self, webinar_id: impl Display, body: Value) -> Result<ApiResponse, ZoomError> {
        let path = format!("webinars/{}", path_id(webinar_id));
        self.client
            .request(Method::PATCH, &path, RequestOptions::new().body(body))
            .await
    }

    /// Delete a webinar, or one occurrence of it via `occurrence_id`
    pub async fn delete(
        &self,
        webinar_id: impl Display,
        options: RequestOptions,
    ) -> Result<(), ZoomError> {
        let path = format!("webinars/{}", path_id(webinar_id));
        self.client.request(Method::DELETE, &path, options).await?;
        Ok(())
    }

    /// Register a participant for a webinar
    ///
    /// # Arguments
    ///
    /// * `webinar_id` - The webinar's numeric ID
    /// * `body` - Registrant details; `email` and `first_name` are required
    ///
    /// # Returns
    ///
    /// Returns the registration (`registrant_id`, `join_url`) as raw JSON.
    pub async fn add_registrant(
        &self,
        webinar_id: impl Display,
        body: Value,
    ) -> Result<ApiResponse, ZoomError> {
        let path = format!("webinars/{}/registrants", path_id(webinar_id));
        self.client
            .request(Method::POST, &path, RequestOptions::new().body(body))
            .await
    }

    /// One page of a webinar's registrants
    pub async fn list_registrants(
        &self,
        webinar_id: impl Display,
        options: RequestOptions,
    ) -> Result<ApiResponse, ZoomError> {
        let path = format!("webinars/{}/registrants", path_id(webinar_id));
        self.client.request(Method::GET, &path, options).await
    }
}
