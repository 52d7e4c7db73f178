use super::path_id;
use crate::zoom_api::client::{RequestOptions, ZoomClient};
use crate::zoom_api::collection::PagedCollection;
use crate::zoom_api::records::{Meeting, Registrant};
use crate::zoom_api::types::ZoomError;
use reqwest::Method;
use serde_json::Value;
use std::fmt::Display;

/// Meeting endpoints
#[derive(Debug, Clone, Copy)]
pub struct Meetings<'a> {
    client: &'a ZoomClient,
}

impl<'a> Meetings<'a> {
    pub(crate) fn new(client: &'a ZoomClient) -> Self {
        Self { client }
    }

    /// Schedule a meeting for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The host's user ID or email, or `"me"` for the token owner
    /// * `body` - Meeting definition (`topic`, `type`, `start_time`, `duration`, ...)
    ///
    /// # Returns
    ///
    /// Returns `Ok(Meeting)` with the created meeting, including its `join_url`,
    /// or `Err(ZoomError)` if the request fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use serde_json::json;
    /// use zoom_sdk::ZoomClient;
    ///
    /// # async fn example(client: &ZoomClient) -> Result<(), zoom_sdk::ZoomError> {
    /// let meeting = client
    ///     .meetings()
    ///     .create("me", json!({"topic": "Weekly sync", "type": 2, "duration": 30}))
    ///     .await?;
    /// println!("Join at {:?}", meeting.join_url);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, user_id: &str, body: Value) -> Result<Meeting, ZoomError> {
        let path = format!("users/{}/meetings", path_id(user_id));
        self.client
            .request(Method::POST, &path, RequestOptions::new().body(body))
            .await?
            .into_record()
    }

    /// One page of a user's meetings
    ///
    /// # Arguments
    ///
    /// * `user_id` - The host's user ID or email, or `"me"`
    /// * `options` - Query parameters such as `type`, `page_size` and `next_page_token`
    ///
    /// # Returns
    ///
    /// Returns the page as a `PagedCollection<Meeting>` carrying the server's
    /// pagination metadata. Elements that cannot be decoded are skipped.
    pub async fn list(
        &self,
        user_id: &str,
        options: RequestOptions,
    ) -> Result<PagedCollection<Meeting>, ZoomError> {
        let path = format!("users/{}/meetings", path_id(user_id));
        let response = self.client.request(Method::GET, &path, options).await?;
        Ok(PagedCollection::from_response(response))
    }

    /// Fetch a meeting by numeric ID or UUID
    pub async fn get(
        &self,
        meeting_id: impl Display,
        options: RequestOptions,
    ) -> Result<Meeting, ZoomError> {
        let path = format!("meetings/{}", path_id(meeting_id));
        self.client
            .request(Method::GET, &path, options)
            .await?
            .into_record()
    }

    /// Update a meeting's details
    ///
    /// # Arguments
    ///
    /// * `meeting_id` - The meeting's numeric ID
    /// * `body` - The fields to change; omitted fields keep their current value
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once Zoom accepts the update (it answers `204 No Content`).
    pub async fn update(&self, meeting_id: impl Display, body: Value) -> Result<(), ZoomError> {
        let path = format!("meetings/{}", path_id(meeting_id));
        self.client
            .request(Method::PATCH, &path, RequestOptions::new().body(body))
            .await?;
        Ok(())
    }

    /// Delete a meeting
    ///
    /// # Arguments
    ///
    /// * `meeting_id` - The meeting's numeric ID
    /// * `options` - Optional `occurrence_id` or `schedule_for_reminder` query parameters
    pub async fn delete(
        &self,
        meeting_id: impl Display,
        options: RequestOptions,
    ) -> Result<(), ZoomError> {
        let path = format!("meetings/{}", path_id(meeting_id));
        self.client.request(Method::DELETE, &path, options).await?;
        Ok(())
    }

    /// Register a participant for a meeting that requires registration
    ///
    /// # Arguments
    ///
    /// * `meeting_id` - The meeting's numeric ID
    /// * `body` - Registrant details; `email` and `first_name` are required
    ///
    /// # Returns
    ///
    /// Returns `Ok(Registrant)` holding the `registrant_id` and personal `join_url`.
    pub async fn add_registrant(
        &self,
        meeting_id: impl Display,
        body: Value,
    ) -> Result<Registrant, ZoomError> {
        let path = format!("meetings/{}/registrants", path_id(meeting_id));
        self.client
            .request(Method::POST, &path, RequestOptions::new().body(body))
            .await?
            .into_record()
    }

    /// One page of a meeting's registrants; filter with the `status` query parameter
    pub async fn list_registrants(
        &self,
        meeting_id: impl Display,
        options: RequestOptions,
    ) -> Result<PagedCollection<Registrant>, ZoomError> {
        let path = format!("meetings/{}/registrants", path_id(meeting_id));
        let response = self.client.request(Method::GET, &path, options).await?;
        Ok(PagedCollection::from_response(response))
    }
}
