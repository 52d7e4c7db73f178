use super::path_id;
use crate::zoom_api::client::{RequestOptions, ZoomClient};
use crate::zoom_api::collection::PagedCollection;
use crate::zoom_api::records::{User, UserSettings};
use crate::zoom_api::types::ZoomError;
use reqwest::Method;
use serde_json::Value;

/// User endpoints
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a ZoomClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a ZoomClient) -> Self {
        Self { client }
    }

    /// One page of the account's users
    ///
    /// # Arguments
    ///
    /// * `options` - Query parameters such as `status`, `role_id`, `page_size`
    ///   and `next_page_token`
    ///
    /// # Returns
    ///
    /// Returns the page as a `PagedCollection<User>`, or `Err(ZoomError)` if the
    /// request fails.
    pub async fn list(&self, options: RequestOptions) -> Result<PagedCollection<User>, ZoomError> {
        let response = self.client.request(Method::GET, "users", options).await?;
        Ok(PagedCollection::from_response(response))
    }

    /// Fetch a user by ID, email, or `"me"`
    pub async fn get(&self, user_id: &str, options: RequestOptions) -> Result<User, ZoomError> {
        let path = format!("users/{}", path_id(user_id));
        self.client
            .request(Method::GET, &path, options)
            .await?
            .into_record()
    }

    /// Create a user; `body` carries `action` and `user_info`
    pub async fn create(&self, body: Value) -> Result<User, ZoomError> {
        self.client
            .request(Method::POST, "users", RequestOptions::new().body(body))
            .await?
            .into_record()
    }

    /// Update a user's profile
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's ID or email, or `"me"`
    /// * `body` - The profile fields to change
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once Zoom accepts the update.
    pub async fn update(&self, user_id: &str, body: Value) -> Result<(), ZoomError> {
        let path = format!("users/{}", path_id(user_id));
        self.client
            .request(Method::PATCH, &path, RequestOptions::new().body(body))
            .await?;
        Ok(())
    }

    /// Delete or disassociate a user, depending on the `action` query parameter
    pub async fn delete(&self, user_id: &str, options: RequestOptions) -> Result<(), ZoomError> {
        let path = format!("users/{}", path_id(user_id));
        self.client.request(Method::DELETE, &path, options).await?;
        Ok(())
    }

    /// Fetch a user's meeting, recording and feature settings
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's ID or email, or `"me"`
    /// * `options` - Optional `option` or `custom_query_fields` query parameters
    ///
    /// # Returns
    ///
    /// Returns `Ok(UserSettings)`. Sections not modeled by the type stay
    /// reachable through [`UserSettings::setting`].
    pub async fn settings(
        &self,
        user_id: &str,
        options: RequestOptions,
    ) -> Result<UserSettings, ZoomError> {
        let path = format!("users/{}/settings", path_id(user_id));
        self.client
            .request(Method::GET, &path, options)
            .await?
            .into_record()
    }

    /// Update a user's settings; `body` holds only the sections to change
    pub async fn update_settings(&self, user_id: &str, body: Value) -> Result<(), ZoomError> {
        let path = format!("users/{}/settings", path_id(user_id));
        self.client
            .request(Method::PATCH, &path, RequestOptions::new().body(body))
            .await?;
        Ok(())
    }
}
