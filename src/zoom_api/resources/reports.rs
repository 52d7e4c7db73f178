use super::path_id;
use crate::zoom_api::client::{RequestOptions, ZoomClient};
use crate::zoom_api::collection::PagedCollection;
use crate::zoom_api::records::Participant;
use crate::zoom_api::types::ZoomError;
use reqwest::Method;
use std::fmt::Display;

/// Report endpoints
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a> {
    client: &'a ZoomClient,
}

impl<'a> Reports<'a> {
    pub(crate) fn new(client: &'a ZoomClient) -> Self {
        Self { client }
    }

    /// Participants of a past meeting instance
    ///
    /// Pass a meeting UUID to report on one occurrence of a recurring meeting;
    /// a numeric ID reports on the latest instance.
    pub async fn meeting_participants(
        &self,
        meeting_id: impl Display,
        options: RequestOptions,
    ) -> Result<PagedCollection<Participant>, ZoomError> {
        let path = format!("report/meetings/{}/participants", path_id(meeting_id));
        let response = self.client.request(Method::GET, &path, options).await?;
        Ok(PagedCollection::from_response(response))
    }
}
