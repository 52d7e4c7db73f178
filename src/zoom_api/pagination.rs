use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cursor-based pagination fields returned by Zoom list endpoints
///
/// Zoom reports pagination in the top level of the response body, next to the
/// list itself. Fields the server did not send stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl PaginationEnvelope {
    /// Read the envelope off a response body
    ///
    /// Returns `None` when none of the five fields are present.
    pub fn from_body(body: &Value) -> Option<Self> {
        let number = |name: &str| body.get(name).and_then(Value::as_u64);

        let envelope = Self {
            page_count: number("page_count"),
            page_number: number("page_number"),
            page_size: number("page_size"),
            total_records: number("total_records"),
            next_page_token: body
                .get("next_page_token")
                .and_then(Value::as_str)
                .map(str::to_string),
        };

        if envelope == Self::default() {
            None
        } else {
            Some(envelope)
        }
    }

    /// A non-empty cursor for the next page exists
    pub fn has_more_pages(&self) -> bool {
        self.next_page_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}
