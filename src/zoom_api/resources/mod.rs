//! Typed wrappers over [`ZoomClient::request`](crate::zoom_api::client::ZoomClient::request)
//!
//! Each service borrows the client it was created from, so services are cheap to
//! create per call: `client.meetings().get(id, RequestOptions::new())`.

mod meetings;
mod reports;
mod users;
mod webinars;

pub use meetings::Meetings;
pub use reports::Reports;
pub use users::Users;
pub use webinars::Webinars;

use std::fmt::Display;

/// Encode an ID for use as a single path segment
///
/// Everything outside the unreserved set is percent-encoded, so a space becomes
/// `%20`. Meeting UUIDs that start with `/` or contain `//` must be encoded twice.
pub(crate) fn path_id(id: impl Display) -> String {
    let raw = id.to_string();
    let once = urlencoding::encode(&raw).into_owned();

    if raw.starts_with('/') || raw.contains("//") {
        urlencoding::encode(&once).into_owned()
    } else {
        once
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ids_are_unchanged() {
        assert_eq!(path_id(85746065432_i64), "85746065432");
        assert_eq!(path_id("me"), "me");
        assert_eq!(path_id("KDcuGIm1QgePTO8WbOqwIQ"), "KDcuGIm1QgePTO8WbOqwIQ");
    }

    #[test]
    fn test_uuid_encoding() {
        assert_eq!(path_id("aDYl+hsH/Rt=="), "aDYl%2BhsH%2FRt%3D%3D");
        assert_eq!(path_id("/ajXp112QmuoKj4854875=="), "%252FajXp112QmuoKj4854875%253D%253D");
        assert_eq!(path_id("ab//cd"), "ab%252F%252Fcd");
    }

    #[test]
    fn test_space_is_percent_encoded() {
        assert_eq!(path_id("first last@example.com"), "first%20last%40example.com");
        assert_eq!(path_id("a+b c"), "a%2Bb%20c");
        assert_eq!(path_id("x y-z_1.2~"), "x%20y-z_1.2~");
    }
}
