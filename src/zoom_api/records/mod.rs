//! Typed Zoom records
//!
//! Each record is decoded once from a raw JSON object and keeps that object
//! (see [`Record::raw`]) so fields the type does not model remain available.
//! Decoding is lenient: optional fields with an unexpected type or an
//! unparseable timestamp are treated as absent rather than failing the record.

pub mod meeting;
pub mod participant;
pub mod registrant;
pub mod settings;
pub mod user;

pub use meeting::{Meeting, MeetingType};
pub use participant::{Participant, ParticipantStatus};
pub use registrant::{CustomQuestion, Registrant};
pub use settings::UserSettings;
pub use user::{CustomAttribute, LicenseInfo, User, UserType};

use crate::zoom_api::types::ZoomError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A typed view over a raw Zoom JSON object
pub trait Record: Sized + Serialize {
    /// Map a raw JSON object onto the record
    fn from_json(raw: Value) -> Result<Self, ZoomError>;

    /// The JSON object the record was decoded from
    fn raw(&self) -> &Value;

    /// The modeled fields, serialized with Zoom's field names
    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// A record returned by list endpoints
pub trait ListRecord: Record + Clone {
    /// Key holding the array in list responses (e.g. `"meetings"`)
    const LIST_KEY: &'static str;
}

/// Deserialize the modeled fields of `raw`. Only JSON objects are accepted.
pub(crate) fn decode<T: DeserializeOwned>(raw: &Value, record: &str) -> Result<T, ZoomError> {
    if !raw.is_object() {
        return Err(ZoomError::Parse(format!(
            "Expected a JSON object for {}, got {}",
            record,
            json_type(raw)
        )));
    }

    T::deserialize(raw).map_err(|e| ZoomError::Parse(format!("Invalid {}: {}", record, e)))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Optional field that decodes to `None` instead of failing on a type mismatch
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| T::deserialize(v).ok()))
}

/// List field that skips elements of the wrong shape; a non-array is empty
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(elements)) => elements
            .into_iter()
            .filter_map(|element| T::deserialize(element).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Optional string that Zoom sometimes sends as a number
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient")]
        count: Option<i64>,
        #[serde(default, deserialize_with = "string_or_number")]
        code: Option<String>,
    }

    #[test]
    fn test_lenient_field() {
        let sample: Sample = decode(&json!({"count": "many"}), "sample").unwrap();
        assert_eq!(sample.count, None);

        let sample: Sample = decode(&json!({"count": 4}), "sample").unwrap();
        assert_eq!(sample.count, Some(4));
    }

    #[test]
    fn test_string_or_number() {
        let sample: Sample = decode(&json!({"code": 1234567890}), "sample").unwrap();
        assert_eq!(sample.code.as_deref(), Some("1234567890"));

        let sample: Sample = decode(&json!({"code": "abc"}), "sample").unwrap();
        assert_eq!(sample.code.as_deref(), Some("abc"));

        let sample: Sample = decode(&json!({"code": null}), "sample").unwrap();
        assert_eq!(sample.code, None);
    }

    #[test]
    fn test_lenient_list() {
        #[derive(Debug, Deserialize)]
        struct Tags {
            #[serde(default, deserialize_with = "lenient_list")]
            ids: Vec<String>,
        }

        let tags: Tags = decode(&json!({"ids": ["a", 1, "b"]}), "tags").unwrap();
        assert_eq!(tags.ids, vec!["a", "b"]);

        let tags: Tags = decode(&json!({"ids": "a"}), "tags").unwrap();
        assert!(tags.ids.is_empty());

        let tags: Tags = decode(&json!({}), "tags").unwrap();
        assert!(tags.ids.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        let result: Result<Sample, _> = decode(&json!([1, "x"]), "sample");
        assert!(matches!(result, Err(ZoomError::Parse(_))));
    }
}
