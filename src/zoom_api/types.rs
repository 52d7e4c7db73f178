use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation messages keyed by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Zoom SDK error type
///
/// Represents all possible errors that can occur when talking to the Zoom API
/// or preparing a client to do so.
#[derive(Debug)]
pub enum ZoomError {
    /// The API (or the token endpoint) rejected the request
    Api(ApiError),
    /// Network failure: connection refused, DNS, timeout, etc.
    Connection(String),
    /// A successful response carried a body that is not valid JSON
    Parse(String),
    /// Configuration error
    Config(String),
}

impl ZoomError {
    /// The classified API error kind, if this is an API error
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            ZoomError::Api(err) => Some(err.kind),
            _ => None,
        }
    }

    /// HTTP status carried by an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ZoomError::Api(err) => Some(err.status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == Some(ApiErrorKind::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ApiErrorKind::NotFound)
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == Some(ApiErrorKind::Validation)
    }
}

impl fmt::Display for ZoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoomError::Api(err) => write!(f, "API error: {}", err),
            ZoomError::Connection(msg) => write!(f, "Connection error: {}", msg),
            ZoomError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ZoomError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ZoomError {}

impl From<ApiError> for ZoomError {
    fn from(err: ApiError) -> Self {
        ZoomError::Api(err)
    }
}

impl From<reqwest::Error> for ZoomError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ZoomError::Connection("Request timeout".to_string())
        } else if err.is_connect() {
            ZoomError::Connection(format!("Connection failed: {}", err))
        } else if err.is_builder() {
            ZoomError::Config(format!("Failed to build request: {}", err))
        } else {
            ZoomError::Connection(err.to_string())
        }
    }
}

/// Category of a failed API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401/403, or credentials missing / token exchange failed
    Unauthorized,
    /// 404
    NotFound,
    /// 400/422
    Validation,
    /// Any other non-2xx status
    Generic,
}

impl ApiErrorKind {
    /// Map an HTTP status code onto an error kind
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiErrorKind::Unauthorized,
            404 => ApiErrorKind::NotFound,
            400 | 422 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Generic,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::Validation => "validation failed",
            ApiErrorKind::Generic => "request failed",
        };
        f.write_str(name)
    }
}

/// A failed API call
///
/// `status` is the HTTP status of the response that failed. It is `0` when the
/// failure was detected before any HTTP exchange (e.g. no credentials configured).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: u16,
    pub field_errors: Option<FieldErrors>,
}

impl ApiError {
    /// Authentication failure raised locally or by the token endpoint
    pub fn unauthorized(message: impl Into<String>, status: u16) -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: message.into(),
            status,
            field_errors: None,
        }
    }

    /// Messages for a single field, if the response carried any
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.field_errors
            .as_ref()
            .and_then(|errors| errors.get(name))
            .map(Vec::as_slice)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status == 0 {
            write!(f, "{} - {}", self.kind, self.message)
        } else {
            write!(f, "HTTP {} {} - {}", self.status, self.kind, self.message)
        }
    }
}

impl std::error::Error for ApiError {}

/// Classify a non-2xx response into an [`ApiError`]
///
/// Pure function of the status and the (possibly `Null`) JSON body. The message is
/// taken from `message`, then `error`, falling back to `"API error"`. Field errors are
/// only read from the `errors` member.
pub fn classify(status: u16, body: &Value) -> ApiError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .unwrap_or("API error")
        .to_string();

    ApiError {
        kind: ApiErrorKind::from_status(status),
        message,
        status,
        field_errors: body.get("errors").and_then(parse_field_errors),
    }
}

/// Normalize the `errors` member of an error body.
///
/// Accepts `{"field": ["msg", ..]}`, `{"field": "msg"}` and
/// `[{"field": "..", "message": ".."}]`.
fn parse_field_errors(errors: &Value) -> Option<FieldErrors> {
    let mut parsed = FieldErrors::new();

    match errors {
        Value::Object(map) => {
            for (field, messages) in map {
                let entry = parsed.entry(field.clone()).or_default();
                match messages {
                    Value::String(msg) => entry.push(msg.clone()),
                    Value::Array(items) => {
                        entry.extend(items.iter().filter_map(Value::as_str).map(str::to_string))
                    }
                    other => entry.push(other.to_string()),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                let Some(field) = item.get("field").and_then(Value::as_str) else {
                    continue;
                };
                let message = item
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                parsed.entry(field.to_string()).or_default().push(message);
            }
        }
        _ => return None,
    }

    if parsed.is_empty() {
        None
    } else {
        Some(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiErrorKind::from_status(401), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_status(403), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_status(400), ApiErrorKind::Validation);
        assert_eq!(ApiErrorKind::from_status(422), ApiErrorKind::Validation);
        assert_eq!(ApiErrorKind::from_status(429), ApiErrorKind::Generic);
        assert_eq!(ApiErrorKind::from_status(500), ApiErrorKind::Generic);
    }

    #[test]
    fn test_classify_unauthorized() {
        let err = classify(401, &json!({"code": 124, "message": "Invalid token"}));
        assert_eq!(err.kind, ApiErrorKind::Unauthorized);
        assert_eq!(err.message, "Invalid token");
        assert_eq!(err.status, 401);
        assert!(err.field_errors.is_none());
    }

    #[test]
    fn test_classify_validation_with_field_errors() {
        let err = classify(
            422,
            &json!({"message": "Bad", "errors": {"topic": ["required"]}}),
        );
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.message, "Bad");
        assert_eq!(err.field("topic"), Some(&["required".to_string()][..]));
    }

    #[test]
    fn test_classify_zoom_style_error_array() {
        let err = classify(
            400,
            &json!({
                "code": 300,
                "message": "Validation Failed.",
                "errors": [
                    {"field": "settings.jbh_time", "message": "Invalid parameter: jbh_time."},
                    {"field": "start_time", "message": "Invalid date."}
                ]
            }),
        );
        let fields = err.field_errors.expect("field errors");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["start_time"], vec!["Invalid date.".to_string()]);
    }

    #[test]
    fn test_classify_message_fallbacks() {
        let err = classify(500, &json!({"error": "internal"}));
        assert_eq!(err.message, "internal");
        assert_eq!(err.kind, ApiErrorKind::Generic);

        let err = classify(502, &Value::Null);
        assert_eq!(err.message, "API error");
        assert_eq!(err.status, 502);
    }

    #[test]
    fn test_classify_ignores_empty_errors() {
        let err = classify(400, &json!({"message": "Bad", "errors": {}}));
        assert!(err.field_errors.is_none());

        let err = classify(400, &json!({"message": "Bad", "errors": "nope"}));
        assert!(err.field_errors.is_none());
    }

    #[test]
    fn test_error_display() {
        let err = ZoomError::from(classify(404, &json!({"message": "Meeting does not exist"})));
        assert_eq!(
            err.to_string(),
            "API error: HTTP 404 not found - Meeting does not exist"
        );
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));

        let local = ZoomError::from(ApiError::unauthorized("no credentials", 0));
        assert_eq!(local.to_string(), "API error: unauthorized - no credentials");
        assert!(local.is_unauthorized());
    }

    #[test]
    fn test_non_api_errors_have_no_kind() {
        let err = ZoomError::Connection("Request timeout".to_string());
        assert_eq!(err.kind(), None);
        assert_eq!(err.status(), None);
        assert!(!err.is_unauthorized());
    }
}
