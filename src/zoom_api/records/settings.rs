use super::{decode, lenient, Record};
use crate::zoom_api::types::ZoomError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user's settings, grouped in the sections Zoom returns them in
///
/// Sections are kept as raw JSON; use [`UserSettings::setting`] to reach any
/// nested value by path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub schedule_meeting: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub in_meeting: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub email_notification: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub recording: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub telephony: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub feature: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tsp: Option<Value>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub audio_conferencing: Option<Value>,
    #[serde(skip)]
    raw: Value,
}

impl UserSettings {
    /// Look up a value by dotted path, e.g. `"schedule_meeting.host_video"`
    ///
    /// Returns `None` when any segment is missing or the value is null.
    pub fn setting(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.raw, |value, key| value.get(key))
            .filter(|value| !value.is_null())
    }

    fn flag(&self, path: &str) -> Option<bool> {
        self.setting(path).and_then(Value::as_bool)
    }

    /// Host video on by default when scheduling
    pub fn host_video_enabled(&self) -> Option<bool> {
        self.flag("schedule_meeting.host_video")
    }

    pub fn participant_video_enabled(&self) -> Option<bool> {
        self.flag("schedule_meeting.participants_video")
    }

    pub fn cloud_recording_enabled(&self) -> Option<bool> {
        self.flag("recording.cloud_recording")
    }

    pub fn local_recording_enabled(&self) -> Option<bool> {
        self.flag("recording.local_recording")
    }
}

impl Record for UserSettings {
    fn from_json(raw: Value) -> Result<Self, ZoomError> {
        let mut settings: UserSettings = decode(&raw, "user settings")?;
        settings.raw = raw;
        Ok(settings)
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}
