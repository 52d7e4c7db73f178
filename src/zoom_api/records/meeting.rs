use super::{decode, lenient, string_or_number, ListRecord, Record};
use crate::zoom_api::collection::PagedCollection;
use crate::zoom_api::types::ZoomError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Zoom meeting type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum MeetingType {
    Instant,
    Scheduled,
    RecurringNoFixedTime,
    RecurringFixedTime,
}

impl MeetingType {
    pub fn code(self) -> i64 {
        match self {
            MeetingType::Instant => 1,
            MeetingType::Scheduled => 2,
            MeetingType::RecurringNoFixedTime => 3,
            MeetingType::RecurringFixedTime => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MeetingType::Instant => "Instant Meeting",
            MeetingType::Scheduled => "Scheduled Meeting",
            MeetingType::RecurringNoFixedTime => "Recurring Meeting with no fixed time",
            MeetingType::RecurringFixedTime => "Recurring Meeting with fixed time",
        }
    }

    pub fn is_recurring(self) -> bool {
        matches!(
            self,
            MeetingType::RecurringNoFixedTime | MeetingType::RecurringFixedTime
        )
    }

    pub fn is_scheduled(self) -> bool {
        self == MeetingType::Scheduled
    }

    pub fn is_instant(self) -> bool {
        self == MeetingType::Instant
    }
}

impl TryFrom<i64> for MeetingType {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(MeetingType::Instant),
            2 => Ok(MeetingType::Scheduled),
            3 => Ok(MeetingType::RecurringNoFixedTime),
            8 => Ok(MeetingType::RecurringFixedTime),
            other => Err(format!("unknown meeting type {}", other)),
        }
    }
}

impl From<MeetingType> for i64 {
    fn from(meeting_type: MeetingType) -> Self {
        meeting_type.code()
    }
}

/// A Zoom meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub host_id: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub meeting_type: Option<MeetingType>,
    /// Truncated to 250 characters in list responses
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Scheduled duration in minutes
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub join_url: Option<String>,
    /// Personal meeting ID, only set when the PMI was used to schedule
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub pmi: Option<String>,
    #[serde(skip)]
    raw: Value,
}

impl Meeting {
    pub fn type_name(&self) -> &'static str {
        self.meeting_type.map_or("Unknown", MeetingType::name)
    }

    pub fn is_recurring(&self) -> bool {
        self.meeting_type.is_some_and(MeetingType::is_recurring)
    }

    pub fn is_scheduled(&self) -> bool {
        self.meeting_type.is_some_and(MeetingType::is_scheduled)
    }

    pub fn is_instant(&self) -> bool {
        self.meeting_type.is_some_and(MeetingType::is_instant)
    }

    /// Start time plus duration; requires both and a non-zero duration
    ///
    /// Durations that fall outside chrono's representable range yield `None`.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        let start = self.start_time?;
        match self.duration {
            Some(minutes) if minutes != 0 => {
                Duration::try_minutes(minutes).and_then(|length| start.checked_add_signed(length))
            }
            _ => None,
        }
    }

    pub fn has_started_at(&self, now: DateTime<Utc>) -> bool {
        self.start_time.is_some_and(|start| start <= now)
    }

    pub fn has_ended_at(&self, now: DateTime<Utc>) -> bool {
        self.end_time().is_some_and(|end| end <= now)
    }

    pub fn is_in_progress_at(&self, now: DateTime<Utc>) -> bool {
        self.has_started_at(now) && !self.has_ended_at(now)
    }

    pub fn has_started(&self) -> bool {
        self.has_started_at(Utc::now())
    }

    pub fn has_ended(&self) -> bool {
        self.has_ended_at(Utc::now())
    }

    pub fn is_in_progress(&self) -> bool {
        self.is_in_progress_at(Utc::now())
    }

    /// Scheduled with the host's Personal Meeting ID
    pub fn is_pmi(&self) -> bool {
        self.pmi.as_deref().is_some_and(|pmi| !pmi.is_empty())
    }
}

impl Record for Meeting {
    fn from_json(raw: Value) -> Result<Self, ZoomError> {
        let mut meeting: Meeting = decode(&raw, "meeting")?;
        meeting.raw = raw;
        Ok(meeting)
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}

impl ListRecord for Meeting {
    const LIST_KEY: &'static str = "meetings";
}

impl PagedCollection<Meeting> {
    pub fn by_type(&self, meeting_type: MeetingType) -> Self {
        self.filter(|meeting| meeting.meeting_type == Some(meeting_type))
    }

    pub fn scheduled(&self) -> Self {
        self.filter(Meeting::is_scheduled)
    }

    pub fn recurring(&self) -> Self {
        self.filter(Meeting::is_recurring)
    }

    /// Meetings that have not started yet
    pub fn upcoming(&self) -> Self {
        let now = Utc::now();
        self.filter(|meeting| !meeting.has_started_at(now))
    }

    pub fn past(&self) -> Self {
        let now = Utc::now();
        self.filter(|meeting| meeting.has_ended_at(now))
    }

    pub fn in_progress(&self) -> Self {
        let now = Utc::now();
        self.filter(|meeting| meeting.is_in_progress_at(now))
    }
}
