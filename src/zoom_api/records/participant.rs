use super::{decode, lenient, ListRecord, Record};
use crate::zoom_api::collection::PagedCollection;
use crate::zoom_api::types::ZoomError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a participant currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    InMeeting,
    InWaitingRoom,
}

impl ParticipantStatus {
    pub fn name(self) -> &'static str {
        match self {
            ParticipantStatus::InMeeting => "In Meeting",
            ParticipantStatus::InWaitingRoom => "In Waiting Room",
        }
    }
}

/// A meeting participant, as returned by the participant report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub participant_user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub join_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub leave_time: Option<DateTime<Utc>>,
    /// Time in the meeting, in seconds
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<ParticipantStatus>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub customer_key: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub registrant_id: Option<String>,
    /// Breakout room meeting ID
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bo_mtg_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub failover: Option<bool>,
    #[serde(skip)]
    raw: Value,
}

impl Participant {
    /// Duration rounded up to whole minutes
    pub fn duration_minutes(&self) -> Option<i64> {
        self.duration.map(|seconds| (seconds as f64 / 60.0).ceil() as i64)
    }

    /// Duration in hours, rounded to two decimals
    pub fn duration_hours(&self) -> Option<f64> {
        self.duration
            .map(|seconds| (seconds as f64 / 3600.0 * 100.0).round() / 100.0)
    }

    /// No leave time has been recorded
    pub fn is_in_meeting(&self) -> bool {
        self.leave_time.is_none()
    }

    pub fn has_left(&self) -> bool {
        self.leave_time.is_some()
    }

    pub fn has_in_meeting_status(&self) -> bool {
        self.status == Some(ParticipantStatus::InMeeting)
    }

    pub fn is_in_waiting_room(&self) -> bool {
        self.status == Some(ParticipantStatus::InWaitingRoom)
    }

    pub fn status_name(&self) -> &'static str {
        self.status.map_or("Unknown", ParticipantStatus::name)
    }

    pub fn is_in_breakout_room(&self) -> bool {
        self.bo_mtg_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

impl Record for Participant {
    fn from_json(raw: Value) -> Result<Self, ZoomError> {
        let mut participant: Participant = decode(&raw, "participant")?;
        participant.raw = raw;
        Ok(participant)
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}

impl ListRecord for Participant {
    const LIST_KEY: &'static str = "participants";
}

impl PagedCollection<Participant> {
    pub fn still_in_meeting(&self) -> Self {
        self.filter(Participant::is_in_meeting)
    }

    pub fn left(&self) -> Self {
        self.filter(Participant::has_left)
    }

    pub fn with_in_meeting_status(&self) -> Self {
        self.filter(Participant::has_in_meeting_status)
    }

    pub fn in_waiting_room(&self) -> Self {
        self.filter(Participant::is_in_waiting_room)
    }

    pub fn by_status(&self, status: ParticipantStatus) -> Self {
        self.filter(|participant| participant.status == Some(status))
    }

    pub fn in_breakout_rooms(&self) -> Self {
        self.filter(Participant::is_in_breakout_room)
    }

    pub fn with_failover(&self) -> Self {
        self.filter(|participant| participant.failover == Some(true))
    }

    /// Sum of all durations in seconds; missing durations count as zero
    ///
    /// Saturates at the `i64` bounds.
    pub fn total_duration(&self) -> i64 {
        self.iter()
            .map(|participant| participant.duration.unwrap_or(0))
            .fold(0i64, |total, seconds| total.saturating_add(seconds))
    }

    pub fn average_duration(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let total: i128 = self
            .iter()
            .map(|participant| i128::from(participant.duration.unwrap_or(0)))
            .sum();
        total as f64 / self.count() as f64
    }

    /// First participant with the greatest duration
    pub fn longest_duration(&self) -> Option<&Participant> {
        self.iter().fold(None, |longest: Option<&Participant>, participant| match longest {
            Some(current) if participant.duration.unwrap_or(0) <= current.duration.unwrap_or(0) => {
                Some(current)
            }
            _ => Some(participant),
        })
    }

    /// First participant with the smallest duration; missing durations sort last
    pub fn shortest_duration(&self) -> Option<&Participant> {
        self.iter().fold(None, |shortest: Option<&Participant>, participant| match shortest {
            Some(current)
                if participant.duration.unwrap_or(i64::MAX)
                    >= current.duration.unwrap_or(i64::MAX) =>
            {
                Some(current)
            }
            _ => Some(participant),
        })
    }
}
