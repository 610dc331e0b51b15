use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Start or end of an event: either a timed instant or an all-day date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    Timed {
        #[serde(rename = "dateTime")]
        date_time: String,
        #[serde(rename = "timeZone", default, skip_serializing_if = "Option::is_none")]
        time_zone: Option<String>,
    },
    AllDay {
        date: String,
    },
}

impl EventTime {
    /// Timed value without an explicit zone
    pub fn timed(date_time: &str) -> Self {
        EventTime::Timed {
            date_time: date_time.to_string(),
            time_zone: None,
        }
    }

    /// All-day value
    pub fn all_day(date: &str) -> Self {
        EventTime::AllDay {
            date: date.to_string(),
        }
    }
}

/// Upstream ordering of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum OrderBy {
    StartTime,
    Updated,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::StartTime => "startTime",
            OrderBy::Updated => "updated",
        }
    }
}

/// Event categories accepted by the `eventTypes` listing filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    Default,
    Birthday,
    FocusTime,
    OutOfOffice,
    WorkingLocation,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Default => "default",
            EventType::Birthday => "birthday",
            EventType::FocusTime => "focusTime",
            EventType::OutOfOffice => "outOfOffice",
            EventType::WorkingLocation => "workingLocation",
        }
    }
}

/// Attendee response to an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseStatus {
    NeedsAction,
    Declined,
    Tentative,
    Accepted,
    #[serde(other)]
    Unknown,
}

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_self: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub organizer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<ResponseStatus>,
}

impl Attendee {
    /// Name to show for this attendee
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown")
    }
}

/// Organizer or creator of an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_self: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    #[serde(default)]
    pub entry_point_type: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceData {
    #[serde(default)]
    pub entry_points: Vec<EntryPoint>,
}

/// Calendar event as returned by the events listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub organizer: Option<Person>,
    #[serde(default)]
    pub creator: Option<Person>,
    #[serde(default)]
    pub html_link: Option<String>,
    #[serde(default)]
    pub hangout_link: Option<String>,
    #[serde(default)]
    pub conference_data: Option<ConferenceData>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub color_id: Option<String>,
    #[serde(default)]
    pub recurring_event_id: Option<String>,
    #[serde(default)]
    pub recurrence: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl CalendarEvent {
    /// Video link, preferring the legacy Hangouts field
    pub fn conference_link(&self) -> Option<&str> {
        if let Some(link) = self.hangout_link.as_deref() {
            return Some(link);
        }
        self.conference_data.as_ref().and_then(|data| {
            data.entry_points
                .iter()
                .find(|ep| ep.entry_point_type.as_deref() == Some("video"))
                .and_then(|ep| ep.uri.as_deref())
        })
    }

    /// The attendee entry flagged as the caller
    pub fn self_attendee(&self) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.is_self)
    }
}

/// A calendar event tagged with the source it was fetched from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub source_id: String,
    pub source_display_name: String,
    #[serde(flatten)]
    pub event: CalendarEvent,
}

/// Entry of the caller's calendar list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarListEntry {
    pub id: String,
    pub display_name: String,
    /// Raw access role as reported upstream (`owner`, `writer`, `reader`, `freeBusyReader`)
    pub access_role: String,
    pub primary: bool,
}
