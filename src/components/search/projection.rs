use crate::components::google_calendar::models::EventRecord;
use serde::Serialize;
use serde_json::{Map, Value};

/// Fields a caller may select for the structured output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Id,
    Title,
    Description,
    Start,
    End,
    Location,
    Attendees,
    Organizer,
    Creator,
    Link,
    ConferenceLink,
    Status,
    EventType,
    Visibility,
    ColorId,
    RecurringEventId,
    Recurrence,
    Created,
    Updated,
    SourceId,
    SourceDisplayName,
}

/// Projection used when the caller does not choose fields
pub const DEFAULT_FIELDS: &[EventField] = &[
    EventField::Id,
    EventField::Title,
    EventField::Start,
    EventField::End,
    EventField::Location,
    EventField::Link,
    EventField::Status,
    EventField::Attendees,
    EventField::SourceId,
    EventField::SourceDisplayName,
];

impl EventField {
    pub const ALL: &'static [EventField] = &[
        EventField::Id,
        EventField::Title,
        EventField::Description,
        EventField::Start,
        EventField::End,
        EventField::Location,
        EventField::Attendees,
        EventField::Organizer,
        EventField::Creator,
        EventField::Link,
        EventField::ConferenceLink,
        EventField::Status,
        EventField::EventType,
        EventField::Visibility,
        EventField::ColorId,
        EventField::RecurringEventId,
        EventField::Recurrence,
        EventField::Created,
        EventField::Updated,
        EventField::SourceId,
        EventField::SourceDisplayName,
    ];

    /// Key used in requests and in projected records
    pub fn name(&self) -> &'static str {
        match self {
            EventField::Id => "id",
            EventField::Title => "title",
            EventField::Description => "description",
            EventField::Start => "start",
            EventField::End => "end",
            EventField::Location => "location",
            EventField::Attendees => "attendees",
            EventField::Organizer => "organizer",
            EventField::Creator => "creator",
            EventField::Link => "link",
            EventField::ConferenceLink => "conferenceLink",
            EventField::Status => "status",
            EventField::EventType => "eventType",
            EventField::Visibility => "visibility",
            EventField::ColorId => "colorId",
            EventField::RecurringEventId => "recurringEventId",
            EventField::Recurrence => "recurrence",
            EventField::Created => "created",
            EventField::Updated => "updated",
            EventField::SourceId => "sourceId",
            EventField::SourceDisplayName => "sourceDisplayName",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Value of this field on a record, `None` when the record lacks it
    pub fn extract(&self, record: &EventRecord) -> Option<Value> {
        let event = &record.event;
        let string = |s: &Option<String>| s.as_ref().map(|s| Value::String(s.clone()));

        match self {
            EventField::Id => Some(Value::String(event.id.clone())),
            EventField::Title => string(&event.summary),
            EventField::Description => string(&event.description),
            EventField::Start => event.start.as_ref().and_then(to_json),
            EventField::End => event.end.as_ref().and_then(to_json),
            EventField::Location => string(&event.location),
            EventField::Attendees if event.attendees.is_empty() => None,
            EventField::Attendees => to_json(&event.attendees),
            EventField::Organizer => event.organizer.as_ref().and_then(to_json),
            EventField::Creator => event.creator.as_ref().and_then(to_json),
            EventField::Link => string(&event.html_link),
            EventField::ConferenceLink => event
                .conference_link()
                .map(|link| Value::String(link.to_string())),
            EventField::Status => event.status.as_ref().and_then(to_json),
            EventField::EventType => string(&event.event_type),
            EventField::Visibility => string(&event.visibility),
            EventField::ColorId => string(&event.color_id),
            EventField::RecurringEventId => string(&event.recurring_event_id),
            EventField::Recurrence if event.recurrence.is_empty() => None,
            EventField::Recurrence => to_json(&event.recurrence),
            EventField::Created => string(&event.created),
            EventField::Updated => string(&event.updated),
            EventField::SourceId => Some(Value::String(record.source_id.clone())),
            EventField::SourceDisplayName => {
                Some(Value::String(record.source_display_name.clone()))
            }
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

/// Reduce a record to the selected fields that it actually carries
pub fn project(record: &EventRecord, fields: &[EventField]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|field| {
            field
                .extract(record)
                .map(|value| (field.name().to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google_calendar::models::{
        Attendee, CalendarEvent, EventStatus, EventTime,
    };

    fn record() -> EventRecord {
        EventRecord {
            source_id: "work@example.com".to_string(),
            source_display_name: "Work".to_string(),
            event: CalendarEvent {
                id: "evt1".to_string(),
                summary: Some("Standup".to_string()),
                start: Some(EventTime::timed("2026-10-19T09:00:00Z")),
                status: Some(EventStatus::Confirmed),
                attendees: vec![Attendee {
                    email: Some("me@example.com".to_string()),
                    is_self: true,
                    ..Default::default()
                }],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_default_projection_skips_missing_fields() {
        let projected = project(&record(), DEFAULT_FIELDS);

        assert_eq!(projected["id"], "evt1");
        assert_eq!(projected["title"], "Standup");
        assert_eq!(projected["start"]["dateTime"], "2026-10-19T09:00:00Z");
        assert_eq!(projected["status"], "confirmed");
        assert_eq!(projected["attendees"][0]["self"], true);
        assert_eq!(projected["sourceId"], "work@example.com");
        assert!(!projected.contains_key("end"));
        assert!(!projected.contains_key("location"));
        assert!(!projected.contains_key("link"));
    }

    #[test]
    fn test_custom_selection() {
        let projected = project(&record(), &[EventField::SourceDisplayName, EventField::Title]);
        let keys: Vec<&str> = projected.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"sourceDisplayName"));
        assert!(keys.contains(&"title"));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in EventField::ALL {
            assert_eq!(EventField::from_name(field.name()), Some(*field));
        }
        assert_eq!(EventField::from_name("summary"), None);
    }
}
