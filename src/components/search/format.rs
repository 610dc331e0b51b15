use super::aggregator::AggregatedResult;
use crate::components::google_calendar::models::{EventRecord, EventStatus, ResponseStatus};
use crate::components::google_calendar::time::display_time;
use chrono_tz::Tz;
use std::fmt::Write;

/// Attendees listed before collapsing the rest into a count
const MAX_LISTED_ATTENDEES: usize = 5;

/// Note appended to every non-empty listing
pub const SOURCE_ID_NOTE: &str =
    "Use an event's calendar id (sourceId) when updating or deleting that event.";

/// The caller's own status for an event, if there is anything to say
pub fn own_status(record: &EventRecord) -> Option<&'static str> {
    if record.event.status == Some(EventStatus::Cancelled) {
        return Some("cancelled");
    }
    match record.event.self_attendee()?.response_status? {
        ResponseStatus::Declined => Some("declined"),
        ResponseStatus::Tentative => Some("tentative"),
        ResponseStatus::NeedsAction => Some("not responded"),
        ResponseStatus::Accepted | ResponseStatus::Unknown => None,
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn render_event(out: &mut String, index: usize, record: &EventRecord, show_source: bool, tz: Tz) {
    let event = &record.event;
    let title = event.summary.as_deref().unwrap_or("(No title)");

    let _ = write!(out, "{}. ", index + 1);
    match &event.html_link {
        Some(link) => {
            let _ = write!(out, "[{}]({})", title, link);
        }
        None => out.push_str(title),
    }
    if let Some(start) = &event.start {
        let _ = write!(out, " - {}", display_time(start, tz));
    }
    if show_source {
        let _ = write!(out, " [{}]", record.source_display_name);
    }
    if let Some(status) = own_status(record) {
        let _ = write!(out, " ({})", status);
    }
    out.push('\n');

    if let Some(location) = &event.location {
        let _ = writeln!(out, "   Location: {}", location);
    }
    if !event.attendees.is_empty() {
        let listed: Vec<&str> = event
            .attendees
            .iter()
            .take(MAX_LISTED_ATTENDEES)
            .map(|a| a.label())
            .collect();
        let _ = write!(out, "   Attendees: {}", listed.join(", "));
        let hidden = event.attendees.len().saturating_sub(MAX_LISTED_ATTENDEES);
        if hidden > 0 {
            let _ = write!(out, " (+{} more)", hidden);
        }
        out.push('\n');
    }
    if let Some(link) = event.conference_link() {
        let _ = writeln!(out, "   Video: {}", link);
    }
    let _ = writeln!(out, "   Event ID: {} (calendar: {})", event.id, record.source_id);
}

/// Human-readable listing of an aggregated result
pub fn render_text(result: &AggregatedResult, tz: Tz) -> String {
    let mut out = String::new();
    let source_count = result.sources_searched.len();
    let show_source = source_count > 1;

    if result.events.is_empty() {
        let _ = writeln!(out, "No events found in {}.", plural(source_count, "calendar"));
    } else if source_count == 1 {
        let _ = writeln!(
            out,
            "Found {} in {}:",
            plural(result.events.len(), "event"),
            result.sources_searched[0]
        );
    } else {
        let _ = writeln!(
            out,
            "Found {} across {}:",
            plural(result.events.len(), "event"),
            plural(source_count, "calendar")
        );
    }

    if !result.sources_failed.is_empty() {
        let _ = writeln!(
            out,
            "Failed to search: {}",
            result.sources_failed.join(", ")
        );
    }

    if !result.events.is_empty() {
        out.push('\n');
        for (index, record) in result.events.iter().enumerate() {
            render_event(&mut out, index, record, show_source, tz);
        }
    }

    if let Some(token) = &result.continuation_token {
        let _ = writeln!(
            out,
            "\nMore events are available. Pass continuationToken \"{}\" to get the next page.",
            token
        );
    } else if result.has_more {
        let _ = writeln!(
            out,
            "\nMore events matched than were returned. Increase maxTotalResults or narrow the time range."
        );
    }

    if !result.events.is_empty() {
        let _ = write!(out, "\n{}", SOURCE_ID_NOTE);
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google_calendar::models::{Attendee, CalendarEvent, EventTime};

    fn attendee(name: &str) -> Attendee {
        Attendee {
            email: Some(format!("{}@example.com", name)),
            ..Default::default()
        }
    }

    fn record(source: &str, event: CalendarEvent) -> EventRecord {
        EventRecord {
            source_id: format!("{}@example.com", source),
            source_display_name: source.to_string(),
            event,
        }
    }

    #[test]
    fn test_own_status() {
        let mut event = CalendarEvent {
            attendees: vec![Attendee {
                is_self: true,
                response_status: Some(ResponseStatus::Declined),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(own_status(&record("Work", event.clone())), Some("declined"));

        event.status = Some(EventStatus::Cancelled);
        assert_eq!(own_status(&record("Work", event.clone())), Some("cancelled"));

        event.status = None;
        event.attendees[0].response_status = Some(ResponseStatus::Accepted);
        assert_eq!(own_status(&record("Work", event)), None);
    }

    #[test]
    fn test_render_multi_source_with_failure() {
        let event = CalendarEvent {
            id: "e1".to_string(),
            summary: Some("Planning".to_string()),
            html_link: Some("https://calendar.example/e1".to_string()),
            start: Some(EventTime::timed("2026-10-19T09:00:00Z")),
            location: Some("Room 4".to_string()),
            hangout_link: Some("https://meet.example/abc".to_string()),
            attendees: (0..7).map(|i| attendee(&format!("p{}", i))).collect(),
            ..Default::default()
        };
        let result = AggregatedResult {
            events: vec![record("Work", event)],
            has_more: true,
            continuation_token: None,
            sources_searched: vec!["Work".to_string(), "Home".to_string(), "Club".to_string()],
            sources_failed: vec!["Club".to_string()],
        };

        let text = render_text(&result, chrono_tz::UTC);

        assert!(text.starts_with("Found 1 event across 3 calendars:"));
        assert!(text.contains("Failed to search: Club"));
        assert!(text.contains("1. [Planning](https://calendar.example/e1) - Mon 2026-10-19 09:00 [Work]"));
        assert!(text.contains("   Location: Room 4"));
        assert!(text.contains("p4@example.com (+2 more)"));
        assert!(!text.contains("p5@example.com"));
        assert!(text.contains("   Video: https://meet.example/abc"));
        assert!(text.contains("Increase maxTotalResults"));
        assert!(text.ends_with(SOURCE_ID_NOTE));
    }

    #[test]
    fn test_render_single_source_hides_source_name() {
        let event = CalendarEvent {
            id: "e1".to_string(),
            summary: Some("Dentist".to_string()),
            start: Some(EventTime::all_day("2026-10-19")),
            ..Default::default()
        };
        let result = AggregatedResult {
            events: vec![record("Home", event)],
            has_more: true,
            continuation_token: Some("next-page".to_string()),
            sources_searched: vec!["Home".to_string()],
            sources_failed: vec![],
        };

        let text = render_text(&result, chrono_tz::UTC);
        assert!(text.starts_with("Found 1 event in Home:"));
        assert!(text.contains("1. Dentist - Mon 2026-10-19 (all day)\n"));
        assert!(text.contains("continuationToken \"next-page\""));
    }

    #[test]
    fn test_render_empty() {
        let result = AggregatedResult {
            sources_searched: vec!["Home".to_string(), "Work".to_string()],
            ..Default::default()
        };
        let text = render_text(&result, chrono_tz::UTC);
        assert_eq!(text, "No events found in 2 calendars.");
    }
}
