use crate::components::google_calendar::models::EventRecord;

/// Whether any searchable text field contains the lowercased needle.
///
/// Searched: title, description, location, attendee emails and display names.
pub fn matches_query(record: &EventRecord, needle: &str) -> bool {
    let event = &record.event;
    let contains = |text: &Option<String>| {
        text.as_deref()
            .is_some_and(|t| t.to_lowercase().contains(needle))
    };

    contains(&event.summary)
        || contains(&event.description)
        || contains(&event.location)
        || event
            .attendees
            .iter()
            .any(|a| contains(&a.email) || contains(&a.display_name))
}

/// Keep events containing `query` as a case-insensitive substring, in order
pub fn apply_text_filter(records: Vec<EventRecord>, query: &str) -> Vec<EventRecord> {
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_query(record, &needle))
        .collect()
}
