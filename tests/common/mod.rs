#![allow(dead_code)]

use async_trait::async_trait;
use calsearch::components::google_calendar::models::{
    Attendee, CalendarEvent, CalendarListEntry, EventTime,
};
use calsearch::components::google_calendar::source::{
    CalendarDirectory, EventPage, EventSource, ListEventsParams,
};
use calsearch::components::google_calendar::StaticTokenProvider;
use calsearch::components::search::{SearchService, SearchSettings};
use calsearch::error::{directory_error, source_error, SearchResult};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory calendar backend that honors `maxResults` like the real API
#[derive(Debug, Default)]
pub struct MockCalendar {
    calendars: Vec<CalendarListEntry>,
    events: HashMap<String, Vec<CalendarEvent>>,
    failing: HashSet<String>,
    page_tokens: HashMap<String, String>,
    directory_fails: bool,
    list_calls: AtomicUsize,
    event_calls: Mutex<Vec<(String, ListEventsParams)>>,
}

impl MockCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a calendar to the directory listing
    pub fn with_calendar(mut self, id: &str, name: &str, role: &str) -> Self {
        self.calendars.push(CalendarListEntry {
            id: id.to_string(),
            display_name: name.to_string(),
            access_role: role.to_string(),
            primary: false,
        });
        self
    }

    pub fn with_events(mut self, calendar_id: &str, events: Vec<CalendarEvent>) -> Self {
        self.events.insert(calendar_id.to_string(), events);
        self
    }

    /// Make every listing of this calendar fail
    pub fn failing(mut self, calendar_id: &str) -> Self {
        self.failing.insert(calendar_id.to_string());
        self
    }

    pub fn with_page_token(mut self, calendar_id: &str, token: &str) -> Self {
        self.page_tokens
            .insert(calendar_id.to_string(), token.to_string());
        self
    }

    pub fn with_failing_directory(mut self) -> Self {
        self.directory_fails = true;
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Every events listing issued so far, in call order
    pub fn event_calls(&self) -> Vec<(String, ListEventsParams)> {
        self.event_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarDirectory for MockCalendar {
    async fn list_calendars(&self, _token: &str) -> SearchResult<Vec<CalendarListEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.directory_fails {
            return Err(directory_error("HTTP 503 Service Unavailable"));
        }
        Ok(self.calendars.clone())
    }
}

#[async_trait]
impl EventSource for MockCalendar {
    async fn list_events(
        &self,
        _token: &str,
        calendar_id: &str,
        params: &ListEventsParams,
    ) -> SearchResult<EventPage> {
        self.event_calls
            .lock()
            .unwrap()
            .push((calendar_id.to_string(), params.clone()));

        if self.failing.contains(calendar_id) {
            return Err(source_error("Failed to fetch events: HTTP 404 Not Found"));
        }

        let items = self
            .events
            .get(calendar_id)
            .map(|events| {
                events
                    .iter()
                    .take(params.max_results as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(EventPage {
            items,
            next_page_token: self.page_tokens.get(calendar_id).cloned(),
        })
    }
}

/// Timed event fixture
pub fn event(id: &str, summary: &str, start: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        summary: Some(summary.to_string()),
        start: Some(EventTime::timed(start)),
        ..Default::default()
    }
}

/// Event fixture whose only searchable text is an attendee
pub fn event_with_attendee(id: &str, email: &str, name: &str, start: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        start: Some(EventTime::timed(start)),
        attendees: vec![Attendee {
            email: Some(email.to_string()),
            display_name: Some(name.to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// `count` unrelated events on consecutive days of October 2026, starting at `first_day`
pub fn filler_events(prefix: &str, first_day: u32, count: u32) -> Vec<CalendarEvent> {
    (0..count)
        .map(|i| {
            let day = first_day + i;
            let start = format!("2026-10-{:02}T{:02}:00:00Z", 1 + day % 28, day % 24);
            event(&format!("{}-{}", prefix, i), "Weekly sync", &start)
        })
        .collect()
}

/// Service over the mock backend with a valid token
pub fn service(mock: Arc<MockCalendar>) -> SearchService {
    SearchService::new(
        mock.clone(),
        mock,
        Arc::new(StaticTokenProvider::new(Some("test-token".to_string()))),
        SearchSettings::default(),
    )
}

/// Service over the mock backend with no credential at all
pub fn service_without_token(mock: Arc<MockCalendar>) -> SearchService {
    SearchService::new(
        mock.clone(),
        mock,
        Arc::new(StaticTokenProvider::new(None)),
        SearchSettings::default(),
    )
}
