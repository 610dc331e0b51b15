use super::models::{CalendarEvent, CalendarListEntry, EventType, OrderBy};
use crate::error::SearchResult;
use async_trait::async_trait;

/// Hard upper bound of `maxResults` accepted by the events listing endpoint
pub const API_MAX_RESULTS: u32 = 250;

/// Parameters of one bounded events listing request.
///
/// There is intentionally no free-text field: text matching happens locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventsParams {
    pub time_min: Option<String>,
    pub time_max: Option<String>,
    pub max_results: u32,
    pub single_events: bool,
    pub order_by: Option<OrderBy>,
    pub event_types: Vec<EventType>,
    pub page_token: Option<String>,
}

/// One page of events from a single calendar
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    pub items: Vec<CalendarEvent>,
    pub next_page_token: Option<String>,
}

/// Enumerates the calendars visible to the caller
#[async_trait]
pub trait CalendarDirectory: Send + Sync {
    async fn list_calendars(&self, token: &str) -> SearchResult<Vec<CalendarListEntry>>;
}

/// Lists events of a single calendar
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn list_events(
        &self,
        token: &str,
        calendar_id: &str,
        params: &ListEventsParams,
    ) -> SearchResult<EventPage>;
}
