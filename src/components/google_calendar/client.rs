use super::models::{CalendarEvent, CalendarListEntry};
use super::source::{CalendarDirectory, EventPage, EventSource, ListEventsParams};
use crate::config::Config;
use crate::error::{directory_error, source_error, SearchResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarListResponse {
    #[serde(default)]
    items: Vec<RawCalendarListEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCalendarListEntry {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    summary_override: Option<String>,
    #[serde(default)]
    access_role: Option<String>,
    #[serde(default)]
    primary: bool,
}

impl From<RawCalendarListEntry> for CalendarListEntry {
    fn from(raw: RawCalendarListEntry) -> Self {
        let display_name = raw
            .summary_override
            .or(raw.summary)
            .unwrap_or_else(|| raw.id.clone());
        CalendarListEntry {
            id: raw.id,
            display_name,
            access_role: raw.access_role.unwrap_or_default(),
            primary: raw.primary,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsResponse {
    #[serde(default)]
    items: Vec<CalendarEvent>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Calendar v3 REST client
#[derive(Clone)]
pub struct GoogleCalendarClient {
    client: Client,
    base_url: Url,
}

impl GoogleCalendarClient {
    /// Create a client using the configured API root and timeout
    pub fn new(config: &Config) -> SearchResult<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| source_error(&format!("Failed to parse URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| source_error(&format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Base URL with extra path segments appended, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| "API base URL cannot carry a path".to_string())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build the events listing URL for one calendar
    pub fn events_url(&self, calendar_id: &str, params: &ListEventsParams) -> SearchResult<Url> {
        let mut url = self
            .endpoint(&["calendars", calendar_id, "events"])
            .map_err(|e| source_error(&e))?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(time_min) = &params.time_min {
                query.append_pair("timeMin", time_min);
            }
            if let Some(time_max) = &params.time_max {
                query.append_pair("timeMax", time_max);
            }
            query.append_pair("maxResults", &params.max_results.to_string());
            query.append_pair("singleEvents", &params.single_events.to_string());
            if let Some(order_by) = params.order_by {
                query.append_pair("orderBy", order_by.as_str());
            }
            for event_type in &params.event_types {
                query.append_pair("eventTypes", event_type.as_str());
            }
            if let Some(page_token) = &params.page_token {
                query.append_pair("pageToken", page_token);
            }
        }
        Ok(url)
    }

    /// Pass successful responses through, otherwise describe the failure
    async fn check_status(response: Response, what: &str) -> Result<Response, String> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        Err(format!("Failed to {}: HTTP {} - {}", what, status, error_body))
    }
}

#[async_trait]
impl CalendarDirectory for GoogleCalendarClient {
    async fn list_calendars(&self, token: &str) -> SearchResult<Vec<CalendarListEntry>> {
        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self
                .endpoint(&["users", "me", "calendarList"])
                .map_err(|e| directory_error(&e))?;
            if let Some(page_token) = &page_token {
                url.query_pairs_mut().append_pair("pageToken", page_token);
            }

            let response = self
                .client
                .get(url)
                .bearer_auth(token)
                .send()
                .await
                .map_err(|e| directory_error(&format!("Failed to list calendars: {}", e)))?;
            let response = Self::check_status(response, "list calendars")
                .await
                .map_err(|e| directory_error(&e))?;

            let page: CalendarListResponse = response.json().await.map_err(|e| {
                directory_error(&format!("Failed to parse calendar list response: {}", e))
            })?;

            entries.extend(page.items.into_iter().map(CalendarListEntry::from));

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        debug!("Calendar list returned {} entries", entries.len());
        Ok(entries)
    }
}

#[async_trait]
impl EventSource for GoogleCalendarClient {
    async fn list_events(
        &self,
        token: &str,
        calendar_id: &str,
        params: &ListEventsParams,
    ) -> SearchResult<EventPage> {
        let url = self.events_url(calendar_id, params)?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| source_error(&format!("Failed to fetch events: {}", e)))?;
        let response = Self::check_status(response, "fetch events")
            .await
            .map_err(|e| source_error(&e))?;

        let body: EventsResponse = response
            .json()
            .await
            .map_err(|e| source_error(&format!("Failed to parse events response: {}", e)))?;

        Ok(EventPage {
            items: body.items,
            next_page_token: body.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}
