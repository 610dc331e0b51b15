use super::aggregator::{aggregate, AggregateOptions};
use super::fetcher::fetch_all;
use super::format::render_text;
use super::planner::FetchPolicy;
use super::projection::project;
use super::request::SearchRequest;
use super::resolver::resolve_sources;
use super::response::{SearchResponse, StructuredPayload};
use crate::components::google_calendar::models::OrderBy;
use crate::components::google_calendar::source::{CalendarDirectory, EventSource, ListEventsParams};
use crate::components::google_calendar::time::parse_bound;
use crate::components::google_calendar::token::TokenProvider;
use crate::config::Config;
use crate::error::{aggregate_error, validation_error, SearchResult};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{debug, info};

fn range_bound(name: &str, value: Option<&str>, tz: Tz) -> SearchResult<Option<DateTime<Utc>>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_bound(v, tz)
            .map(Some)
            .ok_or_else(|| validation_error(&format!("{} is not a valid timestamp: {}", name, v))),
        None => Ok(None),
    }
}

/// Settings the search pipeline reads from configuration
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub fetch_policy: FetchPolicy,
    pub timezone: Tz,
    pub primary_label: String,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fetch_policy: config.fetch_policy,
            timezone: config.display_timezone(),
            primary_label: config.primary_label.clone(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Runs federated searches against a calendar backend
#[derive(Clone)]
pub struct SearchService {
    directory: Arc<dyn CalendarDirectory>,
    events: Arc<dyn EventSource>,
    tokens: Arc<dyn TokenProvider>,
    settings: SearchSettings,
}

impl SearchService {
    pub fn new(
        directory: Arc<dyn CalendarDirectory>,
        events: Arc<dyn EventSource>,
        tokens: Arc<dyn TokenProvider>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            directory,
            events,
            tokens,
            settings,
        }
    }

    /// Normalize the time range to RFC 3339 UTC, rejecting inverted ranges
    fn time_range(
        &self,
        request: &SearchRequest,
    ) -> SearchResult<(Option<String>, Option<String>)> {
        let tz = self.settings.timezone;
        let time_min = range_bound("timeMin", request.time_min.as_deref(), tz)?;
        let time_max = range_bound("timeMax", request.time_max.as_deref(), tz)?;

        if let (Some(min), Some(max)) = (time_min, time_max) {
            if min > max {
                return Err(validation_error("timeMin must not be later than timeMax"));
            }
        }

        Ok((
            time_min.map(|t| t.to_rfc3339()),
            time_max.map(|t| t.to_rfc3339()),
        ))
    }

    /// Upstream listing parameters for this request
    fn list_params(
        &self,
        request: &SearchRequest,
        time_range: (Option<String>, Option<String>),
        source_count: usize,
    ) -> ListEventsParams {
        let text_query = request.text_query();
        let max_results = self.settings.fetch_policy.per_source_cap(
            request.max_total_results,
            text_query.is_some(),
            source_count,
        );

        // startTime ordering is only accepted upstream together with singleEvents
        let order_by = match request.effective_order() {
            Some(OrderBy::StartTime) if !request.expand_recurring => None,
            order => order,
        };

        let (time_min, time_max) = time_range;
        ListEventsParams {
            time_min,
            time_max,
            max_results,
            single_events: request.expand_recurring,
            order_by,
            event_types: request.event_types(),
            page_token: request.continuation_token().map(str::to_string),
        }
    }

    /// Run one search end to end
    pub async fn search(&self, request: SearchRequest) -> SearchResult<SearchResponse> {
        request.validate()?;
        let fields = request.fields()?;
        let time_range = self.time_range(&request)?;

        let token = self.tokens.access_token().await?;

        let sources = resolve_sources(
            &request.source_selector,
            request.continuation_token(),
            self.directory.as_ref(),
            &token,
            &self.settings.primary_label,
        )
        .await?;

        let params = self.list_params(&request, time_range, sources.len());
        debug!(
            "Searching {} calendars with maxResults={} per calendar",
            sources.len(),
            params.max_results
        );

        let results = fetch_all(self.events.as_ref(), &token, sources, &params).await;

        let max_total_results = request.max_total_results as usize;
        let options = AggregateOptions {
            max_total_results,
            text_query: request.text_query().map(str::to_string),
            sort_by_start: request.sorts_by_start(),
        };
        let result = aggregate(&results, &options);

        if result.events.len() > max_total_results {
            return Err(aggregate_error(&format!(
                "merged result holds {} events, more than the requested {}",
                result.events.len(),
                max_total_results
            )));
        }

        let structured = StructuredPayload {
            items: result.events.iter().map(|e| project(e, &fields)).collect(),
            sources_searched: result.sources_searched.clone(),
            sources_failed: result.sources_failed.clone(),
            continuation_token: result.continuation_token.clone(),
            has_more: result.has_more,
        };
        let text = render_text(&result, self.settings.timezone);

        info!(
            "Search returned {} events from {} calendars ({} failed)",
            result.events.len(),
            result.sources_searched.len(),
            result.sources_failed.len()
        );

        Ok(SearchResponse {
            result,
            text,
            structured,
        })
    }
}
