use super::resolver::SourceDescriptor;
use crate::components::google_calendar::models::EventRecord;
use crate::components::google_calendar::source::{EventSource, ListEventsParams};
use futures::future::join_all;
use tracing::{debug, warn};

/// What happened when one calendar was queried
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Fetched {
        events: Vec<EventRecord>,
        continuation_token: Option<String>,
    },
    Failed {
        error: String,
    },
}

/// Result of querying one calendar
#[derive(Debug, Clone, PartialEq)]
pub struct PerSourceResult {
    pub source: SourceDescriptor,
    pub outcome: SourceOutcome,
}

impl PerSourceResult {
    /// Events fetched from this source; empty on failure
    pub fn events(&self) -> &[EventRecord] {
        match &self.outcome {
            SourceOutcome::Fetched { events, .. } => events,
            SourceOutcome::Failed { .. } => &[],
        }
    }

    pub fn continuation_token(&self) -> Option<&str> {
        match &self.outcome {
            SourceOutcome::Fetched {
                continuation_token, ..
            } => continuation_token.as_deref(),
            SourceOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            SourceOutcome::Failed { error } => Some(error),
            SourceOutcome::Fetched { .. } => None,
        }
    }
}

/// Query one calendar, converting any failure into a recorded outcome
async fn fetch_source(
    events: &dyn EventSource,
    token: &str,
    source: SourceDescriptor,
    params: &ListEventsParams,
) -> PerSourceResult {
    let outcome = match events.list_events(token, &source.id, params).await {
        Ok(page) => {
            debug!(
                "Fetched {} events from calendar {}",
                page.items.len(),
                source.id
            );
            let records = page
                .items
                .into_iter()
                .map(|event| EventRecord {
                    source_id: source.id.clone(),
                    source_display_name: source.display_name.clone(),
                    event,
                })
                .collect();
            SourceOutcome::Fetched {
                events: records,
                continuation_token: page.next_page_token,
            }
        }
        Err(e) => {
            warn!("Search failed for calendar {}: {}", source.id, e);
            SourceOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    PerSourceResult { source, outcome }
}

/// Query every calendar concurrently and wait for all of them.
///
/// Results come back in the order of `sources`, whatever order the calls finish in.
pub async fn fetch_all(
    events: &dyn EventSource,
    token: &str,
    sources: Vec<SourceDescriptor>,
    params: &ListEventsParams,
) -> Vec<PerSourceResult> {
    join_all(
        sources
            .into_iter()
            .map(|source| fetch_source(events, token, source, params)),
    )
    .await
}
