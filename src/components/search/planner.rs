use crate::components::google_calendar::source::API_MAX_RESULTS;
use crate::error::{config_error, SearchResult};
use serde::{Deserialize, Serialize};

/// How many raw events to request per calendar.
///
/// Local text filtering runs after retrieval, so a text search asks for far
/// more than it returns. These are heuristics: a very selective query over a
/// large calendar can still miss matches beyond the fetched window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchPolicy {
    pub text_multiplier: u32,
    pub text_floor: u32,
    pub plain_multiplier: u32,
    pub plain_floor: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            text_multiplier: 10,
            text_floor: 100,
            plain_multiplier: 2,
            plain_floor: 20,
        }
    }
}

impl FetchPolicy {
    pub fn validate(&self) -> SearchResult<()> {
        if self.text_multiplier == 0 || self.plain_multiplier == 0 {
            return Err(config_error("fetch policy multipliers must be at least 1"));
        }
        Ok(())
    }

    /// Per-calendar `maxResults` for one search
    pub fn per_source_cap(&self, max_total: u32, has_text_query: bool, source_count: usize) -> u32 {
        let planned = if has_text_query {
            max_total
                .saturating_mul(self.text_multiplier)
                .max(self.text_floor)
        } else if source_count > 1 {
            max_total
                .saturating_mul(self.plain_multiplier)
                .max(self.plain_floor)
        } else {
            // Single calendar, no filtering: the upstream page token stays aligned
            max_total
        };
        planned.clamp(1, API_MAX_RESULTS)
    }
}
