use super::fetcher::PerSourceResult;
use super::filter::apply_text_filter;
use crate::components::google_calendar::models::EventRecord;
use crate::components::google_calendar::time::start_sort_key;

/// How the merged result is shaped
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    pub max_total_results: usize,
    pub text_query: Option<String>,
    pub sort_by_start: bool,
}

/// Merged, ordered and capped search result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedResult {
    pub events: Vec<EventRecord>,
    pub has_more: bool,
    pub continuation_token: Option<String>,
    pub sources_searched: Vec<String>,
    pub sources_failed: Vec<String>,
}

/// Whether a source's own page token may be handed back to the caller.
///
/// | sources | result    | text filter | token surfaced |
/// |---------|-----------|-------------|----------------|
/// | 1       | non-empty | off         | yes            |
/// | 1       | non-empty | on          | no             |
/// | 1       | empty     | any         | no             |
/// | many    | any       | any         | no             |
pub fn continuation_token_policy(
    source_count: usize,
    result_empty: bool,
    text_filtered: bool,
    upstream_token: Option<&str>,
) -> Option<String> {
    match (source_count, result_empty, text_filtered) {
        (1, false, false) => upstream_token.map(str::to_string),
        _ => None,
    }
}

/// Merge per-source results into one ordered, capped list
pub fn aggregate(results: &[PerSourceResult], options: &AggregateOptions) -> AggregatedResult {
    let sources_searched = results
        .iter()
        .map(|r| r.source.display_name.clone())
        .collect();
    let sources_failed = results
        .iter()
        .filter(|r| r.error().is_some())
        .map(|r| r.source.display_name.clone())
        .collect();

    let mut events: Vec<EventRecord> = results
        .iter()
        .flat_map(|r| r.events().iter().cloned())
        .collect();

    if let Some(query) = options.text_query.as_deref() {
        events = apply_text_filter(events, query);
    }

    if options.sort_by_start {
        // Stable: ties keep source order, then upstream order
        events.sort_by_key(start_sort_key);
    }

    let has_more = events.len() > options.max_total_results;
    events.truncate(options.max_total_results);

    let upstream_token = match results {
        [only] => only.continuation_token(),
        _ => None,
    };
    let continuation_token = continuation_token_policy(
        results.len(),
        events.is_empty(),
        options.text_query.is_some(),
        upstream_token,
    );

    AggregatedResult {
        events,
        has_more,
        continuation_token,
        sources_searched,
        sources_failed,
    }
}
