use super::projection::{EventField, DEFAULT_FIELDS};
use crate::components::google_calendar::models::{EventType, OrderBy};
use crate::components::google_calendar::source::API_MAX_RESULTS;
use crate::error::{validation_error, SearchResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default cap on returned events
pub const DEFAULT_MAX_TOTAL_RESULTS: u32 = 50;

/// Which calendars a search runs against
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawSelector", into = "RawSelector")]
pub enum SourceSelector {
    /// Every calendar the caller can read
    #[default]
    All,
    Single(String),
    Many(Vec<String>),
}

/// Wire shape of a selector: `"all"`, one id, or a list of ids
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawSelector {
    One(String),
    Many(Vec<String>),
}

impl From<RawSelector> for SourceSelector {
    fn from(raw: RawSelector) -> Self {
        match raw {
            RawSelector::One(id) if id == "all" => SourceSelector::All,
            RawSelector::One(id) => SourceSelector::Single(id),
            RawSelector::Many(ids) => SourceSelector::Many(ids),
        }
    }
}

impl From<SourceSelector> for RawSelector {
    fn from(selector: SourceSelector) -> Self {
        match selector {
            SourceSelector::All => RawSelector::One("all".to_string()),
            SourceSelector::Single(id) => RawSelector::One(id),
            SourceSelector::Many(ids) => RawSelector::Many(ids),
        }
    }
}

fn default_max_total_results() -> u32 {
    DEFAULT_MAX_TOTAL_RESULTS
}

fn default_true() -> bool {
    true
}

/// A federated event search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// `"all"`, a single calendar id, or a list of calendar ids
    #[serde(default)]
    #[schemars(with = "RawSelector")]
    pub source_selector: SourceSelector,
    /// Lower bound (RFC 3339) on event end time
    #[serde(default)]
    pub time_min: Option<String>,
    /// Upper bound (RFC 3339) on event start time
    #[serde(default)]
    pub time_max: Option<String>,
    /// Case-insensitive substring matched against text fields
    #[serde(default)]
    pub text_query: Option<String>,
    /// Maximum number of events to return, 1..=250
    #[serde(default = "default_max_total_results")]
    pub max_total_results: u32,
    #[serde(default)]
    pub event_type_filter: Option<Vec<EventType>>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
    /// Page token from a previous single-calendar search
    #[serde(default)]
    pub continuation_token: Option<String>,
    /// Fields to include per event in the structured output
    #[serde(default)]
    pub field_selection: Option<Vec<String>>,
    /// Expand recurring events into individual instances
    #[serde(default = "default_true")]
    pub expand_recurring: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            source_selector: SourceSelector::All,
            time_min: None,
            time_max: None,
            text_query: None,
            max_total_results: DEFAULT_MAX_TOTAL_RESULTS,
            event_type_filter: None,
            order_by: None,
            continuation_token: None,
            field_selection: None,
            expand_recurring: true,
        }
    }
}

impl SearchRequest {
    /// Text query with surrounding whitespace removed; blank counts as absent
    pub fn text_query(&self) -> Option<&str> {
        self.text_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Continuation token, ignoring empty strings
    pub fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Ordering in effect: explicit, else start time when expanding recurrences
    pub fn effective_order(&self) -> Option<OrderBy> {
        match self.order_by {
            Some(order) => Some(order),
            None if self.expand_recurring => Some(OrderBy::StartTime),
            None => None,
        }
    }

    /// Whether the merged result gets a cross-source start time sort
    pub fn sorts_by_start(&self) -> bool {
        self.expand_recurring && self.effective_order() == Some(OrderBy::StartTime)
    }

    /// Event types to forward upstream, deduplicated and in a stable order
    pub fn event_types(&self) -> Vec<EventType> {
        let mut types = self.event_type_filter.clone().unwrap_or_default();
        types.sort();
        types.dedup();
        types
    }

    /// Requested projection fields, or the default set
    pub fn fields(&self) -> SearchResult<Vec<EventField>> {
        let Some(names) = &self.field_selection else {
            return Ok(DEFAULT_FIELDS.to_vec());
        };

        let mut fields = Vec::with_capacity(names.len());
        for name in names {
            let field = EventField::from_name(name).ok_or_else(|| {
                validation_error(&format!(
                    "Unknown field '{}'. Valid fields: {}",
                    name,
                    EventField::ALL
                        .iter()
                        .map(|f| f.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        Ok(fields)
    }

    /// Checks that need no network access
    pub fn validate(&self) -> SearchResult<()> {
        if self.max_total_results == 0 || self.max_total_results > API_MAX_RESULTS {
            return Err(validation_error(&format!(
                "maxTotalResults must be between 1 and {}, got {}",
                API_MAX_RESULTS, self.max_total_results
            )));
        }

        if self.continuation_token().is_some() {
            let explicit_count = match &self.source_selector {
                SourceSelector::Single(_) => Some(1),
                SourceSelector::Many(ids) => Some(ids.len()),
                SourceSelector::All => None,
            };
            if let Some(count) = explicit_count {
                if count != 1 {
                    return Err(continuation_requires_single_source(count));
                }
            }
        }

        self.fields().map(|_| ())
    }
}

/// Error raised when a continuation token meets a multi-calendar search
pub fn continuation_requires_single_source(count: usize) -> crate::error::Error {
    validation_error(&format!(
        "continuationToken requires exactly one calendar, but the selector resolved to {}",
        count
    ))
}

/// JSON schema of `SearchRequest` for calling agents
pub fn request_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(SearchRequest);
    serde_json::to_value(schema).unwrap_or_default()
}
