use super::request::{continuation_requires_single_source, SourceSelector};
use crate::components::google_calendar::models::CalendarListEntry;
use crate::components::google_calendar::source::CalendarDirectory;
use crate::error::SearchResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Id that always denotes the caller's own calendar
pub const PRIMARY_CALENDAR_ID: &str = "primary";

/// Access the caller holds on a calendar, limited to roles that can read events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessLevel {
    Owner,
    Writer,
    Reader,
}

impl AccessLevel {
    /// Map an upstream access role; free/busy-only and unknown roles yield `None`
    pub fn from_role(role: &str) -> Option<Self> {
        match role {
            "owner" => Some(AccessLevel::Owner),
            "writer" => Some(AccessLevel::Writer),
            "reader" => Some(AccessLevel::Reader),
            _ => None,
        }
    }
}

/// A calendar selected for one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub id: String,
    pub display_name: String,
    pub access_level: AccessLevel,
}

/// Descriptor for a calendar named explicitly by the caller
pub fn describe_explicit(id: &str, primary_label: &str) -> SourceDescriptor {
    if id == PRIMARY_CALENDAR_ID {
        SourceDescriptor {
            id: id.to_string(),
            display_name: primary_label.to_string(),
            access_level: AccessLevel::Owner,
        }
    } else {
        // Real access is unknown without a lookup; reading is the minimum the search needs
        SourceDescriptor {
            id: id.to_string(),
            display_name: id.to_string(),
            access_level: AccessLevel::Reader,
        }
    }
}

/// Keep readable calendars, preserving listing order
pub fn readable_sources(entries: Vec<CalendarListEntry>) -> Vec<SourceDescriptor> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let access_level = AccessLevel::from_role(&entry.access_role)?;
            Some(SourceDescriptor {
                id: entry.id,
                display_name: entry.display_name,
                access_level,
            })
        })
        .collect()
}

/// Turn a selector into the ordered calendars to query.
///
/// The directory is only consulted for `SourceSelector::All`. A continuation
/// token is rejected unless exactly one calendar results.
pub async fn resolve_sources(
    selector: &SourceSelector,
    continuation_token: Option<&str>,
    directory: &dyn CalendarDirectory,
    token: &str,
    primary_label: &str,
) -> SearchResult<Vec<SourceDescriptor>> {
    let sources = match selector {
        SourceSelector::All => {
            let entries = directory.list_calendars(token).await?;
            let listed = entries.len();
            let sources = readable_sources(entries);
            debug!(
                "Resolved {} readable calendars out of {} listed",
                sources.len(),
                listed
            );
            sources
        }
        SourceSelector::Single(id) => vec![describe_explicit(id, primary_label)],
        SourceSelector::Many(ids) => ids
            .iter()
            .map(|id| describe_explicit(id, primary_label))
            .collect(),
    };

    if continuation_token.is_some() && sources.len() != 1 {
        return Err(continuation_requires_single_source(sources.len()));
    }

    Ok(sources)
}
