use super::models::{EventRecord, EventTime};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve an event time to a UTC instant.
///
/// All-day dates resolve to midnight UTC. Unparseable values yield `None`.
pub fn resolve_instant(time: &EventTime) -> Option<DateTime<Utc>> {
    match time {
        EventTime::Timed { date_time, .. } => DateTime::parse_from_rfc3339(date_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        EventTime::AllDay { date } => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc()),
    }
}

/// Parse a caller-supplied range bound.
///
/// Accepts RFC 3339, or a local date-time / date interpreted in `tz`.
pub fn parse_bound(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Sort key in milliseconds since the epoch; a missing start counts as zero
pub fn start_sort_key(record: &EventRecord) -> i64 {
    record
        .event
        .start
        .as_ref()
        .and_then(resolve_instant)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Human-readable start value in the given display timezone
pub fn display_time(time: &EventTime, tz: Tz) -> String {
    match time {
        EventTime::Timed { date_time, .. } => match DateTime::parse_from_rfc3339(date_time) {
            Ok(dt) => dt.with_timezone(&tz).format("%a %Y-%m-%d %H:%M").to_string(),
            Err(_) => date_time.clone(),
        },
        EventTime::AllDay { date } => match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(d) => format!("{} (all day)", d.format("%a %Y-%m-%d")),
            Err(_) => format!("{} (all day)", date),
        },
    }
}
