//! Wall-clock timestamp helpers.
//!
//! Records carry `played_at` as a datetime-local string edited by the user
//! and `created_at` as an ISO timestamp assigned by the store. Both are
//! parsed best-effort: anything unparsable is normalized to timestamp 0 so
//! downstream code can filter it out rather than fail.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Accepted wall-clock formats, most common first.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a wall-clock timestamp string into epoch milliseconds.
///
/// Returns 0 when the value does not parse; callers treat 0 as "no valid
/// timestamp" and exclude the sample wherever chronology matters.
pub fn parse_timestamp_millis(value: &str) -> i64 {
    parse_naive(value)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in LOCAL_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    // Store timestamps may carry an offset (ISO 8601).
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    None
}

/// Calendar day for an epoch-millisecond timestamp, or `None` for the
/// unparsable-sentinel and other out-of-range values.
pub fn date_key(timestamp_millis: i64) -> Option<NaiveDate> {
    if timestamp_millis <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(timestamp_millis).map(|dt| dt.date_naive())
}

/// Epoch milliseconds of a calendar day's 00:00.
pub fn day_start_millis(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Re-format a store timestamp to the minutes-precision datetime-local form
/// used everywhere client-side (`YYYY-MM-DDTHH:MM`).
///
/// Falls back to truncating the raw string when it does not parse, so a
/// malformed value stays visible instead of disappearing.
pub fn to_datetime_local(value: &str) -> String {
    match parse_naive(value) {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M").to_string(),
        None => value.chars().take(16).collect(),
    }
}
