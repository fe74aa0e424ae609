//! Timestamp normalization.
//!
//! Chat exports write timestamps in several shapes. [`normalize_timestamp`]
//! tries a fixed, ordered list of formats and renders the first match in
//! [`CANONICAL_TIME_FORMAT`]. Anything it cannot read falls back to the
//! caller-supplied default with a warning; normalization never fails a parse.
//!
//! Accepted inputs, in order:
//!
//! | Example | Format |
//! |---------|--------|
//! | `2024-01-15 10:30:45` | `%Y-%m-%d %H:%M:%S` |
//! | `2024-01-15 10:30` | `%Y-%m-%d %H:%M` |
//! | `2024/1/15 10:30:45` | `%Y/%m/%d %H:%M:%S` |
//! | `2024/1/15 10:30` | `%Y/%m/%d %H:%M` |
//! | `2024.01.15 10:30:45` | `%Y.%m.%d %H:%M:%S` |
//! | `2024.01.15 10:30` | `%Y.%m.%d %H:%M` |
//! | `2024-01-15T10:30:45` | `%Y-%m-%dT%H:%M:%S` |
//! | `2024-01-15T10:30:45+08:00` | RFC 3339, rendered in UTC |
//! | `1705314645` / `1705314645000` | Unix seconds / milliseconds, rendered in UTC |

use chrono::{DateTime, NaiveDateTime};
use tracing::warn;

/// Canonical output format of every record timestamp.
pub const CANONICAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock formats tried in order. Seconds precision before minutes
/// precision for each date separator.
const TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a raw timestamp into a naive date-time.
///
/// Internal whitespace runs are collapsed to one space before matching.
/// Returns `None` for empty input or input matching none of the formats.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let compact = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.is_empty() {
        return None;
    }

    for format in TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&compact, format) {
            return Some(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&compact) {
        return Some(parsed.naive_utc());
    }

    parse_epoch(&compact)
}

/// Unix epoch in seconds (10 digits) or milliseconds (13 digits).
fn parse_epoch(raw: &str) -> Option<NaiveDateTime> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i64 = raw.parse().ok()?;
    match raw.len() {
        10 => DateTime::from_timestamp(value, 0).map(|dt| dt.naive_utc()),
        13 => DateTime::from_timestamp_millis(value).map(|dt| dt.naive_utc()),
        _ => None,
    }
}

/// Normalizes a raw timestamp into [`CANONICAL_TIME_FORMAT`], or `None` if
/// it is empty or unreadable.
pub fn try_normalize_timestamp(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    parse_timestamp(raw).map(|parsed| parsed.format(CANONICAL_TIME_FORMAT).to_string())
}

/// Normalizes a raw timestamp into [`CANONICAL_TIME_FORMAT`].
///
/// Empty or unreadable input yields `fallback` and is logged at `warn`.
pub fn normalize_timestamp(raw: &str, fallback: &str) -> String {
    match try_normalize_timestamp(raw) {
        Some(normalized) => normalized,
        None => {
            let reason = if raw.trim().is_empty() { "missing" } else { "unreadable" };
            warn!(raw = raw, fallback = fallback, reason, "Cannot normalize timestamp, using default");
            fallback.to_string()
        }
    }
}
