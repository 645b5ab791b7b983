//! Event timestamp parsing for temporal fields.

use chrono::{NaiveDate, NaiveDateTime};

// Layouts seen in hosp/icu extracts, tried in order.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse an event timestamp with time-of-day precision.
pub fn parse_event_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

/// Parse an event date, accepting bare dates or full timestamps.
pub fn parse_event_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Some(datetime) = parse_event_datetime(trimmed) {
        return Some(datetime.date());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
