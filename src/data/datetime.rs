use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::state::period_series::Period;

/// Date formats accepted for event dates, tried after RFC 3339.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
];

/// Parse the calendar date of an event timestamp.
///
/// Accepts RFC 3339 (`2024-03-05T12:00:00Z`), naive ISO timestamps, or plain
/// `YYYY-MM-DD`. Only the date part matters for bucketing, so when every full
/// format fails the leading 10 characters are tried on their own.
pub fn parse_event_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }

    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Render a bucket key for display, e.g. `Mar 5, 2024` for a daily key.
///
/// Keys that do not parse for the given period are returned unchanged.
pub fn format_period_label(label: &str, period: Period) -> String {
    match period {
        Period::Daily => NaiveDate::parse_from_str(label, "%Y-%m-%d")
            .map(|d| format!("{} {}, {}", d.format("%b"), d.day(), d.year()))
            .unwrap_or_else(|_| label.to_string()),
        Period::Monthly => NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d")
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|_| label.to_string()),
        Period::Weekly => label.to_string(),
    }
}
