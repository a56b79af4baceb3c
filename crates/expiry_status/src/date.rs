//! Expiration date parsing

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";

const LOCAL_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an expiration date into a calendar day.
///
/// Accepts a plain ISO 8601 date, a local date-time without offset, or an
/// RFC 3339 timestamp (converted to local time). The time of day is dropped.
pub fn parse_expiration_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Some(date);
    }

    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

/// Formats a calendar day in the canonical storage form.
pub fn format_expiration_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
