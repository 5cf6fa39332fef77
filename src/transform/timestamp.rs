//! Date handling for the timestamp columns.
//!
//! Plane exports ISO-8601 values; Linear expects the fixed
//! `Thu Jun 15 2023 10:30:00 GMT+0000 (GMT)` form, always rendered in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Layout of the legacy timestamp, minus the trailing zone comment.
const LEGACY_LAYOUT: &str = "%a %b %d %Y %H:%M:%S GMT%z";
/// Years are not zero-padded, so year 999 renders as `999`.
const LEGACY_OUTPUT: &str = "%a %b %d %-Y %H:%M:%S GMT+0000 (GMT)";
const LEGACY_ZONE_COMMENT: &str = " (GMT)";

const OFFSET_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

/// Offset-less layouts; the value is taken to be UTC.
const NAIVE_LAYOUTS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Renders an instant in the legacy Linear import form.
pub fn format_legacy_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format(LEGACY_OUTPUT).to_string()
}

/// Parses a value produced by [`format_legacy_timestamp`].
pub fn parse_legacy_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let value = value.strip_suffix(LEGACY_ZONE_COMMENT).unwrap_or(value);
    DateTime::parse_from_str(value, LEGACY_LAYOUT)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Parses a date cell from the export. Returns `None` for blank or
/// unrecognised input.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(parsed) = DateTime::parse_from_str(value, layout) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(parsed.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    if let Some(start) = parse_partial_date(value) {
        return Some(start);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    parse_legacy_timestamp(value)
}

/// Accepts the reduced-precision ISO forms `YYYY-MM` and `YYYY`, anchored at
/// the first instant of that month or year in UTC.
fn parse_partial_date(value: &str) -> Option<DateTime<Utc>> {
    let (year, month) = match value.split_once('-') {
        Some((year, month)) if is_digits(month, 2) => (year, month.parse::<u32>().ok()?),
        Some(_) => return None,
        None => (value, 1),
    };
    if !is_digits(year, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|byte| byte.is_ascii_digit())
}
