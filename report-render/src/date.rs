//! Registration timestamp parsing.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date format used for the registration column.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses the timestamp forms user tables are known to carry.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (optionally with fractional seconds or a `T`
/// separator), RFC 3339, RFC 2822, a bare `YYYY-MM-DD`, and `@<unix seconds>`.
/// Offsets are honoured by taking the calendar date in the given offset.
#[must_use]
pub fn parse_registration_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(secs) = raw.strip_prefix('@') {
        let secs = secs.parse::<i64>().ok()?;
        return DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(dt.date());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Formats `date` with a strftime pattern.
///
/// Returns `None` when the pattern contains an invalid specifier instead of
/// panicking.
#[must_use]
pub fn format_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// Returns `true` when `format` can render a calendar date.
///
/// Time and offset specifiers such as `%H` parse as strftime but fail on a
/// bare date, so the pattern is checked by formatting a fixed date.
#[must_use]
pub fn is_valid_format(format: &str) -> bool {
    if format.is_empty() {
        return false;
    }
    NaiveDate::from_ymd_opt(2000, 1, 1).is_some_and(|date| format_date(date, format).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(raw: &str) -> Option<String> {
        parse_registration_date(raw).and_then(|d| format_date(d, DEFAULT_DATE_FORMAT))
    }

    #[test]
    fn parses_mysql_datetime() {
        assert_eq!(ymd("2024-01-15 10:00:00").as_deref(), Some("2024-01-15"));
        assert_eq!(ymd("2024-01-15 10:00:00.123").as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn parses_iso_and_date_only_forms() {
        assert_eq!(ymd("2023-07-04T08:30:00").as_deref(), Some("2023-07-04"));
        assert_eq!(ymd("2023-07-04T23:30:00+02:00").as_deref(), Some("2023-07-04"));
        assert_eq!(ymd("2023-07-04").as_deref(), Some("2023-07-04"));
        assert_eq!(ymd(" 2023-07-04 ").as_deref(), Some("2023-07-04"));
    }

    #[test]
    fn parses_rfc2822_and_unix_seconds() {
        assert_eq!(ymd("Tue, 1 Jul 2003 10:52:37 +0200").as_deref(), Some("2003-07-01"));
        assert_eq!(ymd("@0").as_deref(), Some("1970-01-01"));
        assert_eq!(ymd("@1705312800").as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "   ", "yesterday", "2024-13-45", "@abc", "0000-00-00 00:00:00"] {
            assert_eq!(parse_registration_date(raw), None, "{raw}");
        }
    }

    #[test]
    fn invalid_format_is_detected() {
        assert!(is_valid_format("%Y-%m-%d"));
        assert!(is_valid_format("%d/%m/%Y"));
        assert!(!is_valid_format("%Q"));
        assert!(!is_valid_format(""));
    }

    #[test]
    fn time_specifiers_cannot_format_a_date() {
        for format in ["%H:%M", "%Y-%m-%d %H:%M:%S", "%z"] {
            assert!(!is_valid_format(format), "{format}");
        }
        assert!(is_valid_format("%e %B %Y"));
    }
}
