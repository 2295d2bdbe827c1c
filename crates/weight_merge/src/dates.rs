//! Calendar-date parsing for the two source shapes.
//!
//! Activity exports use ISO dates or month-first dates; weight logs are
//! written day-first (`DD/MM/YYYY`). Any time-of-day part is dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

// Two-digit year formats go first: `%Y` would happily read "21" as year 21.
const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d"];
const MONTH_FIRST_DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y"];
const DAY_FIRST_DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%d.%m.%y", "%d.%m.%Y",
];
const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S", " %H:%M", "T%H:%M:%S", "T%H:%M:%S%.f"];

/// Parse an activity `dateTime` value (standard, month-first ordering).
///
/// Accepts:
/// - `YYYY-MM-DD`, optionally followed by a time
/// - RFC3339 datetimes
/// - `MM/DD/YY` and `MM/DD/YYYY`, optionally followed by a time
pub fn parse_activity_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if starts_with_year(s) {
        return parse_with(s, ISO_DATE_FORMATS);
    }
    parse_with(s, MONTH_FIRST_DATE_FORMATS)
}

/// Parse a weight-log `date` value (day-first ordering).
///
/// `YYYY-MM-DD` is still accepted since a leading four-digit year is
/// unambiguous.
pub fn parse_weight_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if starts_with_year(s) {
        return parse_with(s, ISO_DATE_FORMATS);
    }
    parse_with(s, DAY_FIRST_DATE_FORMATS)
}

/// `YYYY-` prefix; `%Y` alone also matches one or two digit years.
fn starts_with_year(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() > 4 && b[..4].iter().all(u8::is_ascii_digit) && b[4] == b'-'
}

fn parse_with(s: &str, date_formats: &[&str]) -> Option<NaiveDate> {
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
        for time in TIME_SUFFIXES {
            let full = format!("{fmt}{time}");
            if let Ok(ndt) = NaiveDateTime::parse_from_str(s, &full) {
                return Some(ndt.date());
            }
        }
    }
    None
}
