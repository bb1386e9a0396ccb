//! Display helpers for dates and optional values.
//!
//! The backend is loose about date shapes: timestamps arrive as RFC 3339
//! or `YYYY-MM-DD HH:MM:SS`, paper dates as a bare `YYYY`, project dates
//! as `YYYY-MM`. [`parse_loose`] accepts all of them; formatting helpers
//! render an empty string for absent or unparsable input.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Placeholder shown in table cells with no value.
pub const DASH: &str = "-";

/// Parse any of the date shapes the backend emits into a UTC-naive
/// timestamp. Partial dates resolve to the first day of the period.
pub fn parse_loose(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0);
    }
    None
}

/// Format with an explicit `strftime` pattern.
pub fn format_with(input: &str, pattern: &str) -> String {
    parse_loose(input)
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_default()
}

pub fn format_date_time(input: &str) -> String {
    format_with(input, DEFAULT_DATE_TIME_FORMAT)
}

pub fn format_date(input: &str) -> String {
    format_with(input, DEFAULT_DATE_FORMAT)
}

pub fn format_time(input: &str) -> String {
    format_with(input, DEFAULT_TIME_FORMAT)
}

/// Human-friendly distance between `target` and `now`.
///
/// Under a minute is "just now"; minutes, hours and days are spelled out
/// up to a week, after which the plain date is shown.
pub fn relative_time(target: &str, now: DateTime<Utc>) -> String {
    let Some(target) = parse_loose(target) else {
        return String::new();
    };
    let minutes = (now.naive_utc() - target).num_minutes();

    match minutes {
        m if m < 1 => "just now".to_string(),
        m if m < 60 => plural(m, "minute"),
        m if m < 24 * 60 => plural(m / 60, "hour"),
        m if m < 7 * 24 * 60 => plural(m / (24 * 60), "day"),
        _ => target.format(DEFAULT_DATE_FORMAT).to_string(),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Year column for achievement tables: the publish year for papers,
/// otherwise the project start year.
pub fn display_year(publish_date: Option<&str>, project_start: Option<&str>) -> String {
    publish_date
        .and_then(parse_loose)
        .or_else(|| project_start.and_then(parse_loose))
        .map(|dt| dt.year().to_string())
        .unwrap_or_else(|| DASH.to_string())
}

/// Render an optional value, falling back to [`DASH`].
pub fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DASH.to_string())
}
