//! Date helper functions

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// Format a publication date for display, e.g. `January 15, 2024`.
///
/// With `include_relative` the result gains a coarse label computed from
/// calendar fields: `January 15, 2024 (2mo ago)`.
///
/// Unparseable input is returned unchanged.
pub fn format_date(date: &str, include_relative: bool) -> String {
    format_date_at(date, include_relative, Local::now().naive_local())
}

/// [`format_date`] against an explicit "now"
pub fn format_date_at(date: &str, include_relative: bool, now: NaiveDateTime) -> String {
    let Some(target) = parse_local(date) else {
        tracing::debug!("Cannot format date {:?}", date);
        return date.to_string();
    };

    let full = full_date(&target);
    if !include_relative {
        return full;
    }

    format!("{} ({})", full, relative_date(&target, &now))
}

/// Format date in full format (like "January 1, 2024")
pub fn full_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Relative label from whole calendar-field differences:
/// `{N}y ago`, `{N}mo ago`, `{N}d ago`, or `Today`.
///
/// Only the first positive field counts, so 2023-12-31 seen on
/// 2024-01-01 is `1y ago`.
pub fn relative_date(date: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let years = now.year() - date.year();
    let months = now.month() as i32 - date.month() as i32;
    let days = now.day() as i32 - date.day() as i32;

    if years > 0 {
        format!("{}y ago", years)
    } else if months > 0 {
        format!("{}mo ago", months)
    } else if days > 0 {
        format!("{}d ago", days)
    } else {
        "Today".to_string()
    }
}

/// Parse into local wall-clock time. Bare dates are local midnight.
fn parse_local(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if !s.contains('T') {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
