//! Formatting helpers for presenting raw mode values.

use time::{OffsetDateTime, UtcOffset};

/// ISO calendar date in UTC, e.g. `2021-07-03`.
pub fn format_date(ts: OffsetDateTime) -> String {
    ts.to_offset(UtcOffset::UTC).date().to_string()
}

/// Average update interval:
/// - < 1 day -> "daily"
/// - < 365 days -> "every N days"
/// - otherwise -> "every Y year(s)" (whole years, rounded down)
///
/// An infinite or undefined interval reads "never".
pub fn format_frequency(days: f64) -> String {
    if !days.is_finite() {
        return "never".into();
    }
    let whole_days = days.floor();
    if whole_days < 1.0 {
        return "daily".into();
    }
    if whole_days < 365.0 {
        return format!("every {} days", whole_days as u64);
    }
    let years = (days / 365.0).floor() as u64;
    format!("every {years} year(s)")
}

pub fn format_coordinate(value: f64) -> String {
    format!("{value:.5}")
}
