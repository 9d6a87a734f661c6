use chrono::{DateTime, NaiveDate, Utc};

/// Countdown as `m:ss`; minutes are not capped at 59.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

/// Month and year, e.g. `July 2024`.
#[must_use]
pub fn format_member_since(value: DateTime<Utc>) -> String {
    value.format("%B %Y").to_string()
}

#[must_use]
pub fn format_day(value: NaiveDate) -> String {
    value.format("%b %-d, %Y").to_string()
}
