//! Presentation data handed to templates and JSON responses.

use chrono::{DateTime, Utc};

pub mod rows;
pub mod table;

/// `Apr 5, 2025 3:45 PM`
pub fn format_date_time(value: &DateTime<Utc>) -> String {
    value.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// `Apr 5, 2025`
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

/// Fraction rendered as a percentage with one decimal, `0.058` -> `5.8%`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}
