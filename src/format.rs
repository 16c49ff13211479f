//! Display formatting for dates and ages.
//!
//! The date format is always an explicit argument; nothing here reads
//! ambient preferences.

use chrono::NaiveDate;

use crate::models::enums::DateFormat;

pub fn format_date(date: NaiveDate, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Iso => "%Y-%m-%d",
        DateFormat::Us => "%m/%d/%Y",
        DateFormat::European => "%d/%m/%Y",
    };
    date.format(pattern).to_string()
}

/// Compact age label for axis ticks and tooltips: `8m`, `1y`, `2y 3m`.
pub fn format_age(age_months: u32) -> String {
    let years = age_months / 12;
    let months = age_months % 12;
    match (years, months) {
        (0, m) => format!("{m}m"),
        (y, 0) => format!("{y}y"),
        (y, m) => format!("{y}y {m}m"),
    }
}
