//! Date parsing and formatting shared by every screen.
//!
//! Records arrive with ISO dates (`YYYY-MM-DD`, sometimes with a time part),
//! forms show `DD.MM.YYYY` or `DD-MM-YYYY`, and the rules in the domain layer
//! work on [`NaiveDate`]. Nothing here panics: input that cannot be read as a
//! date is handed back unchanged.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Separator used when rendering dates for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// `15.03.2025`
    #[default]
    Dotted,
    /// `15-03-2025`
    Dashed,
}

impl DisplayStyle {
    pub fn separator(self) -> char {
        match self {
            DisplayStyle::Dotted => '.',
            DisplayStyle::Dashed => '-',
        }
    }
}

/// Read a date from ISO, display or timestamp text.
///
/// The time part of `2025-03-15T08:00:00Z` is dropped. Otherwise the digit
/// groups are taken in order: a leading four digit group means year first,
/// a trailing one means day first. A bare `YYYYMMDD` run is accepted too.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let (year, month, day) = date_parts(input)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Split date text into `(year, month, day)` without checking the day
/// against the calendar.
///
/// Only the month range and the digit counts are checked here, so
/// `1990-02-29` comes back as parts even though 1990 has no such day.
pub fn date_parts(input: &str) -> Option<(i32, u32, u32)> {
    let trimmed = input.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);

    let groups: Vec<&str> = date_part
        .split(|c: char| !c.is_ascii_digit())
        .filter(|g| !g.is_empty())
        .collect();

    let (year, month, day) = match groups.as_slice() {
        [y, m, d, ..] if y.len() == 4 => (*y, *m, *d),
        [d, m, y, ..] if y.len() == 4 => (*y, *m, *d),
        [compact] if compact.len() == 8 => {
            if compact.starts_with("19") || compact.starts_with("20") {
                (&compact[0..4], &compact[4..6], &compact[6..8])
            } else {
                (&compact[4..8], &compact[2..4], &compact[0..2])
            }
        }
        _ => return None,
    };

    if month.len() > 2 || day.len() > 2 {
        return None;
    }

    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    let day = day.parse::<u32>().ok()?;

    if !(1..=12).contains(&month) || day == 0 || day > 31 {
        return None;
    }
    Some((year, month, day))
}

/// Format as `YYYY-MM-DD`
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format as `DD.MM.YYYY` or `DD-MM-YYYY`
pub fn format_display(date: NaiveDate, style: DisplayStyle) -> String {
    let sep = style.separator();
    format!("{:02}{sep}{:02}{sep}{:04}", date.day(), date.month(), date.year())
}

/// Convert any readable date text to display form; unreadable text is returned as-is
pub fn to_display(input: &str, style: DisplayStyle) -> String {
    match parse_date(input) {
        Some(date) => format_display(date, style),
        None => input.to_string(),
    }
}

/// Convert any readable date text to ISO form; unreadable text is returned as-is
pub fn to_iso(input: &str) -> String {
    match parse_date(input) {
        Some(date) => format_iso(date),
        None => input.to_string(),
    }
}

/// Long form used in reminders, e.g. "March 15, 2025"
pub fn format_date_long(date: NaiveDate) -> String {
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

/// Length of a month, `None` for a month number outside 1..=12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}
