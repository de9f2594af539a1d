//! Human readable dates for list rows, chart axes and headers.

use chrono::{Datelike, NaiveDate};

/// "Today", "Yesterday", "3 days ago", then "Feb 4" (or "Feb 4, 2024" for
/// another year). Future dates are always shown as dates.
pub fn relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let diff = (today - date).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{diff} days ago"),
        _ if date.year() == today.year() => short_date(date),
        _ => format!("{}, {}", short_date(date), date.year()),
    }
}

/// "Feb 9"
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "February 2025"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
