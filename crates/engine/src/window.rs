//! Half-open calendar date ranges.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::{EngineError, ResultEngine};

/// Dates `d` with `start <= d < end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ResultEngine<Self> {
        if end < start {
            return Err(EngineError::InvalidDate(format!(
                "window ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// The calendar month `month` (1-12) of `year`.
    pub fn month(year: i32, month: u32) -> ResultEngine<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| EngineError::InvalidDate(format!("{year}-{month:02}")))?;
        let end = start
            .checked_add_months(Months::new(1))
            .ok_or_else(|| EngineError::InvalidDate(format!("{year}-{month:02}")))?;
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> ResultEngine<Self> {
        Self::month(date.year(), date.month())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn is_calendar_month(&self) -> bool {
        self.start.day() == 1 && self.start.checked_add_months(Months::new(1)) == Some(self.end)
    }

    /// The window of equal length right before this one.
    ///
    /// For a calendar month this is the previous calendar month, whatever its
    /// number of days.
    pub fn preceding(&self) -> Option<Self> {
        if self.is_calendar_month() {
            let start = self.start.checked_sub_months(Months::new(1))?;
            return Some(Self {
                start,
                end: self.start,
            });
        }
        let start = self
            .start
            .checked_sub_signed(Duration::days(self.len_days()))?;
        Some(Self {
            start,
            end: self.start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_window_is_half_open() {
        let feb = Window::month(2025, 2).unwrap();
        assert!(feb.contains(date(2025, 2, 1)));
        assert!(feb.contains(date(2025, 2, 28)));
        assert!(!feb.contains(date(2025, 3, 1)));
        assert!(!feb.contains(date(2025, 1, 31)));
        assert_eq!(feb.len_days(), 28);
    }

    #[test]
    fn preceding_month_crosses_year_boundary() {
        let jan = Window::month(2025, 1).unwrap();
        let dec = jan.preceding().unwrap();
        assert_eq!(dec, Window::month(2024, 12).unwrap());
    }

    #[test]
    fn preceding_month_has_its_own_length() {
        let mar = Window::month(2025, 3).unwrap();
        let feb = mar.preceding().unwrap();
        assert_eq!(feb.len_days(), 28);
        assert_eq!(feb.start, date(2025, 2, 1));
    }

    #[test]
    fn preceding_arbitrary_range_has_equal_length() {
        let window = Window::new(date(2025, 2, 10), date(2025, 2, 17)).unwrap();
        let prev = window.preceding().unwrap();
        assert_eq!(prev, Window::new(date(2025, 2, 3), date(2025, 2, 10)).unwrap());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(Window::new(date(2025, 2, 10), date(2025, 2, 9)).is_err());
        assert!(Window::month(2025, 13).is_err());
    }
}
