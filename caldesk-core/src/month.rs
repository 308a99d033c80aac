//! Calendar month value type.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::constants::DATE_FORMAT;
use crate::error::CalDeskError;

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    first: NaiveDate,
}

/// One row of the month grid, Monday first. Cells outside the month are `None`.
pub type Week = [Option<u32>; 7];

impl Month {
    /// Returns `None` when `month` is not in 1..=12 or the year is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Month { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Month {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// The following month, rolling December over into January.
    /// Saturates at the last representable month.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Month { first })
            .unwrap_or(*self)
    }

    /// The preceding month, rolling January back into December.
    /// Saturates at the first representable month.
    pub fn prev(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Month { first })
            .unwrap_or(*self)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + Duration::days(i64::from(self.days_in_month()) - 1)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            // Only the final representable month (a December) lands here.
            None => 31,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Month::containing(date) == *self
    }

    /// The date for `day` of this month, if it exists.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// Human-readable heading, e.g. "October 2026".
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// The month laid out as Monday-first weeks.
    pub fn weeks(&self) -> Vec<Week> {
        let offset = self.first.weekday().num_days_from_monday() as usize;
        let days = self.days_in_month() as usize;

        let mut weeks = Vec::new();
        let mut week: Week = [None; 7];
        for cell in 0..offset + days {
            if cell >= offset {
                week[cell % 7] = Some((cell - offset + 1) as u32);
            }
            if cell % 7 == 6 {
                weeks.push(week);
                week = [None; 7];
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }
        weeks
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

impl FromStr for Month {
    type Err = CalDeskError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{}-01", s), DATE_FORMAT)
            .map(Month::containing)
            .map_err(|_| CalDeskError::InvalidMonth(s.to_string()))
    }
}

/// Parse a `YYYY-MM-DD` date-key.
pub fn parse_date(s: &str) -> Result<NaiveDate, CalDeskError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| CalDeskError::InvalidDate(s.to_string()))
}
