//! Transient calendar state: which month is on screen and which date is picked.
//!
//! Nothing here is persisted. Looking up appointments for the selected date
//! is a plain read against the store.

use chrono::{Local, NaiveDate};

use crate::month::Month;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    month: Month,
    selected: Option<NaiveDate>,
}

impl Default for CalendarView {
    /// Starts on the current month with nothing selected.
    fn default() -> Self {
        Self::new(Month::containing(today()))
    }
}

impl CalendarView {
    pub fn new(month: Month) -> Self {
        CalendarView {
            month,
            selected: None,
        }
    }

    pub fn current_month(&self) -> Month {
        self.month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.prev();
    }

    /// Show the month containing today's local date.
    pub fn go_to_today(&mut self) {
        self.go_to(today());
    }

    /// Show the month containing `date`. The selection is kept.
    pub fn go_to(&mut self, date: NaiveDate) {
        self.month = Month::containing(date);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = Some(date);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
