//! Terminal rendering for caldesk types.
//!
//! Extension traits that add colored output to caldesk-core types using
//! owo_colors.

use caldesk_core::navigation::CalendarView;
use caldesk_core::queue::Queue;
use caldesk_core::store::Store;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Width of one day cell: two digits plus the appointment marker.
const CELL_WIDTH: usize = 3;

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// A month grid as it should appear for a given store, view and date.
pub struct MonthGrid<'a> {
    pub store: &'a Store,
    pub view: &'a CalendarView,
    pub today: NaiveDate,
}

impl Render for MonthGrid<'_> {
    fn render(&self) -> String {
        let month = self.view.current_month();
        let flagged = self.store.dates_with_appointments(month);
        let row_width = WEEKDAYS.len() * (CELL_WIDTH + 1) - 1;

        let mut lines = vec![format!("{:^row_width$}", month.label()).bold().to_string()];
        lines.push(
            WEEKDAYS
                .iter()
                .map(|d| format!("{:<CELL_WIDTH$}", d))
                .collect::<Vec<_>>()
                .join(" ")
                .dimmed()
                .to_string(),
        );

        for week in month.weeks() {
            let cells: Vec<String> = week
                .iter()
                .map(|day| match day.and_then(|d| month.day(d)) {
                    Some(date) => self.render_day(date, flagged.contains(&date)),
                    None => " ".repeat(CELL_WIDTH),
                })
                .collect();
            lines.push(cells.join(" ").trim_end().to_string());
        }

        lines.join("\n")
    }
}

impl MonthGrid<'_> {
    fn render_day(&self, date: NaiveDate, has_appointments: bool) -> String {
        let marker = if has_appointments { "*" } else { " " };
        let cell = format!("{:>2}{}", date.day(), marker);

        if self.view.selected_date() == Some(date) {
            cell.black().on_green().to_string()
        } else if date == self.today {
            cell.cyan().bold().to_string()
        } else if has_appointments {
            cell.yellow().to_string()
        } else {
            cell
        }
    }
}

impl Render for Queue {
    fn render(&self) -> String {
        self.title().bold().to_string()
    }
}

/// Heading for a date's appointment list, e.g. "Appointments for March 20, 2026".
pub fn appointments_heading(date: NaiveDate) -> String {
    format!("Appointments for {}", date.format("%B %d, %Y"))
        .bold()
        .to_string()
}

/// Render entries as a 1-based numbered list, matching the numbers commands take.
pub fn numbered(items: &[String]) -> Vec<String> {
    if items.is_empty() {
        return vec![format!("   {}", "(none)".dimmed())];
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {} {}", format!("{:>2}.", i + 1).dimmed(), item))
        .collect()
}

pub fn warning(message: &str) -> String {
    format!("{} {}", "!".yellow(), message.yellow())
}

pub fn success(message: &str) -> String {
    format!("{} {}", "✓".green(), message)
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
