use anyhow::Result;
use caldesk_core::month::Month;
use caldesk_core::navigation::{CalendarView, today};
use caldesk_core::store::Store;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::{MonthGrid, Render, appointments_heading, numbered};

pub fn run(
    store: &Store,
    month: Option<Month>,
    next: u32,
    prev: u32,
    select: Option<NaiveDate>,
) -> Result<()> {
    let view = build_view(month, next, prev, select);

    println!(
        "{}",
        MonthGrid {
            store,
            view: &view,
            today: today(),
        }
        .render()
    );
    println!();

    match view.selected_date() {
        Some(date) => {
            println!("{}", appointments_heading(date));
            for line in numbered(store.appointments_on(date)) {
                println!("{}", line);
            }
        }
        None => println!("{}", "Select a date with --select to view appointments".dimmed()),
    }

    Ok(())
}

/// Start from `month` (or the selected date's month, or today), then step.
fn build_view(
    month: Option<Month>,
    next: u32,
    prev: u32,
    select: Option<NaiveDate>,
) -> CalendarView {
    let mut view = CalendarView::default();

    if let Some(date) = select {
        view.go_to(date);
        view.select_date(date);
    }
    if let Some(month) = month {
        view = CalendarView::new(month);
        if let Some(date) = select {
            view.select_date(date);
        }
    }

    for _ in 0..next {
        view.next_month();
    }
    for _ in 0..prev {
        view.prev_month();
    }

    view
}
