use anyhow::Result;
use caldesk_core::navigation::{CalendarView, today};
use caldesk_core::queue::Queue;
use caldesk_core::store::Store;

use crate::render::{MonthGrid, Render, appointments_heading, numbered};

/// Overview: this month's calendar, today's appointments and both queues.
pub fn run(store: &Store) -> Result<()> {
    let today = today();
    let mut view = CalendarView::default();
    view.select_date(today);

    println!(
        "{}",
        MonthGrid {
            store,
            view: &view,
            today,
        }
        .render()
    );

    println!();
    println!("{}", appointments_heading(today));
    for line in numbered(store.appointments_on(today)) {
        println!("{}", line);
    }

    for queue in Queue::ALL {
        println!();
        println!("{}", queue.render());
        for line in numbered(store.tasks(queue)) {
            println!("{}", line);
        }
    }

    Ok(())
}
