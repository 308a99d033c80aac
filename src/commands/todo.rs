use anyhow::Result;
use caldesk_core::queue::Queue;
use caldesk_core::store::Store;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::{entry_text, to_index};
use crate::render::{Render, numbered, pluralize, success, warning};

pub fn add(store: &mut Store, queue: Queue, words: &[String]) -> Result<()> {
    let text = entry_text(words)?;
    store.add_task(queue, text.as_str());

    println!("{}", success(&format!("Added \"{}\" to {}", text, queue)));
    Ok(())
}

pub fn remove(store: &mut Store, queue: Queue, number: usize) -> Result<()> {
    match to_index(number).and_then(|index| store.remove_task(queue, index)) {
        Some(text) => println!("{}", success(&format!("Removed \"{}\" from {}", text, queue))),
        None => println!("{}", warning(&format!("No task #{} in {}", number, queue))),
    }
    Ok(())
}

/// Mark one of today's tasks as done, asking first unless `yes` is set.
pub fn done(store: &mut Store, number: usize, yes: bool) -> Result<()> {
    let task = to_index(number).and_then(|index| {
        store
            .tasks(Queue::Today)
            .get(index)
            .map(|task| (index, task.clone()))
    });

    let Some((index, task)) = task else {
        println!("{}", warning(&format!("No task #{} in today", number)));
        return Ok(());
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Mark this task as done?\n\n  {}\n", task))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Kept".dimmed());
            return Ok(());
        }
    }

    match store.mark_done(Queue::Today, index) {
        Some(text) => println!("{}", success(&format!("Done: {}", text))),
        None => println!("{}", warning(&format!("No task #{} in today", number))),
    }
    Ok(())
}

pub fn move_to_today(store: &mut Store, number: usize) -> Result<()> {
    match to_index(number).and_then(|index| store.move_to_today(index)) {
        Some(text) => println!("{}", success(&format!("Moved \"{}\" to today", text))),
        None => println!("{}", warning(&format!("No task #{} in later", number))),
    }
    Ok(())
}

pub fn list(store: &Store) -> Result<()> {
    for (i, queue) in Queue::ALL.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let count = store.tasks(queue).len();
        let summary = format!("({} {})", count, pluralize("task", count));
        println!("{} {}", queue.render(), summary.dimmed());
        for line in numbered(store.tasks(queue)) {
            println!("{}", line);
        }
    }
    Ok(())
}
