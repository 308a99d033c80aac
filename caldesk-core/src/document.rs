//! The persisted document: appointments keyed by date plus two todo queues.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::constants::DATE_FORMAT;
use crate::month::Month;
use crate::queue::Queue;

/// A decoded document plus the number of stored entries that could not be
/// represented and were left out.
#[derive(Debug)]
pub struct Decoded {
    pub document: Document,
    pub dropped: usize,
}

/// Entire application state, as stored in the JSON data file.
///
/// Every date present in `appointments` maps to a non-empty list. The
/// mutators below keep that true; decoding drops empty lists on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(serialize_with = "serialize_appointments")]
    appointments: BTreeMap<NaiveDate, Vec<String>>,
    todo_today: Vec<String>,
    todo_later: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a parsed JSON value, field by field.
    ///
    /// Missing fields and fields of the wrong type decode as empty. Returns
    /// `None` only when the top level is not a JSON object.
    pub fn from_value(value: Value) -> Option<Decoded> {
        let Value::Object(mut fields) = value else {
            return None;
        };

        let mut decoder = Decoder::default();
        let document = Document {
            appointments: decoder.appointments(fields.remove("appointments")),
            todo_today: decoder.task_list("todo_today", fields.remove("todo_today")),
            todo_later: decoder.task_list("todo_later", fields.remove("todo_later")),
        };

        Some(Decoded {
            document,
            dropped: decoder.dropped,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty() && self.todo_today.is_empty() && self.todo_later.is_empty()
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    pub fn appointments(&self) -> &BTreeMap<NaiveDate, Vec<String>> {
        &self.appointments
    }

    /// Appointments for a date, in display order. Empty when there are none.
    pub fn appointments_on(&self, date: NaiveDate) -> &[String] {
        self.appointments.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_appointments(&self, date: NaiveDate) -> bool {
        self.appointments.contains_key(&date)
    }

    /// Dates within `month` that have at least one appointment, ascending.
    pub fn dates_with_appointments(&self, month: Month) -> Vec<NaiveDate> {
        self.appointments
            .range(month.first_day()..=month.last_day())
            .map(|(date, _)| *date)
            .collect()
    }

    pub fn add_appointment(&mut self, date: NaiveDate, text: impl Into<String>) {
        self.appointments.entry(date).or_default().push(text.into());
    }

    /// Remove the appointment at `index` for `date`, dropping the date once
    /// its list is empty. A stale index leaves the document untouched.
    pub fn remove_appointment(&mut self, date: NaiveDate, index: usize) -> Option<String> {
        let items = self.appointments.get_mut(&date)?;
        if index >= items.len() {
            return None;
        }

        let removed = items.remove(index);
        if items.is_empty() {
            self.appointments.remove(&date);
        }
        Some(removed)
    }

    // =========================================================================
    // Task queues
    // =========================================================================

    pub fn tasks(&self, queue: Queue) -> &[String] {
        match queue {
            Queue::Today => &self.todo_today,
            Queue::Later => &self.todo_later,
        }
    }

    fn tasks_mut(&mut self, queue: Queue) -> &mut Vec<String> {
        match queue {
            Queue::Today => &mut self.todo_today,
            Queue::Later => &mut self.todo_later,
        }
    }

    pub fn add_task(&mut self, queue: Queue, text: impl Into<String>) {
        self.tasks_mut(queue).push(text.into());
    }

    pub fn remove_task(&mut self, queue: Queue, index: usize) -> Option<String> {
        let tasks = self.tasks_mut(queue);
        (index < tasks.len()).then(|| tasks.remove(index))
    }

    /// Complete a task. Only today's tasks can be done; `Later` is a no-op.
    pub fn mark_done(&mut self, queue: Queue, index: usize) -> Option<String> {
        match queue {
            Queue::Today => self.remove_task(Queue::Today, index),
            Queue::Later => None,
        }
    }

    /// Move the later-task at `index` to the end of today's queue.
    pub fn move_to_today(&mut self, index: usize) -> Option<String> {
        let task = self.remove_task(Queue::Later, index)?;
        self.todo_today.push(task.clone());
        Some(task)
    }
}

fn serialize_appointments<S: Serializer>(
    appointments: &BTreeMap<NaiveDate, Vec<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        appointments
            .iter()
            .map(|(date, items)| (date.format(DATE_FORMAT).to_string(), items)),
    )
}

// =============================================================================
// Lenient decoding
// =============================================================================

#[derive(Default)]
struct Decoder {
    dropped: usize,
}

impl Decoder {
    fn appointments(&mut self, value: Option<Value>) -> BTreeMap<NaiveDate, Vec<String>> {
        let mut appointments: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();

        let entries = match value {
            None | Some(Value::Null) => return appointments,
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                warn!(
                    "Ignoring 'appointments': expected an object, found {}",
                    type_name(&other)
                );
                self.dropped += 1;
                return appointments;
            }
        };

        for (key, items) in entries {
            let Ok(date) = NaiveDate::parse_from_str(&key, DATE_FORMAT) else {
                warn!("Skipping appointments under invalid date key '{}'", key);
                self.dropped += 1;
                continue;
            };

            let field = format!("appointments.{}", key);
            let texts = self.task_list(&field, Some(items));
            // An empty list carries no data, so leaving it out loses nothing.
            if !texts.is_empty() {
                appointments.entry(date).or_default().extend(texts);
            }
        }

        appointments
    }

    fn task_list(&mut self, field: &str, value: Option<Value>) -> Vec<String> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => self.strings_only(field, items),
            Some(other) => {
                warn!(
                    "Ignoring '{}': expected an array, found {}",
                    field,
                    type_name(&other)
                );
                self.dropped += 1;
                Vec::new()
            }
        }
    }

    fn strings_only(&mut self, field: &str, items: Vec<Value>) -> Vec<String> {
        let mut texts = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(text) => texts.push(text),
                other => {
                    warn!("Skipping non-string entry in '{}': {}", field, other);
                    self.dropped += 1;
                }
            }
        }
        texts
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
