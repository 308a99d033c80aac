//! The owned data store a front end drives.
//!
//! A [`Store`] holds the live [`Document`] for the whole session and writes it
//! back after every change. Problems reading or writing the file are logged and
//! never returned: the in-memory document stays authoritative and the next
//! successful save catches the file up.
//!
//! The one exception is a file that could not be read and could not be moved
//! or copied aside either. The store then never writes to that path, since a
//! save would replace the only copy of whatever the file holds.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, warn};

use crate::constants::DEFAULT_MAX_FILE_SIZE;
use crate::document::Document;
use crate::month::Month;
use crate::persist;
use crate::queue::Queue;

/// Where the store keeps its file and how large a file it will parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub path: PathBuf,
    pub max_file_size: u64,
}

impl StoreOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreOptions {
            path: path.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

#[derive(Debug)]
pub struct Store {
    options: StoreOptions,
    document: Document,
    writable: bool,
}

impl Store {
    /// Load the document from disk. Always succeeds; see [`persist::load`].
    pub fn open(options: StoreOptions) -> Self {
        let loaded = persist::load(&options.path, options.max_file_size);
        Store {
            options,
            document: loaded.document,
            writable: loaded.writable,
        }
    }

    pub fn path(&self) -> &Path {
        &self.options.path
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Whether saves go to disk. `false` after a load left data on disk that
    /// exists nowhere else.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Discard the in-memory document and read the file again.
    pub fn load(&mut self) -> &Document {
        let loaded = persist::load(&self.options.path, self.options.max_file_size);
        self.document = loaded.document;
        self.writable = loaded.writable;
        &self.document
    }

    /// Write the whole document. Returns whether the write landed on disk.
    pub fn save(&self) -> bool {
        if !self.writable {
            warn!(
                "Not saving to {}: it holds data that could not be read or preserved. \
                 Move it away and reload to save again. Changes are kept in memory",
                self.options.path.display()
            );
            return false;
        }

        match persist::save(&self.options.path, &self.document) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Could not save {}: {}. Changes are kept in memory until the next save",
                    self.options.path.display(),
                    e
                );
                false
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn appointments_on(&self, date: NaiveDate) -> &[String] {
        self.document.appointments_on(date)
    }

    /// Used to flag calendar cells.
    pub fn has_appointments(&self, date: NaiveDate) -> bool {
        self.document.has_appointments(date)
    }

    pub fn dates_with_appointments(&self, month: Month) -> Vec<NaiveDate> {
        self.document.dates_with_appointments(month)
    }

    pub fn tasks(&self, queue: Queue) -> &[String] {
        self.document.tasks(queue)
    }

    // =========================================================================
    // Mutators
    //
    // Each one changes the document, then saves. Removals return the removed
    // text, or `None` when the index was stale; nothing is saved in that case.
    // =========================================================================

    pub fn add_appointment(&mut self, date: NaiveDate, text: impl Into<String>) {
        self.document.add_appointment(date, text);
        debug!("Added appointment on {}", date);
        self.save();
    }

    pub fn remove_appointment(&mut self, date: NaiveDate, index: usize) -> Option<String> {
        let removed = self.document.remove_appointment(date, index);
        self.commit("remove_appointment", removed)
    }

    pub fn add_task(&mut self, queue: Queue, text: impl Into<String>) {
        self.document.add_task(queue, text);
        debug!("Added task to {}", queue);
        self.save();
    }

    pub fn remove_task(&mut self, queue: Queue, index: usize) -> Option<String> {
        let removed = self.document.remove_task(queue, index);
        self.commit("remove_task", removed)
    }

    /// Complete a task from `queue`. Confirmation is the caller's job; once
    /// called, the task is removed. Only [`Queue::Today`] supports this.
    pub fn mark_done(&mut self, queue: Queue, index: usize) -> Option<String> {
        let done = self.document.mark_done(queue, index);
        self.commit("mark_done", done)
    }

    pub fn move_to_today(&mut self, index: usize) -> Option<String> {
        let moved = self.document.move_to_today(index);
        self.commit("move_to_today", moved)
    }

    fn commit(&self, operation: &str, changed: Option<String>) -> Option<String> {
        match changed {
            Some(text) => {
                self.save();
                Some(text)
            }
            None => {
                debug!("{}: index is out of range, nothing to do", operation);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BACKUP_SUFFIX, CORRUPTED_SUFFIX, TMP_SUFFIX};
    use crate::persist::sibling_path;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn temp_store() -> (TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreOptions::new(dir.path().join("calendar_data.json")));
        (dir, store)
    }

    fn reopen(store: &Store) -> Store {
        Store::open(store.options().clone())
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let (_dir, mut store) = temp_store();
        let day = date(2026, 10, 19);

        store.add_appointment(day, "Dentist");
        store.add_task(Queue::Today, "Laundry");
        store.add_task(Queue::Later, "Paint fence");
        store.add_task(Queue::Later, "Call mum");
        assert_eq!(reopen(&store).document(), store.document());

        assert_eq!(store.move_to_today(0).as_deref(), Some("Paint fence"));
        assert_eq!(store.mark_done(Queue::Today, 0).as_deref(), Some("Laundry"));
        assert_eq!(store.remove_appointment(day, 0).as_deref(), Some("Dentist"));

        let reopened = reopen(&store);
        assert_eq!(reopened.document(), store.document());
        assert_eq!(reopened.tasks(Queue::Today), ["Paint fence"]);
        assert_eq!(reopened.tasks(Queue::Later), ["Call mum"]);
        assert!(!reopened.has_appointments(day));
    }

    #[test]
    fn test_move_to_today_from_middle() {
        let (_dir, mut store) = temp_store();
        for task in ["a", "b", "c"] {
            store.add_task(Queue::Later, task);
        }
        store.add_task(Queue::Today, "first");

        assert_eq!(store.move_to_today(1).as_deref(), Some("b"));
        assert_eq!(store.tasks(Queue::Later), ["a", "c"]);
        assert_eq!(store.tasks(Queue::Today), ["first", "b"]);
    }

    #[test]
    fn test_stale_removal_does_not_touch_the_file() {
        let (_dir, mut store) = temp_store();
        let day = date(2026, 10, 19);

        assert_eq!(store.remove_appointment(day, 0), None);
        assert_eq!(store.remove_task(Queue::Later, 0), None);
        assert!(!store.path().exists());

        store.add_task(Queue::Today, "Laundry");
        let before = fs::read(store.path()).unwrap();
        assert_eq!(store.remove_task(Queue::Today, 3), None);
        assert_eq!(store.mark_done(Queue::Later, 0), None);
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        let path = blocker.join("calendar_data.json");
        let mut store = Store::open(StoreOptions::new(&path));
        assert!(store.is_writable());
        // The parent "directory" is now a regular file, so every save fails.
        fs::write(&blocker, "").unwrap();

        store.add_task(Queue::Today, "Laundry");
        store.add_appointment(date(2026, 10, 19), "Dentist");

        assert!(!store.save());
        assert_eq!(store.tasks(Queue::Today), ["Laundry"]);
        assert!(store.has_appointments(date(2026, 10, 19)));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_retries_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar_data.json");
        let mut store = Store::open(StoreOptions::new(&path));
        // A non-empty directory in the way makes the rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("x"), "").unwrap();

        store.add_task(Queue::Today, "Laundry");
        assert!(!sibling_path(&path, TMP_SUFFIX).exists());

        fs::remove_dir_all(&path).unwrap();
        store.add_task(Queue::Today, "Dishes");

        assert_eq!(reopen(&store).tasks(Queue::Today), ["Laundry", "Dishes"]);
    }

    #[test]
    fn test_load_rereads_the_file() {
        let (_dir, mut store) = temp_store();
        store.add_task(Queue::Later, "Paint fence");

        let mut other = reopen(&store);
        other.add_task(Queue::Later, "Learn Rust");

        assert_eq!(store.load().tasks(Queue::Later), ["Paint fence", "Learn Rust"]);
    }

    #[test]
    fn test_oversized_file_is_set_aside_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar_data.json");
        let original = "{\"todo_today\": [\"Laundry\"]}";
        fs::write(&path, original).unwrap();

        let store = Store::open(StoreOptions::new(&path).with_max_file_size(8));

        assert!(store.document().is_empty());
        let backup = sibling_path(&path, BACKUP_SUFFIX);
        assert_eq!(fs::read_to_string(backup).unwrap(), original);
        assert!(store.is_writable());
    }

    #[test]
    fn test_skipped_entries_survive_the_next_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar_data.json");
        let original = r#"{"appointments":{"2026-03-20":["Dentist"],"next tuesday":["Gym"]},"todo_today":["Laundry",42],"todo_later":"Paint fence"}"#;
        fs::write(&path, original).unwrap();

        let mut store = Store::open(StoreOptions::new(&path));
        store.add_task(Queue::Today, "Dishes");

        let copy = sibling_path(&path, CORRUPTED_SUFFIX);
        assert_eq!(fs::read_to_string(copy).unwrap(), original);

        let reopened = reopen(&store);
        assert_eq!(reopened.tasks(Queue::Today), ["Laundry", "Dishes"]);
        assert_eq!(reopened.appointments_on(date(2026, 3, 20)), ["Dentist"]);
        assert!(reopened.tasks(Queue::Later).is_empty());
    }

    #[test]
    fn test_corrupt_file_that_cannot_be_moved_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar_data.json");
        fs::write(&path, "{not json").unwrap();
        let blocker = sibling_path(&path, CORRUPTED_SUFFIX);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep.txt"), "keep").unwrap();

        let mut store = Store::open(StoreOptions::new(&path));
        store.add_task(Queue::Today, "Dishes");

        assert!(!store.is_writable());
        assert!(!store.save());
        assert_eq!(store.tasks(Queue::Today), ["Dishes"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
        assert!(!sibling_path(&path, TMP_SUFFIX).exists());
    }

    #[test]
    fn test_oversized_file_that_cannot_be_moved_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar_data.json");
        let original = "{\"todo_today\": [\"Laundry\"]}";
        fs::write(&path, original).unwrap();
        let blocker = sibling_path(&path, BACKUP_SUFFIX);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep.txt"), "keep").unwrap();

        let mut store = Store::open(StoreOptions::new(&path).with_max_file_size(8));
        store.add_appointment(date(2026, 10, 19), "Dentist");

        assert!(!store.is_writable());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_load_after_clearing_the_way_makes_store_writable_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar_data.json");
        fs::write(&path, "{not json").unwrap();
        let blocker = sibling_path(&path, CORRUPTED_SUFFIX);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep.txt"), "keep").unwrap();

        let mut store = Store::open(StoreOptions::new(&path));
        assert!(!store.is_writable());

        fs::remove_dir_all(&blocker).unwrap();
        assert!(store.load().is_empty());
        assert!(store.is_writable());
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "{not json");

        store.add_task(Queue::Today, "Dishes");
        assert_eq!(reopen(&store).tasks(Queue::Today), ["Dishes"]);
    }

    #[test]
    fn test_dates_with_appointments_for_month() {
        let (_dir, mut store) = temp_store();
        store.add_appointment(date(2026, 10, 1), "Rent");
        store.add_appointment(date(2026, 10, 19), "Dentist");
        store.add_appointment(date(2026, 11, 2), "Flight");

        let october = Month::new(2026, 10).unwrap();
        assert_eq!(
            store.dates_with_appointments(october),
            vec![date(2026, 10, 1), date(2026, 10, 19)]
        );
        assert_eq!(store.appointments_on(date(2026, 10, 19)), ["Dentist"]);
        assert!(store.appointments_on(date(2026, 10, 20)).is_empty());
    }
}
