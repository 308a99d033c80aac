//! Core types for caldesk.
//!
//! - `document`: the persisted state (appointments plus two todo queues)
//! - `persist`: load/save of the JSON file with atomic replace and recovery
//! - `store`: the owned, save-after-every-change handle a front end drives
//! - `month` / `navigation`: transient calendar month state

pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod month;
pub mod navigation;
pub mod persist;
pub mod queue;
pub mod store;

pub use document::Document;
pub use error::{CalDeskError, CalDeskResult};
pub use month::Month;
pub use navigation::CalendarView;
pub use queue::Queue;
pub use store::{Store, StoreOptions};
