#![forbid(unsafe_code)]
//! iCalendar export of birthdays
//!
//! Generates a yearly-recurring all-day event per birthday and writes the
//! calendar to disk.

pub mod export;
pub mod reader;
pub mod sink;

use thiserror::Error;

pub use export::{PRODID, event_summary, event_uid, export_calendar, sanitize_uid};
pub use reader::{ExportedAlarm, ExportedEvent, read_calendar_events};
pub use sink::write_calendar;

/// Calendar export errors
#[derive(Debug, Error)]
pub enum IcsError {
    #[error("Failed to parse calendar: {0}")]
    Parse(String),

    #[error("Event is missing {0}")]
    MissingProperty(&'static str),

    #[error("Failed to write {path}: {reason}")]
    Io { path: String, reason: String },
}
