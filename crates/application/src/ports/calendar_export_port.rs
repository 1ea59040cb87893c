//! Calendar export port for application layer
//!
//! Serializes all birthdays as a recurring calendar and stores it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{BirthdayRecord, Language};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Calendar export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// The calendar could not be generated
    #[error("Calendar generation failed: {0}")]
    Generation(String),

    /// The calendar could not be written to its destination
    #[error("Failed to write calendar to {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// Number of events written
    pub events: usize,
    /// Where the calendar was stored
    pub location: String,
}

/// Port for exporting birthdays as a calendar
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CalendarExportPort: Send + Sync {
    /// Export every record; `dtstamp` becomes each event's DTSTAMP
    async fn export(
        &self,
        records: &[BirthdayRecord],
        language: Language,
        dtstamp: DateTime<Utc>,
    ) -> Result<ExportReceipt, ExportError>;
}
