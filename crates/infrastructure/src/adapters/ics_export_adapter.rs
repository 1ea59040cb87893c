//! iCalendar export adapter - Implements `CalendarExportPort` using `integration_ics`

use std::path::PathBuf;

use application::ports::{CalendarExportPort, ExportError, ExportReceipt};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{BirthdayRecord, Language};
use integration_ics::{IcsError, export_calendar, write_calendar};
use tracing::{debug, instrument};

/// Writes the birthday calendar to a file
#[derive(Debug, Clone)]
pub struct IcsFileExportAdapter {
    output_path: PathBuf,
}

impl IcsFileExportAdapter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    fn write_error(&self, reason: impl ToString) -> ExportError {
        ExportError::Write {
            path: self.output_path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl CalendarExportPort for IcsFileExportAdapter {
    #[instrument(skip(self, records), fields(path = %self.output_path.display(), records = records.len()))]
    async fn export(
        &self,
        records: &[BirthdayRecord],
        language: Language,
        dtstamp: DateTime<Utc>,
    ) -> Result<ExportReceipt, ExportError> {
        let content = export_calendar(records, language, dtstamp);
        debug!(bytes = content.len(), "Calendar generated");

        let path = self.output_path.clone();
        tokio::task::spawn_blocking(move || write_calendar(&path, &content))
            .await
            .map_err(|e| self.write_error(e))?
            .map_err(|e| match e {
                IcsError::Io { reason, .. } => self.write_error(reason),
                other => ExportError::Generation(other.to_string()),
            })?;

        Ok(ExportReceipt {
            events: records.len(),
            location: self.output_path.display().to_string(),
        })
    }
}
