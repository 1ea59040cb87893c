//! Birthday reminder orchestration
//!
//! One run loads a directory snapshot, extracts birthdays, notifies the
//! recipient about today's matches and optionally exports the calendar.
//! Notification and export failures are recorded in the [`RunReport`]
//! and never stop the remaining work. Only a directory failure aborts.

use std::{fmt, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use domain::{BirthdayRecord, EmailAddress, Language, Timezone};
use tracing::{debug, error, info, instrument, warn};

use super::{
    birthday_extractor::extract_birthdays, birthday_matcher::match_today, subject_formatter,
};
use crate::{
    error::ApplicationError,
    ports::{
        BirthdayBindings, CalendarExportPort, DirectoryPort, ExportReceipt, NotificationPort,
        TemplatePort,
    },
};

/// Per-run settings derived from the configuration
#[derive(Debug, Clone)]
pub struct ReminderSettings {
    pub recipient: EmailAddress,
    pub timezone: Timezone,
    pub language: Language,
    /// strftime pattern for the birth date in subjects
    pub date_format: String,
}

/// A notification that could not be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFailure {
    pub name: String,
    pub reason: String,
}

/// What happened to the calendar export
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportOutcome {
    /// No exporter configured
    #[default]
    Disabled,
    Written(ExportReceipt),
    Failed(String),
}

/// Summary of a reminder run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// "Today" in the configured timezone
    pub today: NaiveDate,
    pub contacts: usize,
    pub birthdays: usize,
    /// Names of today's birthdays, in directory order
    pub matched: Vec<String>,
    pub notified: Vec<String>,
    pub failures: Vec<NotificationFailure>,
    pub export: ExportOutcome,
}

impl RunReport {
    /// Whether every notification and the export succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !matches!(self.export, ExportOutcome::Failed(_))
    }
}

/// Orchestrates a birthday reminder run
pub struct BirthdayReminderService {
    directory: Arc<dyn DirectoryPort>,
    notifier: Arc<dyn NotificationPort>,
    templates: Arc<dyn TemplatePort>,
    exporter: Option<Arc<dyn CalendarExportPort>>,
    settings: ReminderSettings,
}

impl fmt::Debug for BirthdayReminderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BirthdayReminderService")
            .field("settings", &self.settings)
            .field("has_exporter", &self.exporter.is_some())
            .finish_non_exhaustive()
    }
}

impl BirthdayReminderService {
    /// Create a service without calendar export
    #[must_use]
    pub fn new(
        directory: Arc<dyn DirectoryPort>,
        notifier: Arc<dyn NotificationPort>,
        templates: Arc<dyn TemplatePort>,
        settings: ReminderSettings,
    ) -> Self {
        Self {
            directory,
            notifier,
            templates,
            exporter: None,
            settings,
        }
    }

    /// Attach a calendar exporter
    #[must_use]
    pub fn with_exporter(mut self, exporter: Arc<dyn CalendarExportPort>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &ReminderSettings {
        &self.settings
    }

    /// Load the directory and extract all birthdays
    #[instrument(skip(self))]
    pub async fn load_birthdays(&self) -> Result<(usize, Vec<BirthdayRecord>), ApplicationError> {
        let contacts = self.directory.fetch_contacts().await?;
        let birthdays = extract_birthdays(&contacts);
        info!(
            contacts = contacts.len(),
            birthdays = birthdays.len(),
            "Loaded directory"
        );
        Ok((contacts.len(), birthdays))
    }

    /// Birthdays observed on the local day of `now`, without sending anything
    pub async fn birthdays_today(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(NaiveDate, Vec<BirthdayRecord>), ApplicationError> {
        let (_, birthdays) = self.load_birthdays().await?;
        let today = self.settings.timezone.today_at(now);
        Ok((today, match_today(&birthdays, today)))
    }

    /// Execute a full run: notify today's birthdays, then export
    #[instrument(skip(self), fields(timezone = %self.settings.timezone))]
    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunReport, ApplicationError> {
        let (contacts, birthdays) = self.load_birthdays().await?;
        let today = self.settings.timezone.today_at(now);
        let matches = match_today(&birthdays, today);
        info!(%today, matched = matches.len(), "Matched birthdays");

        let mut report = RunReport {
            today,
            contacts,
            birthdays: birthdays.len(),
            matched: matches.iter().map(|r| r.name().to_string()).collect(),
            notified: Vec::new(),
            failures: Vec::new(),
            export: ExportOutcome::Disabled,
        };

        for record in &matches {
            match self.notify(record).await {
                Ok(()) => report.notified.push(record.name().to_string()),
                Err(reason) => {
                    error!(
                        name = %record.name(),
                        %reason,
                        "Failed to send birthday notification"
                    );
                    report.failures.push(NotificationFailure {
                        name: record.name().to_string(),
                        reason,
                    });
                },
            }
        }

        report.export = self.export_records(&birthdays, now).await;
        Ok(report)
    }

    /// Export all birthdays without sending notifications
    pub async fn export(&self, now: DateTime<Utc>) -> Result<ExportOutcome, ApplicationError> {
        let (_, birthdays) = self.load_birthdays().await?;
        Ok(self.export_records(&birthdays, now).await)
    }

    async fn export_records(
        &self,
        birthdays: &[BirthdayRecord],
        now: DateTime<Utc>,
    ) -> ExportOutcome {
        let Some(exporter) = &self.exporter else {
            debug!("Calendar export disabled");
            return ExportOutcome::Disabled;
        };

        match exporter.export(birthdays, self.settings.language, now).await {
            Ok(receipt) => {
                info!(events = receipt.events, location = %receipt.location, "Calendar exported");
                ExportOutcome::Written(receipt)
            },
            Err(e) => {
                error!(error = %e, "Calendar export failed");
                ExportOutcome::Failed(e.to_string())
            },
        }
    }

    /// Render and deliver one notification; render errors count as delivery errors
    async fn notify(&self, record: &BirthdayRecord) -> Result<(), String> {
        let language = self.settings.language;
        let subject = subject_formatter::format_subject(
            language.texts().subject,
            record,
            &self.settings.date_format,
        );
        let body = self
            .templates
            .render_birthday(&BirthdayBindings::new(language, record.name()))
            .map_err(|e| {
                warn!(name = %record.name(), error = %e, "Template rendering failed");
                e.to_string()
            })?;

        self.notifier
            .send(&subject, &body, &self.settings.recipient)
            .await
            .map_err(|e| e.to_string())?;

        info!(name = %record.name(), %subject, "Birthday notification sent");
        Ok(())
    }
}
