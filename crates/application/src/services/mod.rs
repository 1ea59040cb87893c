//! Application services - Use case implementations

pub mod birthday_extractor;
pub mod birthday_matcher;
mod reminder_service;
pub mod subject_formatter;

pub use birthday_extractor::{extract_birthday, extract_birthdays};
pub use birthday_matcher::match_today;
pub use reminder_service::{
    BirthdayReminderService, ExportOutcome, NotificationFailure, ReminderSettings, RunReport,
};
pub use subject_formatter::{DEFAULT_DATE_FORMAT, format_subject, is_valid_date_format};
