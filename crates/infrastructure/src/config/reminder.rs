//! Reminder behavior and calendar export settings.

use std::path::PathBuf;

use application::DEFAULT_DATE_FORMAT;
use domain::Language;
use serde::{Deserialize, Serialize};

use crate::templates::TemplateConfig;

// ==============================
// Reminder Configuration
// ==============================

/// Localization and formatting of notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderAppConfig {
    /// IANA timezone that defines "today" (default: Europe/Berlin)
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// strftime pattern for the birth date in subjects (default: %d.%m.%Y)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// `DE` or `EN`; unknown codes fall back to EN
    #[serde(default)]
    pub language: Language,

    /// HTML body template (default: template_birthday.html)
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Use the built-in template when `template_path` does not exist
    #[serde(default = "super::default_true")]
    pub use_embedded_fallback: bool,
}

impl Default for ReminderAppConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            date_format: default_date_format(),
            language: Language::default(),
            template_path: default_template_path(),
            use_embedded_fallback: true,
        }
    }
}

impl ReminderAppConfig {
    /// Template engine settings for the configured body template
    pub fn to_template_config(&self) -> TemplateConfig {
        TemplateConfig {
            path: Some(self.template_path.clone()),
            use_embedded_fallback: self.use_embedded_fallback,
            ..TemplateConfig::default()
        }
    }
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_template_path() -> PathBuf {
    PathBuf::from("template_birthday.html")
}

// ==============================
// Calendar Export Configuration
// ==============================

/// iCalendar export of all birthdays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarExportAppConfig {
    /// Write the calendar on every run (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Target file (default: birthdays.ics)
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for CalendarExportAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output_path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("birthdays.ics")
}
