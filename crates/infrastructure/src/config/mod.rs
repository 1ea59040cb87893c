//! Application configuration
//!
//! Split into focused sub-modules:
//! - `integrations`: contact directory and SMTP
//! - `reminder`: localization, formatting and calendar export
//!
//! Sources, lowest precedence first: serde defaults, `config.toml` (or the
//! file passed to [`AppConfig::load_from`]), `BIRTHDAY_*` environment
//! variables with `__` as nesting separator (e.g. `BIRTHDAY_SMTP__HOST`).

mod integrations;
mod reminder;

use std::path::Path;

use application::{ReminderSettings, is_valid_date_format};
use domain::Timezone;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use integrations::{DirectoryAppConfig, SmtpAppConfig};
pub use reminder::{CalendarExportAppConfig, ReminderAppConfig};

use crate::telemetry::TelemetryConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "BIRTHDAY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Every problem found by [`AppConfig::validate`]
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub directory: DirectoryAppConfig,

    #[serde(default)]
    pub smtp: SmtpAppConfig,

    #[serde(default)]
    pub reminder: ReminderAppConfig,

    #[serde(default)]
    pub calendar_export: CalendarExportAppConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load from an optional `config.{toml,...}` in the working directory and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(
            config::File::with_name("config").required(false),
            environment(),
        )
    }

    /// Load from a required file and the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading configuration file");
        Self::from_sources(config::File::from(path).required(true), environment())
    }

    fn from_sources<F>(file: F, env: config::Environment) -> Result<Self, ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Check the whole configuration and report every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.directory.url.trim().is_empty() {
            problems.push("directory.url must not be empty".to_string());
        }
        if self.smtp.host.trim().is_empty() {
            problems.push("smtp.host must not be empty".to_string());
        }
        if let Err(e) = self.smtp.sender() {
            problems.push(format!("smtp.sender_email: {e}"));
        }
        if let Err(e) = self.smtp.receiver() {
            problems.push(format!("smtp.receiver_email: {e}"));
        }
        if let Err(e) = Timezone::parse(&self.reminder.timezone) {
            problems.push(format!("reminder.timezone: {e}"));
        }
        if !is_valid_date_format(&self.reminder.date_format) {
            problems.push(format!(
                "reminder.date_format: invalid pattern {:?}",
                self.reminder.date_format
            ));
        }
        if self.calendar_export.enabled && self.calendar_export.output_path.as_os_str().is_empty()
        {
            problems.push(
                "calendar_export.output_path must not be empty when export is enabled".to_string(),
            );
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Settings for `BirthdayReminderService`
    pub fn reminder_settings(&self) -> Result<ReminderSettings, ConfigError> {
        let recipient = self
            .smtp
            .receiver()
            .map_err(|e| ConfigError::Invalid(vec![format!("smtp.receiver_email: {e}")]))?;
        let timezone = Timezone::parse(&self.reminder.timezone)
            .map_err(|e| ConfigError::Invalid(vec![format!("reminder.timezone: {e}")]))?;

        Ok(ReminderSettings {
            recipient,
            timezone,
            language: self.reminder.language,
            date_format: self.reminder.date_format.clone(),
        })
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
