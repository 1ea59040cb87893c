//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and carries the
//! ambient concerns: configuration, logging and templating.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use config::{
    AppConfig, CalendarExportAppConfig, ConfigError, DirectoryAppConfig, ReminderAppConfig,
    SmtpAppConfig,
};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
pub use templates::{TemplateConfig, TemplateEngine, TemplateError, TemplateSource};
