//! Logging setup
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a
//! stderr `fmt` layer, either human-readable or JSON.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g. "info", "birthday_reminder=debug,integration_smtp=trace")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,

    /// Ignore `RUST_LOG` and always use `log_filter`
    ///
    /// Set by the CLI when verbosity is requested on the command line.
    #[serde(skip)]
    pub force_filter: bool,
}

fn default_log_filter() -> String {
    "birthday_reminder=info,presentation_cli=info,application=info,integration_carddav=info,integration_ics=info,integration_smtp=info,infrastructure=info,warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
            force_filter: false,
        }
    }
}

impl TelemetryConfig {
    /// Override the filter with a fixed level, ignoring `RUST_LOG`
    #[must_use]
    pub fn with_level(mut self, level: &str) -> Self {
        self.log_filter = level.to_string();
        self.force_filter = true;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        if self.force_filter {
            return EnvFilter::new(&self.log_filter);
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_filter))
    }
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber, e.g. because one is already set
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Install the global subscriber
///
/// Fails when a global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(filter = %config.log_filter, json = config.json, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default() {
        let config = TelemetryConfig::default();
        assert!(config.log_filter.starts_with("birthday_reminder=info"));
        assert!(!config.json);
        assert!(!config.force_filter);
    }

    #[test]
    fn with_level_forces_filter() {
        let config = TelemetryConfig::default().with_level("debug");
        assert_eq!(config.log_filter, "debug");
        assert!(config.force_filter);
    }

    #[test]
    fn config_deserialization() {
        let config: TelemetryConfig =
            serde_json::from_str(r#"{"log_filter":"trace","json":true}"#).unwrap();
        assert_eq!(config.log_filter, "trace");
        assert!(config.json);
        assert!(!config.force_filter);
    }

    #[test]
    fn second_init_fails() {
        let config = TelemetryConfig::default();
        // the first call may succeed or fail depending on test ordering
        let _ = init_telemetry(&config);
        assert!(matches!(
            init_telemetry(&config),
            Err(TelemetryError::Init(_))
        ));
    }
}
