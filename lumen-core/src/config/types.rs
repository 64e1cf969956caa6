//! Configuration data structures for the Lumen core layer.
//!
//! These structs are populated by deserializing a TOML configuration
//! file, with defaults applied for missing fields. Unknown fields are
//! rejected via `#[serde(deny_unknown_fields)]`.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults;
use crate::error::ConfigError;

/// Configuration settings for the logging subsystem.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The minimum log level to record.
    /// Valid values (case-insensitive): "trace", "debug", "info", "warn", "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Whether log messages are written to the console.
    #[serde(default = "defaults::default_log_to_console")]
    pub log_to_console: bool,
    /// Optional path to a file where logs should be written.
    /// If `None`, file logging is disabled.
    #[serde(default = "defaults::default_log_file")]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_log_level(),
            log_to_console: defaults::default_log_to_console(),
            log_file: defaults::default_log_file(),
        }
    }
}

/// Configuration settings for the notification subsystem.
///
/// The `package_id` is the stable identifier the host application is
/// installed under; notification channel ids are namespaced with it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// The host application's package identifier.
    #[serde(default = "defaults::default_package_id")]
    pub package_id: String,
    /// Delay in milliseconds before the deferred delivery confirmation
    /// re-posts an alert notification.
    #[serde(default = "defaults::default_confirm_delay_ms")]
    pub confirm_delay_ms: u64,
}

impl NotificationConfig {
    /// Creates a notification configuration for the given package id,
    /// keeping the default confirmation delay.
    pub fn for_package(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            confirm_delay_ms: defaults::default_confirm_delay_ms(),
        }
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package_id.is_empty() {
            return Err(ConfigError::ValidationError(
                "package_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            package_id: defaults::default_package_id(),
            confirm_delay_ms: defaults::default_confirm_delay_ms(),
        }
    }
}

/// Root configuration structure for the Lumen core system.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Configuration for the logging subsystem.
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    /// Configuration for the notification subsystem.
    #[serde(default = "defaults::default_notification_config")]
    pub notifications: NotificationConfig,
}

impl CoreConfig {
    /// Validates all sections of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.notifications.validate()
    }
}
