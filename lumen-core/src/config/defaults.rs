//! Default values for the Lumen configuration structures.

use std::path::PathBuf;

use super::types::{LoggingConfig, NotificationConfig};

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_to_console() -> bool {
    true
}

pub fn default_log_file() -> Option<PathBuf> {
    None
}

pub fn default_package_id() -> String {
    "lumen.app".to_string()
}

/// Delay before the deferred delivery confirmation re-posts a notification.
pub fn default_confirm_delay_ms() -> u64 {
    200
}

pub fn default_logging_config() -> LoggingConfig {
    LoggingConfig::default()
}

pub fn default_notification_config() -> NotificationConfig {
    NotificationConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        assert_eq!(default_log_level(), "info");
        assert!(default_log_to_console());
        assert_eq!(default_log_file(), None);
        assert_eq!(default_package_id(), "lumen.app");
        assert_eq!(default_confirm_delay_ms(), 200);
    }
}
