//! Loading of the Lumen configuration from disk.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;

use super::types::CoreConfig;

/// Loads and validates a [`CoreConfig`] from a TOML file.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<CoreConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let config: CoreConfig = toml::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_from_path_reads_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [logging]
            level = "debug"

            [notifications]
            package_id = "com.example.host"
            confirm_delay_ms = 150
            "#
        )
        .unwrap();

        let config = load_from_path(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.notifications.package_id, "com.example.host");
        assert_eq!(config.notifications.confirm_delay_ms, 150);
    }

    #[test]
    fn load_from_path_missing_file() {
        let result = load_from_path("/nonexistent/lumen.toml");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn load_from_path_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[").unwrap();

        let result = load_from_path(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn load_from_path_rejects_empty_package_id() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [notifications]
            package_id = ""
            "#
        )
        .unwrap();

        let result = load_from_path(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
