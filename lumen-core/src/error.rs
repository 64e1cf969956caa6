//! Error handling for the Lumen core layer.
//!
//! The main error type for this crate is [`CoreError`], which wraps the
//! more specific [`ConfigError`] and [`LoggingError`] variants.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type shared across the Lumen layers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur while initializing the logging system.
    #[error("Logging Initialization Failed: {0}")]
    LoggingInitialization(String),

    /// General I/O errors not covered by more specific variants.
    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),

    /// Invalid input provided to a core function.
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    /// Catch-all for unexpected internal errors within the core library.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Error type for configuration-related operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be parsed as TOML.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration parsed but holds invalid values.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Error type for logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured log filter could not be constructed.
    #[error("Invalid log filter: {0}")]
    FilterError(String),

    /// The log file could not be opened.
    #[error("Failed to open log file: {0}")]
    IoError(#[from] io::Error),

    /// The global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),
}
