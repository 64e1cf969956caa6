//! Logging bootstrap for the Lumen core layer.
//!
//! Sets up the `tracing` framework from a [`LoggingConfig`]. Initialization
//! is guarded so that only the first call installs a subscriber; later calls
//! are accepted without changing the active configuration.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;
use crate::error::LoggingError;

static INIT: Once = Once::new();
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initializes the logging system with the given configuration.
///
/// Only the first successful call installs the global subscriber.
pub fn initialize_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let mut result = Ok(());

    INIT.call_once(|| {
        result = do_initialize_logging(config);
        if result.is_ok() {
            INITIALIZED.store(true, Ordering::SeqCst);
        }
    });

    if INITIALIZED.load(Ordering::SeqCst) {
        Ok(())
    } else {
        result
    }
}

/// Checks whether the logging system has been initialized.
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

fn do_initialize_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let level = parse_level(&config.level)?;

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let mut layers = Vec::new();

    if config.log_to_console {
        let console_layer = fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true);
        layers.push(console_layer.boxed());
    }

    if let Some(path) = &config.log_file {
        let file = open_log_file(path)?;
        let file_layer = fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file));
        layers.push(file_layer.boxed());
    }

    let subscriber = Registry::default().with(env_filter).with(layers);

    set_global_default(subscriber).map_err(|e| {
        LoggingError::InitializationError(format!(
            "Failed to set global default subscriber: {}",
            e
        ))
    })
}

fn parse_level(level: &str) -> Result<Level, LoggingError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(LoggingError::FilterError(format!(
            "Invalid log level: {}",
            other
        ))),
    }
}

fn open_log_file<P: AsRef<Path>>(path: P) -> Result<std::fs::File, LoggingError> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
