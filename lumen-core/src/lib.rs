//! Core layer for the Lumen notification toolkit.
//!
//! This crate carries the concerns shared by every other layer:
//! error types, logging bootstrap, configuration loading, and the
//! small value types (colors, icon references) that notification
//! content is described with.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{CoreConfig, LoggingConfig, NotificationConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use types::{Color, IconRef};
