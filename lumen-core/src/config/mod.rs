//! Configuration for the Lumen core layer.
//!
//! Configuration is deserialized from TOML into [`CoreConfig`], with
//! defaults applied for any missing section or field.

pub mod defaults;
mod loader;
mod types;

pub use loader::load_from_path;
pub use types::{CoreConfig, LoggingConfig, NotificationConfig};
