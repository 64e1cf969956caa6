//! Shared value types for the Lumen core layer.

mod color;
mod icon;

pub use color::Color;
pub use icon::IconRef;
