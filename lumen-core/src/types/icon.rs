//! Icon reference value type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to an icon resource by name.
///
/// The core never loads icon data itself; the name is handed to the
/// notification backend, which resolves it against the host platform's
/// resource table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconRef(String);

impl IconRef {
    /// Creates an icon reference for the named resource.
    pub fn named(name: impl Into<String>) -> Self {
        IconRef(name.into())
    }

    /// Returns the resource name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
