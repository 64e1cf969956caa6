//! Notification error types.
//!
//! The notification core itself has no fatal error path: delivery
//! failures degrade to "notification not shown". These errors exist at
//! the backend seam, where a concrete OS integration may reject a call.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    /// The notification backend rejected an operation.
    #[error("notification backend failed during {operation}: {reason}")]
    Backend { operation: String, reason: String },
}

impl NotificationError {
    pub fn backend(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        NotificationError::Backend {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_display() {
        let err = NotificationError::backend("create_channels", "service unavailable");
        assert_eq!(
            format!("{}", err),
            "notification backend failed during create_channels: service unavailable"
        );
    }
}
