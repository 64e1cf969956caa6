//! Error module for the Lumen domain layer.

use thiserror::Error;

use lumen_core::CoreError;

use crate::notifications::NotificationError;

/// A general Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// The primary error type for the domain layer.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Core error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Notification error.
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// Other error.
    #[error("Domain error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_notification_error() {
        let err: DomainError =
            NotificationError::backend("post", "channel gone").into();
        assert!(matches!(err, DomainError::Notification(_)));
        assert_eq!(
            format!("{}", err),
            "notification backend failed during post: channel gone"
        );
    }

    #[test]
    fn wraps_core_error() {
        let err: DomainError = CoreError::InvalidInput("bad".to_string()).into();
        assert!(matches!(err, DomainError::Core(_)));
    }
}
