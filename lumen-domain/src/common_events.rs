//! Domain events shared across the Lumen domain layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notifications::ChannelCategory;

/// Envelope for events published by domain services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent<T> {
    /// The event payload.
    pub payload: T,
    /// The service that published the event.
    pub source: String,
    /// When the event was published.
    pub timestamp: DateTime<Utc>,
}

impl<T> DomainEvent<T> {
    /// Creates a new domain event stamped with the current time.
    pub fn new(payload: T, source: impl Into<String>) -> Self {
        Self {
            payload,
            source: source.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Events published by the notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationEvent {
    /// Channel groups and channels were declared with the backend.
    ChannelsRegistered,
    /// A notification was handed to the backend.
    Posted { id: i32, category: ChannelCategory },
    /// Delivery was skipped because notifications are not permitted.
    DeliverySkipped { id: i32, category: ChannelCategory },
    /// The deferred confirmation re-posted a notification.
    Confirmed { id: i32 },
    /// A notification was cancelled.
    Cancelled { id: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_event_new_stamps_source_and_time() {
        let event = DomainEvent::new(NotificationEvent::ChannelsRegistered, "NotificationService");
        assert_eq!(event.source, "NotificationService");
        assert!(event.timestamp <= Utc::now());
    }

    #[test]
    fn notification_event_serde() {
        let event = NotificationEvent::Posted {
            id: 42,
            category: ChannelCategory::Dismissible,
        };
        let serialized = serde_json::to_string(&event).unwrap();
        let deserialized: NotificationEvent = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, event);
    }
}
