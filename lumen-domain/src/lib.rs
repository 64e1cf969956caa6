//! Notification domain layer for the Lumen toolkit.
//!
//! This crate owns the notification lifecycle: the fixed channel
//! taxonomy, permission-gated dispatch, deterministic identity rules
//! for replaceable and dismissible alerts, and the deferred delivery
//! confirmation that lets a notification outlive the background task
//! that produced it.

pub use lumen_core as core;

pub mod common_events;
pub mod error;
pub mod notifications;

pub use error::{DomainError, DomainResult};
pub use notifications::{
    AlertKind, Capability, ChannelCategory, DefaultNotificationService,
    InMemoryNotificationBackend, Notification, NotificationBackend, NotificationService,
    PermissionGate, ResourceResolver, StaticPermissionGate, StaticResourceResolver,
    SwitchablePermissionGate,
};
