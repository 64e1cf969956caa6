//! Notification module for the Lumen domain layer.
//!
//! The module is split the same way the runtime behaves: `types` holds
//! the fixed channel taxonomy and notification records, `provider`
//! defines the external collaborators (resource resolver, permission
//! gate, notification backend), `channels` declares channel groups and
//! channels with the backend, `service` dispatches notifications, and
//! `scheduler` runs the deferred delivery confirmation.

pub mod channels;
pub mod errors;
pub mod provider;
pub mod scheduler;
pub mod service;
pub mod types;

pub use errors::NotificationError;

pub use types::{
    AlertKind, ChannelCategory, ChannelGroupSpec, ChannelSpec, Importance, LaunchIntent,
    Notification, NotificationAction,
};

pub use provider::{
    Capability, InMemoryNotificationBackend, NotificationBackend, PermissionGate,
    ResourceResolver, StaticPermissionGate, StaticResourceResolver, SwitchablePermissionGate,
    TableResourceResolver,
};

pub use channels::ChannelRegistry;
pub use scheduler::ConfirmationState;
pub use service::{DefaultNotificationService, NotificationService};
