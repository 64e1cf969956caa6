//! External collaborators of the notification core.
//!
//! Three seams are expressed as traits: resource lookup (localized
//! strings, colors, icons), the permission gate, and the OS
//! notification backend. The core calls them but owns none of their
//! logic. In-memory implementations live here as well; they back the
//! tests and any host that has no native notification subsystem.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use lumen_core::{Color, IconRef};

use crate::error::DomainResult;
use crate::notifications::types::{ChannelGroupSpec, ChannelSpec, Notification};

/// Whether the process is currently authorized to post notifications.
///
/// Modeled as a sum type so the two checkpoints (immediate post,
/// deferred confirmation) read symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Granted,
    Denied,
}

impl Capability {
    pub fn is_granted(&self) -> bool {
        matches!(self, Capability::Granted)
    }
}

/// Reports whether user-visible notifications may currently be posted.
///
/// Queried fresh on every dispatch and at every timer expiry; the
/// answer is never cached.
pub trait PermissionGate: Send + Sync {
    fn can_notify(&self) -> Capability;
}

/// Resolves localized resources by key, falling back to a default.
///
/// Resolution never fails; absence of an override always yields the
/// supplied default.
pub trait ResourceResolver: Send + Sync {
    fn resolve_string(&self, key: &str, default: &str) -> String;
    fn resolve_color(&self, key: &str, default: Color) -> Color;
    fn resolve_icon(&self, key: &str, default: IconRef) -> IconRef;
}

/// The OS notification service consumed by the core.
///
/// Creation calls have create-or-merge semantics: declaring a group or
/// channel under an existing id updates its mutable fields and never
/// duplicates or errors.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Whether the platform supports notification channels at all.
    /// Legacy platforms return `false`, which turns channel
    /// registration into a no-op.
    fn channels_supported(&self) -> bool;

    /// Whether the platform supports descriptions on channel groups.
    fn group_descriptions_supported(&self) -> bool;

    async fn create_channel_group(&self, group: ChannelGroupSpec) -> DomainResult<()>;

    async fn create_channels(&self, channels: Vec<ChannelSpec>) -> DomainResult<()>;

    /// Posts a notification under the given id, replacing any
    /// notification currently shown under the same id.
    async fn post(&self, id: i32, notification: Notification) -> DomainResult<()>;

    async fn cancel(&self, id: i32) -> DomainResult<()>;
}

/// Resource resolver with no overrides; every lookup yields the default.
#[derive(Debug, Default)]
pub struct StaticResourceResolver;

impl ResourceResolver for StaticResourceResolver {
    fn resolve_string(&self, _key: &str, default: &str) -> String {
        default.to_string()
    }

    fn resolve_color(&self, _key: &str, default: Color) -> Color {
        default
    }

    fn resolve_icon(&self, _key: &str, default: IconRef) -> IconRef {
        default
    }
}

/// Resource resolver backed by override tables.
#[derive(Debug, Default)]
pub struct TableResourceResolver {
    strings: HashMap<String, String>,
    colors: HashMap<String, Color>,
    icons: HashMap<String, IconRef>,
}

impl TableResourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    pub fn with_color(mut self, key: impl Into<String>, value: Color) -> Self {
        self.colors.insert(key.into(), value);
        self
    }

    pub fn with_icon(mut self, key: impl Into<String>, value: IconRef) -> Self {
        self.icons.insert(key.into(), value);
        self
    }
}

impl ResourceResolver for TableResourceResolver {
    fn resolve_string(&self, key: &str, default: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn resolve_color(&self, key: &str, default: Color) -> Color {
        self.colors.get(key).copied().unwrap_or(default)
    }

    fn resolve_icon(&self, key: &str, default: IconRef) -> IconRef {
        self.icons.get(key).cloned().unwrap_or(default)
    }
}

/// Permission gate with a fixed answer.
#[derive(Debug)]
pub struct StaticPermissionGate(Capability);

impl StaticPermissionGate {
    pub fn granted() -> Self {
        StaticPermissionGate(Capability::Granted)
    }

    pub fn denied() -> Self {
        StaticPermissionGate(Capability::Denied)
    }
}

impl PermissionGate for StaticPermissionGate {
    fn can_notify(&self) -> Capability {
        self.0
    }
}

/// Permission gate whose answer can be flipped at runtime, mirroring a
/// user granting or revoking the notification permission mid-flight.
#[derive(Debug)]
pub struct SwitchablePermissionGate {
    granted: AtomicBool,
}

impl SwitchablePermissionGate {
    pub fn new(granted: bool) -> Self {
        Self {
            granted: AtomicBool::new(granted),
        }
    }

    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }
}

impl PermissionGate for SwitchablePermissionGate {
    fn can_notify(&self) -> Capability {
        if self.granted.load(Ordering::SeqCst) {
            Capability::Granted
        } else {
            Capability::Denied
        }
    }
}

/// In-memory notification backend.
///
/// Keeps declared groups/channels keyed by id (create-or-merge) and the
/// currently visible notifications keyed by numeric id, plus append-only
/// logs of posts and cancels for assertions.
pub struct InMemoryNotificationBackend {
    channels_supported: bool,
    group_descriptions_supported: bool,
    groups: Mutex<HashMap<String, ChannelGroupSpec>>,
    channels: Mutex<HashMap<String, ChannelSpec>>,
    active: Mutex<HashMap<i32, Notification>>,
    posted: Mutex<Vec<(i32, Notification)>>,
    cancelled: Mutex<Vec<i32>>,
}

impl InMemoryNotificationBackend {
    /// A backend with full channel support.
    pub fn new() -> Self {
        Self::with_support(true, true)
    }

    /// A backend modeling a legacy platform without channel support.
    pub fn legacy() -> Self {
        Self::with_support(false, false)
    }

    /// A backend with channels but no group descriptions.
    pub fn without_group_descriptions() -> Self {
        Self::with_support(true, false)
    }

    fn with_support(channels_supported: bool, group_descriptions_supported: bool) -> Self {
        Self {
            channels_supported,
            group_descriptions_supported,
            groups: Mutex::new(HashMap::new()),
            channels: Mutex::new(HashMap::new()),
            active: Mutex::new(HashMap::new()),
            posted: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
        }
    }

    /// Declared channel groups, keyed by id.
    pub fn groups(&self) -> HashMap<String, ChannelGroupSpec> {
        self.groups.lock().unwrap().clone()
    }

    /// Declared channels, keyed by id.
    pub fn channels(&self) -> HashMap<String, ChannelSpec> {
        self.channels.lock().unwrap().clone()
    }

    /// Currently visible notifications, keyed by id.
    pub fn active(&self) -> HashMap<i32, Notification> {
        self.active.lock().unwrap().clone()
    }

    /// Every post call, in order.
    pub fn posted(&self) -> Vec<(i32, Notification)> {
        self.posted.lock().unwrap().clone()
    }

    /// Every cancel call, in order.
    pub fn cancelled(&self) -> Vec<i32> {
        self.cancelled.lock().unwrap().clone()
    }
}

impl Default for InMemoryNotificationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationBackend for InMemoryNotificationBackend {
    fn channels_supported(&self) -> bool {
        self.channels_supported
    }

    fn group_descriptions_supported(&self) -> bool {
        self.group_descriptions_supported
    }

    async fn create_channel_group(&self, group: ChannelGroupSpec) -> DomainResult<()> {
        let mut groups = self.groups.lock().unwrap();
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn create_channels(&self, specs: Vec<ChannelSpec>) -> DomainResult<()> {
        let mut channels = self.channels.lock().unwrap();
        for spec in specs {
            channels.insert(spec.id.clone(), spec);
        }
        Ok(())
    }

    async fn post(&self, id: i32, notification: Notification) -> DomainResult<()> {
        let mut active = self.active.lock().unwrap();
        active.insert(id, notification.clone());
        self.posted.lock().unwrap().push((id, notification));
        Ok(())
    }

    async fn cancel(&self, id: i32) -> DomainResult<()> {
        let mut active = self.active.lock().unwrap();
        active.remove(&id);
        self.cancelled.lock().unwrap().push(id);
        Ok(())
    }
}
