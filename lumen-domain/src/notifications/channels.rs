//! Channel registry: one-time declaration of channel groups and channels.
//!
//! Registration is idempotent because the backend's create calls are
//! create-or-merge; re-declaring an existing id updates its mutable
//! fields. Changing a channel's identity after install requires delete
//! and recreate on the host platform; the registry does not attempt it.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::notifications::provider::{NotificationBackend, ResourceResolver};
use crate::notifications::types::{
    ChannelCategory, ChannelGroupSpec, ChannelSpec, WorkgroupStrings, WORKGROUPS,
};

/// Declares the fixed channel taxonomy with the backend.
pub struct ChannelRegistry {
    backend: Arc<dyn NotificationBackend>,
    resolver: Arc<dyn ResourceResolver>,
    package_id: String,
}

impl ChannelRegistry {
    pub fn new(
        backend: Arc<dyn NotificationBackend>,
        resolver: Arc<dyn ResourceResolver>,
        package_id: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            resolver,
            package_id: package_id.into(),
        }
    }

    /// Declares both channel groups and all three channels.
    ///
    /// On a backend without channel support this is a silent no-op;
    /// dispatch still posts directly without channel routing. Backend
    /// failures are logged and swallowed — registration never surfaces
    /// an error to the host.
    pub async fn register_all(&self) {
        if !self.backend.channels_supported() {
            debug!("notification channels unsupported; skipping registration");
            return;
        }

        for workgroup in &WORKGROUPS {
            let group = self.group_spec(workgroup);
            if let Err(err) = self.backend.create_channel_group(group).await {
                warn!(group_id = workgroup.id, %err, "failed to create channel group");
            }
        }

        let channels = ChannelCategory::ALL
            .iter()
            .map(|category| self.channel_spec(*category))
            .collect();
        if let Err(err) = self.backend.create_channels(channels).await {
            warn!(%err, "failed to create notification channels");
        }

        debug!("registered notification channels");
    }

    fn group_spec(&self, workgroup: &WorkgroupStrings) -> ChannelGroupSpec {
        // Group descriptions only exist above the platform's feature
        // threshold; below it they are omitted, not defaulted.
        let description = if self.backend.group_descriptions_supported() {
            Some(
                self.resolver
                    .resolve_string(workgroup.description_key, workgroup.description_default),
            )
        } else {
            None
        };

        ChannelGroupSpec {
            id: workgroup.id.to_string(),
            name: self
                .resolver
                .resolve_string(workgroup.name_key, workgroup.name_default),
            description,
        }
    }

    fn channel_spec(&self, category: ChannelCategory) -> ChannelSpec {
        let strings = category.strings();
        ChannelSpec {
            id: category.channel_id(&self.package_id),
            name: self
                .resolver
                .resolve_string(strings.name_key, strings.name_default),
            description: self
                .resolver
                .resolve_string(strings.description_key, strings.description_default),
            importance: category.importance(),
            group_id: category.group_id().map(str::to_string),
        }
    }
}
