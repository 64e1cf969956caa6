//! Core notification types for the Lumen domain layer.
//!
//! The channel taxonomy is fixed: three channels across two groups,
//! with stable identifiers that hosts interoperate against. Display
//! strings are looked up through the resource resolver at registration
//! and dispatch time, falling back to the defaults defined here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use lumen_core::{Color, IconRef};

// Stable interop identifiers. Hosts match on these exactly.
pub const CHANNEL_FOREGROUND_SERVICE: &str = "foreground_service";
pub const CHANNEL_REPLACEABLE: &str = "replaceable";
pub const CHANNEL_DISMISSIBLE: &str = "dismissible";
pub const REPLACEABLE_WORKGROUP_ID: &str = "replaceable_workgroup";
pub const DISMISSIBLE_WORKGROUP_ID: &str = "dismissible_workgroup";

/// Reserved id for the single foreground-service notification.
pub const NOTIFICATION_ID_FOREGROUND_SERVICE: i32 = 100_000;
/// Reserved id shared by all replaceable alerts; a new post supersedes
/// whatever is currently shown under it.
pub const NOTIFICATION_ID_REPLACEABLE: i32 = 100_001;

/// Intent-extra key carrying the click action token.
pub const CLICK_ACTION_EXTRA: &str = "click_action";
/// Label of the single action button attached to alerts.
pub const OPEN_ACTION_LABEL: &str = "Open";

pub const NOTIFICATION_COLOR_KEY: &str = "notification_color";
pub const DEFAULT_NOTIFICATION_COLOR: Color = Color::from_rgb(0x0089F9);
pub const NOTIFICATION_ICON_KEY: &str = "notification_icon";
pub const DEFAULT_NOTIFICATION_ICON: &str = "sym_def_app_icon";
pub const FOREGROUND_SERVICE_TITLE_KEY: &str = "foreground_service_notification_title";
pub const DEFAULT_FOREGROUND_SERVICE_TITLE: &str = "Running in the background";

/// Resource keys and fallback defaults for one channel's display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStrings {
    pub name_key: &'static str,
    pub name_default: &'static str,
    pub description_key: &'static str,
    pub description_default: &'static str,
}

/// Resource keys and fallback defaults for one channel group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkgroupStrings {
    pub id: &'static str,
    pub name_key: &'static str,
    pub name_default: &'static str,
    pub description_key: &'static str,
    pub description_default: &'static str,
}

/// The two channel groups, in declaration order.
pub const WORKGROUPS: [WorkgroupStrings; 2] = [
    WorkgroupStrings {
        id: REPLACEABLE_WORKGROUP_ID,
        name_key: "replaceable_workgroup_name",
        name_default: "Status Updates",
        description_key: "replaceable_workgroup_description",
        description_default: "Alerts where each update replaces the previous one",
    },
    WorkgroupStrings {
        id: DISMISSIBLE_WORKGROUP_ID,
        name_key: "dismissible_workgroup_name",
        name_default: "Alerts",
        description_key: "dismissible_workgroup_description",
        description_default: "Independent alerts the user can dismiss",
    },
];

/// The importance ordinal a channel is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Importance {
    Low,
    Default,
}

/// The fixed notification channel categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelCategory {
    ForegroundService,
    Replaceable,
    Dismissible,
}

impl ChannelCategory {
    /// All categories, in channel declaration order.
    pub const ALL: [ChannelCategory; 3] = [
        ChannelCategory::ForegroundService,
        ChannelCategory::Replaceable,
        ChannelCategory::Dismissible,
    ];

    /// The stable category id, namespaced into the channel id.
    pub fn category_id(&self) -> &'static str {
        match self {
            ChannelCategory::ForegroundService => CHANNEL_FOREGROUND_SERVICE,
            ChannelCategory::Replaceable => CHANNEL_REPLACEABLE,
            ChannelCategory::Dismissible => CHANNEL_DISMISSIBLE,
        }
    }

    /// The full channel id: `<package-id>.<category-id>`.
    pub fn channel_id(&self, package_id: &str) -> String {
        format!("{}.{}", package_id, self.category_id())
    }

    /// The importance the channel is created with.
    pub fn importance(&self) -> Importance {
        match self {
            ChannelCategory::ForegroundService => Importance::Low,
            ChannelCategory::Replaceable | ChannelCategory::Dismissible => Importance::Default,
        }
    }

    /// The owning group id; the foreground-service channel has no group.
    pub fn group_id(&self) -> Option<&'static str> {
        match self {
            ChannelCategory::ForegroundService => None,
            ChannelCategory::Replaceable => Some(REPLACEABLE_WORKGROUP_ID),
            ChannelCategory::Dismissible => Some(DISMISSIBLE_WORKGROUP_ID),
        }
    }

    /// Resource keys and defaults for the channel's display strings.
    pub fn strings(&self) -> ChannelStrings {
        match self {
            ChannelCategory::ForegroundService => ChannelStrings {
                name_key: "foreground_service_notification_channel_name",
                name_default: "Background Service",
                description_key: "foreground_service_notification_channel_description",
                description_default: "Shown while a background task keeps the service alive",
            },
            ChannelCategory::Replaceable => ChannelStrings {
                name_key: "replaceable_notification_channel_name",
                name_default: "Status Updates",
                description_key: "replaceable_notification_channel_description",
                description_default: "Status alerts that replace their previous update",
            },
            ChannelCategory::Dismissible => ChannelStrings {
                name_key: "dismissible_notification_channel_name",
                name_default: "Alerts",
                description_key: "dismissible_notification_channel_description",
                description_default: "Alerts that can be dismissed individually",
            },
        }
    }
}

impl fmt::Display for ChannelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category_id())
    }
}

/// The two postable alert categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    Replaceable,
    Dismissible,
}

impl AlertKind {
    /// The channel category the alert is posted on.
    pub fn category(&self) -> ChannelCategory {
        match self {
            AlertKind::Replaceable => ChannelCategory::Replaceable,
            AlertKind::Dismissible => ChannelCategory::Dismissible,
        }
    }

    /// Derives the notification id for an alert dispatched at `at`.
    ///
    /// Replaceable alerts share the reserved id. Dismissible alerts take
    /// the wall-clock time truncated to whole seconds, so two dispatches
    /// within the same second share an id; that collision is accepted
    /// behavior, not a defect.
    pub fn derive_id_at(&self, at: DateTime<Utc>) -> i32 {
        match self {
            AlertKind::Replaceable => NOTIFICATION_ID_REPLACEABLE,
            AlertKind::Dismissible => at.timestamp() as i32,
        }
    }
}

/// Declaration of a channel group, handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelGroupSpec {
    pub id: String,
    pub name: String,
    /// Only set when the backend supports group descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Declaration of a channel, handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// The namespaced channel id: `<package-id>.<category-id>`.
    pub id: String,
    pub name: String,
    pub description: String,
    pub importance: Importance,
    /// The owning group, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// An intent launching the host application's entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchIntent {
    /// The package whose entry point is launched.
    pub target_package: String,
    /// Extra data attached to the intent.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extras: HashMap<String, String>,
    /// Whether launching routes through the platform's back-stack
    /// builder, producing a correct navigation history.
    #[serde(default)]
    pub with_parent_stack: bool,
}

impl LaunchIntent {
    pub fn new(target_package: impl Into<String>) -> Self {
        Self {
            target_package: target_package.into(),
            extras: HashMap::new(),
            with_parent_stack: false,
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn parent_stacked(mut self, with_parent_stack: bool) -> Self {
        self.with_parent_stack = with_parent_stack;
        self
    }

    /// The click action token carried in the intent extras, if any.
    pub fn click_action(&self) -> Option<&str> {
        self.extras.get(CLICK_ACTION_EXTRA).map(String::as_str)
    }
}

/// An action button attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    pub intent: LaunchIntent,
}

/// A built notification, ready to hand to the backend.
///
/// This is a plain data record; translation into the OS representation
/// happens once, inside the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i32,
    pub category: ChannelCategory,
    /// The namespaced channel the notification is routed through.
    pub channel_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub color: Color,
    pub colorized: bool,
    pub icon: IconRef,
    /// Ongoing notifications cannot be swiped away.
    pub ongoing: bool,
    /// Auto-cancel notifications dismiss when tapped.
    pub auto_cancel: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_intent: Option<LaunchIntent>,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notification[{}] '{}' ({})", self.id, self.title, self.category)
    }
}
