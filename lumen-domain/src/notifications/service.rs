//! Notification lifecycle service.
//!
//! The service is the single entry point hosts talk to: channel
//! registration at startup, alert and foreground-service dispatch, and
//! cancellation. Delivery is permission-gated and best-effort; no call
//! on the public surface returns an error. A failed or skipped delivery
//! degrades to "notification not shown" and a log line.

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use lumen_core::config::NotificationConfig;
use lumen_core::IconRef;

use crate::common_events::{DomainEvent, NotificationEvent};
use crate::notifications::channels::ChannelRegistry;
use crate::notifications::provider::{
    Capability, NotificationBackend, PermissionGate, ResourceResolver,
};
use crate::notifications::scheduler::DeferredConfirmation;
use crate::notifications::types::{
    AlertKind, ChannelCategory, LaunchIntent, Notification, NotificationAction, CLICK_ACTION_EXTRA,
    DEFAULT_FOREGROUND_SERVICE_TITLE, DEFAULT_NOTIFICATION_COLOR, DEFAULT_NOTIFICATION_ICON,
    FOREGROUND_SERVICE_TITLE_KEY, NOTIFICATION_COLOR_KEY, NOTIFICATION_ICON_KEY,
    NOTIFICATION_ID_FOREGROUND_SERVICE, NOTIFICATION_ID_REPLACEABLE, OPEN_ACTION_LABEL,
};

/// Source tag stamped onto every published notification event.
pub(crate) const EVENT_SOURCE: &str = "NotificationService";

/// Sink for domain events emitted by the notification core.
pub(crate) type EventPublisher = Arc<dyn Fn(DomainEvent<NotificationEvent>) + Send + Sync>;

/// Host-facing notification operations.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// One-time startup registration: stores the process-wide default
    /// click action and declares the channel taxonomy with the backend.
    ///
    /// The first caller wins the click-action slot; later calls keep
    /// the stored value. Registration itself is idempotent.
    async fn register(&self, default_click_action: Option<&str>);

    /// Builds and posts the ongoing foreground-service notification
    /// under its reserved id. The built record is returned whether or
    /// not delivery was permitted.
    async fn post_foreground_service(&self) -> Notification;

    /// Builds and posts a user-visible alert.
    ///
    /// Whatever is currently shown under the replaceable id is
    /// cancelled first, for either alert kind. A deferred confirmation
    /// timer is armed regardless of the immediate outcome, so an alert
    /// dispatched moments before the permission flips to granted still
    /// appears. The built record is returned in all cases.
    async fn post_alert(
        &self,
        kind: AlertKind,
        title: &str,
        body: Option<&str>,
        click_action: Option<&str>,
    ) -> Notification;

    /// Cancels the notification shown under `id`, if any.
    async fn cancel(&self, id: i32);
}

/// Default implementation wired to the three collaborator seams.
pub struct DefaultNotificationService {
    config: NotificationConfig,
    backend: Arc<dyn NotificationBackend>,
    gate: Arc<dyn PermissionGate>,
    resolver: Arc<dyn ResourceResolver>,
    // Write-once slot; `register` arbitrates the single writer.
    default_click_action: OnceCell<Option<String>>,
    event_publisher: EventPublisher,
}

impl DefaultNotificationService {
    pub fn new(
        config: NotificationConfig,
        backend: Arc<dyn NotificationBackend>,
        gate: Arc<dyn PermissionGate>,
        resolver: Arc<dyn ResourceResolver>,
    ) -> Self {
        Self::with_event_publisher(config, backend, gate, resolver, |_| {})
    }

    pub fn with_event_publisher<F>(
        config: NotificationConfig,
        backend: Arc<dyn NotificationBackend>,
        gate: Arc<dyn PermissionGate>,
        resolver: Arc<dyn ResourceResolver>,
        event_publisher: F,
    ) -> Self
    where
        F: Fn(DomainEvent<NotificationEvent>) + Send + Sync + 'static,
    {
        Self {
            config,
            backend,
            gate,
            resolver,
            default_click_action: OnceCell::new(),
            event_publisher: Arc::new(event_publisher),
        }
    }

    fn publish(&self, payload: NotificationEvent) {
        (self.event_publisher)(DomainEvent::new(payload, EVENT_SOURCE));
    }

    /// Explicit click action if given, otherwise the registered default.
    fn effective_click_action(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.default_click_action.get().cloned().flatten())
    }

    fn launch_intent(&self, click_action: Option<String>) -> LaunchIntent {
        let intent = LaunchIntent::new(self.config.package_id.as_str());
        match click_action {
            Some(action) => intent.with_extra(CLICK_ACTION_EXTRA, action),
            None => intent,
        }
    }

    fn resolved_color(&self) -> lumen_core::Color {
        self.resolver
            .resolve_color(NOTIFICATION_COLOR_KEY, DEFAULT_NOTIFICATION_COLOR)
    }

    fn resolved_icon(&self) -> IconRef {
        self.resolver
            .resolve_icon(NOTIFICATION_ICON_KEY, IconRef::named(DEFAULT_NOTIFICATION_ICON))
    }

    /// Gated immediate delivery. Failures and denials are terminal for
    /// this checkpoint; the caller still gets the built record.
    async fn deliver(&self, notification: &Notification) {
        let id = notification.id;
        match self.gate.can_notify() {
            Capability::Granted => {
                if let Err(err) = self.backend.post(id, notification.clone()).await {
                    warn!(id, %err, "notification post failed");
                } else {
                    self.publish(NotificationEvent::Posted {
                        id,
                        category: notification.category,
                    });
                }
            }
            Capability::Denied => {
                debug!(id, "notifications not permitted; skipping delivery");
                self.publish(NotificationEvent::DeliverySkipped {
                    id,
                    category: notification.category,
                });
            }
        }
    }

    fn confirmation(&self) -> DeferredConfirmation {
        DeferredConfirmation::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.gate),
            Duration::from_millis(self.config.confirm_delay_ms),
            Arc::clone(&self.event_publisher),
        )
    }
}

#[async_trait]
impl NotificationService for DefaultNotificationService {
    async fn register(&self, default_click_action: Option<&str>) {
        let value = default_click_action.map(str::to_string);
        if self.default_click_action.set(value).is_err() {
            debug!("default click action already set; keeping the first value");
        }

        ChannelRegistry::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.resolver),
            self.config.package_id.as_str(),
        )
        .register_all()
        .await;

        self.publish(NotificationEvent::ChannelsRegistered);
    }

    async fn post_foreground_service(&self) -> Notification {
        let category = ChannelCategory::ForegroundService;
        let notification = Notification {
            id: NOTIFICATION_ID_FOREGROUND_SERVICE,
            category,
            channel_id: category.channel_id(&self.config.package_id),
            title: self
                .resolver
                .resolve_string(FOREGROUND_SERVICE_TITLE_KEY, DEFAULT_FOREGROUND_SERVICE_TITLE),
            body: None,
            color: self.resolved_color(),
            colorized: true,
            icon: self.resolved_icon(),
            ongoing: true,
            auto_cancel: false,
            actions: Vec::new(),
            content_intent: None,
        };

        self.deliver(&notification).await;
        notification
    }

    async fn post_alert(
        &self,
        kind: AlertKind,
        title: &str,
        body: Option<&str>,
        click_action: Option<&str>,
    ) -> Notification {
        let id = kind.derive_id_at(Utc::now());
        let category = kind.category();

        // A fresh alert of either kind supersedes whatever replaceable
        // alert is still showing.
        self.cancel(NOTIFICATION_ID_REPLACEABLE).await;

        let intent = self.launch_intent(self.effective_click_action(click_action));
        let notification = Notification {
            id,
            category,
            channel_id: category.channel_id(&self.config.package_id),
            title: title.to_string(),
            body: body.map(str::to_string),
            color: self.resolved_color(),
            colorized: false,
            icon: self.resolved_icon(),
            ongoing: false,
            auto_cancel: true,
            actions: vec![NotificationAction {
                label: OPEN_ACTION_LABEL.to_string(),
                intent: intent.clone(),
            }],
            // Tapping the body navigates with a synthesized back stack;
            // the action button launches directly.
            content_intent: Some(intent.parent_stacked(true)),
        };

        self.deliver(&notification).await;

        // Armed even when the immediate post was denied or failed; the
        // permission may flip within the delay window.
        let _detached = self.confirmation().arm(notification.clone());

        notification
    }

    async fn cancel(&self, id: i32) {
        match self.gate.can_notify() {
            Capability::Granted => {
                if let Err(err) = self.backend.cancel(id).await {
                    warn!(id, %err, "notification cancel failed");
                } else {
                    self.publish(NotificationEvent::Cancelled { id });
                }
            }
            Capability::Denied => {
                debug!(id, "notifications not permitted; skipping cancel");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainResult;
    use crate::notifications::errors::NotificationError;
    use crate::notifications::provider::{
        InMemoryNotificationBackend, StaticPermissionGate, StaticResourceResolver,
    };
    use crate::notifications::types::{ChannelGroupSpec, ChannelSpec};
    use mockall::mock;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use std::sync::Mutex;

    mock! {
        Backend {}

        #[async_trait]
        impl NotificationBackend for Backend {
            fn channels_supported(&self) -> bool;
            fn group_descriptions_supported(&self) -> bool;
            async fn create_channel_group(&self, group: ChannelGroupSpec) -> DomainResult<()>;
            async fn create_channels(&self, channels: Vec<ChannelSpec>) -> DomainResult<()>;
            async fn post(&self, id: i32, notification: Notification) -> DomainResult<()>;
            async fn cancel(&self, id: i32) -> DomainResult<()>;
        }
    }

    fn config() -> NotificationConfig {
        NotificationConfig::for_package("com.example.host")
    }

    struct TestContext {
        service: DefaultNotificationService,
        backend: Arc<InMemoryNotificationBackend>,
        events: Arc<Mutex<Vec<NotificationEvent>>>,
    }

    impl TestContext {
        fn new(gate: Arc<dyn PermissionGate>) -> Self {
            let backend = Arc::new(InMemoryNotificationBackend::new());
            let events = Arc::new(Mutex::new(Vec::new()));
            let sink = events.clone();
            let service = DefaultNotificationService::with_event_publisher(
                config(),
                backend.clone(),
                gate,
                Arc::new(StaticResourceResolver),
                move |event| sink.lock().unwrap().push(event.payload),
            );
            Self {
                service,
                backend,
                events,
            }
        }

        fn events(&self) -> Vec<NotificationEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn register_then_post_then_cancel_publishes_events() {
        let ctx = TestContext::new(Arc::new(StaticPermissionGate::granted()));

        ctx.service.register(None).await;
        let posted = ctx
            .service
            .post_alert(AlertKind::Replaceable, "Payment received", None, None)
            .await;
        ctx.service.cancel(posted.id).await;

        let events = ctx.events();
        assert_eq!(events[0], NotificationEvent::ChannelsRegistered);
        // The supersede cancel of the replaceable id comes before the post.
        assert_eq!(
            events[1],
            NotificationEvent::Cancelled {
                id: NOTIFICATION_ID_REPLACEABLE
            }
        );
        assert_eq!(
            events[2],
            NotificationEvent::Posted {
                id: NOTIFICATION_ID_REPLACEABLE,
                category: ChannelCategory::Replaceable
            }
        );
        assert_eq!(
            events[3],
            NotificationEvent::Cancelled {
                id: NOTIFICATION_ID_REPLACEABLE
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn alert_cancels_replaceable_before_posting() {
        let mut backend = MockBackend::new();
        let mut seq = Sequence::new();
        backend
            .expect_cancel()
            .with(eq(NOTIFICATION_ID_REPLACEABLE))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        backend
            .expect_post()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let service = DefaultNotificationService::new(
            config(),
            Arc::new(backend),
            Arc::new(StaticPermissionGate::granted()),
            Arc::new(StaticResourceResolver),
        );

        service
            .post_alert(AlertKind::Dismissible, "Incoming payment", None, None)
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn post_failure_still_returns_built_record() {
        let mut backend = MockBackend::new();
        backend.expect_cancel().returning(|_| Ok(()));
        backend.expect_post().returning(|_, _| {
            Err(NotificationError::backend("post", "service unavailable").into())
        });

        let service = DefaultNotificationService::new(
            config(),
            Arc::new(backend),
            Arc::new(StaticPermissionGate::granted()),
            Arc::new(StaticResourceResolver),
        );

        let notification = service
            .post_alert(AlertKind::Replaceable, "Payment received", Some("0.1 unit"), None)
            .await;

        assert_eq!(notification.id, NOTIFICATION_ID_REPLACEABLE);
        assert_eq!(notification.title, "Payment received");
        assert_eq!(notification.body.as_deref(), Some("0.1 unit"));
    }

    #[tokio::test(start_paused = true)]
    async fn denied_gate_skips_delivery_entirely() {
        let ctx = TestContext::new(Arc::new(StaticPermissionGate::denied()));

        let notification = ctx
            .service
            .post_alert(AlertKind::Dismissible, "Missed payment", None, None)
            .await;

        assert!(ctx.backend.posted().is_empty());
        assert!(ctx.backend.cancelled().is_empty());
        assert_eq!(
            ctx.events(),
            vec![NotificationEvent::DeliverySkipped {
                id: notification.id,
                category: ChannelCategory::Dismissible
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn foreground_service_notification_shape() {
        let ctx = TestContext::new(Arc::new(StaticPermissionGate::granted()));

        let notification = ctx.service.post_foreground_service().await;

        assert_eq!(notification.id, NOTIFICATION_ID_FOREGROUND_SERVICE);
        assert_eq!(
            notification.channel_id,
            "com.example.host.foreground_service"
        );
        assert_eq!(notification.title, DEFAULT_FOREGROUND_SERVICE_TITLE);
        assert!(notification.ongoing);
        assert!(notification.colorized);
        assert!(!notification.auto_cancel);
        assert!(notification.actions.is_empty());
        assert!(ctx.backend.active().contains_key(&NOTIFICATION_ID_FOREGROUND_SERVICE));
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_click_action_overrides_default() {
        let ctx = TestContext::new(Arc::new(StaticPermissionGate::granted()));

        ctx.service.register(Some("deep://home")).await;
        let notification = ctx
            .service
            .post_alert(
                AlertKind::Dismissible,
                "Payment received",
                None,
                Some("deep://payment/42"),
            )
            .await;

        let intent = notification.content_intent.as_ref().unwrap();
        assert_eq!(intent.click_action(), Some("deep://payment/42"));
        assert!(intent.with_parent_stack);
        // The action button shares the payload but launches directly.
        assert_eq!(notification.actions.len(), 1);
        assert_eq!(notification.actions[0].label, OPEN_ACTION_LABEL);
        assert_eq!(
            notification.actions[0].intent.click_action(),
            Some("deep://payment/42")
        );
        assert!(!notification.actions[0].intent.with_parent_stack);
    }

    #[tokio::test(start_paused = true)]
    async fn registered_default_click_action_fills_in() {
        let ctx = TestContext::new(Arc::new(StaticPermissionGate::granted()));

        ctx.service.register(Some("deep://home")).await;
        // Re-registration does not overwrite the slot.
        ctx.service.register(Some("deep://other")).await;

        let notification = ctx
            .service
            .post_alert(AlertKind::Dismissible, "Payment received", None, None)
            .await;

        let intent = notification.content_intent.as_ref().unwrap();
        assert_eq!(intent.click_action(), Some("deep://home"));
    }

    #[tokio::test(start_paused = true)]
    async fn no_click_action_means_no_extra() {
        let ctx = TestContext::new(Arc::new(StaticPermissionGate::granted()));

        let notification = ctx
            .service
            .post_alert(AlertKind::Replaceable, "Syncing", None, None)
            .await;

        let intent = notification.content_intent.as_ref().unwrap();
        assert_eq!(intent.click_action(), None);
        assert_eq!(intent.target_package, "com.example.host");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_under_denied_gate_touches_nothing() {
        let ctx = TestContext::new(Arc::new(StaticPermissionGate::denied()));

        ctx.service.cancel(1234).await;

        assert!(ctx.backend.cancelled().is_empty());
        assert!(ctx.events().is_empty());
    }
}
