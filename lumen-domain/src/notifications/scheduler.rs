//! Deferred delivery confirmation.
//!
//! The host platform may defer actually showing a notification when the
//! application is leaving the foreground at post time, and the
//! background task that triggered the post can tear down its context
//! milliseconds later. The confirmation exists to win that race: a
//! short one-shot timer, then a permission re-check and a redundant
//! re-post under the same id. It is not a retry mechanism.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::common_events::{DomainEvent, NotificationEvent};
use crate::notifications::provider::{Capability, NotificationBackend, PermissionGate};
use crate::notifications::service::{EventPublisher, EVENT_SOURCE};
use crate::notifications::types::Notification;

/// State of one confirmation timer.
///
/// A timer is `Pending` from the moment it is armed until expiry;
/// `Fired` is terminal. The join handle only ever resolves to `Fired`,
/// so `Pending` names the armed-but-unexpired phase for callers that
/// track a timer before awaiting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    Pending,
    Fired,
}

/// Arms one-shot confirmation timers for dispatched alerts.
///
/// Every dispatch arms an independent timer; timers never cancel each
/// other and expose no cancellation to callers. The returned handle is
/// kept only so tests can await the transition.
pub(crate) struct DeferredConfirmation {
    backend: Arc<dyn NotificationBackend>,
    gate: Arc<dyn PermissionGate>,
    delay: Duration,
    publisher: EventPublisher,
}

impl DeferredConfirmation {
    pub(crate) fn new(
        backend: Arc<dyn NotificationBackend>,
        gate: Arc<dyn PermissionGate>,
        delay: Duration,
        publisher: EventPublisher,
    ) -> Self {
        Self {
            backend,
            gate,
            delay,
            publisher,
        }
    }

    /// Arms the timer for one notification and detaches.
    ///
    /// On expiry the permission gate is checked again: granted means a
    /// content-preserving re-post under the same id, denied means the
    /// `Fired` transition is a no-op.
    pub(crate) fn arm(&self, notification: Notification) -> JoinHandle<ConfirmationState> {
        let backend = Arc::clone(&self.backend);
        let gate = Arc::clone(&self.gate);
        let publisher = Arc::clone(&self.publisher);
        let delay = self.delay;

        tokio::spawn(async move {
            // Pending until the timer expires; nothing can cancel it.
            tokio::time::sleep(delay).await;

            let id = notification.id;
            match gate.can_notify() {
                Capability::Granted => {
                    if let Err(err) = backend.post(id, notification).await {
                        warn!(id, %err, "deferred confirmation post failed");
                    } else {
                        debug!(id, "deferred confirmation re-posted notification");
                        (publisher)(DomainEvent::new(
                            NotificationEvent::Confirmed { id },
                            EVENT_SOURCE,
                        ));
                    }
                }
                Capability::Denied => {
                    debug!(id, "permission revoked before confirmation; skipping re-post");
                }
            }

            ConfirmationState::Fired
        })
    }
}
