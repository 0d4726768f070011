//! Per-occurrence notification delivery.

use crate::platform::{NotificationPermission, NotificationPlatform};
use crate::reminder::{OccurrenceKey, Reminder};
use crate::scheduler::active::ActiveReminders;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Title used for every reminder notification surface.
const NOTIFICATION_TITLE: &str = "Reminder";

/// An alert rendered inside the application, independent of platform
/// notification permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InAppAlert {
    /// Short alert title.
    pub title: String,
    /// Alert body (the reminder message).
    pub body: String,
    /// The reminder that fired.
    pub reminder_id: String,
}

/// Delivers one due occurrence through the available channels and maintains
/// the "recently fired" UI markers.
///
/// Delivery is side-effect only: failures are logged, never propagated, so a
/// broken desktop channel cannot abort the evaluation cycle.
pub struct NotificationDispatcher {
    platform: Arc<dyn NotificationPlatform>,
    alert_tx: mpsc::UnboundedSender<InAppAlert>,
    active: ActiveReminders,
    dwell: Duration,
    dwell_timer: Option<JoinHandle<()>>,
}

impl NotificationDispatcher {
    /// Create a dispatcher writing markers into `active`.
    pub fn new(
        platform: Arc<dyn NotificationPlatform>,
        alert_tx: mpsc::UnboundedSender<InAppAlert>,
        active: ActiveReminders,
        dwell: Duration,
    ) -> Self {
        Self {
            platform,
            alert_tx,
            active,
            dwell,
            dwell_timer: None,
        }
    }

    /// Deliver one due occurrence.
    ///
    /// Desktop notification only with granted permission; in-app alert
    /// unconditionally; then the reminder is flagged active and the shared
    /// dwell timer restarts.
    pub async fn dispatch(&mut self, reminder: &Reminder, key: &OccurrenceKey) {
        if self.platform.permission() == NotificationPermission::Granted {
            let tag = key.dedupe_tag();
            if let Err(e) = self
                .platform
                .show(NOTIFICATION_TITLE, &reminder.message, &tag)
                .await
            {
                warn!(reminder_id = %reminder.id, "desktop notification failed: {e}");
            }
        }

        let alert = InAppAlert {
            title: NOTIFICATION_TITLE.to_owned(),
            body: reminder.message.clone(),
            reminder_id: reminder.id.clone(),
        };
        if self.alert_tx.send(alert).is_err() {
            debug!("in-app alert channel closed, alert dropped");
        }

        self.active.insert(reminder.id.clone());
        self.restart_dwell_timer();
    }

    /// Restart the shared dwell timer: cancel if pending, then schedule.
    /// A new firing resets the window; markers are cleared in bulk when the
    /// timer finally elapses.
    fn restart_dwell_timer(&mut self) {
        if let Some(pending) = self.dwell_timer.take() {
            pending.abort();
        }

        let active = self.active.clone();
        let dwell = self.dwell;
        self.dwell_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(dwell).await;
            active.clear();
        }));
    }

    /// Abort a pending dwell timer. Called on scheduler teardown.
    pub fn cancel_dwell_timer(&mut self) {
        if let Some(pending) = self.dwell_timer.take() {
            pending.abort();
        }
    }
}
