//! Scheduler evaluation loop.
//!
//! [`ReminderScheduler`] is the single owner of the dedup ledger and the
//! active-marker set for one user session. It periodically pulls the
//! reminder set, computes due occurrences, filters them against the ledger,
//! dispatches, and sweeps expired ledger entries.

use crate::config::SchedulerConfig;
use crate::platform::{NotificationPermission, NotificationPlatform};
use crate::reminder::OccurrenceKey;
use crate::scheduler::active::ActiveReminders;
use crate::scheduler::dispatch::{InAppAlert, NotificationDispatcher};
use crate::scheduler::ledger::NotifyLedger;
use crate::scheduler::occurrence::due_occurrences;
use crate::store::ReminderStore;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Injectable wall-clock source. Tests substitute a fixed or stepped clock.
pub type ClockFn = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// One successfully processed occurrence, kept for operator introspection.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchRecord {
    /// The reminder that fired.
    pub reminder_id: String,
    /// The scheduled occurrence instant.
    pub occurrence: NaiveDateTime,
    /// When the evaluation cycle dispatched it.
    pub notified_at: NaiveDateTime,
}

/// Session-scoped reminder evaluation loop.
pub struct ReminderScheduler {
    store: Arc<dyn ReminderStore>,
    platform: Arc<dyn NotificationPlatform>,
    alert_tx: mpsc::UnboundedSender<InAppAlert>,
    dispatcher: NotificationDispatcher,
    ledger: NotifyLedger,
    active: ActiveReminders,
    config: SchedulerConfig,
    clock: ClockFn,
    history: Vec<DispatchRecord>,
}

impl ReminderScheduler {
    /// Create a scheduler with default timing configuration.
    ///
    /// In-app alerts are delivered over `alert_tx`; the UI end of the
    /// channel renders them as toasts.
    pub fn new(
        store: Arc<dyn ReminderStore>,
        platform: Arc<dyn NotificationPlatform>,
        alert_tx: mpsc::UnboundedSender<InAppAlert>,
    ) -> Self {
        let config = SchedulerConfig::default();
        let active = ActiveReminders::new();
        let dispatcher = NotificationDispatcher::new(
            Arc::clone(&platform),
            alert_tx.clone(),
            active.clone(),
            config.dwell(),
        );
        Self {
            store,
            platform,
            alert_tx,
            dispatcher,
            ledger: NotifyLedger::new(),
            active,
            config,
            clock: Box::new(|| Local::now().naive_local()),
            history: Vec::new(),
        }
    }

    /// Replace the timing configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.dispatcher = NotificationDispatcher::new(
            Arc::clone(&self.platform),
            self.alert_tx.clone(),
            self.active.clone(),
            config.dwell(),
        );
        self.config = config;
        self
    }

    /// Substitute the wall-clock source (deterministic tests, monotonic
    /// hosts).
    pub fn with_clock(mut self, clock: ClockFn) -> Self {
        self.clock = clock;
        self
    }

    /// Handle the UI polls for "recently fired" highlighting.
    pub fn active_reminders(&self) -> ActiveReminders {
        self.active.clone()
    }

    /// Recent dispatch records, oldest first.
    pub fn history(&self) -> &[DispatchRecord] {
        &self.history
    }

    /// Start the evaluation loop until `cancel` is cancelled.
    ///
    /// Each tick completes, including all awaited dispatch calls, before the
    /// next is scheduled; slow cycles delay later ticks instead of
    /// overlapping them. Cancellation also aborts a pending dwell timer.
    pub fn run(mut self, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.bootstrap_permission();
            info!(
                cycle_secs = self.config.cycle_secs,
                "reminder scheduler started"
            );

            let mut interval = tokio::time::interval(self.config.cycle_interval());
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        self.dispatcher.cancel_dwell_timer();
                        info!("reminder scheduler stopped");
                        return;
                    }
                    _ = interval.tick() => self.tick().await,
                }
            }
        })
    }

    /// Read the platform permission once; if the user has never been asked,
    /// request it in the background and adopt whatever they decide. Cycles
    /// are never blocked on the dialog.
    fn bootstrap_permission(&self) {
        match self.platform.permission() {
            NotificationPermission::Undetermined => {
                let platform = Arc::clone(&self.platform);
                tokio::spawn(async move {
                    match platform.request_permission().await {
                        Ok(state) => info!("notification permission resolved: {state}"),
                        Err(e) => warn!("notification permission request failed: {e}"),
                    }
                });
            }
            state => debug!("notification permission already {state}"),
        }
    }

    /// Execute one evaluation cycle.
    async fn tick(&mut self) {
        let now = (self.clock)();

        let reminders = match self.store.fetch_active_reminders().await {
            Ok(reminders) => reminders,
            Err(e) => {
                warn!("cannot fetch reminders, skipping this cycle: {e}");
                return;
            }
        };

        let window = chrono::Duration::seconds(
            i64::try_from(self.config.cycle_secs).unwrap_or(i64::MAX),
        );

        for reminder in reminders.iter().filter(|r| r.is_active) {
            for instant in due_occurrences(reminder, now) {
                // Due window: eligible in exactly one cycle after the
                // instant, never before it.
                let age = now - instant;
                if age < chrono::Duration::zero() || age >= window {
                    continue;
                }

                let key = OccurrenceKey::new(reminder.id.clone(), instant);
                if self.ledger.is_notified(&key) {
                    debug!(tag = %key.dedupe_tag(), "occurrence already notified");
                    continue;
                }

                self.dispatcher.dispatch(reminder, &key).await;
                self.ledger.mark_notified(key, now);
                self.push_history(DispatchRecord {
                    reminder_id: reminder.id.clone(),
                    occurrence: instant,
                    notified_at: now,
                });
            }
        }

        // Eviction runs only after every due occurrence of this cycle has
        // been dispatched and marked.
        self.ledger.evict_older_than(now - self.config.retention());
    }

    fn push_history(&mut self, record: DispatchRecord) {
        self.history.push(record);
        if self.history.len() > self.config.history_limit {
            let drop_count = self.history.len() - self.config.history_limit;
            self.history.drain(0..drop_count);
        }
    }
}
