//! Recurring reminder notification scheduler for the clinic management app.
//!
//! Given reminder definitions (one-time or daily recurring), the scheduler
//! continuously determines which reminders are due right now, fires each due
//! occurrence exactly once, and expires the "recently fired" state after a
//! bounded window.
//!
//! # Architecture
//!
//! A single [`ReminderScheduler`] per user session drives the loop:
//! - **Occurrence calculator**: pure mapping from a reminder + "now" to the
//!   expected firing instants of the current recurrence cycle
//! - **Dedup ledger**: in-memory at-most-once record with 24 h retention
//! - **Dispatcher**: desktop notification (permission-gated) + in-app alert
//!   + transient UI markers with a 60 s dwell timer
//! - **Evaluation loop**: a 60 s tick that fetches reminders, applies the
//!   due window, and sweeps the ledger
//!
//! The reminder CRUD layer and the OS notification surface stay outside the
//! crate, behind [`ReminderStore`] and [`NotificationPlatform`].

pub mod config;
pub mod error;
pub mod platform;
pub mod reminder;
pub mod scheduler;
pub mod store;

pub use config::SchedulerConfig;
pub use error::{ReminderError, Result};
pub use platform::{NoopPlatform, NotificationPermission, NotificationPlatform};
pub use reminder::{OccurrenceKey, RecurrenceConfig, Reminder};
pub use scheduler::{ActiveReminders, DispatchRecord, InAppAlert, ReminderScheduler};
pub use store::{InMemoryStore, ReminderStore};
