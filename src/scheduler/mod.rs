//! Reminder scheduling: occurrence computation, dedup, dispatch, and the
//! session evaluation loop.

pub mod active;
pub mod dispatch;
pub mod ledger;
pub mod occurrence;
pub mod runner;

pub use active::ActiveReminders;
pub use dispatch::{InAppAlert, NotificationDispatcher};
pub use ledger::NotifyLedger;
pub use occurrence::due_occurrences;
pub use runner::{ClockFn, DispatchRecord, ReminderScheduler};
