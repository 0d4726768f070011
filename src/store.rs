//! Seam to the external reminder store.
//!
//! The CRUD API and persistence layer live in the host application; the
//! scheduler only ever reads the current reminder set through
//! [`ReminderStore`]. [`InMemoryStore`] is a trivial implementation for
//! embedding and tests.

use crate::error::Result;
use crate::reminder::Reminder;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Read access to the external reminder store. May fail transiently; the
/// scheduler logs and skips the cycle on failure.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Fetch the current reminder set.
    async fn fetch_active_reminders(&self) -> Result<Vec<Reminder>>;
}

/// A shared, mutex-backed reminder store.
///
/// Clones observe the same underlying set, so a host can mutate reminders
/// while a running scheduler reads them.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    reminders: Arc<Mutex<Vec<Reminder>>>,
}

impl InMemoryStore {
    /// Create a store seeded with the given reminders.
    pub fn new(reminders: Vec<Reminder>) -> Self {
        Self {
            reminders: Arc::new(Mutex::new(reminders)),
        }
    }

    /// Replace the full reminder set.
    pub fn replace(&self, reminders: Vec<Reminder>) {
        if let Ok(mut guard) = self.reminders.lock() {
            *guard = reminders;
        }
    }

    /// Add (or replace by ID) a single reminder.
    pub fn upsert(&self, reminder: Reminder) {
        if let Ok(mut guard) = self.reminders.lock() {
            if let Some(existing) = guard.iter_mut().find(|r| r.id == reminder.id) {
                *existing = reminder;
            } else {
                guard.push(reminder);
            }
        }
    }
}

#[async_trait]
impl ReminderStore for InMemoryStore {
    async fn fetch_active_reminders(&self) -> Result<Vec<Reminder>> {
        match self.reminders.lock() {
            Ok(guard) => Ok(guard.clone()),
            Err(poisoned) => Ok(poisoned.into_inner().clone()),
        }
    }
}
