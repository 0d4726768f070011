//! Transient "recently fired" marker set.
//!
//! [`ActiveReminders`] is a cloneable handle the UI polls to highlight
//! reminders that fired within the dwell window. The dispatcher inserts IDs
//! and its dwell timer clears the whole set at once; a mutex guards the set
//! because those two run on different tokio tasks.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Shared set of reminder IDs currently flagged for UI emphasis.
#[derive(Debug, Clone, Default)]
pub struct ActiveReminders {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl ActiveReminders {
    /// Create an empty marker set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a reminder is currently flagged.
    pub fn contains(&self, reminder_id: &str) -> bool {
        self.lock().contains(reminder_id)
    }

    /// Snapshot of all flagged reminder IDs.
    pub fn ids(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    /// Whether nothing is flagged.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub(crate) fn insert(&self, reminder_id: String) {
        self.lock().insert(reminder_id);
    }

    /// Clear every marker in one step (dwell expiry semantics).
    pub(crate) fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
