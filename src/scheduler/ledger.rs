//! In-memory dedup ledger for fired occurrences.

use crate::reminder::OccurrenceKey;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Records which occurrences have already fired.
///
/// Entries live from the first successful match until the retention sweep
/// removes them. The ledger is process-local: it resets on restart, so
/// at-most-once holds within a session, not across sessions.
#[derive(Debug, Default)]
pub struct NotifyLedger {
    entries: HashMap<OccurrenceKey, NaiveDateTime>,
}

impl NotifyLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this occurrence has already been dispatched.
    pub fn is_notified(&self, key: &OccurrenceKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Record a dispatched occurrence. Idempotent: re-marking keeps the
    /// first timestamp.
    pub fn mark_notified(&mut self, key: OccurrenceKey, at: NaiveDateTime) {
        self.entries.entry(key).or_insert(at);
    }

    /// Drop every entry recorded at or before `cutoff`.
    ///
    /// With `cutoff = now - retention`, an entry recorded at `T` survives
    /// exactly while `now < T + retention`.
    pub fn evict_older_than(&mut self, cutoff: NaiveDateTime) {
        self.entries.retain(|_, first_notified_at| *first_notified_at > cutoff);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger has no live entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
