//! Reminder definitions and occurrence identity.
//!
//! [`Reminder`] is owned by the external reminder store; this crate only
//! reads it. [`OccurrenceKey`] is the derived identity of one concrete
//! firing instant, used by the dedup ledger and as the platform dedupe tag.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// How a reminder repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecurrenceConfig {
    /// Exactly one occurrence, at the reminder's anchor instant.
    #[default]
    None,
    /// Recurs every `interval_days` days starting from the anchor day; on
    /// each active day fires `times_per_day` evenly spaced occurrences
    /// starting at the anchor time-of-day.
    Daily {
        /// Days between active days (≥ 1).
        interval_days: u32,
        /// Occurrences per active day (≥ 1).
        times_per_day: u32,
    },
}

impl std::fmt::Display for RecurrenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "one-time"),
            Self::Daily {
                interval_days,
                times_per_day,
            } => {
                if *interval_days == 1 {
                    write!(f, "daily, {times_per_day}x per day")
                } else {
                    write!(f, "every {interval_days} days, {times_per_day}x per day")
                }
            }
        }
    }
}

/// A reminder definition, read-only to the scheduler core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    /// Opaque identifier, stable for the reminder's lifetime.
    pub id: String,
    /// Display text.
    pub message: String,
    /// Anchor instant defining the first/base occurrence (host-local time).
    pub reminder_datetime: NaiveDateTime,
    /// Inactive reminders are never evaluated.
    pub is_active: bool,
    /// Recurrence rule.
    #[serde(default)]
    pub recurrence: RecurrenceConfig,
}

impl Reminder {
    /// Create an active one-time reminder.
    pub fn once(
        id: impl Into<String>,
        message: impl Into<String>,
        reminder_datetime: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            reminder_datetime,
            is_active: true,
            recurrence: RecurrenceConfig::None,
        }
    }

    /// Create an active daily-recurring reminder.
    pub fn daily(
        id: impl Into<String>,
        message: impl Into<String>,
        reminder_datetime: NaiveDateTime,
        interval_days: u32,
        times_per_day: u32,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            reminder_datetime,
            is_active: true,
            recurrence: RecurrenceConfig::Daily {
                interval_days,
                times_per_day,
            },
        }
    }
}

/// Unique identity of one fireable occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccurrenceKey {
    /// The originating reminder.
    pub reminder_id: String,
    /// The concrete scheduled firing instant.
    pub instant: NaiveDateTime,
}

impl OccurrenceKey {
    /// Build the key for one occurrence of a reminder.
    pub fn new(reminder_id: impl Into<String>, instant: NaiveDateTime) -> Self {
        Self {
            reminder_id: reminder_id.into(),
            instant,
        }
    }

    /// Stable tag handed to the notification platform so it can coalesce
    /// duplicate pop-ups as a second line of defense.
    pub fn dedupe_tag(&self) -> String {
        format!(
            "{}:{}",
            self.reminder_id,
            self.instant.format("%Y-%m-%dT%H:%M:%S")
        )
    }
}
