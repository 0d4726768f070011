//! Pure occurrence-time computation.
//!
//! Maps a reminder definition plus "now" to the expected firing instants of
//! the current recurrence cycle. Only the most recent active day is ever
//! enumerated, so the work per evaluation is O(times_per_day) no matter how
//! old the reminder is.

use crate::reminder::{RecurrenceConfig, Reminder};
use chrono::{Duration, NaiveDateTime};
use tracing::warn;

/// Seconds in one calendar day.
const DAY_SECS: i64 = 86_400;

/// Compute the candidate firing instants for `reminder` as of `now`.
///
/// Pure and deterministic: no hidden state, safe to call repeatedly with the
/// same or later `now`. The caller applies the due-window check; a returned
/// instant is a *candidate*, not necessarily due.
///
/// Inactive reminders and malformed recurrence configs yield an empty list.
pub fn due_occurrences(reminder: &Reminder, now: NaiveDateTime) -> Vec<NaiveDateTime> {
    if !reminder.is_active {
        return Vec::new();
    }

    match reminder.recurrence {
        RecurrenceConfig::None => vec![reminder.reminder_datetime],
        RecurrenceConfig::Daily {
            interval_days,
            times_per_day,
        } => daily_occurrences(reminder, now, interval_days, times_per_day),
    }
}

fn daily_occurrences(
    reminder: &Reminder,
    now: NaiveDateTime,
    interval_days: u32,
    times_per_day: u32,
) -> Vec<NaiveDateTime> {
    if interval_days == 0 || times_per_day == 0 {
        warn!(
            reminder_id = %reminder.id,
            interval_days,
            times_per_day,
            "malformed daily recurrence, treating as no occurrences"
        );
        return Vec::new();
    }

    let base_day = reminder.reminder_datetime.date();
    let today = now.date();
    if base_day > today {
        // No active day has been reached yet.
        return Vec::new();
    }

    // Most recent scheduled day on-or-before today. The modular step-back
    // guarantees the walk never overshoots `now`'s day.
    let days_since = (today - base_day).num_days();
    let target_day = base_day + Duration::days(days_since - days_since % i64::from(interval_days));

    let spacing = Duration::seconds(DAY_SECS / i64::from(times_per_day));
    let first = target_day.and_time(reminder.reminder_datetime.time());

    (0..times_per_day)
        .map(|i| first + spacing * i32::try_from(i).unwrap_or(i32::MAX))
        .filter(|instant| instant.date() == target_day)
        .filter(|instant| *instant >= reminder.reminder_datetime)
        .collect()
}
