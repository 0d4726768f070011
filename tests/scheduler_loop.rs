//! End-to-end tests for the reminder scheduler over its public surface.
//!
//! Drives a real `run()` loop with a short cycle against the in-memory
//! store and the no-op platform, checking delivery, dedup, UI markers, and
//! teardown.

use chrono::Local;
use clinic_reminders::{
    InMemoryStore, NoopPlatform, Reminder, ReminderScheduler, SchedulerConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn short_cycle_config() -> SchedulerConfig {
    SchedulerConfig {
        cycle_secs: 2,
        dwell_secs: 1,
        ..SchedulerConfig::default()
    }
}

#[tokio::test]
async fn due_reminder_is_delivered_exactly_once() {
    init_tracing();

    let store = InMemoryStore::default();
    store.upsert(Reminder::once(
        "appt-42",
        "Patient follow-up at 14:30",
        Local::now().naive_local(),
    ));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let scheduler = ReminderScheduler::new(
        Arc::new(store),
        Arc::new(NoopPlatform::granted()),
        tx,
    )
    .with_config(short_cycle_config());
    let active = scheduler.active_reminders();

    let cancel = CancellationToken::new();
    let handle = scheduler.run(cancel.clone());

    let alert = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("alert within timeout")
        .expect("channel open");
    assert_eq!(alert.reminder_id, "appt-42");
    assert_eq!(alert.body, "Patient follow-up at 14:30");
    assert!(active.contains("appt-42"), "fired reminder is flagged for the UI");

    // The window has passed and the ledger holds the key: later cycles stay
    // silent.
    let second = tokio::time::timeout(Duration::from_millis(2500), rx.recv()).await;
    assert!(second.is_err(), "no duplicate dispatch for the same occurrence");

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("loop exits after cancel")
        .expect("task joins cleanly");
}

#[tokio::test]
async fn markers_clear_after_dwell() {
    init_tracing();

    let store = InMemoryStore::default();
    store.upsert(Reminder::once(
        "inv-7",
        "Reorder gloves",
        Local::now().naive_local(),
    ));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let scheduler = ReminderScheduler::new(
        Arc::new(store),
        Arc::new(NoopPlatform::granted()),
        tx,
    )
    .with_config(short_cycle_config());
    let active = scheduler.active_reminders();

    let cancel = CancellationToken::new();
    let handle = scheduler.run(cancel.clone());

    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("alert within timeout")
        .expect("channel open");
    assert!(active.contains("inv-7"));

    // Dwell is 1 s in this config; well after that the set must be empty.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(active.is_empty(), "dwell expiry clears the marker set");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
}

#[tokio::test]
async fn future_reminders_stay_silent() {
    init_tracing();

    let store = InMemoryStore::default();
    store.upsert(Reminder::once(
        "appt-99",
        "Tomorrow's surgery briefing",
        Local::now().naive_local() + chrono::Duration::hours(12),
    ));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let scheduler = ReminderScheduler::new(
        Arc::new(store),
        Arc::new(NoopPlatform::granted()),
        tx,
    )
    .with_config(short_cycle_config());

    let cancel = CancellationToken::new();
    let handle = scheduler.run(cancel.clone());

    let premature = tokio::time::timeout(Duration::from_millis(2500), rx.recv()).await;
    assert!(premature.is_err(), "nothing fires before its instant");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
}

#[tokio::test]
async fn teardown_stops_evaluation() {
    init_tracing();

    let store = InMemoryStore::default();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let scheduler = ReminderScheduler::new(
        Arc::new(store.clone()),
        Arc::new(NoopPlatform::granted()),
        tx,
    )
    .with_config(short_cycle_config());

    let cancel = CancellationToken::new();
    let handle = scheduler.run(cancel.clone());
    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("loop exits after cancel")
        .expect("task joins cleanly");

    // A reminder added after teardown is never picked up.
    store.upsert(Reminder::once(
        "late-1",
        "Added after shutdown",
        Local::now().naive_local(),
    ));
    // Either the channel is already closed (scheduler dropped) or it stays
    // silent; an actual alert would mean a cycle ran after teardown.
    let after = tokio::time::timeout(Duration::from_millis(2500), rx.recv()).await;
    assert!(
        !matches!(after, Ok(Some(_))),
        "no evaluation may run after teardown"
    );
}
