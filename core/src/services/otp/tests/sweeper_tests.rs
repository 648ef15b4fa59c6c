//! Unit tests for the background sweeper

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::services::otp::{ManualClock, OtpPolicy, OtpStore};

fn policy() -> OtpPolicy {
    OtpPolicy {
        sweep_interval_seconds: 60,
        ..OtpPolicy::default()
    }
}

/// Let the sweeper task observe the advanced tokio clock
async fn advance(by: StdDuration) {
    tokio::time::advance(by).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_evicts_expired_records() {
    let clock = Arc::new(ManualClock::default());
    let (store, handle) = OtpStore::start(policy(), clock.clone());

    store.issue("a@x.com").unwrap();
    clock.advance(Duration::minutes(6));
    assert_eq!(store.len(), 1);

    advance(StdDuration::from_secs(61)).await;
    assert_eq!(store.len(), 0);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_keeps_live_records() {
    let clock = Arc::new(ManualClock::default());
    let (store, handle) = OtpStore::start(policy(), clock.clone());

    store.issue("a@x.com").unwrap();
    clock.advance(Duration::minutes(2));

    advance(StdDuration::from_secs(61)).await;
    advance(StdDuration::from_secs(60)).await;
    assert_eq!(store.len(), 1);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_sweeping() {
    let clock = Arc::new(ManualClock::default());
    let (store, handle) = OtpStore::start(policy(), clock.clone());

    handle.shutdown().await;

    store.issue("a@x.com").unwrap();
    clock.advance(Duration::minutes(6));
    advance(StdDuration::from_secs(300)).await;

    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_aborts_task() {
    let clock = Arc::new(ManualClock::default());
    let (store, handle) = OtpStore::start(policy(), clock.clone());
    drop(handle);

    store.issue("a@x.com").unwrap();
    clock.advance(Duration::minutes(6));
    advance(StdDuration::from_secs(300)).await;

    assert_eq!(store.len(), 1);
}
