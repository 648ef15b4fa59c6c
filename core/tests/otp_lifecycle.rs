//! Integration tests for the email code lifecycle through the public API

use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::Duration;

use vg_core::services::otp::{ManualClock, OtpPolicy, OtpStore};
use vg_core::{
    CodeSender, DispatchStatus, DomainError, EmailVerificationService, VerifyOutcome,
};

// Sender that keeps the last code per recipient
#[derive(Default)]
struct Outbox {
    last: Mutex<Option<(String, String)>>,
}

#[async_trait]
impl CodeSender for Outbox {
    async fn send_code(&self, recipient: &str, code: &str) -> Result<String, String> {
        *self.last.lock().unwrap() = Some((recipient.to_string(), code.to_string()));
        Ok(format!("msg_id_{}", recipient))
    }
}

impl Outbox {
    fn code(&self) -> String {
        self.last.lock().unwrap().clone().unwrap().1
    }
}

fn setup() -> (EmailVerificationService<Outbox>, Arc<Outbox>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let store = Arc::new(OtpStore::with_clock(OtpPolicy::default(), clock.clone()));
    let outbox = Arc::new(Outbox::default());
    let service = EmailVerificationService::new(store, outbox.clone(), Default::default());
    (service, outbox, clock)
}

fn wrong(code: &str) -> &'static str {
    if code == "000000" {
        "999999"
    } else {
        "000000"
    }
}

#[tokio::test]
async fn test_code_expires_after_ttl() {
    let (service, outbox, clock) = setup();

    service.send_code("a@x.com").await.unwrap();
    clock.advance(Duration::seconds(301));

    assert_eq!(
        service.verify_code("a@x.com", &outbox.code()).await.unwrap(),
        VerifyOutcome::Expired
    );
}

#[tokio::test]
async fn test_five_wrong_codes_exhaust() {
    let (service, outbox, _) = setup();

    let sent = service.send_code("b@x.com").await.unwrap();
    assert_eq!(
        sent.dispatch,
        DispatchStatus::Delivered {
            reference: "msg_id_b@x.com".to_string()
        }
    );
    let code = outbox.code();

    let mut last = None;
    for _ in 0..5 {
        last = Some(service.verify_code("b@x.com", wrong(&code)).await.unwrap());
    }
    assert_eq!(last, Some(VerifyOutcome::Exhausted));

    let sixth = service.verify_code("b@x.com", &code).await.unwrap();
    assert!(matches!(sixth, VerifyOutcome::Exhausted | VerifyOutcome::NotFound));
}

#[tokio::test]
async fn test_resend_after_cooldown_issues_fresh_code() {
    let (service, outbox, clock) = setup();

    service.send_code("c@x.com").await.unwrap();
    let first = outbox.code();

    assert!(matches!(
        service.send_code("c@x.com").await,
        Err(DomainError::RateLimited { .. })
    ));

    clock.advance(Duration::seconds(60));
    service.send_code("c@x.com").await.unwrap();
    let second = outbox.code();

    if first != second {
        assert!(matches!(
            service.verify_code("c@x.com", &first).await.unwrap(),
            VerifyOutcome::Mismatch { attempts_remaining: 4 }
        ));
    }
    assert_eq!(
        service.verify_code("c@x.com", &second).await.unwrap(),
        VerifyOutcome::Verified
    );
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_with_live_store() {
    let clock = Arc::new(ManualClock::default());
    let policy = OtpPolicy {
        sweep_interval_seconds: 30,
        ..OtpPolicy::default()
    };
    let (store, sweeper) = OtpStore::start(policy, clock.clone());
    let outbox = Arc::new(Outbox::default());
    let service = EmailVerificationService::new(store.clone(), outbox.clone(), Default::default());

    service.send_code("d@x.com").await.unwrap();
    service.send_code("e@x.com").await.unwrap();
    let stale_code = outbox.code();

    // d and e age out, f stays live
    clock.advance(Duration::seconds(200));
    store.issue("f@x.com").unwrap();
    clock.advance(Duration::seconds(101));

    tokio::time::advance(StdDuration::from_secs(31)).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }

    assert_eq!(store.len(), 1);
    assert!(store.snapshot("f@x.com").is_some());
    assert_eq!(
        service.verify_code("e@x.com", &stale_code).await.unwrap(),
        VerifyOutcome::NotFound
    );

    sweeper.shutdown().await;
}
