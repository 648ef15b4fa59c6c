//! Shared fixtures for API integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use vg_api::{middleware::RateLimiter, AppState};
use vg_core::{CodeSender, ManualClock, OtpPolicy, OtpStore, QrCodeService};
use vg_infra::{FsImageStore, MockPhoneVerifier, PngQrRenderer};
use vg_shared::{AppConfig, RateLimitConfig};

/// Sender that keeps the last code per recipient
#[derive(Default)]
pub struct Outbox {
    codes: Mutex<HashMap<String, String>>,
    fail: bool,
}

impl Outbox {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn code_for(&self, recipient: &str) -> Option<String> {
        self.codes.lock().unwrap().get(recipient).cloned()
    }
}

#[async_trait]
impl CodeSender for Outbox {
    async fn send_code(&self, recipient: &str, code: &str) -> Result<String, String> {
        if self.fail {
            return Err("SMTP connection refused".to_string());
        }
        self.codes
            .lock()
            .unwrap()
            .insert(recipient.to_string(), code.to_string());
        Ok(format!("msg-{}", recipient))
    }
}

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub rate_limiter: RateLimiter,
    pub outbox: Arc<Outbox>,
    pub verifier: Arc<MockPhoneVerifier>,
    pub clock: Arc<ManualClock>,
    pub qr_dir: TempDir,
}

pub fn test_config(qr_dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.qr.output_dir = qr_dir.path().to_string_lossy().into_owned();
    config.rate_limit = RateLimitConfig::disabled();
    config
}

pub fn context() -> TestContext {
    context_with(Outbox::default(), |_| {})
}

pub fn context_with(outbox: Outbox, adjust: impl FnOnce(&mut AppConfig)) -> TestContext {
    let qr_dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&qr_dir);
    adjust(&mut config);

    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()));
    let store = Arc::new(OtpStore::with_clock(OtpPolicy::from(&config.otp), clock.clone()));
    let outbox = Arc::new(outbox);
    let verifier = Arc::new(MockPhoneVerifier::with_options(false));

    let qr_service = QrCodeService::new(
        Arc::new(PngQrRenderer::new(2)),
        Arc::new(FsImageStore::new(qr_dir.path())),
        config.qr.url_prefix.clone(),
    );

    let rate_limiter = RateLimiter::new(&config.rate_limit);
    let state = web::Data::new(AppState::new(
        config,
        store,
        outbox.clone(),
        verifier.clone(),
        qr_service,
    ));

    TestContext {
        state,
        rate_limiter,
        outbox,
        verifier,
        clock,
        qr_dir,
    }
}
