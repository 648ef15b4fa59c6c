//! Mock Phone Verifier
//!
//! Development stand-in for Twilio Verify. Codes are generated locally and
//! printed to the console instead of being texted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

use vg_core::services::otp::generate_secure_code;
use vg_core::{PhoneVerificationTicket, PhoneVerifier};
use vg_shared::phone::mask_phone_number;

const PENDING: &str = "pending";
const APPROVED: &str = "approved";

/// Pending mock verification
struct PendingCode {
    sid: String,
    code: String,
}

/// Mock phone verifier for development and testing
#[derive(Clone)]
pub struct MockPhoneVerifier {
    /// Pending codes by phone number
    pending: Arc<Mutex<HashMap<String, PendingCode>>>,
    /// Counter for tracking number of verifications started
    started_count: Arc<AtomicU64>,
    /// Whether to print codes to console
    console_output: bool,
}

impl MockPhoneVerifier {
    /// Create a new mock verifier
    pub fn new() -> Self {
        Self::with_options(true)
    }

    /// Create a mock verifier with configurable console output
    pub fn with_options(console_output: bool) -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            started_count: Arc::new(AtomicU64::new(0)),
            console_output,
        }
    }

    /// Get the total number of verifications started
    pub fn get_started_count(&self) -> u64 {
        self.started_count.load(Ordering::SeqCst)
    }

    /// Pending code for `phone`, for tests
    pub fn pending_code(&self, phone: &str) -> Option<String> {
        self.lock().get(phone).map(|p| p.code.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, PendingCode>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockPhoneVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhoneVerifier for MockPhoneVerifier {
    async fn start_verification(&self, phone: &str) -> Result<PhoneVerificationTicket, String> {
        let sid = format!("VEmock{}", Uuid::new_v4().simple());
        let code = generate_secure_code(6);
        let count = self.started_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS VERIFY - VERIFICATION #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", phone);
            println!("SID: {}", sid);
            println!("Code: {}", code);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %mask_phone_number(phone),
            sid = %sid,
            "Verification started (mock)"
        );

        self.lock().insert(
            phone.to_string(),
            PendingCode {
                sid: sid.clone(),
                code,
            },
        );

        Ok(PhoneVerificationTicket {
            sid,
            status: PENDING.to_string(),
        })
    }

    async fn check_verification(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<PhoneVerificationTicket, String> {
        let mut pending = self.lock();
        let Some(entry) = pending.get(phone) else {
            return Err("The requested resource was not found".to_string());
        };

        if entry.code == code {
            let entry = pending.remove(phone).ok_or("verification vanished")?;
            Ok(PhoneVerificationTicket {
                sid: entry.sid,
                status: APPROVED.to_string(),
            })
        } else {
            Ok(PhoneVerificationTicket {
                sid: entry.sid.clone(),
                status: PENDING.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_start_and_approve() {
        let verifier = MockPhoneVerifier::with_options(false);

        let started = verifier.start_verification("+14155550123").await.unwrap();
        assert_eq!(started.status, "pending");
        assert!(started.sid.starts_with("VEmock"));
        assert_eq!(verifier.get_started_count(), 1);

        let code = verifier.pending_code("+14155550123").unwrap();
        let checked = verifier.check_verification("+14155550123", &code).await.unwrap();
        assert_eq!(checked.status, "approved");
        assert_eq!(checked.sid, started.sid);
        assert!(verifier.pending_code("+14155550123").is_none());
    }

    #[tokio::test]
    async fn test_mock_wrong_code_stays_pending() {
        let verifier = MockPhoneVerifier::with_options(false);
        verifier.start_verification("+14155550123").await.unwrap();
        let code = verifier.pending_code("+14155550123").unwrap();
        let wrong = if code == "000000" { "111111" } else { "000000" };

        let checked = verifier.check_verification("+14155550123", wrong).await.unwrap();
        assert_eq!(checked.status, "pending");
        assert!(verifier.pending_code("+14155550123").is_some());
    }

    #[tokio::test]
    async fn test_mock_check_without_start() {
        let verifier = MockPhoneVerifier::with_options(false);
        assert!(verifier.check_verification("+14155550123", "123456").await.is_err());
    }
}
