//! Mock implementations for testing verification services

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::services::otp::OtpStore;
use crate::services::verification::traits::{CodeSender, PhoneVerifier};
use crate::services::verification::types::PhoneVerificationTicket;

// Mock code sender that records every delivered code
pub struct MockCodeSender {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: bool,
    /// When set, the sender reads the store during delivery
    pub probe_store: Option<Arc<OtpStore>>,
}

impl MockCodeSender {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
            probe_store: None,
        }
    }

    pub fn probing(store: Arc<OtpStore>) -> Self {
        Self {
            probe_store: Some(store),
            ..Self::new(false)
        }
    }

    pub fn get_sent_code(&self, recipient: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(recipient).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeSender for MockCodeSender {
    async fn send_code(&self, recipient: &str, code: &str) -> Result<String, String> {
        if let Some(store) = &self.probe_store {
            // would deadlock if the store still held its lock
            let record = store.snapshot(recipient).ok_or("record not committed")?;
            if record.code != code {
                return Err("record does not match issued code".to_string());
            }
        }
        if self.should_fail {
            return Err("SMTP connection refused".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(recipient.to_string(), code.to_string());
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}

// Mock phone verifier approving a single fixed code
pub struct MockPhoneVerifier {
    pub accepted_code: String,
    pub should_fail: bool,
    pub started: Arc<Mutex<Vec<String>>>,
}

impl MockPhoneVerifier {
    pub fn new(accepted_code: &str) -> Self {
        Self {
            accepted_code: accepted_code.to_string(),
            should_fail: false,
            started: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("000000")
        }
    }
}

#[async_trait]
impl PhoneVerifier for MockPhoneVerifier {
    async fn start_verification(&self, phone: &str) -> Result<PhoneVerificationTicket, String> {
        if self.should_fail {
            return Err("Invalid parameter `To`".to_string());
        }
        self.started.lock().unwrap().push(phone.to_string());
        Ok(PhoneVerificationTicket {
            sid: "VE0001".to_string(),
            status: "pending".to_string(),
        })
    }

    async fn check_verification(
        &self,
        _phone: &str,
        code: &str,
    ) -> Result<PhoneVerificationTicket, String> {
        if self.should_fail {
            return Err("The requested resource was not found".to_string());
        }
        let status = if code == self.accepted_code {
            "approved"
        } else {
            "pending"
        };
        Ok(PhoneVerificationTicket {
            sid: "VE0001".to_string(),
            status: status.to_string(),
        })
    }
}
