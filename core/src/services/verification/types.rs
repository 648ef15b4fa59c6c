//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::otp::IssuedCode;

/// What happened when the code was handed to the sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Sender accepted the message
    Delivered { reference: String },
    /// Sender failed; the code stays issued
    Failed { reason: String },
}

impl DispatchStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchStatus::Delivered { .. })
    }
}

/// Result of sending an email code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The issued code and its metadata
    pub issued: IssuedCode,
    /// Delivery outcome
    pub dispatch: DispatchStatus,
    /// Instant the result was produced, used for relative timings
    pub sent_at: DateTime<Utc>,
}

impl SendCodeResult {
    pub fn expires_in_seconds(&self) -> u64 {
        self.issued.expires_in_seconds(self.sent_at)
    }

    pub fn resend_after_seconds(&self) -> u64 {
        self.issued.resend_after_seconds(self.sent_at)
    }
}

/// Provider's answer to a start or check call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneVerificationTicket {
    /// Provider verification SID
    pub sid: String,
    /// Provider status (`pending`, `approved`, `canceled`...)
    pub status: String,
}

/// Result of checking a phone code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneCheckResult {
    pub verified: bool,
    pub status: String,
}
