//! Store results and errors

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Missing or empty {field}")]
    InvalidInput { field: &'static str },

    #[error("Code already sent, retry in {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },
}

/// A freshly issued code with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub identifier: String,
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub attempts_remaining: u32,
    /// Earliest time another code may be issued for this identifier
    pub next_resend_at: DateTime<Utc>,
}

impl IssuedCode {
    /// Seconds of validity left at `now`, rounded down
    pub fn expires_in_seconds(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }

    /// Seconds until a resend is allowed at `now`, rounded up
    pub fn resend_after_seconds(&self, now: DateTime<Utc>) -> u64 {
        ceil_seconds(self.next_resend_at - now)
    }
}

/// Result of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched; the record is consumed
    Verified,
    /// Wrong code; attempts left on the record
    Mismatch { attempts_remaining: u32 },
    /// Code is past its expiry
    Expired,
    /// No attempts left
    Exhausted,
    /// No live record for the identifier
    NotFound,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    /// Machine readable reason used in logs and responses
    pub fn reason(&self) -> &'static str {
        match self {
            VerifyOutcome::Verified => "verified",
            VerifyOutcome::Mismatch { .. } => "mismatch",
            VerifyOutcome::Expired => "expired",
            VerifyOutcome::Exhausted => "exhausted",
            VerifyOutcome::NotFound => "not_found",
        }
    }
}

/// Round a positive duration up to whole seconds
pub(crate) fn ceil_seconds(d: chrono::Duration) -> u64 {
    let millis = d.num_milliseconds();
    if millis <= 0 {
        0
    } else {
        ((millis + 999) / 1000) as u64
    }
}
