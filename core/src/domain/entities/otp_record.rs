//! One-time code record held by the in-memory store.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A live one-time code for a single identifier
///
/// Records never leave the store by reference; callers only ever see clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpRecord {
    /// Normalized identifier (email address) the code belongs to
    pub identifier: String,

    /// The numeric code, zero padded to the policy length
    #[serde(skip_serializing)]
    pub code: String,

    /// When the code was issued; doubles as last-sent time for the cooldown
    pub issued_at: DateTime<Utc>,

    /// After this instant the code is invalid
    pub expires_at: DateTime<Utc>,

    /// Wrong guesses left before the record is burned
    pub attempts_remaining: u32,
}

impl OtpRecord {
    /// Create a fresh record
    pub fn new(
        identifier: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            code: code.into(),
            issued_at,
            expires_at: issued_at + ttl,
            attempts_remaining: max_attempts,
        }
    }

    /// Strictly past `expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// No attempts left
    pub fn is_exhausted(&self) -> bool {
        self.attempts_remaining == 0
    }

    /// Time left in the resend cooldown, `None` once it has elapsed
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown: Duration) -> Option<Duration> {
        let elapsed = now - self.issued_at;
        if elapsed < cooldown {
            Some(cooldown - elapsed)
        } else {
            None
        }
    }

    /// Burn one attempt, returning how many are left
    pub fn consume_attempt(&mut self) -> u32 {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        self.attempts_remaining
    }
}
