//! The record map and its operations

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use vg_shared::email::mask_email;

use crate::domain::entities::OtpRecord;

use super::clock::{Clock, SystemClock};
use super::generator::{constant_time_compare, generate_secure_code};
use super::policy::OtpPolicy;
use super::sweeper::{spawn_sweeper, SweeperHandle};
use super::types::{ceil_seconds, IssuedCode, OtpError, VerifyOutcome};

/// Single-process store of one-time codes
///
/// Every operation takes the one lock around the map, does only map work
/// under it, and returns owned values. Nothing awaits while the lock is held.
pub struct OtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
    policy: OtpPolicy,
    clock: Arc<dyn Clock>,
}

impl OtpStore {
    /// Create a store on the wall clock
    pub fn new(policy: OtpPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Create a store on an explicit clock
    pub fn with_clock(policy: OtpPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            policy,
            clock,
        }
    }

    /// Create a shared store and start its background sweeper
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(policy: OtpPolicy, clock: Arc<dyn Clock>) -> (Arc<Self>, SweeperHandle) {
        let interval = policy.sweep_interval();
        let store = Arc::new(Self::with_clock(policy, clock));
        let handle = spawn_sweeper(store.clone(), interval);
        (store, handle)
    }

    pub fn policy(&self) -> &OtpPolicy {
        &self.policy
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Issue a new code for `identifier`, replacing any previous one
    ///
    /// Rejected with `RateLimited` while the previous code is inside its
    /// resend cooldown; the existing record is left untouched in that case.
    pub fn issue(&self, identifier: &str) -> Result<IssuedCode, OtpError> {
        if identifier.is_empty() {
            return Err(OtpError::InvalidInput {
                field: "identifier",
            });
        }

        let now = self.clock.now();
        let mut records = self.lock();

        if let Some(existing) = records.get(identifier) {
            if let Some(remaining) = existing.cooldown_remaining(now, self.policy.cooldown()) {
                let retry_after_seconds = ceil_seconds(remaining).max(1);
                tracing::warn!(
                    identifier = %mask_email(identifier),
                    retry_after_seconds = retry_after_seconds,
                    event = "otp_rate_limited",
                    "Code requested again inside the resend cooldown"
                );
                return Err(OtpError::RateLimited {
                    retry_after_seconds,
                });
            }
        }

        let record = OtpRecord::new(
            identifier,
            generate_secure_code(self.policy.code_length),
            now,
            self.policy.ttl(),
            self.policy.max_attempts,
        );
        let issued = IssuedCode {
            identifier: record.identifier.clone(),
            code: record.code.clone(),
            issued_at: record.issued_at,
            expires_at: record.expires_at,
            attempts_remaining: record.attempts_remaining,
            next_resend_at: now + self.policy.cooldown(),
        };
        records.insert(identifier.to_string(), record);
        drop(records);

        tracing::info!(
            identifier = %mask_email(identifier),
            expires_at = %issued.expires_at,
            event = "otp_issued",
            "Issued new verification code"
        );

        Ok(issued)
    }

    /// Check `supplied` against the live code for `identifier`
    pub fn verify(&self, identifier: &str, supplied: &str) -> Result<VerifyOutcome, OtpError> {
        if identifier.is_empty() {
            return Err(OtpError::InvalidInput {
                field: "identifier",
            });
        }
        if supplied.is_empty() {
            return Err(OtpError::InvalidInput { field: "code" });
        }

        let now = self.clock.now();
        let mut records = self.lock();

        let Some(record) = records.get_mut(identifier) else {
            return Ok(VerifyOutcome::NotFound);
        };

        let outcome = if record.is_expired(now) {
            records.remove(identifier);
            VerifyOutcome::Expired
        } else if record.is_exhausted() {
            records.remove(identifier);
            VerifyOutcome::Exhausted
        } else if constant_time_compare(&record.code, supplied) {
            records.remove(identifier);
            VerifyOutcome::Verified
        } else {
            // the final wrong guess reports Exhausted but leaves the record
            // at zero so the next call sees Exhausted too
            match record.consume_attempt() {
                0 => VerifyOutcome::Exhausted,
                attempts_remaining => VerifyOutcome::Mismatch { attempts_remaining },
            }
        };
        drop(records);

        log_outcome(identifier, &outcome);
        Ok(outcome)
    }

    /// Remove every expired record, returning how many were dropped
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut records = self.lock();
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        let removed = before - records.len();
        drop(records);

        tracing::debug!(removed = removed, event = "otp_sweep", "Swept expired codes");
        removed
    }

    /// Owned copy of the record for `identifier`, if any
    pub fn snapshot(&self, identifier: &str) -> Option<OtpRecord> {
        self.lock().get(identifier).cloned()
    }

    /// Number of records currently held (live or not yet swept)
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // poisoning is ignored; each mutation under the lock is a single map operation
    fn lock(&self) -> MutexGuard<'_, HashMap<String, OtpRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for OtpStore {
    fn default() -> Self {
        Self::new(OtpPolicy::default())
    }
}

fn log_outcome(identifier: &str, outcome: &VerifyOutcome) {
    let identifier = mask_email(identifier);
    match outcome {
        VerifyOutcome::Verified => tracing::info!(
            identifier = %identifier,
            event = "otp_verified",
            "Verification code accepted"
        ),
        VerifyOutcome::Mismatch { attempts_remaining } => tracing::warn!(
            identifier = %identifier,
            attempts_remaining = attempts_remaining,
            event = "otp_mismatch",
            "Wrong verification code supplied"
        ),
        VerifyOutcome::Expired => tracing::info!(
            identifier = %identifier,
            event = "otp_expired",
            "Verification code expired"
        ),
        VerifyOutcome::Exhausted => tracing::warn!(
            identifier = %identifier,
            event = "otp_exhausted",
            "Verification attempts exhausted"
        ),
        VerifyOutcome::NotFound => tracing::debug!(
            identifier = %identifier,
            event = "otp_not_found",
            "No verification code on record"
        ),
    }
}
