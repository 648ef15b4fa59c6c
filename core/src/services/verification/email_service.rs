//! Email one-time code service

use std::sync::Arc;

use vg_shared::email::{is_valid_email, mask_email, normalize_email};

use crate::errors::{DomainError, DomainResult};
use crate::services::otp::{OtpStore, VerifyOutcome};

use super::config::VerificationServiceConfig;
use super::traits::CodeSender;
use super::types::{DispatchStatus, SendCodeResult};

/// Issues codes through the store and hands them to a sender
pub struct EmailVerificationService<S: CodeSender + ?Sized> {
    /// Shared code store
    store: Arc<OtpStore>,
    /// Delivery transport
    sender: Arc<S>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S: CodeSender + ?Sized> EmailVerificationService<S> {
    /// Create a new email verification service
    pub fn new(store: Arc<OtpStore>, sender: Arc<S>, config: VerificationServiceConfig) -> Self {
        Self {
            store,
            sender,
            config,
        }
    }

    pub fn store(&self) -> &Arc<OtpStore> {
        &self.store
    }

    /// Issue a code for `email` and deliver it
    ///
    /// The store has committed the record and released its lock before the
    /// sender is called. A delivery failure is reported in the result and
    /// never retracts the issued code.
    pub async fn send_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        let identifier = normalize_identifier(email)?;

        let issued = self.store.issue(&identifier)?;

        let dispatch = match self.sender.send_code(&identifier, &issued.code).await {
            Ok(reference) => DispatchStatus::Delivered { reference },
            Err(reason) => {
                tracing::warn!(
                    identifier = %mask_email(&identifier),
                    error = %reason,
                    event = "otp_dispatch_failed",
                    "Failed to deliver verification code"
                );
                DispatchStatus::Failed { reason }
            }
        };

        Ok(SendCodeResult {
            issued,
            dispatch,
            sent_at: self.store.clock().now(),
        })
    }

    /// Check a code for `email`
    ///
    /// Malformed codes are rejected before the store is touched, so they never
    /// consume an attempt.
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<VerifyOutcome> {
        let identifier = normalize_identifier(email)?;

        let code = code.trim();
        let expected_length = self.store.policy().code_length;
        if code.len() != expected_length || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "Verification code must be {} digits",
                expected_length
            )));
        }

        let outcome = self.store.verify(&identifier, code)?;

        if self.config.conceal_unknown_identifiers && outcome == VerifyOutcome::NotFound {
            return Ok(VerifyOutcome::Expired);
        }
        Ok(outcome)
    }
}

fn normalize_identifier(email: &str) -> DomainResult<String> {
    let identifier = normalize_email(email);
    if identifier.is_empty() {
        return Err(DomainError::validation("Email is required"));
    }
    if !is_valid_email(&identifier) {
        return Err(DomainError::validation("Invalid email address"));
    }
    Ok(identifier)
}
