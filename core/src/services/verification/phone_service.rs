//! Phone verification proxy

use std::sync::Arc;

use vg_shared::phone::{mask_phone_number, normalize_phone_number};

use crate::errors::{DomainError, DomainResult};

use super::traits::PhoneVerifier;
use super::types::{PhoneCheckResult, PhoneVerificationTicket};

/// Provider status meaning the code was accepted
const APPROVED_STATUS: &str = "approved";

/// Forwards start/check calls to the phone verification provider
pub struct PhoneVerificationService<V: PhoneVerifier + ?Sized> {
    verifier: Arc<V>,
}

impl<V: PhoneVerifier + ?Sized> PhoneVerificationService<V> {
    pub fn new(verifier: Arc<V>) -> Self {
        Self { verifier }
    }

    /// Start an SMS verification for `phone`
    pub async fn start(&self, phone: &str) -> DomainResult<PhoneVerificationTicket> {
        if phone.trim().is_empty() {
            return Err(DomainError::validation("Phone number is required"));
        }
        let phone = normalize(phone)?;

        let ticket = self
            .verifier
            .start_verification(&phone)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(&phone),
                    error = %e,
                    event = "sms_start_failed",
                    "Phone verification provider rejected start request"
                );
                DomainError::Transport { message: e }
            })?;

        tracing::info!(
            phone = %mask_phone_number(&phone),
            sid = %ticket.sid,
            status = %ticket.status,
            event = "sms_started",
            "Started phone verification"
        );

        Ok(ticket)
    }

    /// Check a code for `phone` with the provider
    pub async fn check(&self, phone: &str, code: &str) -> DomainResult<PhoneCheckResult> {
        if phone.trim().is_empty() || code.trim().is_empty() {
            return Err(DomainError::validation("Phone and code are required"));
        }
        let phone = normalize(phone)?;

        let ticket = self
            .verifier
            .check_verification(&phone, code.trim())
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(&phone),
                    error = %e,
                    event = "sms_check_failed",
                    "Phone verification provider rejected check request"
                );
                DomainError::Transport { message: e }
            })?;

        let verified = ticket.status == APPROVED_STATUS;
        tracing::info!(
            phone = %mask_phone_number(&phone),
            verified = verified,
            status = %ticket.status,
            event = "sms_checked",
            "Checked phone verification code"
        );

        Ok(PhoneCheckResult {
            verified,
            status: ticket.status,
        })
    }
}

fn normalize(phone: &str) -> DomainResult<String> {
    normalize_phone_number(phone)
        .ok_or_else(|| DomainError::validation("Invalid phone number: expected 8 to 15 digits"))
}
