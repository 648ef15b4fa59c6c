//! Verification services for email and phone one-time codes
//!
//! This module provides:
//! - Email code issuance and checking over the in-memory store
//! - Delivery through a pluggable code sender
//! - A thin proxy over a third-party phone verification API

mod config;
mod email_service;
mod phone_service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use email_service::EmailVerificationService;
pub use phone_service::PhoneVerificationService;
pub use traits::{CodeSender, PhoneVerifier};
pub use types::{
    DispatchStatus, PhoneCheckResult, PhoneVerificationTicket, SendCodeResult,
};
