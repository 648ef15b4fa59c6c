//! Traits for code delivery and phone verification providers

use async_trait::async_trait;

use super::types::PhoneVerificationTicket;

/// Out-of-band delivery of a one-time code
#[async_trait]
pub trait CodeSender: Send + Sync {
    /// Deliver `code` to `recipient`, returning the transport's message reference
    async fn send_code(&self, recipient: &str, code: &str) -> Result<String, String>;
}

/// Third-party phone verification API that owns its own code lifecycle
#[async_trait]
pub trait PhoneVerifier: Send + Sync {
    /// Ask the provider to text a code to `phone` (E.164)
    async fn start_verification(&self, phone: &str) -> Result<PhoneVerificationTicket, String>;
    /// Ask the provider whether `code` is correct for `phone`
    async fn check_verification(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<PhoneVerificationTicket, String>;
}
