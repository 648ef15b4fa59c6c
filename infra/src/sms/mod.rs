//! SMS Verification Module
//!
//! Phone verification is delegated to a provider that owns the code
//! lifecycle. This module contains:
//!
//! - **Twilio Verify**: production client over the Verify v2 REST API
//! - **Mock Implementation**: console output for development
//! - **Factory**: picks an implementation from configuration

use std::sync::Arc;

use vg_core::PhoneVerifier;
use vg_shared::{AppConfig, Environment};

use crate::InfrastructureError;

pub mod mock_verifier;
pub mod twilio_verify;

pub use mock_verifier::MockPhoneVerifier;
pub use twilio_verify::{TwilioVerifyClient, TwilioVerifyConfig};

/// Create a phone verifier based on configuration
///
/// Uses Twilio Verify when credentials are present. Without credentials the
/// console mock is used outside production; in production that is an error.
pub fn create_phone_verifier(
    config: &AppConfig,
) -> Result<Arc<dyn PhoneVerifier>, InfrastructureError> {
    if config.twilio.is_configured() {
        let client = TwilioVerifyClient::from_config(&config.twilio)?;
        tracing::info!("Phone verification via Twilio Verify");
        return Ok(Arc::new(client));
    }

    if config.environment == Environment::Production {
        return Err(InfrastructureError::Config(
            "TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_SERVICE_SID are required in production"
                .to_string(),
        ));
    }

    tracing::warn!("Twilio credentials not set, falling back to mock phone verifier");
    Ok(Arc::new(MockPhoneVerifier::new()))
}
