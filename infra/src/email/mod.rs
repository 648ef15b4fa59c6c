//! Email Delivery Module
//!
//! - **SMTP**: production delivery via lettre
//! - **Console**: logs codes instead of sending them, for development

use std::sync::Arc;

use vg_core::CodeSender;
use vg_shared::{AppConfig, Environment};

use crate::InfrastructureError;

pub mod log_sender;
pub mod smtp;

pub use log_sender::LogCodeSender;
pub use smtp::SmtpCodeSender;

/// Create a code sender based on configuration
///
/// SMTP is used when host and credentials are configured. Otherwise codes are
/// logged to the console outside production; in production that is an error.
pub fn create_code_sender(config: &AppConfig) -> Result<Arc<dyn CodeSender>, InfrastructureError> {
    if config.email.is_configured() {
        let sender = SmtpCodeSender::from_config(&config.email, config.otp.ttl_seconds)?;
        tracing::info!("Email codes via SMTP relay");
        return Ok(Arc::new(sender));
    }

    if config.environment == Environment::Production {
        return Err(InfrastructureError::Config(
            "EMAIL_HOST, EMAIL_USER and EMAIL_PASS are required in production".to_string(),
        ));
    }

    tracing::warn!("SMTP not configured, email codes will be printed to the console");
    Ok(Arc::new(LogCodeSender::new()))
}
