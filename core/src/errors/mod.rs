//! Domain-specific error types and error handling.

use thiserror::Error;

use crate::services::otp::OtpError;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Please wait {retry_after_seconds} seconds before requesting a new code")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Delivery provider failure: {message}")]
    Transport { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }
}

impl From<OtpError> for DomainError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::InvalidInput { .. } => DomainError::Validation {
                message: err.to_string(),
            },
            OtpError::RateLimited {
                retry_after_seconds,
            } => DomainError::RateLimited {
                retry_after_seconds,
            },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
