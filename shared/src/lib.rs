//! Shared utilities and common types for the Verigate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - The standard error response body
//! - Utility functions (email/phone validation and masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use self::config::{
    AppConfig, ConfigError, CorsConfig, EmailConfig, Environment, LoggingConfig, OtpConfig,
    QrConfig, RateLimitConfig, ServerConfig, TwilioConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{email, phone};
