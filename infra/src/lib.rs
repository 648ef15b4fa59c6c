//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborator traits defined in `vg_core`:
//!
//! - **SMS**: Twilio Verify REST client and a console mock for development
//! - **Email**: SMTP delivery via lettre and a console sender for development
//! - **QR**: PNG rendering and filesystem storage of generated codes
//! - **Images**: JPEG/PNG to WebP batch conversion

/// SMS verification providers
pub mod sms;

/// Email code delivery
pub mod email;

/// QR rendering and storage
pub mod qr;

/// Image format conversion
pub mod images;

pub use email::{create_code_sender, LogCodeSender, SmtpCodeSender};
pub use images::{convert_to_webp, convert_tree, ConversionSummary};
pub use qr::{FsImageStore, PngQrRenderer};
pub use sms::{create_phone_verifier, MockPhoneVerifier, TwilioVerifyClient, TwilioVerifyConfig};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error body returned by a provider API
    #[error("{message}")]
    Provider {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// Image or QR encoding error
    #[error("Render error: {0}")]
    Render(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SMTP error
    #[error("Email error: {0}")]
    Email(String),
}

impl From<image::ImageError> for InfrastructureError {
    fn from(err: image::ImageError) -> Self {
        InfrastructureError::Render(err.to_string())
    }
}
