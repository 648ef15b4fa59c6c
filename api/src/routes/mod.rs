//! Route handlers
//!
//! - Email one-time codes (issue and verify)
//! - SMS verification proxy
//! - Payment QR generation
//! - Health check

pub mod health;
pub mod otp;
pub mod qr;
pub mod sms;
