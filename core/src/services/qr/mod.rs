//! QR payment code generation

mod service;
mod traits;

pub use service::{GeneratedQr, QrCodeService};
pub use traits::{ImageStore, QrRenderer};
