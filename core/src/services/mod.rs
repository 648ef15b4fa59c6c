//! Business services containing domain logic and use cases.

pub mod otp;
pub mod qr;
pub mod verification;

// Re-export commonly used types
pub use otp::{
    Clock, IssuedCode, ManualClock, OtpError, OtpPolicy, OtpStore, SweeperHandle, SystemClock,
    VerifyOutcome,
};
pub use qr::{GeneratedQr, ImageStore, QrCodeService, QrRenderer};
pub use verification::{
    CodeSender, DispatchStatus, EmailVerificationService, PhoneCheckResult, PhoneVerificationService,
    PhoneVerificationTicket, PhoneVerifier, SendCodeResult, VerificationServiceConfig,
};
