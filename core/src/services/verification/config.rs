//! Configuration for the verification services

use vg_shared::OtpConfig;

/// Configuration for the email verification service
#[derive(Debug, Clone, Default)]
pub struct VerificationServiceConfig {
    /// Report unknown identifiers as expired so callers cannot probe which
    /// addresses have a pending code
    pub conceal_unknown_identifiers: bool,
}

impl From<&OtpConfig> for VerificationServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            conceal_unknown_identifiers: config.conceal_unknown_identifiers,
        }
    }
}
