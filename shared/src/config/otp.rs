//! One-time code policy configuration

use serde::{Deserialize, Serialize};

/// Email one-time code policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of digits in a code
    pub code_length: usize,

    /// Seconds a code stays valid after issuance
    pub ttl_seconds: u64,

    /// Wrong guesses allowed before the code is burned
    pub max_attempts: u32,

    /// Minimum seconds between two issuances for one identifier
    pub cooldown_seconds: u64,

    /// How often expired records are swept from memory
    pub sweep_interval_seconds: u64,

    /// Report unknown identifiers as expired instead of not found
    pub conceal_unknown_identifiers: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_seconds: 300,
            max_attempts: 5,
            cooldown_seconds: 60,
            sweep_interval_seconds: 60,
            conceal_unknown_identifiers: false,
        }
    }
}
