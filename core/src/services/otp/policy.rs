//! Issuance and verification policy

use chrono::Duration;
use vg_shared::OtpConfig;

/// Upper bound applied to every configured duration (ten years)
const MAX_POLICY_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Policy the store enforces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpPolicy {
    /// Number of digits in a code
    pub code_length: usize,
    /// Lifetime of a code in seconds
    pub ttl_seconds: u64,
    /// Wrong guesses allowed per code
    pub max_attempts: u32,
    /// Minimum seconds between issuances for one identifier
    pub cooldown_seconds: u64,
    /// Seconds between background sweeps
    pub sweep_interval_seconds: u64,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for OtpPolicy {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            ttl_seconds: config.ttl_seconds,
            max_attempts: config.max_attempts,
            cooldown_seconds: config.cooldown_seconds,
            sweep_interval_seconds: config.sweep_interval_seconds,
        }
    }
}

impl OtpPolicy {
    pub fn ttl(&self) -> Duration {
        seconds(self.ttl_seconds)
    }

    pub fn cooldown(&self) -> Duration {
        seconds(self.cooldown_seconds)
    }

    /// Sweep period as a tokio-friendly duration (never zero)
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

fn seconds(value: u64) -> Duration {
    Duration::seconds(value.min(MAX_POLICY_SECONDS) as i64)
}
