//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Per-IP API rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,

    /// Max requests per client IP within one window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 30,
            window_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    /// Create a configuration with custom limits
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            enabled: true,
            max_requests,
            window_seconds,
        }
    }

    /// Disabled limiter, used by tests and local tooling
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}
