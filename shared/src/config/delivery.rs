//! Delivery provider configuration (SMS verification, email, QR output)

use serde::{Deserialize, Serialize};

/// Twilio Verify credentials and client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: Option<String>,
    /// Twilio Auth Token
    pub auth_token: Option<String>,
    /// Twilio Verify Service SID
    pub service_sid: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Timeout for API requests in seconds
    pub timeout_seconds: u64,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            service_sid: None,
            base_url: String::from("https://verify.twilio.com"),
            timeout_seconds: 30,
        }
    }
}

impl TwilioConfig {
    /// All three credentials are present and non-empty
    pub fn is_configured(&self) -> bool {
        [&self.account_sid, &self.auth_token, &self.service_sid]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// SMTP settings for email code delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// SMTP relay host
    pub host: Option<String>,
    /// SMTP port
    pub port: u16,
    /// SMTP username
    pub username: Option<String>,
    /// SMTP password
    pub password: Option<String>,
    /// Sender address
    pub from: String,
    /// Subject line of code emails
    pub subject: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            username: None,
            password: None,
            from: String::from("no-reply@example.com"),
            subject: String::from("Your verification code"),
        }
    }
}

impl EmailConfig {
    /// Host and credentials are all present
    pub fn is_configured(&self) -> bool {
        self.host.is_some() && self.username.is_some() && self.password.is_some()
    }
}

/// Where generated QR images are written and served from
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QrConfig {
    /// Output directory
    pub output_dir: String,
    /// Public URL prefix the directory is served under
    pub url_prefix: String,
    /// Pixel size of a single QR module
    pub module_size: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            output_dir: String::from("qrcodes"),
            url_prefix: String::from("/qrcodes"),
            module_size: 8,
        }
    }
}
