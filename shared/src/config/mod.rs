//! Configuration module with business-specific sub-modules
//!
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `rate_limit` - Per-IP API rate limiting
//! - `otp` - Email one-time code policy
//! - `delivery` - Twilio Verify, SMTP and QR output settings
//!
//! Values are layered with the `config` crate: built-in defaults, then
//! `config/default.toml` and `config/<environment>.toml` when present, then
//! `VG__SECTION__KEY` environment variables, then the plain variables the
//! deployment scripts already export (`PORT`, `TWILIO_*`, `EMAIL_*`...).

pub mod delivery;
pub mod environment;
pub mod otp;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use delivery::{EmailConfig, QrConfig, TwilioConfig};
pub use environment::{Environment, LoggingConfig};
pub use otp::OtpConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{CorsConfig, ServerConfig};

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Plain environment variables honoured on top of the `VG__` namespace
const LEGACY_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("TWILIO_ACCOUNT_SID", "twilio.account_sid"),
    ("TWILIO_AUTH_TOKEN", "twilio.auth_token"),
    ("TWILIO_SERVICE_SID", "twilio.service_sid"),
    ("EMAIL_HOST", "email.host"),
    ("EMAIL_PORT", "email.port"),
    ("EMAIL_USER", "email.username"),
    ("EMAIL_PASS", "email.password"),
    ("FROM_EMAIL", "email.from"),
];

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Email one-time code policy
    pub otp: OtpConfig,

    /// Twilio Verify configuration
    pub twilio: TwilioConfig,

    /// SMTP configuration
    pub email: EmailConfig,

    /// QR output configuration
    pub qr: QrConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `.env`, config files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        // a missing .env is normal outside local development
        let _ = dotenvy::dotenv();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(Environment::from_env(), &vars)
    }

    /// Build configuration from an explicit variable map
    pub fn from_vars(
        environment: Environment,
        vars: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let source: ::config::Map<String, String> =
            vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        let mut builder = ::config::Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default(
                "logging.level",
                LoggingConfig::for_environment(environment).level,
            )?
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(environment.config_file()).required(false))
            .add_source(
                ::config::Environment::with_prefix("VG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .source(Some(source)),
            );

        for (var, key) in LEGACY_OVERRIDES {
            builder = builder.set_override_option(*key, non_empty(vars, var))?;
        }

        if let Some(origins) = non_empty(vars, "CORS_ORIGIN") {
            builder = builder.set_override(
                "cors.allowed_origins",
                CorsConfig::from_origin_list(&origins).allowed_origins,
            )?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the services cannot operate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=10).contains(&self.otp.code_length) {
            return Err(invalid("otp.code_length", "must be between 4 and 10 digits"));
        }
        if self.otp.max_attempts == 0 {
            return Err(invalid("otp.max_attempts", "must be at least 1"));
        }
        if self.otp.ttl_seconds == 0 {
            return Err(invalid("otp.ttl_seconds", "must be at least 1 second"));
        }
        if self.otp.sweep_interval_seconds == 0 {
            return Err(invalid("otp.sweep_interval_seconds", "must be at least 1 second"));
        }
        if self.rate_limit.enabled {
            if self.rate_limit.window_seconds == 0 {
                return Err(invalid("rate_limit.window_seconds", "must be at least 1 second"));
            }
            if self.rate_limit.max_requests == 0 {
                return Err(invalid("rate_limit.max_requests", "must be at least 1"));
            }
        }
        if self.twilio.timeout_seconds == 0 {
            return Err(invalid("twilio.timeout_seconds", "must be at least 1 second"));
        }
        if self.qr.module_size == 0 {
            return Err(invalid("qr.module_size", "must be at least 1 pixel"));
        }
        Ok(())
    }
}

fn non_empty(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_any_source() {
        let config = AppConfig::from_vars(Environment::Development, &HashMap::new()).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.otp, OtpConfig::default());
        assert_eq!(config.rate_limit.max_requests, 30);
        assert_eq!(config.twilio.base_url, "https://verify.twilio.com");
        assert!(config.cors.allows_any_origin());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_prefixed_variables_override_defaults() {
        let config = AppConfig::from_vars(
            Environment::Staging,
            &vars(&[
                ("VG__OTP__TTL_SECONDS", "120"),
                ("VG__OTP__CONCEAL_UNKNOWN_IDENTIFIERS", "true"),
                ("VG__RATE_LIMIT__MAX_REQUESTS", "10"),
            ]),
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.otp.ttl_seconds, 120);
        assert!(config.otp.conceal_unknown_identifiers);
        assert_eq!(config.rate_limit.max_requests, 10);
    }

    #[test]
    fn test_legacy_variables_are_honoured() {
        let config = AppConfig::from_vars(
            Environment::Production,
            &vars(&[
                ("PORT", "8080"),
                ("CORS_ORIGIN", "https://shop.example.com"),
                ("TWILIO_ACCOUNT_SID", "ACxxxx"),
                ("TWILIO_AUTH_TOKEN", "secret"),
                ("TWILIO_SERVICE_SID", "VAxxxx"),
                ("EMAIL_HOST", "smtp.example.com"),
                ("EMAIL_PORT", "2525"),
                ("FROM_EMAIL", "codes@example.com"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cors.allowed_origins, vec!["https://shop.example.com"]);
        assert!(config.twilio.is_configured());
        assert_eq!(config.email.host.as_deref(), Some("smtp.example.com"));
        assert_eq!(config.email.port, 2525);
        assert_eq!(config.email.from, "codes@example.com");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_blank_legacy_variables_are_ignored() {
        let config = AppConfig::from_vars(
            Environment::Development,
            &vars(&[("TWILIO_ACCOUNT_SID", "  "), ("PORT", "")]),
        )
        .unwrap();

        assert!(config.twilio.account_sid.is_none());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_validation_rejects_unusable_policy() {
        let result = AppConfig::from_vars(
            Environment::Development,
            &vars(&[("VG__OTP__CODE_LENGTH", "3")]),
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "otp.code_length", .. })
        ));

        let mut config = AppConfig::default();
        config.otp.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.rate_limit.window_seconds = 0;
        assert!(config.validate().is_err());
        config.rate_limit.enabled = false;
        assert!(config.validate().is_ok());
    }
}
