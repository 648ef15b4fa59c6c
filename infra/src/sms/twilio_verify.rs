//! Twilio Verify Client
//!
//! Thin client over the Verify v2 REST API. Twilio generates, delivers and
//! checks the code; this client only starts a verification and asks whether a
//! supplied code is approved.
//!
//! - `POST /v2/Services/{sid}/Verifications` with `To` and `Channel=sms`
//! - `POST /v2/Services/{sid}/VerificationCheck` with `To` and `Code`
//!
//! Both calls use HTTP basic auth with the account SID and auth token.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use vg_core::{PhoneVerificationTicket, PhoneVerifier};
use vg_shared::phone::mask_phone_number;
use vg_shared::TwilioConfig;

use crate::InfrastructureError;

/// Resolved Twilio Verify settings
#[derive(Debug, Clone)]
pub struct TwilioVerifyConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// Verify Service SID
    pub service_sid: String,
    /// API base URL, overridable for tests
    pub base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioVerifyConfig {
    /// Resolve from the application section, failing on missing credentials
    pub fn from_config(config: &TwilioConfig) -> Result<Self, InfrastructureError> {
        fn required(value: &Option<String>, name: &str) -> Result<String, InfrastructureError> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| InfrastructureError::Config(format!("{} not set", name)))
        }

        Ok(Self {
            account_sid: required(&config.account_sid, "TWILIO_ACCOUNT_SID")?,
            auth_token: required(&config.auth_token, "TWILIO_AUTH_TOKEN")?,
            service_sid: required(&config.service_sid, "TWILIO_SERVICE_SID")?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: config.timeout_seconds,
        })
    }
}

/// Verification resource returned by both endpoints
#[derive(Debug, Deserialize)]
struct VerificationResource {
    sid: String,
    status: String,
}

/// Error body Twilio returns on non-2xx responses
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

/// Twilio Verify client
pub struct TwilioVerifyClient {
    http: reqwest::Client,
    config: TwilioVerifyConfig,
}

impl TwilioVerifyClient {
    /// Create a new client
    pub fn new(config: TwilioVerifyConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        debug!(
            "Twilio Verify client initialized for service {}",
            config.service_sid
        );

        Ok(Self { http, config })
    }

    /// Create from the application configuration section
    pub fn from_config(config: &TwilioConfig) -> Result<Self, InfrastructureError> {
        Self::new(TwilioVerifyConfig::from_config(config)?)
    }

    fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/v2/Services/{}/{}",
            self.config.base_url, self.config.service_sid, resource
        )
    }

    async fn post_form(
        &self,
        resource: &str,
        form: &[(&str, &str)],
    ) -> Result<VerificationResource, InfrastructureError> {
        let response = self
            .http
            .post(self.endpoint(resource))
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<VerificationResource>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: Option<TwilioErrorBody> = serde_json::from_str(&body).ok();
        let (code, message) = match parsed {
            Some(TwilioErrorBody { code, message }) => (
                code,
                message.unwrap_or_else(|| format!("Twilio returned HTTP {}", status.as_u16())),
            ),
            None => (None, format!("Twilio returned HTTP {}", status.as_u16())),
        };

        Err(InfrastructureError::Provider {
            status: status.as_u16(),
            code,
            message,
        })
    }

    /// Start an SMS verification
    pub async fn start(&self, phone: &str) -> Result<PhoneVerificationTicket, InfrastructureError> {
        let resource = self
            .post_form("Verifications", &[("To", phone), ("Channel", "sms")])
            .await
            .map_err(|e| {
                error!("Twilio start failed for {}: {}", mask_phone_number(phone), e);
                e
            })?;

        Ok(PhoneVerificationTicket {
            sid: resource.sid,
            status: resource.status,
        })
    }

    /// Check a code against the pending verification
    pub async fn check(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<PhoneVerificationTicket, InfrastructureError> {
        let resource = self
            .post_form("VerificationCheck", &[("To", phone), ("Code", code)])
            .await
            .map_err(|e| {
                error!("Twilio check failed for {}: {}", mask_phone_number(phone), e);
                e
            })?;

        Ok(PhoneVerificationTicket {
            sid: resource.sid,
            status: resource.status,
        })
    }
}

#[async_trait]
impl PhoneVerifier for TwilioVerifyClient {
    async fn start_verification(&self, phone: &str) -> Result<PhoneVerificationTicket, String> {
        self.start(phone).await.map_err(|e| e.to_string())
    }

    async fn check_verification(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<PhoneVerificationTicket, String> {
        self.check(phone, code).await.map_err(|e| e.to_string())
    }
}
