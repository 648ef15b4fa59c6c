use serde::{Deserialize, Serialize};
use validator::Validate;

use vg_core::{SendCodeResult, VerifyOutcome};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[serde(default, alias = "email")]
    #[validate(length(min = 1, max = 254, message = "Email is required"))]
    pub identifier: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default, alias = "email")]
    #[validate(length(min = 1, max = 254, message = "Email is required"))]
    pub identifier: String,
    #[serde(default, alias = "otp")]
    #[validate(length(min = 1, max = 32, message = "Code is required"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub expires_in_seconds: u64,
    pub resend_after_seconds: u64,
}

impl SendOtpResponse {
    pub fn delivered(result: &SendCodeResult, reference: &str) -> Self {
        Self {
            success: true,
            delivered: None,
            dispatch_ref: Some(reference.to_string()),
            error: None,
            message: None,
            expires_in_seconds: result.expires_in_seconds(),
            resend_after_seconds: result.resend_after_seconds(),
        }
    }

    /// Code was issued but the transport failed
    pub fn undelivered(result: &SendCodeResult) -> Self {
        Self {
            success: true,
            delivered: Some(false),
            dispatch_ref: None,
            error: Some(vg_shared::error_codes::TRANSPORT_FAILURE.to_string()),
            message: Some("Verification code issued but could not be delivered".to_string()),
            expires_in_seconds: result.expires_in_seconds(),
            resend_after_seconds: result.resend_after_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_remaining: Option<u32>,
}

impl From<VerifyOutcome> for VerifyOtpResponse {
    fn from(outcome: VerifyOutcome) -> Self {
        let attempts_remaining = match outcome {
            VerifyOutcome::Mismatch { attempts_remaining } => Some(attempts_remaining),
            _ => None,
        };
        Self {
            verified: outcome.is_verified(),
            reason: (!outcome.is_verified()).then(|| outcome.reason().to_string()),
            attempts_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_alias() {
        let req: SendOtpRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(req.identifier, "a@x.com");

        let req: VerifyOtpRequest =
            serde_json::from_str(r#"{"identifier":"a@x.com","otp":"123456"}"#).unwrap();
        assert_eq!(req.code, "123456");
    }

    #[test]
    fn test_missing_fields_fail_validation() {
        let req: VerifyOtpRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("identifier"));
        assert!(errors.field_errors().contains_key("code"));
    }

    #[test]
    fn test_verify_response_shapes() {
        let body = serde_json::to_value(VerifyOtpResponse::from(VerifyOutcome::Verified)).unwrap();
        assert_eq!(body, serde_json::json!({"verified": true}));

        let body = serde_json::to_value(VerifyOtpResponse::from(VerifyOutcome::Mismatch {
            attempts_remaining: 3,
        }))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"verified": false, "reason": "mismatch", "attemptsRemaining": 3})
        );

        let body = serde_json::to_value(VerifyOtpResponse::from(VerifyOutcome::NotFound)).unwrap();
        assert_eq!(body, serde_json::json!({"verified": false, "reason": "not_found"}));
    }
}
