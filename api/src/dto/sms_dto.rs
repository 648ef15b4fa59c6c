use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StartPhoneVerificationRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CheckPhoneCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "Phone and code are required"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 16, message = "Phone and code are required"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartPhoneVerificationResponse {
    pub success: bool,
    pub sid: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckPhoneCodeResponse {
    pub verified: bool,
    pub status: String,
}
