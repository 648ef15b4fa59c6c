//! Request and response bodies

pub mod otp_dto;
pub mod qr_dto;
pub mod sms_dto;

pub use otp_dto::{SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse};
pub use qr_dto::{GenerateQrRequest, GenerateQrResponse, Price};
pub use sms_dto::{
    CheckPhoneCodeRequest, CheckPhoneCodeResponse, StartPhoneVerificationRequest,
    StartPhoneVerificationResponse,
};
