//! Email one-time code endpoints

use actix_web::{web, HttpResponse};
use validator::Validate;

use vg_core::{DispatchStatus, VerifyOutcome};
use vg_shared::email::mask_email;

use crate::app::AppState;
use crate::dto::{SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{domain_error_response, invalid_input, Envelope};

/// Handler for `POST /send-otp` and `POST /api/send-email-otp`
///
/// Issues a code for the email in `identifier` (or `email`) and hands it to
/// the mail transport.
///
/// - `200` delivered, with `dispatchRef`, `expiresInSeconds`, `resendAfterSeconds`
/// - `202` issued but delivery failed, `delivered: false`
/// - `429` inside the resend cooldown, with `retryAfterSeconds`
/// - `400` invalid email
pub async fn send_otp(
    state: web::Data<AppState>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return invalid_input(&errors, Envelope::Success);
    }

    log::info!("Processing send-otp request for {}", mask_email(&request.identifier));

    match state.email_service.send_code(&request.identifier).await {
        Ok(result) => match &result.dispatch {
            DispatchStatus::Delivered { reference } => {
                HttpResponse::Ok().json(SendOtpResponse::delivered(&result, reference))
            }
            DispatchStatus::Failed { .. } => {
                HttpResponse::Accepted().json(SendOtpResponse::undelivered(&result))
            }
        },
        Err(error) => domain_error_response(error, Envelope::Success),
    }
}

/// Handler for `POST /verify-otp` and `POST /api/verify-email-otp`
///
/// All store outcomes answer `200` except `exhausted`, which answers `429`.
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return invalid_input(&errors, Envelope::Verified);
    }

    match state
        .email_service
        .verify_code(&request.identifier, &request.code)
        .await
    {
        Ok(outcome @ VerifyOutcome::Exhausted) => {
            HttpResponse::TooManyRequests().json(VerifyOtpResponse::from(outcome))
        }
        Ok(outcome) => HttpResponse::Ok().json(VerifyOtpResponse::from(outcome)),
        Err(error) => domain_error_response(error, Envelope::Verified),
    }
}
