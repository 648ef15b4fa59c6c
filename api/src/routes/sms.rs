//! SMS verification proxy endpoints

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{
    CheckPhoneCodeRequest, CheckPhoneCodeResponse, StartPhoneVerificationRequest,
    StartPhoneVerificationResponse,
};
use crate::handlers::{domain_error_response, invalid_input, Envelope};

/// Handler for `POST /api/send-otp`
pub async fn start_verification(
    state: web::Data<AppState>,
    request: web::Json<StartPhoneVerificationRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return invalid_input(&errors, Envelope::Success);
    }

    match state.phone_service.start(&request.phone).await {
        Ok(ticket) => HttpResponse::Ok().json(StartPhoneVerificationResponse {
            success: true,
            sid: ticket.sid,
            status: ticket.status,
        }),
        Err(error) => domain_error_response(error, Envelope::Success),
    }
}

/// Handler for `POST /api/verify-otp`
pub async fn check_verification(
    state: web::Data<AppState>,
    request: web::Json<CheckPhoneCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return invalid_input(&errors, Envelope::Verified);
    }

    match state.phone_service.check(&request.phone, &request.code).await {
        Ok(result) => HttpResponse::Ok().json(CheckPhoneCodeResponse {
            verified: result.verified,
            status: result.status,
        }),
        Err(error) => domain_error_response(error, Envelope::Verified),
    }
}
