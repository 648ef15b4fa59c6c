//! Payment QR endpoint

use actix_web::{web, HttpResponse};

use vg_core::DomainError;

use crate::app::AppState;
use crate::dto::{GenerateQrRequest, GenerateQrResponse};
use crate::handlers::{domain_error_response, Envelope};

/// Handler for `POST /api/generate-qr`
///
/// Renders `Pay INR {price} for {product}` and answers with the URL the image
/// is served from.
pub async fn generate_qr(
    state: web::Data<AppState>,
    request: web::Json<GenerateQrRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let Some(price) = request.price.map(|p| p.to_string()) else {
        return domain_error_response(
            DomainError::validation("Product and price are required"),
            Envelope::Success,
        );
    };

    match state
        .qr_service
        .generate_payment_qr(&request.product, &price)
        .await
    {
        Ok(qr) => {
            log::info!("Generated QR code {}", qr.filename);
            HttpResponse::Ok().json(GenerateQrResponse {
                success: true,
                filename: qr.filename,
                url: qr.url,
            })
        }
        Err(error) => domain_error_response(error, Envelope::Success),
    }
}
