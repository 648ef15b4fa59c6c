//! Mapping from domain errors to HTTP responses
//!
//! Endpoint bodies carry either a `success` or a `verified` flag; error bodies
//! keep the same flag set to `false` next to an `error` code and a `message`.

use actix_web::{error::JsonPayloadError, http::header, http::StatusCode, HttpRequest, HttpResponse};
use serde_json::{json, Map, Value};
use validator::ValidationErrors;

use vg_core::DomainError;
use vg_shared::{error_codes, ErrorResponse};

/// Which flag an endpoint's responses carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    Success,
    Verified,
}

impl Envelope {
    fn key(self) -> &'static str {
        match self {
            Envelope::Success => "success",
            Envelope::Verified => "verified",
        }
    }
}

fn envelope_body(envelope: Envelope, error: &str, message: &str) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(envelope.key().to_string(), Value::Bool(false));
    body.insert("error".to_string(), json!(error));
    body.insert("message".to_string(), json!(message));
    body
}

/// Convert a domain error into the endpoint's error response
pub fn domain_error_response(error: DomainError, envelope: Envelope) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            log::debug!("Rejected request: {}", message);
            HttpResponse::BadRequest().json(envelope_body(
                envelope,
                error_codes::INVALID_INPUT,
                &message,
            ))
        }
        DomainError::RateLimited {
            retry_after_seconds,
        } => {
            let message = format!(
                "Please wait {} seconds before requesting a new code",
                retry_after_seconds
            );
            let mut body = envelope_body(envelope, error_codes::COOLDOWN, &message);
            body.insert("retryAfterSeconds".to_string(), json!(retry_after_seconds));
            HttpResponse::TooManyRequests()
                .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
                .json(body)
        }
        DomainError::Transport { message } => {
            log::error!("Delivery provider failure: {}", message);
            HttpResponse::InternalServerError().json(envelope_body(
                envelope,
                error_codes::TRANSPORT_FAILURE,
                &message,
            ))
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(envelope_body(
                envelope,
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 response for a request that failed DTO validation
pub fn invalid_input(errors: &ValidationErrors, envelope: Envelope) -> HttpResponse {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    let message = fields
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request".to_string());

    HttpResponse::BadRequest().json(envelope_body(envelope, error_codes::INVALID_INPUT, &message))
}

/// Error handler for `web::JsonConfig`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let status = match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let message = err.to_string();
    log::debug!("Rejected JSON body: {}", message);

    let response = HttpResponse::build(status).json(envelope_body(
        Envelope::Success,
        error_codes::INVALID_JSON,
        &message,
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default 404 handler
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::new(error_codes::NOT_FOUND, "The requested resource was not found")
            .add_detail("path", req.path()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn test_validation_maps_to_bad_request() {
        let response =
            domain_error_response(DomainError::validation("Invalid email address"), Envelope::Success);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "invalid_input");
        assert_eq!(body["message"], "Invalid email address");
    }

    #[actix_rt::test]
    async fn test_cooldown_carries_retry_after() {
        let response = domain_error_response(
            DomainError::RateLimited {
                retry_after_seconds: 42,
            },
            Envelope::Success,
        );
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");

        let body = body_of(response).await;
        assert_eq!(body["error"], "cooldown");
        assert_eq!(body["retryAfterSeconds"], 42);
    }

    #[actix_rt::test]
    async fn test_internal_message_is_hidden() {
        let response = domain_error_response(
            DomainError::Internal {
                message: "disk full at /var/qrcodes".to_string(),
            },
            Envelope::Verified,
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body["verified"], false);
        assert_eq!(body["error"], "internal_error");
        assert!(!body["message"].as_str().unwrap().contains("disk"));
    }
}
