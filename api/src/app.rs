//! Application state and factory
//!
//! The state is built once in `main` and shared with every worker through
//! `web::Data`; `create_app` wires the routes and middleware around it.

use std::sync::Arc;

use actix_files::Files;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};

use vg_core::{
    CodeSender, EmailVerificationService, OtpStore, PhoneVerificationService, PhoneVerifier,
    QrCodeService, VerificationServiceConfig,
};
use vg_shared::AppConfig;

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::{create_cors, RateLimiter, SecurityHeaders};
use crate::routes::{health, otp, qr, sms};

/// Application state that holds shared services
pub struct AppState {
    pub email_service: Arc<EmailVerificationService<dyn CodeSender>>,
    pub phone_service: Arc<PhoneVerificationService<dyn PhoneVerifier>>,
    pub qr_service: Arc<QrCodeService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<OtpStore>,
        sender: Arc<dyn CodeSender>,
        verifier: Arc<dyn PhoneVerifier>,
        qr_service: QrCodeService,
    ) -> Self {
        let service_config = VerificationServiceConfig::from(&config.otp);
        Self {
            email_service: Arc::new(EmailVerificationService::new(store, sender, service_config)),
            phone_service: Arc::new(PhoneVerificationService::new(verifier)),
            qr_service: Arc::new(qr_service),
            config: Arc::new(config),
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    rate_limiter: RateLimiter,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let config = state.config.clone();

    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(state)
        .app_data(json_config)
        // order matters: the last wrap runs first
        .wrap(SecurityHeaders::for_environment(config.environment))
        .wrap(create_cors(&config.cors))
        .wrap(Logger::default())
        .route("/health", web::get().to(health::health_check))
        .route("/send-otp", web::post().to(otp::send_otp))
        .route("/verify-otp", web::post().to(otp::verify_otp))
        .service(
            web::scope("/api")
                .wrap(rate_limiter)
                .route("/send-email-otp", web::post().to(otp::send_otp))
                .route("/verify-email-otp", web::post().to(otp::verify_otp))
                .route("/send-otp", web::post().to(sms::start_verification))
                .route("/verify-otp", web::post().to(sms::check_verification))
                .route("/generate-qr", web::post().to(qr::generate_qr)),
        )
        .service(Files::new(&config.qr.url_prefix, &config.qr.output_dir))
        .default_service(web::route().to(not_found))
}
