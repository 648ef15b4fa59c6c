use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use vg_api::middleware::RateLimiter;
use vg_api::{create_app, AppState};
use vg_core::{OtpPolicy, OtpStore, QrCodeService, SystemClock};
use vg_infra::{create_code_sender, create_phone_verifier, FsImageStore, PngQrRenderer};
use vg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!("Starting Verigate API Server ({})", config.environment);

    let (store, sweeper) = OtpStore::start(OtpPolicy::from(&config.otp), Arc::new(SystemClock));

    let sender = create_code_sender(&config).context("Failed to configure email delivery")?;
    let verifier = create_phone_verifier(&config).context("Failed to configure SMS verification")?;

    let image_store = FsImageStore::new(&config.qr.output_dir);
    image_store
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create QR directory {}", config.qr.output_dir))?;
    let qr_service = QrCodeService::new(
        Arc::new(PngQrRenderer::new(config.qr.module_size)),
        Arc::new(image_store),
        config.qr.url_prefix.clone(),
    );

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let rate_limiter = RateLimiter::new(&config.rate_limit);
    let state = web::Data::new(AppState::new(config, store, sender, verifier, qr_service));

    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), rate_limiter.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    sweeper.shutdown().await;
    info!("Server stopped");
    Ok(())
}
