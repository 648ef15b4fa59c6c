//! QR code service

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::errors::{DomainError, DomainResult};
use crate::services::otp::{Clock, SystemClock};

use super::traits::{ImageStore, QrRenderer};

/// Currency shown in payment payloads
const CURRENCY: &str = "INR";

/// A rendered and stored QR image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedQr {
    pub filename: String,
    pub url: String,
    #[serde(skip)]
    pub payload: String,
}

/// Renders payment QR codes and stores them for download
pub struct QrCodeService {
    renderer: Arc<dyn QrRenderer>,
    store: Arc<dyn ImageStore>,
    url_prefix: String,
    clock: Arc<dyn Clock>,
    /// Disambiguates images generated within the same millisecond
    sequence: AtomicU64,
}

impl QrCodeService {
    pub fn new(
        renderer: Arc<dyn QrRenderer>,
        store: Arc<dyn ImageStore>,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self::with_clock(renderer, store, url_prefix, Arc::new(SystemClock))
    }

    pub fn with_clock(
        renderer: Arc<dyn QrRenderer>,
        store: Arc<dyn ImageStore>,
        url_prefix: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            renderer,
            store,
            url_prefix: url_prefix.into(),
            clock,
            sequence: AtomicU64::new(0),
        }
    }

    /// Text encoded into the QR image
    pub fn payment_payload(product: &str, price: &str) -> String {
        format!("Pay {} {} for {}", CURRENCY, price, product)
    }

    /// Render a payment QR for `product` at `price` and store it
    pub async fn generate_payment_qr(&self, product: &str, price: &str) -> DomainResult<GeneratedQr> {
        let product = product.trim();
        let price = price.trim();
        if product.is_empty() || price.is_empty() {
            return Err(DomainError::validation("Product and price are required"));
        }

        let payload = Self::payment_payload(product, price);
        let bytes = self.renderer.render(&payload).map_err(|e| DomainError::Internal {
            message: format!("Failed to render QR code: {}", e),
        })?;

        let filename = format!(
            "qr_{}_{}.png",
            self.clock.now().timestamp_millis(),
            self.sequence.fetch_add(1, Ordering::Relaxed)
        );
        self.store.save(&filename, &bytes).await.map_err(|e| {
            tracing::error!(
                filename = %filename,
                error = %e,
                event = "qr_store_failed",
                "Failed to store QR image"
            );
            DomainError::Internal {
                message: format!("Failed to store QR code: {}", e),
            }
        })?;

        tracing::info!(filename = %filename, bytes = bytes.len(), event = "qr_generated", "QR code generated");

        Ok(GeneratedQr {
            url: format!("{}/{}", self.url_prefix.trim_end_matches('/'), filename),
            filename,
            payload,
        })
    }
}
