//! Rendering and storage seams for QR images

use async_trait::async_trait;

/// Turns payload text into encoded image bytes
pub trait QrRenderer: Send + Sync {
    /// Render `payload` as a PNG image
    fn render(&self, payload: &str) -> Result<Vec<u8>, String>;
}

/// Persists generated images under a public filename
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), String>;
}
