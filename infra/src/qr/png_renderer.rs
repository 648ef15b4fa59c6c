//! PNG QR renderer

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};
use std::io::Cursor;

use vg_core::QrRenderer;

use crate::InfrastructureError;

/// Modules of light border around the symbol
const QUIET_ZONE: u32 = 4;

/// Renders payloads as black-on-white PNG QR codes
#[derive(Debug, Clone)]
pub struct PngQrRenderer {
    module_size: u32,
}

impl PngQrRenderer {
    pub fn new(module_size: u32) -> Self {
        Self {
            module_size: module_size.max(1),
        }
    }

    /// Encode `payload` and return PNG bytes
    pub fn render_png(&self, payload: &str) -> Result<Vec<u8>, InfrastructureError> {
        let code = QrCode::new(payload.as_bytes())
            .map_err(|e| InfrastructureError::Render(e.to_string()))?;

        let width = code.width() as u32;
        let colors = code.to_colors();
        let side = (width + 2 * QUIET_ZONE) * self.module_size;

        let image = GrayImage::from_fn(side, side, |x, y| {
            let mx = (x / self.module_size) as i64 - QUIET_ZONE as i64;
            let my = (y / self.module_size) as i64 - QUIET_ZONE as i64;
            let inside = (0..width as i64).contains(&mx) && (0..width as i64).contains(&my);
            if inside && colors[(my as u32 * width + mx as u32) as usize] == Color::Dark {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

impl Default for PngQrRenderer {
    fn default() -> Self {
        Self::new(8)
    }
}

impl QrRenderer for PngQrRenderer {
    fn render(&self, payload: &str) -> Result<Vec<u8>, String> {
        self.render_png(payload).map_err(|e| e.to_string())
    }
}
