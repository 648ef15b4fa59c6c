//! QR rendering and storage

pub mod fs_store;
pub mod png_renderer;

pub use fs_store::FsImageStore;
pub use png_renderer::PngQrRenderer;
