//! Verigate HTTP API
//!
//! Email one-time codes, the SMS verification proxy and payment QR codes
//! served over actix-web.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
