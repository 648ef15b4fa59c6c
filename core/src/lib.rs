//! # Verigate Core
//!
//! Core business logic for the Verigate server: the in-memory one-time code
//! store with its background sweeper, the email and phone verification
//! services, QR payment code generation, and the collaborator traits the
//! infrastructure layer implements.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
