//! Request handler helpers

pub mod error;

pub use error::{domain_error_response, invalid_input, json_error_handler, not_found, Envelope};
