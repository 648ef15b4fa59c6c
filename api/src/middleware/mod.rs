//! HTTP middleware

pub mod cors;
pub mod rate_limit;
pub mod security;

pub use cors::create_cors;
pub use rate_limit::RateLimiter;
pub use security::SecurityHeaders;
