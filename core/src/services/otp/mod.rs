//! In-memory one-time code store
//!
//! This module owns the lifecycle of short-lived numeric codes keyed by an
//! identifier:
//! - Issuance with a per-identifier resend cooldown
//! - Lazy expiry and bounded-attempt verification
//! - A background sweeper that evicts expired records

mod clock;
mod generator;
mod policy;
mod store;
mod sweeper;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use generator::{constant_time_compare, generate_secure_code};
pub use policy::OtpPolicy;
pub use store::OtpStore;
pub use sweeper::{spawn_sweeper, SweeperHandle};
pub use types::{IssuedCode, OtpError, VerifyOutcome};
