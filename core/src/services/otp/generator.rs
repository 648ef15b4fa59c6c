//! Code generation and comparison

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};

/// Longest code whose range still fits in a `u64`
const MAX_CODE_LENGTH: usize = 19;

/// Generate a numeric code using the OS CSPRNG
///
/// The value is drawn uniformly from `0..10^length` and zero padded, so every
/// code of the requested length (leading zeros included) is equally likely.
pub fn generate_secure_code(length: usize) -> String {
    let length = length.clamp(1, MAX_CODE_LENGTH);
    let upper = 10u64.pow(length as u32);
    let value = OsRng.gen_range(0..upper);
    format!("{:0width$}", value, width = length)
}

/// Compare two codes in constant time
pub fn constant_time_compare(stored: &str, supplied: &str) -> bool {
    constant_time_eq(stored.as_bytes(), supplied.as_bytes())
}
