//! Phone number utilities

/// Fewest digits accepted for an international number
pub const MIN_DIGITS: usize = 8;
/// Most digits allowed by E.164
pub const MAX_DIGITS: usize = 15;

/// Strip everything except ASCII digits
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a phone number to `+<digits>` (8 to 15 digits)
///
/// Formatting characters (spaces, dashes, parentheses, a leading `+`) are
/// discarded; returns `None` when the remaining digit count is out of range.
pub fn normalize_phone_number(phone: &str) -> Option<String> {
    let digits = digits_only(phone);
    if (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
        Some(format!("+{}", digits))
    } else {
        None
    }
}

/// Check if a phone number normalizes to a valid international number
pub fn is_valid_phone(phone: &str) -> bool {
    normalize_phone_number(phone).is_some()
}

/// Mask a phone number for display (e.g., +44****0123)
pub fn mask_phone_number(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.len() >= 7 {
        format!("+{}****{}", &digits[0..2], &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}
