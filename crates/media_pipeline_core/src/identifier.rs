//! Short resource identifiers for one-time provisioning labels.
//!
//! The result is a random base-36 segment followed by the base-36 millisecond
//! timestamp. It is collision-resistant enough for naming a single stack's
//! resources and makes no stronger uniqueness claim.

const RADIX: u32 = 36;
const MAX_FRACTION_DIGITS: usize = 11;
const SKIPPED_FRACTION_DIGITS: usize = 5;

pub fn generate_identifier(random_fraction: f64, timestamp_ms: u64) -> String {
    let fraction_digits = fraction_to_base36(random_fraction);
    let random_segment: String = fraction_digits
        .chars()
        .skip(SKIPPED_FRACTION_DIGITS)
        .collect();
    format!("{random_segment}{}", to_base36(timestamp_ms))
}

pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(base36_digit((value % u64::from(RADIX)) as u32));
        value /= u64::from(RADIX);
    }
    digits.iter().rev().collect()
}

/// Radix-36 digits after the point of a value in `[0, 1)`, trailing zeros
/// dropped. Out-of-range input is clamped into the unit interval.
pub fn fraction_to_base36(value: f64) -> String {
    let mut remainder = if value.is_finite() {
        value.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.0
    };

    let mut digits = String::with_capacity(MAX_FRACTION_DIGITS);
    while remainder > 0.0 && digits.len() < MAX_FRACTION_DIGITS {
        remainder *= f64::from(RADIX);
        let digit = remainder.floor();
        digits.push(base36_digit(digit as u32));
        remainder -= digit;
    }

    digits.trim_end_matches('0').to_string()
}

fn base36_digit(value: u32) -> char {
    char::from_digit(value, RADIX).unwrap_or('0')
}

pub fn is_base36(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase())
}
