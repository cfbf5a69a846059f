//! Fixed-width numeric shorthand codes.
//!
//! Fast-entry alternative to typing a formatted length:
//!
//! | length | layout    | example   | meaning      |
//! |--------|-----------|-----------|--------------|
//! | 6      | `FFIIEE`  | `400502`  | `40' 5 1/4"` |
//! | 7      | `FFFIIEE` | `1200304` | `120' 3 1/2"`|
//!
//! `EE` is a numerator over 8.

use crate::error::{MeasureError, MeasureResult};
use crate::fraction::EIGHTHS;
use crate::measurement::{INCHES_PER_FOOT, Measurement};

/// Decode a shorthand code into a measurement.
///
/// Only all-digit input of length 6 or 7 is a code. Inches must be below 12
/// and the eighths numerator below 8.
pub fn decode(code: &str) -> MeasureResult<Measurement> {
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MeasureError::InvalidCodeDigits {
            code: code.to_string(),
            reason: "code must contain only digits".to_string(),
        });
    }

    let feet_width = match code.len() {
        6 => 2,
        7 => 3,
        len => {
            return Err(MeasureError::InvalidCodeLength {
                code: code.to_string(),
                len,
            });
        }
    };

    let (feet, rest) = code.split_at(feet_width);
    let (inches, eighths) = rest.split_at(2);
    let feet = digits(feet);
    let inches = digits(inches);
    let eighths = digits(eighths);

    if inches >= u64::from(INCHES_PER_FOOT) {
        return Err(MeasureError::InvalidCodeDigits {
            code: code.to_string(),
            reason: format!("inches must be below 12, got {inches}"),
        });
    }
    if eighths >= u64::from(EIGHTHS) {
        return Err(MeasureError::InvalidCodeDigits {
            code: code.to_string(),
            reason: format!("eighths must be below 8, got {eighths}"),
        });
    }

    Measurement::new(feet, inches as u8, eighths as u8)
}

// Input is already known to be ASCII digits, at most 3 of them.
fn digits(s: &str) -> u64 {
    s.bytes().fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
}
