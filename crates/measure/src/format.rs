//! Canonical imperial rendering.

use crate::measurement::{DecimalFeet, Measurement};

/// Render decimal feet as the canonical `F' I N/D"` string.
///
/// Rounds to the nearest eighth of an inch with carries applied. The output
/// is what gets stored and compared, so it must stay byte-for-byte stable.
pub fn format_decimal_feet(value: DecimalFeet) -> String {
    Measurement::from_decimal_feet(value).to_string()
}
