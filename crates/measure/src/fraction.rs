//! Eighth-inch fraction arithmetic.

/// The only supported sub-inch denominator.
pub const EIGHTHS: u32 = 8;

/// Greatest common divisor (Euclid). `gcd(0, 0) == 0`.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Reduce `numerator/denominator` to lowest terms.
///
/// `simplify(8, 8)` yields `(1, 1)`: callers must treat that as a carry into
/// the whole-inch count (see [`is_carry`]) rather than print `1/1"`.
pub fn simplify(numerator: u32, denominator: u32) -> (u32, u32) {
    match gcd(numerator, denominator) {
        0 => (numerator, denominator),
        d => (numerator / d, denominator / d),
    }
}

/// True when the fraction is a whole inch.
pub fn is_carry(numerator: u32, denominator: u32) -> bool {
    denominator != 0 && numerator == denominator
}

/// Render `n/8` as the suffix used in canonical strings (`" 3/8"`), or
/// nothing for zero.
pub(crate) fn eighths_suffix(eighths: u32) -> String {
    if eighths == 0 {
        return String::new();
    }
    let (n, d) = simplify(eighths, EIGHTHS);
    format!(" {n}/{d}")
}
