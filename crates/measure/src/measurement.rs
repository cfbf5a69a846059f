//! Measurement value objects: structured feet/inches/eighths and decimal feet.

use core::ops::{Add, Sub};
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use steelerp_core::ValueObject;

use crate::error::{MeasureError, MeasureResult};
use crate::fraction::{self, EIGHTHS};

pub const INCHES_PER_FOOT: u32 = 12;

/// A non-negative length in decimal feet.
///
/// This is the pivot every conversion goes through. It is never stored; the
/// canonical string produced by [`Measurement`] is.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecimalFeet(f64);

impl DecimalFeet {
    pub const ZERO: Self = Self(0.0);

    /// Negative and non-finite values clamp to zero.
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self::ZERO
        }
    }

    pub fn from_inches(inches: f64) -> Self {
        Self::new(inches / f64::from(INCHES_PER_FOOT))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn inches(self) -> f64 {
        self.0 * f64::from(INCHES_PER_FOOT)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl Add for DecimalFeet {
    type Output = DecimalFeet;

    fn add(self, rhs: Self) -> Self::Output {
        DecimalFeet::new(self.0 + rhs.0)
    }
}

/// Saturates at zero.
impl Sub for DecimalFeet {
    type Output = DecimalFeet;

    fn sub(self, rhs: Self) -> Self::Output {
        DecimalFeet::new(self.0 - rhs.0)
    }
}

impl core::iter::Sum for DecimalFeet {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(DecimalFeet::ZERO, Add::add)
    }
}

/// Feet, whole inches and eighths of an inch, fully reduced.
///
/// `Display` is the canonical `F' I N/D"` string used for storage, display and
/// equality checks downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Measurement {
    feet: u64,
    inches: u8,
    eighths: u8,
}

impl ValueObject for Measurement {}

impl Measurement {
    pub const ZERO: Self = Self {
        feet: 0,
        inches: 0,
        eighths: 0,
    };

    pub fn new(feet: u64, inches: u8, eighths: u8) -> MeasureResult<Self> {
        if u32::from(inches) >= INCHES_PER_FOOT {
            return Err(MeasureError::OutOfRange {
                reason: format!("inches must be below 12, got {inches}"),
            });
        }
        if u32::from(eighths) >= EIGHTHS {
            return Err(MeasureError::OutOfRange {
                reason: format!("eighths must be below 8, got {eighths}"),
            });
        }
        Ok(Self {
            feet,
            inches,
            eighths,
        })
    }

    /// Round a decimal length to the nearest eighth of an inch.
    ///
    /// A fraction rounding up to 8/8 carries into the inches, and 12 inches
    /// carry into the feet, so the result is always reduced.
    pub fn from_decimal_feet(value: DecimalFeet) -> Self {
        let value = value.value();
        let whole_feet = value.floor();
        let inch_decimal = (value - whole_feet) * f64::from(INCHES_PER_FOOT);
        let whole_inches = inch_decimal.floor();
        let numerator = ((inch_decimal - whole_inches) * f64::from(EIGHTHS)).round() as u32;

        let mut feet = whole_feet as u64;
        let mut inches = whole_inches as u64;
        let mut eighths = 0;
        if fraction::is_carry(numerator, EIGHTHS) {
            inches += 1;
        } else {
            eighths = numerator;
        }
        if inches >= u64::from(INCHES_PER_FOOT) {
            feet = feet.saturating_add(inches / u64::from(INCHES_PER_FOOT));
            inches %= u64::from(INCHES_PER_FOOT);
        }

        Self {
            feet,
            inches: inches as u8,
            eighths: eighths as u8,
        }
    }

    pub fn to_decimal_feet(self) -> DecimalFeet {
        let inches = f64::from(self.inches) + f64::from(self.eighths) / f64::from(EIGHTHS);
        DecimalFeet::new(self.feet as f64 + inches / f64::from(INCHES_PER_FOOT))
    }

    pub fn feet(&self) -> u64 {
        self.feet
    }

    pub fn inches(&self) -> u8 {
        self.inches
    }

    /// Raw eighths numerator (0..8).
    pub fn eighths(&self) -> u8 {
        self.eighths
    }

    /// The inch fraction in lowest terms, `None` when there is none.
    pub fn fraction(&self) -> Option<(u32, u32)> {
        match self.eighths {
            0 => None,
            n => Some(fraction::simplify(u32::from(n), EIGHTHS)),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl core::fmt::Display for Measurement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}' {}{}\"",
            self.feet,
            self.inches,
            fraction::eighths_suffix(u32::from(self.eighths))
        )
    }
}

impl From<DecimalFeet> for Measurement {
    fn from(value: DecimalFeet) -> Self {
        Self::from_decimal_feet(value)
    }
}

impl From<Measurement> for DecimalFeet {
    fn from(value: Measurement) -> Self {
        value.to_decimal_feet()
    }
}

/// Accepts anything the validator accepts (codes and free-form text).
impl FromStr for Measurement {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::validate::measure(s)
    }
}

impl TryFrom<String> for Measurement {
    type Error = MeasureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Measurement> for String {
    fn from(value: Measurement) -> Self {
        value.to_string()
    }
}
