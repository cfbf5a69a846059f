//! Imperial <-> metric conversion.

use serde::{Deserialize, Serialize};
use steelerp_core::ValueObject;

use crate::error::MeasureResult;
use crate::measurement::DecimalFeet;

pub const METERS_PER_FOOT: f64 = 0.3048;

/// A length in meters, rounded to the millimetre.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct MetricLength {
    meters: f64,
}

impl ValueObject for MetricLength {}

impl MetricLength {
    pub fn from_meters(meters: f64) -> Self {
        Self {
            meters: round_millis(meters),
        }
    }

    pub fn meters(self) -> f64 {
        self.meters
    }
}

impl core::fmt::Display for MetricLength {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.3} m", self.meters)
    }
}

pub(crate) fn round_millis(meters: f64) -> f64 {
    (meters * 1000.0).round() / 1000.0
}

pub fn to_metric(value: DecimalFeet) -> MetricLength {
    MetricLength::from_meters(value.value() * METERS_PER_FOOT)
}

pub fn from_metric(length: MetricLength) -> DecimalFeet {
    DecimalFeet::new(length.meters() / METERS_PER_FOOT)
}

/// `"{meters:.3} m"` for a canonical (or any accepted) imperial string.
pub fn to_metric_display(canonical: &str) -> MeasureResult<String> {
    let feet = crate::validate::parse_canonical(canonical)?;
    Ok(to_metric(feet).to_string())
}
