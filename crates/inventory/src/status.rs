//! Stock level classification.

use serde::{Deserialize, Serialize};
use steelerp_measure::{DecimalFeet, parse_canonical};

const EPSILON: f64 = 0.0001;
const LOW_FACTOR: f64 = 1.5;

/// Stock level of an item relative to its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Available,
    Low,
    Critical,
    Depleted,
    /// A stored quantity could not be read.
    Undetermined,
}

impl StockStatus {
    /// Classify from decimal feet. `available = on_hand - reserved`.
    ///
    /// - nothing available: `Depleted`
    /// - at or under the minimum: `Critical`
    /// - under 1.5x the minimum: `Low`
    ///
    /// A zero minimum disables the `Critical`/`Low` thresholds.
    pub fn classify(on_hand: DecimalFeet, reserved: DecimalFeet, minimum: DecimalFeet) -> Self {
        let available = on_hand.value() - reserved.value();
        let minimum = minimum.value();

        if available <= EPSILON {
            Self::Depleted
        } else if minimum > EPSILON && available <= minimum + EPSILON {
            Self::Critical
        } else if minimum > EPSILON && available <= minimum * LOW_FACTOR + EPSILON {
            Self::Low
        } else {
            Self::Available
        }
    }

    /// Classify from stored canonical strings; unreadable input is `Undetermined`.
    pub fn classify_stored(on_hand: &str, reserved: &str, minimum: &str) -> Self {
        match (
            parse_canonical(on_hand),
            parse_canonical(reserved),
            parse_canonical(minimum),
        ) {
            (Ok(on_hand), Ok(reserved), Ok(minimum)) => Self::classify(on_hand, reserved, minimum),
            _ => Self::Undetermined,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Low => "LOW",
            Self::Critical => "CRITICAL",
            Self::Depleted => "DEPLETED",
            Self::Undetermined => "UNDETERMINED",
        }
    }

    /// True when the item needs replenishing soon.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Low | Self::Critical | Self::Depleted)
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
