//! Validation entry point: raw user text -> canonical imperial string.

use tracing::debug;

use crate::code;
use crate::error::MeasureResult;
use crate::measurement::{DecimalFeet, Measurement};
use crate::parser;

/// What the user typed, classified once up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementInput<'a> {
    /// Entirely ASCII digits: candidate shorthand code.
    Code(&'a str),
    /// Anything else, including empty text.
    FreeForm(&'a str),
}

impl<'a> MeasurementInput<'a> {
    /// Trims and classifies raw input.
    pub fn classify(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Self::Code(trimmed)
        } else {
            Self::FreeForm(trimmed)
        }
    }

    pub fn text(&self) -> &'a str {
        match self {
            Self::Code(text) | Self::FreeForm(text) => text,
        }
    }

    /// Resolve to a measurement.
    ///
    /// A rejected code falls through to the free-form grammar, where a lone
    /// number reads as feet.
    pub fn resolve(self) -> MeasureResult<Measurement> {
        match self {
            Self::Code(text) => match code::decode(text) {
                Ok(m) => Ok(m),
                Err(err) => {
                    debug!(input = text, reason = %err, "not a shorthand code, parsing as free-form");
                    parse_to_measurement(text)
                }
            },
            Self::FreeForm(text) => parse_to_measurement(text),
        }
    }
}

fn parse_to_measurement(text: &str) -> MeasureResult<Measurement> {
    parser::parse_free_form(text).map(Measurement::from_decimal_feet)
}

/// Parse any accepted input into a structured measurement.
pub fn measure(raw: &str) -> MeasureResult<Measurement> {
    MeasurementInput::classify(raw).resolve()
}

/// Validate user input and return its canonical form.
///
/// Empty input is `0' 0"`. Canonical strings validate to themselves.
pub fn validate_measurement(raw: &str) -> MeasureResult<String> {
    measure(raw).map(|m| m.to_string())
}

/// Decimal feet of a stored canonical string.
///
/// Stored values were canonicalized when written, so this goes straight to
/// the free-form grammar without code sniffing.
pub fn parse_canonical(canonical: &str) -> MeasureResult<DecimalFeet> {
    parser::parse_free_form(canonical)
}
