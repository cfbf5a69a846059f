//! Measurement error model.

use thiserror::Error;

/// Result type for measurement parsing/formatting.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Why a measurement could not be read.
///
/// Every parse failure carries the text the user typed so it can be echoed
/// back unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeasureError {
    /// Shorthand code is not 6 or 7 digits long.
    #[error("invalid measurement code '{code}': expected 6 or 7 digits, got {len}")]
    InvalidCodeLength { code: String, len: usize },

    /// Shorthand code has the right length but an out-of-range part.
    #[error("invalid measurement code '{code}': {reason}")]
    InvalidCodeDigits { code: String, reason: String },

    /// Free-form text matched no known notation.
    #[error("unrecognized measurement format: '{original}'")]
    UnrecognizedFormat { original: String },

    /// A fraction with a zero denominator.
    #[error("fraction with zero denominator in '{original}'")]
    DivisionByZeroFraction { original: String },

    /// Structured parts out of range (inches >= 12, eighths >= 8).
    #[error("measurement out of range: {reason}")]
    OutOfRange { reason: String },
}

impl MeasureError {
    pub(crate) fn unrecognized(original: &str) -> Self {
        Self::UnrecognizedFormat {
            original: original.to_string(),
        }
    }

    pub(crate) fn zero_denominator(original: &str) -> Self {
        Self::DivisionByZeroFraction {
            original: original.to_string(),
        }
    }

    /// The text that failed to parse, if this error came from parsing.
    pub fn original_input(&self) -> Option<&str> {
        match self {
            Self::InvalidCodeLength { code, .. } | Self::InvalidCodeDigits { code, .. } => Some(code),
            Self::UnrecognizedFormat { original } | Self::DivisionByZeroFraction { original } => {
                Some(original)
            }
            Self::OutOfRange { .. } => None,
        }
    }

    /// Code rejections are recoverable: the validator falls through to free-form parsing.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidCodeLength { .. } | Self::InvalidCodeDigits { .. }
        )
    }
}
