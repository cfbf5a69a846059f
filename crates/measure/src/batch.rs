//! Bulk validation.
//!
//! Every call is independent and pure, so a batch is a plain parallel map.

use rayon::prelude::*;

use crate::error::MeasureResult;
use crate::validate::validate_measurement;

/// Validate many inputs in parallel. Output order matches input order.
pub fn validate_batch<S>(inputs: &[S]) -> Vec<MeasureResult<String>>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|raw| validate_measurement(raw.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeasureError;

    #[test]
    fn preserves_order_and_errors() {
        let inputs = ["3 6 1/2", "bogus", "400502", "", "1/0"];
        let results = validate_batch(&inputs);

        assert_eq!(results.len(), inputs.len());
        assert_eq!(results[0].as_deref(), Ok("3' 6 1/2\""));
        assert!(matches!(results[1], Err(MeasureError::UnrecognizedFormat { .. })));
        assert_eq!(results[2].as_deref(), Ok("40' 5 1/4\""));
        assert_eq!(results[3].as_deref(), Ok("0' 0\""));
        assert!(matches!(results[4], Err(MeasureError::DivisionByZeroFraction { .. })));
    }

    #[test]
    fn matches_sequential_validation() {
        let inputs: Vec<String> = (0..500).map(|i| format!("{} {}", i / 12, i % 12)).collect();
        let parallel = validate_batch(&inputs);
        let sequential: Vec<_> = inputs.iter().map(|s| validate_measurement(s)).collect();
        assert_eq!(parallel, sequential);
    }
}
