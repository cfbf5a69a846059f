//! Consumption trend and next-month forecast from an item's removal history.
//!
//! Model:
//! - Keep `REMOVE` movements with a readable timestamp and quantity.
//! - Sum removed meters per calendar month.
//! - Average over the months that had removals; predict the next month as
//!   that average plus a fixed buffer.
//! - Confidence grows linearly with the number of months, capped at 100%.
//!
//! This is a simple heuristic, not a statistical model.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use steelerp_events::MovementRecord;
use steelerp_measure::metric::METERS_PER_FOOT;
use steelerp_measure::{DecimalFeet, MetricLength, format_decimal_feet, parse_canonical, to_metric};

use crate::job::AiJob;
use crate::result::{AiError, AiResult};

/// Forecast tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    /// Multiplier applied to the monthly average (1.10 = +10%).
    pub buffer_factor: f64,
    /// Confidence points gained per month of history.
    pub confidence_per_month: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            buffer_factor: 1.10,
            confidence_per_month: 10,
        }
    }
}

impl ForecastConfig {
    pub fn with_buffer_factor(mut self, buffer_factor: f64) -> Self {
        self.buffer_factor = buffer_factor;
        self
    }

    pub fn with_confidence_per_month(mut self, points: u32) -> Self {
        self.confidence_per_month = points;
        self
    }

    fn validate(&self) -> Result<(), AiError> {
        if !(self.buffer_factor.is_finite() && self.buffer_factor > 0.0) {
            return Err(AiError::InvalidInput(
                "buffer_factor must be a finite positive number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Meters removed during one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyConsumption {
    pub year: i32,
    pub month: u32,
    pub meters: f64,
}

impl MonthlyConsumption {
    /// `YYYY-MM`.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub monthly_average: MetricLength,
    pub monthly_average_imperial: String,
    pub next_period_prediction: MetricLength,
    pub prediction_imperial: String,
    /// 0..=100.
    pub confidence_percent: u8,
    pub months_of_history: usize,
    /// Oldest month first.
    pub monthly_totals: Vec<MonthlyConsumption>,
}

/// Outcome of [`forecast`]. `NoHistory` is a normal state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    Forecast(ForecastResult),
    NoHistory,
}

impl ForecastOutcome {
    pub fn into_forecast(self) -> Option<ForecastResult> {
        match self {
            Self::Forecast(result) => Some(result),
            Self::NoHistory => None,
        }
    }
}

/// Removed meters per month, oldest first.
///
/// Records with a malformed timestamp or quantity are skipped.
pub fn analyze_trends(history: &[MovementRecord]) -> Vec<MonthlyConsumption> {
    let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();

    for record in history.iter().filter(|r| r.action.is_removal()) {
        let Some(when) = record.occurred_at() else {
            debug!(timestamp = %record.timestamp, "skipping movement with malformed timestamp");
            continue;
        };
        let feet = match parse_canonical(&record.quantity) {
            Ok(feet) => feet,
            Err(err) => {
                debug!(quantity = %record.quantity, error = %err, "skipping movement with unreadable quantity");
                continue;
            }
        };
        *months.entry((when.year(), when.month())).or_insert(0.0) += to_metric(feet).meters();
    }

    months
        .into_iter()
        .map(|((year, month), meters)| MonthlyConsumption {
            year,
            month,
            meters,
        })
        .collect()
}

/// Forecast with the default configuration.
pub fn forecast(history: &[MovementRecord]) -> ForecastOutcome {
    forecast_with(history, &ForecastConfig::default())
}

pub fn forecast_with(history: &[MovementRecord], config: &ForecastConfig) -> ForecastOutcome {
    let monthly_totals = analyze_trends(history);
    if monthly_totals.is_empty() {
        return ForecastOutcome::NoHistory;
    }

    let months = monthly_totals.len();
    let total: f64 = monthly_totals.iter().map(|m| m.meters).sum();
    let average = total / months as f64;
    let prediction = average * config.buffer_factor;
    let confidence = u32::try_from(months)
        .unwrap_or(u32::MAX)
        .saturating_mul(config.confidence_per_month)
        .min(100) as u8;

    ForecastOutcome::Forecast(ForecastResult {
        monthly_average: MetricLength::from_meters(average),
        monthly_average_imperial: imperial(average),
        next_period_prediction: MetricLength::from_meters(prediction),
        prediction_imperial: imperial(prediction),
        confidence_percent: confidence,
        months_of_history: months,
        monthly_totals,
    })
}

fn imperial(meters: f64) -> String {
    format_decimal_feet(DecimalFeet::new(meters / METERS_PER_FOOT))
}

/// Forecast job for one item's history.
#[derive(Debug, Clone)]
pub struct ConsumptionForecastJob {
    item: String,
    history: Vec<MovementRecord>,
    config: ForecastConfig,
}

impl ConsumptionForecastJob {
    pub fn new(item: impl Into<String>, history: Vec<MovementRecord>) -> Self {
        Self {
            item: item.into(),
            history,
            config: ForecastConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ForecastConfig) -> Self {
        self.config = config;
        self
    }
}

impl AiJob for ConsumptionForecastJob {
    type Input = Vec<MovementRecord>;

    fn kind(&self) -> &'static str {
        "inventory.consumption_forecast"
    }

    fn input(&self) -> &Self::Input {
        &self.history
    }

    fn run(&self) -> Result<AiResult, AiError> {
        self.config.validate()?;

        match forecast_with(&self.history, &self.config) {
            ForecastOutcome::Forecast(result) => {
                let explanation = format!(
                    "item {}: {} month(s) of removals, average {} ({}) per month, next month {} ({}) at {}% confidence",
                    self.item,
                    result.months_of_history,
                    result.monthly_average,
                    result.monthly_average_imperial,
                    result.next_period_prediction,
                    result.prediction_imperial,
                    result.confidence_percent
                );
                Ok(AiResult::new(
                    result.next_period_prediction.meters(),
                    f64::from(result.confidence_percent) / 100.0,
                )
                .with_explanation(explanation)
                .with_metadata(json!({
                    "kind": self.kind(),
                    "item": self.item,
                    "buffer_factor": self.config.buffer_factor,
                    "forecast": result,
                })))
            }
            ForecastOutcome::NoHistory => Ok(AiResult::new(0.0, 0.0)
                .with_explanation(format!("item {}: no removal history", self.item))
                .with_metadata(json!({
                    "kind": self.kind(),
                    "item": self.item,
                    "forecast": null,
                }))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{AiScheduler, LocalAiScheduler};
    use steelerp_events::MovementAction;

    // 3' 3 3/8" is 1.000 m and 9' 10 1/8" is 3.000 m once rounded.
    const ONE_METER: &str = "3' 3 3/8\"";
    const THREE_METERS: &str = "9' 10 1/8\"";

    fn removal(timestamp: &str, quantity: &str) -> MovementRecord {
        MovementRecord::new(timestamp, MovementAction::Remove, quantity, "")
    }

    #[test]
    fn two_months_average_and_buffer() {
        let history = vec![
            removal("2025-01-10 08:00:00", ONE_METER),
            removal("2025-02-03 16:45:00", THREE_METERS),
        ];

        let result = forecast(&history).into_forecast().unwrap();
        assert_eq!(result.monthly_average.meters(), 2.0);
        assert_eq!(result.next_period_prediction.meters(), 2.2);
        assert_eq!(result.confidence_percent, 20);
        assert_eq!(result.months_of_history, 2);
        assert_eq!(result.monthly_average_imperial, "6' 6 3/4\"");
        assert_eq!(result.prediction_imperial, "7' 2 5/8\"");
        assert_eq!(result.monthly_totals[0].label(), "2025-01");
        assert_eq!(result.monthly_totals[1].label(), "2025-02");
    }

    #[test]
    fn same_month_removals_are_summed() {
        let history = vec![
            removal("2025-01-02 08:00:00", ONE_METER),
            removal("2025-01-28 08:00:00", ONE_METER),
            removal("2025-01-30 08:00:00", ONE_METER),
        ];
        let trends = analyze_trends(&history);
        assert_eq!(trends.len(), 1);
        assert!((trends[0].meters - 3.0).abs() < 1e-9);

        let result = forecast(&history).into_forecast().unwrap();
        assert_eq!(result.confidence_percent, 10);
        assert_eq!(result.monthly_average.meters(), 3.0);
    }

    #[test]
    fn only_removals_count() {
        let history = vec![
            MovementRecord::new("2025-01-01 00:00:00", MovementAction::Create, "100' 0\"", ""),
            MovementRecord::new("2025-01-05 00:00:00", MovementAction::Add, "50' 0\"", ""),
            MovementRecord::new("2025-01-06 00:00:00", MovementAction::ReserveNew, "5' 0\"", ""),
            MovementRecord::new("2025-01-07 00:00:00", MovementAction::Adjust, "20' 0\"", ""),
        ];
        assert_eq!(forecast(&history), ForecastOutcome::NoHistory);
        assert_eq!(forecast(&[]), ForecastOutcome::NoHistory);
    }

    #[test]
    fn legacy_labels_count_as_removals() {
        let history = vec![MovementRecord::new(
            "2024-06-01 10:00:00",
            MovementAction::from_label("RETIRER"),
            ONE_METER,
            "Retrait manuel",
        )];
        let result = forecast(&history).into_forecast().unwrap();
        assert_eq!(result.monthly_average.meters(), 1.0);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let history = vec![
            removal("not a date", THREE_METERS),
            removal("2025-03-01 00:00:00", "garbage"),
            removal("2025-03-02 00:00:00", ONE_METER),
        ];
        let result = forecast(&history).into_forecast().unwrap();
        assert_eq!(result.months_of_history, 1);
        assert_eq!(result.monthly_average.meters(), 1.0);

        let only_bad = vec![removal("", ONE_METER)];
        assert_eq!(forecast(&only_bad), ForecastOutcome::NoHistory);
    }

    #[test]
    fn confidence_caps_at_one_hundred() {
        let history: Vec<_> = (1..=12)
            .map(|month| removal(&format!("2024-{month:02}-15 12:00:00"), ONE_METER))
            .collect();
        let result = forecast(&history).into_forecast().unwrap();
        assert_eq!(result.months_of_history, 12);
        assert_eq!(result.confidence_percent, 100);
    }

    #[test]
    fn months_group_by_year_too() {
        let history = vec![
            removal("2024-05-01 00:00:00", ONE_METER),
            removal("2025-05-01 00:00:00", ONE_METER),
        ];
        assert_eq!(analyze_trends(&history).len(), 2);
    }

    #[test]
    fn custom_config() {
        let history = vec![removal("2025-01-10 08:00:00", ONE_METER)];
        let config = ForecastConfig::default()
            .with_buffer_factor(1.5)
            .with_confidence_per_month(40);
        let result = forecast_with(&history, &config).into_forecast().unwrap();
        assert_eq!(result.next_period_prediction.meters(), 1.5);
        assert_eq!(result.confidence_percent, 40);
    }

    #[test]
    fn job_reports_prediction_and_confidence() {
        let history = vec![
            removal("2025-01-10 08:00:00", ONE_METER),
            removal("2025-02-03 16:45:00", THREE_METERS),
        ];
        let scheduler = LocalAiScheduler::default();
        let result = scheduler
            .run(ConsumptionForecastJob::new("TUBE-2X2", history))
            .unwrap();

        assert_eq!(result.score, 2.2);
        assert_eq!(result.confidence, 0.2);
        assert_eq!(result.metadata["kind"], "inventory.consumption_forecast");
        assert_eq!(result.metadata["forecast"]["confidence_percent"], 20);
        assert_eq!(
            result.metadata["forecast"]["prediction_imperial"],
            "7' 2 5/8\""
        );
        assert!(result.explanation.unwrap().contains("TUBE-2X2"));
    }

    #[test]
    fn job_without_history_is_not_an_error() {
        let result = ConsumptionForecastJob::new("EMPTY", Vec::new()).run().unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.confidence, 0.0);
        assert!(result.metadata["forecast"].is_null());
    }

    #[test]
    fn job_rejects_bad_config() {
        let job = ConsumptionForecastJob::new("X", Vec::new())
            .with_config(ForecastConfig::default().with_buffer_factor(f64::NAN));
        assert!(matches!(job.run(), Err(AiError::InvalidInput(_))));
    }

    #[test]
    fn batch_forecasts_many_items() {
        let jobs: Vec<_> = (0..20)
            .map(|i| {
                let history = if i % 2 == 0 {
                    vec![removal("2025-01-10 08:00:00", ONE_METER)]
                } else {
                    Vec::new()
                };
                ConsumptionForecastJob::new(format!("ITEM-{i}"), history)
            })
            .collect();
        let results = LocalAiScheduler::new("forecast").run_batch(jobs);
        for (i, result) in results.into_iter().enumerate() {
            let result = result.unwrap();
            let expected = if i % 2 == 0 { 0.1 } else { 0.0 };
            assert_eq!(result.confidence, expected);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use steelerp_measure::Measurement;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: confidence tracks the number of distinct months, capped at 100.
            #[test]
            fn confidence_is_ten_points_per_month(months in 1usize..40, per_month in 1usize..4) {
                let history: Vec<_> = (0..months)
                    .flat_map(|i| {
                        let timestamp = format!("{}-{:02}-10 09:00:00", 2000 + i / 12, i % 12 + 1);
                        (0..per_month).map(move |_| removal(&timestamp, ONE_METER))
                    })
                    .collect();

                let result = forecast(&history).into_forecast().unwrap();
                prop_assert_eq!(result.months_of_history, months);
                prop_assert_eq!(usize::from(result.confidence_percent), (months * 10).min(100));
            }

            /// Property: the prediction is the average plus the 10% buffer, within display rounding.
            #[test]
            fn prediction_is_buffered_average(
                parts in prop::collection::vec((0u64..200, 0u8..12, 0u8..8), 1..24)
            ) {
                let history: Vec<_> = parts
                    .iter()
                    .enumerate()
                    .map(|(i, &(feet, inches, eighths))| {
                        let qty = Measurement::new(feet, inches, eighths).unwrap().to_string();
                        removal(&format!("2024-{:02}-01 00:00:00", i % 12 + 1), &qty)
                    })
                    .collect();

                let result = forecast(&history).into_forecast().unwrap();
                let average = result.monthly_average.meters();
                let prediction = result.next_period_prediction.meters();
                prop_assert!(result.months_of_history <= 12);
                prop_assert!((prediction - average * 1.10).abs() <= 0.0015);
                prop_assert!(prediction >= average);
            }
        }
    }
}
