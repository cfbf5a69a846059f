//! `steelerp-ai`
//!
//! **Responsibility:** insight jobs over inventory history.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not depend on ERP aggregates (Inventory/Sales/etc).
//! - It must not mutate domain state.
//! - It emits **insights/results**, not domain events.
//!
//! Inputs are plain movement histories supplied by the caller.

pub mod forecast;
pub mod job;
pub mod result;
pub mod scheduler;

pub use forecast::{
    ConsumptionForecastJob, ForecastConfig, ForecastOutcome, ForecastResult, MonthlyConsumption,
    analyze_trends, forecast, forecast_with,
};
pub use job::AiJob;
pub use result::{AiError, AiResult};
pub use scheduler::{AiScheduler, LocalAiScheduler};
