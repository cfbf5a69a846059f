//! `steelerp-measure` — imperial/metric length handling for stock quantities.
//!
//! Every quantity typed by a user (stock, minimum, reservation) goes through
//! [`validate_measurement`] before it is stored. The result is a canonical
//! `F' I N/D"` string, precise to the eighth of an inch:
//!
//! ```text
//! raw text ──► MeasurementInput::classify ──┬─ Code ──► code::decode ─────────────┐
//!                                           │          (rejected: fall through)   │
//!                                           └─ FreeForm ──► parser ──► DecimalFeet ┤
//!                                                                                 ▼
//!                                                   Measurement ──► "3' 6 1/2\""
//! ```
//!
//! Metric values ([`MetricLength`]) are derived for display only.
//!
//! Everything here is pure and synchronous; functions can be called from any
//! number of threads.

pub mod batch;
pub mod code;
pub mod error;
pub mod format;
pub mod fraction;
pub mod measurement;
pub mod metric;
pub mod parser;
pub mod validate;

pub use batch::validate_batch;
pub use error::{MeasureError, MeasureResult};
pub use format::format_decimal_feet;
pub use measurement::{DecimalFeet, Measurement};
pub use metric::{MetricLength, from_metric, to_metric, to_metric_display};
pub use parser::parse_free_form;
pub use validate::{MeasurementInput, measure, parse_canonical, validate_measurement};
