//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A length of
/// `3' 6 1/2"` is the same length wherever it appears; there is no identity to
/// track. To "modify" one, build a new value.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct MetricLength { meters: f64 }
///
/// impl ValueObject for MetricLength {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
