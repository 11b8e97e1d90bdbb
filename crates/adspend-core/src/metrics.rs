//! Null-propagating arithmetic for derived efficiency metrics.
//!
//! Cost-per-click and cost-per-mille are undefined whenever their
//! denominator is absent or zero. [`Metric`] makes that explicit: it wraps a
//! possibly-absent `f64` and defines `/` and `*` so that null operands and
//! zero divisors resolve to null instead of panicking or producing
//! infinities.

use std::ops::{Div, Mul};

/// A possibly-absent metric value with null-propagating arithmetic.
///
/// # Examples
///
/// ```
/// use adspend_core::metrics::Metric;
///
/// let cpc = Metric::new(51.5) / Metric::from_count(Some(20));
/// assert_eq!(cpc.value(), Some(2.575));
///
/// // Zero or absent denominators are undefined, not errors.
/// assert!((Metric::new(51.5) / Metric::from_count(Some(0))).is_null());
/// assert!((Metric::new(51.5) / Metric::from_count(None)).is_null());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metric(Option<f64>);

impl Metric {
    /// The absent value.
    pub const NULL: Metric = Metric(None);

    /// Wrap a present value.
    pub fn new(value: f64) -> Self {
        Metric(Some(value))
    }

    /// Lift a nullable integer count (clicks, impressions) into a metric.
    pub fn from_count(count: Option<u64>) -> Self {
        Metric(count.map(|c| c as f64))
    }

    /// The inner value, `None` when null.
    pub fn value(self) -> Option<f64> {
        self.0
    }

    /// Whether the value is absent.
    pub fn is_null(self) -> bool {
        self.0.is_none()
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Metric::new(value)
    }
}

impl Div for Metric {
    type Output = Metric;

    /// Null if either operand is null or the divisor is zero.
    fn div(self, rhs: Metric) -> Metric {
        match (self.0, rhs.0) {
            (Some(n), Some(d)) if d != 0.0 => Metric(Some(n / d)),
            _ => Metric::NULL,
        }
    }
}

impl Mul<f64> for Metric {
    type Output = Metric;

    /// Null-propagating scaling (used for the ×1000 in cost-per-mille).
    fn mul(self, rhs: f64) -> Metric {
        Metric(self.0.map(|v| v * rhs))
    }
}
