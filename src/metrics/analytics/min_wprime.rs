//! Minimum W' ride metric.
//!
//! Runs the full balance model solely to report how deep into W' the rider
//! went, in kilojoules.

use serde::{Deserialize, Serialize};

use crate::metrics::wprime::WPrimeModel;
use crate::metrics::zones::ZoneProvider;
use crate::recording::Ride;

/// Whether higher or lower values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    /// Lower values represent the notable extreme.
    Low,
    /// Higher values represent the notable extreme.
    High,
}

/// Minimum W' balance over a ride.
#[derive(Debug, Clone, Default)]
pub struct MinWPrime {
    model: WPrimeModel,
}

impl MinWPrime {
    /// Stable identifier for the metric.
    pub const SYMBOL: &'static str = "skiba_wprime_low";
    /// Display name.
    pub const NAME: &'static str = "Minimum W'";
    /// Unit, both metric and imperial.
    pub const UNITS: &'static str = "kJ";
    /// Decimal places shown.
    pub const PRECISION: usize = 1;
    /// Metric direction.
    pub const KIND: MetricKind = MetricKind::Low;

    /// Create with a specific model.
    pub fn new(model: WPrimeModel) -> Self {
        Self { model }
    }

    /// Minimum W' balance in kJ. 0 for a missing ride or one without power.
    pub fn compute(&self, ride: Option<&Ride>, zones: Option<&dyn ZoneProvider>) -> f64 {
        ride.map_or(0.0, |ride| self.model.compute(ride, zones).min_balance_kj())
    }

    /// Per-ride minima cannot be combined into a meaningful aggregate.
    pub fn can_aggregate(&self) -> bool {
        false
    }

    /// Format a value at the metric precision.
    pub fn format(value: f64) -> String {
        format!("{:.*} {}", Self::PRECISION, value, Self::UNITS)
    }
}
