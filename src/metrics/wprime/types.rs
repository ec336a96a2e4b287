//! W' balance result types.

use serde::{Deserialize, Serialize};

/// Parameters the balance model ran with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Critical Power in watts.
    pub cp: f64,
    /// W' (anaerobic capacity) in joules.
    pub w_prime: f64,
    /// Recovery time constant in whole seconds, `None` when depletion was
    /// not modelled.
    pub tau: Option<u32>,
}

/// Second-by-second W' balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSeries {
    /// Time axis in minutes (`i / 60`).
    pub minutes: Vec<f64>,
    /// Remaining W' in joules.
    pub joules: Vec<f64>,
    /// Lowest balance over the ride (0 when empty).
    pub min_balance: f64,
    /// Highest balance over the ride (0 when empty).
    pub max_balance: f64,
    /// Seconds spent with W' fully exhausted (negative balance).
    pub seconds_below_zero: u32,
}

impl BalanceSeries {
    /// Number of seconds covered.
    pub fn len(&self) -> usize {
        self.joules.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.joules.is_empty()
    }

    /// Balance at a given second.
    pub fn at(&self, second: usize) -> Option<f64> {
        self.joules.get(second).copied()
    }
}

/// A discrete above-CP effort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// First second of the effort.
    pub start: usize,
    /// Last second the raw power was at or above CP.
    pub stop: usize,
    /// `stop - start + 1`.
    pub duration_secs: usize,
    /// W' spent between start and stop, in joules.
    pub cost_joules: f64,
}

/// Start/stop points of significant matches, for chart annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerSeries {
    /// Marker positions in minutes.
    pub minutes: Vec<f64>,
    /// Balance at each marker in joules.
    pub joules: Vec<f64>,
}

impl MarkerSeries {
    /// Append a marker point.
    pub fn push(&mut self, minute: f64, joules: f64) {
        self.minutes.push(minute);
        self.joules.push(joules);
    }

    /// Iterate over `(minute, joules)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.minutes.iter().copied().zip(self.joules.iter().copied())
    }

    /// Number of marker points (two per significant match).
    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    /// Check if there are no markers.
    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }
}

/// Everything the model computes for one ride.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WPrimeAnalysis {
    /// Parameters used.
    pub parameters: ModelParameters,
    /// W' balance per second.
    pub balance: BalanceSeries,
    /// Detected matches, ordered by start.
    pub matches: Vec<Match>,
    /// Annotation points for significant matches.
    pub markers: MarkerSeries,
}

impl WPrimeAnalysis {
    /// The result for a ride with nothing to compute.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there was no usable power data.
    pub fn is_empty(&self) -> bool {
        self.balance.is_empty()
    }

    /// Lowest W' balance in kilojoules.
    pub fn min_balance_kj(&self) -> f64 {
        self.balance.min_balance / 1000.0
    }

    /// Total W' cost of all matches in joules.
    pub fn total_match_cost(&self) -> f64 {
        self.matches.iter().map(|m| m.cost_joules).sum()
    }
}
