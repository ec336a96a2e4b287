//! W' balance model.
//!
//! Implements Skiba's W' expenditure and reconstitution model ("Modeling the
//! Expenditure and Reconstitution of Work Capacity above Critical Power",
//! Med Sci Sports Exerc 2012) over a recorded ride:
//!
//! 1. Resample raw samples onto a one-second grid, zero-filling dropouts
//! 2. Fit a natural cubic spline and evaluate it every second
//! 3. Resolve CP and W' for the ride date
//! 4. Estimate tau from average sub-CP power
//! 5. Convolve above-CP excess with an exponential decay over 20 minutes
//! 6. Detect matches (discrete efforts) and their W' cost
//!
//! Every call returns a fresh [`WPrimeAnalysis`]; nothing is kept between
//! rides.

pub mod balance;
pub mod cancel;
pub mod matches;
pub mod params;
pub mod resample;
pub mod tau;
pub mod types;

use std::time::Instant;

pub use cancel::CancelToken;
pub use params::{ParameterSource, ResolvedParameters};
pub use resample::DenseSeries;
pub use tau::MAX_TAU_SECS;
pub use types::{BalanceSeries, MarkerSeries, Match, ModelParameters, WPrimeAnalysis};

use super::analytics::error::AnalyticsResult;
use super::spline::NaturalSpline;
use super::zones::ZoneProvider;
use crate::recording::Ride;
use crate::storage::config::WPrimeConfig;

/// W' balance calculator.
#[derive(Debug, Clone, Default)]
pub struct WPrimeModel {
    config: WPrimeConfig,
}

impl WPrimeModel {
    /// Create a model with the given configuration.
    pub fn new(config: WPrimeConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &WPrimeConfig {
        &self.config
    }

    /// Resolve CP and W' for a ride without running the model.
    pub fn resolve_parameters(
        &self,
        ride: &Ride,
        zones: Option<&dyn ZoneProvider>,
    ) -> ResolvedParameters {
        params::resolve(zones, ride.date(), &self.config.model)
    }

    /// Run the full model over a ride.
    ///
    /// A ride without power data yields [`WPrimeAnalysis::empty`].
    pub fn compute(&self, ride: &Ride, zones: Option<&dyn ZoneProvider>) -> WPrimeAnalysis {
        match self.compute_cancellable(ride, zones, &CancelToken::new()) {
            Ok(analysis) => analysis,
            // A fresh token is never cancelled
            Err(_) => WPrimeAnalysis::empty(),
        }
    }

    /// Run the full model, giving up with `AnalyticsError::Cancelled` once
    /// `cancel` is set.
    pub fn compute_cancellable(
        &self,
        ride: &Ride,
        zones: Option<&dyn ZoneProvider>,
        cancel: &CancelToken,
    ) -> AnalyticsResult<WPrimeAnalysis> {
        if !ride.has_power() {
            return Ok(WPrimeAnalysis::empty());
        }

        let started = Instant::now();

        let dense = resample::resample(
            &ride.samples,
            ride.recording_interval_secs,
            ride.point_count(),
        );
        let Some(last_second) = dense.last_second() else {
            return Ok(WPrimeAnalysis::empty());
        };

        let spline = NaturalSpline::new(dense.seconds().to_vec(), dense.watts().to_vec());
        let power = spline.sample_seconds(last_second);

        let resolved = self.resolve_parameters(ride, zones);
        let tau = tau::estimate_tau(&power, resolved.cp, self.config.model.tau_fallback);
        let parameters = ModelParameters {
            cp: resolved.cp,
            w_prime: resolved.w_prime,
            tau,
        };

        let balance = balance::convolve(
            &power,
            parameters.cp,
            parameters.w_prime,
            parameters.tau,
            self.config.model.decay_window_secs,
            cancel,
        )?;

        let (matches, markers) =
            matches::detect_matches(&power, &balance, parameters.cp, &self.config.matches);

        tracing::debug!(
            "W' balance for ride {}: {} seconds, CP {} W' {} tau {:?} ({:?}), {} matches in {:?}",
            ride.id,
            balance.len(),
            parameters.cp,
            parameters.w_prime,
            parameters.tau,
            resolved.source,
            matches.len(),
            started.elapsed()
        );

        Ok(WPrimeAnalysis {
            parameters,
            balance,
            matches,
            markers,
        })
    }
}

/// Run the model with default configuration.
pub fn compute(ride: &Ride, zones: Option<&dyn ZoneProvider>) -> WPrimeAnalysis {
    WPrimeModel::default().compute(ride, zones)
}
