//! W' balance convolution.
//!
//! Balance at second `i` is W' minus the above-CP excess of the preceding
//! seconds, each weighted by `e^(-j / tau)` for its age `j`. History is capped
//! at the decay window (1200s by default); older efforts are treated as fully
//! recovered.

use super::cancel::CancelToken;
use super::types::BalanceSeries;
use crate::metrics::analytics::error::{AnalyticsError, AnalyticsResult};

/// Seconds between cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 512;

/// Above-CP excess for every second. Never negative.
pub fn excess_power(power: &[f64], cp: f64) -> Vec<f64> {
    power.iter().map(|&watts| (watts - cp).max(0.0)).collect()
}

/// Decay weights `e^(-j / tau)` for `j` in `0..window`.
pub fn decay_weights(tau: u32, window: usize) -> Vec<f64> {
    let tau = f64::from(tau.max(1));
    (0..window).map(|j| (-(j as f64) / tau).exp()).collect()
}

/// Compute the balance series.
///
/// With `tau` of `None` depletion is not modelled and every second holds
/// `w_prime`. Seconds are filled from the end of the ride backward; for
/// second `i` the sum covers `min(window, i)` terms, so second 0 is always
/// `w_prime`.
pub fn convolve(
    power: &[f64],
    cp: f64,
    w_prime: f64,
    tau: Option<u32>,
    window: usize,
    cancel: &CancelToken,
) -> AnalyticsResult<BalanceSeries> {
    let n = power.len();
    let mut joules = vec![w_prime; n];

    if let Some(tau) = tau {
        let excess = excess_power(power, cp);
        let weights = decay_weights(tau, window);

        for i in (0..n).rev() {
            if i % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
                return Err(AnalyticsError::Cancelled);
            }

            let terms = window.min(i);
            let sumproduct: f64 = excess[i + 1 - terms..=i]
                .iter()
                .rev()
                .zip(&weights)
                .map(|(e, w)| e * w)
                .sum();
            joules[i] = w_prime - sumproduct;
        }
    }

    Ok(summarize(joules))
}

/// Attach the time axis and extrema to balance values.
fn summarize(joules: Vec<f64>) -> BalanceSeries {
    let minutes = (0..joules.len()).map(|i| i as f64 / 60.0).collect();

    let (min_balance, max_balance) = if joules.is_empty() {
        (0.0, 0.0)
    } else {
        joules
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    };
    let seconds_below_zero = joules.iter().filter(|&&v| v < 0.0).count() as u32;

    BalanceSeries {
        minutes,
        joules,
        min_balance,
        max_balance,
        seconds_below_zero,
    }
}
