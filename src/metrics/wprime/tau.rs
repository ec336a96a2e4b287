//! Recovery time constant estimation.
//!
//! Tau follows Skiba's fit against the gap between CP and the average power
//! while recovering: `546 * e^(-0.01 * (CP - avg_below_cp)) + 316`.

use crate::storage::config::TauFallback;

/// Largest tau the formula produces, reached as the sub-CP average
/// approaches CP.
pub const MAX_TAU_SECS: u32 = 862;

/// Estimate tau from per-second power, truncated to whole seconds.
///
/// Only seconds strictly below CP count towards the recovery average. When
/// there are none the fallback policy applies: `Maximum` yields
/// [`MAX_TAU_SECS`], `SkipDepletion` yields `None`.
pub fn estimate_tau(power: &[f64], cp: f64, fallback: TauFallback) -> Option<u32> {
    let (total, count) = power
        .iter()
        .filter(|&&watts| watts < cp)
        .fold((0.0, 0usize), |(total, count), &watts| (total + watts, count + 1));

    if count == 0 {
        tracing::debug!("No power below CP {}, tau fallback {}", cp, fallback);
        return match fallback {
            TauFallback::Maximum => Some(MAX_TAU_SECS),
            TauFallback::SkipDepletion => None,
        };
    }

    let avg_below_cp = total / count as f64;
    let tau = 546.0 * (-0.01 * (cp - avg_below_cp)).exp() + 316.0;

    Some(tau.floor() as u32)
}
