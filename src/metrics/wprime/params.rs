//! CP / W' resolution from a zone provider.

use chrono::NaiveDate;

use crate::metrics::zones::ZoneProvider;
use crate::storage::config::ModelSettings;

/// Where the resolved CP/W' came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSource {
    /// No zone provider was available; configured fallback used.
    NoProvider,
    /// The provider has no range for the ride date; CP and W' are zero.
    NoRange,
    /// Taken from the given zone range.
    Range(usize),
}

/// CP and W' in effect for a ride.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedParameters {
    /// Critical Power in watts
    pub cp: f64,
    /// W' in joules
    pub w_prime: f64,
    /// Resolution path taken
    pub source: ParameterSource,
}

/// Look up CP and W' for the ride date.
///
/// A missing provider and a provider without a matching range deliberately
/// fall back to different values: the configured fallback (CP 250 by
/// default) versus zero.
pub fn resolve(
    zones: Option<&dyn ZoneProvider>,
    date: NaiveDate,
    settings: &ModelSettings,
) -> ResolvedParameters {
    let Some(zones) = zones else {
        return ResolvedParameters {
            cp: settings.fallback_cp,
            w_prime: settings.fallback_w_prime,
            source: ParameterSource::NoProvider,
        };
    };

    match zones.which_range(date) {
        Some(range) => ResolvedParameters {
            cp: zones.cp(range),
            w_prime: zones.w_prime(range),
            source: ParameterSource::Range(range),
        },
        None => {
            tracing::debug!("No zone range covers {}, CP and W' set to zero", date);
            ResolvedParameters {
                cp: 0.0,
                w_prime: 0.0,
                source: ParameterSource::NoRange,
            }
        }
    }
}
