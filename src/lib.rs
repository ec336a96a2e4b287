//! WBal - W' balance modelling for cycling power data
//!
//! Converts a recorded ride's power into a second-by-second estimate of the
//! rider's remaining anaerobic work capacity (W' balance) and finds the
//! discrete efforts ("matches") that spent it.

pub mod metrics;
pub mod recording;
pub mod storage;

// Re-export commonly used types
pub use metrics::wprime::{
    BalanceSeries, MarkerSeries, Match, ModelParameters, WPrimeAnalysis, WPrimeModel,
};
pub use metrics::zones::{ZoneHistory, ZoneProvider};
pub use recording::{PowerSample, Ride};
pub use storage::config::WPrimeConfig;
