//! Metrics module: W' balance model, smoothing and zone lookup.

pub mod analytics;
pub mod cache;
pub mod smoothing;
pub mod spline;
pub mod worker;
pub mod wprime;
pub mod zones;

pub use cache::BalanceCache;
pub use worker::{BalanceOutcome, BalanceWorker};
pub use wprime::{WPrimeAnalysis, WPrimeModel};
pub use zones::{CpZoneRange, ZoneHistory, ZoneProvider};

// Re-export key analytics types for convenience
pub use analytics::{AnalyticsError, AnalyticsResult, MinWPrime};
