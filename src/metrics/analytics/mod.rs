//! Ride metrics derived from the W' model.

pub mod error;
pub mod min_wprime;

pub use error::{AnalyticsError, AnalyticsResult};
pub use min_wprime::{MetricKind, MinWPrime};
