//! Recording module: the ride data the model consumes.

pub mod types;

pub use types::{DataPresent, PowerSample, Ride};
