//! Recorded ride types consumed by the W' balance model.
//!
//! A [`Ride`] is produced elsewhere (recorder, file import) and handed to the
//! model read-only. Only the power channel is modelled here.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single power reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSample {
    /// Seconds since ride start. Negative offsets are never accepted.
    pub offset_secs: i64,
    /// Power in watts
    pub watts: f64,
}

impl PowerSample {
    /// Create a new power sample.
    pub fn new(offset_secs: i64, watts: f64) -> Self {
        Self { offset_secs, watts }
    }
}

/// Which data channels a ride carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPresent {
    /// Power data is present
    pub watts: bool,
}

/// A completed ride as seen by the W' model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ride {
    /// Unique identifier
    pub id: Uuid,
    /// Ride start timestamp
    pub started_at: DateTime<Utc>,
    /// Recording interval in seconds
    pub recording_interval_secs: u32,
    /// Power samples in recording order
    pub samples: Vec<PowerSample>,
    /// Channels present in the recording
    pub data_present: DataPresent,
    /// Rider's local offset from UTC at the start, in seconds
    #[serde(default)]
    pub utc_offset_secs: i32,
}

impl Ride {
    /// Create an empty ride starting at the given time.
    pub fn new(started_at: DateTime<Utc>, recording_interval_secs: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at,
            recording_interval_secs,
            samples: Vec::new(),
            data_present: DataPresent::default(),
            utc_offset_secs: 0,
        }
    }

    /// Set the rider's local offset from UTC.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset_secs = offset.local_minus_utc();
        self
    }

    /// Create a ride from existing samples.
    ///
    /// Power is flagged present when any sample carries non-zero watts.
    pub fn from_samples(
        started_at: DateTime<Utc>,
        recording_interval_secs: u32,
        samples: Vec<PowerSample>,
    ) -> Self {
        let watts = samples.iter().any(|s| s.watts != 0.0);
        Self {
            samples,
            data_present: DataPresent { watts },
            ..Self::new(started_at, recording_interval_secs)
        }
    }

    /// Create a 1-second ride from consecutive per-second watts values.
    pub fn from_watts(started_at: DateTime<Utc>, watts: &[f64]) -> Self {
        let samples = watts
            .iter()
            .enumerate()
            .map(|(secs, &w)| PowerSample::new(secs as i64, w))
            .collect();
        Self::from_samples(started_at, 1, samples)
    }

    /// Append a sample, updating the power-present flag.
    pub fn push(&mut self, sample: PowerSample) {
        if sample.watts != 0.0 {
            self.data_present.watts = true;
        }
        self.samples.push(sample);
    }

    /// Local calendar date the ride started on, used for zone lookup.
    ///
    /// Falls back to the UTC date when the stored offset is out of range.
    pub fn date(&self) -> NaiveDate {
        match FixedOffset::east_opt(self.utc_offset_secs) {
            Some(offset) => self.started_at.with_timezone(&offset).date_naive(),
            None => self.started_at.date_naive(),
        }
    }

    /// Total number of recorded points.
    pub fn point_count(&self) -> usize {
        self.samples.len()
    }

    /// Whether the ride has anything the model can work with.
    pub fn has_power(&self) -> bool {
        !self.samples.is_empty() && self.data_present.watts
    }
}
