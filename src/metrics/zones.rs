//! Critical power zone ranges.
//!
//! The W' model asks a [`ZoneProvider`] which CP/W' applied on the ride's
//! date. [`ZoneHistory`] is a dated list of ranges, loadable from TOML.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::storage::config::ConfigError;

/// Source of a rider's CP and W' by date.
pub trait ZoneProvider {
    /// Index of the range covering `date`, if any.
    fn which_range(&self, date: NaiveDate) -> Option<usize>;

    /// Critical power in watts for a range.
    fn cp(&self, range: usize) -> f64;

    /// W' in joules for a range.
    fn w_prime(&self, range: usize) -> f64;
}

/// CP/W' values in effect from a start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpZoneRange {
    /// First day the range applies (inclusive)
    pub start: NaiveDate,
    /// Day the range stops applying (exclusive), open-ended if absent
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// Critical Power in watts
    pub cp: u16,
    /// W' in joules
    pub w_prime: u32,
}

impl CpZoneRange {
    /// Check whether the range covers a date.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |end| date < end)
    }
}

/// Ordered, non-overlapping CP/W' history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneHistory {
    ranges: Vec<CpZoneRange>,
}

impl ZoneHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Create a history from ranges, sorting them by start date.
    ///
    /// Fails if any range ends before it starts or two ranges overlap.
    pub fn from_ranges(mut ranges: Vec<CpZoneRange>) -> AnalyticsResult<Self> {
        ranges.sort_by_key(|r| r.start);

        for range in &ranges {
            if let Some(end) = range.end {
                if end <= range.start {
                    return Err(AnalyticsError::InvalidInput(format!(
                        "Zone range starting {} ends on or before its start",
                        range.start
                    )));
                }
            }
        }

        for pair in ranges.windows(2) {
            let overlaps = pair[0].end.map_or(true, |end| end > pair[1].start);
            if overlaps {
                return Err(AnalyticsError::InvalidInput(format!(
                    "Zone ranges starting {} and {} overlap",
                    pair[0].start, pair[1].start
                )));
            }
        }

        Ok(Self { ranges })
    }

    /// Create a history holding a single open-ended range.
    pub fn single(start: NaiveDate, cp: u16, w_prime: u32) -> Self {
        Self {
            ranges: vec![CpZoneRange {
                start,
                end: None,
                cp,
                w_prime,
            }],
        }
    }

    /// Load and validate a history from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let raw: ZoneHistory =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_ranges(raw.ranges).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// All ranges, sorted by start date.
    pub fn ranges(&self) -> &[CpZoneRange] {
        &self.ranges
    }

    /// Check if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl ZoneProvider for ZoneHistory {
    fn which_range(&self, date: NaiveDate) -> Option<usize> {
        self.ranges.iter().position(|r| r.contains(date))
    }

    fn cp(&self, range: usize) -> f64 {
        self.ranges.get(range).map_or(0.0, |r| r.cp as f64)
    }

    fn w_prime(&self, range: usize) -> f64 {
        self.ranges.get(range).map_or(0.0, |r| r.w_prime as f64)
    }
}
