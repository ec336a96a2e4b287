//! Gap-aware resampling of raw power samples.

use crate::recording::PowerSample;

/// Resampled power knots covering seconds `0..=last_second`.
///
/// Missing recording steps (dropouts, and the span before the first sample)
/// are filled with zero-power knots: no signal is treated as coasting. For a
/// 1-second recording every second is a knot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseSeries {
    seconds: Vec<f64>,
    watts: Vec<f64>,
}

impl DenseSeries {
    /// Number of seconds covered (`last_second + 1`), 0 when empty.
    pub fn len(&self) -> usize {
        self.last_second().map_or(0, |last| last + 1)
    }

    /// Check if there are no accepted samples.
    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    /// Final second of the series.
    pub fn last_second(&self) -> Option<usize> {
        self.seconds.last().map(|&s| s as usize)
    }

    /// Knot times in seconds.
    pub fn seconds(&self) -> &[f64] {
        &self.seconds
    }

    /// Knot power values.
    pub fn watts(&self) -> &[f64] {
        &self.watts
    }

    /// Number of knots.
    pub fn knot_count(&self) -> usize {
        self.seconds.len()
    }

    fn push(&mut self, second: u64, watts: f64) {
        self.seconds.push(second as f64);
        self.watts.push(watts);
    }
}

/// Resample raw samples onto the one-second grid.
///
/// Samples with a negative offset, or an offset that does not strictly
/// increase over the last accepted sample, are dropped. `expected_points` is
/// a capacity hint only.
pub fn resample(
    samples: &[PowerSample],
    recording_interval_secs: u32,
    expected_points: usize,
) -> DenseSeries {
    let step = u64::from(recording_interval_secs.max(1));
    let mut series = DenseSeries {
        seconds: Vec::with_capacity(expected_points),
        watts: Vec::with_capacity(expected_points),
    };
    let mut last: Option<u64> = None;
    let mut dropped = 0usize;

    for sample in samples {
        let Ok(secs) = u64::try_from(sample.offset_secs) else {
            dropped += 1;
            continue;
        };

        let fill_from = match last {
            Some(prev) if secs <= prev => {
                dropped += 1;
                continue;
            }
            Some(prev) => prev + step,
            None => 0,
        };

        let mut t = fill_from;
        while t < secs {
            series.push(t, 0.0);
            t += step;
        }

        series.push(secs, sample.watts);
        last = Some(secs);
    }

    if dropped > 0 {
        tracing::debug!("Resampler dropped {} out-of-order samples", dropped);
    }

    series
}
