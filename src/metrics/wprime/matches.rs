//! Match detection: discrete above-CP efforts that cost measurable W'.

use super::types::{BalanceSeries, MarkerSeries, Match};
use crate::metrics::smoothing::trailing_average;
use crate::storage::config::MatchSettings;

/// Find matches in per-second power against a computed balance series.
///
/// A match opens when either the raw or the rolling-average power reaches
/// CP and closes once both fall below it. The rolling average bridges short
/// dips; its trailing decay is then trimmed off using raw power alone, so
/// `stop` is the last second raw power was still at or above CP. A match
/// that never closes before the ride ends is discarded.
pub fn detect_matches(
    raw: &[f64],
    balance: &BalanceSeries,
    cp: f64,
    settings: &MatchSettings,
) -> (Vec<Match>, MarkerSeries) {
    let smooth = trailing_average(raw, settings.smoothing_secs);
    let n = raw.len().min(balance.len());

    let mut matches = Vec::new();
    let mut open: Option<usize> = None;

    for i in 0..n {
        match open {
            None if raw[i] >= cp || smooth[i] >= cp => open = Some(i),
            Some(start) if raw[i] < cp && smooth[i] < cp => {
                matches.extend(close_match(raw, balance, cp, start, i, settings));
                open = None;
            }
            _ => {}
        }
    }

    let markers = significant_markers(&matches, balance, settings.significant_cost_joules);
    (matches, markers)
}

/// Trim a candidate closed at `closed_at` and keep it if it is worth noting.
fn close_match(
    raw: &[f64],
    balance: &BalanceSeries,
    cp: f64,
    start: usize,
    closed_at: usize,
    settings: &MatchSettings,
) -> Option<Match> {
    let mut stop = closed_at.checked_sub(1)?;
    while stop > start && raw[stop] < cp {
        stop -= 1;
    }
    if stop <= start {
        return None;
    }

    let cost_joules = balance.joules[start] - balance.joules[stop];
    if cost_joules < settings.min_cost_joules {
        return None;
    }

    Some(Match {
        start,
        stop,
        duration_secs: stop - start + 1,
        cost_joules,
    })
}

/// Start and stop points of every match costing at least `threshold`.
fn significant_markers(matches: &[Match], balance: &BalanceSeries, threshold: f64) -> MarkerSeries {
    let mut markers = MarkerSeries::default();
    for m in matches.iter().filter(|m| m.cost_joules >= threshold) {
        markers.push(balance.minutes[m.start], balance.joules[m.start]);
        markers.push(balance.minutes[m.stop], balance.joules[m.stop]);
    }
    markers
}
