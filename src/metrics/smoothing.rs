//! Power smoothing.

/// Trailing rolling average over a per-second series.
///
/// `out[i]` is the mean of `values[i + 1 - window..=i]`. Seconds before the
/// first full window keep their own value, and a series shorter than the
/// window is returned unchanged. The running total is slid backward from the
/// end of the series, so the cost is O(n) regardless of window size.
pub fn trailing_average(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = values.to_vec();
    let n = values.len();
    if window <= 1 || n < window {
        return out;
    }

    let divisor = window as f64;
    let mut total: f64 = values[n - window..].iter().sum();

    for i in (window - 1..n).rev() {
        out[i] = total / divisor;
        total -= values[i];
        if i >= window {
            total += values[i - window];
        }
    }

    out
}
