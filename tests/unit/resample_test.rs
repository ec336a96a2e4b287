//! Unit tests for resampling and spline smoothing of raw power.

use wbal::metrics::spline::NaturalSpline;
use wbal::metrics::wprime::resample::resample;
use wbal::PowerSample;

fn samples(points: &[(i64, f64)]) -> Vec<PowerSample> {
    points
        .iter()
        .map(|&(secs, watts)| PowerSample::new(secs, watts))
        .collect()
}

#[test]
fn test_dense_length_matches_last_second() {
    let series = resample(&samples(&[(0, 200.0), (1, 210.0), (7, 220.0)]), 1, 3);
    assert_eq!(series.len(), 8);
    assert_eq!(series.last_second(), Some(7));

    let spline = NaturalSpline::new(series.seconds().to_vec(), series.watts().to_vec());
    let per_second = spline.sample_seconds(7);
    assert_eq!(per_second.len(), series.len());
}

#[test]
fn test_one_second_recording_is_identity() {
    let watts = [0.0, 180.0, 420.0, 390.0, 0.0, 0.0, 260.0, 250.0];
    let raw: Vec<(i64, f64)> = watts.iter().enumerate().map(|(i, &w)| (i as i64, w)).collect();
    let series = resample(&samples(&raw), 1, raw.len());

    let spline = NaturalSpline::new(series.seconds().to_vec(), series.watts().to_vec());
    assert_eq!(spline.sample_seconds(watts.len() - 1), watts.to_vec());
}

#[test]
fn test_dropout_reads_as_zero_power() {
    let series = resample(&samples(&[(0, 300.0), (1, 300.0), (6, 300.0)]), 1, 3);
    let spline = NaturalSpline::new(series.seconds().to_vec(), series.watts().to_vec());
    let per_second = spline.sample_seconds(6);

    for (second, watts) in per_second.iter().enumerate().take(6).skip(2) {
        assert_eq!(*watts, 0.0, "second {} should be zero-filled", second);
    }
}

#[test]
fn test_coarse_recording_interpolated_every_second() {
    let series = resample(&samples(&[(0, 100.0), (5, 200.0), (10, 300.0), (15, 400.0)]), 5, 4);
    assert_eq!(series.knot_count(), 4);
    assert_eq!(series.len(), 16);

    let spline = NaturalSpline::new(series.seconds().to_vec(), series.watts().to_vec());
    let per_second = spline.sample_seconds(15);
    assert_eq!(per_second.len(), 16);

    // Linear knots give a linear curve
    for (second, watts) in per_second.iter().enumerate() {
        let expected = 100.0 + 20.0 * second as f64;
        assert!((watts - expected).abs() < 1e-9, "second {}", second);
    }
}

#[test]
fn test_single_sample() {
    let series = resample(&samples(&[(0, 320.0)]), 1, 1);
    assert_eq!(series.len(), 1);

    let spline = NaturalSpline::new(series.seconds().to_vec(), series.watts().to_vec());
    assert_eq!(spline.sample_seconds(0), vec![320.0]);
}
