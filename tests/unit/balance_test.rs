//! Unit tests for the W' balance convolution and tau estimation.

use wbal::metrics::wprime::balance::{convolve, decay_weights};
use wbal::metrics::wprime::tau::{estimate_tau, MAX_TAU_SECS};
use wbal::metrics::wprime::CancelToken;
use wbal::storage::config::TauFallback;

fn run(power: &[f64], cp: f64, w_prime: f64, tau: u32) -> Vec<f64> {
    convolve(power, cp, w_prime, Some(tau), 1200, &CancelToken::new())
        .unwrap()
        .joules
}

#[test]
fn test_effort_visible_for_exactly_1200_seconds() {
    // Single 100 J excess at second 1
    let mut power = vec![0.0; 2000];
    power[1] = 350.0;
    let joules = run(&power, 250.0, 20000.0, 400);

    // Second 1200 sums seconds 1..=1200; second 1201 no longer reaches second 1
    let expected = 20000.0 - 100.0 * (-1199.0f64 / 400.0).exp();
    assert!((joules[1200] - expected).abs() < 1e-9);
    assert_eq!(joules[1201], 20000.0);
}

#[test]
fn test_early_seconds_only_see_the_past() {
    // Excess at second 0 is never summed: second i covers i-min(1200,i)+1..=i
    let mut power = vec![0.0; 50];
    power[0] = 1000.0;
    let joules = run(&power, 250.0, 20000.0, 400);
    assert!(joules.iter().all(|&v| v == 20000.0));
}

#[test]
fn test_constant_excess_after_window() {
    // With constant excess every window past 1200s sums the same 1200 terms
    let power = vec![300.0; 3000];
    let joules = run(&power, 250.0, 20000.0, 500);
    let full: f64 = decay_weights(500, 1200).iter().map(|w| 50.0 * w).sum();

    for i in [1200, 1800, 2999] {
        assert!((joules[i] - (20000.0 - full)).abs() < 1e-6, "second {}", i);
    }
    assert!(joules[1199] > joules[1200]);
}

#[test]
fn test_balance_never_exceeds_w_prime() {
    let power: Vec<f64> = (0..4000)
        .map(|i| ((i * 7919) % 600) as f64 - 50.0)
        .collect();
    let series = convolve(&power, 260.0, 18000.0, Some(450), 1200, &CancelToken::new()).unwrap();

    assert!(series.joules.iter().all(|&v| v <= 18000.0));
    assert!(series.max_balance <= 18000.0);
    assert!(series.min_balance < series.max_balance);
}

#[test]
fn test_tau_guard_never_nan() {
    let power = vec![400.0; 100];
    assert_eq!(
        estimate_tau(&power, 250.0, TauFallback::Maximum),
        Some(MAX_TAU_SECS)
    );

    let series = convolve(&power, 250.0, 20000.0, Some(MAX_TAU_SECS), 1200, &CancelToken::new())
        .unwrap();
    assert!(series.joules.iter().all(|v| v.is_finite()));

    let tau = estimate_tau(&power, 250.0, TauFallback::SkipDepletion);
    let series = convolve(&power, 250.0, 20000.0, tau, 1200, &CancelToken::new()).unwrap();
    assert!(series.joules.iter().all(|&v| v == 20000.0));
}

#[test]
fn test_tau_matches_formula() {
    let power: Vec<f64> = [vec![120.0; 600], vec![400.0; 120]].concat();
    // 546 * e^(-0.01 * 130) + 316 = 464.8
    assert_eq!(estimate_tau(&power, 250.0, TauFallback::Maximum), Some(464));
}
