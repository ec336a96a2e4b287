//! Unit tests for zone lookup and CP/W' resolution.

use chrono::NaiveDate;
use wbal::metrics::wprime::params::{resolve, ParameterSource};
use wbal::metrics::zones::{CpZoneRange, ZoneHistory, ZoneProvider};
use wbal::storage::config::ModelSettings;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Provider with fixed values for every date, for testing the trait seam.
struct FixedZones {
    cp: f64,
    w_prime: f64,
}

impl ZoneProvider for FixedZones {
    fn which_range(&self, _date: NaiveDate) -> Option<usize> {
        Some(0)
    }

    fn cp(&self, _range: usize) -> f64 {
        self.cp
    }

    fn w_prime(&self, _range: usize) -> f64 {
        self.w_prime
    }
}

#[test]
fn test_both_fallbacks_distinct() {
    let settings = ModelSettings::default();
    let zones = ZoneHistory::single(date(2024, 1, 1), 280, 24000);

    let no_provider = resolve(None, date(2023, 1, 1), &settings);
    let no_range = resolve(Some(&zones), date(2023, 1, 1), &settings);

    assert_eq!((no_provider.cp, no_provider.w_prime), (250.0, 0.0));
    assert_eq!((no_range.cp, no_range.w_prime), (0.0, 0.0));
    assert_eq!(no_provider.source, ParameterSource::NoProvider);
    assert_eq!(no_range.source, ParameterSource::NoRange);
}

#[test]
fn test_configured_fallback() {
    let settings = ModelSettings {
        fallback_cp: 300.0,
        fallback_w_prime: 15000.0,
        ..ModelSettings::default()
    };
    let params = resolve(None, date(2024, 1, 1), &settings);
    assert_eq!((params.cp, params.w_prime), (300.0, 15000.0));
}

#[test]
fn test_custom_provider() {
    let zones = FixedZones {
        cp: 312.0,
        w_prime: 17500.0,
    };
    let params = resolve(Some(&zones), date(2024, 8, 8), &ModelSettings::default());
    assert_eq!((params.cp, params.w_prime), (312.0, 17500.0));
    assert_eq!(params.source, ParameterSource::Range(0));
}

#[test]
fn test_history_picks_range_by_date() {
    let zones = ZoneHistory::from_ranges(vec![
        CpZoneRange {
            start: date(2024, 1, 1),
            end: Some(date(2024, 4, 1)),
            cp: 240,
            w_prime: 19000,
        },
        CpZoneRange {
            start: date(2024, 4, 1),
            end: Some(date(2024, 9, 1)),
            cp: 262,
            w_prime: 21000,
        },
    ])
    .unwrap();

    let spring = resolve(Some(&zones), date(2024, 3, 31), &ModelSettings::default());
    let summer = resolve(Some(&zones), date(2024, 7, 14), &ModelSettings::default());
    let autumn = resolve(Some(&zones), date(2024, 9, 1), &ModelSettings::default());

    assert_eq!(spring.cp, 240.0);
    assert_eq!(summer.cp, 262.0);
    assert_eq!(summer.w_prime, 21000.0);
    assert_eq!(autumn.source, ParameterSource::NoRange);
}
