//! Integration tests for cached and background W' computation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use wbal::metrics::worker::SharedZones;
use wbal::metrics::{BalanceCache, BalanceWorker};
use wbal::{Ride, WPrimeModel, ZoneHistory};

fn zones() -> ZoneHistory {
    ZoneHistory::single(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 250, 20000)
}

/// 3x5min at 110% CP with 5min recoveries.
fn intervals(minutes_warmup: usize) -> Ride {
    let mut watts = vec![160.0; minutes_warmup * 60];
    for _ in 0..3 {
        watts.extend(vec![275.0; 300]);
        watts.extend(vec![140.0; 300]);
    }
    Ride::from_watts(Utc.with_ymd_and_hms(2024, 6, 2, 17, 0, 0).unwrap(), &watts)
}

#[test]
fn test_cache_matches_direct_computation() {
    let model = WPrimeModel::default();
    let mut cache = BalanceCache::new(model.clone(), 8);
    let ride = intervals(10);
    let zones = zones();

    let cached = cache.get_or_compute(&ride, Some(&zones));
    assert_eq!(*cached, model.compute(&ride, Some(&zones)));

    let again = cache.get_or_compute(&ride, Some(&zones));
    assert!(Arc::ptr_eq(&cached, &again));
    assert_eq!((cache.hits(), cache.misses()), (1, 1));
}

#[test]
fn test_worker_uses_latest_ride() {
    let shared: SharedZones = Arc::new(zones());
    let worker = BalanceWorker::spawn(WPrimeModel::default(), Some(Arc::clone(&shared))).unwrap();

    let rides: Vec<Arc<Ride>> = (0..4).map(|i| Arc::new(intervals(10 + i * 30))).collect();
    for ride in &rides {
        worker.submit(Arc::clone(ride));
    }

    let latest = rides.last().unwrap();
    let outcome = loop {
        let outcome = worker
            .outcomes()
            .recv_timeout(Duration::from_secs(60))
            .expect("latest ride should complete");
        if outcome.ride_id == latest.id {
            break outcome;
        }
    };

    let expected = WPrimeModel::default().compute(latest, Some(&*shared));
    assert_eq!(*outcome.analysis, expected);
    assert_eq!(outcome.analysis.matches.len(), 3);
}
