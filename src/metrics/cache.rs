//! Memoized W' analyses.
//!
//! The convolution is expensive on long rides, so results are cached per
//! ride. Each cache owns the model it computes with, and a cached entry is
//! reused only while both the ride's samples and the CP/W' resolved for it
//! are unchanged.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uuid::Uuid;

use super::wprime::{WPrimeAnalysis, WPrimeModel};
use super::zones::ZoneProvider;
use crate::recording::Ride;

/// Identity of a cached analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Ride identifier
    pub ride_id: Uuid,
    /// Hash of the ride's recording interval and samples
    pub fingerprint: u64,
    /// Resolved CP (bit pattern)
    pub cp_bits: u64,
    /// Resolved W' (bit pattern)
    pub w_prime_bits: u64,
}

impl CacheKey {
    /// Build the key for a ride under the given model and zones.
    pub fn for_ride(model: &WPrimeModel, ride: &Ride, zones: Option<&dyn ZoneProvider>) -> Self {
        let resolved = model.resolve_parameters(ride, zones);
        Self {
            ride_id: ride.id,
            fingerprint: fingerprint(ride),
            cp_bits: resolved.cp.to_bits(),
            w_prime_bits: resolved.w_prime.to_bits(),
        }
    }
}

/// Hash everything in the ride the model reads.
fn fingerprint(ride: &Ride) -> u64 {
    let mut hasher = DefaultHasher::new();
    ride.recording_interval_secs.hash(&mut hasher);
    ride.data_present.watts.hash(&mut hasher);
    for sample in &ride.samples {
        sample.offset_secs.hash(&mut hasher);
        sample.watts.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

/// Bounded cache of analyses, evicting the oldest entry first.
#[derive(Debug)]
pub struct BalanceCache {
    model: WPrimeModel,
    entries: HashMap<CacheKey, Arc<WPrimeAnalysis>>,
    /// Insertion order for eviction
    order: VecDeque<CacheKey>,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl BalanceCache {
    /// Create a cache holding at most `max_entries` analyses computed by `model`.
    pub fn new(model: WPrimeModel, max_entries: usize) -> Self {
        Self {
            model,
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached analysis for a ride, computing it if needed.
    pub fn get_or_compute(
        &mut self,
        ride: &Ride,
        zones: Option<&dyn ZoneProvider>,
    ) -> Arc<WPrimeAnalysis> {
        let key = CacheKey::for_ride(&self.model, ride, zones);

        if let Some(analysis) = self.entries.get(&key) {
            self.hits += 1;
            tracing::debug!("W' cache hit for ride {}", ride.id);
            return Arc::clone(analysis);
        }

        self.misses += 1;
        tracing::debug!("W' cache miss for ride {}", ride.id);

        let analysis = Arc::new(self.model.compute(ride, zones));
        self.insert(key, Arc::clone(&analysis));
        analysis
    }

    /// Model the cache computes with.
    pub fn model(&self) -> &WPrimeModel {
        &self.model
    }

    /// Store an analysis computed elsewhere by the same model.
    pub fn insert(&mut self, key: CacheKey, analysis: Arc<WPrimeAnalysis>) {
        if self.entries.insert(key, analysis).is_none() {
            self.order.push_back(key);
        }

        while self.order.len() > self.max_entries {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    /// Drop every entry for a ride.
    pub fn invalidate(&mut self, ride_id: Uuid) {
        self.entries.retain(|key, _| key.ride_id != ride_id);
        self.order.retain(|key| key.ride_id != ride_id);
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of cached analyses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cache hits so far.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Cache misses so far.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for BalanceCache {
    fn default() -> Self {
        let model = WPrimeModel::default();
        let max_entries = model.config().cache.max_entries;
        Self::new(model, max_entries)
    }
}
