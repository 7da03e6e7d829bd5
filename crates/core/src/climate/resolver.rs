//! Climate resolution with cache, live lookup, and degradation chain
//!
//! The engine never talks to a weather service directly; it goes through
//! the [`ClimateLookup`] trait and treats the collaborator as slow and
//! failure-prone. Resolution degrades through a fixed chain and always
//! produces a usable reading:
//!
//! 1. still-valid cached value for the rounded coordinate pair
//! 2. live lookup, cached with a fixed time-to-live
//! 3. deterministic coordinate-based coarse simulation
//! 4. `normal` with factor 1.0
//!
//! Every reading carries its provenance so callers and tests can observe
//! which rung of the chain produced it.

use crate::climate::condition::{classify_observation, ClimateCondition, ClimateObservation};
use chrono::{DateTime, Duration, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// How long a cached reading stays valid
pub const CACHE_TTL_HOURS: i64 = 3;

/// Live weather lookup failed (transport, parsing, provider outage)
#[derive(Debug, Clone, Error)]
#[error("climate lookup failed: {0}")]
pub struct LookupError(pub String);

/// External weather collaborator
///
/// Implementations fetch current conditions for a coordinate pair. The
/// resolver only consumes the qualitative outcome; transport is the
/// implementor's concern.
pub trait ClimateLookup {
    /// Fetch a raw observation for the coordinates
    ///
    /// # Errors
    /// [`LookupError`] on any transport or provider failure; the resolver
    /// degrades to simulation in that case.
    fn fetch(&self, lat: f64, lon: f64) -> Result<ClimateObservation, LookupError>;
}

/// A lookup that is always offline; resolution degrades straight to the
/// coordinate simulation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLiveLookup;

impl ClimateLookup for NoLiveLookup {
    fn fetch(&self, _lat: f64, _lon: f64) -> Result<ClimateObservation, LookupError> {
        Err(LookupError("no live weather provider configured".into()))
    }
}

/// Which rung of the resolution chain produced a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimateSource {
    /// Operator-chosen condition; the resolver was bypassed entirely
    Manual,
    /// Still-valid cached value
    Cache,
    /// Fresh live lookup
    Live,
    /// Coordinate-based coarse simulation after a lookup failure
    Simulated,
    /// Final safety net: `normal`, factor 1.0
    Fallback,
}

/// A resolved climate condition with provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateReading {
    pub condition: ClimateCondition,
    /// Growth factor for the condition (0.6 / 1.0 / 1.2)
    pub factor: f64,
    pub source: ClimateSource,
    pub resolved_at: DateTime<Utc>,
}

impl ClimateReading {
    fn from_condition(
        condition: ClimateCondition,
        source: ClimateSource,
        resolved_at: DateTime<Utc>,
    ) -> Self {
        ClimateReading {
            condition,
            factor: condition.growth_factor(),
            source,
            resolved_at,
        }
    }

    /// Operator-chosen condition (manual farm climate mode)
    #[must_use]
    pub fn manual(condition: ClimateCondition, now: DateTime<Utc>) -> Self {
        ClimateReading::from_condition(condition, ClimateSource::Manual, now)
    }

    /// The final safety net of the chain
    #[must_use]
    pub fn normal_fallback(now: DateTime<Utc>) -> Self {
        ClimateReading::from_condition(ClimateCondition::Normal, ClimateSource::Fallback, now)
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    condition: ClimateCondition,
    expires_at: DateTime<Utc>,
}

/// Coarse deterministic condition from coordinates alone
///
/// Bands follow the Brazilian macro-regions: interior latitudes below
/// -10° read dry east of -50° longitude and normal west of it; everything
/// nearer the equator reads wet. Intentionally coarse; this only runs
/// after the live lookup has already failed.
#[must_use]
pub fn simulate_by_coordinates(lat: f64, lon: f64) -> ClimateCondition {
    if lat < -10.0 {
        if lon > -50.0 {
            ClimateCondition::Dry
        } else {
            ClimateCondition::Normal
        }
    } else {
        ClimateCondition::Wet
    }
}

/// Caching climate resolver over a pluggable live lookup
///
/// Coordinates are rounded to three decimals (~100 m) for the cache key so
/// nearby paddocks share entries. The cache is interior-mutable and
/// thread-safe; `resolve` itself never fails.
#[derive(Debug)]
pub struct ClimateResolver<L> {
    lookup: L,
    cache: Mutex<FxHashMap<(i64, i64), CacheEntry>>,
    ttl: Duration,
}

impl<L: ClimateLookup> ClimateResolver<L> {
    /// Build a resolver with the default 3-hour cache TTL
    #[must_use]
    pub fn new(lookup: L) -> Self {
        ClimateResolver {
            lookup,
            cache: Mutex::new(FxHashMap::default()),
            ttl: Duration::hours(CACHE_TTL_HOURS),
        }
    }

    /// Override the cache TTL (tests use short or zero TTLs)
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Resolve the condition for a coordinate pair, degrading through the
    /// chain as needed. Never returns an error.
    pub fn resolve(&self, lat: f64, lon: f64, now: DateTime<Utc>) -> ClimateReading {
        if !lat.is_finite() || !lon.is_finite() {
            tracing::warn!(lat, lon, "non-finite coordinates, using normal fallback");
            return ClimateReading::normal_fallback(now);
        }
        let key = cache_key(lat, lon);

        // 1. Cache
        {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = cache.get(&key) {
                if entry.expires_at > now {
                    tracing::debug!(lat, lon, condition = %entry.condition, "climate cache hit");
                    return ClimateReading::from_condition(
                        entry.condition,
                        ClimateSource::Cache,
                        now,
                    );
                }
            }
        }

        // 2. Live lookup
        match self.lookup.fetch(lat, lon) {
            Ok(observation) => {
                let condition = classify_observation(&observation);
                let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
                cache.insert(
                    key,
                    CacheEntry {
                        condition,
                        expires_at: now + self.ttl,
                    },
                );
                ClimateReading::from_condition(condition, ClimateSource::Live, now)
            }
            // 3. Coordinate simulation
            Err(e) => {
                tracing::warn!(lat, lon, error = %e, "live climate lookup failed, simulating from coordinates");
                let condition = simulate_by_coordinates(lat, lon);
                ClimateReading::from_condition(condition, ClimateSource::Simulated, now)
            }
        }
    }

    /// Drop every cached entry
    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Round to three decimals (~100 m) so nearby lookups share a cache slot
fn cache_key(lat: f64, lon: f64) -> (i64, i64) {
    ((lat * 1000.0).round() as i64, (lon * 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLookup(ClimateObservation);

    impl ClimateLookup for FixedLookup {
        fn fetch(&self, _lat: f64, _lon: f64) -> Result<ClimateObservation, LookupError> {
            Ok(self.0)
        }
    }

    fn rainy() -> ClimateObservation {
        ClimateObservation {
            precipitation_7d_mm: 60.0,
            relative_humidity: Some(85.0),
        }
    }

    #[test]
    fn test_live_then_cache() {
        let resolver = ClimateResolver::new(FixedLookup(rainy()));
        let t0 = Utc::now();
        let first = resolver.resolve(-15.5, -47.9, t0);
        assert_eq!(first.condition, ClimateCondition::Wet);
        assert_eq!(first.source, ClimateSource::Live);

        let second = resolver.resolve(-15.5, -47.9, t0 + Duration::minutes(30));
        assert_eq!(second.source, ClimateSource::Cache);
        assert_eq!(second.factor, 1.2);
    }

    #[test]
    fn test_cache_expires_after_ttl() {
        let resolver = ClimateResolver::new(FixedLookup(rainy()));
        let t0 = Utc::now();
        resolver.resolve(-15.5, -47.9, t0);
        let later = resolver.resolve(-15.5, -47.9, t0 + Duration::hours(CACHE_TTL_HOURS + 1));
        assert_eq!(later.source, ClimateSource::Live);
    }

    #[test]
    fn test_nearby_coordinates_share_cache_slot() {
        let resolver = ClimateResolver::new(FixedLookup(rainy()));
        let t0 = Utc::now();
        resolver.resolve(-15.5001, -47.9001, t0);
        let nearby = resolver.resolve(-15.5003, -47.8998, t0);
        assert_eq!(nearby.source, ClimateSource::Cache);
    }

    #[test]
    fn test_lookup_failure_degrades_to_simulation() {
        let resolver = ClimateResolver::new(NoLiveLookup);
        let t0 = Utc::now();
        let reading = resolver.resolve(-15.5, -47.9, t0);
        assert_eq!(reading.source, ClimateSource::Simulated);
        assert_eq!(reading.condition, simulate_by_coordinates(-15.5, -47.9));
    }

    #[test]
    fn test_non_finite_coordinates_use_final_fallback() {
        let resolver = ClimateResolver::new(NoLiveLookup);
        let reading = resolver.resolve(f64::NAN, -47.9, Utc::now());
        assert_eq!(reading.source, ClimateSource::Fallback);
        assert_eq!(reading.condition, ClimateCondition::Normal);
        assert_eq!(reading.factor, 1.0);
    }
}
