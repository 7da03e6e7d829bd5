//! Climate resolution chain: provenance at every rung

use chrono::{Duration, Utc};
use pasture_sim_core::climate::{
    simulate_by_coordinates, ClimateLookup, ClimateReading, ClimateResolver, ClimateSource,
    LookupError, NoLiveLookup, CACHE_TTL_HOURS,
};
use pasture_sim_core::{ClimateCondition, ClimateObservation};

/// Provider stub that can be configured to fail
struct StubLookup {
    fail: bool,
}

impl ClimateLookup for StubLookup {
    fn fetch(&self, _lat: f64, _lon: f64) -> Result<ClimateObservation, LookupError> {
        if self.fail {
            return Err(LookupError("provider timeout".into()));
        }
        Ok(ClimateObservation {
            precipitation_7d_mm: 2.0,
            relative_humidity: Some(40.0),
        })
    }
}

#[test]
fn test_live_lookup_classifies_and_caches() {
    let resolver = ClimateResolver::new(StubLookup { fail: false });
    let t0 = Utc::now();

    let first = resolver.resolve(-20.0, -45.0, t0);
    assert_eq!(first.source, ClimateSource::Live);
    // 2 mm over 7 days is dry → factor 0.6
    assert_eq!(first.condition, ClimateCondition::Dry);
    assert_eq!(first.factor, 0.6);

    // Second resolution within the TTL must not hit the provider again
    let second = resolver.resolve(-20.0, -45.0, t0 + Duration::hours(1));
    assert_eq!(second.source, ClimateSource::Cache);
    assert_eq!(second.condition, ClimateCondition::Dry);
}

#[test]
fn test_expired_cache_refetches() {
    let lookup = StubLookup { fail: false };
    let resolver = ClimateResolver::new(lookup);
    let t0 = Utc::now();
    resolver.resolve(-20.0, -45.0, t0);
    let later = resolver.resolve(-20.0, -45.0, t0 + Duration::hours(CACHE_TTL_HOURS) + Duration::minutes(1));
    assert_eq!(later.source, ClimateSource::Live);
}

#[test]
fn test_failed_lookup_degrades_to_simulation_not_error() {
    let resolver = ClimateResolver::new(StubLookup { fail: true });
    let reading = resolver.resolve(-20.0, -45.0, Utc::now());
    assert_eq!(reading.source, ClimateSource::Simulated);
    assert_eq!(reading.condition, simulate_by_coordinates(-20.0, -45.0));
}

#[test]
fn test_simulation_is_deterministic_by_coordinates() {
    // Interior band east of -50° reads dry, west of it normal, and the
    // equatorial band wet
    assert_eq!(
        simulate_by_coordinates(-15.0, -45.0),
        ClimateCondition::Dry
    );
    assert_eq!(
        simulate_by_coordinates(-15.0, -55.0),
        ClimateCondition::Normal
    );
    assert_eq!(simulate_by_coordinates(-5.0, -45.0), ClimateCondition::Wet);

    // Same inputs, same output
    for _ in 0..3 {
        assert_eq!(
            simulate_by_coordinates(-15.0, -45.0),
            simulate_by_coordinates(-15.0, -45.0)
        );
    }
}

#[test]
fn test_final_fallback_is_normal_with_unit_factor() {
    let resolver = ClimateResolver::new(NoLiveLookup);
    let reading = resolver.resolve(f64::INFINITY, 0.0, Utc::now());
    assert_eq!(reading.source, ClimateSource::Fallback);
    assert_eq!(reading.condition, ClimateCondition::Normal);
    assert_eq!(reading.factor, 1.0);
}

#[test]
fn test_manual_mode_bypasses_resolution() {
    let now = Utc::now();
    let reading = ClimateReading::manual(ClimateCondition::Wet, now);
    assert_eq!(reading.source, ClimateSource::Manual);
    assert_eq!(reading.factor, 1.2);
}
