//! End-to-end estimation scenarios over the full engine
//!
//! Exercises the worked reference scenarios (known inputs → exact
//! projected heights) plus the monotonicity and bounding properties of
//! both projection modes.

use chrono::{DateTime, Duration, TimeZone, Utc};
use pasture_sim_core::{
    Centimeters, ForageSpecies, HeightSource, Lot, LotCategory, OperatingMode, Paddock,
    RotationEngine, SpeciesTable,
};
use pasture_sim_core::{CategoryTable, ClimateCondition, CustomCategory, EngineError};

fn eval_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
}

fn reference_engine() -> RotationEngine {
    // Fixture species: growth 1.2 cm/day, consumption 0.8 cm/day @ 2 AU/ha
    let mut species = SpeciesTable::empty();
    species.insert(ForageSpecies::new("Reference", 1.2, 0.8, 30));
    RotationEngine::new(species, CategoryTable::brazilian_defaults())
}

fn reference_paddock(area_ha: f64) -> Paddock {
    Paddock::new(1, "Ref", area_ha, Some("Reference".into()), 25.0, 15.0).unwrap()
}

#[test]
fn test_resting_projection_normal_climate() {
    // 15 cm baseline, 10 days rest, growth 1.2, factor 1.0 → 27.0 cm
    let engine = reference_engine();
    let paddock = reference_paddock(2.0).with_mode(OperatingMode::Resting, 10);
    let estimate = engine
        .estimate_height(&paddock, None, eval_time())
        .unwrap();
    assert_eq!(*estimate.height, 27.0);
    assert_eq!(estimate.source, HeightSource::Projected);
}

#[test]
fn test_resting_projection_dry_climate() {
    // Same, factor 0.6 → 15 + 10 × 1.2 × 0.6 = 22.2 cm
    let engine = reference_engine();
    let paddock = reference_paddock(2.0)
        .with_climate(ClimateCondition::Dry)
        .with_mode(OperatingMode::Resting, 10);
    let estimate = engine
        .estimate_height(&paddock, None, eval_time())
        .unwrap();
    assert_eq!(*estimate.height, 22.2);
}

#[test]
fn test_occupied_depletion_at_double_reference_stocking() {
    // Baseline 25 cm, 4 AU/ha (ratio 2×), 5 days:
    // rate = 0.8 × (4/2) = 1.6 cm/day → 25 − 8 = 17.0 cm
    let engine = reference_engine();
    let measured_at = eval_time() - Duration::days(5);
    let paddock = reference_paddock(1.0)
        .with_mode(OperatingMode::Occupied, 5)
        .with_measurement(25.0, measured_at);
    // 4 AU on 1 ha: a custom lot of 4 head at 450 kg each
    let custom = CustomCategory::new(450.0, None).unwrap();
    let lot = Lot::new(9, "L9", 4, LotCategory::Custom(custom)).placed_on(1, measured_at);

    let estimate = engine
        .estimate_height(&paddock, Some(&lot), eval_time())
        .unwrap();
    assert_eq!(*estimate.height, 17.0);
    assert_eq!(estimate.source, HeightSource::Projected);
}

#[test]
fn test_custom_weight_below_floor_is_invalid_input() {
    let err = CustomCategory::new(40.0, None).unwrap_err();
    assert_eq!(err, EngineError::CustomWeightRange(40.0));
}

#[test]
fn test_measurement_in_future_is_surfaced() {
    let engine = reference_engine();
    let paddock = reference_paddock(2.0).with_measurement(20.0, eval_time() + Duration::days(3));
    let err = engine
        .estimate_height(&paddock, None, eval_time())
        .unwrap_err();
    assert!(matches!(err, EngineError::MeasurementInFuture(3)));
}

#[test]
fn test_resting_growth_monotone_nondecreasing_and_capped() {
    let engine = reference_engine();
    let cap = 25.0 * 1.5;
    for condition in [
        ClimateCondition::Dry,
        ClimateCondition::Normal,
        ClimateCondition::Wet,
    ] {
        let mut previous = Centimeters::ZERO;
        for days in 0..100 {
            let paddock = reference_paddock(2.0)
                .with_climate(condition)
                .with_measurement(15.0, eval_time() - Duration::days(days));
            let estimate = engine
                .estimate_height(&paddock, None, eval_time())
                .unwrap();
            assert!(
                estimate.height >= previous,
                "growth must not reverse ({condition:?}, day {days})"
            );
            assert!(
                *estimate.height <= cap,
                "growth must stay under the cap ({condition:?}, day {days})"
            );
            previous = estimate.height;
        }
    }
}

#[test]
fn test_occupied_depletion_monotone_nonincreasing_and_floored() {
    let engine = reference_engine();
    for head_count in [1u32, 4, 12, 40] {
        let custom = CustomCategory::new(450.0, None).unwrap();
        let mut previous = Centimeters::new(25.0);
        for days in 0..60 {
            let measured_at = eval_time() - Duration::days(days);
            let paddock = reference_paddock(1.0)
                .with_mode(OperatingMode::Occupied, days as u32)
                .with_measurement(25.0, measured_at);
            let lot =
                Lot::new(9, "L9", head_count, LotCategory::Custom(custom)).placed_on(1, measured_at);
            let estimate = engine
                .estimate_height(&paddock, Some(&lot), eval_time())
                .unwrap();
            assert!(
                estimate.height <= previous,
                "depletion must not reverse ({head_count} head, day {days})"
            );
            assert!(
                *estimate.height >= 15.0,
                "depletion must stop at the exit threshold"
            );
            previous = estimate.height;
        }
    }
}

#[test]
fn test_zero_animals_leave_height_unchanged() {
    let engine = reference_engine();
    let measured_at = eval_time() - Duration::days(30);
    let paddock = reference_paddock(1.0)
        .with_mode(OperatingMode::Occupied, 30)
        .with_measurement(22.0, measured_at);
    let empty_lot = Lot::new(
        9,
        "Empty",
        0,
        LotCategory::Standard(pasture_sim_core::CategoryId::Cow),
    );
    let estimate = engine
        .estimate_height(&paddock, Some(&empty_lot), eval_time())
        .unwrap();
    assert_eq!(*estimate.height, 22.0);
}

#[test]
fn test_degraded_consumption_still_returns_a_value() {
    use pasture_sim_core::estimation::{estimate_height, GrazingPressure};

    let species = ForageSpecies::new("Reference", 1.2, 0.8, 30);
    let measured_at = eval_time() - Duration::days(5);
    let paddock = reference_paddock(1.0)
        .with_mode(OperatingMode::Occupied, 5)
        .with_measurement(25.0, measured_at);
    let malformed = GrazingPressure {
        head_count: 4,
        total_weight_kg: f64::INFINITY,
        pressure_factor: 1.0,
        consumption_override: None,
    };
    let estimate = estimate_height(&paddock, &species, Some(&malformed), eval_time()).unwrap();
    assert_eq!(estimate.source, HeightSource::ProjectedDegraded);
    // Unscaled base rate: 25 − 5 × 0.8 = 21.0
    assert_eq!(*estimate.height, 21.0);
}
