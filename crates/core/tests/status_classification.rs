//! Status classifier precedence and idempotence over the full engine

use chrono::{DateTime, Duration, TimeZone, Utc};
use pasture_sim_core::{
    CategoryId, Lot, LotCategory, LotStatus, OperatingMode, Paddock, PaddockStatus,
    RotationEngine, Severity,
};

fn eval_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
}

fn paddock() -> Paddock {
    // Marandu: growth 1.2, consumption 0.85, technical window 28 days
    Paddock::new(1, "P1", 2.0, Some("Marandu".into()), 25.0, 15.0).unwrap()
}

#[test]
fn test_blocked_wins_regardless_of_height_and_occupancy() {
    let engine = RotationEngine::default();
    // Absurd inputs everywhere else: still Blocked
    let p = paddock()
        .blocked(Some("waterline burst"))
        .with_mode(OperatingMode::Occupied, 999)
        .with_measurement(2.0, eval_time());
    let report = engine.classify_status(&p, None, eval_time()).unwrap();
    assert_eq!(report.status, PaddockStatus::Blocked);
    assert_eq!(report.severity, Severity::Purple);
    assert!(report.message.contains("waterline burst"));
    assert!(report.progress.is_none());
    assert!(report.gap_cm.is_none());
}

#[test]
fn test_no_height_data_comes_second() {
    let engine = RotationEngine::default();
    let p = paddock().with_mode(OperatingMode::Occupied, 999);
    let report = engine.classify_status(&p, None, eval_time()).unwrap();
    assert_eq!(report.status, PaddockStatus::NoHeightData);
    assert_eq!(report.action, "Measure height");
}

#[test]
fn test_occupied_ladder_over_the_technical_window() {
    let engine = RotationEngine::default();
    let measured = |days: u32| {
        paddock()
            .with_mode(OperatingMode::Occupied, days)
            .with_measurement(20.0, eval_time())
    };

    // Marandu window: 28 days; 80% boundary at 22.4 days
    let cases = [
        (10, PaddockStatus::GrazingInProgress),
        (22, PaddockStatus::GrazingInProgress),
        (23, PaddockStatus::PrepareExit),
        (27, PaddockStatus::PrepareExit),
        (28, PaddockStatus::ExitNow),
        (40, PaddockStatus::ExitNow),
    ];
    for (days, expected) in cases {
        let report = engine
            .classify_status(&measured(days), None, eval_time())
            .unwrap();
        assert_eq!(report.status, expected, "at {days} occupancy days");
    }
}

#[test]
fn test_resting_ladder_over_height() {
    let engine = RotationEngine::default();
    let at_height = |height: f64| paddock().with_measurement(height, eval_time());

    let report = engine
        .classify_status(&at_height(25.0), None, eval_time())
        .unwrap();
    assert_eq!(report.status, PaddockStatus::EntryCleared);
    assert_eq!(report.days_to_ready, Some(0.0));

    let report = engine
        .classify_status(&at_height(20.0), None, eval_time())
        .unwrap();
    assert_eq!(report.status, PaddockStatus::Recovering);
    assert_eq!(report.gap_cm.map(|g| *g), Some(5.0));

    let report = engine
        .classify_status(&at_height(14.9), None, eval_time())
        .unwrap();
    assert_eq!(report.status, PaddockStatus::UrgentRecovery);
    assert_eq!(report.severity, Severity::Red);
}

#[test]
fn test_ready_even_before_minimum_rest() {
    // Growth caught up early: entry is cleared regardless of rest days
    let engine = RotationEngine::default();
    let p = paddock()
        .with_schedule(3, 30)
        .with_mode(OperatingMode::Resting, 4)
        .with_measurement(26.5, eval_time());
    let report = engine.classify_status(&p, None, eval_time()).unwrap();
    assert_eq!(report.status, PaddockStatus::EntryCleared);
}

#[test]
fn test_inefficiency_flag_only_past_fixed_ceiling() {
    let engine = RotationEngine::default();
    let slow = |rest_days: u32| {
        paddock()
            .with_mode(OperatingMode::Resting, rest_days)
            .with_measurement(18.0, eval_time())
    };
    assert!(
        !engine
            .classify_status(&slow(30), None, eval_time())
            .unwrap()
            .inefficiency
    );
    assert!(
        engine
            .classify_status(&slow(31), None, eval_time())
            .unwrap()
            .inefficiency
    );
}

#[test]
fn test_classification_is_idempotent() {
    let engine = RotationEngine::default();
    let p = paddock()
        .with_mode(OperatingMode::Resting, 12)
        .with_measurement(19.0, eval_time() - Duration::days(3));
    let first = engine.classify_status(&p, None, eval_time()).unwrap();
    let second = engine.classify_status(&p, None, eval_time()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_projection_feeds_classification() {
    // A paddock measured low 10 days ago grows back over the threshold:
    // 15 + 10 × 1.2 = 27 ≥ 25 → EntryCleared without a fresh measurement
    let engine = RotationEngine::default();
    let p = paddock().with_measurement(15.0, eval_time() - Duration::days(10));
    let report = engine.classify_status(&p, None, eval_time()).unwrap();
    assert_eq!(report.status, PaddockStatus::EntryCleared);
}

#[test]
fn test_lot_status_precedence() {
    let engine = RotationEngine::default();
    let now = eval_time();

    // Unplaced lot
    let waiting = Lot::new(1, "L1", 10, LotCategory::Standard(CategoryId::Cow));
    let report = engine.classify_lot(&waiting, None, now).unwrap();
    assert_eq!(report.status, LotStatus::AwaitingPlacement);

    // Low pasture beats the day counters
    let p = paddock().with_mode(OperatingMode::Occupied, 1);
    let placed = Lot::new(2, "L2", 10, LotCategory::Standard(CategoryId::Cow))
        .placed_on(1, now - Duration::days(1));
    let p_low = p.clone().with_measurement(18.0, now);
    let report = engine.classify_lot(&placed, Some(&p_low), now).unwrap();
    assert_eq!(report.status, LotStatus::PastureLow);

    // Past the planned duration (default 3 days)
    let p_ok = p.with_measurement(27.0, now);
    let overstayed = Lot::new(3, "L3", 10, LotCategory::Standard(CategoryId::Cow))
        .placed_on(1, now - Duration::days(5));
    let report = engine.classify_lot(&overstayed, Some(&p_ok), now).unwrap();
    assert_eq!(report.status, LotStatus::OverLimit);
}
