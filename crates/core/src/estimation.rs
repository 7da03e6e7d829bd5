//! Sward height estimation
//!
//! Projects a paddock's current height from its last known state without a
//! fresh measurement: linear regrowth while resting (scaled by the climate
//! factor), linear depletion while occupied (scaled by stocking intensity
//! and category pressure), with hard physical clamps applied after the
//! projection. Every estimate carries its provenance; the engine degrades
//! instead of failing when the consumption model cannot be evaluated.

use crate::core_types::forage::ForageSpecies;
use crate::core_types::herd::{CategoryTable, Lot};
use crate::core_types::paddock::{OperatingMode, Paddock};
use crate::core_types::units::{Centimeters, CentimetersPerDay, Hectares};
use crate::error::EngineError;
use crate::stocking::{consumption_rate, stocking_rate, StockingSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an estimated height came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightSource {
    /// A direct reading (dated measurement at zero elapsed days, or a
    /// legacy height field)
    Measured,
    /// Linear projection from the last known state
    Projected,
    /// Projection after the consumption model could not be evaluated;
    /// depletion used the unscaled base rate
    ProjectedDegraded,
}

/// An estimated sward height with provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightEstimate {
    pub height: Centimeters,
    pub source: HeightSource,
}

impl HeightEstimate {
    /// True for any projected (non-measured) value
    #[must_use]
    pub fn is_projected(&self) -> bool {
        self.source != HeightSource::Measured
    }
}

/// Grazing pressure applied by the lot currently on a paddock
///
/// Total weight stays a raw f64 here: it may come straight from records,
/// and the estimation engine degrades rather than panics on a malformed
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrazingPressure {
    pub head_count: u32,
    pub total_weight_kg: f64,
    /// Category pressure multiplier (reference 1.0)
    pub pressure_factor: f64,
    /// Custom-category replacement for the species base consumption rate
    pub consumption_override: Option<CentimetersPerDay>,
}

impl GrazingPressure {
    /// No animals: projections leave the height unchanged
    #[must_use]
    pub fn none() -> Self {
        GrazingPressure {
            head_count: 0,
            total_weight_kg: 0.0,
            pressure_factor: 1.0,
            consumption_override: None,
        }
    }

    /// Derive the pressure a lot applies, resolving its category through
    /// the injected table
    #[must_use]
    pub fn from_lot(lot: &Lot, categories: &CategoryTable) -> Self {
        GrazingPressure {
            head_count: lot.head_count,
            total_weight_kg: *lot.total_weight(categories),
            pressure_factor: lot.category.pressure_factor(categories),
            consumption_override: lot.category.consumption_override(),
        }
    }
}

/// The engine's working record for one paddock at evaluation time
///
/// Computed fresh on every evaluation and never persisted; only the
/// resulting status label is written back by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationSnapshot {
    /// Height the projection started from
    pub baseline: Centimeters,
    /// Whether the baseline was an actual reading (vs. a threshold seed)
    pub baseline_measured: bool,
    /// Days projected over
    pub elapsed_days: i64,
    pub mode: OperatingMode,
    /// Stocking computed for the occupied projection, when it succeeded
    pub stocking: Option<StockingSummary>,
    /// Climate factor applied to regrowth
    pub climate_factor: f64,
    /// Daily rate actually used (growth or consumption, after scaling)
    pub daily_rate: CentimetersPerDay,
}

/// Growth ceiling for resting projections.
///
/// 1.5 × the entry threshold, or 2.5 × the exit threshold when no entry
/// threshold is known - prevents unbounded linear growth.
#[must_use]
pub fn growth_cap(entry: Option<Centimeters>, exit: Centimeters) -> Centimeters {
    match entry {
        Some(entry) => entry * 1.5,
        None => exit * 2.5,
    }
}

/// Estimate a paddock's current sward height.
///
/// Resolution order:
/// 1. dated measurement at zero elapsed days → the reading, verbatim;
/// 2. dated measurement with elapsed days → projection from it;
/// 3. undated legacy height → the value, treated as a direct reading;
/// 4. nothing at all → projection seeded from the entry threshold
///    (occupied) or exit threshold (resting), over the paddock's own
///    elapsed-occupancy/rest counters.
///
/// # Errors
/// [`EngineError::MeasurementInFuture`] when the measurement is dated
/// after `now`. Consumption-model failures do not error - the estimate
/// degrades and is tagged [`HeightSource::ProjectedDegraded`].
pub fn estimate_height(
    paddock: &Paddock,
    species: &ForageSpecies,
    pressure: Option<&GrazingPressure>,
    now: DateTime<Utc>,
) -> Result<HeightEstimate, EngineError> {
    estimate_with_snapshot(paddock, species, pressure, now).map(|(estimate, _)| estimate)
}

/// [`estimate_height`] plus the working snapshot, for diagnostics.
///
/// # Errors
/// Same as [`estimate_height`].
pub fn estimate_with_snapshot(
    paddock: &Paddock,
    species: &ForageSpecies,
    pressure: Option<&GrazingPressure>,
    now: DateTime<Utc>,
) -> Result<(HeightEstimate, EstimationSnapshot), EngineError> {
    let climate_factor = paddock.climate.growth_factor();
    let idle = GrazingPressure::none();
    let pressure = pressure.unwrap_or(&idle);

    if let Some(measurement) = paddock.measurement {
        let elapsed = (now - measurement.measured_at).num_days();
        if elapsed < 0 {
            return Err(EngineError::MeasurementInFuture(-elapsed));
        }
        if elapsed == 0 {
            let snapshot = EstimationSnapshot {
                baseline: measurement.height,
                baseline_measured: true,
                elapsed_days: 0,
                mode: paddock.mode,
                stocking: None,
                climate_factor,
                daily_rate: CentimetersPerDay::ZERO,
            };
            return Ok((
                HeightEstimate {
                    height: measurement.height,
                    source: HeightSource::Measured,
                },
                snapshot,
            ));
        }
        return Ok(project(
            paddock,
            species,
            pressure,
            measurement.height,
            true,
            elapsed,
            climate_factor,
        ));
    }

    if let Some(legacy) = paddock.legacy_height {
        let snapshot = EstimationSnapshot {
            baseline: legacy,
            baseline_measured: true,
            elapsed_days: 0,
            mode: paddock.mode,
            stocking: None,
            climate_factor,
            daily_rate: CentimetersPerDay::ZERO,
        };
        return Ok((
            HeightEstimate {
                height: legacy,
                source: HeightSource::Measured,
            },
            snapshot,
        ));
    }

    // Zero-history projection: seed from the species thresholds and the
    // paddock's own elapsed counters
    let (seed, elapsed) = match paddock.mode {
        OperatingMode::Occupied => (paddock.entry_height(), i64::from(paddock.occupancy_days)),
        OperatingMode::Resting => (paddock.exit_height(), i64::from(paddock.rest_days)),
    };
    Ok(project(
        paddock,
        species,
        pressure,
        seed,
        false,
        elapsed,
        climate_factor,
    ))
}

/// Linear projection with clamps, in either operating mode
fn project(
    paddock: &Paddock,
    species: &ForageSpecies,
    pressure: &GrazingPressure,
    baseline: Centimeters,
    baseline_measured: bool,
    elapsed_days: i64,
    climate_factor: f64,
) -> (HeightEstimate, EstimationSnapshot) {
    let days = elapsed_days as f64;
    match paddock.mode {
        OperatingMode::Resting => {
            let daily = species.daily_growth.scaled(climate_factor);
            let cap = growth_cap(Some(paddock.entry_height()), paddock.exit_height());
            // A reading above the cap is kept, not shrunk: the cap guards
            // against unbounded projection, not against tall grass
            let ceiling = cap.max(baseline);
            let height = (baseline + daily * days).min(ceiling).round1();
            let snapshot = EstimationSnapshot {
                baseline,
                baseline_measured,
                elapsed_days,
                mode: OperatingMode::Resting,
                stocking: None,
                climate_factor,
                daily_rate: daily,
            };
            (
                HeightEstimate {
                    height,
                    source: HeightSource::Projected,
                },
                snapshot,
            )
        }
        OperatingMode::Occupied => {
            let base_rate = pressure
                .consumption_override
                .unwrap_or(species.base_consumption);
            let (daily, stocking, source) = match stocking_rate(
                pressure.head_count,
                pressure.total_weight_kg,
                paddock.area(),
            ) {
                Ok(summary) => {
                    let rate = consumption_rate(base_rate, &summary, pressure.pressure_factor);
                    (rate, Some(summary), HeightSource::Projected)
                }
                Err(e) => {
                    // Degrade to unscaled linear depletion; never propagate
                    tracing::warn!(
                        paddock = paddock.id,
                        error = %e,
                        "consumption model failed, using unscaled base rate"
                    );
                    (base_rate, None, HeightSource::ProjectedDegraded)
                }
            };
            let depleted = baseline - daily * days;
            // Floor at the exit threshold, never above the baseline
            let height = depleted
                .max(paddock.exit_height())
                .min(baseline)
                .round1();
            let snapshot = EstimationSnapshot {
                baseline,
                baseline_measured,
                elapsed_days,
                mode: OperatingMode::Occupied,
                stocking,
                climate_factor,
                daily_rate: daily,
            };
            (HeightEstimate { height, source }, snapshot)
        }
    }
}

// ============================================================================
// REST PLANNING HELPERS
// ============================================================================

/// Days of rest needed to grow from the exit to the entry threshold.
///
/// Linear in the species growth rate; at least 1 day. A non-positive
/// growth rate falls back to a generic 30 days.
#[must_use]
pub fn required_rest_days(
    species: &ForageSpecies,
    entry: Centimeters,
    exit: Centimeters,
) -> u32 {
    let growth = *species.daily_growth;
    if growth <= 0.0 {
        return 30;
    }
    let needed = (*entry - *exit) / growth;
    (needed.ceil().max(1.0)) as u32
}

/// Days still needed to reach the entry threshold from the current height.
///
/// Zero when the height already meets the threshold; `None` current height
/// falls back to a generic 30 days. Fractional so callers can render
/// "~1 day".
#[must_use]
pub fn days_to_entry_height(
    species: &ForageSpecies,
    entry: Centimeters,
    current: Option<Centimeters>,
) -> f64 {
    let Some(current) = current else {
        return 30.0;
    };
    if current >= entry {
        return 0.0;
    }
    let growth = *species.daily_growth;
    if growth <= 0.0 {
        return 30.0;
    }
    ((*entry - *current) / growth).max(0.0)
}

// ============================================================================
// DAY-BY-DAY OCCUPANCY SIMULATION
// ============================================================================

/// One simulated grazing day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyStep {
    /// 1-based day index
    pub day: u32,
    pub start: Centimeters,
    pub end: Centimeters,
    pub reduction: CentimetersPerDay,
    /// The sward hit the exit floor on or before this day
    pub at_floor: bool,
}

/// Simulate an occupancy day by day.
///
/// Same consumption model as the single-shot projection, stepped daily so
/// callers can chart the depletion curve and spot the day the exit floor
/// is reached.
///
/// # Errors
/// [`EngineError::NonPositiveArea`] / [`EngineError::MalformedStockingInput`]
/// for invalid stocking inputs (this path is planning, not estimation, so
/// it surfaces rather than degrades).
pub fn simulate_occupancy(
    baseline: Centimeters,
    exit: Centimeters,
    total_days: u32,
    base_rate: CentimetersPerDay,
    pressure: &GrazingPressure,
    area: Hectares,
) -> Result<Vec<DailyStep>, EngineError> {
    let summary = stocking_rate(pressure.head_count, pressure.total_weight_kg, area)?;
    let daily = consumption_rate(base_rate, &summary, pressure.pressure_factor);

    let mut steps = Vec::with_capacity(total_days as usize);
    let mut current = baseline;
    for day in 1..=total_days {
        let start = current;
        current = (current - daily * 1.0).max(exit);
        steps.push(DailyStep {
            day,
            start: start.round1(),
            end: current.round1(),
            reduction: daily,
            at_floor: current <= exit,
        });
    }
    Ok(steps)
}
