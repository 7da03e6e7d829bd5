//! Stocking and consumption model
//!
//! Converts a lot (head count × per-head weight) and a paddock area into a
//! stocking intensity in animal units per hectare, then scales the species
//! reference consumption rate by that intensity. The reference consumption
//! is defined at 2 AU/ha; the rate used in consumption math is clamped at
//! 10 AU/ha so a misentered head count cannot produce a runaway depletion
//! projection.

use crate::core_types::units::{AuPerHectare, CentimetersPerDay, Hectares, Kilograms};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Stocking intensity at which species reference consumption is defined
pub const REFERENCE_STOCKING: AuPerHectare = AuPerHectare::new(2.0);

/// Technical ceiling on the stocking rate used in consumption math
pub const MAX_STOCKING: AuPerHectare = AuPerHectare::new(10.0);

/// Stocking computation result
///
/// Carries both the true rate and the clamped rate: consumption math uses
/// the clamped one, but callers may want the true rate for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockingSummary {
    /// Rate as actually computed from the inputs
    pub true_rate: AuPerHectare,
    /// Rate fed into the consumption formula (capped at [`MAX_STOCKING`])
    pub clamped_rate: AuPerHectare,
    /// Animal head count behind the rate
    pub head_count: u32,
}

impl StockingSummary {
    /// No animals, no pressure
    #[must_use]
    pub fn idle() -> Self {
        StockingSummary {
            true_rate: AuPerHectare::ZERO,
            clamped_rate: AuPerHectare::ZERO,
            head_count: 0,
        }
    }

    /// True when the ceiling kicked in
    #[must_use]
    pub fn was_clamped(&self) -> bool {
        self.true_rate > self.clamped_rate
    }
}

/// Compute the stocking intensity for a lot on a paddock.
///
/// One animal unit is 450 kg live weight. Zero animals (or zero total
/// weight) produce an idle summary - the sward height is then unchanged
/// regardless of elapsed days.
///
/// # Errors
/// [`EngineError::NonPositiveArea`] for a non-positive area;
/// [`EngineError::MalformedStockingInput`] for a NaN, infinite, or
/// negative total weight.
pub fn stocking_rate(
    head_count: u32,
    total_weight_kg: f64,
    area: Hectares,
) -> Result<StockingSummary, EngineError> {
    if *area <= 0.0 || !area.is_finite() {
        return Err(EngineError::NonPositiveArea(*area));
    }
    if !total_weight_kg.is_finite() || total_weight_kg < 0.0 {
        return Err(EngineError::MalformedStockingInput(total_weight_kg));
    }
    if head_count == 0 || total_weight_kg == 0.0 {
        return Ok(StockingSummary::idle());
    }

    let animal_units = Kilograms::new(total_weight_kg).to_animal_units();
    let true_rate = AuPerHectare::new(animal_units / *area);
    let clamped_rate = true_rate.min(MAX_STOCKING);
    Ok(StockingSummary {
        true_rate,
        clamped_rate,
        head_count,
    })
}

/// Pressure-adjusted daily consumption rate.
///
/// Scales the species reference rate linearly by `clamped_rate / 2 AU/ha`,
/// then applies the category pressure multiplier (reference category 1.0,
/// juveniles below, mature bull above).
#[must_use]
pub fn consumption_rate(
    base_rate: CentimetersPerDay,
    stocking: &StockingSummary,
    pressure_factor: f64,
) -> CentimetersPerDay {
    if stocking.head_count == 0 {
        return CentimetersPerDay::ZERO;
    }
    let intensity_scale = *stocking.clamped_rate / *REFERENCE_STOCKING;
    base_rate.scaled(intensity_scale * pressure_factor)
}

/// Qualitative stocking density, in head per hectare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityClass {
    /// Under 2 head/ha
    Low,
    /// 2 to 4 head/ha
    Moderate,
    /// 4 to 6 head/ha
    High,
    /// Above 6 head/ha
    VeryHigh,
}

/// Classify the head-per-hectare density of a paddock
#[must_use]
pub fn classify_density(head_count: u32, area: Hectares) -> DensityClass {
    let per_ha = if *area > 0.0 {
        f64::from(head_count) / *area
    } else {
        0.0
    };
    if per_ha < 2.0 {
        DensityClass::Low
    } else if per_ha <= 4.0 {
        DensityClass::Moderate
    } else if per_ha <= 6.0 {
        DensityClass::High
    } else {
        DensityClass::VeryHigh
    }
}
