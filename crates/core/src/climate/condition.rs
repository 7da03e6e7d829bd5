//! Qualitative climate condition and its growth factor
//!
//! Regrowth projections are scaled by a single multiplicative factor tied
//! to a three-valued qualitative condition. The condition comes either from
//! an operator (manual mode) or from the weather-derivation policy in this
//! module; either way the mapping to a factor is fixed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Precipitation thresholds for deriving a condition from observed weather.
///
/// These constants define the decision boundaries between the qualitative
/// classes and should be used consistently for validation and testing.
pub mod thresholds {
    /// 7-day cumulative precipitation at or above which conditions are `wet`
    pub const WET_PRECIP_7D_MM: f64 = 35.0;

    /// 7-day cumulative precipitation at or below which conditions are `dry`
    pub const DRY_PRECIP_7D_MM: f64 = 10.0;
}

/// Qualitative climate condition affecting pasture regrowth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClimateCondition {
    /// Drought: regrowth at 60% of the reference rate
    Dry,
    /// Average conditions: reference regrowth
    #[default]
    Normal,
    /// Rainy: regrowth at 120% of the reference rate
    Wet,
}

impl ClimateCondition {
    /// Multiplicative growth factor for this condition
    #[must_use]
    pub fn growth_factor(self) -> f64 {
        match self {
            ClimateCondition::Dry => 0.6,
            ClimateCondition::Normal => 1.0,
            ClimateCondition::Wet => 1.2,
        }
    }

    /// Normalize a free-form condition label to the canonical enumeration.
    ///
    /// Accepts the canonical names plus common synonyms and the Portuguese
    /// labels used by field operators; anything unrecognized (or empty)
    /// collapses to `Normal`. This never errors.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "dry" | "seco" | "seca" | "drought" => ClimateCondition::Dry,
            "wet" | "rainy" | "chuvoso" | "chuva" | "molhado" => ClimateCondition::Wet,
            // "normal" and "regular" land here along with everything unknown
            _ => ClimateCondition::Normal,
        }
    }
}

impl fmt::Display for ClimateCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClimateCondition::Dry => "dry",
            ClimateCondition::Normal => "normal",
            ClimateCondition::Wet => "wet",
        };
        write!(f, "{label}")
    }
}

/// Growth factor for an optional free-form label.
///
/// Unknown, empty, or missing input returns the `normal` factor (1.0) -
/// never an error.
#[must_use]
pub fn growth_factor(label: Option<&str>) -> f64 {
    label
        .map_or(ClimateCondition::Normal, ClimateCondition::parse)
        .growth_factor()
}

/// Raw weather observation consumed by the derivation policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateObservation {
    /// Cumulative precipitation over the last 7 days (mm)
    pub precipitation_7d_mm: f64,
    /// Current relative humidity (%), when the provider reports it
    pub relative_humidity: Option<f64>,
}

/// Classify a raw observation into a qualitative condition.
///
/// Decision boundaries: `wet` at >= 35 mm of 7-day precipitation, `dry` at
/// <= 10 mm, `normal` between. Relative humidity is carried in the
/// observation but is not currently a deciding factor in the
/// low-precipitation branch; do not add a humidity threshold here without
/// product guidance.
#[must_use]
pub fn classify_observation(observation: &ClimateObservation) -> ClimateCondition {
    if observation.precipitation_7d_mm >= thresholds::WET_PRECIP_7D_MM {
        return ClimateCondition::Wet;
    }
    if observation.precipitation_7d_mm <= thresholds::DRY_PRECIP_7D_MM {
        return ClimateCondition::Dry;
    }
    ClimateCondition::Normal
}
