//! Paddock: the fenced grazing plot being rotated

use crate::climate::ClimateCondition;
use crate::core_types::units::{Centimeters, Hectares};
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the paddock is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingMode {
    /// Empty and regrowing
    Resting,
    /// A lot is grazing it
    Occupied,
}

/// A sward height reading and when it was taken
///
/// Height and timestamp always travel together; a paddock either has a
/// dated measurement or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightMeasurement {
    pub height: Centimeters,
    pub measured_at: DateTime<Utc>,
}

/// Manual block applied by an operator (e.g., fence repair, spraying)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ManualBlock {
    /// Free-text reason; surfaced in the blocked status message
    pub reason: Option<String>,
}

/// A grazing plot
///
/// Construction enforces the two structural invariants (`area > 0`,
/// `exit threshold < entry threshold`); everything else is optional state
/// attached through the `with_` builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddock {
    pub id: u64,
    pub name: String,
    area: Hectares,
    /// Forage species identifier, resolved through the injected table
    pub species: Option<String>,
    entry_height: Centimeters,
    exit_height: Centimeters,
    /// Planned occupancy duration for lot-level scheduling (days)
    pub target_occupancy_days: u16,
    /// Minimum rest before re-entry (days)
    pub min_rest_days: u16,
    /// Latest dated measurement, if any
    pub measurement: Option<HeightMeasurement>,
    /// Undated height carried over from legacy records; treated as a
    /// direct reading when no dated measurement exists
    pub legacy_height: Option<Centimeters>,
    pub mode: OperatingMode,
    /// Set while an operator has the paddock blocked
    pub manual_block: Option<ManualBlock>,
    /// Qualitative climate condition applied to regrowth
    pub climate: ClimateCondition,
    /// Elapsed occupancy days (maintained by the caller from movements)
    pub occupancy_days: u32,
    /// Elapsed rest days (maintained by the caller from movements)
    pub rest_days: u32,
    /// Whether any lot has ever grazed this paddock
    pub ever_occupied: bool,
    /// Deactivated paddocks are retired, never hard-deleted
    pub active: bool,
}

impl Paddock {
    /// Create a resting, unblocked paddock.
    ///
    /// # Errors
    /// [`EngineError::NonPositiveArea`] when `area_ha <= 0`;
    /// [`EngineError::ThresholdOrder`] when `exit_cm >= entry_cm`.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        area_ha: f64,
        species: Option<String>,
        entry_cm: f64,
        exit_cm: f64,
    ) -> Result<Self, EngineError> {
        if !area_ha.is_finite() || area_ha <= 0.0 {
            return Err(EngineError::NonPositiveArea(area_ha));
        }
        if !entry_cm.is_finite() || !exit_cm.is_finite() || exit_cm >= entry_cm || exit_cm < 0.0 {
            return Err(EngineError::ThresholdOrder {
                entry_cm,
                exit_cm,
            });
        }
        Ok(Paddock {
            id,
            name: name.into(),
            area: Hectares::new(area_ha),
            species,
            entry_height: Centimeters::new(entry_cm),
            exit_height: Centimeters::new(exit_cm),
            target_occupancy_days: 3,
            min_rest_days: 30,
            measurement: None,
            legacy_height: None,
            mode: OperatingMode::Resting,
            manual_block: None,
            climate: ClimateCondition::Normal,
            occupancy_days: 0,
            rest_days: 0,
            ever_occupied: false,
            active: true,
        })
    }

    /// Attach a dated height measurement
    #[must_use]
    pub fn with_measurement(mut self, height_cm: f64, measured_at: DateTime<Utc>) -> Self {
        self.measurement = Some(HeightMeasurement {
            height: Centimeters::new(height_cm),
            measured_at,
        });
        self
    }

    /// Attach an undated legacy height
    #[must_use]
    pub fn with_legacy_height(mut self, height_cm: f64) -> Self {
        self.legacy_height = Some(Centimeters::new(height_cm));
        self
    }

    /// Set the operating mode and the matching elapsed-day counter
    #[must_use]
    pub fn with_mode(mut self, mode: OperatingMode, elapsed_days: u32) -> Self {
        self.mode = mode;
        match mode {
            OperatingMode::Occupied => {
                self.occupancy_days = elapsed_days;
                self.ever_occupied = true;
            }
            OperatingMode::Resting => self.rest_days = elapsed_days,
        }
        self
    }

    /// Apply a manual block
    #[must_use]
    pub fn blocked(mut self, reason: Option<&str>) -> Self {
        self.manual_block = Some(ManualBlock {
            reason: reason.map(str::to_owned),
        });
        self
    }

    /// Set the qualitative climate condition
    #[must_use]
    pub fn with_climate(mut self, climate: ClimateCondition) -> Self {
        self.climate = climate;
        self
    }

    /// Set the planned occupancy and minimum rest durations
    #[must_use]
    pub fn with_schedule(mut self, target_occupancy_days: u16, min_rest_days: u16) -> Self {
        self.target_occupancy_days = target_occupancy_days;
        self.min_rest_days = min_rest_days;
        self
    }

    /// Mark whether the paddock has ever been grazed
    #[must_use]
    pub fn with_history(mut self, ever_occupied: bool) -> Self {
        self.ever_occupied = ever_occupied;
        self
    }

    /// Retire the paddock
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Paddock area (guaranteed > 0)
    #[must_use]
    pub fn area(&self) -> Hectares {
        self.area
    }

    /// Minimum sward height required before animals may enter
    #[must_use]
    pub fn entry_height(&self) -> Centimeters {
        self.entry_height
    }

    /// Minimum sward height below which animals must be removed
    #[must_use]
    pub fn exit_height(&self) -> Centimeters {
        self.exit_height
    }

    /// True when an operator has the paddock blocked
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.manual_block.is_some()
    }

    /// True when no height information exists in any form
    #[must_use]
    pub fn has_no_height_data(&self) -> bool {
        self.measurement.is_none() && self.legacy_height.is_none()
    }

    /// Whole days elapsed since the dated measurement, if one exists.
    ///
    /// # Errors
    /// [`EngineError::MeasurementInFuture`] when the measurement is dated
    /// after `now` - surfaced, never silently coerced to zero.
    pub fn days_since_measurement(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, EngineError> {
        match self.measurement {
            None => Ok(None),
            Some(m) => {
                let days = (now - m.measured_at).num_days();
                if days < 0 {
                    return Err(EngineError::MeasurementInFuture(-days));
                }
                Ok(Some(days))
            }
        }
    }
}
