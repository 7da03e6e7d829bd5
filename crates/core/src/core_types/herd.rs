//! Animal lots, categories, and the movement audit trail

use crate::core_types::units::{CentimetersPerDay, Kilograms};
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Accepted live-weight range for custom categories (kg)
pub const CUSTOM_WEIGHT_RANGE_KG: (f64, f64) = (50.0, 1200.0);

/// Accepted consumption-override range for custom categories (cm/day)
pub const CUSTOM_CONSUMPTION_RANGE: (f64, f64) = (0.1, 3.0);

/// Fixed animal category enumeration
///
/// Each category maps to a reference live weight and a grazing-pressure
/// multiplier in the injected [`CategoryTable`]. The finishing ox is the
/// reference category (multiplier 1.0); juveniles trample and select less,
/// a mature bull more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryId {
    /// Calf (bezerro/bezerra)
    Calf,
    /// Growing steer or heifer (garrote/novilha)
    Steer,
    /// Lean ox on finishing (boi magro/engorda) - reference category
    FinishingOx,
    /// Adult cow
    Cow,
    /// Mature bull
    Bull,
}

impl CategoryId {
    /// All fixed categories, in rough age/weight order
    pub const ALL: [CategoryId; 5] = [
        CategoryId::Calf,
        CategoryId::Steer,
        CategoryId::FinishingOx,
        CategoryId::Cow,
        CategoryId::Bull,
    ];

    /// Human-facing label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CategoryId::Calf => "Calf",
            CategoryId::Steer => "Steer",
            CategoryId::FinishingOx => "Finishing Ox",
            CategoryId::Cow => "Cow",
            CategoryId::Bull => "Bull",
        }
    }
}

/// Per-category parameters: reference weight and pressure multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryParams {
    /// Reference live weight for one head of this category
    pub reference_weight: Kilograms,
    /// Multiplier applied to the stocking-scaled consumption rate
    /// (reference category = 1.0, juveniles < 1.0, mature bull > 1.0)
    pub pressure_factor: f64,
}

/// Injected category-parameter table
///
/// Like [`crate::core_types::forage::SpeciesTable`], this is configuration
/// passed into the engine at construction so tests can substitute fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTable {
    entries: FxHashMap<CategoryId, CategoryParams>,
}

impl CategoryTable {
    /// Table preloaded with the Brazilian beef-herd reference weights
    #[must_use]
    pub fn brazilian_defaults() -> Self {
        let mut entries = FxHashMap::default();
        entries.insert(
            CategoryId::Calf,
            CategoryParams {
                reference_weight: Kilograms::new(200.0),
                pressure_factor: 0.5,
            },
        );
        entries.insert(
            CategoryId::Steer,
            CategoryParams {
                reference_weight: Kilograms::new(325.0),
                pressure_factor: 0.75,
            },
        );
        entries.insert(
            CategoryId::FinishingOx,
            CategoryParams {
                reference_weight: Kilograms::new(475.0),
                pressure_factor: 1.0,
            },
        );
        entries.insert(
            CategoryId::Cow,
            CategoryParams {
                reference_weight: Kilograms::new(500.0),
                pressure_factor: 1.0,
            },
        );
        entries.insert(
            CategoryId::Bull,
            CategoryParams {
                reference_weight: Kilograms::new(850.0),
                pressure_factor: 1.2,
            },
        );
        CategoryTable { entries }
    }

    /// Insert or replace the parameters for a category
    pub fn insert(&mut self, id: CategoryId, params: CategoryParams) {
        self.entries.insert(id, params);
    }

    /// Resolve a category; an unregistered one falls back to the reference
    /// category parameters (475 kg, multiplier 1.0)
    #[must_use]
    pub fn get(&self, id: CategoryId) -> CategoryParams {
        self.entries.get(&id).copied().unwrap_or(CategoryParams {
            reference_weight: Kilograms::new(475.0),
            pressure_factor: 1.0,
        })
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        CategoryTable::brazilian_defaults()
    }
}

/// Validated caller-supplied parameters for a custom category
///
/// Constructed only through [`CustomCategory::new`], which enforces the
/// 50-1200 kg weight range and the 0.1-3.0 cm/day override range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomCategory {
    weight: Kilograms,
    consumption_override: Option<CentimetersPerDay>,
}

impl CustomCategory {
    /// Validate and build a custom category
    ///
    /// # Errors
    /// [`EngineError::CustomWeightRange`] when the weight lies outside
    /// 50-1200 kg, [`EngineError::CustomConsumptionRange`] when the
    /// consumption override lies outside 0.1-3.0 cm/day.
    pub fn new(
        weight_kg: f64,
        consumption_override: Option<f64>,
    ) -> Result<Self, EngineError> {
        let (weight_min, weight_max) = CUSTOM_WEIGHT_RANGE_KG;
        if !weight_kg.is_finite() || weight_kg < weight_min || weight_kg > weight_max {
            return Err(EngineError::CustomWeightRange(weight_kg));
        }
        let consumption_override = match consumption_override {
            Some(rate) => {
                let (rate_min, rate_max) = CUSTOM_CONSUMPTION_RANGE;
                if !rate.is_finite() || rate < rate_min || rate > rate_max {
                    return Err(EngineError::CustomConsumptionRange(rate));
                }
                Some(CentimetersPerDay::new(rate))
            }
            None => None,
        };
        Ok(CustomCategory {
            weight: Kilograms::new(weight_kg),
            consumption_override,
        })
    }

    /// Caller-supplied per-head weight
    #[must_use]
    pub fn weight(&self) -> Kilograms {
        self.weight
    }

    /// Caller-supplied replacement for the species base consumption rate
    #[must_use]
    pub fn consumption_override(&self) -> Option<CentimetersPerDay> {
        self.consumption_override
    }
}

/// A lot's category: one of the fixed enumeration, or custom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LotCategory {
    /// Fixed category, parameters resolved through the [`CategoryTable`]
    Standard(CategoryId),
    /// Caller-supplied weight (and optionally consumption), pre-validated
    Custom(CustomCategory),
}

impl LotCategory {
    /// Per-head weight, manual or from the table
    #[must_use]
    pub fn head_weight(&self, table: &CategoryTable) -> Kilograms {
        match self {
            LotCategory::Standard(id) => table.get(*id).reference_weight,
            LotCategory::Custom(custom) => custom.weight(),
        }
    }

    /// Pressure multiplier for consumption scaling (custom = 1.0)
    #[must_use]
    pub fn pressure_factor(&self, table: &CategoryTable) -> f64 {
        match self {
            LotCategory::Standard(id) => table.get(*id).pressure_factor,
            LotCategory::Custom(_) => 1.0,
        }
    }

    /// Consumption override, set only for custom categories
    #[must_use]
    pub fn consumption_override(&self) -> Option<CentimetersPerDay> {
        match self {
            LotCategory::Standard(_) => None,
            LotCategory::Custom(custom) => custom.consumption_override(),
        }
    }
}

/// A batch of animals of one category
///
/// A lot occupies at most one paddock at a time; `current_paddock == None`
/// means the lot is awaiting placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: u64,
    pub name: String,
    /// Animal head count (zero is valid: an empty lot applies no pressure)
    pub head_count: u32,
    pub category: LotCategory,
    /// Paddock currently occupied, if any
    pub current_paddock: Option<u64>,
    /// When the lot entered its current paddock
    pub entered_at: Option<DateTime<Utc>>,
    /// Inactive lots are retired, never hard-deleted
    pub active: bool,
}

impl Lot {
    /// Create an active, unplaced lot
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, head_count: u32, category: LotCategory) -> Self {
        Lot {
            id,
            name: name.into(),
            head_count,
            category,
            current_paddock: None,
            entered_at: None,
            active: true,
        }
    }

    /// Place the lot on a paddock at the given time
    #[must_use]
    pub fn placed_on(mut self, paddock_id: u64, entered_at: DateTime<Utc>) -> Self {
        self.current_paddock = Some(paddock_id);
        self.entered_at = Some(entered_at);
        self
    }

    /// Total live weight of the lot
    #[must_use]
    pub fn total_weight(&self, table: &CategoryTable) -> Kilograms {
        self.category.head_weight(table) * f64::from(self.head_count)
    }

    /// Whole days the lot has spent on its current paddock (0 when unplaced)
    #[must_use]
    pub fn days_on_paddock(&self, now: DateTime<Utc>) -> i64 {
        match self.entered_at {
            Some(entered) => (now - entered).num_days().max(0),
            None => 0,
        }
    }
}

/// Immutable record of a lot changing paddock
///
/// `destination == None` records an exit to "awaiting placement". The
/// trail doubles as the source for elapsed-rest derivation when a paddock
/// has no direct measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementEvent {
    pub lot_id: u64,
    pub origin: Option<u64>,
    pub destination: Option<u64>,
    pub moved_at: DateTime<Utc>,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_weight_below_floor_rejected() {
        let err = CustomCategory::new(40.0, None).unwrap_err();
        assert_eq!(err, EngineError::CustomWeightRange(40.0));
    }

    #[test]
    fn test_custom_weight_bounds_inclusive() {
        assert!(CustomCategory::new(50.0, None).is_ok());
        assert!(CustomCategory::new(1200.0, None).is_ok());
        assert!(CustomCategory::new(1200.1, None).is_err());
    }

    #[test]
    fn test_custom_consumption_override_range() {
        assert!(CustomCategory::new(300.0, Some(0.1)).is_ok());
        assert!(CustomCategory::new(300.0, Some(3.0)).is_ok());
        let err = CustomCategory::new(300.0, Some(3.5)).unwrap_err();
        assert_eq!(err, EngineError::CustomConsumptionRange(3.5));
    }

    #[test]
    fn test_lot_total_weight_uses_reference() {
        let table = CategoryTable::brazilian_defaults();
        let lot = Lot::new(1, "Lote A", 10, LotCategory::Standard(CategoryId::Cow));
        assert_eq!(*lot.total_weight(&table), 5000.0);
    }

    #[test]
    fn test_pressure_factors_bracket_reference() {
        let table = CategoryTable::brazilian_defaults();
        let calf = LotCategory::Standard(CategoryId::Calf).pressure_factor(&table);
        let ox = LotCategory::Standard(CategoryId::FinishingOx).pressure_factor(&table);
        let bull = LotCategory::Standard(CategoryId::Bull).pressure_factor(&table);
        assert!(calf < ox, "juvenile categories graze lighter");
        assert_eq!(ox, 1.0, "finishing ox is the reference");
        assert!(bull > ox, "mature bull grazes heavier");
    }
}
