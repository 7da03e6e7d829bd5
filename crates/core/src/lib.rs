//! Pasture Rotation Core Library
//!
//! Estimation and decision engine for rotational grazing: cattle lots
//! occupy paddocks for a bounded period, then each paddock rests and
//! regrows before reassignment. Given a paddock's last known sward height,
//! the elapsed time, the grazing pressure applied, and the forage species'
//! agronomic constants, the engine:
//!
//! - estimates the *current* sward height without a fresh measurement
//!   (growth while resting, depletion while occupied, hard physical
//!   clamps);
//! - classifies the paddock into an operational status that drives alerts
//!   and manager actions;
//! - ranks candidate destination paddocks for an incoming lot.
//!
//! The engine is a pure, synchronous computation over snapshots: it owns
//! no persistent state, performs no I/O, and is safe to invoke from
//! multiple threads concurrently. Persistence and weather transport are
//! external collaborators behind narrow interfaces.

// Core types and utilities
pub mod core_types;

// Climate factor resolution
pub mod climate;

// Estimation and decision modules
pub mod engine;
pub mod error;
pub mod estimation;
pub mod rotation;
pub mod status;
pub mod stocking;
pub mod store;

// Re-export core types
pub use core_types::{
    AuPerHectare, CategoryId, CategoryParams, CategoryTable, Centimeters, CentimetersPerDay,
    CustomCategory, ForageSpecies, HeightMeasurement, Hectares, Kilograms, Lot, LotCategory,
    ManualBlock, MovementEvent, OperatingMode, Paddock, SpeciesTable,
};

// Re-export climate types
pub use climate::{
    classify_observation, growth_factor, ClimateCondition, ClimateLookup, ClimateObservation,
    ClimateReading, ClimateResolver, ClimateSource,
};

// Re-export engine entry points
pub use engine::{ExitAlert, PaddockEvaluation, RotationEngine, RotationPlan};
pub use error::EngineError;
pub use estimation::{
    estimate_height, EstimationSnapshot, GrazingPressure, HeightEstimate, HeightSource,
};
pub use rotation::{rank_candidates, RankTier, RankedCandidate};
pub use status::{
    classify_lot, classify_status, LotStatus, LotStatusReport, PaddockStatus, Severity,
    StatusReport,
};
pub use stocking::{
    classify_density, consumption_rate, stocking_rate, DensityClass, StockingSummary,
    MAX_STOCKING, REFERENCE_STOCKING,
};
pub use store::{GrazingStore, InMemoryStore};
