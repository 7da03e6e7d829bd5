//! Core types and utilities

pub mod forage;
pub mod herd;
pub mod paddock;
pub mod units;

pub use forage::{ForageSpecies, SpeciesTable};
pub use herd::{
    CategoryId, CategoryParams, CategoryTable, CustomCategory, Lot, LotCategory, MovementEvent,
};
pub use paddock::{HeightMeasurement, ManualBlock, OperatingMode, Paddock};
pub use units::*;
