//! Climate factor resolution for regrowth scaling

pub mod condition;
pub mod resolver;

pub use condition::{
    classify_observation, growth_factor, thresholds, ClimateCondition, ClimateObservation,
};
pub use resolver::{
    simulate_by_coordinates, ClimateLookup, ClimateReading, ClimateResolver, ClimateSource,
    LookupError, NoLiveLookup, CACHE_TTL_HOURS,
};
