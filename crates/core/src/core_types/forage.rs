//! Forage species parameters
//!
//! Each species carries the three agronomic constants the estimation engine
//! needs: rest-phase daily growth, reference daily consumption under
//! grazing, and the technical occupancy window. Values follow Brazilian
//! tropical-pasture management references for the Brachiaria, Panicum and
//! Cynodon cultivar groups.

use crate::core_types::units::CentimetersPerDay;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Agronomic parameters for one forage species (cultivar)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForageSpecies {
    /// Cultivar name (e.g., "Marandu", "Mombaça")
    pub name: String,
    /// Daily regrowth while resting, under `normal` climate (cm/day)
    pub daily_growth: CentimetersPerDay,
    /// Daily consumption under grazing at the 2 AU/ha reference stocking (cm/day)
    pub base_consumption: CentimetersPerDay,
    /// Technical occupancy window: maximum days a lot may graze before
    /// mandatory rotation
    pub occupancy_window_days: u16,
}

impl ForageSpecies {
    /// Create a species entry from raw constants
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        daily_growth: f64,
        base_consumption: f64,
        occupancy_window_days: u16,
    ) -> Self {
        ForageSpecies {
            name: name.into(),
            daily_growth: CentimetersPerDay::new(daily_growth),
            base_consumption: CentimetersPerDay::new(base_consumption),
            occupancy_window_days,
        }
    }

    /// Documented default for unrecognized species:
    /// growth 1.2 cm/day, consumption 0.8 cm/day, 30-day window
    #[must_use]
    pub fn fallback() -> Self {
        ForageSpecies::new("Unknown", 1.2, 0.8, 30)
    }

    // ------------------------------------------------------------------
    // Brachiaria (Urochloa) group
    // ------------------------------------------------------------------

    /// Brachiaria brizantha cv. Marandu - the most planted Brazilian pasture
    #[must_use]
    pub fn marandu() -> Self {
        ForageSpecies::new("Marandu", 1.2, 0.85, 28)
    }

    /// Brachiaria brizantha cv. Piatã
    #[must_use]
    pub fn piata() -> Self {
        ForageSpecies::new("Piatã", 1.3, 0.90, 28)
    }

    /// Brachiaria brizantha cv. Xaraés - vigorous, longer occupancy window
    #[must_use]
    pub fn xaraes() -> Self {
        ForageSpecies::new("Xaraés", 1.6, 0.95, 35)
    }

    /// Brachiaria brizantha cv. Paiaguás
    #[must_use]
    pub fn paiaguas() -> Self {
        ForageSpecies::new("Paiaguás", 1.2, 0.85, 28)
    }

    /// Brachiaria decumbens
    #[must_use]
    pub fn decumbens() -> Self {
        ForageSpecies::new("Decumbens", 1.0, 0.75, 24)
    }

    /// Brachiaria humidicola - slow grower, tolerates waterlogged soils
    #[must_use]
    pub fn humidicola() -> Self {
        ForageSpecies::new("Humidicola", 0.8, 0.70, 24)
    }

    /// Brachiaria brizantha cv. MG-5
    #[must_use]
    pub fn mg5() -> Self {
        ForageSpecies::new("MG-5", 1.6, 0.95, 35)
    }

    // ------------------------------------------------------------------
    // Panicum maximum group - tall, fast growers
    // ------------------------------------------------------------------

    /// Panicum maximum cv. Mombaça
    #[must_use]
    pub fn mombaca() -> Self {
        ForageSpecies::new("Mombaça", 2.5, 1.00, 35)
    }

    /// Panicum maximum cv. Tanzânia
    #[must_use]
    pub fn tanzania() -> Self {
        ForageSpecies::new("Tanzânia", 2.3, 0.95, 32)
    }

    /// Panicum maximum cv. Zuri
    #[must_use]
    pub fn zuri() -> Self {
        ForageSpecies::new("Zuri", 2.6, 1.05, 35)
    }

    /// Panicum maximum cv. Massai
    #[must_use]
    pub fn massai() -> Self {
        ForageSpecies::new("Massai", 1.8, 0.90, 28)
    }

    /// Panicum maximum cv. Aruana
    #[must_use]
    pub fn aruana() -> Self {
        ForageSpecies::new("Aruana", 1.7, 0.85, 28)
    }

    // ------------------------------------------------------------------
    // Cynodon group - short cycle, intensive rotation
    // ------------------------------------------------------------------

    /// Cynodon cv. Tifton 85
    #[must_use]
    pub fn tifton_85() -> Self {
        ForageSpecies::new("Tifton 85", 2.0, 0.70, 21)
    }

    /// Cynodon cv. Tifton 68
    #[must_use]
    pub fn tifton_68() -> Self {
        ForageSpecies::new("Tifton 68", 2.0, 0.70, 21)
    }

    /// Cynodon cv. Coastcross
    #[must_use]
    pub fn coastcross() -> Self {
        ForageSpecies::new("Coastcross", 1.6, 0.75, 24)
    }

    /// Cynodon cv. Jiggs
    #[must_use]
    pub fn jiggs() -> Self {
        ForageSpecies::new("Jiggs", 1.9, 0.72, 22)
    }

    // ------------------------------------------------------------------
    // Other genera
    // ------------------------------------------------------------------

    /// Andropogon gayanus
    #[must_use]
    pub fn andropogon() -> Self {
        ForageSpecies::new("Andropogon", 1.8, 0.80, 28)
    }

    /// Pennisetum purpureum (elephant grass) - very tall, long cycle
    #[must_use]
    pub fn elephant_grass() -> Self {
        ForageSpecies::new("Capim Elefante", 3.5, 1.10, 40)
    }

    /// Pennisetum purpureum cv. BRS Capiaçu
    #[must_use]
    pub fn capiacu() -> Self {
        ForageSpecies::new("Capiaçu", 4.0, 1.15, 42)
    }
}

/// Injected species-parameter table
///
/// The engine never consults compiled-in globals; a table is built from the
/// Brazilian defaults (or from fixtures in tests) and passed in at engine
/// construction. Unknown or missing species resolve to the documented
/// fallback entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesTable {
    entries: FxHashMap<String, ForageSpecies>,
    fallback: ForageSpecies,
}

impl SpeciesTable {
    /// Empty table; every lookup resolves to the fallback
    #[must_use]
    pub fn empty() -> Self {
        SpeciesTable {
            entries: FxHashMap::default(),
            fallback: ForageSpecies::fallback(),
        }
    }

    /// Table preloaded with the Brazilian cultivar set
    #[must_use]
    pub fn brazilian_defaults() -> Self {
        let mut table = SpeciesTable::empty();
        for species in [
            ForageSpecies::marandu(),
            ForageSpecies::piata(),
            ForageSpecies::xaraes(),
            ForageSpecies::paiaguas(),
            ForageSpecies::decumbens(),
            ForageSpecies::humidicola(),
            ForageSpecies::mg5(),
            ForageSpecies::mombaca(),
            ForageSpecies::tanzania(),
            ForageSpecies::zuri(),
            ForageSpecies::massai(),
            ForageSpecies::aruana(),
            ForageSpecies::tifton_85(),
            ForageSpecies::tifton_68(),
            ForageSpecies::coastcross(),
            ForageSpecies::jiggs(),
            ForageSpecies::andropogon(),
            ForageSpecies::elephant_grass(),
            ForageSpecies::capiacu(),
        ] {
            table.insert(species);
        }
        table
    }

    /// Replace the fallback entry used for unrecognized species
    #[must_use]
    pub fn with_fallback(mut self, fallback: ForageSpecies) -> Self {
        self.fallback = fallback;
        self
    }

    /// Insert or replace a species entry, keyed by its name
    pub fn insert(&mut self, species: ForageSpecies) {
        self.entries.insert(species.name.clone(), species);
    }

    /// Resolve a species by name; `None` or an unknown name yields the
    /// fallback entry
    #[must_use]
    pub fn get(&self, name: Option<&str>) -> &ForageSpecies {
        name.and_then(|n| self.entries.get(n))
            .unwrap_or(&self.fallback)
    }

    /// Number of registered species (fallback excluded)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no species are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SpeciesTable {
    fn default() -> Self {
        SpeciesTable::brazilian_defaults()
    }
}
