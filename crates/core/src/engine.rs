//! Engine facade: injected configuration plus the high-level operations
//!
//! [`RotationEngine`] owns the species and category parameter tables and
//! exposes the estimation, classification, and ranking entry points as
//! side-effect-free methods over snapshots. It holds no other state, so a
//! single instance is safe to share across threads; farm-wide evaluation
//! fans out with rayon.

use crate::core_types::forage::{ForageSpecies, SpeciesTable};
use crate::core_types::herd::{CategoryTable, Lot};
use crate::core_types::paddock::Paddock;
use crate::error::EngineError;
use crate::estimation::{
    estimate_with_snapshot, EstimationSnapshot, GrazingPressure, HeightEstimate,
};
use crate::rotation::{rank_candidates, RankedCandidate};
use crate::status::{classify_lot, classify_status, LotStatusReport, PaddockStatus, StatusReport};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Full evaluation of one paddock at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddockEvaluation {
    pub paddock_id: u64,
    pub name: String,
    /// `None` when the paddock has no height data in any form
    pub estimate: Option<HeightEstimate>,
    /// Estimation working record, for diagnostics
    pub snapshot: Option<EstimationSnapshot>,
    pub report: StatusReport,
}

/// A farm's classified paddocks grouped into rotation phases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationPlan {
    /// Entry cleared
    pub available: Vec<PaddockEvaluation>,
    /// Recovering between thresholds
    pub resting: Vec<PaddockEvaluation>,
    /// Grazing in progress
    pub occupied: Vec<PaddockEvaluation>,
    /// Manually blocked
    pub blocked: Vec<PaddockEvaluation>,
    pub total_paddocks: usize,
    pub total_head: u32,
}

/// Alert for an occupied paddock past its technical window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitAlert {
    pub paddock_id: u64,
    pub name: String,
    pub message: String,
    #[serde(skip_deserializing)]
    pub action: &'static str,
}

/// The rotation-decision engine
///
/// Species and category parameter tables are injected at construction so
/// tests can substitute fixtures; there are no compiled-in globals behind
/// the methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationEngine {
    species: SpeciesTable,
    categories: CategoryTable,
}

impl Default for RotationEngine {
    /// Engine over the Brazilian default tables
    fn default() -> Self {
        RotationEngine::new(
            SpeciesTable::brazilian_defaults(),
            CategoryTable::brazilian_defaults(),
        )
    }
}

impl RotationEngine {
    /// Build an engine over the supplied parameter tables
    #[must_use]
    pub fn new(species: SpeciesTable, categories: CategoryTable) -> Self {
        RotationEngine {
            species,
            categories,
        }
    }

    /// The injected species table
    #[must_use]
    pub fn species(&self) -> &SpeciesTable {
        &self.species
    }

    /// The injected category table
    #[must_use]
    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Resolve a paddock's forage species (fallback for unknown names)
    #[must_use]
    pub fn species_for(&self, paddock: &Paddock) -> &ForageSpecies {
        self.species.get(paddock.species.as_deref())
    }

    /// Estimate a paddock's current sward height.
    ///
    /// # Errors
    /// [`EngineError::MeasurementInFuture`] for a measurement dated after
    /// `now`; degraded consumption math is tagged in the result instead of
    /// erroring.
    pub fn estimate_height(
        &self,
        paddock: &Paddock,
        lot: Option<&Lot>,
        now: DateTime<Utc>,
    ) -> Result<HeightEstimate, EngineError> {
        let pressure = lot.map(|l| GrazingPressure::from_lot(l, &self.categories));
        crate::estimation::estimate_height(
            paddock,
            self.species_for(paddock),
            pressure.as_ref(),
            now,
        )
    }

    /// Classify a paddock's operational status.
    ///
    /// A paddock with no height data in any form is classified
    /// `NoHeightData` rather than being projected from nothing - the
    /// zero-history projection is reserved for explicit estimation calls.
    ///
    /// # Errors
    /// Same as [`RotationEngine::estimate_height`].
    pub fn classify_status(
        &self,
        paddock: &Paddock,
        lot: Option<&Lot>,
        now: DateTime<Utc>,
    ) -> Result<StatusReport, EngineError> {
        Ok(self.evaluate_paddock(paddock, lot, now)?.report)
    }

    /// Classify a lot's placement status against its current paddock.
    ///
    /// # Errors
    /// Same as [`RotationEngine::estimate_height`].
    pub fn classify_lot(
        &self,
        lot: &Lot,
        paddock: Option<&Paddock>,
        now: DateTime<Utc>,
    ) -> Result<LotStatusReport, EngineError> {
        let estimate = match paddock {
            Some(p) if !p.has_no_height_data() => Some(self.estimate_height(p, Some(lot), now)?),
            _ => None,
        };
        Ok(classify_lot(lot, paddock, estimate.as_ref(), now))
    }

    /// Estimate and classify one paddock.
    ///
    /// # Errors
    /// Same as [`RotationEngine::estimate_height`].
    pub fn evaluate_paddock(
        &self,
        paddock: &Paddock,
        lot: Option<&Lot>,
        now: DateTime<Utc>,
    ) -> Result<PaddockEvaluation, EngineError> {
        let species = self.species_for(paddock);
        let (estimate, snapshot) = if paddock.has_no_height_data() {
            (None, None)
        } else {
            let pressure = lot.map(|l| GrazingPressure::from_lot(l, &self.categories));
            let (estimate, snapshot) =
                estimate_with_snapshot(paddock, species, pressure.as_ref(), now)?;
            (Some(estimate), Some(snapshot))
        };
        let report = classify_status(paddock, estimate.as_ref(), species);
        Ok(PaddockEvaluation {
            paddock_id: paddock.id,
            name: paddock.name.clone(),
            estimate,
            snapshot,
            report,
        })
    }

    /// Evaluate every paddock of a farm in parallel.
    ///
    /// The engine is pure over snapshots, so the fan-out is safe; lots are
    /// matched to paddocks by their `current_paddock` reference.
    ///
    /// # Errors
    /// The first [`EngineError`] from any paddock evaluation.
    pub fn evaluate_farm(
        &self,
        paddocks: &[Paddock],
        lots: &[Lot],
        now: DateTime<Utc>,
    ) -> Result<Vec<PaddockEvaluation>, EngineError> {
        let by_paddock = lots_by_paddock(lots);
        paddocks
            .par_iter()
            .map(|paddock| {
                let lot = by_paddock.get(&paddock.id).copied();
                self.evaluate_paddock(paddock, lot, now)
            })
            .collect()
    }

    /// Group a farm's paddocks into rotation phases.
    ///
    /// # Errors
    /// Same as [`RotationEngine::evaluate_farm`].
    pub fn plan_rotation(
        &self,
        paddocks: &[Paddock],
        lots: &[Lot],
        now: DateTime<Utc>,
    ) -> Result<RotationPlan, EngineError> {
        let evaluations = self.evaluate_farm(paddocks, lots, now)?;
        let total_paddocks = evaluations.len();
        let total_head = lots
            .iter()
            .filter(|lot| lot.active)
            .map(|lot| lot.head_count)
            .sum();

        let mut plan = RotationPlan {
            available: Vec::new(),
            resting: Vec::new(),
            occupied: Vec::new(),
            blocked: Vec::new(),
            total_paddocks,
            total_head,
        };
        for evaluation in evaluations {
            match evaluation.report.status {
                PaddockStatus::EntryCleared => plan.available.push(evaluation),
                PaddockStatus::Recovering => plan.resting.push(evaluation),
                PaddockStatus::GrazingInProgress => plan.occupied.push(evaluation),
                PaddockStatus::Blocked => plan.blocked.push(evaluation),
                _ => {}
            }
        }
        Ok(plan)
    }

    /// List occupied paddocks already past their technical window.
    ///
    /// # Errors
    /// Same as [`RotationEngine::evaluate_farm`].
    pub fn exit_overdue_alerts(
        &self,
        paddocks: &[Paddock],
        lots: &[Lot],
        now: DateTime<Utc>,
    ) -> Result<Vec<ExitAlert>, EngineError> {
        let evaluations = self.evaluate_farm(paddocks, lots, now)?;
        Ok(evaluations
            .into_iter()
            .filter(|e| e.report.status == PaddockStatus::ExitNow)
            .map(|e| ExitAlert {
                paddock_id: e.paddock_id,
                message: format!("Paddock {} is past its exit point!", e.name),
                name: e.name,
                action: e.report.action,
            })
            .collect())
    }

    /// Rank candidate destination paddocks for an incoming lot.
    ///
    /// Serves both "suggest a paddock for this lot" and "list paddocks
    /// ready for any entry" (filter the result with
    /// [`RankedCandidate::is_ready`]).
    ///
    /// # Errors
    /// Same as [`RotationEngine::estimate_height`], for any candidate.
    pub fn rank_candidates(
        &self,
        paddocks: &[Paddock],
        occupied_ids: &FxHashSet<u64>,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedCandidate>, EngineError> {
        let mut estimated: Vec<(&Paddock, HeightEstimate)> = Vec::with_capacity(paddocks.len());
        for paddock in paddocks {
            if paddock.has_no_height_data() {
                continue;
            }
            // Candidates are resting, so no lot pressure applies
            let estimate = self.estimate_height(paddock, None, now)?;
            estimated.push((paddock, estimate));
        }
        Ok(rank_candidates(&estimated, occupied_ids))
    }
}

/// Index active lots by the paddock they currently occupy
fn lots_by_paddock(lots: &[Lot]) -> FxHashMap<u64, &Lot> {
    let mut by_paddock = FxHashMap::default();
    for lot in lots.iter().filter(|lot| lot.active) {
        if let Some(paddock_id) = lot.current_paddock {
            by_paddock.insert(paddock_id, lot);
        }
    }
    by_paddock
}
