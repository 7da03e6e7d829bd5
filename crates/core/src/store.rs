//! Read interface over paddock and lot records
//!
//! Persistence is an external collaborator: the engine only ever sees
//! snapshots handed to it. This module defines the narrow read trait the
//! surrounding CRUD layer implements, plus the derivations that turn the
//! movement audit trail into the elapsed-rest and occupancy facts the
//! snapshots carry, and an in-memory implementation used by tests.

use crate::core_types::herd::{Lot, MovementEvent};
use crate::core_types::paddock::{OperatingMode, Paddock};
use chrono::{DateTime, Utc};
use rustc_hash::{FxHashMap, FxHashSet};

/// Read-only access to a farm's grazing records
pub trait GrazingStore {
    /// Active paddocks of a farm
    fn paddocks(&self, farm_id: u64) -> Vec<Paddock>;

    /// Active lots of a farm
    fn lots(&self, farm_id: u64) -> Vec<Lot>;

    /// Movement audit trail touching a paddock (as origin or destination)
    fn movements_for(&self, paddock_id: u64) -> Vec<MovementEvent>;

    /// Ids of paddocks currently occupied by any active lot
    fn occupied_paddock_ids(&self, farm_id: u64) -> FxHashSet<u64> {
        self.lots(farm_id)
            .iter()
            .filter_map(|lot| lot.current_paddock)
            .collect()
    }

    /// Animals currently on a paddock, summed over active lots
    fn head_count_on(&self, farm_id: u64, paddock_id: u64) -> u32 {
        self.lots(farm_id)
            .iter()
            .filter(|lot| lot.current_paddock == Some(paddock_id))
            .map(|lot| lot.head_count)
            .sum()
    }
}

/// Days elapsed since the latest movement touching a paddock.
///
/// `None` when the trail has no event for it (a paddock that never saw a
/// movement has no derivable rest clock).
#[must_use]
pub fn days_since_last_movement(
    movements: &[MovementEvent],
    paddock_id: u64,
    now: DateTime<Utc>,
) -> Option<i64> {
    movements
        .iter()
        .filter(|m| m.origin == Some(paddock_id) || m.destination == Some(paddock_id))
        .map(|m| m.moved_at)
        .max()
        .map(|latest| (now - latest).num_days().max(0))
}

/// Whether any lot has ever grazed the paddock, per the audit trail.
///
/// Both inbound and outbound events count: an outbound movement implies
/// the paddock was occupied before it.
#[must_use]
pub fn ever_occupied(movements: &[MovementEvent], paddock_id: u64) -> bool {
    movements
        .iter()
        .any(|m| m.origin == Some(paddock_id) || m.destination == Some(paddock_id))
}

/// In-memory store for tests and examples
#[derive(Debug, Default)]
pub struct InMemoryStore {
    paddocks: FxHashMap<u64, Vec<Paddock>>,
    lots: FxHashMap<u64, Vec<Lot>>,
    movements: Vec<MovementEvent>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    pub fn add_paddock(&mut self, farm_id: u64, paddock: Paddock) {
        self.paddocks.entry(farm_id).or_default().push(paddock);
    }

    pub fn add_lot(&mut self, farm_id: u64, lot: Lot) {
        self.lots.entry(farm_id).or_default().push(lot);
    }

    /// Append an immutable movement event
    pub fn record_movement(&mut self, event: MovementEvent) {
        self.movements.push(event);
    }

    /// Paddocks with their rest/occupancy facts refreshed from the
    /// movement trail: `ever_occupied` from any inbound movement,
    /// `rest_days` from the latest movement for paddocks at rest.
    #[must_use]
    pub fn hydrated_paddocks(&self, farm_id: u64, now: DateTime<Utc>) -> Vec<Paddock> {
        self.paddocks(farm_id)
            .into_iter()
            .map(|mut paddock| {
                paddock.ever_occupied =
                    paddock.ever_occupied || ever_occupied(&self.movements, paddock.id);
                if paddock.mode == OperatingMode::Resting {
                    if let Some(days) =
                        days_since_last_movement(&self.movements, paddock.id, now)
                    {
                        paddock.rest_days = days.max(0) as u32;
                    }
                }
                paddock
            })
            .collect()
    }
}

impl GrazingStore for InMemoryStore {
    fn paddocks(&self, farm_id: u64) -> Vec<Paddock> {
        self.paddocks
            .get(&farm_id)
            .into_iter()
            .flatten()
            .filter(|p| p.active)
            .cloned()
            .collect()
    }

    fn lots(&self, farm_id: u64) -> Vec<Lot> {
        self.lots
            .get(&farm_id)
            .into_iter()
            .flatten()
            .filter(|l| l.active)
            .cloned()
            .collect()
    }

    fn movements_for(&self, paddock_id: u64) -> Vec<MovementEvent> {
        self.movements
            .iter()
            .filter(|m| m.origin == Some(paddock_id) || m.destination == Some(paddock_id))
            .cloned()
            .collect()
    }
}
