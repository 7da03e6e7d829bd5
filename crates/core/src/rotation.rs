//! Rotation ranking: order candidate paddocks for an incoming lot
//!
//! Candidates are filtered for eligibility, assigned a priority tier, and
//! ordered by tier then elapsed rest. The same ordering serves both
//! "suggest a paddock for this lot" and "list paddocks ready for any
//! entry".

use crate::core_types::paddock::Paddock;
use crate::core_types::units::Centimeters;
use crate::estimation::{HeightEstimate, HeightSource};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Priority tier for a candidate paddock, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankTier {
    /// Never grazed before and already at the entry threshold
    FreshReady,
    /// Previously grazed, at the threshold, minimum rest completed
    RestedReady,
    /// At the threshold but the minimum rest is not yet complete
    /// (height caught up early)
    ReadyEarly,
    /// Still below the entry threshold
    Recovering,
}

impl RankTier {
    /// Numeric priority score (higher ranks first)
    #[must_use]
    pub fn score(self) -> u16 {
        match self {
            RankTier::FreshReady => 200,
            RankTier::RestedReady => 100,
            RankTier::ReadyEarly => 90,
            RankTier::Recovering => 10,
        }
    }
}

/// One ranked destination candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub paddock_id: u64,
    pub name: String,
    pub species: Option<String>,
    pub tier: RankTier,
    pub score: u16,
    /// Elapsed rest days (the within-tier ordering key)
    pub rest_days: u32,
    pub min_rest_days: u16,
    pub height: Centimeters,
    pub height_source: HeightSource,
    pub entry_height: Centimeters,
    pub never_occupied: bool,
}

impl RankedCandidate {
    /// True for any tier whose height already meets the entry threshold
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.tier != RankTier::Recovering
    }
}

/// Total order: tier score descending, then rest days descending, then
/// paddock id ascending as the deterministic final key
#[must_use]
pub fn compare_candidates(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(b.rest_days.cmp(&a.rest_days))
        .then(a.paddock_id.cmp(&b.paddock_id))
}

/// Rank candidate paddocks for an incoming lot.
///
/// Eligibility: blocked paddocks, inactive paddocks, paddocks in
/// `occupied_ids`, and paddocks with no height data at all are excluded.
/// Each surviving paddock is paired with its height estimate (already
/// computed by the estimation engine).
#[must_use]
pub fn rank_candidates(
    candidates: &[(&Paddock, HeightEstimate)],
    occupied_ids: &FxHashSet<u64>,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .filter(|&&(paddock, _)| {
            paddock.active
                && !paddock.is_blocked()
                && !occupied_ids.contains(&paddock.id)
                && !paddock.has_no_height_data()
        })
        .map(|&(paddock, estimate)| {
            let tier = assign_tier(paddock, estimate.height);
            RankedCandidate {
                paddock_id: paddock.id,
                name: paddock.name.clone(),
                species: paddock.species.clone(),
                tier,
                score: tier.score(),
                rest_days: paddock.rest_days,
                min_rest_days: paddock.min_rest_days,
                height: estimate.height,
                height_source: estimate.source,
                entry_height: paddock.entry_height(),
                never_occupied: !paddock.ever_occupied,
            }
        })
        .collect();

    ranked.sort_by(compare_candidates);
    ranked
}

fn assign_tier(paddock: &Paddock, height: Centimeters) -> RankTier {
    if height < paddock.entry_height() {
        return RankTier::Recovering;
    }
    if !paddock.ever_occupied {
        return RankTier::FreshReady;
    }
    if paddock.rest_days >= u32::from(paddock.min_rest_days) {
        RankTier::RestedReady
    } else {
        RankTier::ReadyEarly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::paddock::OperatingMode;

    fn paddock(id: u64, rest_days: u32, ever_occupied: bool) -> Paddock {
        Paddock::new(id, format!("P{id}"), 2.0, None, 25.0, 15.0)
            .unwrap()
            .with_legacy_height(20.0)
            .with_mode(OperatingMode::Resting, rest_days)
            .with_history(ever_occupied)
    }

    fn estimate(height: f64) -> HeightEstimate {
        HeightEstimate {
            height: Centimeters::new(height),
            source: HeightSource::Projected,
        }
    }

    #[test]
    fn test_tier_assignment() {
        let fresh = paddock(1, 5, false);
        let rested = paddock(2, 35, true);
        let early = paddock(3, 10, true);
        let recovering = paddock(4, 40, true);

        let ranked = rank_candidates(
            &[
                (&recovering, estimate(20.0)),
                (&early, estimate(26.0)),
                (&rested, estimate(26.0)),
                (&fresh, estimate(26.0)),
            ],
            &FxHashSet::default(),
        );
        let tiers: Vec<RankTier> = ranked.iter().map(|c| c.tier).collect();
        assert_eq!(
            tiers,
            vec![
                RankTier::FreshReady,
                RankTier::RestedReady,
                RankTier::ReadyEarly,
                RankTier::Recovering
            ]
        );
        assert_eq!(ranked[0].score, 200);
        assert!(!ranked[3].is_ready());
    }

    #[test]
    fn test_within_tier_longest_rested_first() {
        let a = paddock(1, 32, true);
        let b = paddock(2, 45, true);
        let ranked = rank_candidates(
            &[(&a, estimate(26.0)), (&b, estimate(26.0))],
            &FxHashSet::default(),
        );
        assert_eq!(ranked[0].paddock_id, 2);
        assert_eq!(ranked[1].paddock_id, 1);
    }

    #[test]
    fn test_eligibility_filters() {
        let blocked = paddock(1, 40, true).blocked(Some("spraying"));
        let inactive = paddock(2, 40, true).deactivated();
        let occupied = paddock(3, 40, true);
        let mut no_data = paddock(4, 40, true);
        no_data.legacy_height = None;
        let eligible = paddock(5, 40, true);

        let mut occupied_ids = FxHashSet::default();
        occupied_ids.insert(3);

        let ranked = rank_candidates(
            &[
                (&blocked, estimate(26.0)),
                (&inactive, estimate(26.0)),
                (&occupied, estimate(26.0)),
                (&no_data, estimate(26.0)),
                (&eligible, estimate(26.0)),
            ],
            &occupied_ids,
        );
        // Only the eligible paddock survives the filter
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].paddock_id, 5);
    }

    #[test]
    fn test_order_is_total_and_deterministic() {
        // Identical tier and rest days: id breaks the tie
        let a = paddock(7, 30, true);
        let b = paddock(3, 30, true);
        let ranked = rank_candidates(
            &[(&a, estimate(26.0)), (&b, estimate(26.0))],
            &FxHashSet::default(),
        );
        assert_eq!(ranked[0].paddock_id, 3);

        // compare_candidates is antisymmetric on distinct candidates
        assert_eq!(
            compare_candidates(&ranked[0], &ranked[1]),
            Ordering::Less
        );
        assert_eq!(
            compare_candidates(&ranked[1], &ranked[0]),
            Ordering::Greater
        );
        assert_eq!(
            compare_candidates(&ranked[0], &ranked[0]),
            Ordering::Equal
        );
    }
}
