//! Paddock and lot status classification
//!
//! A pure state machine over the paddock snapshot, its derived height, and
//! the elapsed counters. First matching state wins; re-running with the
//! same inputs always yields the same report.

use crate::core_types::forage::ForageSpecies;
use crate::core_types::herd::Lot;
use crate::core_types::paddock::{OperatingMode, Paddock};
use crate::core_types::units::Centimeters;
use crate::estimation::{days_to_entry_height, required_rest_days, HeightEstimate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed ceiling for the rest-phase inefficiency warning (days).
///
/// A single constant, independent of species-specific minimum rest
/// periods.
pub const INEFFICIENCY_CEILING_DAYS: u32 = 30;

/// Fraction of the technical occupancy window at which exit preparation
/// starts
pub const PREPARE_EXIT_FRACTION: f64 = 0.8;

/// Operational status of a paddock, in precedence order (first match wins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddockStatus {
    /// Manually blocked by an operator
    Blocked,
    /// No measured or projected height available at all
    NoHeightData,
    /// Occupied at or past the technical occupancy window
    ExitNow,
    /// Occupied at 80% or more of the technical window
    PrepareExit,
    /// Occupied, within the window
    GrazingInProgress,
    /// Resting and at or above the entry threshold
    EntryCleared,
    /// Resting between the exit and entry thresholds
    Recovering,
    /// Resting below the exit threshold
    UrgentRecovery,
}

/// Severity color for UI alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

/// Classification result for one paddock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: PaddockStatus,
    pub severity: Severity,
    /// Short recommended action for the manager
    #[serde(skip_deserializing)]
    pub action: &'static str,
    /// Human-readable detail line
    pub message: String,
    /// Elapsed/required fraction where meaningful (occupancy progress or
    /// rest progress); `None` for blocked/critical/no-data states
    pub progress: Option<f64>,
    /// Centimeters still missing to the entry threshold (0 when cleared);
    /// only meaningful while resting
    pub gap_cm: Option<Centimeters>,
    /// Estimated days until the entry threshold is reached
    pub days_to_ready: Option<f64>,
    /// Rest has exceeded the fixed ceiling without reaching the entry
    /// threshold
    pub inefficiency: bool,
}

/// Classify a paddock.
///
/// `estimate` is the output of the height-estimation engine; `None` means
/// no height information exists in any form. Pure and idempotent: no
/// hidden state, safe to invoke repeatedly.
#[must_use]
pub fn classify_status(
    paddock: &Paddock,
    estimate: Option<&HeightEstimate>,
    species: &ForageSpecies,
) -> StatusReport {
    // 1. Manual block beats everything
    if let Some(block) = &paddock.manual_block {
        let reason = block.reason.as_deref().unwrap_or("not informed");
        return StatusReport {
            status: PaddockStatus::Blocked,
            severity: Severity::Purple,
            action: "Wait",
            message: format!("Reason: {reason}"),
            progress: None,
            gap_cm: None,
            days_to_ready: None,
            inefficiency: false,
        };
    }

    // 2. Nothing to classify on
    let Some(estimate) = estimate else {
        return StatusReport {
            status: PaddockStatus::NoHeightData,
            severity: Severity::Orange,
            action: "Measure height",
            message: format!("No height data; resting {} day(s)", paddock.rest_days),
            progress: None,
            gap_cm: None,
            days_to_ready: Some(f64::from(required_rest_days(
                species,
                paddock.entry_height(),
                paddock.exit_height(),
            ))),
            inefficiency: false,
        };
    };

    let height = estimate.height;
    let entry = paddock.entry_height();
    let exit = paddock.exit_height();

    // 3-5. Occupied states are driven by the technical window
    if paddock.mode == OperatingMode::Occupied {
        let window = u32::from(species.occupancy_window_days);
        let elapsed = paddock.occupancy_days;
        let fraction = if window > 0 {
            f64::from(elapsed) / f64::from(window)
        } else {
            1.0
        };

        if elapsed >= window {
            return StatusReport {
                status: PaddockStatus::ExitNow,
                severity: Severity::Red,
                action: "Remove the lot now!",
                message: format!("Technical window reached: {elapsed}/{window} days"),
                progress: None,
                gap_cm: None,
                days_to_ready: None,
                inefficiency: false,
            };
        }
        if fraction >= PREPARE_EXIT_FRACTION {
            return StatusReport {
                status: PaddockStatus::PrepareExit,
                severity: Severity::Orange,
                action: "Prepare exit",
                message: format!("{height} / entry {entry}; {elapsed}/{window} days (80%)"),
                progress: Some(fraction),
                gap_cm: None,
                days_to_ready: None,
                inefficiency: false,
            };
        }
        return StatusReport {
            status: PaddockStatus::GrazingInProgress,
            severity: Severity::Blue,
            action: "Grazing in progress",
            message: format!("{height} / entry {entry}; {elapsed}/{window} days"),
            progress: Some(fraction),
            gap_cm: None,
            days_to_ready: None,
            inefficiency: false,
        };
    }

    // 6-8. Resting states are driven by height vs. thresholds
    let rest = paddock.rest_days;
    let over_ceiling = rest > INEFFICIENCY_CEILING_DAYS && height < entry;

    if height >= entry {
        return StatusReport {
            status: PaddockStatus::EntryCleared,
            severity: Severity::Green,
            action: "Entry cleared!",
            message: format!("{height} after {rest} day(s) of rest"),
            progress: None,
            gap_cm: Some(Centimeters::ZERO),
            days_to_ready: Some(0.0),
            inefficiency: false,
        };
    }

    let days_to_ready = days_to_entry_height(species, entry, Some(height));
    let gap = entry - height;

    if height >= exit {
        let required = days_to_ready.ceil().max(1.0);
        let progress = (f64::from(rest) / required).min(1.0);
        return StatusReport {
            status: PaddockStatus::Recovering,
            severity: Severity::Yellow,
            action: "Recovering",
            message: format!("{height} / entry {entry}; {rest} day(s) rested"),
            progress: Some(progress),
            gap_cm: Some(gap),
            days_to_ready: Some(days_to_ready),
            inefficiency: over_ceiling,
        };
    }

    StatusReport {
        status: PaddockStatus::UrgentRecovery,
        severity: Severity::Red,
        action: "Urgent recovery",
        message: format!("{height} below exit {exit}"),
        progress: None,
        gap_cm: Some(gap),
        days_to_ready: Some(days_to_ready),
        inefficiency: over_ceiling,
    }
}

// ============================================================================
// LOT-LEVEL STATUS
// ============================================================================

/// Placement status of a lot, derived from its paddock's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotStatus {
    /// No current paddock
    AwaitingPlacement,
    /// Its paddock has no height information
    NoHeightData,
    /// Sward below the paddock entry threshold; pull the lot out
    PastureLow,
    /// Its paddock is manually blocked
    Blocked,
    /// Past the planned occupancy duration
    OverLimit,
    /// On the last planned day
    LastDay,
    /// Within plan
    InOccupation,
}

/// Classification result for one lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotStatusReport {
    pub status: LotStatus,
    pub severity: Severity,
    #[serde(skip_deserializing)]
    pub action: &'static str,
    /// Planned days remaining on the current paddock, where meaningful
    pub days_remaining: Option<i64>,
    pub message: String,
}

/// Classify a lot against its current paddock (if any).
///
/// The paddock comparison uses the *entry* threshold: once the sward drops
/// below it, continued grazing eats into recovery reserve, so the
/// recommendation is to move the lot even before the exit threshold is
/// breached.
#[must_use]
pub fn classify_lot(
    lot: &Lot,
    paddock: Option<&Paddock>,
    estimate: Option<&HeightEstimate>,
    now: DateTime<Utc>,
) -> LotStatusReport {
    let Some(paddock) = paddock.filter(|_| lot.current_paddock.is_some()) else {
        return LotStatusReport {
            status: LotStatus::AwaitingPlacement,
            severity: Severity::Blue,
            action: "Awaiting placement",
            days_remaining: None,
            message: "No paddock assigned".to_owned(),
        };
    };

    let days_on = lot.days_on_paddock(now);
    let max_days = i64::from(paddock.target_occupancy_days);

    let Some(estimate) = estimate else {
        return LotStatusReport {
            status: LotStatus::NoHeightData,
            severity: Severity::Yellow,
            action: "Update measurement",
            days_remaining: None,
            message: format!("Paddock {} has no height data", paddock.name),
        };
    };

    if estimate.height < paddock.entry_height() {
        let mut message = format!(
            "Pasture low: {} / entry {}",
            estimate.height,
            paddock.entry_height()
        );
        if estimate.is_projected() {
            message.push_str(" (projected)");
        }
        return LotStatusReport {
            status: LotStatus::PastureLow,
            severity: Severity::Red,
            action: "Remove the lot now",
            days_remaining: Some(0),
            message,
        };
    }

    if paddock.is_blocked() {
        return LotStatusReport {
            status: LotStatus::Blocked,
            severity: Severity::Purple,
            action: "Remove immediately",
            days_remaining: Some(0),
            message: format!("Paddock {} is blocked", paddock.name),
        };
    }

    if days_on > max_days {
        return LotStatusReport {
            status: LotStatus::OverLimit,
            severity: Severity::Red,
            action: "Remove the lot now",
            days_remaining: Some(0),
            message: format!("Past the plan: {days_on}/{max_days} days"),
        };
    }
    if days_on >= max_days - 1 {
        return LotStatusReport {
            status: LotStatus::LastDay,
            severity: Severity::Orange,
            action: "Prepare exit",
            days_remaining: Some(max_days - days_on),
            message: format!("Last day: {days_on}/{max_days} days"),
        };
    }
    LotStatusReport {
        status: LotStatus::InOccupation,
        severity: Severity::Blue,
        action: "In occupation",
        days_remaining: Some(max_days - days_on),
        message: format!("{days_on}/{max_days} days"),
    }
}
