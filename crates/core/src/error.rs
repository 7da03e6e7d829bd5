//! Engine error taxonomy
//!
//! Only construction-time invariant violations are surfaced as hard errors.
//! Degraded computation (climate lookup failure, consumption-model failure)
//! is reported through value provenance instead, never through `Err`.

use thiserror::Error;

/// Errors for structurally invalid inputs.
///
/// These are always surfaced to the caller and never silently coerced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Paddock area must be strictly positive
    #[error("paddock area must be positive, got {0} ha")]
    NonPositiveArea(f64),

    /// Exit threshold must lie strictly below the entry threshold
    #[error("exit threshold {exit_cm} cm must be below entry threshold {entry_cm} cm")]
    ThresholdOrder { entry_cm: f64, exit_cm: f64 },

    /// A height measurement is dated in the future relative to evaluation time
    #[error("measurement is {0} day(s) in the future")]
    MeasurementInFuture(i64),

    /// Custom category weight outside the accepted live-weight range
    #[error("custom category weight {0} kg outside the 50-1200 kg range")]
    CustomWeightRange(f64),

    /// Custom consumption override outside the accepted range
    #[error("custom consumption override {0} cm/day outside the 0.1-3.0 cm/day range")]
    CustomConsumptionRange(f64),

    /// A stocking input was NaN, infinite, or negative
    #[error("stocking input is not a finite non-negative number: {0}")]
    MalformedStockingInput(f64),
}
