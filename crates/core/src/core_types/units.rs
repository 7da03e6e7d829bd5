//! Semantic unit types for type-safe agronomic quantity handling
//!
//! This module provides newtype wrappers for the physical quantities the
//! estimation engine works with, to prevent accidental mixing of
//! incompatible units (e.g., sward height in centimeters with paddock area
//! in hectares, or live weight with animal units).
//!
//! # Design Philosophy
//! - All quantities use f64; sward heights are reported to one decimal place
//! - Implements common traits (Add, Sub, Mul, Ord, Display, etc.)
//! - Serde support for serialization
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//!
//! # Usage
//! ```
//! use pasture_sim_core::core_types::units::{Centimeters, CentimetersPerDay};
//!
//! let baseline = Centimeters::new(15.0);
//! let growth = CentimetersPerDay::new(1.2);
//! let projected = baseline + growth * 10.0;
//! assert_eq!(*projected, 27.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Mul, Sub, SubAssign};

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

macro_rules! unit_common {
    ($name:ident) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                f64_total_cmp(self.0, other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }
    };
}

// ============================================================================
// SWARD HEIGHT
// ============================================================================

/// Sward height in centimeters
///
/// The paddock is a scalar-height abstraction; this is the single spatial
/// quantity the engine estimates and classifies on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Centimeters(f64);

unit_common!(Centimeters);

impl Centimeters {
    /// Zero height (bare ground)
    pub const ZERO: Centimeters = Centimeters(0.0);

    /// Create a new height. Heights are physical lengths; negative values
    /// are a programming error, not a recoverable input.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Centimeters::new: height cannot be negative");
        Centimeters(value)
    }

    /// Round to one decimal place, the reporting precision for all
    /// projected heights.
    #[inline]
    #[must_use]
    pub fn round1(self) -> Self {
        Centimeters((self.0 * 10.0).round() / 10.0)
    }

    /// Raw value accessor for formatting and interop
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Centimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} cm", self.0)
    }
}

impl Add for Centimeters {
    type Output = Centimeters;
    fn add(self, rhs: Centimeters) -> Centimeters {
        Centimeters(self.0 + rhs.0)
    }
}

impl Sub for Centimeters {
    type Output = Centimeters;
    fn sub(self, rhs: Centimeters) -> Centimeters {
        Centimeters(self.0 - rhs.0)
    }
}

impl AddAssign for Centimeters {
    fn add_assign(&mut self, rhs: Centimeters) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Centimeters {
    fn sub_assign(&mut self, rhs: Centimeters) {
        self.0 -= rhs.0;
    }
}

impl Mul<f64> for Centimeters {
    type Output = Centimeters;
    fn mul(self, rhs: f64) -> Centimeters {
        Centimeters(self.0 * rhs)
    }
}

// ============================================================================
// DAILY RATES
// ============================================================================

/// Sward growth or depletion rate in centimeters per day
///
/// Species reference consumption rates are defined at the 2 AU/ha reference
/// stocking; growth rates are defined for `normal` climate (factor 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CentimetersPerDay(f64);

unit_common!(CentimetersPerDay);

impl CentimetersPerDay {
    /// No daily change
    pub const ZERO: CentimetersPerDay = CentimetersPerDay(0.0);

    /// Create a new daily rate. Asserts value >= 0 (depletion is expressed
    /// as a positive consumption rate, not a negative growth rate).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "CentimetersPerDay::new: rate cannot be negative"
        );
        CentimetersPerDay(value)
    }

    /// Raw value accessor
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Scale by a dimensionless factor (climate or pressure multiplier)
    #[inline]
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        CentimetersPerDay(self.0 * factor)
    }
}

impl fmt::Display for CentimetersPerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} cm/day", self.0)
    }
}

/// Rate × days = height change
impl Mul<f64> for CentimetersPerDay {
    type Output = Centimeters;
    fn mul(self, days: f64) -> Centimeters {
        Centimeters(self.0 * days)
    }
}

// ============================================================================
// AREA AND MASS
// ============================================================================

/// Paddock area in hectares
///
/// Zero is representable; the invariant `area > 0` is enforced where a
/// paddock is constructed, so a violation surfaces as an error rather
/// than a panic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Hectares(f64);

unit_common!(Hectares);

impl Hectares {
    /// Create a new area. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Hectares::new: area cannot be negative");
        Hectares(value)
    }

    /// Raw value accessor
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Hectares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ha", self.0)
    }
}

/// Animal live weight in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilograms(f64);

unit_common!(Kilograms);

impl Kilograms {
    /// Standardized live weight of one animal unit (AU)
    pub const PER_ANIMAL_UNIT: Kilograms = Kilograms(450.0);

    /// Create a new weight. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Kilograms::new: weight cannot be negative");
        Kilograms(value)
    }

    /// Raw value accessor
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert live weight to animal units (450 kg per AU)
    #[inline]
    #[must_use]
    pub fn to_animal_units(self) -> f64 {
        self.0 / Self::PER_ANIMAL_UNIT.0
    }
}

impl fmt::Display for Kilograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} kg", self.0)
    }
}

impl Add for Kilograms {
    type Output = Kilograms;
    fn add(self, rhs: Kilograms) -> Kilograms {
        Kilograms(self.0 + rhs.0)
    }
}

impl Mul<f64> for Kilograms {
    type Output = Kilograms;
    fn mul(self, rhs: f64) -> Kilograms {
        Kilograms(self.0 * rhs)
    }
}

// ============================================================================
// STOCKING INTENSITY
// ============================================================================

/// Stocking intensity in animal units per hectare
///
/// One animal unit is 450 kg live weight. This drives the pressure scaling
/// of forage consumption.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct AuPerHectare(f64);

unit_common!(AuPerHectare);

impl AuPerHectare {
    /// No grazing pressure
    pub const ZERO: AuPerHectare = AuPerHectare(0.0);

    /// Create a new stocking intensity. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "AuPerHectare::new: stocking rate cannot be negative"
        );
        AuPerHectare(value)
    }

    /// Raw value accessor
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for AuPerHectare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} AU/ha", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_times_days_is_height() {
        let growth = CentimetersPerDay::new(1.2);
        let delta = growth * 10.0;
        assert_eq!(*delta, 12.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(*Centimeters::new(22.1999).round1(), 22.2);
        assert_eq!(*Centimeters::new(17.04).round1(), 17.0);
    }

    #[test]
    fn test_weight_to_animal_units() {
        assert_eq!(Kilograms::new(450.0).to_animal_units(), 1.0);
        assert_eq!(Kilograms::new(900.0).to_animal_units(), 2.0);
    }

    #[test]
    fn test_total_ordering_handles_nan() {
        let a = Centimeters::from(f64::NAN);
        let b = Centimeters::new(30.0);
        // NaN sorts after all real values under total_cmp
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Greater);
    }
}
