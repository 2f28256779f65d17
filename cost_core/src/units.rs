//! # Unit Types
//!
//! Type-safe wrappers for the building dimensions and money the estimator
//! works with. They are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! All dimensions are in feet. Areas are square feet, volumes cubic feet.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::units::{CubicFeet, Dollars, Feet, SquareFeet};
//!
//! let floor: SquareFeet = Feet(80.0) * Feet(60.0);
//! assert_eq!(floor, SquareFeet(4800.0));
//!
//! let volume: CubicFeet = floor * Feet(24.0);
//! assert_eq!(volume.0, 115_200.0);
//!
//! assert_eq!(Dollars(960_000.0) / floor, Dollars(200.0));
//! ```
//!
//! ## Rounding
//!
//! Every rounded figure in the system goes through [`round_half_up`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length, Area, Volume
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareFeet(pub f64);

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicFeet(pub f64);

/// An amount of money
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dollars(pub f64);

impl Mul<Feet> for Feet {
    type Output = SquareFeet;
    fn mul(self, rhs: Feet) -> SquareFeet {
        SquareFeet(self.0 * rhs.0)
    }
}

impl Mul<Feet> for SquareFeet {
    type Output = CubicFeet;
    fn mul(self, rhs: Feet) -> CubicFeet {
        CubicFeet(self.0 * rhs.0)
    }
}

/// Cost per square foot
impl Div<SquareFeet> for Dollars {
    type Output = Dollars;
    fn div(self, rhs: SquareFeet) -> Dollars {
        Dollars(self.0 / rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(SquareFeet);
impl_arithmetic!(CubicFeet);
impl_arithmetic!(Dollars);

// ============================================================================
// Rounding
// ============================================================================

/// Round to the nearest integer, ties toward positive infinity.
///
/// `2.5 -> 3`, `-2.5 -> -2`. This differs from [`f64::round`] only on
/// negative ties, which only arise from invalid (negative) inputs.
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    // x - floor(x) is exact for every finite f64
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
