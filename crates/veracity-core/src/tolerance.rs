//! Combined relative + absolute tolerance comparison.
//!
//! Two values are approximately equal when
//!
//! ```text
//! |a - b| <= relative * (|a| + |b|) + absolute
//! ```
//!
//! Near zero the absolute term dominates, for large magnitudes the relative term does.
//! The comparison is carried out in `f64` whatever the source type.

use std::ops::Neg;

use num_traits::{AsPrimitive, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sequence::ElementPredicate;

/// Default absolute tolerance.
pub const DEFAULT_ABSOLUTE_TOL: f64 = 1e-4;
/// Default relative tolerance.
pub const DEFAULT_RELATIVE_TOL: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToleranceError {
    #[error("absolute tolerance must be a non-negative number, got {0}")]
    InvalidAbsolute(f64),
    #[error("relative tolerance must be a non-negative number, got {0}")]
    InvalidRelative(f64),
}

/// Absolute and relative bounds. Both are non-negative and not NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTolerance")]
pub struct ComparisonTolerance {
    absolute: f64,
    relative: f64,
}

#[derive(Deserialize)]
struct RawTolerance {
    #[serde(default = "default_absolute")]
    absolute: f64,
    #[serde(default = "default_relative")]
    relative: f64,
}

fn default_absolute() -> f64 {
    DEFAULT_ABSOLUTE_TOL
}

fn default_relative() -> f64 {
    DEFAULT_RELATIVE_TOL
}

impl TryFrom<RawTolerance> for ComparisonTolerance {
    type Error = ToleranceError;

    fn try_from(raw: RawTolerance) -> Result<Self, Self::Error> {
        Self::new(raw.absolute, raw.relative)
    }
}

impl ComparisonTolerance {
    /// The default tolerance (`1e-4` absolute, `1e-4` relative).
    pub const DEFAULT: Self = Self {
        absolute: DEFAULT_ABSOLUTE_TOL,
        relative: DEFAULT_RELATIVE_TOL,
    };

    /// Build a tolerance, rejecting negative or NaN bounds.
    pub fn new(absolute: f64, relative: f64) -> Result<Self, ToleranceError> {
        if absolute.is_nan() || absolute < 0.0 {
            return Err(ToleranceError::InvalidAbsolute(absolute));
        }
        if relative.is_nan() || relative < 0.0 {
            return Err(ToleranceError::InvalidRelative(relative));
        }
        Ok(Self { absolute, relative })
    }

    #[must_use]
    pub const fn absolute(&self) -> f64 {
        self.absolute
    }

    #[must_use]
    pub const fn relative(&self) -> f64 {
        self.relative
    }

    /// Largest admissible `|a - b|` for this pair.
    #[must_use]
    pub fn bound(&self, a: f64, b: f64) -> f64 {
        self.relative * (strict_abs(a) + strict_abs(b)) + self.absolute
    }
}

impl Default for ComparisonTolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Absolute value through a strict greater-than-zero comparison and negation.
///
/// This is the reference semantics for custom numeric-like types: only `>` against
/// zero and unary minus are required, not an intrinsic `abs`.
#[must_use]
pub fn strict_abs<T>(x: T) -> T
where
    T: PartialOrd + Neg<Output = T> + Zero,
{
    if x > T::zero() { x } else { -x }
}

/// `|a - b| <= tol.relative * (|a| + |b|) + tol.absolute`.
///
/// NaN on either side never compares equal.
#[must_use]
pub fn almost_equal(a: f64, b: f64, tol: &ComparisonTolerance) -> bool {
    strict_abs(a - b) <= tol.bound(a, b)
}

/// The tolerance formula packaged as a binary element predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TolerancePredicate {
    tol: ComparisonTolerance,
}

impl TolerancePredicate {
    #[must_use]
    pub const fn new(tol: ComparisonTolerance) -> Self {
        Self { tol }
    }

    #[must_use]
    pub const fn tolerance(&self) -> &ComparisonTolerance {
        &self.tol
    }

    /// Apply the predicate to any pair of primitive numerics.
    #[must_use]
    pub fn holds<A, B>(&self, a: A, b: B) -> bool
    where
        A: AsPrimitive<f64>,
        B: AsPrimitive<f64>,
    {
        almost_equal(a.as_(), b.as_(), &self.tol)
    }
}

impl<A, B> ElementPredicate<A, B> for TolerancePredicate
where
    A: AsPrimitive<f64>,
    B: AsPrimitive<f64>,
{
    fn test(&self, a: &A, b: &B) -> bool {
        self.holds(*a, *b)
    }
}
