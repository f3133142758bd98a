//! Single-value comparators.

use std::any::type_name;
use std::fmt::Debug;

use num_traits::AsPrimitive;

use crate::config;
use crate::outcome::{AssertResult, FailureOutcome, LocationTag};
use crate::tolerance::{ComparisonTolerance, almost_equal};

/// Fails with a mismatch unless `a == b`.
pub fn assert_equal<A, B>(a: &A, b: &B, location: &LocationTag) -> AssertResult
where
    A: PartialEq<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if a == b {
        return Ok(());
    }
    Err(FailureOutcome::mismatch(
        location,
        format!("values are not equal: {a:?} {b:?} [type='{}']", type_name::<A>()),
    ))
}

/// Same check as [`assert_equal`] for types that cannot be rendered.
pub fn assert_equal_quiet<A, B>(a: &A, b: &B, location: &LocationTag) -> AssertResult
where
    A: PartialEq<B> + ?Sized,
    B: ?Sized,
{
    if a == b {
        return Ok(());
    }
    Err(FailureOutcome::mismatch(
        location,
        format!("values are not equal. [type='{}']", type_name::<A>()),
    ))
}

/// Fails unless `a <= b`.
pub fn assert_lequal<A, B>(a: &A, b: &B, location: &LocationTag) -> AssertResult
where
    A: PartialOrd<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if a <= b {
        return Ok(());
    }
    Err(FailureOutcome::mismatch(
        location,
        format!("{a:?} is greater than {b:?} [type='{}']", type_name::<A>()),
    ))
}

/// Fails unless `a >= b`.
pub fn assert_gequal<A, B>(a: &A, b: &B, location: &LocationTag) -> AssertResult
where
    A: PartialOrd<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if a >= b {
        return Ok(());
    }
    Err(FailureOutcome::mismatch(
        location,
        format!("{a:?} is less than {b:?} [type='{}']", type_name::<A>()),
    ))
}

/// Tolerance-based equality under the configured default tolerance.
pub fn assert_almost_equal<A, B>(a: A, b: B, location: &LocationTag) -> AssertResult
where
    A: AsPrimitive<f64>,
    B: AsPrimitive<f64>,
{
    assert_almost_equal_tol(a, b, location, &config::config().tolerance)
}

/// Tolerance-based equality under an explicit tolerance.
///
/// Both values are rendered as `f64` in the message whatever their source type.
pub fn assert_almost_equal_tol<A, B>(
    a: A,
    b: B,
    location: &LocationTag,
    tol: &ComparisonTolerance,
) -> AssertResult
where
    A: AsPrimitive<f64>,
    B: AsPrimitive<f64>,
{
    let (x, y): (f64, f64) = (a.as_(), b.as_());
    if almost_equal(x, y, tol) {
        return Ok(());
    }
    Err(FailureOutcome::mismatch(
        location,
        format!(
            "values are not approximately equal: {x} {y} [type='{}']",
            type_name::<A>()
        ),
    ))
}
