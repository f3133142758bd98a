//! Control-flow assertions: expected errors, expected panics, known failures.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::outcome::{AssertResult, FailureOutcome, LocationTag};

/// Run `op` and require it to fail with an error accepted by `matches`.
///
/// Success, or an error `matches` rejects, raises `did not throw <expected_kind>`.
pub fn assert_throws<T, E, F, M>(
    op: F,
    matches: M,
    expected_kind: &str,
    location: &LocationTag,
) -> AssertResult
where
    F: FnOnce() -> Result<T, E>,
    M: FnOnce(&E) -> bool,
{
    let raised = match op() {
        Ok(_) => false,
        Err(err) => matches(&err),
    };
    if raised {
        return Ok(());
    }
    Err(did_not_throw(location, expected_kind))
}

/// Run `op` and require it to panic with a payload accepted by `matches`.
///
/// Payloads that are neither `&str` nor `String` are presented to `matches` as `""`.
pub fn assert_panics<R, F, M>(
    op: F,
    matches: M,
    expected_kind: &str,
    location: &LocationTag,
) -> AssertResult
where
    F: FnOnce() -> R,
    M: FnOnce(&str) -> bool,
{
    let raised = match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(_) => false,
        Err(payload) => matches(panic_message(payload.as_ref())),
    };
    if raised {
        return Ok(());
    }
    Err(did_not_throw(location, expected_kind))
}

/// Unconditional known-failure marker for the given call site.
#[must_use]
pub fn known_failure(location: &LocationTag) -> FailureOutcome {
    FailureOutcome::known_failure(location)
}

fn did_not_throw(location: &LocationTag, expected_kind: &str) -> FailureOutcome {
    FailureOutcome::mismatch(location, format!("did not throw {expected_kind}"))
}

/// Text of a panic payload, or `""` when it is neither `&str` nor `String`.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        ""
    }
}
