//! # veracity-core
//!
//! Assertion and mismatch-diagnostics engine for test harnesses.
//!
//! This crate provides:
//! - Outcome model: [`FailureOutcome`] tagged as mismatch, precondition error, or known failure
//! - Scalar comparators: exact, quiet, ordered, and tolerance-based checks
//! - Tolerance predicate: the combined relative + absolute test as a reusable predicate
//! - Sequence comparator: full-pass element-wise comparison with a capped diagnostic listing
//! - Container adapter: size precondition + materialization of opaque ordered containers
//!
//! Every assertion returns [`AssertResult`]; a failure is propagated with `?` up to the
//! test-case boundary, where the runner classifies it by [`OutcomeKind`].

#![forbid(unsafe_code)]

pub mod config;
pub mod container;
pub mod control;
mod macros;
pub mod outcome;
pub mod scalar;
pub mod sequence;
pub mod tolerance;

pub use config::{AssertConfig, ConfigError};
pub use container::{OrderedContainer, assert_almost_equal_containers, assert_equal_containers};
pub use control::{assert_panics, assert_throws, known_failure, panic_message};
pub use outcome::{AssertResult, FailureOutcome, LocationTag, OutcomeKind};
pub use scalar::{
    assert_almost_equal, assert_almost_equal_tol, assert_equal, assert_equal_quiet, assert_gequal,
    assert_lequal,
};
pub use sequence::{
    ElementPredicate, ExactEquality, MismatchReport, SequenceComparator,
    assert_almost_equal_ranges, assert_almost_equal_ranges_tol, assert_equal_ranges,
    assert_equal_ranges_by,
};
pub use tolerance::{ComparisonTolerance, TolerancePredicate, ToleranceError, almost_equal};
