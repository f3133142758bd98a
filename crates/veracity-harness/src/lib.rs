//! Test harness for veracity assertions.
//!
//! This crate provides:
//! - Fixture sets: named `exact` / `almost` comparison cases loaded from JSON
//! - Test runner: the case boundary where raised outcomes are classified
//! - Verification summary: passed / failed / errored / known-failure totals
//! - Structured logging: JSONL records with sequential trace ids, plus a schema validator

#![forbid(unsafe_code)]

pub mod fixtures;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use fixtures::{CompareMode, ComparisonFixture, FixtureError, FixtureSet};
pub use runner::TestRunner;
pub use verify::{CaseResult, CaseStatus, VerificationSummary};
