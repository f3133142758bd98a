//! Case classification and aggregate verification summaries.

use serde::{Deserialize, Serialize};
use veracity_core::{AssertResult, OutcomeKind};

use crate::structured_log::Outcome;

/// Final classification of one test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    /// A comparison raised a mismatch.
    Failed,
    /// A precondition was violated, or the body panicked.
    Errored,
    /// Expected failure; not counted as a regression.
    KnownFailure,
}

impl CaseStatus {
    #[must_use]
    pub fn from_kind(kind: OutcomeKind) -> Self {
        match kind {
            OutcomeKind::Mismatch => Self::Failed,
            OutcomeKind::PreconditionError => Self::Errored,
            OutcomeKind::KnownFailure => Self::KnownFailure,
        }
    }

    #[must_use]
    pub fn log_outcome(self) -> Outcome {
        match self {
            Self::Passed => Outcome::Pass,
            Self::Failed => Outcome::Fail,
            Self::Errored => Outcome::Error,
            Self::KnownFailure => Outcome::KnownFailure,
        }
    }
}

/// Result of running a single case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    /// Name of the test case.
    pub case_name: String,
    /// Requirement or ticket the case traces to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    pub status: CaseStatus,
    /// Rendered failure message (full sequence report for mismatches).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mismatch_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_compared: Option<usize>,
}

impl CaseResult {
    /// Classify the result of a case body.
    #[must_use]
    pub fn from_result(
        case_name: impl Into<String>,
        reference: impl Into<String>,
        result: &AssertResult,
    ) -> Self {
        let mut out = Self {
            case_name: case_name.into(),
            reference: reference.into(),
            status: CaseStatus::Passed,
            message: None,
            location: None,
            mismatch_count: None,
            total_compared: None,
        };
        if let Err(failure) = result {
            out.status = CaseStatus::from_kind(failure.kind());
            out.message = Some(failure.message().to_string());
            out.location = Some(failure.location().to_string());
            if let Some(report) = failure.report() {
                out.mismatch_count = Some(report.mismatch_count());
                out.total_compared = Some(report.total_compared());
            }
        }
        out
    }

    /// A body that panicked instead of returning an outcome.
    #[must_use]
    pub fn panicked(case_name: impl Into<String>, panic_message: &str) -> Self {
        Self {
            case_name: case_name.into(),
            reference: String::new(),
            status: CaseStatus::Errored,
            message: Some(format!("panicked: {panic_message}")),
            location: None,
            mismatch_count: None,
            total_compared: None,
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    /// Total cases run.
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub known_failures: usize,
    /// Individual results.
    pub results: Vec<CaseResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<CaseResult>) -> Self {
        let count = |status: CaseStatus| results.iter().filter(|r| r.status == status).count();
        Self {
            total: results.len(),
            passed: count(CaseStatus::Passed),
            failed: count(CaseStatus::Failed),
            errored: count(CaseStatus::Errored),
            known_failures: count(CaseStatus::KnownFailure),
            results,
        }
    }

    /// True when nothing failed or errored. Known failures do not count against the run.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
