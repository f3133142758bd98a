//! Test execution engine.
//!
//! The runner is the boundary where raised outcomes stop propagating: every case body
//! returns an [`AssertResult`], and the runner turns it into a [`CaseResult`].

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use veracity_core::{
    AssertConfig, AssertResult, ComparisonTolerance, ExactEquality, LocationTag,
    SequenceComparator, TolerancePredicate, known_failure, panic_message,
};

use crate::fixtures::{CompareMode, ComparisonFixture, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel};
use crate::verify::{CaseResult, CaseStatus};

/// Runs fixture sets and ad-hoc case bodies, collecting classified results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    comparator: SequenceComparator,
    tolerance: ComparisonTolerance,
}

impl TestRunner {
    /// Runner using the process-wide configuration.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self::with_config(campaign, veracity_core::config::config())
    }

    #[must_use]
    pub fn with_config(campaign: impl Into<String>, config: &AssertConfig) -> Self {
        Self {
            campaign: campaign.into(),
            comparator: SequenceComparator::from_config(config),
            tolerance: config.tolerance,
        }
    }

    /// Run all cases in a set and return results in case order.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<CaseResult> {
        fixture_set
            .cases
            .iter()
            .enumerate()
            .map(|(index, case)| self.run_fixture(fixture_set, index, case))
            .collect()
    }

    /// Run all cases in a set, emitting one log entry per case.
    pub fn run_logged<W: Write>(
        &self,
        fixture_set: &FixtureSet,
        emitter: &mut LogEmitter<W>,
    ) -> std::io::Result<Vec<CaseResult>> {
        emitter.emit(LogLevel::Info, "campaign_start")?;
        let mut results = Vec::with_capacity(fixture_set.cases.len());
        for (index, case) in fixture_set.cases.iter().enumerate() {
            let started = Instant::now();
            let result = self.run_fixture(fixture_set, index, case);
            let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            emitter.emit_entry(case_log_entry(&result).with_duration_ms(elapsed))?;
            results.push(result);
        }
        emitter.emit(LogLevel::Info, "campaign_end")?;
        emitter.flush()?;
        Ok(results)
    }

    /// Run an arbitrary case body. A panic inside the body is reported as errored.
    pub fn run_case<F>(&self, name: &str, body: F) -> CaseResult
    where
        F: FnOnce() -> AssertResult,
    {
        match panic::catch_unwind(AssertUnwindSafe(body)) {
            Ok(result) => CaseResult::from_result(name, "", &result),
            Err(payload) => CaseResult::panicked(name, panic_message(payload.as_ref())),
        }
    }

    fn run_fixture(&self, set: &FixtureSet, index: usize, case: &ComparisonFixture) -> CaseResult {
        let line = i64::try_from(index + 1).unwrap_or(i64::MAX);
        let location = LocationTag::new(set.campaign.as_str(), line);
        CaseResult::from_result(&case.name, &case.reference, &self.evaluate(case, &location))
    }

    fn evaluate(&self, case: &ComparisonFixture, location: &LocationTag) -> AssertResult {
        if case.known_failure {
            return Err(known_failure(location));
        }
        match case.mode {
            CompareMode::Exact => {
                self.comparator
                    .compare_containers(&case.actual, &case.expected, &ExactEquality, location)
            }
            CompareMode::Almost => {
                let predicate = TolerancePredicate::new(case.tolerance.unwrap_or(self.tolerance));
                self.comparator
                    .compare_containers(&case.actual, &case.expected, &predicate, location)
            }
        }
    }
}

fn case_log_entry(result: &CaseResult) -> LogEntry {
    let level = match result.status {
        CaseStatus::Passed | CaseStatus::KnownFailure => LogLevel::Info,
        CaseStatus::Failed => LogLevel::Warn,
        CaseStatus::Errored => LogLevel::Error,
    };
    let mut entry = LogEntry::new("", level, "case_result")
        .with_case(&result.case_name)
        .with_outcome(result.status.log_outcome());
    if let Some(location) = &result.location {
        entry = entry.with_location(location);
    }
    if let (Some(m), Some(t)) = (result.mismatch_count, result.total_compared) {
        entry = entry.with_counts(m, t);
    }
    if let Some(message) = &result.message {
        entry = entry.with_details(serde_json::json!({ "message": message }));
    }
    entry
}
