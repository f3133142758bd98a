//! Assertion outcomes and call-site location tags.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sequence::MismatchReport;

/// Result of an assertion: `Ok` on success, the raised outcome otherwise.
pub type AssertResult<T = ()> = Result<T, FailureOutcome>;

/// Caller-supplied source location, used only to prefix rendered messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationTag {
    /// Source file name.
    pub file: String,
    /// Line number (`-1` when unknown).
    pub line: i64,
}

impl LocationTag {
    /// Create a tag for an explicit call site.
    #[must_use]
    pub fn new(file: impl Into<String>, line: i64) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Tag used when the caller did not supply a location.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new("unknown", -1)
    }
}

impl Default for LocationTag {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for LocationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.file, self.line)
    }
}

/// Classification of a raised outcome.
///
/// The runner reports each kind separately: `Mismatch` as failed, `PreconditionError`
/// as errored, `KnownFailure` as an expected failure that is not a regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// A comparison predicate rejected well-formed inputs.
    Mismatch,
    /// Inputs violated a structural precondition before any comparison ran.
    PreconditionError,
    /// A pre-declared expected failure.
    KnownFailure,
}

impl OutcomeKind {
    /// Stable lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mismatch => "mismatch",
            Self::PreconditionError => "precondition_error",
            Self::KnownFailure => "known_failure",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raised assertion outcome carrying a fully rendered message.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct FailureOutcome {
    kind: OutcomeKind,
    message: String,
    location: LocationTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<MismatchReport>,
}

impl FailureOutcome {
    /// Build a mismatch; the message is `"[file:line] <detail>"`.
    #[must_use]
    pub fn mismatch(location: &LocationTag, detail: impl fmt::Display) -> Self {
        Self {
            kind: OutcomeKind::Mismatch,
            message: format!("{location} {detail}"),
            location: location.clone(),
            report: None,
        }
    }

    /// Build a precondition error; the message is the fixed phrase alone.
    #[must_use]
    pub fn precondition(location: &LocationTag, phrase: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::PreconditionError,
            message: phrase.into(),
            location: location.clone(),
            report: None,
        }
    }

    /// Build a known-failure marker tagged with the call site.
    #[must_use]
    pub fn known_failure(location: &LocationTag) -> Self {
        Self {
            kind: OutcomeKind::KnownFailure,
            message: location.to_string(),
            location: location.clone(),
            report: None,
        }
    }

    /// Attach the sequence report that produced this mismatch.
    #[must_use]
    pub(crate) fn with_report(mut self, report: MismatchReport) -> Self {
        self.report = Some(report);
        self
    }

    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn location(&self) -> &LocationTag {
        &self.location
    }

    /// Sequence diagnostics, present only for sequence mismatches.
    #[must_use]
    pub fn report(&self) -> Option<&MismatchReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        self.kind == OutcomeKind::Mismatch
    }

    #[must_use]
    pub fn is_precondition_error(&self) -> bool {
        self.kind == OutcomeKind::PreconditionError
    }

    #[must_use]
    pub fn is_known_failure(&self) -> bool {
        self.kind == OutcomeKind::KnownFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_renders_file_and_line() {
        assert_eq!(LocationTag::new("a.rs", 12).to_string(), "[a.rs:12]");
        assert_eq!(LocationTag::default().to_string(), "[unknown:-1]");
    }

    #[test]
    fn mismatch_prefixes_location() {
        let loc = LocationTag::new("t.rs", 3);
        let f = FailureOutcome::mismatch(&loc, "values are not equal: 1 2");
        assert!(f.is_mismatch());
        assert_eq!(f.message(), "[t.rs:3] values are not equal: 1 2");
        assert_eq!(f.to_string(), f.message());
        assert!(f.report().is_none());
    }

    #[test]
    fn precondition_message_is_bare_phrase() {
        let f = FailureOutcome::precondition(&LocationTag::new("t.rs", 9), "Sequences have different sizes");
        assert!(f.is_precondition_error());
        assert_eq!(f.message(), "Sequences have different sizes");
        assert_eq!(f.location().line, 9);
    }

    #[test]
    fn known_failure_message_is_call_site() {
        let f = FailureOutcome::known_failure(&LocationTag::new("k.rs", 40));
        assert!(f.is_known_failure());
        assert_eq!(f.message(), "[k.rs:40]");
    }

    #[test]
    fn outcome_serializes_kind_in_snake_case() {
        let f = FailureOutcome::precondition(&LocationTag::unknown(), "bad");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["kind"], "precondition_error");
        assert_eq!(json["location"]["line"], -1);
        assert!(json.get("report").is_none());
    }
}
