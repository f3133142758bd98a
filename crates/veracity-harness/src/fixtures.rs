//! Fixture loading and management.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use veracity_core::ComparisonTolerance;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixture set '{campaign}' has no cases")]
    Empty { campaign: String },
    #[error("duplicate case name '{0}'")]
    DuplicateCase(String),
}

/// How a case compares its two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// Element-wise `==`.
    Exact,
    /// Element-wise tolerance test.
    Almost,
}

/// A single fixture comparison case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonFixture {
    /// Case identifier.
    pub name: String,
    /// Requirement or ticket the case traces to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    pub mode: CompareMode,
    /// Reference values.
    pub expected: Vec<f64>,
    /// Values produced by the system under test.
    pub actual: Vec<f64>,
    /// Overrides the runner tolerance in `almost` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<ComparisonTolerance>,
    /// Case is expected to fail and is reported as a known failure.
    #[serde(default)]
    pub known_failure: bool,
}

/// A collection of comparison cases for one campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Campaign name, used in log trace ids and location tags.
    pub campaign: String,
    /// UTC timestamp of capture.
    #[serde(default)]
    pub captured_at: String,
    pub cases: Vec<ComparisonFixture>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and check a fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json(&content)?;
        set.check()?;
        Ok(set)
    }

    /// Reject empty sets and duplicate case names.
    pub fn check(&self) -> Result<(), FixtureError> {
        if self.cases.is_empty() {
            return Err(FixtureError::Empty {
                campaign: self.campaign.clone(),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.name.as_str()) {
                return Err(FixtureError::DuplicateCase(case.name.clone()));
            }
        }
        Ok(())
    }

    /// Look up a case by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&ComparisonFixture> {
        self.cases.iter().find(|case| case.name == name)
    }
}
