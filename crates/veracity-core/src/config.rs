//! Process-wide assertion configuration.
//!
//! The snapshot is established once, either explicitly through [`install`] at
//! startup or lazily on first use from the environment:
//! - `VERACITY_MAX_OUTPUT_LINES`: sampled mismatch lines per sequence report (default 10)
//! - `VERACITY_ABSOLUTE_TOL`: default absolute tolerance (default `1e-4`)
//! - `VERACITY_RELATIVE_TOL`: default relative tolerance (default `1e-4`)
//!
//! After that it is read-only. Per-call overrides go through the `_tol` comparator
//! variants and [`SequenceComparator::new`](crate::SequenceComparator::new).

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tolerance::{ComparisonTolerance, ToleranceError};

pub const DEFAULT_MAX_OUTPUT_LINES: usize = 10;

pub const ENV_MAX_OUTPUT_LINES: &str = "VERACITY_MAX_OUTPUT_LINES";
pub const ENV_ABSOLUTE_TOL: &str = "VERACITY_ABSOLUTE_TOL";
pub const ENV_RELATIVE_TOL: &str = "VERACITY_RELATIVE_TOL";

static SNAPSHOT: OnceLock<AssertConfig> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
    #[error("tolerance: {0}")]
    Tolerance(#[from] ToleranceError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("assertion configuration is already established")]
    AlreadyInstalled,
}

/// Tunables read by every comparator call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssertConfig {
    /// Cap on sampled mismatch lines in a sequence report.
    pub max_output_lines: usize,
    /// Tolerance used by the almost-equal comparators when none is passed.
    pub tolerance: ComparisonTolerance,
}

impl Default for AssertConfig {
    fn default() -> Self {
        Self {
            max_output_lines: DEFAULT_MAX_OUTPUT_LINES,
            tolerance: ComparisonTolerance::DEFAULT,
        }
    }
}

impl AssertConfig {
    /// Build from a key lookup. Missing keys keep their defaults; present keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_output_lines = match lookup(ENV_MAX_OUTPUT_LINES) {
            Some(raw) => parse_value(ENV_MAX_OUTPUT_LINES, &raw)?,
            None => defaults.max_output_lines,
        };
        let absolute = match lookup(ENV_ABSOLUTE_TOL) {
            Some(raw) => parse_value(ENV_ABSOLUTE_TOL, &raw)?,
            None => defaults.tolerance.absolute(),
        };
        let relative = match lookup(ENV_RELATIVE_TOL) {
            Some(raw) => parse_value(ENV_RELATIVE_TOL, &raw)?,
            None => defaults.tolerance.relative(),
        };

        Ok(Self {
            max_output_lines,
            tolerance: ComparisonTolerance::new(absolute, relative)?,
        })
    }

    /// Like [`from_lookup`](Self::from_lookup), but a missing, unparseable, or out-of-range
    /// value keeps its own default without affecting the other keys.
    #[must_use]
    pub fn from_lookup_lenient<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let default_abs = defaults.tolerance.absolute();
        let default_rel = defaults.tolerance.relative();

        let max_output_lines =
            parse_or_default(&lookup, ENV_MAX_OUTPUT_LINES, defaults.max_output_lines);
        let absolute = parse_or_default(&lookup, ENV_ABSOLUTE_TOL, default_abs);
        let absolute = if ComparisonTolerance::new(absolute, 0.0).is_ok() {
            absolute
        } else {
            default_abs
        };
        let relative = parse_or_default(&lookup, ENV_RELATIVE_TOL, default_rel);
        let relative = if ComparisonTolerance::new(0.0, relative).is_ok() {
            relative
        } else {
            default_rel
        };
        let tolerance = ComparisonTolerance::new(absolute, relative).unwrap_or_default();

        Self {
            max_output_lines,
            tolerance,
        }
    }

    /// Build from the process environment, rejecting any unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from the process environment, falling back per value.
    #[must_use]
    pub fn from_env_lenient() -> Self {
        Self::from_lookup_lenient(|key| std::env::var(key).ok())
    }

    /// Load from a JSON string. Omitted fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, fallback: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|raw| parse_value(key, &raw).ok())
        .unwrap_or(fallback)
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// Establish the process-wide snapshot. Fails if one is already in place.
pub fn install(config: AssertConfig) -> Result<(), ConfigError> {
    SNAPSHOT
        .set(config)
        .map_err(|_| ConfigError::AlreadyInstalled)
}

/// The process-wide snapshot, initialised from the environment on first use.
///
/// Each unparseable environment value falls back to its own default.
#[must_use]
pub fn config() -> &'static AssertConfig {
    SNAPSHOT.get_or_init(AssertConfig::from_env_lenient)
}
