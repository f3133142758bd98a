//! CLI for the veracity harness.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use veracity_core::{AssertConfig, ComparisonTolerance};
use veracity_harness::structured_log::{LogEmitter, validate_log_file};
use veracity_harness::{CompareMode, ComparisonFixture, FixtureSet, TestRunner, VerificationSummary};

/// Veracity assertion harness.
#[derive(Debug, Parser)]
#[command(name = "harness")]
#[command(about = "Sequence comparison and fixture verification")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare two JSON arrays of numbers.
    Compare {
        /// Reference values.
        #[arg(long)]
        expected: PathBuf,
        /// Observed values.
        #[arg(long)]
        actual: PathBuf,
        #[arg(long, value_enum, default_value_t = CompareMode::Exact)]
        mode: CompareMode,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Run a fixture file and print the verification summary as JSON.
    Verify {
        /// Fixture set JSON file.
        #[arg(long)]
        fixture: PathBuf,
        /// Write a JSONL structured log here.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Run id used in log trace ids.
        #[arg(long, default_value = "run-1")]
        run_id: String,
        /// Write the summary JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Schema-check a JSONL structured log.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// JSON configuration file (otherwise the VERACITY_* environment).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Sampled mismatch lines per sequence report.
    #[arg(long)]
    max_output_lines: Option<usize>,
    /// Absolute tolerance for `almost` comparisons.
    #[arg(long)]
    abs_tol: Option<f64>,
    /// Relative tolerance for `almost` comparisons.
    #[arg(long)]
    rel_tol: Option<f64>,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<AssertConfig, veracity_core::ConfigError> {
        let mut config = match &self.config {
            Some(path) => AssertConfig::from_file(path)?,
            None => AssertConfig::from_env()?,
        };
        if let Some(lines) = self.max_output_lines {
            config.max_output_lines = lines;
        }
        if self.abs_tol.is_some() || self.rel_tol.is_some() {
            config.tolerance = ComparisonTolerance::new(
                self.abs_tol.unwrap_or(config.tolerance.absolute()),
                self.rel_tol.unwrap_or(config.tolerance.relative()),
            )?;
        }
        veracity_core::config::install(config)?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Compare {
            expected,
            actual,
            mode,
            config,
        } => {
            let config = config.resolve()?;
            let set = FixtureSet {
                version: String::from("v1"),
                campaign: actual.display().to_string(),
                captured_at: String::new(),
                cases: vec![ComparisonFixture {
                    name: String::from("compare"),
                    reference: String::new(),
                    mode,
                    expected: read_values(&expected)?,
                    actual: read_values(&actual)?,
                    tolerance: None,
                    known_failure: false,
                }],
            };
            let runner = TestRunner::with_config(set.campaign.as_str(), &config);
            let summary = VerificationSummary::from_results(runner.run(&set));
            let compared = set.cases[0].actual.len();
            for result in &summary.results {
                match &result.message {
                    Some(message) => println!("{message}"),
                    None => println!("PASS: sequences are equal ({compared} elements)"),
                }
            }
            if !summary.all_passed() {
                return Err("comparison failed".into());
            }
        }
        Command::Verify {
            fixture,
            log,
            run_id,
            output,
            config,
        } => {
            let config = config.resolve()?;
            eprintln!("Verifying fixtures in {}", fixture.display());
            let set = FixtureSet::from_file(&fixture)?;
            let runner = TestRunner::with_config(set.campaign.as_str(), &config);

            let results = match log {
                Some(log_path) => {
                    let mut emitter = LogEmitter::to_file(&log_path, &set.campaign, &run_id)?;
                    let results = runner.run_logged(&set, &mut emitter)?;
                    eprintln!("Wrote structured log to {}", log_path.display());
                    results
                }
                None => runner.run(&set),
            };

            let summary = VerificationSummary::from_results(results);
            eprintln!(
                "Verification complete: total={}, passed={}, failed={}, errored={}, known_failures={}",
                summary.total,
                summary.passed,
                summary.failed,
                summary.errored,
                summary.known_failures
            );

            let body = summary.to_json()?;
            match output {
                Some(path) => std::fs::write(&path, body)?,
                None => println!("{body}"),
            }

            if !summary.all_passed() {
                return Err("fixture verification failed".into());
            }
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for error in &errors {
                eprintln!("{error}");
            }
            if !errors.is_empty() {
                return Err(format!("{} schema violations in {lines} lines", errors.len()).into());
            }
            println!("{lines} lines valid");
        }
    }

    Ok(())
}

fn read_values(path: &Path) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let values = serde_json::from_str(&content)
        .map_err(|e| format!("{}: expected a JSON array of numbers: {e}", path.display()))?;
    Ok(values)
}
