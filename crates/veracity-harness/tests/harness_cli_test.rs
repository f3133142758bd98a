//! Integration test: the `harness` binary end to end.
//!
//! Run: cargo test -p veracity-harness --test harness_cli_test

use std::path::{Path, PathBuf};
use std::process::Command;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("veracity_cli_{name}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn harness() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_harness"));
    for key in [
        "VERACITY_MAX_OUTPUT_LINES",
        "VERACITY_ABSOLUTE_TOL",
        "VERACITY_RELATIVE_TOL",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn compare_equal_arrays_succeeds() {
    let dir = scratch_dir("compare_ok");
    let expected = dir.join("expected.json");
    let actual = dir.join("actual.json");
    std::fs::write(&expected, "[1, 2, 3]").unwrap();
    std::fs::write(&actual, "[1.0, 2.0, 3.0]").unwrap();

    let output = harness()
        .arg("compare")
        .arg("--expected")
        .arg(&expected)
        .arg("--actual")
        .arg(&actual)
        .output()
        .expect("harness compare should execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PASS: sequences are equal (3 elements)"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn compare_mismatch_prints_report_and_fails() {
    let dir = scratch_dir("compare_bad");
    let expected = dir.join("expected.json");
    let actual = dir.join("actual.json");
    std::fs::write(&expected, "[1, 2, 3, 4]").unwrap();
    std::fs::write(&actual, "[1, 9, 3, 9]").unwrap();

    let output = harness()
        .arg("compare")
        .arg("--expected")
        .arg(&expected)
        .arg("--actual")
        .arg(&actual)
        .arg("--max-output-lines")
        .arg("1")
        .output()
        .expect("harness compare should execute");
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sequences are not equal [type='f64']"));
    assert!(stdout.contains("  [1] 9.0  2.0"));
    assert!(!stdout.contains("  [3] 9.0  4.0"));
    assert!(stdout.contains("  (output limit reached)"));
    assert!(stdout.contains("Sequences differ at 2 of 4 positions"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn compare_almost_honours_tolerance_flags() {
    let dir = scratch_dir("compare_almost");
    let expected = dir.join("expected.json");
    let actual = dir.join("actual.json");
    std::fs::write(&expected, "[10.0, 20.0]").unwrap();
    std::fs::write(&actual, "[10.3, 20.0]").unwrap();

    let strict = harness()
        .args(["compare", "--mode", "almost"])
        .arg("--expected")
        .arg(&expected)
        .arg("--actual")
        .arg(&actual)
        .output()
        .unwrap();
    assert!(!strict.status.success());

    let loose = harness()
        .args(["compare", "--mode", "almost", "--abs-tol", "0.5", "--rel-tol", "0"])
        .arg("--expected")
        .arg(&expected)
        .arg("--actual")
        .arg(&actual)
        .output()
        .unwrap();
    assert!(loose.status.success());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn compare_rejects_negative_tolerance() {
    let dir = scratch_dir("compare_neg");
    let values = dir.join("values.json");
    std::fs::write(&values, "[1.0]").unwrap();

    let output = harness()
        .args(["compare", "--mode", "almost", "--abs-tol=-1"])
        .arg("--expected")
        .arg(&values)
        .arg("--actual")
        .arg(&values)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absolute tolerance must be a non-negative number"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn compare_reads_config_file() {
    let dir = scratch_dir("compare_config");
    let expected = dir.join("expected.json");
    let actual = dir.join("actual.json");
    let config = dir.join("veracity.json");
    std::fs::write(&expected, "[1, 2, 3, 4]").unwrap();
    std::fs::write(&actual, "[1, 9, 3, 9]").unwrap();
    std::fs::write(&config, r#"{"max_output_lines":1}"#).unwrap();

    let output = harness()
        .arg("compare")
        .arg("--expected")
        .arg(&expected)
        .arg("--actual")
        .arg(&actual)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  [1] 9.0  2.0"));
    assert!(!stdout.contains("  [3] 9.0  4.0"));
    assert!(stdout.contains("  (output limit reached)"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn config_file_tolerance_is_used_and_flags_override_it() {
    let dir = scratch_dir("config_tolerance");
    let expected = dir.join("expected.json");
    let actual = dir.join("actual.json");
    let config = dir.join("veracity.json");
    std::fs::write(&expected, "[10.0]").unwrap();
    std::fs::write(&actual, "[10.3]").unwrap();
    std::fs::write(
        &config,
        r#"{"tolerance":{"absolute":0.5,"relative":0.0}}"#,
    )
    .unwrap();

    let from_file = harness()
        .args(["compare", "--mode", "almost"])
        .arg("--expected")
        .arg(&expected)
        .arg("--actual")
        .arg(&actual)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(from_file.status.success());

    let overridden = harness()
        .args(["compare", "--mode", "almost", "--abs-tol", "0.1"])
        .arg("--expected")
        .arg(&expected)
        .arg("--actual")
        .arg(&actual)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!overridden.status.success());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn malformed_config_file_is_reported() {
    let dir = scratch_dir("config_bad");
    let values = dir.join("values.json");
    let config = dir.join("veracity.json");
    std::fs::write(&values, "[1]").unwrap();
    std::fs::write(&config, r#"{"max_output_lines":"many"}"#).unwrap();

    let output = harness()
        .arg("compare")
        .arg("--expected")
        .arg(&values)
        .arg("--actual")
        .arg(&values)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error: json:"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn cli_environment_is_strict() {
    let dir = scratch_dir("env_strict");
    let expected = dir.join("expected.json");
    let actual = dir.join("actual.json");
    std::fs::write(&expected, "[1, 2, 3, 4]").unwrap();
    std::fs::write(&actual, "[1, 9, 3, 9]").unwrap();

    let capped = harness()
        .env("VERACITY_MAX_OUTPUT_LINES", "1")
        .arg("compare")
        .arg("--expected")
        .arg(&expected)
        .arg("--actual")
        .arg(&actual)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&capped.stdout);
    assert!(stdout.contains("  (output limit reached)"));

    let rejected = harness()
        .env("VERACITY_ABSOLUTE_TOL", "abc")
        .arg("compare")
        .arg("--expected")
        .arg(&expected)
        .arg("--actual")
        .arg(&expected)
        .output()
        .unwrap();
    assert!(!rejected.status.success());
    assert!(
        String::from_utf8_lossy(&rejected.stderr)
            .contains("invalid value for VERACITY_ABSOLUTE_TOL: 'abc'")
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn verify_writes_summary_and_valid_log() {
    let dir = scratch_dir("verify");
    let summary_path = dir.join("summary.json");
    let log_path = dir.join("run.jsonl");

    let output = harness()
        .arg("verify")
        .arg("--fixture")
        .arg(fixture_path("calibration_campaign.json"))
        .arg("--output")
        .arg(&summary_path)
        .arg("--log")
        .arg(&log_path)
        .output()
        .expect("harness verify should execute");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary["total"], 4);
    assert_eq!(summary["passed"], 3);
    assert_eq!(summary["known_failures"], 1);

    let validate = harness()
        .arg("validate-log")
        .arg("--log")
        .arg(&log_path)
        .output()
        .unwrap();
    assert!(validate.status.success());
    assert!(String::from_utf8_lossy(&validate.stdout).contains("6 lines valid"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn verify_failing_campaign_exits_nonzero() {
    let output = harness()
        .arg("verify")
        .arg("--fixture")
        .arg(fixture_path("regression_campaign.json"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["failed"], 1);
    assert_eq!(summary["errored"], 1);
    assert_eq!(summary["results"][2]["status"], "errored");
}

#[test]
fn validate_log_rejects_bad_lines() {
    let dir = scratch_dir("validate_bad");
    let log_path = dir.join("bad.jsonl");
    std::fs::write(&log_path, "not json\n").unwrap();

    let output = harness()
        .arg("validate-log")
        .arg("--log")
        .arg(&log_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 1: field '<json>'"));

    std::fs::remove_dir_all(&dir).ok();
}
