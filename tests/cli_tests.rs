//! End-to-end CLI tests for the trazar binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_precision_dataset(dir: &Path) {
    fs::write(
        dir.join("timestamp_diffs_expected.dat"),
        "0.000000000000\n0.000000000000\n0.000000000000\n",
    )
    .unwrap();
    fs::write(dir.join("timestamp_diffs_measured.dat"), "3\n4\n10\n").unwrap();
}

#[test]
fn test_missing_data_exits_cleanly_with_guidance() {
    // No output/ directory in an empty working directory: the recoverable
    // condition, not an error.
    let tmp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.current_dir(tmp.path()).arg("precision");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No measurement data has been found"))
        .stdout(predicate::str::contains("--ref"));
}

#[test]
fn test_precision_text_output() {
    let tmp = TempDir::new().unwrap();
    write_precision_dataset(tmp.path());
    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("precision").arg("-d").arg(tmp.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Absolute Measured Inter-Packet Time Error [ns]",
        ))
        .stdout(predicate::str::contains("66.6667"))
        .stdout(predicate::str::contains("33.3333"));
}

#[test]
fn test_ref_flag_reads_reference_directory() {
    let tmp = TempDir::new().unwrap();
    let ref_dir = tmp.path().join("output_ref");
    fs::create_dir(&ref_dir).unwrap();
    write_precision_dataset(&ref_dir);

    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.current_dir(tmp.path()).arg("precision").arg("--ref");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("66.6667"));
}

#[test]
fn test_data_dir_overrides_ref_flag() {
    let tmp = TempDir::new().unwrap();
    let data_dir = tmp.path().join("run42");
    fs::create_dir(&data_dir).unwrap();
    write_precision_dataset(&data_dir);

    // --ref points at a directory that does not exist here; -d must win.
    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.current_dir(tmp.path())
        .arg("precision")
        .arg("--ref")
        .arg("-d")
        .arg(&data_dir);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("66.6667"));
}

#[test]
fn test_malformed_line_is_fatal_with_location() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("timestamp_diffs_expected.dat"),
        "0.000000000000\n0.000000000000\n",
    )
    .unwrap();
    fs::write(tmp.path().join("timestamp_diffs_measured.dat"), "3\nnot-a-number\n").unwrap();

    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("precision").arg("-d").arg(tmp.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("malformed value"))
        .stderr(predicate::str::contains(":2:"))
        .stderr(predicate::str::contains("not-a-number"));
}

#[test]
fn test_length_mismatch_is_fatal() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("timestamp_diffs_expected.dat"),
        "0.000000000000\n0.000000000000\n0.000000000000\n",
    )
    .unwrap();
    fs::write(tmp.path().join("timestamp_diffs_measured.dat"), "3\n4\n").unwrap();

    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("precision").arg("-d").arg(tmp.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("length mismatch"))
        .stderr(predicate::str::contains("3 expected"))
        .stderr(predicate::str::contains("2 measured"));
}

#[test]
fn test_throughput_analysis_runs() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("max_throughput.dat"),
        "64 13104000000.0 29468057600.0\n1518 19753000000.0 40649969900.0\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("throughput").arg("-d").arg(tmp.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Network Throughput (duplex) [Gbps]"))
        .stdout(predicate::str::contains("Aggregate Memory Bandwidth [Gbps]"))
        .stdout(predicate::str::contains("13.1040"));
}

#[test]
fn test_membw_analysis_runs() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("required_membandwidth.dat"),
        "1518 21000000000.0\n64 47250000000.0\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("membw").arg("-d").arg(tmp.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Required Memory Bandwidth [Gbps]"))
        .stdout(predicate::str::contains("47.2500"));
}

#[test]
fn test_latency_analysis_runs() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("histogram_4200000000.dat"),
        "646.4 1\n659.2 3\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("latency").arg("-d").arg(tmp.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Mean datarate: 4.20 Gbps"))
        .stdout(predicate::str::contains("25.0000"))
        .stdout(predicate::str::contains("75.0000"));
}

#[test]
fn test_latency_without_captures_is_missing_data() {
    let tmp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("latency").arg("-d").arg(tmp.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No measurement data has been found"));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("jitter");
    cmd.assert().failure();
}

#[test]
fn test_help_lists_analyses() {
    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("precision"))
        .stdout(predicate::str::contains("throughput"))
        .stdout(predicate::str::contains("membw"))
        .stdout(predicate::str::contains("latency"));
}

#[test]
#[ignore = "Font rendering not available in test environment"]
fn test_chart_flag_writes_png() {
    let tmp = TempDir::new().unwrap();
    write_precision_dataset(tmp.path());
    let chart_path = tmp.path().join("precision.png");

    let mut cmd = Command::cargo_bin("trazar").unwrap();
    cmd.arg("precision")
        .arg("-d")
        .arg(tmp.path())
        .arg("--chart")
        .arg(&chart_path);

    cmd.assert().success();
    assert!(chart_path.exists());
}
