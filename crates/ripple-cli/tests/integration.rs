//! Integration tests for ripple-cli.
//!
//! Tests run the `ripple` binary against synthetic and hand-written job
//! files.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `ripple` binary built by cargo.
fn ripple_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ripple"))
}

fn generate(path: &Path, extra: &[&str]) {
    let output = ripple_bin()
        .arg("generate")
        .arg(path)
        .args(extra)
        .output()
        .expect("failed to run ripple generate");
    assert!(
        output.status.success(),
        "ripple generate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

// ---------------------------------------------------------------------------
// `ripple generate`
// ---------------------------------------------------------------------------

#[test]
fn cli_generate_writes_job() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demo.toml");

    let output = ripple_bin()
        .args(["generate", path.to_str().unwrap(), "--teeth", "20", "--points", "60"])
        .output()
        .expect("failed to run ripple generate");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Z=20"), "{stdout}");
    assert!(stdout.contains("order 60"), "{stdout}");

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[gear]"));
    assert!(text.contains("teeth = 20"));
}

#[test]
fn cli_generate_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let output = ripple_bin()
        .arg("generate")
        .arg(dir.path().join("demo.csv"))
        .output()
        .expect("failed to run ripple generate");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported"));
}

// ---------------------------------------------------------------------------
// `ripple info`
// ---------------------------------------------------------------------------

#[test]
fn cli_info_summarizes_job() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demo.json");
    generate(&path, &["--points", "50"]);

    let output = ripple_bin()
        .arg("info")
        .arg(&path)
        .output()
        .expect("failed to run ripple info");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Teeth:             25"), "{stdout}");
    assert!(stdout.contains("Profile: 50 traces"), "{stdout}");
    assert!(stdout.contains("Helix: 50 traces"), "{stdout}");
    assert!(stdout.contains("Samples per trace: 50 – 50"), "{stdout}");
}

#[test]
fn cli_info_missing_file_fails() {
    let output = ripple_bin()
        .args(["info", "/nonexistent/job.toml"])
        .output()
        .expect("failed to run ripple info");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read file"));
}

// ---------------------------------------------------------------------------
// `ripple analyze`
// ---------------------------------------------------------------------------

#[test]
fn cli_analyze_reports_imprinted_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demo.toml");
    generate(&path, &["--order", "75", "--points", "120"]);

    let output = ripple_bin()
        .args(["analyze", path.to_str().unwrap(), "--tolerance"])
        .output()
        .expect("failed to run ripple analyze");
    assert!(
        output.status.success(),
        "ripple analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("left_profile:"), "{stdout}");
    assert!(stdout.contains("right_profile:"), "{stdout}");
    assert!(stdout.contains("75★"), "{stdout}");
    assert!(stdout.contains("W = "), "{stdout}");
    assert!(stdout.contains("Tolerance R="), "{stdout}");
}

#[test]
fn cli_analyze_json_export() {
    let dir = TempDir::new().unwrap();
    let job = dir.path().join("demo.toml");
    let out = dir.path().join("results.json");
    generate(&job, &["--points", "80", "--helix-angle", "-12.5"]);

    let output = ripple_bin()
        .args(["analyze", job.to_str().unwrap(), "-n", "5", "--json"])
        .arg(&out)
        .output()
        .expect("failed to run ripple analyze");
    assert!(output.status.success());

    let text = std::fs::read_to_string(&out).unwrap();
    let report: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(report["analysis"]["component_count"], 5);
    assert_eq!(report["gear"]["teeth"], 25);

    let results = report["results"].as_object().unwrap();
    assert_eq!(results.len(), 4);
    let left_profile = &results["left_profile"];
    assert_eq!(left_profile["spectrum"]["components"].as_array().unwrap().len(), 5);
    assert_eq!(left_profile["resampled"]["angles"].as_array().unwrap().len(), 360);
    assert!(report.get("tolerance").is_none());
}

#[test]
fn cli_analyze_rejects_too_many_components() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.toml");
    generate(&path, &["--teeth", "2", "--order", "4", "--points", "30"]);

    // Two teeth allow orders 1..=10 only.
    let output = ripple_bin()
        .args(["analyze", path.to_str().unwrap(), "-n", "11"])
        .output()
        .expect("failed to run ripple analyze");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("component_count"));
}
