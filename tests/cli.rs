//! CLI end-to-end tests.
//!
//! Tests run the compiled binary inside a temporary working directory.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run the CLI in `dir` and return (exit code, stdout, stderr).
fn run_cli(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_desk-usage"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn write_csv(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("CSV_FILE"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["does-not-exist.csv", "--no-show"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Error: File not found: does-not-exist.csv"));
    assert!(!dir.path().join("does-not-exist_visualization.png").exists());
}

#[test]
fn test_malformed_record() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        dir.path(),
        "desk.csv",
        "timestamp,height_mm\n2024-01-15T09:00:00,950\nnot-a-date,700\n",
    );
    let (code, _, stderr) = run_cli(dir.path(), &[&csv, "--no-show"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Malformed record 2"));
    assert!(!dir.path().join("desk_visualization.png").exists());
}

#[test]
fn test_empty_dataset_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        dir.path(),
        "desk.csv",
        "timestamp,height_mm\n2024-01-15T17:00:00,950\n2024-01-16T09:00:00,700\n",
    );
    let (code, stdout, stderr) = run_cli(dir.path(), &[&csv, "--no-show"]);

    assert_eq!(code, 1);
    assert!(stdout.contains("Loaded 2 records"));
    assert!(stderr.contains("No data to summarize"));
    assert!(!dir.path().join("desk_visualization.png").exists());
}

#[test]
fn test_json_error_output() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["missing.csv", "--json"]);

    assert_eq!(code, 1);
    let err: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert_eq!(err["code"], "INPUT_NOT_FOUND");
}

#[test]
fn test_invalid_max_gap() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "desk.csv", "timestamp,height_mm\n");
    let (code, _, stderr) = run_cli(dir.path(), &[&csv, "--max-gap-minutes", "0"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid configuration"));
}

const ONE_DAY_CSV: &str = "timestamp,height_mm\n\
                           2024-01-15T09:00:00,850\n\
                           2024-01-15T09:10:00,950\n\
                           2024-01-15T10:20:00,850\n";

#[test]
fn test_full_run() {
    if !desk_usage::chart::fonts_available() {
        eprintln!("skipping: no sans-serif font on this system");
        return;
    }

    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "desk.csv", ONE_DAY_CSV);
    let (code, stdout, _) = run_cli(dir.path(), &[&csv, "--no-show"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("STANDING DESK USAGE SUMMARY"));
    assert!(stdout.contains("Total standing time: 60 min (1.0 hours)"));
    assert!(stdout.contains("Total sitting time:  10 min (0.2 hours)"));
    assert!(stdout.contains("Visualization saved to desk_visualization.png"));
    assert!(dir.path().join("desk_visualization.png").exists());

    let banner = stdout.find("STANDING DESK USAGE SUMMARY").unwrap();
    let saved = stdout.find("Visualization saved to").unwrap();
    assert!(banner < saved);
}

#[test]
fn test_summary_printed_when_rendering_fails() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "desk.csv", ONE_DAY_CSV);
    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &[&csv, "--no-show", "-o", "no-such-dir/out.png"],
    );

    assert_eq!(code, 1);
    assert!(stdout.contains("STANDING DESK USAGE SUMMARY"));
    assert!(stdout.contains("Total standing time: 60 min (1.0 hours)"));
    assert!(!stdout.contains("Visualization saved to"));
    assert!(stderr.contains("Chart rendering error"));
    assert!(!dir.path().join("no-such-dir").exists());
}
