//! End-to-end tests for the `term-profile` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn sample_csv() -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    writeln!(file, "id,age,Gender").unwrap();
    writeln!(file, "1,5,M").unwrap();
    writeln!(file, "2,25,F").unwrap();
    writeln!(file, "3,45,").unwrap();
    file.flush().unwrap();
    file
}

fn term_profile() -> Command {
    let mut cmd = Command::cargo_bin("term-profile").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("TERM_PROFILE_FILE")
        .env_remove("TERM_PROFILE_COLUMN")
        .env_remove("TERM_PROFILE_RANGE_SIZE");
    cmd
}

#[test]
fn test_human_output() {
    let file = sample_csv();
    term_profile()
        .args(["--file", file.path().to_str().unwrap(), "--column", "age", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🔢 True numeric values: 3"))
        .stdout(predicate::str::contains("10–20: 0"))
        .stdout(predicate::str::contains("40–50: 1"));
}

#[test]
fn test_json_output_with_env_configuration() {
    let file = sample_csv();
    let output = term_profile()
        .env("TERM_PROFILE_FILE", file.path())
        .env("TERM_PROFILE_COLUMN", "age")
        .env("TERM_PROFILE_RANGE_SIZE", "25")
        .args(["--format", "json", "--compact"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["column_name"], "age");
    assert_eq!(value["distribution"]["range_size"], 25.0);
    assert_eq!(value["distribution"]["bins"].as_array().unwrap().len(), 2);
}

#[test]
fn test_missing_column_fails() {
    let file = sample_csv();
    term_profile()
        .args(["--file", file.path().to_str().unwrap(), "--column", "gender"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gender"));
}

#[test]
fn test_invalid_range_size_fails() {
    let file = sample_csv();
    term_profile()
        .args([
            "--file",
            file.path().to_str().unwrap(),
            "--column",
            "age",
            "--range-size",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("range_size"));
}

fn na_csv() -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    writeln!(file, "reading").unwrap();
    for value in ["1", "NA", "NaN", "null", "2", "-"] {
        writeln!(file, "{value}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn json_type_counts(extra: &[&str]) -> serde_json::Value {
    let file = na_csv();
    let mut args = vec![
        "--file",
        file.path().to_str().unwrap(),
        "--column",
        "reading",
        "--format",
        "json",
    ];
    args.extend_from_slice(extra);
    let output = term_profile().args(&args).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    value["type_counts"].clone()
}

#[test]
fn test_null_token_flags() {
    let counts = json_type_counts(&[]);
    assert_eq!(counts["missing"], 3);
    assert_eq!(counts["non_numeric_string"], 1);

    // "NaN" read as text still parses as a number
    let counts = json_type_counts(&["--null-regex", "^(|-)$"]);
    assert_eq!(counts["missing"], 1);
    assert_eq!(counts["non_numeric_string"], 2);
    assert_eq!(counts["numeric_string"], 3);

    let counts = json_type_counts(&["--no-default-na"]);
    assert_eq!(counts["missing"], 0);
    assert_eq!(counts["non_numeric_string"], 3);
}

#[test]
fn test_invalid_null_regex_fails() {
    let file = na_csv();
    term_profile()
        .args([
            "--file",
            file.path().to_str().unwrap(),
            "--column",
            "reading",
            "--null-regex",
            "(",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid null regex"));
}
