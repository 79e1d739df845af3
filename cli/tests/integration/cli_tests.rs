//! Integration tests for argument parsing and the pre-flight checks
//!
//! Every test stops before the first `az` invocation, so no Azure account
//! or network access is needed.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn jhub() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jhub"));
    cmd.env("NO_COLOR", "1")
        .env_remove("AZURE_SUBSCRIPTION_ID")
        .env_remove("JHUB_PROFILE")
        .env_remove("RUST_LOG");
    cmd
}

/// A scratch working directory that also serves as `$HOME`, so no user
/// profile is picked up.
fn sandbox() -> TempDir {
    TempDir::new().expect("tempdir")
}

fn in_sandbox(tmp: &TempDir) -> Command {
    let mut cmd = jhub();
    cmd.current_dir(tmp.path()).env("HOME", tmp.path());
    cmd
}

// --- Help and version tests ---

#[test]
fn test_help_lists_every_flag() {
    jhub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("-s <SUBSCRIPTION_ID>"))
        .stdout(predicate::str::contains("-n <NAME>"))
        .stdout(predicate::str::contains("-r <RBAC>"))
        .stdout(predicate::str::contains("-d <DISKS>"))
        .stdout(predicate::str::contains("-D <DISK_SIZE>"))
        .stdout(predicate::str::contains("-l <LOCATION>"))
        .stdout(predicate::str::contains("[default: rbac.json]"))
        .stdout(predicate::str::contains("[default: centralus]"))
        .stdout(predicate::str::contains("lowercase"))
        .stdout(predicate::str::contains("DNS"));
}

#[test]
fn test_version_flag_shows_version() {
    jhub()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("jhub "));
}

// --- Argument validation ---

#[test]
fn test_missing_subscription_is_usage_error() {
    jhub()
        .args(["-n", "foo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("-s <SUBSCRIPTION_ID>"));
}

#[test]
fn test_missing_name_is_usage_error() {
    jhub()
        .args(["-s", "sub-123"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("-n <NAME>"));
}

#[test]
fn test_invalid_cluster_name_is_rejected_before_any_work() {
    let tmp = sandbox();
    in_sandbox(&tmp)
        .args(["-s", "sub-123", "-n", "Bad_Name"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid cluster name 'Bad_Name'"));
    assert!(!tmp.path().join("Bad_Name").exists());
}

#[test]
fn test_zero_disk_size_is_rejected() {
    jhub()
        .args(["-s", "sub-123", "-n", "foo", "-D", "0"])
        .assert()
        .code(2);
}

#[test]
fn test_non_numeric_disk_count_is_rejected() {
    jhub()
        .args(["-s", "sub-123", "-n", "foo", "-d", "four"])
        .assert()
        .code(2);
}

// --- Output directory pre-flight ---

#[test]
fn test_output_path_that_is_a_file_exits_one() {
    let tmp = sandbox();
    std::fs::write(tmp.path().join("foo"), "").expect("write file");

    in_sandbox(&tmp)
        .args(["-s", "sub-123", "-n", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("foo exists and is not a directory."));

    assert!(tmp.path().join("foo").is_file(), "the file must be left alone");
}

#[test]
fn test_subscription_from_environment_reaches_preflight() {
    let tmp = sandbox();
    std::fs::write(tmp.path().join("foo"), "").expect("write file");

    in_sandbox(&tmp)
        .env("AZURE_SUBSCRIPTION_ID", "sub-123")
        .args(["-n", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("foo exists and is not a directory."));
}

#[test]
fn test_json_error_output_carries_error_code() {
    let tmp = sandbox();
    std::fs::write(tmp.path().join("foo"), "").expect("write file");

    let output = in_sandbox(&tmp)
        .args(["--json", "-s", "sub-123", "-n", "foo"])
        .output()
        .expect("run jhub");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "not_a_directory");
    assert!(
        value["message"]
            .as_str()
            .expect("message")
            .ends_with("foo exists and is not a directory.")
    );
}

// --- Profile loading ---

#[test]
fn test_missing_explicit_profile_exits_one() {
    let tmp = sandbox();
    in_sandbox(&tmp)
        .args(["-s", "sub-123", "-n", "foo", "--profile", "nope.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("profile nope.yaml does not exist"));
    assert!(!tmp.path().join("foo").exists());
}

#[test]
fn test_profile_with_unknown_key_exits_one() {
    let tmp = sandbox();
    let profile = tmp.path().join("profile.yaml");
    std::fs::write(&profile, "vm_size: huge\n").expect("write profile");

    in_sandbox(&tmp)
        .env("JHUB_PROFILE", &profile)
        .args(["-s", "sub-123", "-n", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse"));
}
