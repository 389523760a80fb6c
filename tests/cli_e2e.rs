//! End-to-end CLI tests for the savetv-dl binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("savetv-dl").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive your Save.TV recordings"))
        .stdout(predicate::str::contains("--user"))
        .stdout(predicate::str::contains("--remove"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("savetv-dl").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("savetv-dl"));
}

/// Test that missing credentials cause non-zero exit before any work.
#[test]
fn test_binary_missing_credentials_returns_error() {
    let work = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("savetv-dl").unwrap();
    cmd.current_dir(work.path())
        .arg("-u")
        .arg("alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--password"));

    assert!(!work.path().join("savetv-dl.db").exists());
}

/// Test that a nonexistent target directory is rejected.
#[test]
fn test_binary_rejects_missing_directory() {
    let mut cmd = Command::cargo_bin("savetv-dl").unwrap();
    cmd.args(["-u", "alice", "-p", "pw", "-d", "/definitely/not/here/savetv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an existing directory"));
}

/// Test that a denied login exits non-zero and leaves the ledger behind.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_denied_login_returns_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/STV/M/Index.cfm"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Login failed"))
        .mount(&server)
        .await;
    let work = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("savetv-dl").unwrap();
    cmd.current_dir(work.path())
        .env_remove("RUST_LOG")
        .args(["-u", "alice", "-p", "wrong", "-n", "--base-url", &server.uri()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("login denied"));

    assert!(work.path().join("savetv-dl.db").exists());
}

/// Test that a run against an empty archive succeeds.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_empty_archive_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/STV/M/Index.cfm"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "SNUUID=cli; path=/")
                .set_body_string("Login_Succeed"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/STV/M/obj/archive/JSON/VideoArchiveApi.cfm"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"ARRVIDEOARCHIVEENTRIES":[]}"#),
        )
        .mount(&server)
        .await;
    let work = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("savetv-dl").unwrap();
    cmd.current_dir(work.path())
        .env_remove("RUST_LOG")
        .args(["-u", "alice", "-p", "pw", "-q", "--base-url", &server.uri()])
        .assert()
        .success();
}
