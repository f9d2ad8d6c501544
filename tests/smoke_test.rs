//! Smoke tests for the rusky binary.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_help() {
    let env = TestEnv::new();
    env.rusky()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("technical debt"))
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.rusky()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_explicit_repo_path() {
    let env = TestEnv::new();
    let other = common::TempDir::new().unwrap();

    env.rusky()
        .args(["-C", other.path().to_str().unwrap(), "add", "over there"])
        .assert()
        .success();

    assert!(other.path().join(".rusky.json").exists());
    assert!(!env.data_file().exists());
}

#[test]
fn test_missing_repo_path_fails() {
    let env = TestEnv::new();
    env.rusky()
        .args(["-C", "/definitely/not/here", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_full_workflow() {
    let env = TestEnv::new();
    env.write_file("lib.rs", "// TODO: scanned work\n");

    env.add("manual work");
    env.rusky().args(["scan", "--add-all"]).assert().success();
    env.rusky().args(["complete", "1"]).assert().success();

    env.rusky()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("manual work"))
        .stdout(predicate::str::contains("scanned work  lib.rs:1 [TODO]"))
        .stdout(predicate::str::contains("Total: 2 items (1 open, 1 completed)"));
}
