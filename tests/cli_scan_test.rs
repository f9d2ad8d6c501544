//! Integration tests for `rusky scan`.
//!
//! The interactive selector needs a terminal, so these tests stick to
//! --dry-run, --add-all and JSON output.

mod common;

use common::{TestEnv, parse_json};
use predicates::prelude::*;
use std::fs;

fn seed(env: &TestEnv) {
    env.write_file(
        "src/main.go",
        "package main\n\nimport \"fmt\"\n\n// TODO: fix this\nfunc main() {}\n",
    );
    env.write_file("src/util.py", "# FIXME: slow path\n# HACK: temporary\n");
    env.write_file("node_modules/lib/index.js", "// TODO: vendored\n");
    env.write_file("dist/bundle.min.js", "// TODO: minified\n");
    env.write_file("web/app.min.js", "// BUG: minified too\n");
}

#[test]
fn test_dry_run_previews_without_writing() {
    let env = TestEnv::new();
    seed(&env);

    env.rusky()
        .args(["scan", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan complete: found 3 items"))
        .stdout(predicate::str::contains("TODO: 1"))
        .stdout(predicate::str::contains("FIXME: 1"))
        .stdout(predicate::str::contains("HACK: 1"))
        .stdout(predicate::str::contains("[TODO] src/main.go:5 - fix this"))
        .stdout(predicate::str::contains("vendored").not())
        .stdout(predicate::str::contains("minified").not());

    assert!(!env.data_file().exists());
}

#[test]
fn test_dry_run_respects_preview_limit() {
    let env = TestEnv::new();
    let body: String = (1..=15).map(|i| format!("// NOTE: item {}\n", i)).collect();
    env.write_file("notes.rs", &body);

    env.rusky()
        .args(["scan", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("item 10"))
        .stdout(predicate::str::contains("item 11").not())
        .stdout(predicate::str::contains("... and 5 more items"));

    env.rusky()
        .args(["config", "set", "preview-limit", "3"])
        .assert()
        .success();

    env.rusky()
        .args(["scan", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("item 4").not())
        .stdout(predicate::str::contains("... and 12 more items"));
}

#[test]
fn test_add_all_persists_every_finding() {
    let env = TestEnv::new();
    seed(&env);

    env.rusky()
        .args(["scan", "--add-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 3 items to"));

    let doc = env.read_items();
    let items = doc["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|item| item["is_scanned"] == true));

    let todo = items
        .iter()
        .find(|item| item["comment_type"] == "TODO")
        .unwrap();
    assert_eq!(todo["line_number"], 5);
    assert_eq!(todo["description"], "fix this");
    assert!(todo["file_path"].as_str().unwrap().ends_with("main.go"));
}

#[test]
fn test_scan_specific_path() {
    let env = TestEnv::new();
    seed(&env);
    env.write_file("docs/guide.md", "<!-- XXX: rewrite -->\n");

    env.rusky()
        .args(["scan", "docs", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("found 1 items"))
        .stdout(predicate::str::contains("[XXX] guide.md:1 - rewrite"));
}

#[test]
fn test_scan_with_no_markers() {
    let env = TestEnv::new();
    env.write_file("clean.rs", "fn main() {}\n");

    env.rusky()
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan complete: found 0 items"))
        .stdout(predicate::str::contains("No technical debt markers found."));

    assert!(!env.data_file().exists());
}

#[test]
fn test_scan_missing_path_fails() {
    let env = TestEnv::new();

    env.rusky()
        .args(["scan", "nowhere", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to resolve scan path"));
}

#[test]
fn test_scan_modes_conflict() {
    let env = TestEnv::new();
    env.rusky()
        .args(["scan", "--dry-run", "--add-all"])
        .assert()
        .failure();
}

#[test]
fn test_json_scan_lists_findings_without_prompting() {
    let env = TestEnv::new();
    seed(&env);

    let output = env.rusky().args(["--json", "scan"]).output().unwrap();
    assert!(output.status.success());

    let json = parse_json(&output.stdout);
    assert_eq!(json["mode"], "review");
    assert_eq!(json["total"], 3);
    assert_eq!(json["findings"].as_array().unwrap().len(), 3);
    assert_eq!(json["counts"][0]["marker"], "TODO");
    assert!(!env.data_file().exists());
}

#[test]
fn test_rescan_is_deterministic() {
    let env = TestEnv::new();
    seed(&env);

    let first = env.rusky().args(["--json", "scan"]).output().unwrap();
    let second = env.rusky().args(["--json", "scan"]).output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_repo_flag_scans_repo_from_other_directory() {
    let env = TestEnv::new();
    env.write_file("src/lib.rs", "// TODO: inside repo\n");
    let elsewhere = common::TempDir::new().unwrap();
    fs::write(elsewhere.path().join("stray.rs"), "// TODO: outside repo\n").unwrap();

    env.rusky()
        .current_dir(elsewhere.path())
        .args(["-C", env.path().to_str().unwrap(), "scan", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("found 1 items"))
        .stdout(predicate::str::contains("[TODO] src/lib.rs:1 - inside repo"))
        .stdout(predicate::str::contains("outside repo").not());

    env.rusky()
        .current_dir(elsewhere.path())
        .args(["-C", env.path().to_str().unwrap(), "scan", "src", "--add-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 items to"));

    let doc = env.read_items();
    assert_eq!(doc["items"][0]["description"], "inside repo");
    assert!(!elsewhere.path().join(".rusky.json").exists());
}
