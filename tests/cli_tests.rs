//! CLI integration tests using the real rendpack binary

mod common;

use assert_cmd::Command;
use common::TestContent;
use predicates::prelude::*;

#[allow(deprecated)]
fn rendpack_cmd() -> Command {
    Command::cargo_bin("rendpack").unwrap()
}

#[test]
fn test_help_output() {
    rendpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendition packaging engine"))
        .stdout(predicate::str::contains("pack"))
        .stdout(predicate::str::contains("strategies"))
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_output() {
    rendpack_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rendpack"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_completions_bash() {
    rendpack_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rendpack"));
}

#[test]
fn test_completions_unknown_shell() {
    rendpack_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
fn test_strategies_default_config() {
    let content = TestContent::new();

    rendpack_cmd()
        .current_dir(content.temp.path())
        .arg("strategies")
        .assert()
        .success()
        .stdout(predicate::str::contains("zip"))
        .stdout(predicate::str::contains("priority 0"))
        .stdout(predicate::str::contains("Static rendition dispatcher"));
}

#[test]
fn test_strategies_from_config_file() {
    let content = TestContent::new();
    let config = content.write_config(
        r#"
packagers:
  - strategy: zip
    file_name: Team Assets
    priority: 10
dispatchers:
  - label: Web renditions
    types: [image]
    mappings:
      - "web=web.jpeg"
"#,
    );

    rendpack_cmd()
        .args(["strategies", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("priority 10"))
        .stdout(predicate::str::contains("Team Assets.zip"))
        .stdout(predicate::str::contains("Web renditions"))
        .stdout(predicate::str::contains("web=web.jpeg"));
}

#[test]
fn test_pack_missing_required_args() {
    rendpack_cmd()
        .arg("pack")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--content"));
}

#[test]
fn test_invalid_config_is_reported() {
    let content = TestContent::new();
    let config = content.write_config("packagers: []\n");

    rendpack_cmd()
        .args(["strategies", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
