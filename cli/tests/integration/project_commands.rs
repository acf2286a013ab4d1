//! Integration tests for project discovery, `nomad config` and the errors
//! raised before any container is touched.
//!
//! Every test runs the binary inside a temp directory so the search for
//! `nomad.yml` never escapes into the developer's tree.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

const PROJECT: &str = "\
name: shop
image: ubuntu/24.04
containers:
  - name: web
  - name: db
    image: debian/12
";

fn nomad(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nomad"));
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("NOMAD_FILE");
    cmd.env_remove("NOMAD_JOBS");
    cmd
}

/// A temp directory holding `nomad.yml` with `content`.
fn project_dir(content: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("nomad.yml"), content).expect("write nomad.yml");
    dir
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run nomad");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// ---------------------------------------------------------------------------
// `nomad config`
// ---------------------------------------------------------------------------

#[test]
fn test_config_prints_normalized_project() {
    let dir = project_dir(PROJECT);
    nomad(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("name: shop"))
        .stdout(predicate::str::contains("debian/12"))
        .stdout(predicate::str::contains("ubuntu/24.04"));
}

#[test]
fn test_config_containers_lists_names_in_declaration_order() {
    let dir = project_dir(PROJECT);
    nomad(dir.path())
        .args(["config", "--containers"])
        .assert()
        .success()
        .stdout("web\ndb\n");
}

#[test]
fn test_config_is_found_from_a_subdirectory() {
    let dir = project_dir(PROJECT);
    let nested = dir.path().join("src").join("app");
    std::fs::create_dir_all(&nested).expect("mkdir");
    nomad(&nested)
        .args(["config", "--containers"])
        .assert()
        .success()
        .stdout("web\ndb\n");
}

#[test]
fn test_config_json_containers_is_an_array() {
    let dir = project_dir(PROJECT);
    let value = stdout_json(nomad(dir.path()).args(["--json", "config", "--containers"]));
    assert_eq!(value, serde_json::json!(["web", "db"]));
}

#[test]
fn test_config_json_shows_project_name() {
    let dir = project_dir(PROJECT);
    let value = stdout_json(nomad(dir.path()).args(["--json", "config"]));
    assert_eq!(value["name"], "shop");
    assert_eq!(value["containers"].as_array().map(Vec::len), Some(2));
}

// ---------------------------------------------------------------------------
// Explicit project file
// ---------------------------------------------------------------------------

#[test]
fn test_file_flag_selects_another_project() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("other.yml"),
        "name: lab\nimage: alpine/3.20\ncontainers:\n  - name: probe\n",
    )
    .expect("write");
    nomad(dir.path())
        .args(["--file", "other.yml", "config", "--containers"])
        .assert()
        .success()
        .stdout("probe\n");
}

#[test]
#[serial]
fn test_nomad_file_env_selects_another_project() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("env.yml");
    std::fs::write(
        &path,
        "name: lab\nimage: alpine/3.20\ncontainers:\n  - name: probe\n  - name: sink\n",
    )
    .expect("write");
    nomad(dir.path())
        .env("NOMAD_FILE", &path)
        .args(["config", "--containers"])
        .assert()
        .success()
        .stdout("probe\nsink\n");
}

// ---------------------------------------------------------------------------
// Project errors
// ---------------------------------------------------------------------------

#[test]
fn test_missing_project_file_fails() {
    let dir = TempDir::new().expect("temp dir");
    nomad(dir.path())
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("No nomad.yml found"));
}

#[test]
fn test_malformed_yaml_fails_with_parse_error() {
    let dir = project_dir("name: shop\ncontainers: [\n");
    nomad(dir.path())
        .arg("config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot parse"));
}

#[test]
fn test_duplicate_container_names_are_rejected() {
    let dir = project_dir(
        "name: shop\nimage: ubuntu/24.04\ncontainers:\n  - name: web\n  - name: web\n",
    );
    nomad(dir.path())
        .arg("config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("declared more than once"));
}

#[test]
fn test_container_without_image_is_rejected() {
    let dir = project_dir("name: shop\ncontainers:\n  - name: web\n");
    nomad(dir.path())
        .arg("config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("has no image"));
}

#[test]
fn test_json_errors_go_to_stdout_with_code() {
    let dir = TempDir::new().expect("temp dir");
    let value = stdout_json(nomad(dir.path()).args(["--json", "config"]));
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "PROJECT_NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Target resolution errors
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_container_name_fails_before_any_call() {
    let dir = project_dir(PROJECT);
    nomad(dir.path())
        .args(["status", "web", "cache"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No such container in this project: cache",
        ));
}

#[test]
fn test_unknown_container_json_code() {
    let dir = project_dir(PROJECT);
    let value = stdout_json(nomad(dir.path()).args(["--json", "halt", "cache"]));
    assert_eq!(value["code"], "UNKNOWN_CONTAINER");
}

#[test]
fn test_shell_unknown_name_is_not_found() {
    let dir = project_dir(PROJECT);
    nomad(dir.path())
        .args(["shell", "cache"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Container 'cache' not found."));
}

#[test]
fn test_shell_without_name_needs_a_single_container() {
    let dir = project_dir(PROJECT);
    nomad(dir.path())
        .arg("shell")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("declares 2 containers"))
        .stderr(predicate::str::contains("web, db"));
}
