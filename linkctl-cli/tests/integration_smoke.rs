//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("linkctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("linkctl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-path"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--max-connections"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("linkctl").unwrap();
    cmd.arg("frobnicate");

    cmd.assert().failure();
}

#[test]
fn test_migrate_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nested").join("links.db");

    let mut cmd = Command::cargo_bin("linkctl").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("DATABASE_PATH")
        .arg("migrate")
        .arg("--database-path")
        .arg(&db);

    cmd.assert().success();
    assert!(db.exists());
}
