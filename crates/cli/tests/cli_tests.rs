//! CLI integration tests for rowmatch.
//!
//! These cover argument handling, configuration diagnostics and exit codes;
//! none of them needs a reachable database.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("rowmatch").unwrap()
}

/// A working directory holding `application.properties` with `content`.
fn workdir_with(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("application.properties"), content).unwrap();
    dir
}

const SOURCE_ONLY: &str = "\
source.db.driver=org.postgresql.Driver
source.db.url=postgres://localhost:5432/shop
source.db.username=reader
source.db.password=secret
source.db.query=SELECT relname AS table_name, n_live_tup AS table_rows FROM pg_stat_user_tables
";

// =============================================================================
// Usage
// =============================================================================

#[test]
fn test_no_arguments_prints_usage() {
    cmd()
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Error due argument is missing"))
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("rowmatch compare"))
        .stdout(predicate::str::contains("rowmatch test [source|target]"));
}

#[test]
fn test_invalid_database_name_prints_usage() {
    cmd()
        .args(["test", "wrong"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid Database name wrong."))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_database_name_prints_usage() {
    cmd()
        .arg("test")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error due missing database name."))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_command_prints_usage() {
    cmd()
        .arg("sync")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_compare_takes_no_arguments() {
    cmd()
        .args(["compare", "orders"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_usage_is_checked_before_config() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["test", "wrong"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("application.properties").not());
}

#[test]
fn test_help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("test"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_compare_without_properties_file() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .arg("compare")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "File application.properties not found.",
        ));
}

#[test]
fn test_compare_lists_every_missing_key() {
    let dir = workdir_with(&format!(
        "{SOURCE_ONLY}\
         target.db.driver=org.postgresql.Driver\n\
         target.db.username=writer\n\
         target.db.query=SELECT 1\n"
    ));

    cmd()
        .current_dir(dir.path())
        .arg("compare")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Properties target.db.url, target.db.password not set in application.properties file.",
        ))
        .stdout(predicate::str::contains(">>> Table with").not());
}

#[test]
fn test_connection_test_with_incomplete_config() {
    let dir = workdir_with(SOURCE_ONLY);
    cmd()
        .current_dir(dir.path())
        .args(["test", "target"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Properties target.db.driver, target.db.url, target.db.username, target.db.password not set"));
}

#[test]
fn test_connection_test_failure_line() {
    let dir = workdir_with(
        "target.db.driver=com.ibm.db2.jcc.DB2Driver\n\
         target.db.url=jdbc:db2://localhost:50000/shop\n\
         target.db.username=writer\n\
         target.db.password=secret\n",
    );

    cmd()
        .current_dir(dir.path())
        .args(["test", "target"])
        .assert()
        .code(1)
        .stdout(predicate::str::diff("Unable to connect to database target.\n"));
}
