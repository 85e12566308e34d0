//! Integration tests for the citescope CLI.
//!
//! Everything here exercises argument handling and identifier validation,
//! which fail before any network call is made.

use assert_cmd::Command;
use predicates::prelude::*;

// Helper function to create a clean command instance
fn citescope() -> Command { Command::cargo_bin("citescope-cli").unwrap() }

#[test]
fn test_help_lists_subcommands() {
  citescope()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("resolve"))
    .stdout(predicate::str::contains("show"));
}

#[test]
fn test_unsupported_url_source() {
  citescope()
    .arg("show")
    .arg("https://example.com/paper/1")
    .assert()
    .failure()
    .stderr(predicate::str::contains("UnsupportedSource"));
}

#[test]
fn test_malformed_url() {
  citescope()
    .arg("resolve")
    .arg("not a url at all")
    .assert()
    .failure()
    .stderr(predicate::str::contains("InvalidUrl"));
}

#[test]
fn test_unknown_kind_rejected() {
  citescope()
    .arg("resolve")
    .arg("0000-0002-1825-0097")
    .arg("--kind")
    .arg("orcid")
    .assert()
    .failure()
    .stderr(predicate::str::contains("orcid"));
}

#[test]
fn test_unknown_mode_rejected() {
  citescope()
    .arg("show")
    .arg("2301.07041")
    .arg("--kind")
    .arg("arxiv")
    .arg("--mode")
    .arg("histogram")
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid value"));
}
