use predicates::prelude::*;

use crate::common;

#[test]
fn no_arguments_fails_with_guidance() {
  common::bin()
    .assert()
    .failure()
    .stderr(predicate::str::contains("report or notify"));
}

#[test]
fn missing_positionals_print_usage_and_fail() {
  common::bin()
    .args(["notify", "tok"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Usage"));
}

#[test]
fn report_requires_token_repo_and_org() {
  common::bin()
    .args(["report"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_both_subcommands() {
  common::bin()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("report").and(predicate::str::contains("notify")));
}
