use predicates::prelude::*;

use crate::common;

#[test]
fn gen_man_emits_troff_page() {
  common::bin()
    .arg("--gen-man")
    .assert()
    .success()
    .stdout(predicate::str::contains(".TH").and(predicate::str::contains("issue-status-report")));
}
