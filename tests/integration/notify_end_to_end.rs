use predicates::prelude::*;

use crate::common;

const NOW: &str = "2025-07-31T12:00:00Z";

#[test]
fn exact_threshold_match_produces_one_reminder() {
  // updated exactly 30 days before the pinned "now"
  let dir = tempfile::TempDir::new().unwrap();
  let config = common::write_config(
    &dir,
    "criteria:\n  needs-info:\n    - days: 30\n      recipients: [pm@x.com]\n",
  );
  let issues = serde_json::json!([common::issue_json(
    7,
    "Waiting on reporter details",
    &["needs-info"],
    &[],
    0,
    "2025-07-01T12:00:00Z"
  )]);

  common::bin()
    .args(["notify", "tok", "widgets", "acme"])
    .arg(config.to_str().unwrap())
    .args(["--now-override", NOW])
    .env("ISR_TEST_ISSUES_JSON", issues.to_string())
    .assert()
    .success()
    .stdout(
      predicate::str::contains("Email Summary")
        .and(predicate::str::contains("pm@x.com"))
        .and(predicate::str::contains("Waiting on reporter details")),
    );
}

#[test]
fn off_by_one_staleness_matches_nothing() {
  // 31 days stale against an exact 30-day threshold
  let dir = tempfile::TempDir::new().unwrap();
  let config = common::write_config(
    &dir,
    "criteria:\n  needs-info:\n    - days: 30\n      recipients: [pm@x.com]\n",
  );
  let issues = serde_json::json!([common::issue_json(
    7,
    "Waiting on reporter details",
    &["needs-info"],
    &[],
    0,
    "2025-06-30T12:00:00Z"
  )]);

  common::bin()
    .args(["notify", "tok", "widgets", "acme"])
    .arg(config.to_str().unwrap())
    .args(["--now-override", NOW])
    .env("ISR_TEST_ISSUES_JSON", issues.to_string())
    .assert()
    .success()
    .stdout(predicate::str::contains("pm@x.com").not());
}

#[test]
fn catch_up_threshold_matches_beyond_the_day() {
  let dir = tempfile::TempDir::new().unwrap();
  let config = common::write_config(
    &dir,
    "catch-up: true\ncriteria:\n  needs-info:\n    - days: 30\n      recipients: [pm@x.com]\n",
  );
  let issues = serde_json::json!([common::issue_json(
    7,
    "Waiting on reporter details",
    &["needs-info"],
    &[],
    0,
    "2025-06-15T12:00:00Z"
  )]);

  common::bin()
    .args(["notify", "tok", "widgets", "acme"])
    .arg(config.to_str().unwrap())
    .args(["--now-override", NOW])
    .env("ISR_TEST_ISSUES_JSON", issues.to_string())
    .assert()
    .success()
    .stdout(predicate::str::contains("pm@x.com"));
}

#[test]
fn shared_recipients_collapse_into_one_email() {
  let dir = tempfile::TempDir::new().unwrap();
  let config = common::write_config(
    &dir,
    "criteria:\n  needs-info:\n    - days: 30\n      recipients: [a@x.com, b@x.com]\n",
  );
  let issues = serde_json::json!([
    common::issue_json(1, "First stale issue", &["needs-info"], &[], 0, "2025-07-01T12:00:00Z"),
    common::issue_json(2, "Second stale issue", &["needs-info"], &[], 0, "2025-07-01T09:00:00Z"),
  ]);

  let assert = common::bin()
    .args(["notify", "tok", "widgets", "acme"])
    .arg(config.to_str().unwrap())
    .args(["--now-override", NOW])
    .env("ISR_TEST_ISSUES_JSON", issues.to_string())
    .assert()
    .success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  assert_eq!(stdout.matches("are getting").count(), 1, "expected a single grouped email");
  assert!(stdout.contains("2 issue reminder(s)"));
  assert!(stdout.contains("First stale issue"));
  assert!(stdout.contains("Second stale issue"));
}

#[test]
fn authors_sentinel_resolves_to_assignee_emails() {
  let dir = tempfile::TempDir::new().unwrap();
  let config = common::write_config(
    &dir,
    "criteria:\n  needs-info:\n    - days: 30\n      recipients: [AUTHORS]\n",
  );
  let issues = serde_json::json!([common::issue_json(
    7,
    "Waiting on reporter details",
    &["needs-info"],
    &["ada"],
    0,
    "2025-07-01T12:00:00Z"
  )]);
  let users = serde_json::json!({
    "ada": {"login": "ada", "name": "Ada Lovelace", "email": "ada@x.com"}
  });

  common::bin()
    .args(["notify", "tok", "widgets", "acme"])
    .arg(config.to_str().unwrap())
    .args(["--now-override", NOW])
    .env("ISR_TEST_ISSUES_JSON", issues.to_string())
    .env("ISR_TEST_USERS_JSON", users.to_string())
    .assert()
    .success()
    .stdout(predicate::str::contains("ada@x.com").and(predicate::str::contains("AUTHORS").not()));
}

#[test]
fn config_without_criteria_aborts_the_run() {
  let dir = tempfile::TempDir::new().unwrap();
  let config = common::write_config(&dir, "severity:\n  default: [pm@x.com]\n");

  common::bin()
    .args(["notify", "tok", "widgets", "acme"])
    .arg(config.to_str().unwrap())
    .args(["--now-override", NOW])
    .env("ISR_TEST_ISSUES_JSON", "[]")
    .assert()
    .failure()
    .stderr(predicate::str::contains("criteria"));
}
