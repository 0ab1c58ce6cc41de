use predicates::prelude::*;

use crate::common;

#[test]
fn report_renders_decorated_table() {
  let issues = serde_json::json!([
    common::issue_json(
      12,
      "Flaky widget test",
      &["bug", "priority:2"],
      &["ada"],
      1,
      "2025-06-01T12:00:00Z"
    ),
    common::issue_json(13, "Unassigned mystery", &["bug"], &[], 0, "2025-06-02T12:00:00Z"),
  ]);
  let comments = serde_json::json!({
    "12": [{"body": "**Still failing** on CI"}]
  });
  let users = serde_json::json!({
    "ada": {"login": "ada", "name": "Ada Lovelace", "email": "ada@x.com"}
  });

  let assert = common::bin()
    .args(["report", "tok", "widgets", "acme"])
    .env("ISR_TEST_ISSUES_JSON", issues.to_string())
    .env("ISR_TEST_COMMENTS_JSON", comments.to_string())
    .env("ISR_TEST_USERS_JSON", users.to_string())
    .assert()
    .success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

  assert!(stdout.contains("<title>Github Issue Status</title>"));
  assert!(stdout.contains("<h1>Github Issue Status</h1>"));
  assert!(stdout.contains("<a href=\"https://github.com/acme/widgets/issues/12\">12</a>"));
  assert!(stdout.contains("Ada Lovelace"));
  assert!(stdout.contains("<strong>Still failing</strong> on CI"));
  // the bare issue degrades to placeholders, never an error
  assert!(stdout.contains("Please assign!"));
  assert!(stdout.contains("Please set priority!"));
  assert!(stdout.contains("Please add status comment!"));
}

#[test]
fn report_sorts_rows_by_priority_text() {
  let issues = serde_json::json!([
    common::issue_json(1, "Later", &["priority:3"], &[], 0, "2025-06-01T12:00:00Z"),
    common::issue_json(2, "Sooner", &["priority:1"], &[], 0, "2025-06-01T12:00:00Z"),
  ]);

  let assert = common::bin()
    .args(["report", "tok", "widgets", "acme"])
    .env("ISR_TEST_ISSUES_JSON", issues.to_string())
    .assert()
    .success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let sooner = stdout.find("Sooner").expect("row for priority:1");
  let later = stdout.find("Later").expect("row for priority:3");
  assert!(sooner < later, "priority:1 row must precede priority:3");
}

#[test]
fn report_label_filter_is_substring_match() {
  let issues = serde_json::json!([
    common::issue_json(1, "Infra drift", &["team/infra"], &[], 0, "2025-06-01T12:00:00Z"),
    common::issue_json(2, "Docs typo", &["docs"], &[], 0, "2025-06-01T12:00:00Z"),
  ]);

  common::bin()
    .args(["report", "tok", "widgets", "acme", "infra"])
    .env("ISR_TEST_ISSUES_JSON", issues.to_string())
    .assert()
    .success()
    .stdout(predicate::str::contains("Infra drift").and(predicate::str::contains("Docs typo").not()));
}

#[test]
fn report_with_no_issues_still_renders_a_page() {
  common::bin()
    .args(["report", "tok", "widgets", "acme"])
    .env("ISR_TEST_ISSUES_JSON", "[]")
    .assert()
    .success()
    .stdout(predicate::str::contains("<table").and(predicate::str::contains("NUMBER")));
}
