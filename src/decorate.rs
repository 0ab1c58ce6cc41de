//! Issue decoration: normalize a raw issue into a display-ready row,
//! substituting rendered placeholders where metadata is missing.

use anyhow::Result;
use once_cell::sync::Lazy;

use crate::github::IssueTracker;
use crate::html;
use crate::markdown;
use crate::model::{DecoratedIssue, Issue, Repo};

// Placeholders are markdown so they render bold, like the rest of the report
// prose; rendered once per process.
static ASSIGN_PLACEHOLDER: Lazy<String> = Lazy::new(|| markdown::to_html("**Please assign!**"));
static PRIORITY_PLACEHOLDER: Lazy<String> = Lazy::new(|| markdown::to_html("**Please set priority!**"));
static STATUS_PLACEHOLDER: Lazy<String> = Lazy::new(|| markdown::to_html("**Please add status comment!**"));

/// Decorate every issue in order. Tracker failures (comment fetches) abort
/// the run; missing fields never do.
pub fn decorate_issues(tracker: &dyn IssueTracker, repo: &Repo, issues: &[Issue]) -> Result<Vec<DecoratedIssue>> {
  issues.iter().map(|issue| decorate_issue(tracker, repo, issue)).collect()
}

pub fn decorate_issue(tracker: &dyn IssueTracker, repo: &Repo, issue: &Issue) -> Result<DecoratedIssue> {
  Ok(DecoratedIssue {
    number: issue.number,
    html_url: issue.html_url.clone(),
    title: issue.title.clone(),
    assignee_html: assignee_html(tracker, issue),
    priority_html: priority_html(issue),
    status_html: status_html(tracker, repo, issue)?,
  })
}

/// Sort rows by priority text, ascending. Lexicographic on purpose: the
/// priority is the label suffix, not a number.
pub fn sort_by_priority(rows: &mut [DecoratedIssue]) {
  rows.sort_by(|a, b| a.priority_html.cmp(&b.priority_html));
}

/// Joined display names for all assignees, preferring a profile name over
/// the login handle.
fn assignee_html(tracker: &dyn IssueTracker, issue: &Issue) -> String {
  let names: Vec<String> = issue
    .assignees
    .iter()
    .map(|a| display_name(tracker, &a.login))
    .collect();

  if names.is_empty() {
    ASSIGN_PLACEHOLDER.clone()
  } else {
    html::escape(&names.join(", "))
  }
}

fn display_name(tracker: &dyn IssueTracker, login: &str) -> String {
  tracker
    .get_user(login)
    .and_then(|u| u.name)
    .unwrap_or_else(|| login.to_string())
}

/// Value after the colon of the first `priority:X` label.
fn priority_html(issue: &Issue) -> String {
  issue
    .labels
    .iter()
    .filter(|l| l.name.contains("priority"))
    .find_map(|l| l.name.split_once(':'))
    .map(|(_, value)| html::escape(value))
    .unwrap_or_else(|| PRIORITY_PLACEHOLDER.clone())
}

/// Markdown-rendered body of the most recent comment. The comment list is
/// only fetched when the issue reports a non-zero comment count.
fn status_html(tracker: &dyn IssueTracker, repo: &Repo, issue: &Issue) -> Result<String> {
  if issue.comments == 0 {
    return Ok(STATUS_PLACEHOLDER.clone());
  }

  let comments = tracker.list_comments(repo, issue.number)?;
  let latest_body = comments.iter().rev().find_map(|c| c.body.as_deref());

  Ok(match latest_body {
    Some(body) => markdown::to_html(body),
    None => STATUS_PLACEHOLDER.clone(),
  })
}
