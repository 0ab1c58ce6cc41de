// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the tracker-facing types (repos, issues, comments, users) and the transient derived records shared by decoration, matching, and mailing
// role: model/types
// outputs: Serializable structs mirroring the GitHub REST shapes; fixed-field derived records
// invariants: Wire structs tolerate missing optional fields via defaults; derived records are per-run and never persisted
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository owner as embedded in the repos endpoint payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RepoOwner {
  pub login: String,
}

/// A repository addressed as owner/name.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Repo {
  pub name: String,
  pub full_name: String,
  pub owner: RepoOwner,
}

/// A label attached to an issue.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Label {
  pub name: String,
}

/// A user reference as embedded in issue payloads. Only `login` is reliable
/// there; display name and email come from the users endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserRef {
  pub login: String,
}

/// A user profile from the users endpoint. `name` and `email` are whatever
/// the user chose to make public, so both are routinely absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct User {
  pub login: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
}

/// An open issue as returned by the issues endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Issue {
  pub number: i64,
  pub title: String,
  pub html_url: String,
  #[serde(default)]
  pub labels: Vec<Label>,
  #[serde(default)]
  pub assignees: Vec<UserRef>,
  /// Comment count; the comment bodies are fetched separately and only when
  /// this is non-zero.
  #[serde(default)]
  pub comments: i64,
  pub updated_at: DateTime<Utc>,
  /// Present when the "issue" is actually a pull request surfaced by the
  /// issues endpoint.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pull_request: Option<serde_json::Value>,
}

impl Issue {
  pub fn has_label(&self, name: &str) -> bool {
    self.labels.iter().any(|l| l.name == name)
  }
}

/// A single issue comment. GitHub serializes a deleted-body comment as null.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Comment {
  #[serde(default)]
  pub body: Option<String>,
}

/// Display-ready issue row. The `*_html` fields are rendered fragments and
/// are embedded raw by the table builder.
#[derive(Debug, Clone)]
pub struct DecoratedIssue {
  pub number: i64,
  pub html_url: String,
  pub title: String,
  pub assignee_html: String,
  pub priority_html: String,
  pub status_html: String,
}

/// One matched (issue, label) pair with its resolved recipient list.
#[derive(Debug, Clone)]
pub struct Notification {
  pub issue: Issue,
  pub recipients: Vec<String>,
}

/// One grouped reminder email, ready for the send (or print) step.
#[derive(Debug)]
pub struct Email {
  pub to: Vec<String>,
  pub body: String,
  pub issues: Vec<Issue>,
}
