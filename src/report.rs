//! Report path: decorate a repository's open issues and render the HTML
//! status table.

use anyhow::Result;

use crate::cli::ReportConfig;
use crate::decorate;
use crate::github;
use crate::html;
use crate::model::Issue;

pub const REPORT_TITLE: &str = "Github Issue Status";

/// Build the full HTML document for the status report. The caller prints it
/// to stdout (runs are typically redirected to a file).
pub fn run(cfg: &ReportConfig) -> Result<String> {
  let tracker = github::build_tracker(&cfg.token);
  let repo = tracker.get_repo(&cfg.org, &cfg.repo)?;
  let issues = tracker.list_open_issues(&repo)?;

  let matching: Vec<Issue> = issues
    .into_iter()
    .filter(|i| matches_label(i, cfg.label.as_deref()))
    .collect();

  let mut rows = decorate::decorate_issues(tracker.as_ref(), &repo, &matching)?;
  decorate::sort_by_priority(&mut rows);

  let mut body = html::h1(REPORT_TITLE);
  body.push('\n');
  body.push_str(&html::issue_table(&rows));

  Ok(html::document(REPORT_TITLE, &body))
}

/// The label filter is a substring match against label names, mirroring the
/// loose matching the reports have always used.
fn matches_label(issue: &Issue, filter: Option<&str>) -> bool {
  match filter {
    Some(f) => issue.labels.iter().any(|l| l.name.contains(f)),
    None => true,
  }
}
