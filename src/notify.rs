//! Notification matching: intersect issue labels with configured criteria,
//! evaluate staleness thresholds, and resolve recipients.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::cli::NotifyConfig;
use crate::config::{self, NotificationCriteria, Timeframe, AUTHORS_SENTINEL};
use crate::email;
use crate::github::{self, IssueTracker};
use crate::model::{Issue, Notification};
use crate::util;

/// Drive the notification path: fetch, match, group, then send or print.
pub fn run(cfg: &NotifyConfig) -> Result<()> {
  let tracker = github::build_tracker(&cfg.token);

  // Phase 1: inputs
  let criteria = config::load_criteria(&cfg.config_path)?;
  let repo = tracker.get_repo(&cfg.org, &cfg.repo)?;
  let issues = tracker.list_open_issues(&repo)?;
  let now = util::effective_now(util::parse_now(cfg.now_override.as_deref())?);

  // Phase 2: match and group
  let notifications = match_notifications(&criteria, &issues, tracker.as_ref(), now);
  info!(matched = notifications.len(), "notification matching complete");
  let emails = email::group_into_emails(tracker.as_ref(), &repo, notifications)?;

  // Phase 3: dispatch
  if cfg.send {
    email::send_all(&emails)?;
  } else {
    email::print_summary(&emails);
  }

  Ok(())
}

/// Produce one Notification per (issue, matched label) pair.
///
/// Thresholds are evaluated highest-days-first and evaluation stops at the
/// first satisfied one, so an issue crossing 60 days is not also nagged at
/// the 30-day level.
pub fn match_notifications(
  criteria: &NotificationCriteria,
  issues: &[Issue],
  tracker: &dyn IssueTracker,
  now: DateTime<Utc>,
) -> Vec<Notification> {
  let mut notifications: Vec<Notification> = Vec::new();

  for issue in issues {
    for (label, timeframes) in criteria {
      if !issue.has_label(label) {
        continue;
      }

      let mut ordered: Vec<&Timeframe> = timeframes.iter().collect();
      ordered.sort_by_key(|tf| std::cmp::Reverse(tf.days));

      for tf in ordered {
        if !time_to_notify(tf, issue.updated_at, now) {
          continue;
        }

        let recipients = resolve_recipients(tf, issue, tracker);

        if recipients.is_empty() {
          warn!(issue = issue.number, label = %label, "no reachable recipients; dropping notification");
        } else {
          notifications.push(Notification {
            issue: issue.clone(),
            recipients,
          });
        }
        break;
      }
    }
  }

  notifications
}

/// A timeframe fires on the exact day the threshold is crossed, unless
/// catch-up widens it to "at least that stale".
fn time_to_notify(tf: &Timeframe, last_updated: DateTime<Utc>, now: DateTime<Utc>) -> bool {
  let elapsed = util::elapsed_days(now, last_updated);

  if tf.catch_up {
    elapsed >= tf.days
  } else {
    elapsed == tf.days
  }
}

/// Expand the AUTHORS sentinel into the assignees' public email addresses.
/// The sentinel never survives into the returned list.
fn resolve_recipients(tf: &Timeframe, issue: &Issue, tracker: &dyn IssueTracker) -> Vec<String> {
  let mut recipients = tf.recipients.clone();

  if let Some(pos) = recipients.iter().position(|r| r == AUTHORS_SENTINEL) {
    recipients.remove(pos);

    for assignee in &issue.assignees {
      match tracker.get_user(&assignee.login).and_then(|u| u.email) {
        Some(addr) => recipients.push(addr),
        None => warn!(
          login = %assignee.login,
          issue = issue.number,
          "assignee has no public email and cannot be contacted"
        ),
      }
    }
  }

  recipients
}
