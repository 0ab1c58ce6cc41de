// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Group notifications into per-recipient-set emails, render their HTML bodies, and dispatch or summarize them
// role: delivery/email
// inputs: Notifications from the matcher; tracker for body decoration; local SMTP relay
// outputs: Emails {to, body, issues}; SMTP submissions or a stdout summary
// side_effects: Blocking SMTP submission to localhost when sending
// invariants:
// - Grouping key is the sorted recipient list; order of incoming recipients never splits a group
// - One email per group; bodies reuse the decoration + table pipeline, priority-sorted
// - Sender address is fixed; HTML content type; Cc honored when present
// errors: Address parse, message build, and SMTP failures abort the run with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{Message, SmtpTransport, Transport};
use std::collections::BTreeMap;
use tracing::info;

use crate::decorate;
use crate::github::IssueTracker;
use crate::html;
use crate::model::{Email, Issue, Notification, Repo};

pub const SENDER: &str = "issue-status-report@localhost";
pub const REMINDER_SUBJECT: &str = "Please update the following github issues";
const REMINDER_HEADING: &str = "Please update or close the following issues so the team knows what is going on.";
const SMTP_RELAY: &str = "localhost";

/// Merge notifications that share a recipient set into one email each.
pub fn group_into_emails(
  tracker: &dyn IssueTracker,
  repo: &Repo,
  notifications: Vec<Notification>,
) -> Result<Vec<Email>> {
  let mut groups: BTreeMap<Vec<String>, Vec<Issue>> = BTreeMap::new();

  for n in notifications {
    let mut key = n.recipients;
    key.sort();
    groups.entry(key).or_default().push(n.issue);
  }

  let mut emails: Vec<Email> = Vec::with_capacity(groups.len());

  for (to, issues) in groups {
    let body = reminder_body(tracker, repo, &issues)?;
    emails.push(Email { to, body, issues });
  }

  Ok(emails)
}

/// Render one reminder body: heading plus the priority-sorted issue table.
pub fn reminder_body(tracker: &dyn IssueTracker, repo: &Repo, issues: &[Issue]) -> Result<String> {
  let mut rows = decorate::decorate_issues(tracker, repo, issues)?;
  decorate::sort_by_priority(&mut rows);

  let mut body = html::h3(REMINDER_HEADING);
  body.push('\n');
  body.push_str(&html::issue_table(&rows));

  Ok(html::document(REMINDER_HEADING, &body))
}

/// Submit every grouped email through the local relay.
pub fn send_all(emails: &[Email]) -> Result<()> {
  for email in emails {
    send_email(REMINDER_SUBJECT, &email.body, &email.to, &[])?;
  }

  Ok(())
}

/// Compile and submit a single HTML email. Plaintext relay on localhost; no
/// TLS or authentication.
pub fn send_email(subject: &str, body: &str, to: &[String], cc: &[String]) -> Result<()> {
  let mut builder = Message::builder()
    .from(SENDER.parse::<Mailbox>().context("parsing sender address")?)
    .subject(subject)
    .header(ContentType::TEXT_HTML);

  for addr in to {
    let mailbox: Mailbox = addr.parse().with_context(|| format!("invalid recipient address {}", addr))?;
    builder = builder.to(mailbox);
  }

  for addr in cc {
    let mailbox: Mailbox = addr.parse().with_context(|| format!("invalid cc address {}", addr))?;
    builder = builder.cc(mailbox);
  }

  let message = builder.body(body.to_string()).context("building email message")?;

  let mailer = SmtpTransport::builder_dangerous(SMTP_RELAY).build();
  mailer.send(&message).context("submitting email to local relay")?;
  info!(recipients = to.len(), subject = %subject, "email dispatched");

  Ok(())
}

/// Debug-mode output when `--send` is absent.
pub fn print_summary(emails: &[Email]) {
  println!("Email Summary");
  println!("(Add --send flag to send out emails)");

  for email in emails {
    println!(
      "recipients {} are getting {} issue reminder(s):",
      email.to.join(", "),
      email.issues.len()
    );
    for issue in &email.issues {
      println!("    {}", issue.title);
    }
  }
}
