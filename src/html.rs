//! Minimal HTML assembly for the status table and email bodies.
//!
//! Decorated cell fields arrive as already-rendered fragments and are
//! embedded raw; everything else goes through `escape`.

use crate::model::DecoratedIssue;

/// Escape text for safe embedding in HTML body or attribute positions.
pub fn escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());

  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }

  out
}

/// Wrap `body` in a full document with a `<title>`.
pub fn document(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
    escape(title),
    body
  )
}

pub fn h1(text: &str) -> String {
  format!("<h1>{}</h1>", escape(text))
}

pub fn h3(text: &str) -> String {
  format!("<h3>{}</h3>", escape(text))
}

/// Render the issue table. Presentation attributes match the original
/// reports so downstream mail clients keep rendering them the same way.
pub fn issue_table(rows: &[DecoratedIssue]) -> String {
  let mut out = String::new();

  out.push_str("<table border=\"1\" width=\"1024\" cellpadding=\"10\">\n<tbody>\n");
  out.push_str("<tr><th>NUMBER</th><th>TITLE</th><th>ASSIGNEE</th><th>PRIORITY</th><th>STATUS</th></tr>\n");

  for row in rows {
    out.push_str(&table_row(row));
  }

  out.push_str("</tbody>\n</table>");

  out
}

fn table_row(row: &DecoratedIssue) -> String {
  format!(
    "<tr><td><a href=\"{}\">{}</a></td><td width=\"200\">{}</td><td width=\"200\">{}</td><td width=\"100\">{}</td><td>{}</td></tr>\n",
    escape(&row.html_url),
    row.number,
    escape(&row.title),
    row.assignee_html,
    row.priority_html,
    row.status_html,
  )
}
