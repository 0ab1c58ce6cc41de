use pulldown_cmark::{html, Parser};

/// Render a markdown string to an HTML fragment.
///
/// Comment bodies and placeholder markup both pass through here; the
/// trailing newline pulldown emits is trimmed so fragments embed cleanly in
/// table cells.
pub fn to_html(text: &str) -> String {
  let parser = Parser::new(text);
  let mut out = String::new();

  html::push_html(&mut out, parser);

  out.trim_end().to_string()
}
