// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Time helpers (now override, whole-day staleness) and man page rendering
// role: utilities/helpers
// inputs: Optional now-override strings; DateTime pairs; clap CommandFactory
// outputs: Effective instants, elapsed day counts, troff man page text
// invariants:
// - effective_now is the only source of "now"; nothing else calls Utc::now
// - elapsed_days truncates toward zero (whole days, matching day-granular thresholds)
// errors: Unparseable now-override values bubble with the offending input
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::CommandFactory;

/// Returns the effective "now" given an optional override.
///
/// When `override_now` is `Some`, that instant is returned; otherwise the
/// current UTC time is used. Centralizes our handling of test determinism
/// without sprinkling `Utc::now()` throughout the code.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

/// Parse the hidden `--now-override` value: RFC3339, or a bare
/// `YYYY-MM-DDTHH:MM:SS` treated as UTC.
pub fn parse_now(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  let Some(s) = raw else {
    return Ok(None);
  };

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(Some(dt.with_timezone(&Utc)));
  }

  let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
    .with_context(|| format!("unparseable --now-override value {:?}", s))?;

  Ok(Some(naive.and_utc()))
}

/// Elapsed whole days between the last update and now. Negative when the
/// update is in the future (clock skew); such issues match nothing.
pub fn elapsed_days(now: DateTime<Utc>, last_updated: DateTime<Utc>) -> i64 {
  (now - last_updated).num_days()
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
