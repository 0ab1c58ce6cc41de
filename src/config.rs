// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load the YAML notification config and validate it into typed per-label criteria
// role: configuration/validation
// inputs: YAML file path; top-level keys severity, default_severity, criteria, catch-up
// outputs: NotificationCriteria (label -> timeframes with resolved recipients)
// invariants:
// - Validation runs once at startup; criteria are immutable afterwards
// - Every timeframe ends up with a concrete recipient list (possibly the AUTHORS sentinel)
// - Missing `criteria` and unknown severity names are descriptive fatal errors
// errors: Propagated with file/key context; a bad config aborts the run
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Recipient-list alias referenced by criteria entries.
pub const AUTHORS_SENTINEL: &str = "AUTHORS";

/// One staleness threshold with its resolved recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeframe {
  pub days: i64,
  pub recipients: Vec<String>,
  /// When set, the threshold matches at or beyond `days`, not only exactly
  /// at it.
  pub catch_up: bool,
}

/// Label -> ordered thresholds. BTreeMap keeps runs deterministic.
pub type NotificationCriteria = BTreeMap<String, Vec<Timeframe>>;

#[derive(Debug, Deserialize)]
struct RawConfig {
  #[serde(default)]
  severity: Option<BTreeMap<String, Vec<String>>>,
  #[serde(default)]
  default_severity: Option<String>,
  #[serde(default)]
  criteria: Option<BTreeMap<String, Vec<RawTimeframe>>>,
  #[serde(default, rename = "catch-up")]
  catch_up: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawTimeframe {
  days: i64,
  #[serde(default)]
  recipients: Option<Vec<String>>,
  #[serde(default)]
  severity: Option<String>,
  #[serde(default, rename = "catch-up")]
  catch_up: Option<bool>,
}

/// Read and validate the notification config at `path`.
pub fn load_criteria(path: &Path) -> Result<NotificationCriteria> {
  let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
  let raw: RawConfig = serde_yaml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;

  validate(raw)
}

/// Turn the raw file shape into typed criteria, or explain what is wrong.
///
/// Recipient resolution per timeframe: explicit `recipients` win; otherwise a
/// `severity` name selects that severity's list; otherwise the default
/// severity applies. The default severity is only inferred when the config
/// defines exactly one severity entry.
fn validate(raw: RawConfig) -> Result<NotificationCriteria> {
  let Some(raw_criteria) = raw.criteria else {
    bail!("this system cannot function without notification \"criteria\" being specified");
  };

  let severity = raw.severity.unwrap_or_else(|| {
    let mut m = BTreeMap::new();
    m.insert("default".to_string(), vec![AUTHORS_SENTINEL.to_string()]);
    m
  });

  let default_severity = match raw.default_severity {
    Some(name) => Some(name),
    None if severity.len() == 1 => severity.keys().next().cloned(),
    None => None,
  };

  let global_catch_up = raw.catch_up.unwrap_or(false);
  let mut criteria: NotificationCriteria = BTreeMap::new();

  for (label, raw_frames) in raw_criteria {
    let mut frames: Vec<Timeframe> = Vec::with_capacity(raw_frames.len());

    for rf in raw_frames {
      let recipients = match (rf.recipients, rf.severity) {
        (Some(list), _) => list,
        (None, Some(name)) => severity
          .get(&name)
          .cloned()
          .with_context(|| format!("criteria \"{}\": unknown severity \"{}\"", label, name))?,
        (None, None) => {
          let name = default_severity
            .as_ref()
            .with_context(|| format!("criteria \"{}\": no recipients, no severity, and no default_severity", label))?;
          severity
            .get(name)
            .cloned()
            .with_context(|| format!("default_severity \"{}\" is not defined under severity", name))?
        }
      };

      frames.push(Timeframe {
        days: rf.days,
        recipients,
        catch_up: global_catch_up || rf.catch_up.unwrap_or(false),
      });
    }

    criteria.insert(label, frames);
  }

  Ok(criteria)
}
