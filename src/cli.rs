use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "issue-status-report",
    version,
    about = "GitHub issue status reports and stale-issue email reminders",
    long_about = None
)]
pub struct Cli {
  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  #[command(subcommand)]
  pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Print an HTML status table for a repository's open issues
  Report {
    /// Github authentication token
    github_token: String,

    /// Target Github repository
    github_repo: String,

    /// Target Github organization
    github_org: String,

    /// Only include issues whose labels contain this text
    label: Option<String>,
  },

  /// Send email reminders for Github issues that need updates
  Notify {
    /// Github authentication token
    github_token: String,

    /// Target Github repository
    github_repo: String,

    /// Target Github organization
    github_org: String,

    /// Full path to the notification config file
    #[arg(default_value = "config.yaml")]
    config_file_path: PathBuf,

    /// Dispatch the emails instead of printing a summary
    #[arg(short, long)]
    send: bool,

    /// Override the "now" instant for threshold evaluation (hidden; tests only)
    #[arg(long = "now-override", hide = true)]
    now_override: Option<String>,
  },
}

#[derive(Debug)]
pub struct ReportConfig {
  pub token: String,
  pub repo: String,
  pub org: String,
  pub label: Option<String>,
}

#[derive(Debug)]
pub struct NotifyConfig {
  pub token: String,
  pub repo: String,
  pub org: String,
  pub config_path: PathBuf,
  pub send: bool,
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub enum RunMode {
  Report(ReportConfig),
  Notify(NotifyConfig),
}

pub fn normalize(cli: Cli) -> Result<RunMode> {
  let Some(command) = cli.command else {
    bail!("Provide a subcommand: report or notify")
  };

  Ok(match command {
    Command::Report {
      github_token,
      github_repo,
      github_org,
      label,
    } => RunMode::Report(ReportConfig {
      token: github_token,
      repo: github_repo,
      org: github_org,
      label,
    }),
    Command::Notify {
      github_token,
      github_repo,
      github_org,
      config_file_path,
      send,
      now_override,
    } => RunMode::Notify(NotifyConfig {
      token: github_token,
      repo: github_repo,
      org: github_org,
      config_path: config_file_path,
      send,
      now_override,
    }),
  })
}
