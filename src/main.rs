use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod decorate;
mod email;
mod github;
mod html;
mod markdown;
mod model;
mod notify;
mod report;
mod util;

use crate::cli::{normalize, Cli, RunMode};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing();

  // Phase 1: normalize CLI
  let mode = normalize(cli)?;

  // Phase 2: run the selected path
  match mode {
    RunMode::Report(cfg) => {
      let page = report::run(&cfg)?;
      print!("{}", page);
      Ok(())
    }
    RunMode::Notify(cfg) => notify::run(&cfg),
  }
}

// Logs go to stderr; stdout is reserved for the report and email summary.
fn init_tracing() {
  use tracing_subscriber::EnvFilter;

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}
