mod cli;
mod cmd;
mod completions;
mod config;
mod logging;
mod model;
mod output;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use cmd::{cmd_date, cmd_datetime, cmd_duration, cmd_time, resolve_now, Session};
use completions::cmd_completions;
use config::{cmd_schema, Config};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        process::exit(2);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // These need neither config nor the clock.
    match cli.command {
        Command::Completions { shell } => return cmd_completions(shell),
        Command::Schema => return cmd_schema(),
        _ => {}
    }

    let config = match cli.config {
        Some(ref path) => Config::from_path(path)?,
        None => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            Config::load(&cwd)?
        }
    };

    let offset = config.offset(cli.utc_offset.as_deref())?;
    let now = resolve_now(cli.now.as_deref(), offset)?;
    tracing::debug!(%now, "resolved current instant");
    let session = Session::new(config, cli.format, now);

    match cli.command {
        Command::Duration { action } => cmd_duration(&session, action),
        Command::Time { action } => cmd_time(&session, action),
        Command::Date { action } => cmd_date(&session, action),
        Command::Datetime { action } => cmd_datetime(&session, action),
        Command::Completions { .. } | Command::Schema => Ok(()),
    }
}
