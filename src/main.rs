mod analysis;
mod cleaner;
mod config;
mod data;
mod error;
mod manager;
mod model;
mod stats;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Summarize,

    Analyze,

    Purge,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.out_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Summarize => mgr.summarize()?,
        Command::Analyze => mgr.run_analysis()?,
        Command::Purge => mgr.purge()?,
    }

    Ok(())
}
