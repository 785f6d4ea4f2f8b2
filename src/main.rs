mod cli;
mod config;
mod convert;
mod logging;
mod stats_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Stats(args) => stats_cmd::run(args),
        Command::SummaryTypes => {
            stats_cmd::list_summary_types();
            Ok(())
        }
    }
}
