//! `mppg` - run, check and translate MPPG scripts.

use clap::Parser;
use mppg_cli::cli::{Cli, Command};
use mppg_cli::commands;
use mppg_cli::logging::init_logging;
use std::io;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout().lock();
    let clean = match &cli.command {
        Command::Run(args) => commands::run(args, cli.verbose, stdout)?.is_clean(),
        Command::Check(args) => commands::check(args, stdout)?,
        Command::Codegen(args) => commands::codegen(args, stdout)?,
    };
    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
