//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use config::constants::{DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mppg", version)]
#[command(about = "Run, check and translate MPPG min-plus/max-plus curve scripts")]
pub struct Cli {
    /// Log resolution and execution details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a script and print its results
    Run(RunArgs),
    /// Report syntax errors without executing
    Check(CheckArgs),
    /// Translate a script into a Rust program using nc-curves
    Codegen(CodegenArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Script to execute
    pub file: PathBuf,

    /// Defer assignments until their value is needed
    #[arg(long)]
    pub lazy: bool,

    /// Stop at the first failing statement
    #[arg(long)]
    pub stop_on_error: bool,

    /// Reject same-type reassignment of a name
    #[arg(long)]
    pub no_overwrite: bool,

    /// Reject reassigning a name with the other type
    #[arg(long)]
    pub fixed_types: bool,

    /// Plot canvas width in pixels
    #[arg(long, default_value_t = DEFAULT_PLOT_WIDTH)]
    pub width: u32,

    /// Plot canvas height in pixels
    #[arg(long, default_value_t = DEFAULT_PLOT_HEIGHT)]
    pub height: u32,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Script to check
    pub file: PathBuf,

    /// Print diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CodegenArgs {
    /// Script to translate
    pub file: PathBuf,

    /// Write the generated source here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
