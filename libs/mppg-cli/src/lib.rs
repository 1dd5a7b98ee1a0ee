//! # MPPG CLI
//!
//! Front end of the `mppg` binary: argument definitions, the console
//! formatter, the SVG plotter and one function per subcommand.
//!
//! ```text
//! mppg run script.mppg --lazy
//! mppg check script.mppg --json
//! mppg codegen script.mppg -o main.rs
//! ```

pub mod cli;
pub mod commands;
pub mod console;
pub mod logging;
pub mod plotter;

// Re-export public API
pub use cli::{Cli, Command};
pub use console::ConsoleFormatter;
pub use plotter::SvgPlotter;
