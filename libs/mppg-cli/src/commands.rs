//! # Commands
//!
//! One function per subcommand. Each writes its normal output to `out` and
//! reports whether the script was clean, leaving the exit code to `main`.

use crate::cli::{CheckArgs, CodegenArgs, RunArgs};
use crate::console::ConsoleFormatter;
use crate::plotter::SvgPlotter;
use anyhow::{Context, Result};
use config::constants::ExecutionConfig;
use mppg_codegen::CodegenError;
use mppg_eval::{ErrorPolicy, EvaluationStrategy, Program, StorePermissions};
use mppg_parser::Diagnostic;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn report_diagnostics(path: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}: {}", path.display(), diagnostic);
    }
}

// =============================================================================
// RUN
// =============================================================================

/// Outcome of `mppg run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub statements: usize,
    pub syntax_errors: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.syntax_errors == 0
    }
}

/// Execute a script. Syntax errors are reported first; the remaining lines
/// still run. `verbose` also echoes assignments.
///
/// ## Errors
///
/// Unreadable file, invalid canvas size, or the first failing statement
/// under `--stop-on-error`.
pub fn run(args: &RunArgs, verbose: bool, out: impl Write) -> Result<RunSummary> {
    let source = read_script(&args.file)?;
    let mut config = ExecutionConfig::new(args.lazy, args.stop_on_error, args.width, args.height)?;
    config.allow_overwrite = !args.no_overwrite;
    config.allow_type_change = !args.fixed_types;

    let mut program = Program::from_text(&source)
        .with_permissions(StorePermissions::from(&config))
        .with_plotter(Box::new(SvgPlotter::new(config.plot_width, config.plot_height)));
    report_diagnostics(&args.file, program.diagnostics());

    let mut formatter = ConsoleFormatter::new(out, verbose);
    let outputs = program
        .run(
            &mut formatter,
            EvaluationStrategy::from_lazy(config.lazy),
            ErrorPolicy::from_stop_on_error(config.stop_on_error),
        )
        .with_context(|| format!("{} stopped on error", args.file.display()))?;
    let failed = formatter.errors();
    formatter.finish().context("cannot write output")?;

    let summary = RunSummary {
        statements: outputs.len(),
        syntax_errors: program.diagnostics().len(),
        failed,
    };
    info!(?summary, "run finished");
    Ok(summary)
}

// =============================================================================
// CHECK
// =============================================================================

#[derive(Serialize)]
struct CheckReport<'a> {
    file: String,
    statements: usize,
    diagnostics: &'a [Diagnostic],
}

/// Report syntax diagnostics; returns whether there were none.
pub fn check(args: &CheckArgs, mut out: impl Write) -> Result<bool> {
    let source = read_script(&args.file)?;
    let program = Program::from_text(&source);
    let diagnostics = program.diagnostics();

    if args.json {
        let report = CheckReport {
            file: args.file.display().to_string(),
            statements: program.statements().len(),
            diagnostics,
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else if diagnostics.is_empty() {
        writeln!(out, "{}: ok", args.file.display())?;
    } else {
        for diagnostic in diagnostics {
            writeln!(out, "{}: {}", args.file.display(), diagnostic)?;
        }
    }
    Ok(diagnostics.is_empty())
}

// =============================================================================
// CODEGEN
// =============================================================================

/// Translate a script to Rust, writing to `--output` or `out`.
pub fn codegen(args: &CodegenArgs, mut out: impl Write) -> Result<bool> {
    let source = read_script(&args.file)?;
    let lines = match mppg_codegen::generate(&source) {
        Ok(lines) => lines,
        Err(CodegenError::Syntax { diagnostics }) => {
            report_diagnostics(&args.file, &diagnostics);
            warn!(errors = diagnostics.len(), "nothing generated");
            return Ok(false);
        }
        Err(error) => return Err(error).context(format!("cannot translate {}", args.file.display())),
    };

    let mut text = lines.join("\n");
    text.push('\n');
    match &args.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))?;
            info!(output = %path.display(), lines = lines.len(), "generated");
        }
        None => out.write_all(text.as_bytes())?,
    }
    Ok(true)
}
