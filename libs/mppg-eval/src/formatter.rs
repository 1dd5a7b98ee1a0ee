//! # Statement Formatters
//!
//! Front ends observe execution through a [`StatementFormatter`]: a preamble
//! before each statement, its output on success or failure, and one call
//! when the program ends.

use crate::statement::{Statement, StatementOutput};

/// Observer of program execution.
pub trait StatementFormatter {
    /// Called before a statement executes.
    fn preamble(&mut self, _statement: &Statement) {}

    fn success(&mut self, output: &StatementOutput);

    fn error(&mut self, output: &StatementOutput);

    /// Called once, after the last statement.
    fn end_of_program(&mut self) {}
}

/// Formatter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFormatter;

impl StatementFormatter for SilentFormatter {
    fn success(&mut self, _output: &StatementOutput) {}

    fn error(&mut self, _output: &StatementOutput) {}
}

/// Collects the visible output as lines.
///
/// Comments, blank lines and assignments print nothing; errors are prefixed
/// with their source line.
#[derive(Debug, Default, Clone)]
pub struct TranscriptFormatter {
    pub lines: Vec<String>,
    pub finished: bool,
}

impl StatementFormatter for TranscriptFormatter {
    fn success(&mut self, output: &StatementOutput) {
        if output.is_explicit_print() || matches!(output, StatementOutput::Plot { .. }) {
            self.lines.push(output.text().to_string());
        }
    }

    fn error(&mut self, output: &StatementOutput) {
        self.lines
            .push(format!("{} -> {}", output.statement_text(), output.text()));
    }

    fn end_of_program(&mut self) {
        self.finished = true;
    }
}
