//! # Console Formatter
//!
//! Prints statement results as a program runs: the value of every bare
//! expression, assertion and `printExpression`, a line per plot, and
//! failures tagged with their source line. Assignments are echoed only in
//! verbose mode.

use mppg_eval::{Statement, StatementFormatter, StatementOutput};
use std::io::{self, Write};

pub struct ConsoleFormatter<W: Write> {
    out: W,
    verbose: bool,
    line: usize,
    errors: usize,
    io_error: Option<io::Error>,
}

impl<W: Write> ConsoleFormatter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            out,
            verbose,
            line: 0,
            errors: 0,
            io_error: None,
        }
    }

    /// Number of failed statements so far.
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// The writer, or the first write failure.
    pub fn finish(self) -> io::Result<W> {
        match self.io_error {
            Some(error) => Err(error),
            None => Ok(self.out),
        }
    }

    fn write_line(&mut self, text: &str) {
        if self.io_error.is_none() {
            if let Err(error) = writeln!(self.out, "{}", text) {
                self.io_error = Some(error);
            }
        }
    }
}

impl<W: Write> StatementFormatter for ConsoleFormatter<W> {
    fn preamble(&mut self, statement: &Statement) {
        self.line = statement.line();
    }

    fn success(&mut self, output: &StatementOutput) {
        let visible = match output {
            StatementOutput::Plot { .. } => true,
            StatementOutput::Assignment { .. } => self.verbose,
            other => other.is_explicit_print(),
        };
        if visible {
            self.write_line(output.text());
        }
    }

    fn error(&mut self, output: &StatementOutput) {
        self.errors += 1;
        let text = format!(
            "line {}: {} -> {}",
            self.line,
            output.statement_text(),
            output.text()
        );
        self.write_line(&text);
    }

    fn end_of_program(&mut self) {
        if self.io_error.is_none() {
            if let Err(error) = self.out.flush() {
                self.io_error = Some(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mppg_eval::{ErrorPolicy, EvaluationStrategy, Program};

    fn run(source: &str, verbose: bool) -> (String, usize) {
        let mut formatter = ConsoleFormatter::new(Vec::new(), verbose);
        Program::from_text(source)
            .run(&mut formatter, EvaluationStrategy::Eager, ErrorPolicy::Continue)
            .unwrap();
        let errors = formatter.errors();
        let out = formatter.finish().unwrap();
        (String::from_utf8(out).unwrap(), errors)
    }

    #[test]
    fn test_prints_only_explicit_output() {
        let (out, errors) = run("// c\nx := 3/2\nx + 1/2\nprintExpression(x)", false);
        assert_eq!(out, "2\nx := 3/2\n");
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_verbose_echoes_assignments() {
        let (out, _) = run("f := zero", true);
        assert_eq!(out, "f : Function\n");
    }

    #[test]
    fn test_errors_carry_line() {
        let (out, errors) = run("x := 1\n\ny + x", false);
        assert_eq!(out, "line 3: y + x -> VariableNotFound: variable not found: y\n");
        assert_eq!(errors, 1);
    }
}
