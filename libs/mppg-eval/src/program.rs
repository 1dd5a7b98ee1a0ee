//! # Programs
//!
//! A parsed MPPG program: its statements, a cursor to the next one, the
//! variable environment they share and the syntax diagnostics of the parse.
//! Lines that failed to parse still become statements; executing one raises
//! its syntax error, so every other line can run.
//!
//! ## Example
//!
//! ```rust
//! use mppg_eval::expression::EvaluationStrategy;
//! use mppg_eval::formatter::TranscriptFormatter;
//! use mppg_eval::program::{ErrorPolicy, Program};
//!
//! let mut program = Program::from_text("f := ratency(1, 2)\nassert(f *_ f = ratency(1, 4))");
//! let mut formatter = TranscriptFormatter::default();
//! program
//!     .run(&mut formatter, EvaluationStrategy::Lazy, ErrorPolicy::Continue)
//!     .unwrap();
//! assert_eq!(formatter.lines, ["true"]);
//! ```

use crate::environment::{Environment, StorePermissions};
use crate::error::EvalResult;
use crate::expression::EvaluationStrategy;
use crate::formatter::StatementFormatter;
use crate::plot::{NullPlotter, Plotter};
use crate::statement::{ExecutionContext, Statement, StatementOutput};
use mppg_parser::Diagnostic;
use tracing::{debug, info};

/// What `run` does after a failing statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Report it and execute the next statement.
    #[default]
    Continue,
    /// Stop and return the error.
    StopOnError,
}

impl ErrorPolicy {
    pub fn from_stop_on_error(stop_on_error: bool) -> Self {
        if stop_on_error {
            Self::StopOnError
        } else {
            Self::Continue
        }
    }
}

/// An executable MPPG program.
pub struct Program {
    text: String,
    statements: Vec<Statement>,
    diagnostics: Vec<Diagnostic>,
    cursor: usize,
    finished: bool,
    environment: Environment,
    permissions: StorePermissions,
    plotter: Box<dyn Plotter>,
}

impl Program {
    /// Parse `text`; syntax errors are kept as diagnostics.
    pub fn from_text(text: &str) -> Self {
        let cst = mppg_parser::parse(text);
        let diagnostics = Diagnostic::collect(&cst.errors, text);
        let statements: Vec<Statement> = cst
            .root
            .children
            .iter()
            .map(|node| {
                let line = node.span.start.line + 1;
                let message = diagnostics
                    .iter()
                    .find(|diagnostic| diagnostic.line == line)
                    .map(|diagnostic| diagnostic.message.as_str());
                Statement::from_syntax(node, message)
            })
            .collect();
        info!(
            statements = statements.len(),
            syntax_errors = diagnostics.len(),
            "parsed program"
        );

        Self {
            text: text.to_string(),
            statements,
            diagnostics,
            cursor: 0,
            finished: false,
            environment: Environment::new(),
            permissions: StorePermissions::default(),
            plotter: Box::new(NullPlotter),
        }
    }

    pub fn with_permissions(mut self, permissions: StorePermissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_plotter(mut self, plotter: Box<dyn Plotter>) -> Self {
        self.plotter = plotter;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_syntax_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Index of the next statement to execute.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.statements.len()
    }

    /// Execute the statement under the cursor and advance.
    ///
    /// Returns `None` once every statement has run; the first such call
    /// signals the end of the program to the formatter.
    pub fn execute_next_statement(
        &mut self,
        formatter: &mut dyn StatementFormatter,
        strategy: EvaluationStrategy,
    ) -> Option<StatementOutput> {
        let Some(statement) = self.statements.get(self.cursor) else {
            self.finish(formatter);
            return None;
        };
        self.cursor += 1;

        debug!(line = statement.line(), kind = ?statement.kind(), "executing statement");
        formatter.preamble(statement);
        let mut context = ExecutionContext {
            environment: &mut self.environment,
            strategy,
            permissions: self.permissions,
            plotter: self.plotter.as_mut(),
        };
        let output = match statement.execute_to_output(&mut context) {
            Ok(output) => {
                formatter.success(&output);
                output
            }
            Err(error) => {
                debug!(line = statement.line(), %error, "statement failed");
                let output = StatementOutput::error(statement.text(), error);
                formatter.error(&output);
                output
            }
        };
        Some(output)
    }

    /// Execute every remaining statement.
    ///
    /// With [`ErrorPolicy::StopOnError`] the first failure ends the run and is
    /// returned; otherwise failures only appear in the outputs.
    pub fn run(
        &mut self,
        formatter: &mut dyn StatementFormatter,
        strategy: EvaluationStrategy,
        policy: ErrorPolicy,
    ) -> EvalResult<Vec<StatementOutput>> {
        let mut outputs = Vec::with_capacity(self.statements.len().saturating_sub(self.cursor));
        while let Some(output) = self.execute_next_statement(formatter, strategy) {
            if let (ErrorPolicy::StopOnError, StatementOutput::Error { error, .. }) =
                (policy, &output)
            {
                let error = error.clone();
                self.finish(formatter);
                return Err(error);
            }
            outputs.push(output);
        }
        Ok(outputs)
    }

    /// Rewind to the first statement with an empty environment.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.finished = false;
        self.environment.clear();
    }

    fn finish(&mut self, formatter: &mut dyn StatementFormatter) {
        if !self.finished {
            self.finished = true;
            formatter.end_of_program();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
