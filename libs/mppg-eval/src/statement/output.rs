//! Results of executed statements.

use crate::error::EvalError;
use crate::expression::Expression;
use crate::plot::PlotRequest;
use crate::value::{Value, ValueTag};
use std::rc::Rc;
use std::time::Duration;

/// What one statement produced.
///
/// Every variant carries the statement's source text; `text()` is the
/// rendered result a front end prints.
#[derive(Debug, Clone)]
pub enum StatementOutput {
    /// Comment or empty line.
    Plain { statement: String },
    Assignment {
        statement: String,
        text: String,
        name: String,
        tag: ValueTag,
    },
    Expression {
        statement: String,
        text: String,
        value: Value,
    },
    Assertion {
        statement: String,
        text: String,
        result: bool,
        elapsed: Duration,
    },
    PrintExpression {
        statement: String,
        text: String,
        expression: Rc<Expression>,
    },
    /// Plot failures are reported here and do not count as statement errors.
    Plot {
        statement: String,
        text: String,
        request: PlotRequest,
        error: Option<EvalError>,
    },
    Error {
        statement: String,
        text: String,
        error: EvalError,
    },
}

impl StatementOutput {
    pub(crate) fn error(statement: impl Into<String>, error: EvalError) -> Self {
        Self::Error {
            statement: statement.into(),
            text: format!("{}: {}", error.kind(), error),
            error,
        }
    }

    pub fn statement_text(&self) -> &str {
        match self {
            Self::Plain { statement }
            | Self::Assignment { statement, .. }
            | Self::Expression { statement, .. }
            | Self::Assertion { statement, .. }
            | Self::PrintExpression { statement, .. }
            | Self::Plot { statement, .. }
            | Self::Error { statement, .. } => statement,
        }
    }

    /// Rendered result; empty for comments and blank lines.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain { .. } => "",
            Self::Assignment { text, .. }
            | Self::Expression { text, .. }
            | Self::Assertion { text, .. }
            | Self::PrintExpression { text, .. }
            | Self::Plot { text, .. }
            | Self::Error { text, .. } => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Output the user asked to see: expression values, assertions and
    /// printed expressions.
    pub fn is_explicit_print(&self) -> bool {
        matches!(
            self,
            Self::Expression { .. } | Self::Assertion { .. } | Self::PrintExpression { .. }
        )
    }
}
