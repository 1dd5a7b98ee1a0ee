//! # Evaluation Errors
//!
//! Errors raised while resolving and executing MPPG statements, and the
//! coarse taxonomy the program reports them under.

use crate::value::ValueTag;
use nc_curves::CurveError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while resolving or executing a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The statement's line did not parse.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Lookup of a name that was never assigned.
    #[error("variable not found: {name}")]
    VariableNotFound { name: String },

    /// No operator or builtin accepts the operand types.
    #[error("invalid expression: {reason}")]
    InvalidExpression { reason: String },

    /// A number literal that is not an integer, fraction, decimal or signed infinity.
    #[error("invalid number literal: {text}")]
    InvalidLiteral { text: String },

    /// A segment whose endpoints, openness or slope disagree.
    #[error("invalid segment {segment}: {reason}")]
    InvalidSegment { segment: String, reason: String },

    /// A `uaf(...)` or `upp(...)` literal with a malformed structure.
    #[error("invalid curve literal: {reason}")]
    InvalidCurveLiteral { reason: String },

    /// The syntax tree does not have the shape its node kind promises.
    #[error("malformed syntax tree: {reason}")]
    Malformed { reason: String },

    /// Same-type reassignment without the overwrite permission.
    #[error("variable {name} already exists and overwriting is not allowed")]
    OverwriteNotAllowed { name: String },

    /// Reassignment with the other type without the change-type permission.
    #[error("variable {name} is a {from}; changing it to a {to} is not allowed")]
    TypeChangeNotAllowed {
        name: String,
        from: ValueTag,
        to: ValueTag,
    },

    /// A value of one type was used where the other was required.
    #[error("type mismatch: expected a {expected}, found a {found}")]
    TypeMismatch { expected: ValueTag, found: ValueTag },

    /// An unknown plot setting or a setting with the wrong value kind.
    #[error("invalid plot setting: {reason}")]
    InvalidPlotSetting { reason: String },

    /// The plot collaborator failed to render.
    #[error("plot failed: {reason}")]
    Plot { reason: String },

    /// A curve constructor or operator failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// Result type for resolution and execution.
pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub(crate) fn literal(reason: impl Into<String>) -> Self {
        Self::InvalidCurveLiteral {
            reason: reason.into(),
        }
    }

    /// Category of the error in the program-level taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::VariableNotFound { .. } => ErrorKind::VariableNotFound,
            Self::Plot { .. } => ErrorKind::Plot,
            Self::InvalidExpression { .. }
            | Self::InvalidLiteral { .. }
            | Self::InvalidSegment { .. }
            | Self::InvalidCurveLiteral { .. }
            | Self::Malformed { .. }
            | Self::OverwriteNotAllowed { .. }
            | Self::TypeChangeNotAllowed { .. }
            | Self::TypeMismatch { .. }
            | Self::InvalidPlotSetting { .. }
            | Self::Curve(_) => ErrorKind::Evaluation,
        }
    }
}

// =============================================================================
// ERROR KIND
// =============================================================================

/// Program-level error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Grammar-level error, collected as a diagnostic.
    Syntax,
    /// Undeclared name.
    VariableNotFound,
    /// Type mismatch, inconsistent literal, invalid operator combination.
    Evaluation,
    /// Rendering failure, reported but not fatal.
    Plot,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syntax => "SyntaxError",
            Self::VariableNotFound => "VariableNotFound",
            Self::Evaluation => "EvaluationError",
            Self::Plot => "PlotError",
        };
        f.write_str(name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
