//! # Parse Errors
//!
//! A [`ParseError`] carries what went wrong, where, the grammar rules being
//! parsed when it was raised (outermost first) and the tokens that would
//! have been accepted instead.
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::error::{ParseError, ParseErrorKind};
//! use mppg_parser::span::Span;
//!
//! let error = ParseError::new(ParseErrorKind::UnsignedInfinity, Span::zero())
//!     .with_rules(&["assignment", "expression"]);
//! assert_eq!(error.rule_stack, ["assignment", "expression"]);
//! assert!(error.to_string().starts_with("infinity must be written as +inf or -inf"));
//! ```

use crate::span::Span;
use thiserror::Error;

/// A parse error with location and grammar context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at line {}, column {}", .span.start.line + 1, .span.start.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    /// Grammar rules active when the error was raised, outermost first.
    pub rule_stack: Vec<String>,
    /// Descriptions of the tokens that would have been accepted.
    pub expected: Vec<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            rule_stack: Vec::new(),
            expected: Vec::new(),
        }
    }

    pub fn with_rules(mut self, rules: &[&str]) -> Self {
        self.rule_stack = rules.iter().map(|rule| rule.to_string()).collect();
        self
    }

    pub fn with_expected<I, S>(mut self, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected = expected.into_iter().map(Into::into).collect();
        self
    }
}

/// What a malformed line got wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken { found: String, expected: String },

    /// The line ended before the statement did.
    #[error("unexpected end of line, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("invalid character '{text}'")]
    InvalidCharacter { text: String },

    /// `inf` or `infinity` without a leading sign.
    #[error("infinity must be written as +inf or -inf")]
    UnsignedInfinity,

    #[error("'{name}' takes {expected} argument(s), found {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A builtin name used as an assignment target or value-at function.
    #[error("'{name}' is a reserved name")]
    ReservedName { name: String },

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid escape sequence '{sequence}'")]
    InvalidEscape { sequence: String },
}
