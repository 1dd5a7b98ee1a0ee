//! # Diagnostics
//!
//! User-facing records built from [`ParseError`]s: 1-based line, 0-based
//! column, message, offending text, rule-context stack, expected tokens and
//! the source line as excerpt.
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::{parse, Diagnostic};
//!
//! let source = "f := zero\ng := ratency(1)";
//! let cst = parse(source);
//! let diagnostic = Diagnostic::from_parse_error(&cst.errors[0], source);
//! assert_eq!(diagnostic.line, 2);
//! assert_eq!(diagnostic.excerpt, "g := ratency(1)");
//! ```

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A syntax error ready to be shown to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Line number (1-based).
    pub line: usize,
    /// Column in characters (0-based).
    pub column: usize,
    /// Human-readable message.
    pub message: String,
    /// Source text covered by the error.
    pub offending_text: String,
    /// Grammar rules active at the error, outermost first.
    pub rule_stack: Vec<String>,
    /// Acceptable tokens at the error position.
    pub expected: Vec<String>,
    /// The full source line containing the error.
    pub excerpt: String,
}

impl Diagnostic {
    /// Build a diagnostic from a parse error and the source it came from.
    pub fn from_parse_error(error: &ParseError, source: &str) -> Self {
        let line_index = error.span.start.line;
        let excerpt = source
            .lines()
            .nth(line_index)
            .unwrap_or_default()
            .trim_end_matches('\r')
            .to_string();

        Self {
            line: line_index + 1,
            column: error.span.start.column,
            message: error.kind.to_string(),
            offending_text: error.span.text(source).to_string(),
            rule_stack: error.rule_stack.clone(),
            expected: error.expected.clone(),
            excerpt,
        }
    }

    /// Build diagnostics for every error of a parse.
    pub fn collect(errors: &[ParseError], source: &str) -> Vec<Self> {
        errors.iter().map(|e| Self::from_parse_error(e, source)).collect()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:{}: {}", self.line, self.column, self.message)?;
        if !self.excerpt.is_empty() {
            write!(f, "\n    {}\n    {}^", self.excerpt, " ".repeat(self.column))?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_fields() {
        let source = "x := 1\nassert(x <)";
        let cst = crate::parse(source);
        let diagnostic = Diagnostic::from_parse_error(&cst.errors[0], source);
        assert_eq!(diagnostic.line, 2);
        assert_eq!(diagnostic.column, 10);
        assert_eq!(diagnostic.offending_text, ")");
        assert_eq!(diagnostic.excerpt, "assert(x <)");
        assert!(diagnostic.rule_stack.contains(&"assertion".to_string()));
        assert_eq!(diagnostic.expected, vec!["expression"]);
    }

    #[test]
    fn test_diagnostic_display_points_at_column() {
        let source = "f := ratency(1)";
        let cst = crate::parse(source);
        let rendered = Diagnostic::from_parse_error(&cst.errors[0], source).to_string();
        assert!(rendered.starts_with("line 1:5:"), "Rendered: {}", rendered);
        assert!(rendered.ends_with("     ^"));
    }

    #[test]
    fn test_diagnostic_serializes() {
        let source = "f :=";
        let cst = crate::parse(source);
        let json = serde_json::to_value(Diagnostic::collect(&cst.errors, source)).unwrap();
        assert_eq!(json[0]["line"], 1);
        assert!(json[0]["rule_stack"].is_array());
    }
}
