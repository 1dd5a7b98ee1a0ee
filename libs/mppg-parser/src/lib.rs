//! # MPPG Parser (Pure Rust)
//!
//! A line-oriented parser for MPPG, a small scripting language for
//! min-plus/max-plus network-calculus curves.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → CST
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::parse;
//!
//! let cst = parse("beta := ratency(10, 3)\nassert(beta = beta)");
//! assert!(cst.errors.is_empty());
//! assert_eq!(cst.root.children.len(), 2);
//! ```
//!
//! ## Pipeline Integration
//!
//! ```text
//! mppg-parser → mppg-eval (interpreter) → mppg-cli
//!            ↘ mppg-codegen (Rust source)
//! ```

pub mod builtins;
pub mod cst;
pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

pub use builtins::{Builtin, ParameterKind};
pub use cst::{Cst, CstNode, NodeKind};
pub use diagnostic::Diagnostic;
pub use error::{ParseError, ParseErrorKind};
pub use span::{Position, Span};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse MPPG source code into a Concrete Syntax Tree.
///
/// ## Parameters
///
/// - `source`: MPPG source text
///
/// ## Returns
///
/// `Cst` whose root has one statement child per source line, plus the parse
/// errors collected along the way. Check `cst.is_ok()` for success.
///
/// ## Example
///
/// ```rust
/// use mppg_parser::{parse, NodeKind};
///
/// let cst = parse("f := ratency(1,\ng := zero");
/// assert!(!cst.is_ok());
/// assert_eq!(cst.root.children[0].kind, NodeKind::Error);
/// assert_eq!(cst.root.children[1].kind, NodeKind::Assignment);
/// ```
pub fn parse(source: &str) -> Cst {
    let tokens = lexer::Lexer::new(source).tokenize();
    let mut parser = parser::Parser::new(source, tokens);
    parser.parse()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        let cst = parse("f := ratency(1, 2)");
        assert!(cst.is_ok(), "Expected no errors, got: {:?}", cst.errors);
        assert_eq!(cst.root.kind, NodeKind::Program);
        assert_eq!(cst.root.children[0].kind, NodeKind::Assignment);
    }

    #[test]
    fn test_parse_every_statement_kind() {
        let source = "\
// arrival and service
alpha := bucket(1, 2)
beta := ratency(3, 1) // server
alpha * beta

assert(alpha <= beta)
printExpression(alpha)
plot(alpha, beta, main=\"curves\")";
        let cst = parse(source);
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        let kinds: Vec<_> = cst.root.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Comment,
                NodeKind::Assignment,
                NodeKind::Assignment,
                NodeKind::ExpressionCommand,
                NodeKind::Empty,
                NodeKind::Assertion,
                NodeKind::PrintExpression,
                NodeKind::Plot,
            ]
        );
    }

    #[test]
    fn test_error_recovery() {
        let cst = parse("f := (\ng := zero\nh := ]");
        assert_eq!(cst.errors.len(), 2);
        assert_eq!(cst.root.children.len(), 3);
        assert_eq!(cst.root.children[1].kind, NodeKind::Assignment);
    }

    #[test]
    fn test_crlf_line_endings() {
        let cst = parse("f := zero\r\ng := epsilon\r\n");
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        assert_eq!(cst.root.children.len(), 2);
    }
}
