//! # Operator Parsing
//!
//! Parses binary and unary operators using precedence climbing.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | `/\` `\/` (meet, join) | Left |
//! | 2 | `+` `-` | Left |
//! | 3 | `*` `*_` `*^` `/` `/_` `/^` | Left |
//! | 4 | `-` (unary) | Right |
//!
//! Each binary node is labelled by the grammar's guess at its family:
//! [`NodeKind::NumberBinary`] when both operands are number syntax,
//! [`NodeKind::FunctionBinary`] otherwise. The resolver corrects the guess
//! once operand types are known.

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Operator precedence levels.
///
/// Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// Meet and join: `/\ \/`
    Lattice = 1,
    /// Addition/subtraction: `+ -`
    Term = 2,
    /// Convolution, deconvolution, product, quotient
    Factor = 3,
    /// Unary minus
    Unary = 4,
}

impl Precedence {
    /// Get precedence for binary operator.
    pub(super) fn of_binary(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Meet | TokenKind::Join => Some(Self::Lattice),
            TokenKind::Plus | TokenKind::Minus => Some(Self::Term),
            TokenKind::Star
            | TokenKind::StarUnderscore
            | TokenKind::StarCaret
            | TokenKind::Slash
            | TokenKind::SlashUnderscore
            | TokenKind::SlashCaret => Some(Self::Factor),
            _ => None,
        }
    }

    /// Get next higher precedence level.
    pub(super) fn next(&self) -> Self {
        match self {
            Self::Lattice => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor | Self::Unary => Self::Unary,
        }
    }
}

// =============================================================================
// OPERATOR PARSING
// =============================================================================

impl<'a> Parser<'a> {
    /// Parse expression with minimum precedence.
    pub(super) fn parse_precedence(&mut self, min_prec: Precedence) -> Result<CstNode, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(prec) = Precedence::of_binary(self.peek_kind()) {
            if prec < min_prec {
                break;
            }
            left = self.parse_binary_op(left, prec)?;
        }

        Ok(left)
    }

    /// Parse a left-associative binary operator.
    fn parse_binary_op(&mut self, left: CstNode, prec: Precedence) -> Result<CstNode, ParseError> {
        let start = left.span.start;
        let op = self.advance().clone();
        let right = self.parse_precedence(prec.next())?;

        let kind = if left.is_number_syntax() && right.is_number_syntax() {
            NodeKind::NumberBinary
        } else {
            NodeKind::FunctionBinary
        };

        Ok(CstNode::with_children(
            kind,
            self.span_from(start),
            vec![left, CstNode::with_text(NodeKind::Operator, op.span, op.text), right],
        ))
    }

    /// Parse unary expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// unary = "-" unary | primary
    /// ```
    ///
    /// A sign directly followed by `inf` is a literal, not a negation.
    pub(super) fn parse_unary(&mut self) -> Result<CstNode, ParseError> {
        let signs_infinity = self.peek_at(1).kind == TokenKind::Infinity;
        if self.check(TokenKind::Minus) && !signs_infinity {
            let start = self.current_position();
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(CstNode::with_children(
                NodeKind::Negation,
                self.span_from(start),
                vec![operand],
            ));
        }

        self.parse_primary()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::cst::{CstNode, NodeKind};

    fn parse_expr(source: &str) -> CstNode {
        let cst = crate::parse(source);
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        cst.root.children[0].children[0].clone()
    }

    #[test]
    fn test_number_binary() {
        let expr = parse_expr("3/2 + 1/2");
        assert_eq!(expr.kind, NodeKind::NumberBinary);
        assert_eq!(expr.children[1].text_or_empty(), "+");
    }

    #[test]
    fn test_names_make_function_binary() {
        let expr = parse_expr("x * x");
        assert_eq!(expr.kind, NodeKind::FunctionBinary);
        assert_eq!(expr.children[1].text_or_empty(), "*");
    }

    #[test]
    fn test_precedence() {
        // f /\ g + h * k is f /\ (g + (h * k))
        let expr = parse_expr("f /\\ g + h * k");
        assert_eq!(expr.children[1].text_or_empty(), "/\\");
        let sum = &expr.children[2];
        assert_eq!(sum.children[1].text_or_empty(), "+");
        assert_eq!(sum.children[2].children[1].text_or_empty(), "*");
    }

    #[test]
    fn test_left_associative() {
        // f - g - h is (f - g) - h
        let expr = parse_expr("f - g - h");
        assert_eq!(expr.children[0].kind, NodeKind::FunctionBinary);
        assert_eq!(expr.children[2].text_or_empty(), "h");
    }

    #[test]
    fn test_negation() {
        let expr = parse_expr("-2 * 3");
        assert_eq!(expr.kind, NodeKind::NumberBinary);
        assert_eq!(expr.children[0].kind, NodeKind::Negation);
    }

    #[test]
    fn test_signed_infinity_is_literal() {
        let expr = parse_expr("-inf");
        assert_eq!(expr.kind, NodeKind::NumberLiteral);
        assert_eq!(expr.text_or_empty(), "-inf");
    }

    #[test]
    fn test_strict_operators() {
        for op in ["*_", "*^", "/_", "/^"] {
            let expr = parse_expr(&format!("f {op} g"));
            assert_eq!(expr.children[1].text_or_empty(), op);
        }
    }
}
