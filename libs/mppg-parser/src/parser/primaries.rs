//! # Primary Expression Parsing
//!
//! Parses primary expressions: number literals, signed infinities, names,
//! builtin calls, value-at forms, curve literals and parentheses.
//!
//! ## Grammar
//!
//! ```text
//! primary = NUMBER | sign INFINITY
//!         | BUILTIN [ "(" [ expression { "," expression } ] ")" ]
//!         | IDENT "(" expression [ "^" ("-" | "+") ] ")"
//!         | "uaf" "(" ... ")" | "upp" "(" ... ")"
//!         | IDENT | "(" expression ")"
//! ```

use super::Parser;
use crate::builtins::Builtin;
use crate::cst::{CstNode, NodeKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Token, TokenKind};

impl<'a> Parser<'a> {
    /// Parse primary expression.
    pub(super) fn parse_primary(&mut self) -> Result<CstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Number | TokenKind::Infinity => self.parse_signed(),
            TokenKind::Plus | TokenKind::Minus if self.peek_at(1).kind == TokenKind::Infinity => {
                self.parse_signed()
            }
            TokenKind::Identifier => {
                let name = self.advance().clone();
                match Builtin::from_name(&name.text) {
                    Some(builtin) => self.parse_builtin_call(name, builtin),
                    None if self.check(TokenKind::LParen) => self.parse_value_at(name),
                    None => Ok(CstNode::with_text(NodeKind::VariableName, name.span, name.text)),
                }
            }
            TokenKind::Uaf => self.parse_uaf(),
            TokenKind::Upp => self.parse_upp(),
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected(&["expression"])),
        }
    }

    /// Parse a builtin call. Parentheses are optional for nullary builtins.
    ///
    /// ## Example
    ///
    /// ```text
    /// stair(0, 60, 12)
    /// epsilon
    /// ```
    fn parse_builtin_call(&mut self, name: Token, builtin: Builtin) -> Result<CstNode, ParseError> {
        self.within("function_call", |p| {
            let start = name.span.start;
            let mut arguments = Vec::new();

            if p.match_token(TokenKind::LParen) {
                if !p.check(TokenKind::RParen) {
                    arguments.push(p.parse_expression()?);
                    while p.match_token(TokenKind::Comma) {
                        arguments.push(p.parse_expression()?);
                    }
                }
                p.expect(TokenKind::RParen)?;
            }

            let span = p.span_from(start);
            if arguments.len() != builtin.arity() {
                return Err(p.error(
                    ParseErrorKind::WrongArity {
                        name: name.text,
                        expected: builtin.arity(),
                        found: arguments.len(),
                    },
                    span,
                ));
            }

            let kind = if builtin.returns_number() {
                NodeKind::NumberCall
            } else {
                NodeKind::FunctionCall
            };
            let mut node = CstNode::with_children(kind, span, arguments);
            node.text = Some(name.text);
            Ok(node)
        })
    }

    /// Parse `f(t)`, `f(t^-)` or `f(t^+)`.
    fn parse_value_at(&mut self, name: Token) -> Result<CstNode, ParseError> {
        self.within("value_at", |p| {
            let start = name.span.start;
            p.expect(TokenKind::LParen)?;
            let time = p.parse_expression()?;

            let mut children = vec![
                CstNode::with_text(NodeKind::VariableName, name.span, name.text.clone()),
                time,
            ];
            if p.match_token(TokenKind::Caret) {
                if !matches!(p.peek_kind(), TokenKind::Minus | TokenKind::Plus) {
                    return Err(p.unexpected(&["-", "+"]));
                }
                let marker = p.advance().clone();
                children.push(CstNode::with_text(NodeKind::LimitMarker, marker.span, marker.text));
            }
            p.expect(TokenKind::RParen)?;

            let mut node = CstNode::with_children(NodeKind::ValueAt, p.span_from(start), children);
            node.text = Some(name.text);
            Ok(node)
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::cst::{CstNode, NodeKind};
    use crate::error::ParseErrorKind;

    fn parse_expr(source: &str) -> CstNode {
        let cst = crate::parse(source);
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        cst.root.children[0].children[0].clone()
    }

    #[test]
    fn test_parse_numbers() {
        for text in ["42", "3/2", "0.125", "+inf", "-infinity"] {
            let expr = parse_expr(text);
            assert_eq!(expr.kind, NodeKind::NumberLiteral);
            assert_eq!(expr.text_or_empty(), text);
        }
    }

    #[test]
    fn test_unsigned_infinity_rejected() {
        let cst = crate::parse("inf");
        assert_eq!(cst.errors[0].kind, ParseErrorKind::UnsignedInfinity);
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expr("beta");
        assert_eq!(expr.kind, NodeKind::VariableName);
        assert_eq!(expr.text_or_empty(), "beta");
    }

    #[test]
    fn test_parse_builtin_calls() {
        let expr = parse_expr("stair(0, 60, 12)");
        assert_eq!(expr.kind, NodeKind::FunctionCall);
        assert_eq!(expr.text_or_empty(), "stair");
        assert_eq!(expr.children.len(), 3);

        let nullary = parse_expr("epsilon");
        assert_eq!(nullary.kind, NodeKind::FunctionCall);
        assert!(parse_expr("zero()").children.is_empty());

        let deviation = parse_expr("hdev(f, g)");
        assert_eq!(deviation.kind, NodeKind::NumberCall);
        assert!(deviation.is_number_syntax());
    }

    #[test]
    fn test_wrong_arity() {
        let cst = crate::parse("ratency(1)");
        assert_eq!(
            cst.errors[0].kind,
            ParseErrorKind::WrongArity { name: "ratency".into(), expected: 2, found: 1 }
        );
    }

    #[test]
    fn test_parse_value_at() {
        let plain = parse_expr("f(3)");
        assert_eq!(plain.kind, NodeKind::ValueAt);
        assert_eq!(plain.children.len(), 2);

        let left = parse_expr("f(3^-)");
        assert_eq!(left.children[2].kind, NodeKind::LimitMarker);
        assert_eq!(left.children[2].text_or_empty(), "-");

        let right = parse_expr("f(1/2 + x ^+)");
        assert_eq!(right.children[2].text_or_empty(), "+");
        assert!(right.is_number_syntax());
    }

    #[test]
    fn test_parenthesized() {
        let expr = parse_expr("(f + g) * h");
        assert_eq!(expr.kind, NodeKind::FunctionBinary);
        assert_eq!(expr.children[0].children[1].text_or_empty(), "+");
    }
}
