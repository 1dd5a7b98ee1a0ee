//! # Statement Parsing
//!
//! Parses MPPG statements: assignments, assertions, `printExpression`,
//! `plot` and bare expressions.
//!
//! ## Grammar
//!
//! ```text
//! statement  = assignment | assertion | print | plot | expression
//! assignment = IDENT ":=" expression
//! assertion  = "assert" "(" expression cmp expression ")"
//! print      = "printExpression" "(" IDENT ")"
//! plot       = "plot" "(" plot_arg { "," plot_arg } ")"
//! ```

use super::Parser;
use crate::builtins::Builtin;
use crate::cst::{CstNode, NodeKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;

/// Flags that may appear in a plot call without a value.
const PLOT_FLAGS: [&str; 2] = ["browser", "gui"];

impl<'a> Parser<'a> {
    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> Result<CstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Assert => self.parse_assertion(),
            TokenKind::PrintExpression => self.parse_print_expression(),
            TokenKind::Plot => self.parse_plot(),
            TokenKind::Identifier if self.peek_at(1).kind == TokenKind::Assign => {
                self.parse_assignment()
            }
            _ => self.within("expression_command", |p| {
                let start = p.current_position();
                let expression = p.parse_expression()?;
                Ok(CstNode::with_children(
                    NodeKind::ExpressionCommand,
                    p.span_from(start),
                    vec![expression],
                ))
            }),
        }
    }

    /// Parse an assignment statement.
    ///
    /// ## Example
    ///
    /// ```text
    /// beta := ratency(10, 3)
    /// ```
    fn parse_assignment(&mut self) -> Result<CstNode, ParseError> {
        self.within("assignment", |p| {
            let start = p.current_position();
            let name = p.expect(TokenKind::Identifier)?;
            if Builtin::from_name(&name.text).is_some() {
                return Err(p.error(ParseErrorKind::ReservedName { name: name.text }, name.span));
            }
            p.expect(TokenKind::Assign)?;
            let value = p.parse_expression()?;

            Ok(CstNode::with_children(
                NodeKind::Assignment,
                p.span_from(start),
                vec![
                    CstNode::with_text(NodeKind::VariableName, name.span, name.text),
                    value,
                ],
            ))
        })
    }

    /// Parse an assertion.
    ///
    /// ## Example
    ///
    /// ```text
    /// assert(f * g <= h)
    /// ```
    fn parse_assertion(&mut self) -> Result<CstNode, ParseError> {
        self.within("assertion", |p| {
            let start = p.current_position();
            p.expect(TokenKind::Assert)?;
            p.expect(TokenKind::LParen)?;
            let left = p.parse_expression()?;

            if !p.peek_kind().is_comparison() {
                return Err(p.unexpected(&["=", "!=", "<", "<=", ">", ">="]));
            }
            let operator = p.advance().clone();
            let right = p.parse_expression()?;
            p.expect(TokenKind::RParen)?;

            Ok(CstNode::with_children(
                NodeKind::Assertion,
                p.span_from(start),
                vec![
                    left,
                    CstNode::with_text(NodeKind::ComparisonOperator, operator.span, operator.text),
                    right,
                ],
            ))
        })
    }

    /// Parse `printExpression(name)`.
    fn parse_print_expression(&mut self) -> Result<CstNode, ParseError> {
        self.within("print_expression", |p| {
            let start = p.current_position();
            p.expect(TokenKind::PrintExpression)?;
            p.expect(TokenKind::LParen)?;
            let name = p.expect(TokenKind::Identifier)?;
            p.expect(TokenKind::RParen)?;

            Ok(CstNode::with_children(
                NodeKind::PrintExpression,
                p.span_from(start),
                vec![CstNode::with_text(NodeKind::VariableName, name.span, name.text)],
            ))
        })
    }

    /// Parse a plot command.
    ///
    /// ## Example
    ///
    /// ```text
    /// plot(f, g, main="arrival vs service", xlim=[0, 10], out="fg.svg")
    /// ```
    fn parse_plot(&mut self) -> Result<CstNode, ParseError> {
        self.within("plot", |p| {
            let start = p.current_position();
            p.expect(TokenKind::Plot)?;
            p.expect(TokenKind::LParen)?;

            let mut children = vec![p.parse_plot_argument()?];
            while p.match_token(TokenKind::Comma) {
                children.push(p.parse_plot_argument()?);
            }
            p.expect(TokenKind::RParen)?;

            Ok(CstNode::with_children(NodeKind::Plot, p.span_from(start), children))
        })
    }

    /// Parse one plot argument: a setting, a flag, or a curve expression.
    fn parse_plot_argument(&mut self) -> Result<CstNode, ParseError> {
        self.within("plot_argument", |p| {
            let start = p.current_position();
            let token = p.peek().clone();
            let next = p.peek_at(1).kind;

            if token.kind != TokenKind::Identifier {
                return p.parse_expression();
            }

            if next == TokenKind::Eq {
                p.advance();
                p.advance();
                let value = p.parse_setting_value()?;
                let mut setting = CstNode::with_children(
                    NodeKind::PlotSetting,
                    p.span_from(start),
                    vec![value],
                );
                setting.text = Some(token.text);
                return Ok(setting);
            }

            let is_flag = PLOT_FLAGS.contains(&token.text.as_str())
                && matches!(next, TokenKind::Comma | TokenKind::RParen);
            if is_flag {
                p.advance();
                let mut setting = CstNode::with_children(
                    NodeKind::PlotSetting,
                    token.span,
                    vec![CstNode::with_text(NodeKind::BooleanLiteral, token.span, "true")],
                );
                setting.text = Some(token.text);
                return Ok(setting);
            }

            p.parse_expression()
        })
    }

    /// Parse a plot setting value: string, `[a, b]` range, or boolean.
    fn parse_setting_value(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        match self.peek_kind() {
            TokenKind::String => {
                let token = self.advance().clone();
                let text = self.unescape(&token.text, token.span)?;
                Ok(CstNode::with_text(NodeKind::StringLiteral, token.span, text))
            }
            TokenKind::True | TokenKind::False => {
                let token = self.advance().clone();
                Ok(CstNode::with_text(NodeKind::BooleanLiteral, token.span, token.text))
            }
            TokenKind::LBracket => self.within("range", |p| {
                p.advance();
                let low = p.parse_signed()?;
                p.expect(TokenKind::Comma)?;
                let high = p.parse_signed()?;
                p.expect(TokenKind::RBracket)?;
                Ok(CstNode::with_children(NodeKind::Range, p.span_from(start), vec![low, high]))
            }),
            _ => Err(self.unexpected(&["string", "[", "true", "false"])),
        }
    }

    /// Strip the quotes of a string token and resolve escapes.
    fn unescape(&self, quoted: &str, span: crate::span::Span) -> Result<String, ParseError> {
        let inner = quoted
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(quoted);

        let mut result = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                result.push(c);
                continue;
            }
            match chars.next() {
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                other => {
                    let sequence = other.map_or_else(|| "\\".to_string(), |c| format!("\\{c}"));
                    return Err(self.error(ParseErrorKind::InvalidEscape { sequence }, span));
                }
            }
        }
        Ok(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
