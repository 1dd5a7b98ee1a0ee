//! # MPPG Parser
//!
//! Recursive descent parser for MPPG. Produces a Concrete Syntax Tree (CST)
//! with exactly one statement node per source line.
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::lexer::Lexer;
//! use mppg_parser::parser::Parser;
//!
//! let source = "f := ratency(1, 2)";
//! let tokens = Lexer::new(source).tokenize();
//! let cst = Parser::new(source, tokens).parse();
//! assert!(cst.is_ok());
//! ```

mod curves;
mod expressions;
mod operators;
mod primaries;
mod statements;

use crate::cst::{Cst, CstNode, NodeKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::span::{Position, Span};

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for MPPG.
pub struct Parser<'a> {
    /// Source text (for statement text and error recovery).
    source: &'a str,
    /// Token stream, always terminated by EOF.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Collected parse errors.
    errors: Vec<ParseError>,
    /// Grammar rules currently being parsed, outermost first.
    rules: Vec<&'static str>,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    ///
    /// ## Parameters
    ///
    /// - `source`: Original source text
    /// - `tokens`: Tokens from lexer
    pub fn new(source: &'a str, mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| !t.is_eof()) {
            let end = tokens.last().map_or_else(Position::default, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end), String::new()));
        }
        Self {
            source,
            tokens,
            current: 0,
            errors: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Parse the entire source into a CST.
    ///
    /// A line that fails to parse becomes a [`NodeKind::Error`] statement
    /// and parsing resumes on the next line.
    pub fn parse(&mut self) -> Cst {
        let start = self.current_position();
        let mut children = Vec::new();

        while !self.is_at_end() {
            children.push(self.parse_line());
        }

        let end = self.current_position();
        let root = CstNode::with_children(NodeKind::Program, Span::new(start, end), children);

        Cst::new(root, std::mem::take(&mut self.errors))
    }

    /// Parse one source line into a statement node.
    fn parse_line(&mut self) -> CstNode {
        let line_start = self.current_position();
        let first_token = self.current;

        match self.peek_kind() {
            TokenKind::Newline => {
                self.advance();
                return CstNode::new(NodeKind::Empty, Span::new(line_start, line_start));
            }
            TokenKind::Comment => {
                let comment = self.advance().clone();
                self.match_token(TokenKind::Newline);
                return CstNode::with_text(NodeKind::Comment, comment.span, comment.text);
            }
            _ => {}
        }

        let result = self.within("statement", |p| {
            let mut node = p.parse_statement()?;
            node.text = Some(node.span.text(p.source).to_string());
            if p.check(TokenKind::Comment) {
                let comment = p.advance().clone();
                node.add_child(CstNode::with_text(
                    NodeKind::InlineComment,
                    comment.span,
                    comment.text,
                ));
            }
            if !p.peek().ends_line() {
                return Err(p.unexpected(&["end of line"]));
            }
            Ok(node)
        });

        match result {
            Ok(node) => {
                self.match_token(TokenKind::Newline);
                node
            }
            Err(error) => {
                self.errors.push(error);
                self.synchronize();
                let end = if self.current > first_token {
                    self.previous().span.end
                } else {
                    line_start
                };
                let span = Span::new(line_start, end);
                self.match_token(TokenKind::Newline);
                CstNode::with_text(NodeKind::Error, span, span.text(self.source))
            }
        }
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get current token.
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Get the token `offset` positions ahead, clamped to EOF.
    fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.current + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Get current token kind.
    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Check if current token matches kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Check if at end of input.
    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Get current position.
    fn current_position(&self) -> Position {
        self.peek().span.start
    }

    /// Advance to next token, returning the consumed one.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Get previous token.
    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Consume token if it matches expected kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.unexpected(&[kind.display()]))
        }
    }

    /// Try to consume token if it matches.
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    /// Run `f` with `rule` pushed on the rule-context stack.
    fn within<T>(
        &mut self,
        rule: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.rules.push(rule);
        let result = f(self);
        self.rules.pop();
        result
    }

    /// Build an error for the current token, carrying grammar context.
    fn unexpected(&self, expected: &[&str]) -> ParseError {
        let token = self.peek();
        let description = expected.join(" or ");
        let kind = match token.kind {
            TokenKind::Eof | TokenKind::Newline => ParseErrorKind::UnexpectedEof { expected: description },
            TokenKind::Error if token.text.starts_with('"') => ParseErrorKind::UnterminatedString,
            TokenKind::Error => ParseErrorKind::InvalidCharacter { text: token.text.clone() },
            _ => ParseErrorKind::UnexpectedToken {
                found: token.text.clone(),
                expected: description,
            },
        };
        self.error(kind, token.span).with_expected(expected.iter().copied())
    }

    /// Build an error of the given kind, carrying the rule stack.
    fn error(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, span).with_rules(&self.rules)
    }

    // =========================================================================
    // ERROR RECOVERY
    // =========================================================================

    /// Skip the rest of the current line, leaving the newline unconsumed.
    fn synchronize(&mut self) {
        while !self.peek().ends_line() {
            self.advance();
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Create span from start to the end of the previous token.
    fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.previous().span.end)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> Cst {
        let tokens = Lexer::new(source).tokenize();
        Parser::new(source, tokens).parse()
    }

    #[test]
    fn test_parse_empty() {
        let cst = parse("");
        assert!(cst.is_ok());
        assert_eq!(cst.root.kind, NodeKind::Program);
        assert!(cst.root.children.is_empty());
    }

    #[test]
    fn test_one_statement_per_line() {
        let cst = parse("f := zero\n\n// note\nf");
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        let kinds: Vec<_> = cst.root.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Assignment,
                NodeKind::Empty,
                NodeKind::Comment,
                NodeKind::ExpressionCommand
            ]
        );
    }

    #[test]
    fn test_statement_text_excludes_inline_comment() {
        let cst = parse("x := 3/2 // rate\n");
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        let statement = &cst.root.children[0];
        assert_eq!(statement.text_or_empty(), "x := 3/2");
        assert_eq!(statement.inline_comment(), Some("// rate"));
    }

    #[test]
    fn test_recovers_on_next_line() {
        let cst = parse("f := ratency(1,\ng := zero");
        assert_eq!(cst.errors.len(), 1);
        assert_eq!(cst.root.children.len(), 2);
        assert_eq!(cst.root.children[0].kind, NodeKind::Error);
        assert_eq!(cst.root.children[0].text_or_empty(), "f := ratency(1,");
        assert_eq!(cst.root.children[1].kind, NodeKind::Assignment);
    }

    #[test]
    fn test_trailing_tokens_are_an_error() {
        let cst = parse("f := zero zero");
        assert_eq!(cst.errors.len(), 1);
        assert_eq!(cst.root.children[0].kind, NodeKind::Error);
        assert_eq!(cst.errors[0].expected, vec!["end of line"]);
    }

    #[test]
    fn test_error_carries_rule_stack() {
        let cst = parse("assert(f = )");
        let error = &cst.errors[0];
        assert_eq!(error.rule_stack.first().map(String::as_str), Some("statement"));
        assert!(error.rule_stack.iter().any(|r| r == "assertion"), "Rules: {:?}", error.rule_stack);
    }
}
