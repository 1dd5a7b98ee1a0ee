//! # MPPG Lexer
//!
//! Tokenizes MPPG source into tokens. Unlike most languages, line breaks and
//! comments are tokens: statements are line-delimited and comments are kept
//! so that they can be echoed and passed through to generated code.
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("f := ratency(1, 2)").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! assert_eq!(tokens[1].kind, TokenKind::Assign);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::{Position, Span};

// =============================================================================
// LEXER
// =============================================================================

/// MPPG lexer.
///
/// Converts source text into a stream of tokens ending with [`TokenKind::Eof`].
pub struct Lexer<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens including the trailing EOF token.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use mppg_parser::lexer::{Lexer, TokenKind};
    ///
    /// let tokens = Lexer::new("zero\n").tokenize();
    /// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    /// assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Newline, TokenKind::Eof]);
    /// ```
    pub fn tokenize(mut self) -> Vec<Token> {
        loop {
            self.skip_blanks();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let eof_pos = self.cursor.position();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(eof_pos, eof_pos), String::new()));
        self.tokens
    }

    /// Skip horizontal whitespace. Newlines are significant.
    fn skip_blanks(&mut self) {
        self.cursor.take_while(|c| c.is_whitespace() && c != '\n');
    }

    /// Push a token spanning from `start` to the cursor.
    fn push(&mut self, kind: TokenKind, start: Position) {
        let text = self.cursor.slice_from(start).to_string();
        let span = Span::new(start, self.cursor.position());
        self.tokens.push(Token::new(kind, span, text));
    }

    /// Consume `next` if it follows, choosing between two token kinds.
    fn either(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.cursor.eat(next) {
            matched
        } else {
            single
        }
    }

    /// Scan a single token.
    fn scan_token(&mut self) {
        let start = self.cursor.position();
        let c = match self.cursor.advance() {
            Some(c) => c,
            None => return,
        };

        let kind = match c {
            '\n' => TokenKind::Newline,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '^' => TokenKind::Caret,
            '=' => TokenKind::Eq,
            '≠' => TokenKind::NotEq,
            '≤' => TokenKind::LtEq,
            '≥' => TokenKind::GtEq,
            '<' => self.either('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),
            '!' => self.either('=', TokenKind::NotEq, TokenKind::Error),
            ':' => self.either('=', TokenKind::Assign, TokenKind::Error),
            '\\' => self.either('/', TokenKind::Join, TokenKind::Error),
            '*' if self.cursor.eat('_') => TokenKind::StarUnderscore,
            '*' if self.cursor.eat('^') => TokenKind::StarCaret,
            '*' => TokenKind::Star,
            '/' if self.cursor.peek() == Some('/') => return self.scan_comment(start),
            '/' if self.cursor.eat('\\') => TokenKind::Meet,
            '/' if self.cursor.eat('_') => TokenKind::SlashUnderscore,
            '/' if self.cursor.eat('^') => TokenKind::SlashCaret,
            '/' => TokenKind::Slash,
            '"' => return self.scan_string(start),
            '0'..='9' => return self.scan_number(start),
            c if c.is_alphabetic() || c == '_' => return self.scan_identifier(start),
            _ => TokenKind::Error,
        };

        self.push(kind, start);
    }

    /// Scan a `//` comment up to (not including) the line break.
    fn scan_comment(&mut self, start: Position) {
        self.cursor.take_while(|c| c != '\n');
        self.push(TokenKind::Comment, start);
    }

    /// Scan a string literal. An unterminated string becomes an error token.
    fn scan_string(&mut self, start: Position) {
        let mut terminated = false;
        while let Some(c) = self.cursor.peek() {
            match c {
                '\n' => break,
                '"' => {
                    self.cursor.advance();
                    terminated = true;
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    if self.cursor.peek() != Some('\n') {
                        self.cursor.advance();
                    }
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }

        let kind = if terminated { TokenKind::String } else { TokenKind::Error };
        self.push(kind, start);
    }

    /// Scan a number literal: `digits`, `digits/digits` or `digits.digits`.
    ///
    /// Fractions and decimals contain no whitespace, which is what separates
    /// the literal `3/2` from the division `3 / 2`.
    fn scan_number(&mut self, start: Position) {
        self.cursor.take_while(|c| c.is_ascii_digit());

        let continues_with_digit = self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit());
        if continues_with_digit && matches!(self.cursor.peek(), Some('/') | Some('.')) {
            self.cursor.advance();
            self.cursor.take_while(|c| c.is_ascii_digit());
        }

        self.push(TokenKind::Number, start);
    }

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self, start: Position) {
        self.cursor.take_while(|c| c.is_alphanumeric() || c == '_');

        let kind = match self.cursor.slice_from(start) {
            "assert" => TokenKind::Assert,
            "printExpression" => TokenKind::PrintExpression,
            "plot" => TokenKind::Plot,
            "uaf" => TokenKind::Uaf,
            "upp" => TokenKind::Upp,
            "period" => TokenKind::Period,
            "inf" | "infinity" => TokenKind::Infinity,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Identifier,
        };

        self.push(kind, start);
    }
}

// =============================================================================
// TESTS
// =============================================================================
