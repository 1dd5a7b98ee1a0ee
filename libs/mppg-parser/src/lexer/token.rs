//! # Tokens
//!
//! Token types for the MPPG lexer.
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::lexer::{Token, TokenKind};
//! use mppg_parser::span::Span;
//!
//! let token = Token::new(TokenKind::Number, Span::from_bytes(0, 3), "3/2".to_string());
//! assert_eq!(token.kind, TokenKind::Number);
//! ```

use crate::span::Span;

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span.
    pub span: Span,
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    /// Check if token is the end of input.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Check if token ends a line (newline or end of input).
    pub fn ends_line(&self) -> bool {
        matches!(self.kind, TokenKind::Newline | TokenKind::Eof)
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Number literal like `10`, `3/2` or `0.25`
    Number,
    /// String literal like `"title"`
    String,
    /// Identifier like `f` or `ratency`
    Identifier,

    // Trivia that matters in a line-oriented language
    /// `// ...` to end of line
    Comment,
    /// Line break
    Newline,

    // Keywords
    /// `assert`
    Assert,
    /// `printExpression`
    PrintExpression,
    /// `plot`
    Plot,
    /// `uaf`
    Uaf,
    /// `upp`
    Upp,
    /// `period`
    Period,
    /// `inf` or `infinity`
    Infinity,
    /// `true`
    True,
    /// `false`
    False,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `*_`
    StarUnderscore,
    /// `*^`
    StarCaret,
    /// `/`
    Slash,
    /// `/_`
    SlashUnderscore,
    /// `/^`
    SlashCaret,
    /// `/\`
    Meet,
    /// `\/`
    Join,
    /// `:=`
    Assign,
    /// `=`
    Eq,
    /// `!=` or `≠`
    NotEq,
    /// `<`
    Lt,
    /// `<=` or `≤`
    LtEq,
    /// `>`
    Gt,
    /// `>=` or `≥`
    GtEq,
    /// `^`
    Caret,

    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,

    // Meta
    /// End of input
    Eof,
    /// Error token
    Error,
}

impl TokenKind {
    /// Check if this is a binary expression operator.
    pub const fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            Self::Plus
                | Self::Minus
                | Self::Star
                | Self::StarUnderscore
                | Self::StarCaret
                | Self::Slash
                | Self::SlashUnderscore
                | Self::SlashCaret
                | Self::Meet
                | Self::Join
        )
    }

    /// Check if this is an assertion comparison operator.
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }

    /// Get display string for error messages.
    pub const fn display(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Identifier => "identifier",
            Self::Comment => "comment",
            Self::Newline => "end of line",
            Self::Assert => "assert",
            Self::PrintExpression => "printExpression",
            Self::Plot => "plot",
            Self::Uaf => "uaf",
            Self::Upp => "upp",
            Self::Period => "period",
            Self::Infinity => "inf",
            Self::True => "true",
            Self::False => "false",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::StarUnderscore => "*_",
            Self::StarCaret => "*^",
            Self::Slash => "/",
            Self::SlashUnderscore => "/_",
            Self::SlashCaret => "/^",
            Self::Meet => "/\\",
            Self::Join => "\\/",
            Self::Assign => ":=",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Caret => "^",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Eof => "end of input",
            Self::Error => "error",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_binary_operator() {
        assert!(TokenKind::StarUnderscore.is_binary_operator());
        assert!(TokenKind::Meet.is_binary_operator());
        assert!(!TokenKind::Assign.is_binary_operator());
    }

    #[test]
    fn test_token_is_comparison() {
        assert!(TokenKind::NotEq.is_comparison());
        assert!(!TokenKind::Assign.is_comparison());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(TokenKind::Meet.display(), "/\\");
        assert_eq!(TokenKind::Newline.display(), "end of line");
    }
}
