//! # Character Cursor
//!
//! Walks the source one character at a time for the lexer, keeping the
//! line and column of the next character up to date.
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("f := zero");
//! assert!(cursor.eat('f'));
//! assert!(!cursor.eat(':'));
//! assert_eq!(cursor.take_while(|c| c == ' '), " ");
//! assert!(cursor.eat(':') && cursor.eat('='));
//! ```

use crate::span::Position;

// =============================================================================
// CURSOR
// =============================================================================

/// Source text still to be lexed, plus where it starts.
pub struct Cursor<'a> {
    source: &'a str,
    rest: &'a str,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
            line: 0,
            column: 0,
        }
    }

    /// Position of the next character.
    pub fn position(&self) -> Position {
        Position::new(self.source.len() - self.rest.len(), self.line, self.column)
    }

    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// The character after [`Cursor::peek`].
    pub fn peek_next(&self) -> Option<char> {
        self.rest.chars().nth(1)
    }

    /// Consume one character; `None` at end of input.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume `expected` if it is the next character.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use mppg_parser::lexer::Cursor;
    ///
    /// let mut cursor = Cursor::new("*_");
    /// assert!(cursor.eat('*'));
    /// assert!(cursor.eat('_'));
    /// assert!(cursor.is_eof());
    /// ```
    pub fn eat(&mut self, expected: char) -> bool {
        let matched = self.peek() == Some(expected);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consume characters while `predicate` holds and return them.
    pub fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.source.len() - self.rest.len();
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
        &self.source[start..self.source.len() - self.rest.len()]
    }

    /// Source text from `start` up to the next character.
    pub fn slice_from(&self, start: Position) -> &'a str {
        &self.source[start.byte..self.source.len() - self.rest.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.advance(), None);
        assert!(!cursor.eat('x'));
    }

    #[test]
    fn test_lines_and_columns() {
        let mut cursor = Cursor::new("x\n  y");
        cursor.advance();
        cursor.advance();
        cursor.take_while(|c| c == ' ');
        let position = cursor.position();
        assert_eq!((position.byte, position.line, position.column), (4, 1, 2));
    }

    #[test]
    fn test_take_while_stops_at_fraction_bar() {
        let mut cursor = Cursor::new("123/4");
        assert_eq!(cursor.take_while(|c| c.is_ascii_digit()), "123");
        assert_eq!(cursor.peek(), Some('/'));
        assert_eq!(cursor.peek_next(), Some('4'));
        assert_eq!(cursor.slice_from(Position::default()), "123");
    }

    #[test]
    fn test_multibyte_comparator() {
        let mut cursor = Cursor::new("≤1");
        assert!(cursor.eat('≤'));
        assert_eq!(cursor.position().byte, 3);
        assert_eq!(cursor.position().column, 1);
    }
}
