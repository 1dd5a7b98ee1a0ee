//! # Source Spans
//!
//! Byte/line/column positions and the half-open spans built from them.
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::span::Span;
//!
//! let span = Span::from_bytes(5, 9);
//! assert_eq!(span.text("f := zero"), "zero");
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// POSITION
// =============================================================================

/// A location in source text.
///
/// `line` and `column` are 0-indexed; diagnostics convert the line to
/// 1-based numbering when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Line number (0-indexed).
    pub line: usize,
    /// Column in characters (0-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// Half-open range `[start, end)` of source text.
///
/// ## Example
///
/// ```rust
/// use mppg_parser::span::{Position, Span};
///
/// let span = Span::new(Position::new(0, 0, 0), Position::new(2, 0, 2));
/// assert_eq!(span.text("f := zero"), "f ");
/// assert_eq!(span.end.column, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Span {
    /// Create a span from two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a single-line span from byte offsets.
    ///
    /// Line and column are derived assuming the offsets sit on line 0,
    /// which is what tests and synthetic nodes need.
    pub const fn from_bytes(start: usize, end: usize) -> Self {
        Self {
            start: Position::new(start, 0, start),
            end: Position::new(end, 0, end),
        }
    }

    /// Empty span at the start of the source.
    pub const fn zero() -> Self {
        Self::from_bytes(0, 0)
    }

    /// Slice of `source` covered by this span, or `""` when out of bounds.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start.byte..self.end.byte).unwrap_or("")
    }
}

// =============================================================================
// TESTS
// =============================================================================
