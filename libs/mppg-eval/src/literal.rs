//! # Primitive Literals
//!
//! Number literals and `(time, value)` endpoints as they appear in the
//! syntax tree. Decimals are converted exactly, never through floating point.
//!
//! ## Example
//!
//! ```rust
//! use mppg_eval::literal::parse_number_text;
//! use nc_curves::Rational;
//!
//! assert_eq!(parse_number_text("0.25").unwrap(), Rational::new(1, 4).unwrap());
//! assert_eq!(parse_number_text("-infinity").unwrap(), Rational::MinusInfinity);
//! ```

use crate::error::{EvalError, EvalResult};
use mppg_parser::{CstNode, NodeKind};
use nc_curves::Rational;
use std::fmt;

/// Parse the text of a number literal.
pub fn parse_number_text(text: &str) -> EvalResult<Rational> {
    text.parse().map_err(|_| EvalError::InvalidLiteral {
        text: text.to_string(),
    })
}

/// Parse a `NumberLiteral` node.
pub fn parse_number(node: &CstNode) -> EvalResult<Rational> {
    if node.kind != NodeKind::NumberLiteral {
        return Err(EvalError::malformed(format!(
            "expected a number literal, found {:?}",
            node.kind
        )));
    }
    parse_number_text(node.text_or_empty())
}

/// Parse the `index`-th child of `node` as a number literal.
pub(crate) fn number_child(node: &CstNode, index: usize) -> EvalResult<Rational> {
    let child = node.child(index).ok_or_else(|| {
        EvalError::malformed(format!("{:?} has no child {}", node.kind, index))
    })?;
    parse_number(child)
}

// =============================================================================
// ENDPOINT
// =============================================================================

/// A `(time, value)` pair; either coordinate may be infinite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub time: Rational,
    pub value: Rational,
}

impl Endpoint {
    pub fn new(time: Rational, value: Rational) -> Self {
        Self { time, value }
    }

    /// Parse an `Endpoint` or `PointElement` node: two number children.
    pub fn from_node(node: &CstNode) -> EvalResult<Self> {
        Ok(Self::new(number_child(node, 0)?, number_child(node, 1)?))
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite() && self.value.is_finite()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.time, self.value)
    }
}

// =============================================================================
// TESTS
// =============================================================================
