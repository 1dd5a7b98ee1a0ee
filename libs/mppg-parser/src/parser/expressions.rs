//! # Expression Parsing
//!
//! Facade module for parsing MPPG expressions.
//!
//! ## Module Structure
//!
//! - `operators` - Binary and unary operators with precedence
//! - `primaries` - Literals, names, builtin calls and value-at forms
//! - `curves` - `uaf(...)` and `upp(...)` curve literals

use super::operators::Precedence;
use super::Parser;
use crate::cst::CstNode;
use crate::error::ParseError;

impl<'a> Parser<'a> {
    /// Parse an expression.
    ///
    /// ## Example
    ///
    /// ```text
    /// ratency(1, 2) * bucket(1, 1) /\ f
    /// 3/2 + 1/2
    /// ```
    pub(super) fn parse_expression(&mut self) -> Result<CstNode, ParseError> {
        self.within("expression", |p| p.parse_precedence(Precedence::Lattice))
    }
}
