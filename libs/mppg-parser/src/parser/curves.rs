//! # Curve Literal Parsing
//!
//! Parses ultimately-affine and ultimately-pseudo-periodic curve literals.
//!
//! ## Grammar
//!
//! ```text
//! uaf      = "uaf" "(" elements ")"
//! upp      = "upp" "(" [ elements "," ] "period" "(" elements ")" [ "," signed [ "," signed ] ] ")"
//! elements = element { [","] element }
//! element  = "[" signed "," signed "]"
//!          | ("[" | "]") endpoint [ signed ] endpoint ("]" | "[")
//! endpoint = "(" signed "," signed ")"
//! signed   = [ "+" | "-" ] ( NUMBER | INFINITY )
//! ```
//!
//! ## Example
//!
//! ```text
//! uaf([0, 0] ](0, 0) 2 (+inf, +inf)[)
//! upp(period([(0, 0) (1, 0)[ [1, 1] ](1, 1) (2, 1)[), 1)
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;
use crate::span::Span;

impl<'a> Parser<'a> {
    /// Parse an optionally signed number or a signed infinity.
    ///
    /// The literal text keeps the sign: `-3/2`, `+inf`.
    pub(super) fn parse_signed(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let sign = match self.peek_kind() {
            TokenKind::Plus | TokenKind::Minus => Some(self.advance().text.clone()),
            _ => None,
        };

        match self.peek_kind() {
            TokenKind::Number => {
                let number = self.advance().text.clone();
                let text = format!("{}{}", sign.unwrap_or_default(), number);
                Ok(CstNode::with_text(NodeKind::NumberLiteral, self.span_from(start), text))
            }
            TokenKind::Infinity => {
                let token = self.advance().clone();
                match sign {
                    Some(sign) => Ok(CstNode::with_text(
                        NodeKind::NumberLiteral,
                        self.span_from(start),
                        format!("{}{}", sign, token.text),
                    )),
                    None => Err(self.error(ParseErrorKind::UnsignedInfinity, token.span)),
                }
            }
            _ => Err(self.unexpected(&["number", "+inf", "-inf"])),
        }
    }

    /// Parse `uaf(elements)`.
    pub(super) fn parse_uaf(&mut self) -> Result<CstNode, ParseError> {
        self.within("ultimately_affine", |p| {
            let start = p.current_position();
            p.expect(TokenKind::Uaf)?;
            p.expect(TokenKind::LParen)?;
            let elements = p.parse_elements()?;
            p.expect(TokenKind::RParen)?;
            Ok(CstNode::with_children(NodeKind::UltimatelyAffine, p.span_from(start), elements))
        })
    }

    /// Parse `upp([transient,] period(elements) [, increment [, length]])`.
    pub(super) fn parse_upp(&mut self) -> Result<CstNode, ParseError> {
        self.within("ultimately_pseudo_periodic", |p| {
            let start = p.current_position();
            p.expect(TokenKind::Upp)?;
            p.expect(TokenKind::LParen)?;
            let mut children = Vec::new();

            if !p.check(TokenKind::Period) {
                let transient_start = p.current_position();
                let elements = p.within("transient", Self::parse_elements)?;
                children.push(CstNode::with_children(
                    NodeKind::Transient,
                    p.span_from(transient_start),
                    elements,
                ));
                p.expect(TokenKind::Comma)?;
            }

            let period = p.within("period", |p| {
                let period_start = p.current_position();
                p.expect(TokenKind::Period)?;
                p.expect(TokenKind::LParen)?;
                let elements = p.parse_elements()?;
                p.expect(TokenKind::RParen)?;
                Ok(CstNode::with_children(NodeKind::Period, p.span_from(period_start), elements))
            })?;
            children.push(period);

            for kind in [NodeKind::Increment, NodeKind::PeriodLength] {
                if !p.match_token(TokenKind::Comma) {
                    break;
                }
                let value = p.within(kind.rule_name(), Self::parse_signed)?;
                children.push(CstNode::with_children(kind, value.span, vec![value]));
            }

            p.expect(TokenKind::RParen)?;
            Ok(CstNode::with_children(
                NodeKind::UltimatelyPseudoPeriodic,
                p.span_from(start),
                children,
            ))
        })
    }

    /// Parse one or more elements, optionally separated by commas.
    ///
    /// A comma that is not followed by another element is left for the
    /// enclosing rule.
    fn parse_elements(&mut self) -> Result<Vec<CstNode>, ParseError> {
        let mut elements = vec![self.parse_element()?];
        loop {
            let starts_element = |kind: TokenKind| matches!(kind, TokenKind::LBracket | TokenKind::RBracket);
            if self.check(TokenKind::Comma) && starts_element(self.peek_at(1).kind) {
                self.advance();
            }
            if !starts_element(self.peek_kind()) {
                break;
            }
            elements.push(self.parse_element()?);
        }
        Ok(elements)
    }

    /// Parse a point `[t, v]` or a segment.
    fn parse_element(&mut self) -> Result<CstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::LBracket if self.peek_at(1).kind != TokenKind::LParen => self.parse_point(),
            TokenKind::LBracket | TokenKind::RBracket => self.parse_segment(),
            _ => Err(self.unexpected(&["[", "]"])),
        }
    }

    /// Parse a point element.
    fn parse_point(&mut self) -> Result<CstNode, ParseError> {
        self.within("point", |p| {
            let start = p.current_position();
            p.expect(TokenKind::LBracket)?;
            let time = p.parse_signed()?;
            p.expect(TokenKind::Comma)?;
            let value = p.parse_signed()?;
            p.expect(TokenKind::RBracket)?;
            Ok(CstNode::with_children(NodeKind::PointElement, p.span_from(start), vec![time, value]))
        })
    }

    /// Parse a segment element.
    ///
    /// Children: left bracket, left endpoint, optional slope, right endpoint,
    /// right bracket.
    fn parse_segment(&mut self) -> Result<CstNode, ParseError> {
        self.within("segment", |p| {
            let start = p.current_position();
            let mut children = Vec::with_capacity(5);

            let open = p.advance().clone();
            children.push(CstNode::with_text(NodeKind::Bracket, open.span, open.text));
            children.push(p.parse_endpoint()?);

            if !p.check(TokenKind::LParen) {
                let slope = p.within("slope", Self::parse_signed)?;
                children.push(CstNode::with_children(NodeKind::Slope, slope.span, vec![slope]));
            }

            children.push(p.parse_endpoint()?);

            if !matches!(p.peek_kind(), TokenKind::LBracket | TokenKind::RBracket) {
                return Err(p.unexpected(&["]", "["]));
            }
            let close = p.advance().clone();
            children.push(CstNode::with_text(NodeKind::Bracket, close.span, close.text));

            Ok(CstNode::with_children(NodeKind::SegmentElement, p.span_from(start), children))
        })
    }

    /// Parse a segment endpoint `(t, v)`.
    fn parse_endpoint(&mut self) -> Result<CstNode, ParseError> {
        self.within("endpoint", |p| {
            let start = p.current_position();
            p.expect(TokenKind::LParen)?;
            let time = p.parse_signed()?;
            p.expect(TokenKind::Comma)?;
            let value = p.parse_signed()?;
            p.expect(TokenKind::RParen)?;
            let span: Span = p.span_from(start);
            Ok(CstNode::with_children(NodeKind::Endpoint, span, vec![time, value]))
        })
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
    fn test_parse_uaf() {
        let expr = parse_expr("uaf([0, 0] ](0, 0) 2 (+inf, +inf)[)");
        assert_eq!(expr.kind, NodeKind::UltimatelyAffine);
        assert_eq!(expr.children.len(), 2);
        assert_eq!(expr.children[0].kind, NodeKind::PointElement);

        let segment = &expr.children[1];
        assert_eq!(segment.kind, NodeKind::SegmentElement);
        assert_eq!(segment.children[0].text_or_empty(), "]");
        assert_eq!(segment.children[2].kind, NodeKind::Slope);
        assert_eq!(segment.children[3].children[0].text_or_empty(), "+inf");
        assert_eq!(segment.children[4].text_or_empty(), "[");
    }

    #[test]
    fn test_parse_segment_without_slope() {
        let expr = parse_expr("uaf([(0, 0) (1, -1/2)], [(1, 1) (+inf, 1)[)");
        assert_eq!(expr.children.len(), 2);
        assert_eq!(expr.children[0].children.len(), 4);
        assert_eq!(expr.children[0].children[2].children[1].text_or_empty(), "-1/2");
    }

    #[test]
    fn test_parse_upp_full() {
        let expr = parse_expr("upp([0, 0], period([(0, 0) (1, 1)[), 1, 1)");
        assert_eq!(expr.kind, NodeKind::UltimatelyPseudoPeriodic);
        let kinds: Vec<_> = expr.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Transient, NodeKind::Period, NodeKind::Increment, NodeKind::PeriodLength]
        );
    }

    #[test]
    fn test_parse_upp_period_only() {
        let expr = parse_expr("upp(period([0, 0] ](0, 0) (2, 0)[))");
        assert_eq!(expr.children.len(), 1);
        assert_eq!(expr.children[0].kind, NodeKind::Period);
        assert_eq!(expr.children[0].children.len(), 2);
    }

    #[test]
    fn test_segment_requires_closing_bracket() {
        let cst = crate::parse("uaf([(0, 0) (1, 1))");
        assert!(!cst.is_ok());
        assert!(cst.errors[0].rule_stack.iter().any(|r| r == "segment"));
    }
}
