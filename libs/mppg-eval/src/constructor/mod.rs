//! # Curve Constructor
//!
//! Turns the point and segment descriptions of `uaf(...)` and `upp(...)`
//! literals into validated, normalized curves.
//!
//! ## Module Structure
//!
//! - `segment` - slope inference and checks, openness, expansion to elements
//! - `affine` - ultimately-affine tail normalization
//! - `periodic` - transient, period shape and increment of `upp` literals
//!
//! ## Example
//!
//! ```rust
//! use mppg_eval::constructor::curve_literal;
//! use nc_curves::{Curve, Rational};
//!
//! let cst = mppg_parser::parse("uaf([0, 0] ](0, 0) (2, 0)] ](2, 0) 1 (+inf, +inf)[)");
//! let literal = &cst.root.children[0].children[0];
//! let curve = curve_literal(literal).unwrap();
//! let q = Rational::from_integer;
//! assert!(curve.equivalent(&Curve::rate_latency(q(1), q(2)).unwrap()));
//! ```

mod affine;
mod periodic;
mod segment;


pub use affine::ultimately_affine;
pub use periodic::PeriodicLiteral;
pub use segment::{Openness, SegmentSpec};

use crate::error::{EvalError, EvalResult};
use crate::literal::{number_child, Endpoint};
use mppg_parser::{CstNode, NodeKind};
use nc_curves::{Curve, Element};

// =============================================================================
// ELEMENT DESCRIPTIONS
// =============================================================================

/// One element of a curve literal, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSpec {
    Point(Endpoint),
    Segment(SegmentSpec),
}

impl ElementSpec {
    /// Read a `PointElement` or `SegmentElement` node.
    pub fn from_node(node: &CstNode) -> EvalResult<Self> {
        match node.kind {
            NodeKind::PointElement => Ok(Self::Point(Endpoint::from_node(node)?)),
            NodeKind::SegmentElement => segment_from_node(node).map(Self::Segment),
            other => Err(EvalError::malformed(format!(
                "expected a point or a segment, found {:?}",
                other
            ))),
        }
    }

    /// Validate and expand into elements.
    pub fn into_elements(self) -> EvalResult<Vec<Element>> {
        match self {
            Self::Point(point) if point.time.is_infinite() => Err(EvalError::literal(format!(
                "point {} is at an infinite time",
                point
            ))),
            Self::Point(point) => Ok(vec![Element::point(point.time, point.value)]),
            Self::Segment(segment) => segment.to_elements(),
        }
    }
}

/// Children: bracket, endpoint, optional slope, endpoint, bracket.
fn segment_from_node(node: &CstNode) -> EvalResult<SegmentSpec> {
    let brackets = node.find_children(NodeKind::Bracket);
    let endpoints = node.find_children(NodeKind::Endpoint);
    let ([open, close], [left, right]) = (brackets.as_slice(), endpoints.as_slice()) else {
        return Err(EvalError::malformed("a segment needs two brackets and two endpoints"));
    };
    let slope = node
        .find_child(NodeKind::Slope)
        .map(|slope| number_child(slope, 0))
        .transpose()?;

    Ok(SegmentSpec {
        left: Endpoint::from_node(left)?,
        right: Endpoint::from_node(right)?,
        slope,
        openness: Openness::new(open.text_or_empty() == "[", close.text_or_empty() == "]"),
    })
}

/// Validate and expand a list of element nodes, in order.
pub fn elements(nodes: &[CstNode]) -> EvalResult<Vec<Element>> {
    let mut elements = Vec::with_capacity(nodes.len() * 2);
    for node in nodes {
        elements.extend(ElementSpec::from_node(node)?.into_elements()?);
    }
    Ok(elements)
}

// =============================================================================
// CURVE LITERALS
// =============================================================================

/// Build the curve denoted by an `UltimatelyAffine` or
/// `UltimatelyPseudoPeriodic` node.
pub fn curve_literal(node: &CstNode) -> EvalResult<Curve> {
    match node.kind {
        NodeKind::UltimatelyAffine => ultimately_affine(elements(&node.children)?),
        NodeKind::UltimatelyPseudoPeriodic => periodic_literal(node)?.build(),
        other => Err(EvalError::malformed(format!(
            "expected a curve literal, found {:?}",
            other
        ))),
    }
}

fn periodic_literal(node: &CstNode) -> EvalResult<PeriodicLiteral> {
    let mut literal = PeriodicLiteral::default();
    for child in &node.children {
        match child.kind {
            NodeKind::Transient => literal.transient = elements(&child.children)?,
            NodeKind::Period => literal.period = elements(&child.children)?,
            NodeKind::Increment => literal.increment = Some(number_child(child, 0)?),
            NodeKind::PeriodLength => literal.length = Some(number_child(child, 0)?),
            other => {
                return Err(EvalError::malformed(format!(
                    "unexpected {:?} in upp literal",
                    other
                )))
            }
        }
    }
    Ok(literal)
}
