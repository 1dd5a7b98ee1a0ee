//! # Segment Validation
//!
//! A segment literal names both endpoints, their openness and optionally a
//! slope. The slope is inferred or checked against the endpoints, then the
//! segment expands into elements: closed endpoints add an adjacent point.

use crate::error::{EvalError, EvalResult};
use crate::literal::Endpoint;
use nc_curves::{Element, Rational};
use std::fmt;

/// Closedness of the two ends of a segment literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Openness {
    ClosedClosed,
    ClosedOpen,
    OpenClosed,
    OpenOpen,
}

impl Openness {
    pub fn new(left_closed: bool, right_closed: bool) -> Self {
        match (left_closed, right_closed) {
            (true, true) => Self::ClosedClosed,
            (true, false) => Self::ClosedOpen,
            (false, true) => Self::OpenClosed,
            (false, false) => Self::OpenOpen,
        }
    }

    pub fn left_closed(self) -> bool {
        matches!(self, Self::ClosedClosed | Self::ClosedOpen)
    }

    pub fn right_closed(self) -> bool {
        matches!(self, Self::ClosedClosed | Self::OpenClosed)
    }
}

/// A segment as written in a curve literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpec {
    pub left: Endpoint,
    pub right: Endpoint,
    pub slope: Option<Rational>,
    pub openness: Openness,
}

impl SegmentSpec {
    fn error(&self, reason: &str) -> EvalError {
        EvalError::InvalidSegment {
            segment: self.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The validated slope: inferred when omitted, checked when given.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use mppg_eval::constructor::{Openness, SegmentSpec};
    /// use mppg_eval::literal::Endpoint;
    /// use nc_curves::Rational;
    ///
    /// let q = Rational::from_integer;
    /// let segment = SegmentSpec {
    ///     left: Endpoint::new(q(0), q(1)),
    ///     right: Endpoint::new(q(4), q(3)),
    ///     slope: None,
    ///     openness: Openness::ClosedOpen,
    /// };
    /// assert_eq!(segment.slope().unwrap(), Rational::new(1, 2).unwrap());
    /// ```
    pub fn slope(&self) -> EvalResult<Rational> {
        let (left, right) = (&self.left, &self.right);
        if left.time.is_infinite() {
            return Err(self.error("the left endpoint cannot be at an infinite time"));
        }
        if self.slope.as_ref().is_some_and(Rational::is_infinite) {
            return Err(self.error("the slope must be finite"));
        }
        if right.time <= left.time {
            return Err(self.error("the segment is empty"));
        }
        if right.time.is_plus_infinity() && self.openness.right_closed() {
            return Err(self.error("a closed right endpoint cannot be at +inf"));
        }

        if left.value.is_infinite() {
            if right.value != left.value {
                return Err(self.error("an infinite segment must keep the same value"));
            }
            return match &self.slope {
                Some(slope) if !slope.is_zero() => {
                    Err(self.error("slope does not match endpoints"))
                }
                _ => Ok(Rational::zero()),
            };
        }

        if right.time.is_plus_infinity() {
            return match &self.slope {
                None if right.value == left.value => Ok(Rational::zero()),
                None => Err(self.error("cannot infer slope")),
                Some(slope) => {
                    let agrees = if slope.is_positive() {
                        right.value.is_plus_infinity()
                    } else if slope.is_negative() {
                        right.value.is_minus_infinity()
                    } else {
                        right.value == left.value
                    };
                    if agrees {
                        Ok(slope.clone())
                    } else {
                        Err(self.error("the slope disagrees with the value at +inf"))
                    }
                }
            };
        }

        if right.value.is_infinite() {
            return Err(self.error("an infinite segment must keep the same value"));
        }
        let rise = &right.value - &left.value;
        let run = &right.time - &left.time;
        let computed = rise
            .checked_div(&run)
            .ok_or_else(|| self.error("the segment is empty"))?;
        match &self.slope {
            Some(slope) if *slope != computed => Err(self.error("slope does not match endpoints")),
            _ => Ok(computed),
        }
    }

    /// Expand into elements, in time order.
    pub fn to_elements(&self) -> EvalResult<Vec<Element>> {
        let slope = self.slope()?;
        let mut elements = Vec::with_capacity(3);
        if self.openness.left_closed() {
            elements.push(Element::point(self.left.time.clone(), self.left.value.clone()));
        }
        elements.push(Element::segment(
            self.left.time.clone(),
            self.right.time.clone(),
            self.left.value.clone(),
            slope,
        ));
        if self.openness.right_closed() {
            elements.push(Element::point(self.right.time.clone(), self.right.value.clone()));
        }
        Ok(elements)
    }
}

impl fmt::Display for SegmentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.openness.left_closed() { "[" } else { "]" };
        let close = if self.openness.right_closed() { "]" } else { "[" };
        write!(f, "{}{} ", open, self.left)?;
        if let Some(slope) = &self.slope {
            write!(f, "{} ", slope)?;
        }
        write!(f, "{}{}", self.right, close)
    }
}
