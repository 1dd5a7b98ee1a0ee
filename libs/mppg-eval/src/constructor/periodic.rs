//! # Ultimately Pseudo-Periodic Literals
//!
//! `upp([transient,] period(elements) [, increment [, length]])`.
//!
//! The period list either starts with a point and ends with an open segment
//! (`[p0, p1)`, canonical), or starts with an open segment and ends with a
//! point (`(p0, p1]`). The second shape is rotated into the first: its first
//! segment, shifted by one period, closes the period, and the pseudo-period
//! starts where that segment ended.

use crate::error::{EvalError, EvalResult};
use nc_curves::{Curve, Element, Rational};
use tracing::debug;

/// Parts of a `upp(...)` literal, as expanded elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodicLiteral {
    pub transient: Vec<Element>,
    pub period: Vec<Element>,
    pub increment: Option<Rational>,
    /// Restated period length; informational only.
    pub length: Option<Rational>,
}

/// Openness of a whole period list.
enum PeriodShape<'a> {
    ClosedOpen {
        first: &'a Rational,
        end: &'a Element,
    },
    OpenClosed {
        first: &'a Element,
        end: &'a Rational,
    },
}

impl<'a> PeriodShape<'a> {
    fn of(period: &'a [Element]) -> EvalResult<Self> {
        match (period.first(), period.last()) {
            (Some(Element::Point { value, .. }), Some(end @ Element::Segment { .. })) => {
                Ok(Self::ClosedOpen { first: value, end })
            }
            (Some(first @ Element::Segment { .. }), Some(Element::Point { value, .. })) => {
                Ok(Self::OpenClosed { first, end: value })
            }
            _ => Err(EvalError::literal(
                "the period must be left-closed and right-open, or left-open and right-closed",
            )),
        }
    }
}

impl PeriodicLiteral {
    /// Normalize and build the curve.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use mppg_eval::constructor::PeriodicLiteral;
    /// use nc_curves::{Curve, Element, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let literal = PeriodicLiteral {
    ///     period: vec![Element::point(q(0), q(0)), Element::flat(q(0), q(1), q(1))],
    ///     ..PeriodicLiteral::default()
    /// };
    /// let stair = literal.build().unwrap();
    /// assert!(stair.equivalent(&Curve::stair(q(0), q(1), q(1)).unwrap()));
    /// ```
    pub fn build(self) -> EvalResult<Curve> {
        reject_infinite(&self.transient)?;
        reject_infinite(&self.period)?;

        let (Some(period_first), Some(period_last)) = (self.period.first(), self.period.last())
        else {
            return Err(EvalError::literal("the period is empty"));
        };
        let period_start = period_first.start().clone();
        let length = period_last.end() - &period_start;
        if !length.is_positive() {
            return Err(EvalError::literal("the period is empty"));
        }
        if let Some(restated) = &self.length {
            if *restated != length {
                debug!(%restated, %length, "restated period length differs from the elements");
            }
        }

        let shape = PeriodShape::of(&self.period)?;
        let height = match (&self.increment, &shape) {
            (Some(increment), _) => increment.clone(),
            (None, PeriodShape::ClosedOpen { first, end }) => end.last_value() - (*first).clone(),
            (None, PeriodShape::OpenClosed { first, end }) => {
                (*end).clone() - first.first_value().clone()
            }
        };
        if height.is_infinite() {
            return Err(EvalError::literal("the period increment must be finite"));
        }

        let (pseudo_period_start, wrap) = match shape {
            PeriodShape::ClosedOpen { .. } => (period_start, None),
            PeriodShape::OpenClosed { first, .. } => {
                (first.end().clone(), Some(first.shift(&length, &height)))
            }
        };

        let mut elements = self.transient;
        elements.extend(self.period);
        elements.extend(wrap);
        let curve = Curve::from_elements(elements, pseudo_period_start, length, height)?;
        Ok(curve)
    }
}

/// Reject infinite times, values and slopes.
fn reject_infinite(elements: &[Element]) -> EvalResult<()> {
    let finite = elements.iter().all(|element| match element {
        Element::Point { time, value } => time.is_finite() && value.is_finite(),
        Element::Segment {
            start,
            end,
            start_value,
            slope,
        } => start.is_finite() && end.is_finite() && start_value.is_finite() && slope.is_finite(),
    });
    if finite {
        Ok(())
    } else {
        Err(EvalError::literal("upp elements must be finite"))
    }
}
