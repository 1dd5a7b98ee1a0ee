//! # Projections
//!
//! Continuity projections, which replace every point by a one-sided limit,
//! and the non-decreasing closure `f↑(t) = sup { f(s) : s ≤ t }`.

#[cfg(test)]
mod tests;

use super::max_of;
use crate::curve::Curve;
use crate::element::Element;
use crate::error::CurveResult;
use crate::rational::Rational;
use crate::sequence::Sequence;

impl Curve {
    /// Right-continuous version: every value replaced by its right limit.
    pub fn to_right_continuous(&self) -> CurveResult<Curve> {
        let elements = self.base().elements();
        let mut out = Vec::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            match (element, elements.get(i + 1)) {
                (Element::Point { time, .. }, Some(next)) => {
                    out.push(Element::point(time.clone(), next.first_value().clone()));
                }
                _ => out.push(element.clone()),
            }
        }
        let base = Sequence::fill(out, Rational::zero(), self.first_period_end())?;
        Ok(Curve::new(
            base,
            self.pseudo_period_start().clone(),
            self.pseudo_period_length().clone(),
            self.pseudo_period_height().clone(),
        )?
        .optimized())
    }

    /// Left-continuous version: every value at `t > 0` replaced by its left
    /// limit. The value at 0 is kept, so the periodic part starts one period
    /// later.
    pub fn to_left_continuous(&self) -> CurveResult<Curve> {
        let start = self.first_period_end();
        let end = &start + self.pseudo_period_length();
        let sequence = self.extend_to(&end)?;
        let elements = sequence.elements();

        let mut out = Vec::with_capacity(elements.len());
        let mut previous: Option<&Element> = None;
        for element in elements {
            match (element, previous) {
                (Element::Point { time, .. }, Some(before)) => {
                    out.push(Element::point(time.clone(), before.last_value()));
                }
                _ => out.push(element.clone()),
            }
            previous = Some(element);
        }
        let base = Sequence::fill(out, Rational::zero(), end)?;
        Ok(Curve::new(
            base,
            start,
            self.pseudo_period_length().clone(),
            self.pseudo_period_height().clone(),
        )?
        .optimized())
    }

    /// Non-decreasing closure `sup { f(s) : 0 ≤ s ≤ t }`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let falling = Curve::affine(q(-1), q(4)).unwrap();
    /// let closure = falling.to_upper_non_decreasing().unwrap();
    /// assert!(closure.equivalent(&Curve::constant(q(4))));
    /// ```
    pub fn to_upper_non_decreasing(&self) -> CurveResult<Curve> {
        let length = self.pseudo_period_length().clone();
        let height = self.pseudo_period_height();
        let settles = self.base().supremum().is_plus_infinity()
            || self.is_ultimately_minus_infinite()
            || !height.is_positive();

        let (start, increment) = if settles {
            (self.first_period_end(), Rational::zero())
        } else {
            // the running maximum follows the periods once one of them
            // overtakes the transient
            let before = self.transient()?.supremum();
            let peak = self.period()?.supremum();
            let needed = (&before - &peak).try_div(height)?;
            let periods = max_of(&Rational::one(), &(&needed.ceil() + &Rational::one()));
            (
                self.pseudo_period_start() + &(&periods * &length),
                height.clone(),
            )
        };

        let end = &start + &length;
        let base = running_max(&self.extend_to(&end)?)?;
        Ok(Curve::new(base, start, length, increment)?.optimized())
    }

    /// `max(f↑, 0)`.
    pub fn to_non_negative_upper_non_decreasing(&self) -> CurveResult<Curve> {
        self.to_upper_non_decreasing()?.maximum(&Curve::zero())
    }
}

/// Running supremum of a sequence from its start.
fn running_max(sequence: &Sequence) -> CurveResult<Sequence> {
    let mut level = Rational::MinusInfinity;
    let mut out = Vec::with_capacity(sequence.elements().len());

    for element in sequence.elements() {
        match element {
            Element::Point { time, value } => {
                level = max_of(&level, value);
                out.push(Element::point(time.clone(), level.clone()));
            }
            Element::Segment {
                start,
                end,
                start_value,
                slope,
            } => {
                if start_value.is_infinite() || !slope.is_positive() {
                    level = max_of(&level, start_value);
                    out.push(Element::flat(start.clone(), end.clone(), level.clone()));
                    continue;
                }
                if level <= *start_value {
                    out.push(element.clone());
                } else {
                    let crossing = start + &(&level - start_value).try_div(slope)?;
                    if crossing >= *end {
                        out.push(Element::flat(start.clone(), end.clone(), level.clone()));
                        continue;
                    }
                    out.push(Element::flat(start.clone(), crossing.clone(), level.clone()));
                    out.push(Element::point(crossing.clone(), level.clone()));
                    out.push(Element::segment(crossing, end.clone(), level.clone(), slope.clone()));
                }
                level = element.last_value();
            }
        }
    }

    Ok(Sequence::from_canonical(
        out,
        sequence.start().clone(),
        sequence.end().clone(),
    ))
}
