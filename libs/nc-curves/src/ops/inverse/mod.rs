//! # Pseudo-inverses
//!
//! For a non-decreasing `f`:
//!
//! - lower pseudo-inverse `f↓(x) = inf { t ≥ 0 : f(t) ≥ x }`,
//! - upper pseudo-inverse `f↑(x) = inf { t ≥ 0 : f(t) > x }`,
//!
//! with `inf ∅ = +inf`. Both swap the roles of the pseudo-period: the result
//! repeats every `C` of argument with an increment of `D`.


use super::max_of;
use crate::curve::Curve;
use crate::element::Element;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;
use crate::sequence::Sequence;
use std::collections::BTreeSet;
use tracing::debug;

/// Which pseudo-inverse: `≥` for the lower one, `>` for the upper one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    AtLeast,
    Above,
}

impl Reach {
    fn holds(self, value: &Rational, x: &Rational) -> bool {
        match self {
            Self::AtLeast => value >= x,
            Self::Above => value > x,
        }
    }

    fn operation(self) -> &'static str {
        match self {
            Self::AtLeast => "lower pseudo-inverse",
            Self::Above => "upper pseudo-inverse",
        }
    }
}

impl Curve {
    /// Lower pseudo-inverse `f↓`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let beta = Curve::rate_latency(q(2), q(3)).unwrap();
    /// let inverse = beta.lower_pseudo_inverse().unwrap();
    /// assert_eq!(inverse.value_at(&q(0)).unwrap(), q(0));
    /// assert_eq!(inverse.value_at(&q(4)).unwrap(), q(5));
    /// ```
    pub fn lower_pseudo_inverse(&self) -> CurveResult<Curve> {
        self.pseudo_inverse(Reach::AtLeast)
    }

    /// Upper pseudo-inverse `f↑`.
    pub fn upper_pseudo_inverse(&self) -> CurveResult<Curve> {
        self.pseudo_inverse(Reach::Above)
    }

    fn pseudo_inverse(&self, reach: Reach) -> CurveResult<Curve> {
        if !self.is_non_decreasing() {
            return Err(CurveError::NotNonDecreasing {
                operation: reach.operation(),
            });
        }
        if self.is_ultimately_minus_infinite() {
            return Ok(Curve::plus_infinity());
        }

        let zero = Rational::zero();
        let one = Rational::one();
        let height = self.pseudo_period_height();
        let (start, length, increment, horizon) =
            if self.is_ultimately_plus_infinite() || height.is_zero() {
                // the tail never goes above its last finite level
                let level = self
                    .base()
                    .elements()
                    .iter()
                    .flat_map(|e| [e.first_value().clone(), e.last_value()])
                    .filter(Rational::is_finite)
                    .max()
                    .unwrap_or_else(Rational::zero);
                let start = &max_of(&level, &zero) + &one;
                (start, one.clone(), zero.clone(), self.first_period_end())
            } else {
                let at_start = self.value_at(self.pseudo_period_start())?;
                let start = max_of(&(&at_start + height), &zero);
                let needed = (&(&start + height) - &at_start).try_div(height)?;
                let periods = &needed.ceil() + &Rational::from_integer(2);
                let horizon = self.pseudo_period_start()
                    + &(&periods * self.pseudo_period_length());
                (
                    start,
                    height.clone(),
                    self.pseudo_period_length().clone(),
                    horizon,
                )
            };
        let end = &start + &length;
        debug!(start = %start, length = %length, "{}", reach.operation());

        let f = self.extend_to(&horizon)?;
        let mut arguments: BTreeSet<Rational> = BTreeSet::new();
        arguments.insert(zero.clone());
        arguments.insert(end.clone());
        for element in f.elements() {
            for value in [element.first_value().clone(), element.last_value()] {
                if value.is_finite() && value > zero && value < end {
                    arguments.insert(value);
                }
            }
        }
        let arguments: Vec<Rational> = arguments.into_iter().collect();

        let two = Rational::from_integer(2);
        let mut pieces = Vec::with_capacity(2 * arguments.len());
        for pair in arguments.windows(2) {
            let (x0, x1) = (&pair[0], &pair[1]);
            let (at, _) = first_reach(&f, x0, reach)?;
            pieces.push(Element::point(x0.clone(), at));

            let middle = (x0 + x1).try_div(&two)?;
            let (at, slope) = first_reach(&f, &middle, reach)?;
            let right_limit = &at - &(&slope * &(&middle - x0));
            pieces.push(Element::segment(x0.clone(), x1.clone(), right_limit, slope));
        }

        let base = Sequence::fill(pieces, zero, end)?;
        Ok(Curve::new(base, start, length, increment)?.optimized())
    }
}

/// First time `f` reaches `x`, with the local slope of the inverse there.
fn first_reach(f: &Sequence, x: &Rational, reach: Reach) -> CurveResult<(Rational, Rational)> {
    for element in f.elements() {
        match element {
            Element::Point { time, value } => {
                if reach.holds(value, x) {
                    return Ok((time.clone(), Rational::zero()));
                }
            }
            Element::Segment {
                start,
                end,
                start_value,
                slope,
            } => {
                if reach.holds(start_value, x) {
                    return Ok((start.clone(), Rational::zero()));
                }
                if slope.is_positive() && start_value.is_finite() {
                    let crossing = start + &(x - start_value).try_div(slope)?;
                    if crossing < *end {
                        return Ok((crossing, Rational::one().try_div(slope)?));
                    }
                }
            }
        }
    }
    Ok((Rational::PlusInfinity, Rational::zero()))
}
