//! # Composition
//!
//! `(f ∘ g)(t) = f(g(t))` for a non-decreasing, non-negative inner curve `g`.
//!
//! Once `g` has carried its argument past `Tf`, a period of `g` that raises
//! the argument by `Cg` and a period of `f` of length `Df` line up every
//! `lcm(Cg, Df)` units of argument. The result then repeats with
//! `lcm(Cg, Df)/Cg` periods of `g`, rising by `lcm(Cg, Df)/Df` periods of `f`.

#[cfg(test)]
mod tests;

use super::common_length;
use crate::curve::Curve;
use crate::element::Element;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;
use crate::sequence::Sequence;
use tracing::debug;

impl Curve {
    /// `f(g(t))` with `self` as `f` and `inner` as `g`.
    ///
    /// ## Errors
    ///
    /// `NotNonDecreasing` when `g` decreases somewhere, `InvalidArgument`
    /// when `g(0) < 0`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let f = Curve::rate_latency(q(2), q(1)).unwrap();
    /// let g = Curve::affine(q(3), q(0)).unwrap();
    /// let h = f.composition(&g).unwrap();
    /// assert_eq!(h.value_at(&q(2)).unwrap(), q(10));
    /// ```
    pub fn composition(&self, inner: &Curve) -> CurveResult<Curve> {
        if !inner.is_non_decreasing() {
            return Err(CurveError::NotNonDecreasing {
                operation: "composition",
            });
        }
        if inner.value_at(&Rational::zero())?.is_negative() {
            return Err(CurveError::argument(
                "composition",
                "inner curve must be non-negative",
            ));
        }

        let (start, length, height) = self.composition_period(inner)?;
        debug!(start = %start, length = %length, height = %height, "composition pseudo-period");
        let end = &start + &length;
        let g = inner.extend_to(&end)?;

        let reach = g.supremum();
        let f_end = if reach.is_finite() {
            (&reach + &Rational::one()).max(self.first_period_end())
        } else {
            self.first_period_end()
        };
        let f = self.extend_to(&f_end)?;

        let mut pieces = Vec::new();
        for element in g.elements() {
            map_element(element, &f, &mut pieces)?;
        }
        let base = Sequence::fill(pieces, Rational::zero(), end)?;
        Ok(Curve::new(base, start, length, height)?.optimized())
    }

    fn composition_period(&self, inner: &Curve) -> CurveResult<(Rational, Rational, Rational)> {
        let inner_start = inner.pseudo_period_start().clone();
        let inner_length = inner.pseudo_period_length().clone();
        let inner_height = inner.pseudo_period_height();
        if inner.is_ultimately_plus_infinite() || inner_height.is_zero() {
            return Ok((inner_start, inner_length, Rational::zero()));
        }

        let at_start = inner.value_at(&inner_start)?;
        let missing = (self.pseudo_period_start() - &at_start).try_div(inner_height)?;
        let periods = missing.ceil().max(Rational::zero());
        let start = &inner_start + &(&periods * &inner_length);

        let lcm = common_length("composition", inner_height, self.pseudo_period_length())?;
        let length = &lcm.try_div(inner_height)? * &inner_length;
        let height = &lcm.try_div(self.pseudo_period_length())? * self.pseudo_period_height();
        Ok((start, length, height))
    }
}

/// `f` at the argument `x`; `f(+inf) = +inf`.
fn outer_value(f: &Sequence, x: &Rational) -> CurveResult<Rational> {
    if x.is_plus_infinity() {
        return Ok(Rational::PlusInfinity);
    }
    f.value_at(x)
        .ok_or_else(|| CurveError::OutOfDomain { time: x.clone() })
}

/// Image of one element of `g` under `f`.
fn map_element(element: &Element, f: &Sequence, out: &mut Vec<Element>) -> CurveResult<()> {
    match element {
        Element::Point { time, value } => {
            out.push(Element::point(time.clone(), outer_value(f, value)?));
        }
        Element::Segment {
            start,
            end,
            start_value,
            slope,
        } => {
            if start_value.is_infinite() || !slope.is_positive() {
                let value = outer_value(f, start_value)?;
                out.push(Element::flat(start.clone(), end.clone(), value));
                return Ok(());
            }

            let to = element.last_value();
            let time_of = |x: &Rational| -> CurveResult<Rational> {
                Ok(start + &(x - start_value).try_div(slope)?)
            };
            for piece in f.elements() {
                match piece {
                    Element::Point { time: x, value } => {
                        if x > start_value && *x < to {
                            out.push(Element::point(time_of(x)?, value.clone()));
                        }
                    }
                    Element::Segment {
                        start: x1,
                        end: x2,
                        slope: m,
                        ..
                    } => {
                        let lo = x1.max(start_value);
                        let hi = x2.min(&to);
                        if lo >= hi {
                            continue;
                        }
                        out.push(Element::segment(
                            time_of(lo)?,
                            time_of(hi)?,
                            piece.line_at(lo),
                            m * slope,
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}
