//! # Sub-additive Closure
//!
//! `f* = δ0 ∧ f ∧ (f ⊗ f) ∧ (f ⊗ f ⊗ f) ∧ …`
//!
//! A curve is the minimum of its elements, and the closure of a minimum is
//! the convolution of the closures, so `f*` is the convolution of one
//! factor per element:
//!
//! - a transient element `e` contributes `e*`;
//! - a period element `e` stands for the whole train `e, e + (D, C), …`,
//!   whose closure is `δ0 ∧ (p* ⊗ e ⊗ e*)` with `p` the point `(D, C)`.
//!
//! The closure of a single element is itself ultimately pseudo-periodic and
//! is built directly.

#[cfg(test)]
mod tests;

use crate::curve::Curve;
use crate::element::Element;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;
use crate::sequence::Sequence;
use tracing::debug;

impl Curve {
    /// Sub-additive closure `f*`.
    ///
    /// ## Errors
    ///
    /// `DivergentClosure` when `f(0) < 0`, when `f` takes the value `-inf`, or
    /// when `f` is negative right after 0.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let beta = Curve::rate_latency(q(2), q(1)).unwrap();
    /// let closure = beta.subadditive_closure().unwrap();
    /// assert!(closure.equivalent(&Curve::zero()));
    /// ```
    pub fn subadditive_closure(&self) -> CurveResult<Curve> {
        if self.value_at(&Rational::zero())?.is_negative() {
            return Err(CurveError::DivergentClosure {
                reason: "f(0) is negative".to_string(),
            });
        }
        if self.base().infimum().is_minus_infinity() {
            return Err(CurveError::DivergentClosure {
                reason: "f takes the value -inf".to_string(),
            });
        }

        let mut factors = Vec::new();
        for element in self.transient()?.elements() {
            if !element.first_value().is_plus_infinity() {
                factors.push(element_closure(element)?);
            }
        }

        let train = point_train(
            self.pseudo_period_length().clone(),
            self.pseudo_period_height().clone(),
        )?;
        for element in self.period()?.elements() {
            if element.first_value().is_plus_infinity() {
                continue;
            }
            let repeated = train
                .convolution(&isolated(element)?)?
                .convolution(&element_closure(element)?)?;
            factors.push(Curve::delta_zero().minimum(&repeated)?);
        }
        debug!(factors = factors.len(), "closure factors");

        let closure = factors
            .iter()
            .try_fold(Curve::delta_zero(), |acc, factor| acc.convolution(factor))?;
        Ok(closure.optimized())
    }
}

/// `0` at every multiple of `length`, rising by `height` per step, `+inf`
/// elsewhere.
fn point_train(length: Rational, height: Rational) -> CurveResult<Curve> {
    let zero = Rational::zero();
    Curve::from_elements(
        vec![
            Element::point(zero.clone(), zero.clone()),
            Element::flat(zero.clone(), length.clone(), Rational::PlusInfinity),
        ],
        zero,
        length,
        height,
    )
}

/// The element alone: `+inf` everywhere else.
fn isolated(element: &Element) -> CurveResult<Curve> {
    let start = element.end() + &Rational::one();
    Curve::from_elements(
        vec![element.clone()],
        start,
        Rational::one(),
        Rational::zero(),
    )
}

/// Closure of a single finite element.
fn element_closure(element: &Element) -> CurveResult<Curve> {
    match element {
        Element::Point { time, value } => {
            if value.is_plus_infinity() || time.is_zero() {
                return Ok(Curve::delta_zero());
            }
            point_train(time.clone(), value.clone())
        }
        Element::Segment {
            start,
            end,
            start_value,
            slope,
        } => {
            if start_value.is_plus_infinity() {
                return Ok(Curve::delta_zero());
            }
            let negative_at_zero =
                start_value.is_negative() || (start_value.is_zero() && slope.is_negative());
            if start.is_zero() && negative_at_zero {
                return Err(CurveError::DivergentClosure {
                    reason: "f is negative right after 0".to_string(),
                });
            }
            segment_closure(start, end, start_value, slope)
        }
    }
}

/// Closure of the segment `(a, b)` with right limit `v` at `a` and slope `k`.
///
/// The `n`-fold self-convolution is the segment `(n·a, n·b)` with the same
/// slope. Once these overlap, the envelope repeats either with the lower
/// line (`v − k·a ≥ 0`, one step per `b`) or with the start points
/// (one step per `a`).
fn segment_closure(
    a: &Rational,
    b: &Rational,
    v: &Rational,
    k: &Rational,
) -> CurveResult<Curve> {
    let width = b - a;
    let overlap_from = if a.is_zero() {
        Rational::one()
    } else {
        &a.try_div(&width)?.floor() + &Rational::one()
    };
    let intercept = v - &(k * a);

    let (start, length, height) = if !intercept.is_negative() {
        (&overlap_from * b, b.clone(), &intercept + &(k * b))
    } else {
        (
            &(&overlap_from + &Rational::one()) * a,
            a.clone(),
            v.clone(),
        )
    };
    let end = &start + &length;

    let one = Rational::one();
    // copies that reach into the window; with a = 0 they all start at 0
    let reaches_window = |n: &Rational| {
        if a.is_positive() {
            &(n * a) < &end
        } else {
            &(&(n - &one) * b) < &end
        }
    };
    let mut pieces = vec![Element::point(Rational::zero(), Rational::zero())];
    let mut n = Rational::one();
    while reaches_window(&n) {
        pieces.push(Element::segment(&n * a, &n * b, &n * v, k.clone()));
        n = &n + &one;
    }
    debug!(copies = %(&n - &one), "segment closure copies");

    let base = Sequence::lower_envelope(pieces, Rational::zero(), end.clone());
    Curve::new(base, start, length, height)
}
