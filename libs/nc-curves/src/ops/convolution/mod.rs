//! # Convolution
//!
//! `(f ⊗ g)(t) = inf { f(s) + g(t − s) : 0 ≤ s ≤ t }`.
//!
//! Each operand is split into its transient part (values on `[0, T)`, `+inf`
//! after) and its periodic part (`+inf` before `T`). The result is the
//! minimum of the four cross convolutions:
//!
//! | Part | Pseudo-period of the result |
//! |------|-----------------------------|
//! | transient ⊗ transient | `+inf` from `Tf + Tg` |
//! | transient ⊗ periodic | the periodic operand's, from `Tf + Tg` |
//! | periodic ⊗ periodic | the slower operand's, from `Tf + Tg + lcm(Df, Dg)` |
//!
//! For the periodic ⊗ periodic part, any split `s ≥ To + lcm` can be moved
//! back by one `lcm` without increasing the sum when `o` is the faster
//! operand, so the infimum only needs splits in `[To, To + lcm)`.
//!
//! Every part is computed exactly on its window as the lower envelope of the
//! elementwise convolutions of the two element lists.


use super::pointwise::meet_all;
use super::common_length;
use crate::curve::Curve;
use crate::element::Element;
use crate::error::CurveResult;
use crate::rational::Rational;
use crate::sequence::Sequence;
use tracing::debug;

/// Which slope goes first when two segments are convolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlopeOrder {
    /// (min,+): the smaller slope first.
    Ascending,
    /// (max,+): the larger slope first.
    Descending,
}

/// Elementary convolution of two elements.
///
/// `add` combines the two values and may drop the pair entirely by
/// returning `None`.
pub(crate) fn convolve_elements(
    a: &Element,
    b: &Element,
    order: SlopeOrder,
    add: &impl Fn(&Rational, &Rational) -> Option<Rational>,
    out: &mut Vec<Element>,
) {
    let Some(value) = add(a.first_value(), b.first_value()) else {
        return;
    };
    match (a, b) {
        (Element::Point { time: t1, .. }, Element::Point { time: t2, .. }) => {
            out.push(Element::point(t1 + t2, value));
        }
        (Element::Point { time, .. }, segment @ Element::Segment { .. })
        | (segment @ Element::Segment { .. }, Element::Point { time, .. }) => {
            out.push(Element::segment(
                segment.start() + time,
                segment.end() + time,
                value,
                segment.slope(),
            ));
        }
        (Element::Segment { .. }, Element::Segment { .. }) => {
            let start = a.start() + b.start();
            let end = a.end() + b.end();
            if value.is_infinite() {
                out.push(Element::flat(start, end, value));
                return;
            }
            let a_first = match order {
                SlopeOrder::Ascending => a.slope() <= b.slope(),
                SlopeOrder::Descending => a.slope() >= b.slope(),
            };
            let (first, second) = if a_first { (a, b) } else { (b, a) };
            let first_length = first.end() - first.start();
            let middle = &start + &first_length;
            let middle_value = &value + &(&first.slope() * &first_length);
            out.push(Element::segment(start, middle.clone(), value, first.slope()));
            out.push(Element::point(middle.clone(), middle_value.clone()));
            out.push(Element::segment(middle, end, middle_value, second.slope()));
        }
    }
}

/// Elementwise (min,+) convolution of two element lists, keeping only pairs
/// that start before `horizon`.
pub(crate) fn convolve_lists(a: &[Element], b: &[Element], horizon: &Rational) -> Vec<Element> {
    let add = |x: &Rational, y: &Rational| {
        if x.is_plus_infinity() || y.is_plus_infinity() {
            None
        } else {
            Some(x + y)
        }
    };
    let mut out = Vec::new();
    for x in a.iter().filter(|e| !e.first_value().is_plus_infinity()) {
        for y in b {
            if &(x.start() + y.start()) >= horizon {
                break;
            }
            convolve_elements(x, y, SlopeOrder::Ascending, &add, &mut out);
        }
    }
    out
}

impl Curve {
    /// (min,+) convolution `f ⊗ g`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let a = Curve::rate_latency(q(3), q(1)).unwrap();
    /// let b = Curve::rate_latency(q(2), q(2)).unwrap();
    /// let c = a.convolution(&b).unwrap();
    /// assert!(c.equivalent(&Curve::rate_latency(q(2), q(3)).unwrap()));
    /// ```
    pub fn convolution(&self, other: &Curve) -> CurveResult<Curve> {
        let parts = vec![
            transient_transient(self, other)?,
            transient_periodic(self, other)?,
            transient_periodic(other, self)?,
            periodic_periodic(self, other)?,
        ];
        let result = meet_all(parts)?.optimized();
        debug!(
            start = %result.pseudo_period_start(),
            length = %result.pseudo_period_length(),
            height = %result.pseudo_period_height(),
            "convolution pseudo-period"
        );
        Ok(result)
    }

    /// (max,+) convolution, `−((−f) ⊗ (−g))`.
    pub fn max_plus_convolution(&self, other: &Curve) -> CurveResult<Curve> {
        self.negate()?.convolution(&other.negate()?)?.negate()
    }

    /// The elements of `[T, end)`.
    fn periodic_part(&self, end: &Rational) -> CurveResult<Sequence> {
        self.extend_to(end)?.cut(self.pseudo_period_start(), end)
    }
}

/// A curve that is `+inf` from `start` on, built from pieces on `[0, start)`.
fn finite_support(pieces: Vec<Element>, start: Rational) -> CurveResult<Curve> {
    let one = Rational::one();
    let base = Sequence::lower_envelope(pieces, Rational::zero(), &start + &one);
    Curve::new(base, start, one, Rational::zero())
}

fn transient_transient(f: &Curve, g: &Curve) -> CurveResult<Curve> {
    if f.pseudo_period_start().is_zero() || g.pseudo_period_start().is_zero() {
        return Ok(Curve::plus_infinity());
    }
    let horizon = f.pseudo_period_start() + g.pseudo_period_start();
    let pieces = convolve_lists(
        f.transient()?.elements(),
        g.transient()?.elements(),
        &horizon,
    );
    finite_support(pieces, horizon)
}

fn transient_periodic(f: &Curve, g: &Curve) -> CurveResult<Curve> {
    if f.pseudo_period_start().is_zero() || g.is_ultimately_plus_infinite() {
        return Ok(Curve::plus_infinity());
    }
    let start = f.pseudo_period_start() + g.pseudo_period_start();
    let end = &start + g.pseudo_period_length();
    let pieces = convolve_lists(
        f.transient()?.elements(),
        g.periodic_part(&end)?.elements(),
        &end,
    );
    let base = Sequence::lower_envelope(pieces, Rational::zero(), end);
    Curve::new(
        base,
        start,
        g.pseudo_period_length().clone(),
        g.pseudo_period_height().clone(),
    )
}

fn periodic_periodic(f: &Curve, g: &Curve) -> CurveResult<Curve> {
    if f.is_ultimately_plus_infinite() || g.is_ultimately_plus_infinite() {
        return Ok(Curve::plus_infinity());
    }
    let both_starts = f.pseudo_period_start() + g.pseudo_period_start();

    let (start, length, height) = if f.is_ultimately_minus_infinite() {
        (
            &both_starts + g.pseudo_period_length(),
            g.pseudo_period_length().clone(),
            Rational::zero(),
        )
    } else if g.is_ultimately_minus_infinite() {
        (
            &both_starts + f.pseudo_period_length(),
            f.pseudo_period_length().clone(),
            Rational::zero(),
        )
    } else {
        let slow = match (f.rate(), g.rate()) {
            (Some(a), Some(b)) if b < a => g,
            _ => f,
        };
        let lcm = common_length(
            "convolution",
            f.pseudo_period_length(),
            g.pseudo_period_length(),
        )?;
        (
            &both_starts + &lcm,
            slow.pseudo_period_length().clone(),
            slow.pseudo_period_height().clone(),
        )
    };

    let end = &start + &length;
    let pieces = convolve_lists(
        f.periodic_part(&end)?.elements(),
        g.periodic_part(&end)?.elements(),
        &end,
    );
    let base = Sequence::lower_envelope(pieces, Rational::zero(), end);
    Curve::new(base, start, length, height)
}
