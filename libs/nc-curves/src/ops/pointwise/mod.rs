//! # Pointwise Operators
//!
//! Minimum, maximum, addition, subtraction, scaling and the comparisons
//! built on them.
//!
//! Curves with the same long-run rate are combined on the common window
//! `[0, max(Tf, Tg) + lcm(Df, Dg))`. For different rates, the minimum ends up
//! following the slower curve and the maximum the faster one; the start of
//! the result's periodic part is pushed past the point where the affine
//! bounds of the two periods guarantee that ordering.
//!
//! The slower curve may have `+inf` holes in its period (pulse trains) as
//! long as the faster curve is `+inf` there too.

#[cfg(test)]
mod tests;

use super::{common_length, height_over, max_of, same_rate, shared_period};
use crate::curve::Curve;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lattice {
    Meet,
    Join,
}

impl Lattice {
    fn name(self) -> &'static str {
        match self {
            Self::Meet => "minimum",
            Self::Join => "maximum",
        }
    }
}

impl Curve {
    /// Pointwise minimum `f ∧ g`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let f = Curve::affine(q(1), q(0)).unwrap();
    /// let g = Curve::constant(q(3));
    /// let m = f.minimum(&g).unwrap();
    /// assert_eq!(m.value_at(&q(1)).unwrap(), q(1));
    /// assert_eq!(m.value_at(&q(10)).unwrap(), q(3));
    /// ```
    pub fn minimum(&self, other: &Curve) -> CurveResult<Curve> {
        self.lattice(other, Lattice::Meet)
    }

    /// Pointwise maximum `f ∨ g`.
    pub fn maximum(&self, other: &Curve) -> CurveResult<Curve> {
        self.lattice(other, Lattice::Join)
    }

    fn lattice(&self, other: &Curve, kind: Lattice) -> CurveResult<Curve> {
        let operation = kind.name();
        let (start, length, height) = if same_rate(self, other) {
            shared_period(operation, self, other)?
        } else {
            self.crossing_period(other, kind)?
        };

        let end = &start + &length;
        let a = self.extend_to(&end)?;
        let b = other.extend_to(&end)?;
        let base = match kind {
            Lattice::Meet => a.minimum(&b),
            Lattice::Join => a.maximum(&b),
        };
        Curve::new(base, start, length, height)
    }

    /// Pseudo-period of `f ∧ g` or `f ∨ g` when the rates differ.
    fn crossing_period(&self, other: &Curve, kind: Lattice) -> CurveResult<(Rational, Rational, Rational)> {
        let operation = kind.name();
        let (Some(self_rate), Some(other_rate)) = (self.rate(), other.rate()) else {
            return Err(CurveError::unsupported(operation, "rates are undefined"));
        };
        let (slow, slow_rate, fast, fast_rate) = if self_rate < other_rate {
            (self, self_rate, other, other_rate)
        } else {
            (other, other_rate, self, self_rate)
        };

        let (fast_lower, _) = fast.affine_bounds(&fast_rate)?;
        if fast_lower.is_infinite() {
            return Err(CurveError::unsupported(
                operation,
                "the faster curve takes the value -inf in its period",
            ));
        }
        if fills_holes(operation, slow, fast)? {
            return Err(CurveError::unsupported(
                operation,
                "periods mixing finite and infinite values at different rates",
            ));
        }

        // slow(t) ≤ fast(t) wherever slow is finite, from here on
        let base_start = max_of(self.pseudo_period_start(), other.pseudo_period_start());
        let start = match finite_upper_bound(slow, &slow_rate)? {
            Some(slow_upper) => {
                let crossing = (&slow_upper - &fast_lower).try_div(&(&fast_rate - &slow_rate))?;
                max_of(&base_start, &crossing)
            }
            None => base_start,
        };
        let winner = match kind {
            Lattice::Meet => slow,
            Lattice::Join => fast,
        };
        Ok((
            start,
            winner.pseudo_period_length().clone(),
            winner.pseudo_period_height().clone(),
        ))
    }

    /// Pointwise combination of two curves of any rates: the result repeats
    /// with `lcm(Df, Dg)` from `max(Tf, Tg)`.
    pub(crate) fn combine(
        &self,
        other: &Curve,
        operation: &'static str,
        value: impl Fn(&Rational, &Rational) -> Rational,
        slope: impl Fn(&Rational, &Rational) -> Rational,
    ) -> CurveResult<Curve> {
        let length = common_length(
            operation,
            self.pseudo_period_length(),
            other.pseudo_period_length(),
        )?;
        let start = max_of(self.pseudo_period_start(), other.pseudo_period_start());
        let end = &start + &length;
        let a = self.extend_to(&end)?;
        let b = other.extend_to(&end)?;
        let base = a.zip_with(&b, &value, slope)?;
        let height = value(&height_over(self, &length)?, &height_over(other, &length)?);
        // infinite tails carry no increment
        let height = if height.is_finite() { height } else { Rational::zero() };
        Curve::new(base, start, length, height)
    }

    /// Pointwise sum `f + g`; `+inf` absorbs.
    pub fn addition(&self, other: &Curve) -> CurveResult<Curve> {
        self.combine(other, "addition", |a, b| a + b, |a, b| a + b)
    }

    /// Pointwise difference `f − g`, computed as `f + (−g)`.
    pub fn subtraction(&self, other: &Curve) -> CurveResult<Curve> {
        self.combine(other, "subtraction", |a, b| a - b, |a, b| a - b)
    }

    /// Multiply every value by a finite `factor`.
    pub fn scale(&self, factor: &Rational) -> CurveResult<Curve> {
        if factor.is_infinite() {
            return Err(CurveError::argument("scale", "factor must be finite"));
        }
        Curve::new(
            self.base().scale(factor),
            self.pseudo_period_start().clone(),
            self.pseudo_period_length().clone(),
            self.pseudo_period_height() * factor,
        )
    }

    /// `−f`.
    pub fn negate(&self) -> CurveResult<Curve> {
        self.scale(&Rational::from_integer(-1))
    }

    /// True when both curves are the same function.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let stair = Curve::stair(q(0), q(1), q(1)).unwrap();
    /// let doubled = Curve::stair(q(0), q(2), q(2)).unwrap();
    /// assert!(!stair.equivalent(&doubled));
    /// assert!(Curve::zero().equivalent(&Curve::affine(q(0), q(0)).unwrap()));
    /// ```
    pub fn equivalent(&self, other: &Curve) -> bool {
        if !same_rate(self, other) {
            return false;
        }
        let Ok((start, length, _)) = shared_period("equivalent", self, other) else {
            return false;
        };
        let end = &start + &length;
        match (self.extend_to(&end), other.extend_to(&end)) {
            (Ok(a), Ok(b)) => a.equivalent(&b),
            _ => false,
        }
    }

    /// True when `f(t) ≤ g(t)` for every `t ≥ 0`.
    ///
    /// Operand pairs whose minimum is unsupported compare as `false`.
    pub fn less_or_equal(&self, other: &Curve) -> bool {
        match self.minimum(other) {
            Ok(meet) => meet.equivalent(self),
            Err(_) => false,
        }
    }
}

/// Minimum of several partial results; `+inf` for none.
///
/// Parts are met slowest rate first, so that the holes of a slow pulse
/// train are filled by its same-rate partners before a faster part arrives.
pub(crate) fn meet_all(mut parts: Vec<Curve>) -> CurveResult<Curve> {
    parts.sort_by(|a, b| a.rate().cmp(&b.rate()));
    let mut parts = parts.into_iter();
    let Some(first) = parts.next() else {
        return Ok(Curve::plus_infinity());
    };
    parts.try_fold(first, |acc, part| acc.minimum(&part))
}

/// True when `fast` is finite somewhere `slow` is `+inf`, past both
/// pseudo-period starts. Both hole patterns repeat over `lcm(Ds, Df)`.
fn fills_holes(operation: &'static str, slow: &Curve, fast: &Curve) -> CurveResult<bool> {
    let length = common_length(
        operation,
        slow.pseudo_period_length(),
        fast.pseudo_period_length(),
    )?;
    let start = max_of(slow.pseudo_period_start(), fast.pseudo_period_start());
    let end = &start + &length;
    let a = slow.extend_to(&end)?.cut(&start, &end)?;
    let b = fast.extend_to(&end)?.cut(&start, &end)?;
    let marks = a.zip_with(
        &b,
        |x, y| {
            if x.is_plus_infinity() && !y.is_plus_infinity() {
                Rational::MinusInfinity
            } else {
                Rational::zero()
            }
        },
        |_, _| Rational::zero(),
    )?;
    Ok(marks.infimum().is_minus_infinity())
}

/// Upper bound of `f(t) - rate·t` over the finite values of the first
/// period; `None` when the period has no finite value.
fn finite_upper_bound(curve: &Curve, rate: &Rational) -> CurveResult<Option<Rational>> {
    let mut upper: Option<Rational> = None;
    for element in curve.period()?.elements() {
        if element.first_value().is_infinite() {
            continue;
        }
        let first = element.first_value() - &(rate * element.start());
        let last = &element.last_value() - &(rate * element.end());
        for value in [first, last] {
            if upper.as_ref().map_or(true, |u| value > *u) {
                upper = Some(value);
            }
        }
    }
    Ok(upper)
}
