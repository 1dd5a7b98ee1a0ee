//! # Curves
//!
//! An ultimately pseudo-periodic (UPP) piecewise-affine function over
//! `t ≥ 0`, stored as a base [`Sequence`] over `[0, T + D)` plus the
//! pseudo-period triple:
//!
//! - `T`: start of the periodic part,
//! - `D`: period length,
//! - `C`: per-period increment,
//!
//! so that `f(t + k·D) = f(t) + k·C` for every `t ≥ T` and `k ≥ 0`.
//!
//! ## Example
//!
//! ```rust
//! use nc_curves::{Curve, Rational};
//!
//! let q = Rational::from_integer;
//! let beta = Curve::rate_latency(q(3), q(2)).unwrap();
//! assert_eq!(beta.value_at(&q(1)).unwrap(), q(0));
//! assert_eq!(beta.value_at(&q(10)).unwrap(), q(24));
//! ```

mod constructors;

#[cfg(test)]
mod tests;

use crate::element::Element;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;
use crate::sequence::Sequence;
use std::fmt;

/// An ultimately pseudo-periodic curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    base: Sequence,
    pseudo_period_start: Rational,
    pseudo_period_length: Rational,
    pseudo_period_height: Rational,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl Curve {
    /// Build a curve from a base sequence over `[0, T + D)`.
    ///
    /// ## Errors
    ///
    /// `InvalidPeriod` when `T < 0`, `D ≤ 0`, any parameter is infinite, or
    /// the base window is not `[0, T + D)`.
    pub fn new(
        base: Sequence,
        pseudo_period_start: Rational,
        pseudo_period_length: Rational,
        pseudo_period_height: Rational,
    ) -> CurveResult<Self> {
        if pseudo_period_start.is_infinite() || pseudo_period_start.is_negative() {
            return Err(CurveError::period(format!(
                "start {} must be finite and non-negative",
                pseudo_period_start
            )));
        }
        if pseudo_period_length.is_infinite() || !pseudo_period_length.is_positive() {
            return Err(CurveError::period(format!(
                "length {} must be finite and positive",
                pseudo_period_length
            )));
        }
        if pseudo_period_height.is_infinite() {
            return Err(CurveError::period("height must be finite"));
        }
        let end = &pseudo_period_start + &pseudo_period_length;
        if !base.start().is_zero() || *base.end() != end {
            return Err(CurveError::period(format!(
                "base sequence covers [{}, {}) instead of [0, {})",
                base.start(),
                base.end(),
                end
            )));
        }

        Ok(Self {
            base: base.with_breakpoint(&pseudo_period_start),
            pseudo_period_start,
            pseudo_period_length,
            pseudo_period_height,
        })
    }

    /// Build a curve from ordered elements covering `[0, T + D)`; gaps are `+inf`.
    pub fn from_elements(
        elements: impl IntoIterator<Item = Element>,
        pseudo_period_start: Rational,
        pseudo_period_length: Rational,
        pseudo_period_height: Rational,
    ) -> CurveResult<Self> {
        let end = &pseudo_period_start + &pseudo_period_length;
        let base = Sequence::fill(elements, Rational::zero(), end)?;
        Self::new(
            base,
            pseudo_period_start,
            pseudo_period_length,
            pseudo_period_height,
        )
    }

    /// Merge collinear pieces of the base sequence.
    pub fn optimized(&self) -> Curve {
        Curve {
            base: self.base.optimize().with_breakpoint(&self.pseudo_period_start),
            ..self.clone()
        }
    }
}

// =============================================================================
// ACCESSORS
// =============================================================================

impl Curve {
    /// Base sequence over `[0, T + D)`.
    pub fn base(&self) -> &Sequence {
        &self.base
    }

    /// `T`.
    pub fn pseudo_period_start(&self) -> &Rational {
        &self.pseudo_period_start
    }

    /// `D`.
    pub fn pseudo_period_length(&self) -> &Rational {
        &self.pseudo_period_length
    }

    /// `C`.
    pub fn pseudo_period_height(&self) -> &Rational {
        &self.pseudo_period_height
    }

    /// End of the first period, `T + D`.
    pub fn first_period_end(&self) -> Rational {
        &self.pseudo_period_start + &self.pseudo_period_length
    }

    /// The transient part over `[0, T)`.
    pub fn transient(&self) -> CurveResult<Sequence> {
        self.base.cut(&Rational::zero(), &self.pseudo_period_start)
    }

    /// The first period over `[T, T + D)`.
    pub fn period(&self) -> CurveResult<Sequence> {
        self.base
            .cut(&self.pseudo_period_start, &self.first_period_end())
    }

    fn period_values_all(&self, predicate: impl Fn(&Rational) -> bool) -> bool {
        self.base
            .elements()
            .iter()
            .filter(|e| *e.start() >= self.pseudo_period_start)
            .all(|e| predicate(e.first_value()))
    }

    /// True when the curve is `+inf` from `T` on.
    pub fn is_ultimately_plus_infinite(&self) -> bool {
        self.period_values_all(Rational::is_plus_infinity)
    }

    /// True when the curve is `-inf` from `T` on.
    pub fn is_ultimately_minus_infinite(&self) -> bool {
        self.period_values_all(Rational::is_minus_infinity)
    }

    pub fn is_ultimately_infinite(&self) -> bool {
        self.is_ultimately_plus_infinite() || self.is_ultimately_minus_infinite()
    }

    /// Long-run slope `C / D`; `None` for ultimately infinite curves.
    pub fn rate(&self) -> Option<Rational> {
        if self.is_ultimately_infinite() {
            return None;
        }
        self.pseudo_period_height
            .checked_div(&self.pseudo_period_length)
    }

    /// True when the curve never decreases.
    pub fn is_non_decreasing(&self) -> bool {
        if !self.is_ultimately_infinite() && self.pseudo_period_height.is_negative() {
            return false;
        }
        let Ok(two_periods) = self.extend_to(&(&self.first_period_end() + &self.pseudo_period_length))
        else {
            return false;
        };
        two_periods.is_non_decreasing()
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

impl Curve {
    /// The curve as a sequence over `[0, end)`, unrolling periods as needed.
    pub fn extend_to(&self, end: &Rational) -> CurveResult<Sequence> {
        let first_end = self.first_period_end();
        if *end <= first_end {
            return self.base.cut(&Rational::zero(), end);
        }
        if end.is_infinite() {
            return Err(CurveError::OutOfDomain { time: end.clone() });
        }

        let period = self.period()?;
        let mut elements = self.base.elements().to_vec();
        let mut covered = first_end;
        let mut k = Rational::one();
        while covered < *end {
            let dt = &k * &self.pseudo_period_length;
            let dv = &k * &self.pseudo_period_height;
            elements.extend(period.elements().iter().map(|e| e.shift(&dt, &dv)));
            covered = &covered + &self.pseudo_period_length;
            k = &k + &Rational::one();
        }
        Sequence::from_canonical(elements, Rational::zero(), covered).cut(&Rational::zero(), end)
    }

    fn check_time(time: &Rational) -> CurveResult<()> {
        if time.is_infinite() || time.is_negative() {
            return Err(CurveError::OutOfDomain { time: time.clone() });
        }
        Ok(())
    }

    /// Number of whole periods to fold `time` back into `[T, T + D)`.
    fn periods_before(&self, time: &Rational) -> CurveResult<Rational> {
        let offset = (time - &self.pseudo_period_start).try_div(&self.pseudo_period_length)?;
        Ok(offset.floor())
    }

    /// `f(time)`.
    pub fn value_at(&self, time: &Rational) -> CurveResult<Rational> {
        Self::check_time(time)?;
        let k = if *time < self.first_period_end() {
            Rational::zero()
        } else {
            self.periods_before(time)?
        };
        let folded = time - &(&k * &self.pseudo_period_length);
        let value = self
            .base
            .value_at(&folded)
            .ok_or(CurveError::OutOfDomain { time: time.clone() })?;
        Ok(&value + &(&k * &self.pseudo_period_height))
    }

    /// `f(time+)`.
    pub fn right_limit_at(&self, time: &Rational) -> CurveResult<Rational> {
        Self::check_time(time)?;
        let k = if *time < self.first_period_end() {
            Rational::zero()
        } else {
            self.periods_before(time)?
        };
        let folded = time - &(&k * &self.pseudo_period_length);
        let value = self
            .base
            .right_limit_at(&folded)
            .ok_or(CurveError::OutOfDomain { time: time.clone() })?;
        Ok(&value + &(&k * &self.pseudo_period_height))
    }

    /// `f(time-)`, defined for `time > 0`.
    pub fn left_limit_at(&self, time: &Rational) -> CurveResult<Rational> {
        Self::check_time(time)?;
        if time.is_zero() {
            return Err(CurveError::OutOfDomain { time: time.clone() });
        }
        let k = if *time <= self.first_period_end() {
            Rational::zero()
        } else {
            let offset = (time - &self.pseudo_period_start).try_div(&self.pseudo_period_length)?;
            &offset.ceil() - &Rational::one()
        };
        let folded = time - &(&k * &self.pseudo_period_length);
        let value = self
            .base
            .left_limit_at(&folded)
            .ok_or(CurveError::OutOfDomain { time: time.clone() })?;
        Ok(&value + &(&k * &self.pseudo_period_height))
    }

    /// Bounds `(lower, upper)` of `f(t) - rate·t` over the first period.
    ///
    /// Infinite when the period holds infinite values.
    pub(crate) fn affine_bounds(&self, rate: &Rational) -> CurveResult<(Rational, Rational)> {
        let period = self.period()?;
        let mut lower = Rational::PlusInfinity;
        let mut upper = Rational::MinusInfinity;
        for element in period.elements() {
            let first = element.first_value() - &(rate * element.start());
            let last = &element.last_value() - &(rate * element.end());
            for value in [first, last] {
                if value < lower {
                    lower = value.clone();
                }
                if value > upper {
                    upper = value;
                }
            }
        }
        Ok((lower, upper))
    }
}

impl fmt::Display for Curve {
    /// Prints the curve as an MPPG `upp(...)` literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let curve = self.optimized();
        let period = curve.period().map_err(|_| fmt::Error)?;
        write!(f, "upp(")?;
        if curve.pseudo_period_start.is_positive() {
            let transient = curve.transient().map_err(|_| fmt::Error)?;
            write!(f, "{}, ", transient)?;
        }
        write!(
            f,
            "period({}), {}, {})",
            period, curve.pseudo_period_height, curve.pseudo_period_length
        )
    }
}
