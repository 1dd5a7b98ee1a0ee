//! # Deviations
//!
//! Delay and backlog bounds between an arrival curve `f` and a service
//! curve `g`:
//!
//! - `hdev(f, g) = sup_t inf { d ≥ 0 : f(t) ≤ g(t + d) }`, computed as
//!   `sup_x (g↓(x) − f↓(x))` on the lower pseudo-inverses;
//! - `vdev(f, g) = sup_t (f(t) − g(t))`.
//!
//! In both differences an infinite subtrahend wins: where `f` never reaches
//! `x` the term does not count, and where `g` is `+inf` nothing is backlogged.


use super::max_of;
use crate::curve::Curve;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;
use tracing::debug;

/// `a − b` where `b = +inf` yields `-inf` before `a = +inf` yields `+inf`.
fn excess(a: &Rational, b: &Rational) -> Rational {
    if b.is_plus_infinity() {
        Rational::MinusInfinity
    } else if a.is_plus_infinity() {
        Rational::PlusInfinity
    } else {
        a - b
    }
}

impl Curve {
    /// Supremum over `t ≥ 0`, including one-sided limits.
    pub fn supremum(&self) -> Rational {
        let over_base = self.base().supremum();
        if over_base.is_plus_infinity() {
            return over_base;
        }
        if self.pseudo_period_height().is_positive() && !self.is_ultimately_minus_infinite() {
            return Rational::PlusInfinity;
        }
        over_base
    }

    /// Infimum over `t ≥ 0`, including one-sided limits.
    pub fn infimum(&self) -> Rational {
        let over_base = self.base().infimum();
        if over_base.is_minus_infinity() {
            return over_base;
        }
        if self.pseudo_period_height().is_negative() && !self.is_ultimately_plus_infinite() {
            return Rational::MinusInfinity;
        }
        over_base
    }

    /// Horizontal deviation, the worst-case delay of `self` through `service`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let alpha = Curve::token_bucket(q(1), q(4)).unwrap();
    /// let beta = Curve::rate_latency(q(2), q(3)).unwrap();
    /// assert_eq!(alpha.horizontal_deviation(&beta).unwrap(), q(5));
    /// ```
    pub fn horizontal_deviation(&self, service: &Curve) -> CurveResult<Rational> {
        for curve in [self, service] {
            if !curve.is_non_decreasing() {
                return Err(CurveError::NotNonDecreasing { operation: "hdev" });
            }
        }
        let arrival_inverse = self.lower_pseudo_inverse()?;
        let service_inverse = service.lower_pseudo_inverse()?;
        let delays = service_inverse.combine(&arrival_inverse, "hdev", excess, |a, b| a - b)?;
        let delay = max_of(&delays.supremum(), &Rational::zero());
        debug!(delay = %delay, "horizontal deviation");
        Ok(delay)
    }

    /// Vertical deviation, the worst-case backlog of `self` against `service`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let alpha = Curve::token_bucket(q(1), q(4)).unwrap();
    /// let beta = Curve::rate_latency(q(2), q(3)).unwrap();
    /// assert_eq!(alpha.vertical_deviation(&beta).unwrap(), q(7));
    /// ```
    pub fn vertical_deviation(&self, service: &Curve) -> CurveResult<Rational> {
        let backlogs = self.combine(service, "vdev", excess, |a, b| a - b)?;
        let backlog = backlogs.supremum();
        debug!(backlog = %backlog, "vertical deviation");
        Ok(backlog)
    }
}
