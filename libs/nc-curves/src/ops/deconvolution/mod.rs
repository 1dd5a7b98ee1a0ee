//! # Deconvolution
//!
//! `(f ⊘ g)(t) = sup { f(t + u) − g(u) : u ≥ 0 }`.
//!
//! The result keeps the pseudo-period of `f`. Over one window
//! `[0, Tf + Df)` it is the upper envelope of the elementwise (max,+)
//! convolution of `f` with the reflection `u ↦ −g(−u)`, once the range of
//! useful `u` is bounded:
//!
//! - `ρf > ρg`: the supremum diverges, the result is `+inf`;
//! - `ρf = ρg`: shifting `u` by `lcm(Df, Dg)` past `max(Tf, Tg)` changes
//!   nothing, so `u < max(Tf, Tg) + lcm` suffices;
//! - `ρf < ρg`: the affine bounds of both periods give a horizon after which
//!   every term is below the one at `u = Tf + Tg`.
//!
//! Terms follow `+inf − +inf = +inf`: a `+inf` of `g` never contributes, a
//! `+inf` of `f` does.


use super::common_length;
use super::convolution::{convolve_elements, SlopeOrder};
use crate::curve::Curve;
use crate::element::Element;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;
use crate::sequence::Sequence;
use tracing::debug;

impl Curve {
    /// (min,+) deconvolution `f ⊘ g`.
    ///
    /// ## Errors
    ///
    /// `Unsupported` when `g` grows faster than `f` but one of the periods
    /// mixes finite and infinite values.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let alpha = Curve::token_bucket(q(1), q(2)).unwrap();
    /// let beta = Curve::rate_latency(q(3), q(4)).unwrap();
    /// let output = alpha.deconvolution(&beta).unwrap();
    /// assert_eq!(output.value_at(&q(0)).unwrap(), q(6));
    /// ```
    pub fn deconvolution(&self, other: &Curve) -> CurveResult<Curve> {
        let Some(horizon) = self.deconvolution_horizon(other)? else {
            return Ok(Curve::plus_infinity());
        };
        debug!(horizon = %horizon, "deconvolution range");

        let window = self.first_period_end();
        let reach = &horizon + other.pseudo_period_length();
        let f = self.extend_to(&(&window + &reach))?;
        let g: Vec<Element> = other
            .extend_to(&reach)?
            .elements()
            .iter()
            .map(Element::reflect)
            .collect();

        let term = |a: &Rational, reflected: &Rational| {
            if reflected.is_minus_infinity() {
                None
            } else if a.is_plus_infinity() || reflected.is_plus_infinity() {
                Some(Rational::PlusInfinity)
            } else if a.is_minus_infinity() {
                None
            } else {
                Some(a + reflected)
            }
        };
        let mut pieces = Vec::new();
        for x in f.elements() {
            for y in &g {
                convolve_elements(x, y, SlopeOrder::Descending, &term, &mut pieces);
            }
        }

        let base = Sequence::upper_envelope(pieces, Rational::zero(), window);
        Ok(Curve::new(
            base,
            self.pseudo_period_start().clone(),
            self.pseudo_period_length().clone(),
            self.pseudo_period_height().clone(),
        )?
        .optimized())
    }

    /// (max,+) deconvolution, `−((−f) ⊘ (−g))`.
    pub fn max_plus_deconvolution(&self, other: &Curve) -> CurveResult<Curve> {
        self.negate()?.deconvolution(&other.negate()?)?.negate()
    }

    /// Bound on the useful shifts `u`; `None` when the result is `+inf`
    /// everywhere.
    fn deconvolution_horizon(&self, other: &Curve) -> CurveResult<Option<Rational>> {
        let (f, g) = (self, other);
        if g.is_ultimately_plus_infinite() {
            return Ok(Some(g.pseudo_period_start().clone()));
        }
        if g.is_ultimately_minus_infinite() || f.is_ultimately_plus_infinite() {
            return Ok(None);
        }
        if f.is_ultimately_minus_infinite() {
            return Ok(Some(f.pseudo_period_start() + &Rational::one()));
        }

        let (Some(f_rate), Some(g_rate)) = (f.rate(), g.rate()) else {
            return Err(CurveError::unsupported("deconvolution", "rates are undefined"));
        };
        if f_rate > g_rate {
            return Ok(None);
        }
        if f_rate == g_rate {
            let starts = f.pseudo_period_start().max(g.pseudo_period_start()).clone();
            let lcm = common_length(
                "deconvolution",
                f.pseudo_period_length(),
                g.pseudo_period_length(),
            )?;
            return Ok(Some(&starts + &lcm));
        }

        let (f_lower, f_upper) = f.affine_bounds(&f_rate)?;
        let (g_lower, g_upper) = g.affine_bounds(&g_rate)?;
        let spread = &(&f_upper - &f_lower) + &(&g_upper - &g_lower);
        if spread.is_infinite() {
            return Err(CurveError::unsupported(
                "deconvolution",
                "periods mixing finite and infinite values at different rates",
            ));
        }
        let both_starts = f.pseudo_period_start() + g.pseudo_period_start();
        let extra = spread.try_div(&(&g_rate - &f_rate))?;
        Ok(Some(&both_starts + &extra))
    }
}
