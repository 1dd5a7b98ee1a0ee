//! # Curve Operators
//!
//! Every operator is an inherent method on [`Curve`] returning a
//! [`CurveResult`].
//!
//! ## Module Structure
//!
//! - `pointwise` - minimum, maximum, addition, subtraction, scaling, comparisons
//! - `convolution` - (min,+) and (max,+) convolution
//! - `deconvolution` - (min,+) and (max,+) deconvolution
//! - `closure` - sub-additive closure
//! - `composition` - `f(g(t))`
//! - `inverse` - lower and upper pseudo-inverses
//! - `projection` - continuity projections and non-decreasing closures
//! - `shift` - horizontal and vertical shifts
//! - `deviation` - horizontal and vertical deviations

mod closure;
mod composition;
mod convolution;
mod deconvolution;
mod deviation;
mod inverse;
mod pointwise;
mod projection;
mod shift;

use crate::curve::Curve;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;

/// True when both tails grow at the same long-run rate. An ultimately
/// infinite tail repeats with any pseudo-period, so it matches every rate.
pub(crate) fn same_rate(f: &Curve, g: &Curve) -> bool {
    match (f.rate(), g.rate()) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// `(T, D, C)` shared by two curves with the same rate: the later start, the
/// common period length and the increment over that length.
pub(crate) fn shared_period(
    operation: &'static str,
    f: &Curve,
    g: &Curve,
) -> CurveResult<(Rational, Rational, Rational)> {
    let length = common_length(operation, f.pseudo_period_length(), g.pseudo_period_length())?;
    let reference = if f.is_ultimately_infinite() { g } else { f };
    let height = height_over(reference, &length)?;
    let start = max_of(f.pseudo_period_start(), g.pseudo_period_start());
    Ok((start, length, height))
}

/// Least common multiple of two period lengths.
pub(crate) fn common_length(operation: &'static str, a: &Rational, b: &Rational) -> CurveResult<Rational> {
    a.lcm(b).ok_or_else(|| {
        CurveError::unsupported(operation, format!("no common period for {} and {}", a, b))
    })
}

/// The larger of two rationals.
pub(crate) fn max_of(a: &Rational, b: &Rational) -> Rational {
    a.max(b).clone()
}

/// Increment accumulated over `length` by a curve repeating every `D` with `C`.
pub(crate) fn height_over(curve: &Curve, length: &Rational) -> CurveResult<Rational> {
    let periods = length.try_div(curve.pseudo_period_length())?;
    Ok(&periods * curve.pseudo_period_height())
}
