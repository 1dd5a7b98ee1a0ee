//! # Ultimately-Affine Literals
//!
//! `uaf(...)` lists elements whose last one is a segment reaching `+inf`.
//! The tail is cut to a finite segment whose last unit is the pseudo-period:
//!
//! - **point-affine** tail (a point on the tail line precedes it): one unit,
//!   so the period starts at the tail start;
//! - otherwise the tail starts with a jump and keeps two units, so the period
//!   starts one unit after the discontinuity.

use crate::error::{EvalError, EvalResult};
use config::constants::{UAF_JUMP_TAIL_LENGTH, UAF_POINT_AFFINE_TAIL_LENGTH};
use nc_curves::{Curve, Element, Rational};
use tracing::trace;

/// Build a curve from the elements of a `uaf(...)` literal.
///
/// ## Example
///
/// ```rust
/// use mppg_eval::constructor::ultimately_affine;
/// use nc_curves::{Curve, Element, Rational};
///
/// let q = Rational::from_integer;
/// let elements = vec![
///     Element::point(q(0), q(0)),
///     Element::segment(q(0), Rational::PlusInfinity, q(4), q(1)),
/// ];
/// let bucket = ultimately_affine(elements).unwrap();
/// assert!(bucket.equivalent(&Curve::token_bucket(q(1), q(4)).unwrap()));
/// ```
pub fn ultimately_affine(elements: Vec<Element>) -> EvalResult<Curve> {
    if elements.len() < 2 {
        return Err(EvalError::literal("uaf needs at least two elements"));
    }
    let mut body = elements;
    let tail = match body.pop() {
        Some(Element::Segment {
            start,
            end,
            start_value,
            slope,
        }) if end.is_plus_infinity() => (start, start_value, slope),
        _ => {
            return Err(EvalError::literal(
                "the last element of uaf must be a segment reaching +inf",
            ))
        }
    };
    if body.iter().any(|e| e.end().is_infinite()) {
        return Err(EvalError::literal(
            "only the last element of uaf may reach +inf",
        ));
    }

    let (start, start_value, slope) = tail;
    let point_affine = matches!(
        body.last(),
        Some(Element::Point { time, value }) if *time == start && *value == start_value
    );
    let tail_length = Rational::from_integer(if point_affine {
        UAF_POINT_AFFINE_TAIL_LENGTH
    } else {
        UAF_JUMP_TAIL_LENGTH
    });
    let length = Rational::one();
    let tail_end = &start + &tail_length;
    let pseudo_period_start = &tail_end - &length;
    let height = &slope * &length;
    trace!(%pseudo_period_start, %slope, point_affine, "normalized uaf tail");

    body.push(Element::segment(start, tail_end, start_value, slope));
    let curve = Curve::from_elements(body, pseudo_period_start, length, height)?;
    if !is_ultimately_affine(&curve)? {
        return Err(EvalError::literal(
            "the curve is neither ultimately affine nor ultimately infinite",
        ));
    }
    Ok(curve)
}

/// Whether one period is a single point followed by a segment on its line.
fn is_ultimately_affine(curve: &Curve) -> EvalResult<bool> {
    if curve.is_ultimately_infinite() {
        return Ok(true);
    }
    let period = curve.period()?;
    Ok(match period.elements() {
        [Element::Point { value, .. }, segment @ Element::Segment { .. }] => {
            *value == *segment.first_value()
                && &segment.slope() * curve.pseudo_period_length() == *curve.pseudo_period_height()
        }
        _ => false,
    })
}
