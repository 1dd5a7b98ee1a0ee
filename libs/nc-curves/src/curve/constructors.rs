//! # Named Curves
//!
//! The usual network-calculus shapes.
//!
//! | Constructor | Shape |
//! |-------------|-------|
//! | `rate_latency(r, l)` | `r·(t − l)⁺` |
//! | `token_bucket(r, b)` | 0 at 0, `b + r·t` after |
//! | `affine(r, b)` | `b + r·t` |
//! | `step(o, h)` | 0 for `t ≤ o`, `h` after |
//! | `stair(o, l, h)` | 0 for `t ≤ o`, `h·⌈(t − o)/l⌉` after |
//! | `delay(d)` | 0 for `t ≤ d`, `+inf` after |

use super::Curve;
use crate::element::Element;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;

fn require_finite(operation: &'static str, name: &str, value: &Rational) -> CurveResult<()> {
    if value.is_infinite() {
        return Err(CurveError::argument(
            operation,
            format!("{} must be finite, got {}", name, value),
        ));
    }
    Ok(())
}

fn require_non_negative(operation: &'static str, name: &str, value: &Rational) -> CurveResult<()> {
    require_finite(operation, name, value)?;
    if value.is_negative() {
        return Err(CurveError::argument(
            operation,
            format!("{} must be non-negative, got {}", name, value),
        ));
    }
    Ok(())
}

impl Curve {
    /// The constant curve `value` (which may be infinite).
    pub fn constant(value: Rational) -> Curve {
        let zero = Rational::zero();
        let one = Rational::one();
        Curve {
            base: crate::sequence::Sequence::constant(zero.clone(), one.clone(), value),
            pseudo_period_start: zero.clone(),
            pseudo_period_length: one,
            pseudo_period_height: zero,
        }
    }

    /// The constant 0.
    pub fn zero() -> Curve {
        Self::constant(Rational::zero())
    }

    /// The constant `+inf` (the neutral element of the minimum).
    pub fn plus_infinity() -> Curve {
        Self::constant(Rational::PlusInfinity)
    }

    /// The constant `-inf`.
    pub fn minus_infinity() -> Curve {
        Self::constant(Rational::MinusInfinity)
    }

    /// 0 at 0, `+inf` after (the neutral element of convolution).
    pub fn delta_zero() -> Curve {
        Self::build_delay(Rational::zero())
    }

    /// Rate-latency service curve `rate·(t − latency)⁺`.
    pub fn rate_latency(rate: Rational, latency: Rational) -> CurveResult<Curve> {
        require_non_negative("ratency", "rate", &rate)?;
        require_non_negative("ratency", "latency", &latency)?;
        let zero = Rational::zero();
        let one = Rational::one();

        if latency.is_zero() {
            return Curve::from_elements(
                vec![
                    Element::point(zero.clone(), zero.clone()),
                    Element::segment(zero.clone(), one.clone(), zero, rate.clone()),
                ],
                Rational::zero(),
                one,
                rate,
            );
        }

        let elements = vec![
            Element::point(zero.clone(), zero.clone()),
            Element::flat(zero.clone(), latency.clone(), zero.clone()),
            Element::point(latency.clone(), zero.clone()),
            Element::segment(latency.clone(), &latency + &one, zero, rate.clone()),
        ];
        Curve::from_elements(elements, latency, one, rate)
    }

    /// Token-bucket arrival curve: 0 at 0, `burst + rate·t` for `t > 0`.
    pub fn token_bucket(rate: Rational, burst: Rational) -> CurveResult<Curve> {
        require_non_negative("bucket", "rate", &rate)?;
        require_non_negative("bucket", "burst", &burst)?;
        let zero = Rational::zero();
        let one = Rational::one();
        let two = Rational::from_integer(2);
        let at_one = &burst + &rate;

        let elements = vec![
            Element::point(zero.clone(), zero.clone()),
            Element::segment(zero, one.clone(), burst, rate.clone()),
            Element::point(one.clone(), at_one.clone()),
            Element::segment(one.clone(), two, at_one, rate.clone()),
        ];
        Curve::from_elements(elements, one.clone(), one, rate)
    }

    /// Affine curve `offset + rate·t` for every `t ≥ 0`.
    pub fn affine(rate: Rational, offset: Rational) -> CurveResult<Curve> {
        require_finite("affine", "rate", &rate)?;
        require_finite("affine", "offset", &offset)?;
        let zero = Rational::zero();
        let one = Rational::one();
        let elements = vec![
            Element::point(zero.clone(), offset.clone()),
            Element::segment(zero.clone(), one.clone(), offset, rate.clone()),
        ];
        Curve::from_elements(elements, zero, one, rate)
    }

    /// Step: 0 for `t ≤ offset`, `height` after.
    pub fn step(offset: Rational, height: Rational) -> CurveResult<Curve> {
        require_non_negative("step", "offset", &offset)?;
        require_finite("step", "height", &height)?;
        let zero = Rational::zero();
        let one = Rational::one();
        let after = &offset + &one;

        let mut elements = vec![Element::point(zero.clone(), zero.clone())];
        if offset.is_positive() {
            elements.push(Element::flat(zero.clone(), offset.clone(), zero.clone()));
            elements.push(Element::point(offset.clone(), zero.clone()));
        }
        elements.push(Element::flat(offset, after.clone(), height.clone()));
        elements.push(Element::point(after.clone(), height.clone()));
        elements.push(Element::flat(after.clone(), &after + &one, height));
        Curve::from_elements(elements, after, one, zero)
    }

    /// Staircase: 0 for `t ≤ offset`, `height·⌈(t − offset)/length⌉` after.
    pub fn stair(offset: Rational, length: Rational, height: Rational) -> CurveResult<Curve> {
        require_non_negative("stair", "offset", &offset)?;
        require_finite("stair", "length", &length)?;
        require_finite("stair", "height", &height)?;
        if !length.is_positive() {
            return Err(CurveError::argument(
                "stair",
                format!("step length must be positive, got {}", length),
            ));
        }
        let zero = Rational::zero();

        let mut elements = vec![Element::point(zero.clone(), zero.clone())];
        if offset.is_positive() {
            elements.push(Element::flat(zero.clone(), offset.clone(), zero.clone()));
            elements.push(Element::point(offset.clone(), zero));
        }
        elements.push(Element::flat(offset.clone(), &offset + &length, height.clone()));
        Curve::from_elements(elements, offset, length, height)
    }

    /// Pure delay: 0 for `t ≤ delay`, `+inf` after.
    pub fn delay(delay: Rational) -> CurveResult<Curve> {
        require_non_negative("delay", "delay", &delay)?;
        Ok(Self::build_delay(delay))
    }

    fn build_delay(delay: Rational) -> Curve {
        let zero = Rational::zero();
        let one = Rational::one();
        let inf = Rational::PlusInfinity;
        let after = &delay + &one;

        let mut elements = vec![Element::point(zero.clone(), zero.clone())];
        if delay.is_positive() {
            elements.push(Element::flat(zero.clone(), delay.clone(), zero.clone()));
            elements.push(Element::point(delay.clone(), zero.clone()));
        }
        elements.push(Element::flat(delay, after.clone(), inf.clone()));
        elements.push(Element::point(after.clone(), inf.clone()));
        elements.push(Element::flat(after.clone(), &after + &one, inf));

        let end = &after + &one;
        let base = crate::sequence::Sequence::from_canonical(elements, zero.clone(), end);
        Curve {
            base,
            pseudo_period_start: after,
            pseudo_period_length: one,
            pseudo_period_height: zero,
        }
    }
}
