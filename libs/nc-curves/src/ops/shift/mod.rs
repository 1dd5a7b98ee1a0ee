//! # Shifts

use crate::curve::Curve;
use crate::element::Element;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;
use crate::sequence::Sequence;

impl Curve {
    /// `t ↦ f(t − delay)`.
    ///
    /// A positive delay moves the curve right and leaves `+inf` on
    /// `[0, delay)`; a negative one drops the first `|delay|` time units.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Curve, Rational};
    ///
    /// let q = Rational::from_integer;
    /// let f = Curve::affine(q(1), q(0)).unwrap();
    /// let g = f.horizontal_shift(&q(-2)).unwrap();
    /// assert_eq!(g.value_at(&q(0)).unwrap(), q(2));
    /// ```
    pub fn horizontal_shift(&self, delay: &Rational) -> CurveResult<Curve> {
        if delay.is_infinite() {
            return Err(CurveError::argument("hshift", "shift must be finite"));
        }
        let length = self.pseudo_period_length().clone();
        let height = self.pseudo_period_height().clone();

        if delay.is_positive() {
            let start = self.pseudo_period_start() + delay;
            let end = &start + &length;
            let mut elements = vec![
                Element::point(Rational::zero(), Rational::PlusInfinity),
                Element::flat(Rational::zero(), delay.clone(), Rational::PlusInfinity),
            ];
            elements.extend(self.base().shift(delay, &Rational::zero()).into_elements());
            let base = Sequence::from_canonical(elements, Rational::zero(), end);
            return Curve::new(base, start, length, height);
        }

        let advance = -delay;
        let start = (self.pseudo_period_start() - &advance).max(Rational::zero());
        let end = &start + &length;
        let shifted = self
            .extend_to(&(&advance + &end))?
            .cut(&advance, &(&advance + &end))?
            .shift(delay, &Rational::zero());
        Curve::new(shifted, start, length, height)
    }

    /// `t ↦ f(t) + offset`.
    pub fn vertical_shift(&self, offset: &Rational) -> CurveResult<Curve> {
        if offset.is_infinite() {
            return Err(CurveError::argument("vshift", "shift must be finite"));
        }
        Curve::new(
            self.base().shift(&Rational::zero(), offset),
            self.pseudo_period_start().clone(),
            self.pseudo_period_length().clone(),
            self.pseudo_period_height().clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(v: i64) -> Rational {
        Rational::from_integer(v)
    }

    #[test]
    fn test_right_shift_fills_with_infinity() {
        let f = Curve::rate_latency(q(1), q(0)).unwrap();
        let g = f.horizontal_shift(&q(3)).unwrap();
        assert_eq!(g.value_at(&q(1)).unwrap(), Rational::PlusInfinity);
        assert_eq!(g.value_at(&q(3)).unwrap(), q(0));
        assert_eq!(g.value_at(&q(10)).unwrap(), q(7));
    }

    #[test]
    fn test_left_shift_drops_prefix() {
        let stair = Curve::stair(q(2), q(1), q(1)).unwrap();
        let g = stair.horizontal_shift(&q(-5)).unwrap();
        assert_eq!(g.pseudo_period_start(), &q(0));
        assert_eq!(g.value_at(&q(0)).unwrap(), stair.value_at(&q(5)).unwrap());
        assert_eq!(g.value_at(&q(4)).unwrap(), stair.value_at(&q(9)).unwrap());
    }

    #[test]
    fn test_zero_shift_is_identity() {
        let f = Curve::token_bucket(q(2), q(1)).unwrap();
        assert!(f.horizontal_shift(&q(0)).unwrap().equivalent(&f));
    }

    #[test]
    fn test_vertical_shift() {
        let f = Curve::rate_latency(q(2), q(1)).unwrap();
        let g = f.vertical_shift(&q(-3)).unwrap();
        assert_eq!(g.value_at(&q(0)).unwrap(), q(-3));
        assert_eq!(g.value_at(&q(4)).unwrap(), q(3));
        assert!(f.vertical_shift(&Rational::MinusInfinity).is_err());
    }
}
