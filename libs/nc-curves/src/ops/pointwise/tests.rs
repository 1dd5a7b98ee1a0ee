//! Tests for pointwise operators.

use crate::{Curve, CurveError, Element, Rational};

fn q(v: i64) -> Rational {
    Rational::from_integer(v)
}

fn frac(n: i64, d: i64) -> Rational {
    Rational::new(n, d).unwrap()
}

#[test]
fn test_minimum_same_rate_uses_lcm() {
    let f = Curve::stair(q(0), q(2), q(2)).unwrap();
    let g = Curve::stair(q(0), q(3), q(3)).unwrap();
    let m = f.minimum(&g).unwrap();
    assert_eq!(m.pseudo_period_length(), &q(6));
    assert_eq!(m.pseudo_period_height(), &q(6));
    assert_eq!(m.value_at(&frac(1, 2)).unwrap(), q(2));
    assert_eq!(m.value_at(&frac(5, 2)).unwrap(), q(3));
    assert_eq!(m.value_at(&frac(13, 2)).unwrap(), q(8));
}

#[test]
fn test_maximum_different_rates_follows_faster() {
    let f = Curve::token_bucket(q(1), q(10)).unwrap();
    let g = Curve::rate_latency(q(3), q(0)).unwrap();
    let m = f.maximum(&g).unwrap();
    assert_eq!(m.value_at(&q(1)).unwrap(), q(11));
    assert_eq!(m.value_at(&q(5)).unwrap(), q(15));
    assert_eq!(m.value_at(&q(20)).unwrap(), q(60));
    assert_eq!(m.rate(), Some(q(3)));
}

#[test]
fn test_minimum_with_infinite_tail() {
    let delay = Curve::delay(q(2)).unwrap();
    let line = Curve::affine(q(1), q(0)).unwrap();
    let m = delay.minimum(&line).unwrap();
    assert_eq!(m.value_at(&q(1)).unwrap(), q(0));
    assert_eq!(m.value_at(&q(7)).unwrap(), q(7));
    assert_eq!(m.rate(), Some(q(1)));
}

#[test]
fn test_minimum_mixed_period_unsupported() {
    let gappy = Curve::from_elements(
        vec![
            Element::point(q(0), q(0)),
            Element::segment(q(0), q(1), q(0), q(0)),
        ],
        q(0),
        q(2),
        q(2),
    )
    .unwrap();
    let steep = Curve::affine(q(5), q(0)).unwrap();
    assert!(matches!(
        gappy.minimum(&steep),
        Err(CurveError::Unsupported { .. })
    ));
}

#[test]
fn test_minimum_of_pulse_trains_sharing_holes() {
    let pulses = |offset: i64, rate: i64| {
        Curve::from_elements(
            vec![
                Element::point(q(0), q(offset)),
                Element::flat(q(0), q(1), Rational::PlusInfinity),
            ],
            q(0),
            q(1),
            q(rate),
        )
        .unwrap()
    };
    let slow = pulses(0, 1);
    let fast = pulses(1, 2);
    let m = slow.minimum(&fast).unwrap();
    assert_eq!(m.rate(), Some(q(1)));
    assert_eq!(m.value_at(&q(3)).unwrap(), q(3));
    assert_eq!(m.value_at(&frac(5, 2)).unwrap(), Rational::PlusInfinity);
    assert!(m.equivalent(&slow));
}

#[test]
fn test_addition_and_subtraction() {
    let f = Curve::rate_latency(q(2), q(1)).unwrap();
    let g = Curve::token_bucket(q(1), q(3)).unwrap();
    let sum = f.addition(&g).unwrap();
    assert_eq!(sum.value_at(&q(0)).unwrap(), q(0));
    assert_eq!(sum.value_at(&q(4)).unwrap(), q(13));
    assert_eq!(sum.rate(), Some(q(3)));

    let difference = sum.subtraction(&g).unwrap();
    assert!(difference.equivalent(&f));
}

#[test]
fn test_addition_infinity_absorbs() {
    let sum = Curve::plus_infinity()
        .addition(&Curve::minus_infinity())
        .unwrap();
    assert!(sum.is_ultimately_plus_infinite());
    assert_eq!(sum.value_at(&q(0)).unwrap(), Rational::PlusInfinity);
}

#[test]
fn test_scale_and_negate() {
    let f = Curve::affine(q(2), q(1)).unwrap();
    let scaled = f.scale(&frac(1, 2)).unwrap();
    assert_eq!(scaled.value_at(&q(3)).unwrap(), frac(7, 2));
    let negated = f.negate().unwrap();
    assert_eq!(negated.value_at(&q(3)).unwrap(), q(-7));
    assert!(f.scale(&Rational::PlusInfinity).is_err());
}

#[test]
fn test_equivalent_across_representations() {
    let a = Curve::rate_latency(q(1), q(2)).unwrap();
    let b = Curve::rate_latency(q(1), q(2)).unwrap();
    assert!(a.equivalent(&b));
    let c = a.minimum(&Curve::plus_infinity()).unwrap();
    assert!(a.equivalent(&c));
    assert!(!Curve::zero().equivalent(&Curve::plus_infinity()));
}

#[test]
fn test_less_or_equal() {
    let service = Curve::rate_latency(q(2), q(3)).unwrap();
    let faster = Curve::rate_latency(q(3), q(1)).unwrap();
    assert!(service.less_or_equal(&faster));
    assert!(!faster.less_or_equal(&service));
    assert!(Curve::zero().less_or_equal(&Curve::plus_infinity()));
    assert!(!Curve::plus_infinity().less_or_equal(&Curve::zero()));
}
