//! Tests for composition.

use crate::{Curve, CurveError, Rational};

fn q(v: i64) -> Rational {
    Rational::from_integer(v)
}

fn frac(n: i64, d: i64) -> Rational {
    Rational::new(n, d).unwrap()
}

#[test]
fn test_stair_of_slow_line() {
    let stair = Curve::stair(q(0), q(1), q(1)).unwrap();
    let half = Curve::affine(frac(1, 2), q(0)).unwrap();
    let h = stair.composition(&half).unwrap();
    assert_eq!(h.pseudo_period_length(), &q(2));
    assert!(h.equivalent(&Curve::stair(q(0), q(2), q(1)).unwrap()));
}

#[test]
fn test_rate_latency_of_line() {
    let f = Curve::rate_latency(q(2), q(1)).unwrap();
    let g = Curve::affine(q(3), q(0)).unwrap();
    let h = f.composition(&g).unwrap();
    assert_eq!(h.value_at(&frac(1, 3)).unwrap(), q(0));
    assert_eq!(h.value_at(&q(2)).unwrap(), q(10));
    assert_eq!(h.rate(), Some(q(6)));
}

#[test]
fn test_constant_inner_tail() {
    let f = Curve::rate_latency(q(1), q(0)).unwrap();
    let g = Curve::step(q(1), q(3)).unwrap();
    let h = f.composition(&g).unwrap();
    assert!(h.equivalent(&g));
}

#[test]
fn test_infinite_inner_gives_infinite_result() {
    let f = Curve::affine(q(1), q(0)).unwrap();
    let h = f.composition(&Curve::delay(q(2)).unwrap()).unwrap();
    assert_eq!(h.value_at(&q(1)).unwrap(), q(0));
    assert_eq!(h.value_at(&q(3)).unwrap(), Rational::PlusInfinity);
}

#[test]
fn test_inner_must_be_non_decreasing_and_non_negative() {
    let f = Curve::zero();
    assert!(matches!(
        f.composition(&Curve::affine(q(-1), q(5)).unwrap()),
        Err(CurveError::NotNonDecreasing { .. })
    ));
    assert!(matches!(
        f.composition(&Curve::affine(q(1), q(-1)).unwrap()),
        Err(CurveError::InvalidArgument { .. })
    ));
}
