//! Tests for the sub-additive closure.

use crate::{Curve, CurveError, Element, Rational};

fn q(v: i64) -> Rational {
    Rational::from_integer(v)
}

fn frac(n: i64, d: i64) -> Rational {
    Rational::new(n, d).unwrap()
}

#[test]
fn test_subadditive_curve_is_fixed_point() {
    let step = Curve::step(q(0), q(1)).unwrap();
    let closure = step.subadditive_closure().unwrap();
    assert!(closure.equivalent(&step));

    let bucket = Curve::token_bucket(q(1), q(3)).unwrap();
    assert!(bucket.subadditive_closure().unwrap().equivalent(&bucket));
}

#[test]
fn test_token_bucket_closure_with_pulse_train_factors() {
    let bucket = Curve::token_bucket(q(1), q(1)).unwrap();
    let closure = bucket.subadditive_closure().unwrap();
    assert!(closure.equivalent(&bucket));
    assert_eq!(closure.value_at(&frac(5, 2)).unwrap(), frac(7, 2));
}

#[test]
fn test_flat_start_closes_to_zero() {
    let f = Curve::from_elements(
        vec![
            Element::point(q(0), q(0)),
            Element::flat(q(0), q(1), q(0)),
            Element::point(q(1), q(1)),
            Element::flat(q(1), q(3), q(1)),
        ],
        q(1),
        q(2),
        q(1),
    )
    .unwrap();
    let closure = f.subadditive_closure().unwrap();
    assert!(closure.equivalent(&Curve::zero()));
}

#[test]
fn test_rate_latency_closes_to_zero() {
    let beta = Curve::rate_latency(q(2), q(1)).unwrap();
    let closure = beta.subadditive_closure().unwrap();
    assert!(closure.equivalent(&Curve::zero()));
}

#[test]
fn test_isolated_point_becomes_train() {
    let f = Curve::from_elements(
        vec![
            Element::point(q(0), q(0)),
            Element::flat(q(0), q(2), Rational::PlusInfinity),
            Element::point(q(2), q(3)),
        ],
        q(3),
        q(1),
        q(0),
    )
    .unwrap();
    let closure = f.subadditive_closure().unwrap();
    assert_eq!(closure.value_at(&q(4)).unwrap(), q(6));
    assert_eq!(closure.value_at(&q(6)).unwrap(), q(9));
    assert_eq!(closure.value_at(&q(3)).unwrap(), Rational::PlusInfinity);
}

#[test]
fn test_steep_segment_repeats_with_start_points() {
    let f = Curve::from_elements(
        vec![
            Element::point(q(0), q(0)),
            Element::segment(q(1), q(2), q(1), q(2)),
        ],
        q(3),
        q(1),
        q(0),
    )
    .unwrap();
    let closure = f.subadditive_closure().unwrap();
    assert_eq!(closure.value_at(&frac(3, 2)).unwrap(), q(2));
    assert_eq!(closure.value_at(&q(2)).unwrap(), Rational::PlusInfinity);
    assert_eq!(closure.value_at(&frac(7, 2)).unwrap(), q(4));
    assert_eq!(closure.value_at(&frac(9, 2)).unwrap(), q(5));
}

#[test]
fn test_divergent_closures() {
    let negative_start = Curve::affine(q(1), q(-1)).unwrap();
    assert!(matches!(
        negative_start.subadditive_closure(),
        Err(CurveError::DivergentClosure { .. })
    ));

    let dips = Curve::from_elements(
        vec![
            Element::point(q(0), q(0)),
            Element::segment(q(0), q(1), q(0), q(-1)),
        ],
        q(1),
        q(1),
        q(0),
    )
    .unwrap();
    assert!(dips.subadditive_closure().is_err());
    assert!(Curve::minus_infinity().subadditive_closure().is_err());
}
