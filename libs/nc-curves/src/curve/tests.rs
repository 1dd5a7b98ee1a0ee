//! Tests for curve representation and named constructors.

use super::*;

fn q(v: i64) -> Rational {
    Rational::from_integer(v)
}

fn frac(n: i64, d: i64) -> Rational {
    Rational::new(n, d).unwrap()
}

#[test]
fn test_new_rejects_bad_period() {
    let base = Sequence::constant(q(0), q(1), q(0));
    assert!(Curve::new(base.clone(), q(0), q(0), q(0)).is_err());
    assert!(Curve::new(base.clone(), q(-1), q(2), q(0)).is_err());
    assert!(Curve::new(base.clone(), q(0), q(1), Rational::PlusInfinity).is_err());
    assert!(Curve::new(base, q(0), q(2), q(0)).is_err());
}

#[test]
fn test_new_splits_at_period_start() {
    let base = Sequence::constant(q(0), q(3), q(1));
    let curve = Curve::new(base, q(1), q(2), q(0)).unwrap();
    assert!(curve.base().breakpoints().any(|t| *t == q(1)));
}

#[test]
fn test_rate_latency_values() {
    let curve = Curve::rate_latency(q(2), q(3)).unwrap();
    assert_eq!(curve.value_at(&q(0)).unwrap(), q(0));
    assert_eq!(curve.value_at(&q(3)).unwrap(), q(0));
    assert_eq!(curve.value_at(&frac(7, 2)).unwrap(), q(1));
    assert_eq!(curve.value_at(&q(100)).unwrap(), q(194));
    assert_eq!(curve.rate(), Some(q(2)));
}

#[test]
fn test_token_bucket_jump() {
    let curve = Curve::token_bucket(q(1), q(5)).unwrap();
    assert_eq!(curve.value_at(&q(0)).unwrap(), q(0));
    assert_eq!(curve.right_limit_at(&q(0)).unwrap(), q(5));
    assert_eq!(curve.value_at(&q(10)).unwrap(), q(15));
}

#[test]
fn test_service_curves_reject_negative_parameters() {
    assert!(matches!(
        Curve::rate_latency(q(-1), q(0)),
        Err(CurveError::InvalidArgument { .. })
    ));
    assert!(Curve::token_bucket(q(1), q(-1)).is_err());
    assert!(Curve::token_bucket(q(-1), q(1)).is_err());
    assert!(Curve::token_bucket(q(0), q(0)).is_ok());
}

#[test]
fn test_step_and_stair() {
    let step = Curve::step(q(2), q(7)).unwrap();
    assert_eq!(step.value_at(&q(2)).unwrap(), q(0));
    assert_eq!(step.right_limit_at(&q(2)).unwrap(), q(7));
    assert_eq!(step.value_at(&q(50)).unwrap(), q(7));

    let stair = Curve::stair(q(1), q(3), q(2)).unwrap();
    assert_eq!(stair.value_at(&q(1)).unwrap(), q(0));
    assert_eq!(stair.value_at(&q(2)).unwrap(), q(2));
    assert_eq!(stair.value_at(&q(4)).unwrap(), q(2));
    assert_eq!(stair.value_at(&q(5)).unwrap(), q(4));
    assert_eq!(stair.left_limit_at(&q(7)).unwrap(), q(4));
    assert_eq!(stair.value_at(&q(7)).unwrap(), q(4));
    assert_eq!(stair.right_limit_at(&q(7)).unwrap(), q(6));
}

#[test]
fn test_stair_rejects_zero_length() {
    assert!(matches!(
        Curve::stair(q(0), q(0), q(1)),
        Err(CurveError::InvalidArgument { operation: "stair", .. })
    ));
}

#[test]
fn test_delay_is_ultimately_infinite() {
    let delay = Curve::delay(q(4)).unwrap();
    assert_eq!(delay.value_at(&q(4)).unwrap(), q(0));
    assert_eq!(delay.right_limit_at(&q(4)).unwrap(), Rational::PlusInfinity);
    assert!(delay.is_ultimately_plus_infinite());
    assert_eq!(delay.rate(), None);
}

#[test]
fn test_left_limit_requires_positive_time() {
    let curve = Curve::zero();
    assert!(matches!(
        curve.left_limit_at(&q(0)),
        Err(CurveError::OutOfDomain { .. })
    ));
    assert!(curve.value_at(&q(-1)).is_err());
}

#[test]
fn test_extend_to_unrolls_periods() {
    let stair = Curve::stair(q(0), q(1), q(1)).unwrap();
    let sequence = stair.extend_to(&frac(7, 2)).unwrap();
    assert_eq!(sequence.end(), &frac(7, 2));
    assert_eq!(sequence.value_at(&frac(5, 2)), Some(q(3)));
}

#[test]
fn test_non_decreasing() {
    assert!(Curve::rate_latency(q(1), q(1)).unwrap().is_non_decreasing());
    assert!(Curve::delay(q(1)).unwrap().is_non_decreasing());
    assert!(!Curve::affine(q(-1), q(3)).unwrap().is_non_decreasing());
}

#[test]
fn test_display_as_upp_literal() {
    let curve = Curve::rate_latency(q(2), q(3)).unwrap();
    assert_eq!(
        curve.to_string(),
        "upp([(0, 0) 0 (3, 0)[, period([(3, 0) 2 (4, 2)[), 2, 1)"
    );
    assert_eq!(Curve::zero().to_string(), "upp(period([(0, 0) 0 (1, 0)[), 0, 1)");
}
