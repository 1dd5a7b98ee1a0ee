//! Tests for continuity projections and non-decreasing closures.

use crate::{Curve, Element, Rational};

fn q(v: i64) -> Rational {
    Rational::from_integer(v)
}

#[test]
fn test_right_continuous_takes_right_limits() {
    let bucket = Curve::token_bucket(q(1), q(3)).unwrap();
    let right = bucket.to_right_continuous().unwrap();
    assert_eq!(right.value_at(&q(0)).unwrap(), q(3));
    assert_eq!(right.value_at(&q(2)).unwrap(), q(5));

    let stair = Curve::stair(q(0), q(1), q(1)).unwrap();
    let right = stair.to_right_continuous().unwrap();
    assert_eq!(right.value_at(&q(0)).unwrap(), q(1));
    assert_eq!(right.value_at(&q(1)).unwrap(), q(2));
    assert_eq!(right.value_at(&q(7)).unwrap(), q(8));
}

#[test]
fn test_left_continuous_takes_left_limits() {
    let stair = Curve::stair(q(0), q(1), q(1)).unwrap();
    let right = stair.to_right_continuous().unwrap();
    let left = right.to_left_continuous().unwrap();
    assert_eq!(left.value_at(&q(0)).unwrap(), q(1));
    assert_eq!(left.value_at(&q(1)).unwrap(), q(1));
    assert_eq!(left.value_at(&q(7)).unwrap(), q(7));
}

#[test]
fn test_upper_non_decreasing_of_falling_line() {
    let falling = Curve::affine(q(-1), q(4)).unwrap();
    let closure = falling.to_upper_non_decreasing().unwrap();
    assert!(closure.equivalent(&Curve::constant(q(4))));
}

#[test]
fn test_upper_non_decreasing_waits_for_transient_peak() {
    let f = Curve::from_elements(
        vec![
            Element::point(q(0), q(0)),
            Element::flat(q(0), q(1), q(10)),
            Element::point(q(1), q(0)),
            Element::segment(q(1), q(2), q(0), q(1)),
        ],
        q(1),
        q(1),
        q(1),
    )
    .unwrap();
    let closure = f.to_upper_non_decreasing().unwrap();
    assert!(closure.is_non_decreasing());
    assert_eq!(closure.value_at(&q(5)).unwrap(), q(10));
    assert_eq!(closure.value_at(&q(11)).unwrap(), q(10));
    assert_eq!(closure.value_at(&q(15)).unwrap(), q(14));
}

#[test]
fn test_non_negative_upper_non_decreasing() {
    let f = Curve::affine(q(1), q(-3)).unwrap();
    let closure = f.to_non_negative_upper_non_decreasing().unwrap();
    assert_eq!(closure.value_at(&q(1)).unwrap(), q(0));
    assert_eq!(closure.value_at(&q(5)).unwrap(), q(2));
}
