//! Tests for sequences and envelopes.

use super::*;

fn q(v: i64) -> Rational {
    Rational::from_integer(v)
}

fn ramp() -> Sequence {
    Sequence::fill(
        vec![
            Element::point(q(0), q(0)),
            Element::segment(q(0), q(2), q(0), q(1)),
            Element::point(q(2), q(5)),
            Element::segment(q(2), q(4), q(5), q(0)),
        ],
        q(0),
        q(4),
    )
    .unwrap()
}

#[test]
fn test_fill_inserts_infinite_gaps() {
    let sequence = Sequence::fill(
        vec![Element::segment(q(1), q(2), q(3), q(0))],
        q(0),
        q(3),
    )
    .unwrap();
    assert_eq!(sequence.elements().len(), 6);
    assert_eq!(sequence.value_at(&q(0)), Some(Rational::PlusInfinity));
    assert_eq!(sequence.value_at(&q(1)), Some(Rational::PlusInfinity));
    assert_eq!(sequence.right_limit_at(&q(1)), Some(q(3)));
    assert_eq!(sequence.value_at(&q(2)), Some(Rational::PlusInfinity));
}

#[test]
fn test_fill_rejects_overlap() {
    let result = Sequence::fill(
        vec![
            Element::segment(q(0), q(2), q(0), q(0)),
            Element::point(q(1), q(0)),
        ],
        q(0),
        q(3),
    );
    assert!(matches!(result, Err(CurveError::InvalidSequence { .. })));
}

#[test]
fn test_fill_rejects_point_at_end() {
    let result = Sequence::fill(vec![Element::point(q(3), q(0))], q(0), q(3));
    assert!(result.is_err());
}

#[test]
fn test_limits() {
    let sequence = ramp();
    assert_eq!(sequence.value_at(&q(2)), Some(q(5)));
    assert_eq!(sequence.left_limit_at(&q(2)), Some(q(2)));
    assert_eq!(sequence.right_limit_at(&q(2)), Some(q(5)));
    assert_eq!(sequence.left_limit_at(&q(4)), Some(q(5)));
    assert_eq!(sequence.value_at(&q(4)), None);
}

#[test]
fn test_cut_splits_segments() {
    let cut = ramp().cut(&q(1), &q(3)).unwrap();
    assert_eq!(cut.start(), &q(1));
    assert_eq!(cut.value_at(&q(1)), Some(q(1)));
    assert_eq!(cut.value_at(&q(2)), Some(q(5)));
    assert_eq!(cut.elements().len(), 4);
}

#[test]
fn test_with_breakpoint() {
    let split = ramp().with_breakpoint(&Rational::new(1, 2).unwrap());
    assert_eq!(split.elements().len(), 6);
    assert!(split.equivalent(&ramp()));
}

#[test]
fn test_optimize_merges_collinear() {
    let sequence = Sequence::fill(
        vec![
            Element::point(q(0), q(0)),
            Element::segment(q(0), q(1), q(0), q(2)),
            Element::point(q(1), q(2)),
            Element::segment(q(1), q(3), q(2), q(2)),
        ],
        q(0),
        q(3),
    )
    .unwrap();
    assert_eq!(sequence.optimize().elements().len(), 2);
}

#[test]
fn test_lower_envelope_crossing() {
    // min(t, 3 - t) over [0, 3)
    let pieces = vec![
        Element::point(q(0), q(0)),
        Element::segment(q(0), q(3), q(0), q(1)),
        Element::segment(q(0), q(3), q(3), q(-1)),
    ];
    let envelope = Sequence::lower_envelope(pieces, q(0), q(3));
    let half = Rational::new(3, 2).unwrap();
    assert_eq!(envelope.value_at(&half), Some(half.clone()));
    assert_eq!(envelope.value_at(&q(2)), Some(q(1)));
    assert_eq!(envelope.slope_after(&q(2)), Some(q(-1)));
}

#[test]
fn test_upper_envelope_fills_minus_infinity() {
    let envelope =
        Sequence::upper_envelope(vec![Element::point(q(1), q(4))], q(0), q(2));
    assert_eq!(envelope.value_at(&q(1)), Some(q(4)));
    assert_eq!(envelope.value_at(&q(0)), Some(Rational::MinusInfinity));
}

#[test]
fn test_zip_addition() {
    let sum = ramp()
        .zip_with(&ramp(), |a, b| a + b, |a, b| a + b)
        .unwrap();
    assert_eq!(sum.value_at(&q(1)), Some(q(2)));
    assert_eq!(sum.value_at(&q(3)), Some(q(10)));
}

#[test]
fn test_sup_inf_monotonicity() {
    let sequence = ramp();
    assert_eq!(sequence.supremum(), q(5));
    assert_eq!(sequence.infimum(), q(0));
    assert!(sequence.is_non_decreasing());
    assert!(!sequence.negate().is_non_decreasing());
}

#[test]
fn test_display_merges_closed_start() {
    let sequence = Sequence::constant(q(0), q(1), q(2));
    assert_eq!(sequence.to_string(), "[(0, 2) 0 (1, 2)[");
}
