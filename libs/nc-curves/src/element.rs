//! # Elements
//!
//! The two building blocks of a piecewise-affine curve: a value at a single
//! time, and an affine piece over an open interval.

use crate::rational::Rational;
use std::fmt;

/// A point or an open segment.
///
/// A segment covers the open interval `(start, end)`; `start_value` is its
/// right limit at `start`. Segments with an infinite value always have slope 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Point {
        time: Rational,
        value: Rational,
    },
    Segment {
        start: Rational,
        end: Rational,
        start_value: Rational,
        slope: Rational,
    },
}

impl Element {
    pub fn point(time: Rational, value: Rational) -> Self {
        Self::Point { time, value }
    }

    /// Build a segment, forcing slope 0 on infinite values.
    pub fn segment(start: Rational, end: Rational, start_value: Rational, slope: Rational) -> Self {
        let slope = if start_value.is_infinite() {
            Rational::zero()
        } else {
            slope
        };
        Self::Segment {
            start,
            end,
            start_value,
            slope,
        }
    }

    /// A constant segment.
    pub fn flat(start: Rational, end: Rational, value: Rational) -> Self {
        Self::segment(start, end, value, Rational::zero())
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Self::Point { .. })
    }

    pub fn is_segment(&self) -> bool {
        matches!(self, Self::Segment { .. })
    }

    /// Start time (the time of a point).
    pub fn start(&self) -> &Rational {
        match self {
            Self::Point { time, .. } => time,
            Self::Segment { start, .. } => start,
        }
    }

    /// End time (the time of a point).
    pub fn end(&self) -> &Rational {
        match self {
            Self::Point { time, .. } => time,
            Self::Segment { end, .. } => end,
        }
    }

    /// Value of a point, right limit at start of a segment.
    pub fn first_value(&self) -> &Rational {
        match self {
            Self::Point { value, .. } => value,
            Self::Segment { start_value, .. } => start_value,
        }
    }

    /// Value of a point, left limit at end of a segment.
    pub fn last_value(&self) -> Rational {
        match self {
            Self::Point { value, .. } => value.clone(),
            Self::Segment { end, .. } => self.line_at(end),
        }
    }

    /// Slope of a segment; 0 for points.
    pub fn slope(&self) -> Rational {
        match self {
            Self::Point { .. } => Rational::zero(),
            Self::Segment { slope, .. } => slope.clone(),
        }
    }

    /// Value of the segment's supporting line at `time`.
    pub fn line_at(&self, time: &Rational) -> Rational {
        match self {
            Self::Point { value, .. } => value.clone(),
            Self::Segment {
                start,
                start_value,
                slope,
                ..
            } => {
                if start_value.is_infinite() {
                    start_value.clone()
                } else {
                    start_value + &(slope * &(time - start))
                }
            }
        }
    }

    /// True when any value carried by the element is infinite.
    pub fn is_infinite(&self) -> bool {
        self.first_value().is_infinite()
    }

    /// Shift by `dt` in time and `dv` in value.
    pub fn shift(&self, dt: &Rational, dv: &Rational) -> Self {
        match self {
            Self::Point { time, value } => Self::point(time + dt, value + dv),
            Self::Segment {
                start,
                end,
                start_value,
                slope,
            } => Self::segment(start + dt, end + dt, start_value + dv, slope.clone()),
        }
    }

    /// Multiply every value by `factor`.
    pub fn scale(&self, factor: &Rational) -> Self {
        match self {
            Self::Point { time, value } => Self::point(time.clone(), value * factor),
            Self::Segment {
                start,
                end,
                start_value,
                slope,
            } => Self::segment(
                start.clone(),
                end.clone(),
                start_value * factor,
                slope * factor,
            ),
        }
    }

    pub fn negate(&self) -> Self {
        self.scale(&Rational::from_integer(-1))
    }

    /// The restriction of a segment to `(from, to)`, which must lie inside it.
    pub(crate) fn restrict(&self, from: &Rational, to: &Rational) -> Self {
        match self {
            Self::Point { .. } => self.clone(),
            Self::Segment { slope, .. } => {
                Self::segment(from.clone(), to.clone(), self.line_at(from), slope.clone())
            }
        }
    }

    /// Reflect `(t, v)` into `(-t, -v)`, mapping a segment over `(s, e)` onto `(-e, -s)`.
    pub(crate) fn reflect(&self) -> Self {
        match self {
            Self::Point { time, value } => Self::point(-time, -value),
            Self::Segment {
                start, end, slope, ..
            } => Self::segment(-end, -start, -&self.last_value(), slope.clone()),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point { time, value } => write!(f, "[{}, {}]", time, value),
            Self::Segment {
                start,
                end,
                start_value,
                slope,
            } => write!(
                f,
                "]({}, {}) {} ({}, {})[",
                start,
                start_value,
                slope,
                end,
                self.last_value()
            ),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
