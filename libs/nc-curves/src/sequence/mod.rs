//! # Sequences
//!
//! A [`Sequence`] describes a function over a half-open window `[start, end)`
//! as a canonical alternation of elements:
//!
//! ```text
//! Point(t0) Segment(t0, t1) Point(t1) Segment(t1, t2) ... Segment(tn-1, end)
//! ```
//!
//! with `t0 = start`. Every query, cut and combination keeps that shape.
//!
//! ## Example
//!
//! ```rust
//! use nc_curves::{Element, Rational, Sequence};
//!
//! let q = Rational::from_integer;
//! let sequence = Sequence::fill(
//!     vec![Element::point(q(0), q(0)), Element::segment(q(0), q(2), q(1), q(1))],
//!     q(0),
//!     q(4),
//! ).unwrap();
//! assert_eq!(sequence.value_at(&q(1)), Some(q(2)));
//! assert_eq!(sequence.value_at(&q(3)), Some(Rational::PlusInfinity));
//! ```

mod envelope;

#[cfg(test)]
mod tests;

use crate::element::Element;
use crate::error::{CurveError, CurveResult};
use crate::rational::Rational;
use std::fmt;

/// Canonical piecewise-affine description of a function over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    elements: Vec<Element>,
    start: Rational,
    end: Rational,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl Sequence {
    /// Wrap elements that are already canonical over `[start, end)`.
    pub(crate) fn from_canonical(elements: Vec<Element>, start: Rational, end: Rational) -> Self {
        Self {
            elements,
            start,
            end,
        }
    }

    /// An empty sequence at `time`.
    pub fn empty(time: Rational) -> Self {
        Self::from_canonical(Vec::new(), time.clone(), time)
    }

    /// A constant function over `[start, end)`.
    pub fn constant(start: Rational, end: Rational, value: Rational) -> Self {
        if start >= end {
            return Self::empty(start);
        }
        let elements = vec![
            Element::point(start.clone(), value.clone()),
            Element::flat(start.clone(), end.clone(), value),
        ];
        Self::from_canonical(elements, start, end)
    }

    /// Build a canonical sequence over `[start, end)` from ordered elements.
    ///
    /// Missing points and uncovered intervals are filled with `+inf`.
    ///
    /// ## Errors
    ///
    /// Elements that are out of order, overlap, are empty segments, or fall
    /// outside the window.
    pub fn fill(
        elements: impl IntoIterator<Item = Element>,
        start: Rational,
        end: Rational,
    ) -> CurveResult<Self> {
        if start.is_infinite() || end.is_infinite() || start > end {
            return Err(CurveError::sequence(format!(
                "window [{}, {}) is not a finite interval",
                start, end
            )));
        }

        let gap = || Rational::PlusInfinity;
        let mut out = Vec::new();
        let mut cursor = start.clone();
        let mut has_point = false;

        for element in elements {
            match &element {
                Element::Point { time, .. } => {
                    if *time < cursor || (*time == cursor && has_point) {
                        return Err(CurveError::sequence(format!(
                            "point at {} overlaps the previous element",
                            time
                        )));
                    }
                    if *time >= end {
                        return Err(CurveError::sequence(format!(
                            "point at {} is outside [{}, {})",
                            time, start, end
                        )));
                    }
                    if *time > cursor {
                        if !has_point {
                            out.push(Element::point(cursor.clone(), gap()));
                        }
                        out.push(Element::flat(cursor.clone(), time.clone(), gap()));
                    }
                    cursor = time.clone();
                    has_point = true;
                    out.push(element);
                }
                Element::Segment {
                    start: from,
                    end: to,
                    ..
                } => {
                    if from >= to {
                        return Err(CurveError::sequence(format!(
                            "segment ({}, {}) is empty",
                            from, to
                        )));
                    }
                    if *from < cursor {
                        return Err(CurveError::sequence(format!(
                            "segment starting at {} overlaps the previous element",
                            from
                        )));
                    }
                    if *to > end {
                        return Err(CurveError::sequence(format!(
                            "segment ending at {} is outside [{}, {})",
                            to, start, end
                        )));
                    }
                    if !has_point {
                        out.push(Element::point(cursor.clone(), gap()));
                    }
                    if *from > cursor {
                        out.push(Element::flat(cursor.clone(), from.clone(), gap()));
                        out.push(Element::point(from.clone(), gap()));
                    }
                    cursor = to.clone();
                    has_point = false;
                    out.push(element);
                }
            }
        }

        if cursor < end {
            if !has_point {
                out.push(Element::point(cursor.clone(), gap()));
            }
            out.push(Element::flat(cursor, end.clone(), gap()));
        }

        Ok(Self::from_canonical(out, start, end))
    }
}

// =============================================================================
// ACCESSORS AND QUERIES
// =============================================================================

impl Sequence {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn start(&self) -> &Rational {
        &self.start
    }

    pub fn end(&self) -> &Rational {
        &self.end
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Times of the points, in order.
    pub fn breakpoints(&self) -> impl Iterator<Item = &Rational> {
        self.elements
            .iter()
            .filter(|e| e.is_point())
            .map(Element::start)
    }

    /// Index of the segment whose `[start, end)` contains `time`.
    fn segment_index(&self, time: &Rational) -> Option<usize> {
        if *time < self.start || *time >= self.end {
            return None;
        }
        let count = self.elements.partition_point(|e| e.start() <= time);
        count.checked_sub(1)
    }

    /// Value at `time`, or `None` outside `[start, end)`.
    pub fn value_at(&self, time: &Rational) -> Option<Rational> {
        let index = self.segment_index(time)?;
        let segment = &self.elements[index];
        if segment.start() == time {
            let point = index.checked_sub(1)?;
            Some(self.elements[point].first_value().clone())
        } else {
            Some(segment.line_at(time))
        }
    }

    /// Right limit at `time`, or `None` outside `[start, end)`.
    pub fn right_limit_at(&self, time: &Rational) -> Option<Rational> {
        let index = self.segment_index(time)?;
        Some(self.elements[index].line_at(time))
    }

    /// Left limit at `time`, or `None` outside `(start, end]`.
    pub fn left_limit_at(&self, time: &Rational) -> Option<Rational> {
        if *time <= self.start || *time > self.end {
            return None;
        }
        let count = self.elements.partition_point(|e| e.start() < time);
        let segment = &self.elements[count.checked_sub(1)?];
        Some(segment.line_at(time))
    }

    /// Slope of the segment right after `time`.
    pub fn slope_after(&self, time: &Rational) -> Option<Rational> {
        let index = self.segment_index(time)?;
        Some(self.elements[index].slope())
    }

    /// Supremum of the values, including limits at segment ends.
    pub fn supremum(&self) -> Rational {
        self.elements
            .iter()
            .flat_map(|e| [e.first_value().clone(), e.last_value()])
            .max()
            .unwrap_or(Rational::MinusInfinity)
    }

    /// Infimum of the values, including limits at segment ends.
    pub fn infimum(&self) -> Rational {
        self.elements
            .iter()
            .flat_map(|e| [e.first_value().clone(), e.last_value()])
            .min()
            .unwrap_or(Rational::PlusInfinity)
    }

    /// True when the function never decreases over the window.
    pub fn is_non_decreasing(&self) -> bool {
        let slopes_ok = self
            .elements
            .iter()
            .all(|e| !e.slope().is_negative());
        let joints_ok = self
            .elements
            .windows(2)
            .all(|pair| pair[0].last_value() <= *pair[1].first_value());
        slopes_ok && joints_ok
    }

    /// True when the two sequences describe the same function.
    pub fn equivalent(&self, other: &Sequence) -> bool {
        if self.start != other.start || self.end != other.end {
            return false;
        }
        self.optimize().elements == other.optimize().elements
    }
}

// =============================================================================
// TRANSFORMATIONS
// =============================================================================

impl Sequence {
    /// Restriction to `[from, to)`, which must lie inside the window.
    pub fn cut(&self, from: &Rational, to: &Rational) -> CurveResult<Sequence> {
        if *from < self.start || *to > self.end || from > to {
            return Err(CurveError::sequence(format!(
                "cannot cut [{}, {}) out of [{}, {})",
                from, to, self.start, self.end
            )));
        }
        if from == to {
            return Ok(Self::empty(from.clone()));
        }

        let first = self
            .value_at(from)
            .ok_or_else(|| CurveError::OutOfDomain { time: from.clone() })?;
        let mut out = vec![Element::point(from.clone(), first)];
        for element in &self.elements {
            match element {
                Element::Point { time, .. } if time > from && time < to => {
                    out.push(element.clone());
                }
                Element::Segment { start, end, .. } if start < to && end > from => {
                    let lo = start.max(from).clone();
                    let hi = end.min(to).clone();
                    out.push(element.restrict(&lo, &hi));
                }
                _ => {}
            }
        }
        Ok(Self::from_canonical(out, from.clone(), to.clone()))
    }

    /// Make sure `time` is a breakpoint, splitting the segment across it.
    pub fn with_breakpoint(&self, time: &Rational) -> Sequence {
        let Some(index) = self.segment_index(time) else {
            return self.clone();
        };
        let segment = &self.elements[index];
        if segment.start() == time {
            return self.clone();
        }

        let mut elements = self.elements[..index].to_vec();
        elements.push(segment.restrict(segment.start(), time));
        elements.push(Element::point(time.clone(), segment.line_at(time)));
        elements.push(segment.restrict(time, segment.end()));
        elements.extend_from_slice(&self.elements[index + 1..]);
        Self::from_canonical(elements, self.start.clone(), self.end.clone())
    }

    /// Shift by `dt` in time and `dv` in value.
    pub fn shift(&self, dt: &Rational, dv: &Rational) -> Sequence {
        Self::from_canonical(
            self.elements.iter().map(|e| e.shift(dt, dv)).collect(),
            &self.start + dt,
            &self.end + dt,
        )
    }

    /// Multiply every value by `factor`.
    pub fn scale(&self, factor: &Rational) -> Sequence {
        Self::from_canonical(
            self.elements.iter().map(|e| e.scale(factor)).collect(),
            self.start.clone(),
            self.end.clone(),
        )
    }

    pub fn negate(&self) -> Sequence {
        self.scale(&Rational::from_integer(-1))
    }

    /// Merge segment-point-segment runs that lie on one line.
    pub fn optimize(&self) -> Sequence {
        let mut out: Vec<Element> = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            if let Element::Segment {
                end, slope, start_value, ..
            } = element
            {
                if let [.., previous, Element::Point { value, .. }] = out.as_slice() {
                    let continues = previous.is_segment()
                        && previous.slope() == *slope
                        && previous.last_value() == *value
                        && value == start_value;
                    if continues {
                        let merged = Element::segment(
                            previous.start().clone(),
                            end.clone(),
                            previous.first_value().clone(),
                            slope.clone(),
                        );
                        out.truncate(out.len() - 2);
                        out.push(merged);
                        continue;
                    }
                }
            }
            out.push(element.clone());
        }
        Self::from_canonical(out, self.start.clone(), self.end.clone())
    }

    /// Pointwise combination with another sequence over the same window.
    ///
    /// `value` combines values and limits; `slope` combines slopes of the
    /// pieces (ignored where the combined value is infinite).
    pub fn zip_with(
        &self,
        other: &Sequence,
        value: impl Fn(&Rational, &Rational) -> Rational,
        slope: impl Fn(&Rational, &Rational) -> Rational,
    ) -> CurveResult<Sequence> {
        if self.start != other.start || self.end != other.end {
            return Err(CurveError::sequence(format!(
                "windows [{}, {}) and [{}, {}) differ",
                self.start, self.end, other.start, other.end
            )));
        }

        let mut times: Vec<Rational> = self
            .breakpoints()
            .chain(other.breakpoints())
            .cloned()
            .collect();
        times.sort();
        times.dedup();
        times.push(self.end.clone());

        let missing = |time: &Rational| CurveError::OutOfDomain { time: time.clone() };
        let mut out = Vec::with_capacity(2 * times.len());
        for pair in times.windows(2) {
            let (p, q) = (&pair[0], &pair[1]);
            let a = self.value_at(p).ok_or_else(|| missing(p))?;
            let b = other.value_at(p).ok_or_else(|| missing(p))?;
            out.push(Element::point(p.clone(), value(&a, &b)));

            let a = self.right_limit_at(p).ok_or_else(|| missing(p))?;
            let b = other.right_limit_at(p).ok_or_else(|| missing(p))?;
            let ka = self.slope_after(p).ok_or_else(|| missing(p))?;
            let kb = other.slope_after(p).ok_or_else(|| missing(p))?;
            out.push(Element::segment(
                p.clone(),
                q.clone(),
                value(&a, &b),
                slope(&ka, &kb),
            ));
        }
        Ok(Self::from_canonical(
            out,
            self.start.clone(),
            self.end.clone(),
        ))
    }

    /// Pointwise minimum with another sequence over the same window.
    pub fn minimum(&self, other: &Sequence) -> Sequence {
        let pieces = self.elements.iter().chain(other.elements.iter()).cloned();
        Self::lower_envelope(pieces, self.start.clone(), self.end.clone())
    }

    /// Pointwise maximum with another sequence over the same window.
    pub fn maximum(&self, other: &Sequence) -> Sequence {
        let pieces = self.elements.iter().chain(other.elements.iter()).cloned();
        Self::upper_envelope(pieces, self.start.clone(), self.end.clone())
    }
}

impl fmt::Display for Sequence {
    /// Points followed by a segment starting at their value print as one
    /// left-closed segment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        let mut index = 0;
        while index < self.elements.len() {
            let element = &self.elements[index];
            match (element, self.elements.get(index + 1)) {
                (Element::Point { value, .. }, Some(next @ Element::Segment { start_value, .. }))
                    if value == start_value && value.is_finite() =>
                {
                    let text = next.to_string();
                    parts.push(format!("[{}", &text[1..]));
                    index += 2;
                }
                _ => {
                    parts.push(element.to_string());
                    index += 1;
                }
            }
        }
        write!(f, "{}", parts.join(" "))
    }
}
