//! # Envelopes
//!
//! Lower and upper envelopes of arbitrary, possibly overlapping elements.
//! Uncovered times get the neutral value: `+inf` for the lower envelope,
//! `-inf` for the upper one.

use super::Sequence;
use crate::element::Element;
use crate::rational::Rational;
use std::collections::{BTreeMap, BTreeSet};

impl Sequence {
    /// Pointwise infimum of `pieces` over `[start, end)`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use nc_curves::{Element, Rational, Sequence};
    ///
    /// let q = Rational::from_integer;
    /// let pieces = vec![
    ///     Element::segment(q(0), q(4), q(0), q(1)),
    ///     Element::segment(q(1), q(3), q(1), q(-1)),
    /// ];
    /// let envelope = Sequence::lower_envelope(pieces, q(0), q(4));
    /// assert_eq!(envelope.value_at(&q(2)), Some(q(0)));
    /// assert_eq!(envelope.value_at(&q(0)), Some(Rational::PlusInfinity));
    /// ```
    pub fn lower_envelope(
        pieces: impl IntoIterator<Item = Element>,
        start: Rational,
        end: Rational,
    ) -> Sequence {
        if start >= end {
            return Sequence::empty(start);
        }

        let mut breakpoints: BTreeSet<Rational> = BTreeSet::new();
        breakpoints.insert(start.clone());
        breakpoints.insert(end.clone());
        let mut points: BTreeMap<Rational, Rational> = BTreeMap::new();
        let mut segments: Vec<Element> = Vec::new();

        for piece in pieces {
            match &piece {
                Element::Point { time, value } => {
                    if *time < start || *time >= end {
                        continue;
                    }
                    let slot = points
                        .entry(time.clone())
                        .or_insert(Rational::PlusInfinity);
                    if value < slot {
                        *slot = value.clone();
                    }
                    breakpoints.insert(time.clone());
                }
                Element::Segment { start: from, end: to, .. } => {
                    let lo = from.max(&start).clone();
                    let hi = to.min(&end).clone();
                    if lo >= hi || piece.first_value().is_plus_infinity() {
                        continue;
                    }
                    breakpoints.insert(lo.clone());
                    breakpoints.insert(hi.clone());
                    segments.push(piece.restrict(&lo, &hi));
                }
            }
        }
        segments.sort_by(|a, b| a.start().cmp(b.start()));

        let breakpoints: Vec<Rational> = breakpoints.into_iter().collect();
        let mut out = Vec::with_capacity(2 * breakpoints.len());
        let mut active: Vec<Element> = Vec::new();
        let mut next = 0;

        for pair in breakpoints.windows(2) {
            let (p, q) = (&pair[0], &pair[1]);
            active.retain(|s| s.end() > p);

            let mut value = points.get(p).cloned().unwrap_or(Rational::PlusInfinity);
            for segment in &active {
                let candidate = segment.line_at(p);
                if candidate < value {
                    value = candidate;
                }
            }
            out.push(Element::point(p.clone(), value));

            while next < segments.len() && segments[next].start() == p {
                active.push(segments[next].clone());
                next += 1;
            }
            out.extend(lines_envelope(&active, p, q));
        }

        Sequence::from_canonical(out, start, end).optimize()
    }

    /// Pointwise supremum of `pieces` over `[start, end)`.
    pub fn upper_envelope(
        pieces: impl IntoIterator<Item = Element>,
        start: Rational,
        end: Rational,
    ) -> Sequence {
        let negated = pieces.into_iter().map(|e| e.negate());
        Self::lower_envelope(negated, start, end).negate()
    }
}

/// Lower envelope over the open interval `(p, q)` of segments that all
/// cover it. Returns segments and their junction points.
fn lines_envelope(active: &[Element], p: &Rational, q: &Rational) -> Vec<Element> {
    if active.iter().any(|s| s.first_value().is_minus_infinity()) {
        return vec![Element::flat(p.clone(), q.clone(), Rational::MinusInfinity)];
    }
    let lines: Vec<(Rational, Rational)> = active
        .iter()
        .filter(|s| s.first_value().is_finite())
        .map(|s| (s.line_at(p), s.slope()))
        .collect();

    let Some(first) = lines
        .iter()
        .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
    else {
        return vec![Element::flat(p.clone(), q.clone(), Rational::PlusInfinity)];
    };

    let at = |line: &(Rational, Rational), time: &Rational| &line.0 + &(&line.1 * &(time - p));
    let mut current = first.clone();
    let mut cursor = p.clone();
    let mut out = Vec::new();

    loop {
        // Earliest line overtaking the current one from below.
        let mut best: Option<(Rational, &(Rational, Rational))> = None;
        for line in lines.iter().filter(|l| l.1 < current.1) {
            let Some(offset) = (&line.0 - &current.0).checked_div(&(&current.1 - &line.1)) else {
                continue;
            };
            let crossing = p + &offset;
            if crossing <= cursor || crossing >= *q {
                continue;
            }
            let better = match &best {
                None => true,
                Some((time, chosen)) => crossing < *time || (crossing == *time && line.1 < chosen.1),
            };
            if better {
                best = Some((crossing, line));
            }
        }

        match best {
            None => {
                out.push(Element::segment(
                    cursor.clone(),
                    q.clone(),
                    at(&current, &cursor),
                    current.1.clone(),
                ));
                return out;
            }
            Some((crossing, line)) => {
                out.push(Element::segment(
                    cursor.clone(),
                    crossing.clone(),
                    at(&current, &cursor),
                    current.1.clone(),
                ));
                out.push(Element::point(crossing.clone(), at(&current, &crossing)));
                current = line.clone();
                cursor = crossing;
            }
        }
    }
}
