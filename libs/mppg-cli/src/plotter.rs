//! # SVG Plotter
//!
//! Renders plot requests as SVG files with the `svg` crate.
//!
//! Curves are drawn exactly: every segment of the curve up to the horizon
//! becomes a straight stroke, and isolated points (values that differ from
//! both one-sided limits) become dots. Infinite values are not drawn.
//!
//! SVG has Y pointing down, so values are flipped when mapped to pixels.

use config::constants::{
    plot_horizon, MIN_PLOT_HORIZON, PLOT_MARGIN, PLOT_PALETTE, PLOT_STROKE_WIDTH,
};
use mppg_eval::plot::{PlotRequest, Plotter};
use nc_curves::{Curve, Element, Rational};
use svg::node::element::{Circle, Line, Path, Rectangle, Text};
use svg::Document;
use tracing::{debug, warn};

/// Writes each request to the file named by its `out` setting.
#[derive(Debug, Clone)]
pub struct SvgPlotter {
    width: u32,
    height: u32,
}

impl SvgPlotter {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Plotter for SvgPlotter {
    fn plot(&mut self, request: &PlotRequest) -> Result<(), String> {
        if request.settings.browser || request.settings.gui {
            warn!("browser and gui plot targets are not supported; writing SVG only");
        }
        let document = render(request, self.width, self.height)?;
        svg::save(&request.settings.output, &document).map_err(|error| {
            format!("cannot write {}: {}", request.settings.output, error)
        })?;
        debug!(output = %request.settings.output, curves = request.curves.len(), "plot written");
        Ok(())
    }
}

// =============================================================================
// SAMPLING
// =============================================================================

/// A drawable piece of a curve, in curve coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece {
    Stroke { from: (f64, f64), to: (f64, f64) },
    Dot { at: (f64, f64) },
}

/// Finite pieces of `curve` over `[x_min, x_max]`.
fn pieces(curve: &Curve, x_min: f64, x_max: f64) -> Result<Vec<Piece>, String> {
    let end = Rational::from_integer(x_max.ceil() as i64 + 1);
    let sequence = curve.extend_to(&end).map_err(|error| error.to_string())?;
    let elements = sequence.elements();

    let mut pieces = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        match element {
            Element::Point { time, value } => {
                if value.is_infinite() {
                    continue;
                }
                let left = index
                    .checked_sub(1)
                    .and_then(|previous| elements.get(previous))
                    .map(Element::last_value);
                let right = elements.get(index + 1).map(|next| next.first_value().clone());
                let isolated =
                    left.as_ref() != Some(value) && right.as_ref() != Some(value);
                let t = time.to_f64();
                if isolated && (x_min..=x_max).contains(&t) {
                    pieces.push(Piece::Dot {
                        at: (t, value.to_f64()),
                    });
                }
            }
            Element::Segment {
                start, start_value, ..
            } => {
                if start_value.is_infinite() {
                    continue;
                }
                let (t0, t1) = (start.to_f64(), element.end().to_f64());
                let (v0, v1) = (start_value.to_f64(), element.last_value().to_f64());
                if let Some(piece) = clipped((t0, v0), (t1, v1), x_min, x_max) {
                    pieces.push(piece);
                }
            }
        }
    }
    Ok(pieces)
}

/// The part of a stroke inside `[x_min, x_max]`.
fn clipped(from: (f64, f64), to: (f64, f64), x_min: f64, x_max: f64) -> Option<Piece> {
    if to.0 < x_min || from.0 > x_max || to.0 <= from.0 {
        return None;
    }
    let at = |x: f64| from.1 + (to.1 - from.1) * (x - from.0) / (to.0 - from.0);
    let start = from.0.max(x_min);
    let end = to.0.min(x_max);
    Some(Piece::Stroke {
        from: (start, at(start)),
        to: (end, at(end)),
    })
}

// =============================================================================
// RENDERING
// =============================================================================

/// Maps curve coordinates to pixels.
struct Frame {
    x: (f64, f64),
    y: (f64, f64),
    width: f64,
    height: f64,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        PLOT_MARGIN + (x - self.x.0) / (self.x.1 - self.x.0) * (self.width - 2.0 * PLOT_MARGIN)
    }

    fn py(&self, y: f64) -> f64 {
        self.height
            - PLOT_MARGIN
            - (y - self.y.0) / (self.y.1 - self.y.0) * (self.height - 2.0 * PLOT_MARGIN)
    }

    fn point(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (self.px(x), self.py(y))
    }
}

/// Horizontal range: `xlim`, or enough periods of the slowest curve.
fn x_range(request: &PlotRequest) -> (f64, f64) {
    if let Some((low, high)) = &request.settings.x_limits {
        return (low.to_f64(), high.to_f64());
    }
    let horizon = request
        .curves
        .iter()
        .map(|plotted| {
            plot_horizon(
                plotted.curve.pseudo_period_start().to_f64(),
                plotted.curve.pseudo_period_length().to_f64(),
            )
        })
        .fold(0.0, f64::max);
    (0.0, horizon.max(MIN_PLOT_HORIZON))
}

/// Vertical range: `ylim`, or the drawn values with a little headroom.
fn y_range(request: &PlotRequest, drawn: &[Vec<Piece>]) -> (f64, f64) {
    if let Some((low, high)) = &request.settings.y_limits {
        return (low.to_f64(), high.to_f64());
    }
    let values = drawn.iter().flatten().flat_map(|piece| match piece {
        Piece::Stroke { from, to } => vec![from.1, to.1],
        Piece::Dot { at } => vec![at.1],
    });
    let (low, high) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), v| {
        (low.min(v), high.max(v))
    });
    if !low.is_finite() {
        return (0.0, 1.0);
    }
    let low = low.min(0.0);
    if high <= low {
        return (low, low + 1.0);
    }
    (low, high + (high - low) * 0.05)
}

/// Build the SVG document for `request`.
pub fn render(request: &PlotRequest, width: u32, height: u32) -> Result<Document, String> {
    let (x_min, x_max) = x_range(request);
    let drawn = request
        .curves
        .iter()
        .map(|plotted| pieces(&plotted.curve, x_min, x_max))
        .collect::<Result<Vec<_>, _>>()?;
    let frame = Frame {
        x: (x_min, x_max),
        y: y_range(request, &drawn),
        width: f64::from(width),
        height: f64::from(height),
    };

    let mut document = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("viewBox", format!("0 0 {} {}", width, height))
        .set("width", width)
        .set("height", height)
        .add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", "white"),
        );
    document = axes(document, &frame, request);

    for (index, (plotted, pieces)) in request.curves.iter().zip(&drawn).enumerate() {
        let color = PLOT_PALETTE[index % PLOT_PALETTE.len()];
        let mut data = String::new();
        for piece in pieces {
            match *piece {
                Piece::Stroke { from, to } => {
                    let (x0, y0) = frame.point(from);
                    let (x1, y1) = frame.point(to);
                    data.push_str(&format!("M{:.2} {:.2} L{:.2} {:.2} ", x0, y0, x1, y1));
                }
                Piece::Dot { at } => {
                    let (x, y) = frame.point(at);
                    document = document.add(
                        Circle::new()
                            .set("cx", x)
                            .set("cy", y)
                            .set("r", PLOT_STROKE_WIDTH * 2.0)
                            .set("fill", color),
                    );
                }
            }
        }
        if !data.is_empty() {
            document = document.add(
                Path::new()
                    .set("d", data.trim_end())
                    .set("fill", "none")
                    .set("stroke", color)
                    .set("stroke-width", PLOT_STROKE_WIDTH),
            );
        }
        document = document.add(
            Text::new(plotted.name.as_str())
                .set("x", frame.width - PLOT_MARGIN)
                .set("y", PLOT_MARGIN + 14.0 * index as f64)
                .set("text-anchor", "end")
                .set("font-size", 12)
                .set("fill", color),
        );
    }
    Ok(document)
}

fn axes(document: Document, frame: &Frame, request: &PlotRequest) -> Document {
    let (left, bottom) = (PLOT_MARGIN, frame.height - PLOT_MARGIN);
    let (right, top) = (frame.width - PLOT_MARGIN, PLOT_MARGIN);
    let axis = |x1: f64, y1: f64, x2: f64, y2: f64| {
        Line::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2)
            .set("stroke", "black")
    };
    let label = |text: String, x: f64, y: f64, anchor: &str| {
        Text::new(text)
            .set("x", x)
            .set("y", y)
            .set("text-anchor", anchor)
            .set("font-size", 11)
    };

    let mut document = document
        .add(axis(left, bottom, right, bottom))
        .add(axis(left, bottom, left, top))
        .add(label(format!("{}", frame.x.0), left, bottom + 14.0, "middle"))
        .add(label(format!("{}", frame.x.1), right, bottom + 14.0, "middle"))
        .add(label(format!("{}", frame.y.0), left - 4.0, bottom, "end"))
        .add(label(format!("{:.2}", frame.y.1), left - 4.0, top, "end"));

    let settings = &request.settings;
    if let Some(title) = &settings.title {
        document = document.add(label(title.clone(), frame.width / 2.0, top / 2.0, "middle"));
    }
    if let Some(x_label) = &settings.x_label {
        document = document.add(label(
            x_label.clone(),
            frame.width / 2.0,
            frame.height - 8.0,
            "middle",
        ));
    }
    if let Some(y_label) = &settings.y_label {
        document = document.add(
            label(y_label.clone(), 12.0, frame.height / 2.0, "middle").set(
                "transform",
                format!("rotate(-90 12 {})", frame.height / 2.0),
            ),
        );
    }
    document
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mppg_eval::plot::{PlotSettings, PlottedCurve};
    use std::rc::Rc;

    fn q(value: i64) -> Rational {
        Rational::from_integer(value)
    }

    fn request(curves: Vec<(&str, Curve)>) -> PlotRequest {
        PlotRequest {
            curves: curves
                .into_iter()
                .map(|(name, curve)| PlottedCurve {
                    name: name.to_string(),
                    curve: Rc::new(curve),
                })
                .collect(),
            settings: PlotSettings::default(),
        }
    }

    #[test]
    fn test_rate_latency_pieces() {
        let curve = Curve::rate_latency(q(2), q(1)).unwrap();
        let pieces = pieces(&curve, 0.0, 3.0).unwrap();
        let strokes: Vec<_> = pieces
            .iter()
            .filter(|piece| matches!(piece, Piece::Stroke { .. }))
            .collect();
        assert!(!strokes.is_empty());
        assert!(pieces.iter().all(|piece| !matches!(piece, Piece::Dot { .. })));
        let Piece::Stroke { to, .. } = strokes[strokes.len() - 1] else {
            unreachable!()
        };
        assert_eq!(*to, (3.0, 4.0));
    }

    #[test]
    fn test_isolated_points_become_dots() {
        // 0 at the origin, 5 right after it
        let curve = Curve::token_bucket(q(1), q(5)).unwrap();
        let pieces = pieces(&curve, 0.0, 2.0).unwrap();
        assert!(pieces.contains(&Piece::Dot { at: (0.0, 0.0) }));
    }

    #[test]
    fn test_infinite_values_are_skipped() {
        let pieces = pieces(&Curve::delay(q(1)).unwrap(), 0.0, 4.0).unwrap();
        assert!(pieces.iter().all(|piece| match piece {
            Piece::Stroke { from, to } => from.1 == 0.0 && to.1 == 0.0,
            Piece::Dot { at } => at.1 == 0.0,
        }));
    }

    #[test]
    fn test_clipping() {
        assert_eq!(clipped((0.0, 0.0), (4.0, 4.0), 1.0, 2.0), Some(Piece::Stroke {
            from: (1.0, 1.0),
            to: (2.0, 2.0)
        }));
        assert_eq!(clipped((3.0, 0.0), (4.0, 4.0), 1.0, 2.0), None);
    }

    #[test]
    fn test_default_horizon_follows_period() {
        let request = request(vec![("s", Curve::stair(q(0), q(2), q(1)).unwrap())]);
        let (low, high) = x_range(&request);
        assert_eq!(low, 0.0);
        assert!(high >= 6.0);
    }

    #[test]
    fn test_render_contains_curves_and_title() {
        let mut request = request(vec![
            ("alpha", Curve::token_bucket(q(1), q(2)).unwrap()),
            ("beta", Curve::rate_latency(q(3), q(1)).unwrap()),
        ]);
        request.settings.title = Some("arrival vs service".to_string());
        let svg = render(&request, 400, 300).unwrap().to_string();
        assert!(svg.contains("arrival vs service"));
        assert!(svg.contains(PLOT_PALETTE[0]));
        assert!(svg.contains(PLOT_PALETTE[1]));
        assert!(svg.contains("alpha"));
        assert_eq!(svg.matches("<path").count(), 2);
    }
}
