//! # Plot Requests
//!
//! `plot(...)` statements are evaluated to a list of named curves and a set of
//! rendering settings, then handed to a [`Plotter`]. Rendering itself lives
//! outside the evaluator; a plot failure is reported and never stops the
//! program.
//!
//! ## Example
//!
//! ```rust
//! use mppg_eval::plot::PlotSettings;
//!
//! let cst = mppg_parser::parse("plot(f, main=\"Delay\", xlim=[0, 10], gui)");
//! let settings: Vec<_> = cst.root.children[0]
//!     .children
//!     .iter()
//!     .filter(|node| node.kind == mppg_parser::NodeKind::PlotSetting)
//!     .collect();
//! let settings = PlotSettings::from_nodes(&settings).unwrap();
//! assert_eq!(settings.title.as_deref(), Some("Delay"));
//! assert!(settings.gui);
//! assert!(!settings.browser);
//! ```

use crate::error::{EvalError, EvalResult};
use crate::literal::number_child;
use config::constants::DEFAULT_PLOT_OUTPUT;
use mppg_parser::{CstNode, NodeKind};
use nc_curves::{Curve, Rational};
use serde::Serialize;
use std::rc::Rc;

// =============================================================================
// SETTINGS
// =============================================================================

/// Rendering settings of one plot statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotSettings {
    /// `main="..."`
    pub title: Option<String>,
    /// `xlab="..."`
    pub x_label: Option<String>,
    /// `ylab="..."`
    pub y_label: Option<String>,
    /// `xlim=[a, b]`
    pub x_limits: Option<(Rational, Rational)>,
    /// `ylim=[a, b]`
    pub y_limits: Option<(Rational, Rational)>,
    /// `out="..."`
    pub output: String,
    pub browser: bool,
    pub gui: bool,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            x_limits: None,
            y_limits: None,
            output: DEFAULT_PLOT_OUTPUT.to_string(),
            browser: false,
            gui: false,
        }
    }
}

impl PlotSettings {
    /// Read `PlotSetting` nodes; a repeated key keeps its last value.
    pub fn from_nodes(nodes: &[&CstNode]) -> EvalResult<Self> {
        let mut settings = Self::default();
        for node in nodes {
            let key = node.text_or_empty();
            let value = node.child(0).ok_or_else(|| {
                EvalError::malformed(format!("plot setting {} has no value", key))
            })?;
            match key {
                "main" => settings.title = Some(string(key, value)?),
                "xlab" => settings.x_label = Some(string(key, value)?),
                "ylab" => settings.y_label = Some(string(key, value)?),
                "out" => settings.output = string(key, value)?,
                "xlim" => settings.x_limits = Some(range(key, value)?),
                "ylim" => settings.y_limits = Some(range(key, value)?),
                "browser" => settings.browser = boolean(key, value)?,
                "gui" => settings.gui = boolean(key, value)?,
                _ => return Err(setting_error(format!("unknown setting {}", key))),
            }
        }
        Ok(settings)
    }
}

fn setting_error(reason: String) -> EvalError {
    EvalError::InvalidPlotSetting { reason }
}

fn expect_kind(key: &str, value: &CstNode, kind: NodeKind, what: &str) -> EvalResult<()> {
    if value.kind == kind {
        Ok(())
    } else {
        Err(setting_error(format!("{} expects {}", key, what)))
    }
}

fn string(key: &str, value: &CstNode) -> EvalResult<String> {
    expect_kind(key, value, NodeKind::StringLiteral, "a string")?;
    Ok(value.text_or_empty().to_string())
}

fn boolean(key: &str, value: &CstNode) -> EvalResult<bool> {
    expect_kind(key, value, NodeKind::BooleanLiteral, "true or false")?;
    Ok(value.text_or_empty() == "true")
}

fn range(key: &str, value: &CstNode) -> EvalResult<(Rational, Rational)> {
    expect_kind(key, value, NodeKind::Range, "a range [low, high]")?;
    let (low, high) = (number_child(value, 0)?, number_child(value, 1)?);
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(setting_error(format!(
            "{} range [{}, {}] must be finite and increasing",
            key, low, high
        )));
    }
    Ok((low, high))
}

// =============================================================================
// REQUESTS AND PLOTTERS
// =============================================================================

/// A curve to draw, labeled with its canonical expression.
#[derive(Debug, Clone)]
pub struct PlottedCurve {
    pub name: String,
    pub curve: Rc<Curve>,
}

/// Everything a plotter needs to render one `plot(...)` statement.
#[derive(Debug, Clone)]
pub struct PlotRequest {
    pub curves: Vec<PlottedCurve>,
    pub settings: PlotSettings,
}

impl PlotRequest {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|plotted| plotted.name.as_str())
    }
}

/// Renders plot requests.
pub trait Plotter {
    fn plot(&mut self, request: &PlotRequest) -> Result<(), String>;
}

/// Accepts every request and draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlotter;

impl Plotter for NullPlotter {
    fn plot(&mut self, _request: &PlotRequest) -> Result<(), String> {
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(source: &str) -> EvalResult<PlotSettings> {
        let cst = mppg_parser::parse(source);
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        let nodes = cst.root.children[0].find_children(NodeKind::PlotSetting);
        PlotSettings::from_nodes(&nodes)
    }

    #[test]
    fn test_defaults() {
        let settings = settings("plot(f)").unwrap();
        assert_eq!(settings, PlotSettings::default());
        assert_eq!(settings.output, DEFAULT_PLOT_OUTPUT);
    }

    #[test]
    fn test_all_settings() {
        let settings = settings(
            "plot(f, main=\"t\", xlab=\"x\", ylab=\"y\", xlim=[0, 10], ylim=[-1, 5/2], out=\"a.svg\", browser=false, gui)",
        )
        .unwrap();
        assert_eq!(settings.title.as_deref(), Some("t"));
        assert_eq!(settings.x_label.as_deref(), Some("x"));
        assert_eq!(settings.y_label.as_deref(), Some("y"));
        assert_eq!(
            settings.x_limits,
            Some((Rational::from_integer(0), Rational::from_integer(10)))
        );
        assert_eq!(
            settings.y_limits,
            Some((Rational::from_integer(-1), Rational::new(5, 2).unwrap()))
        );
        assert_eq!(settings.output, "a.svg");
        assert!(!settings.browser);
        assert!(settings.gui);
    }

    #[test]
    fn test_invalid_settings() {
        for source in [
            "plot(f, color=\"red\")",
            "plot(f, main=true)",
            "plot(f, xlim=\"wide\")",
            "plot(f, xlim=[3, 1])",
            "plot(f, ylim=[0, +inf])",
        ] {
            assert!(
                matches!(settings(source), Err(EvalError::InvalidPlotSetting { .. })),
                "{}",
                source
            );
        }
    }

    #[test]
    fn test_settings_serialize() {
        let json = serde_json::to_value(settings("plot(f, xlim=[0, 1/2])").unwrap()).unwrap();
        assert_eq!(json["output"], DEFAULT_PLOT_OUTPUT);
        assert_eq!(json["x_limits"][1], "1/2");
    }
}
