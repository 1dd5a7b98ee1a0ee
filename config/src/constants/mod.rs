//! # Configuration Constants
//!
//! Centralized configuration values shared across the MPPG crates.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.
//!
//! ## Categories
//!
//! - **Curve literals**: Normalization lengths used by the curve constructor
//! - **Plotting**: Canvas size, margins and sampling horizon
//! - **Code generation**: Identifiers and layout of generated Rust source

use std::fmt;

// =============================================================================
// CURVE LITERAL CONSTANTS
// =============================================================================

/// Length of the normalized final segment of an ultimately-affine literal
/// whose tail starts with a point lying on the tail line.
///
/// # Examples
/// ```
/// use config::constants::UAF_POINT_AFFINE_TAIL_LENGTH;
/// assert_eq!(UAF_POINT_AFFINE_TAIL_LENGTH, 1);
/// ```
pub const UAF_POINT_AFFINE_TAIL_LENGTH: i64 = 1;

/// Length of the normalized final segment of an ultimately-affine literal
/// whose tail starts with a jump (open start or a point off the line).
///
/// The tail is split in two so that the pseudo-period starts strictly after
/// the discontinuity.
///
/// # Examples
/// ```
/// use config::constants::UAF_JUMP_TAIL_LENGTH;
/// assert_eq!(UAF_JUMP_TAIL_LENGTH, 2);
/// ```
pub const UAF_JUMP_TAIL_LENGTH: i64 = 2;

// =============================================================================
// PLOT CONSTANTS
// =============================================================================

/// Output file written by `plot(...)` when no `out=` setting is given.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_PLOT_OUTPUT;
/// assert!(DEFAULT_PLOT_OUTPUT.ends_with(".svg"));
/// ```
pub const DEFAULT_PLOT_OUTPUT: &str = "plot.svg";

/// Default canvas width in pixels.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_PLOT_WIDTH;
/// assert!(DEFAULT_PLOT_WIDTH >= 100);
/// ```
pub const DEFAULT_PLOT_WIDTH: u32 = 800;

/// Default canvas height in pixels.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_PLOT_HEIGHT;
/// assert!(DEFAULT_PLOT_HEIGHT >= 100);
/// ```
pub const DEFAULT_PLOT_HEIGHT: u32 = 600;

/// Smallest accepted canvas dimension.
pub const MIN_PLOT_DIMENSION: u32 = 100;

/// Blank border around the plotting area, in pixels.
///
/// # Examples
/// ```
/// use config::constants::{PLOT_MARGIN, DEFAULT_PLOT_WIDTH};
/// let drawable = DEFAULT_PLOT_WIDTH as f64 - 2.0 * PLOT_MARGIN;
/// assert!(drawable > 0.0);
/// ```
pub const PLOT_MARGIN: f64 = 45.0;

/// Stroke width of plotted curves.
pub const PLOT_STROKE_WIDTH: f64 = 1.5;

/// Colors cycled through when several curves share a plot.
///
/// # Examples
/// ```
/// use config::constants::PLOT_PALETTE;
/// let color = PLOT_PALETTE[7 % PLOT_PALETTE.len()];
/// assert!(color.starts_with('#'));
/// ```
pub const PLOT_PALETTE: [&str; 6] = [
    "#1f77b4", "#d62728", "#2ca02c", "#ff7f0e", "#9467bd", "#8c564b",
];

/// Number of pseudo-periods shown after the transient part when the plot has
/// no explicit `xlim`.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_PLOT_HORIZON_PERIODS;
/// assert!(DEFAULT_PLOT_HORIZON_PERIODS >= 1);
/// ```
pub const DEFAULT_PLOT_HORIZON_PERIODS: u32 = 3;

/// Smallest horizontal range drawn when no `xlim` is given.
pub const MIN_PLOT_HORIZON: f64 = 1.0;

/// Computes the default horizontal range of a plot from a curve's
/// pseudo-period start and length.
///
/// # Examples
/// ```
/// use config::constants::plot_horizon;
/// assert_eq!(plot_horizon(2.0, 1.0), 5.0);
/// ```
pub fn plot_horizon(transient_end: f64, period_length: f64) -> f64 {
    let horizon = transient_end + DEFAULT_PLOT_HORIZON_PERIODS as f64 * period_length;
    horizon.max(MIN_PLOT_HORIZON)
}

// =============================================================================
// CODEGEN CONSTANTS
// =============================================================================

/// Indentation of one block level in generated source.
///
/// # Examples
/// ```
/// use config::constants::CODEGEN_INDENT;
/// assert_eq!(CODEGEN_INDENT.len(), 4);
/// ```
pub const CODEGEN_INDENT: &str = "    ";

/// Marker that prefixes comments passed through to generated source.
///
/// # Examples
/// ```
/// use config::constants::CODEGEN_COMMENT_MARKER;
/// let line = format!("{} {}", CODEGEN_COMMENT_MARKER, "arrival curve");
/// assert_eq!(line, "// arrival curve");
/// ```
pub const CODEGEN_COMMENT_MARKER: &str = "//";

/// Crate name that generated code imports the curve algebra from.
///
/// # Examples
/// ```
/// use config::constants::CODEGEN_CURVE_CRATE;
/// assert_eq!(format!("use {CODEGEN_CURVE_CRATE}::Curve;"), "use nc_curves::Curve;");
/// ```
pub const CODEGEN_CURVE_CRATE: &str = "nc_curves";

// =============================================================================
// EXECUTION CONFIG
// =============================================================================

/// Immutable snapshot of the settings a program run is executed with.
///
/// # Examples
/// ```
/// use config::constants::ExecutionConfig;
/// let config = ExecutionConfig::default();
/// assert!(config.allow_overwrite);
/// assert!(!config.stop_on_error);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Defer assignment evaluation until a value is needed.
    pub lazy: bool,
    /// Halt at the first failing statement.
    pub stop_on_error: bool,
    /// Permit re-assigning a name with a value of the same type.
    pub allow_overwrite: bool,
    /// Permit re-assigning a name with a value of the other type.
    pub allow_type_change: bool,
    /// Canvas width of rendered plots.
    pub plot_width: u32,
    /// Canvas height of rendered plots.
    pub plot_height: u32,
}

impl ExecutionConfig {
    /// Builds a configuration, rejecting plot canvases too small to draw on.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ExecutionConfig;
    /// let cfg = ExecutionConfig::new(true, false, 1024, 768).expect("valid config");
    /// assert!(cfg.lazy);
    /// assert_eq!(cfg.plot_width, 1024);
    /// ```
    pub fn new(
        lazy: bool,
        stop_on_error: bool,
        plot_width: u32,
        plot_height: u32,
    ) -> Result<Self, ConfigError> {
        if plot_width < MIN_PLOT_DIMENSION || plot_height < MIN_PLOT_DIMENSION {
            return Err(ConfigError::InvalidPlotSize(plot_width, plot_height));
        }
        Ok(Self {
            lazy,
            stop_on_error,
            plot_width,
            plot_height,
            ..Self::default()
        })
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            lazy: false,
            stop_on_error: false,
            allow_overwrite: true,
            allow_type_change: true,
            plot_width: DEFAULT_PLOT_WIDTH,
            plot_height: DEFAULT_PLOT_HEIGHT,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when a plot canvas dimension is below [`MIN_PLOT_DIMENSION`].
    InvalidPlotSize(u32, u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPlotSize(width, height) => {
                write!(
                    f,
                    "plot size must be at least {MIN_PLOT_DIMENSION}x{MIN_PLOT_DIMENSION}: {width}x{height}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
