//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// CURVE LITERAL TESTS
// =============================================================================

#[test]
fn test_uaf_tail_lengths_are_ordered() {
    assert!(
        UAF_POINT_AFFINE_TAIL_LENGTH < UAF_JUMP_TAIL_LENGTH,
        "a jump tail needs room for an extra breakpoint"
    );
}

// =============================================================================
// PLOT TESTS
// =============================================================================

#[test]
fn test_default_plot_size_is_valid() {
    assert!(DEFAULT_PLOT_WIDTH >= MIN_PLOT_DIMENSION);
    assert!(DEFAULT_PLOT_HEIGHT >= MIN_PLOT_DIMENSION);
}

#[test]
fn test_plot_margin_fits_canvas() {
    assert!(
        PLOT_MARGIN * 2.0 < MIN_PLOT_DIMENSION as f64,
        "margins must leave a drawable area"
    );
}

#[test]
fn test_palette_is_not_empty() {
    assert!(!PLOT_PALETTE.is_empty());
    assert!(PLOT_PALETTE.iter().all(|c| c.starts_with('#')));
}

#[test]
fn test_plot_horizon_covers_periods() {
    let horizon = plot_horizon(2.0, 1.0);
    assert_eq!(horizon, 2.0 + DEFAULT_PLOT_HORIZON_PERIODS as f64);
}

#[test]
fn test_plot_horizon_has_minimum() {
    assert_eq!(plot_horizon(0.0, 0.0), MIN_PLOT_HORIZON);
}

// =============================================================================
// CODEGEN TESTS
// =============================================================================

#[test]
fn test_codegen_indent_is_whitespace() {
    assert!(CODEGEN_INDENT.chars().all(char::is_whitespace));
}

#[test]
fn test_codegen_comment_marker() {
    assert_eq!(CODEGEN_COMMENT_MARKER, "//");
}

#[test]
fn test_codegen_crate_is_identifier() {
    assert!(CODEGEN_CURVE_CRATE
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_'));
}
