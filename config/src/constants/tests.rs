//! Tests for the execution configuration.

use super::*;

/// Ensures the default configuration is sane.
///
/// # Examples
/// ```
/// use config::constants::ExecutionConfig;
/// let cfg = ExecutionConfig::default();
/// assert!(cfg.plot_width > 0);
/// ```
#[test]
fn default_config_is_valid() {
    let cfg = ExecutionConfig::default();
    assert!(!cfg.lazy);
    assert!(cfg.allow_overwrite && cfg.allow_type_change);
    assert_eq!(cfg.plot_width, DEFAULT_PLOT_WIDTH);
    assert_eq!(cfg.plot_height, DEFAULT_PLOT_HEIGHT);
}

/// Validates the builder rejects tiny canvases.
///
/// # Examples
/// ```
/// use config::constants::ExecutionConfig;
/// assert!(ExecutionConfig::new(false, false, 10, 600).is_err());
/// ```
#[test]
fn new_validates_plot_size() {
    assert_eq!(
        ExecutionConfig::new(false, false, 10, 600).unwrap_err(),
        ConfigError::InvalidPlotSize(10, 600)
    );
    assert_eq!(
        ExecutionConfig::new(false, false, 600, 99).unwrap_err(),
        ConfigError::InvalidPlotSize(600, 99)
    );
}

#[test]
fn new_keeps_store_permissions() {
    let cfg = ExecutionConfig::new(true, true, 400, 300).unwrap();
    assert!(cfg.lazy);
    assert!(cfg.stop_on_error);
    assert!(cfg.allow_overwrite);
    assert!(cfg.allow_type_change);
}

#[test]
fn config_error_display_mentions_size() {
    let message = ConfigError::InvalidPlotSize(1, 2).to_string();
    assert!(message.contains("1x2"), "unexpected message: {message}");
}
