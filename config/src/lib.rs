//! # Config Crate
//!
//! Centralized configuration constants for the MPPG interpreter.
//! Plot defaults, code generation identifiers and curve-literal normalization
//! lengths are defined here so every crate agrees on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_PLOT_OUTPUT, ExecutionConfig};
//!
//! let config = ExecutionConfig::default();
//! assert!(!config.lazy);
//! assert!(DEFAULT_PLOT_OUTPUT.ends_with(".svg"));
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Exact Semantics**: Nothing here affects the exact rational value domain
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
