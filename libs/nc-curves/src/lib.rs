//! # NC-Curves
//!
//! Exact ultimately pseudo-periodic (UPP) piecewise-affine curves and the
//! (min,+) / (max,+) operators of network calculus.
//!
//! ## Architecture
//!
//! ```text
//! Rational → Element → Sequence → Curve → ops (inherent methods on Curve)
//! ```
//!
//! - [`Rational`]: exact rationals extended with `+inf` and `-inf`
//! - [`Element`]: a point, or an affine piece over an open interval
//! - [`Sequence`]: a canonical element list over a finite window
//! - [`Curve`]: a base sequence plus the pseudo-period `(T, D, C)`
//!
//! ## Example
//!
//! ```rust
//! use nc_curves::{Curve, Rational};
//!
//! let q = Rational::from_integer;
//! let alpha = Curve::token_bucket(q(1), q(4)).unwrap();
//! let beta = Curve::rate_latency(q(2), q(3)).unwrap();
//!
//! assert_eq!(alpha.horizontal_deviation(&beta).unwrap(), q(5));
//! assert_eq!(alpha.vertical_deviation(&beta).unwrap(), q(7));
//! ```

pub mod curve;
pub mod element;
pub mod error;
mod ops;
pub mod rational;
pub mod sequence;

pub use curve::Curve;
pub use element::Element;
pub use error::{CurveError, CurveResult};
pub use rational::{ParseRationalError, Rational};
pub use sequence::Sequence;
