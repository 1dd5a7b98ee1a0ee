//! # Curve Errors
//!
//! Error type shared by every curve constructor and operator.

use crate::rational::Rational;
use thiserror::Error;

/// Errors raised by curve construction and curve operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// Elements are out of order, overlap or leave the sequence window.
    #[error("invalid sequence: {reason}")]
    InvalidSequence { reason: String },

    /// Pseudo-period parameters are not usable (T < 0, D ≤ 0, infinite C).
    #[error("invalid pseudo-period: {reason}")]
    InvalidPeriod { reason: String },

    /// An operator argument is outside the operator's domain.
    #[error("invalid argument to {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// The operator requires a non-decreasing operand.
    #[error("{operation} requires a non-decreasing curve")]
    NotNonDecreasing { operation: &'static str },

    /// The sub-additive closure diverges to -inf.
    #[error("sub-additive closure diverges: {reason}")]
    DivergentClosure { reason: String },

    /// The operand combination is outside the supported class.
    #[error("unsupported operation {operation}: {reason}")]
    Unsupported {
        operation: &'static str,
        reason: String,
    },

    /// A time outside the curve domain was queried.
    #[error("time {time} is outside the curve domain")]
    OutOfDomain { time: Rational },

    /// Division by zero or between infinities.
    #[error("cannot divide {numerator} by {denominator}")]
    DivisionByZero {
        numerator: Rational,
        denominator: Rational,
    },
}

/// Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

impl CurveError {
    pub(crate) fn sequence(reason: impl Into<String>) -> Self {
        Self::InvalidSequence {
            reason: reason.into(),
        }
    }

    pub(crate) fn period(reason: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            reason: reason.into(),
        }
    }

    pub(crate) fn argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            operation,
            reason: reason.into(),
        }
    }
}
