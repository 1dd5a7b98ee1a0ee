//! # Values
//!
//! MPPG is typed with exactly two value types: curves (Functions) and
//! rationals (Numbers).
//!
//! ## Example
//!
//! ```rust
//! use mppg_eval::value::{Value, ValueTag};
//! use nc_curves::Rational;
//!
//! let x = Value::Number(Rational::from_integer(2));
//! assert_eq!(x.tag(), ValueTag::Number);
//! assert_eq!(x.to_string(), "2");
//! ```

use crate::error::{EvalError, EvalResult};
use nc_curves::{Curve, Rational};
use std::fmt;
use std::rc::Rc;

// =============================================================================
// TAGS
// =============================================================================

/// Type of a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTag {
    Function,
    Number,
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => f.write_str("Function"),
            Self::Number => f.write_str("Number"),
        }
    }
}

/// Type of an expression node, known only once it is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Function,
    Number,
    Undetermined,
}

impl From<ValueTag> for NodeTag {
    fn from(tag: ValueTag) -> Self {
        match tag {
            ValueTag::Function => Self::Function,
            ValueTag::Number => Self::Number,
        }
    }
}

// =============================================================================
// VALUE
// =============================================================================

/// A resolved MPPG value.
///
/// Curves are shared, never copied, between variables and expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Function(Rc<Curve>),
    Number(Rational),
}

impl Value {
    /// Wrap a freshly computed curve.
    pub fn function(curve: Curve) -> Self {
        Self::Function(Rc::new(curve))
    }

    pub fn tag(&self) -> ValueTag {
        match self {
            Self::Function(_) => ValueTag::Function,
            Self::Number(_) => ValueTag::Number,
        }
    }

    /// The curve, or a type mismatch.
    pub fn as_curve(&self) -> EvalResult<&Rc<Curve>> {
        match self {
            Self::Function(curve) => Ok(curve),
            Self::Number(_) => Err(EvalError::TypeMismatch {
                expected: ValueTag::Function,
                found: ValueTag::Number,
            }),
        }
    }

    /// The number, or a type mismatch.
    pub fn as_number(&self) -> EvalResult<&Rational> {
        match self {
            Self::Number(number) => Ok(number),
            Self::Function(_) => Err(EvalError::TypeMismatch {
                expected: ValueTag::Number,
                found: ValueTag::Function,
            }),
        }
    }
}

impl From<Rational> for Value {
    fn from(number: Rational) -> Self {
        Self::Number(number)
    }
}

impl From<Curve> for Value {
    fn from(curve: Curve) -> Self {
        Self::function(curve)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(curve) => write!(f, "{}", curve),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(Value::function(Curve::zero()).tag(), ValueTag::Function);
        assert_eq!(NodeTag::from(ValueTag::Number), NodeTag::Number);
    }

    #[test]
    fn test_accessors_report_mismatch() {
        let number = Value::Number(Rational::one());
        assert!(number.as_number().is_ok());
        assert_eq!(
            number.as_curve().unwrap_err(),
            EvalError::TypeMismatch {
                expected: ValueTag::Function,
                found: ValueTag::Number
            }
        );
    }
}
