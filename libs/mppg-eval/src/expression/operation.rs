//! # Operations
//!
//! Every computation an applied expression can perform, once dispatch has
//! picked the operator family, and how each one is written back as MPPG.

use crate::error::{EvalError, EvalResult};
use crate::value::{Value, ValueTag};
use mppg_parser::Builtin;
use nc_curves::{Curve, Rational};

/// Which value of a curve at a time point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    /// `f(t)`
    Exact,
    /// `f(t^-)`
    Left,
    /// `f(t^+)`
    Right,
}

impl Limit {
    /// Suffix written after the time argument.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Exact => "",
            Self::Left => "^-",
            Self::Right => "^+",
        }
    }
}

/// A disambiguated operation.
///
/// Curve-by-number operations take the curve first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Numbers
    Sum,
    Difference,
    Product,
    Quotient,
    Least,
    Greatest,
    Opposite,

    // Curves
    Minimum,
    Maximum,
    Addition,
    Subtraction,
    Convolution,
    MaxPlusConvolution,
    Deconvolution,
    MaxPlusDeconvolution,
    /// Curve times number.
    Scale,
    /// Curve divided by number.
    InverseScale,
    Negation,
    /// Number promoted to a constant curve.
    Constant,

    Builtin(Builtin),
    ValueAt(Limit),
}

/// How an operation is written in canonical MPPG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Infix(&'static str),
    Prefix(&'static str),
    Call(&'static str),
    ValueAt(Limit),
    /// Written as its only operand.
    Implicit,
}

impl Operation {
    /// Type of the value the operation produces.
    pub fn result_tag(&self) -> ValueTag {
        match self {
            Self::Sum
            | Self::Difference
            | Self::Product
            | Self::Quotient
            | Self::Least
            | Self::Greatest
            | Self::Opposite
            | Self::ValueAt(_) => ValueTag::Number,
            Self::Builtin(builtin) if builtin.returns_number() => ValueTag::Number,
            _ => ValueTag::Function,
        }
    }

    pub fn notation(&self) -> Notation {
        match self {
            Self::Sum | Self::Addition => Notation::Infix("+"),
            Self::Difference | Self::Subtraction => Notation::Infix("-"),
            Self::Product | Self::Scale => Notation::Infix("*"),
            Self::Quotient | Self::InverseScale => Notation::Infix("/"),
            Self::Least | Self::Minimum => Notation::Infix("/\\"),
            Self::Greatest | Self::Maximum => Notation::Infix("\\/"),
            Self::Convolution => Notation::Infix("*_"),
            Self::MaxPlusConvolution => Notation::Infix("*^"),
            Self::Deconvolution => Notation::Infix("/_"),
            Self::MaxPlusDeconvolution => Notation::Infix("/^"),
            Self::Opposite | Self::Negation => Notation::Prefix("-"),
            Self::Constant => Notation::Implicit,
            Self::Builtin(builtin) => Notation::Call(builtin.name()),
            Self::ValueAt(limit) => Notation::ValueAt(*limit),
        }
    }

    /// Compute the operation on forced operand values.
    pub fn apply(&self, operands: &[Value]) -> EvalResult<Value> {
        let value = match self {
            Self::Sum => Value::Number(number_at(operands, 0)? + number_at(operands, 1)?),
            Self::Difference => Value::Number(number_at(operands, 0)? - number_at(operands, 1)?),
            Self::Product => Value::Number(number_at(operands, 0)? * number_at(operands, 1)?),
            Self::Quotient => Value::Number(number_at(operands, 0)?.try_div(&number_at(operands, 1)?)?),
            Self::Least => Value::Number(number_at(operands, 0)?.min(number_at(operands, 1)?)),
            Self::Greatest => Value::Number(number_at(operands, 0)?.max(number_at(operands, 1)?)),
            Self::Opposite => Value::Number(-number_at(operands, 0)?),

            Self::Minimum => curve_at(operands, 0)?.minimum(curve_at(operands, 1)?)?.into(),
            Self::Maximum => curve_at(operands, 0)?.maximum(curve_at(operands, 1)?)?.into(),
            Self::Addition => curve_at(operands, 0)?.addition(curve_at(operands, 1)?)?.into(),
            Self::Subtraction => curve_at(operands, 0)?.subtraction(curve_at(operands, 1)?)?.into(),
            Self::Convolution => curve_at(operands, 0)?.convolution(curve_at(operands, 1)?)?.into(),
            Self::MaxPlusConvolution => curve_at(operands, 0)?
                .max_plus_convolution(curve_at(operands, 1)?)?
                .into(),
            Self::Deconvolution => curve_at(operands, 0)?.deconvolution(curve_at(operands, 1)?)?.into(),
            Self::MaxPlusDeconvolution => curve_at(operands, 0)?
                .max_plus_deconvolution(curve_at(operands, 1)?)?
                .into(),
            Self::Scale => curve_at(operands, 0)?.scale(&number_at(operands, 1)?)?.into(),
            Self::InverseScale => {
                let factor = Rational::one().try_div(&number_at(operands, 1)?)?;
                curve_at(operands, 0)?.scale(&factor)?.into()
            }
            Self::Negation => curve_at(operands, 0)?.negate()?.into(),
            Self::Constant => Curve::constant(number_at(operands, 0)?).into(),

            Self::Builtin(builtin) => apply_builtin(*builtin, operands)?,
            Self::ValueAt(limit) => {
                let curve = curve_at(operands, 0)?;
                let time = number_at(operands, 1)?;
                Value::Number(match limit {
                    Limit::Exact => curve.value_at(&time)?,
                    Limit::Left => curve.left_limit_at(&time)?,
                    Limit::Right => curve.right_limit_at(&time)?,
                })
            }
        };
        Ok(value)
    }
}

fn apply_builtin(builtin: Builtin, operands: &[Value]) -> EvalResult<Value> {
    let number = |index| number_at(operands, index);
    let value = match builtin {
        Builtin::RateLatency => Curve::rate_latency(number(0)?, number(1)?)?.into(),
        Builtin::TokenBucket => Curve::token_bucket(number(0)?, number(1)?)?.into(),
        Builtin::Affine => Curve::affine(number(0)?, number(1)?)?.into(),
        Builtin::Step => Curve::step(number(0)?, number(1)?)?.into(),
        Builtin::Stair => Curve::stair(number(0)?, number(1)?, number(2)?)?.into(),
        Builtin::Delay => Curve::delay(number(0)?)?.into(),
        Builtin::Zero => Curve::zero().into(),
        Builtin::Epsilon => Curve::plus_infinity().into(),
        Builtin::SubadditiveClosure => curve_at(operands, 0)?.subadditive_closure()?.into(),
        Builtin::HorizontalShift => curve_at(operands, 0)?.horizontal_shift(&number(1)?)?.into(),
        Builtin::VerticalShift => curve_at(operands, 0)?.vertical_shift(&number(1)?)?.into(),
        Builtin::LowerPseudoInverse => curve_at(operands, 0)?.lower_pseudo_inverse()?.into(),
        Builtin::UpperPseudoInverse => curve_at(operands, 0)?.upper_pseudo_inverse()?.into(),
        Builtin::Composition => curve_at(operands, 0)?.composition(curve_at(operands, 1)?)?.into(),
        Builtin::UpperNonDecreasing => curve_at(operands, 0)?.to_upper_non_decreasing()?.into(),
        Builtin::NonNegativeUpperNonDecreasing => curve_at(operands, 0)?
            .to_non_negative_upper_non_decreasing()?
            .into(),
        Builtin::LeftContinuous => curve_at(operands, 0)?.to_left_continuous()?.into(),
        Builtin::RightContinuous => curve_at(operands, 0)?.to_right_continuous()?.into(),
        Builtin::HorizontalDeviation => {
            Value::Number(curve_at(operands, 0)?.horizontal_deviation(curve_at(operands, 1)?)?)
        }
        Builtin::VerticalDeviation => {
            Value::Number(curve_at(operands, 0)?.vertical_deviation(curve_at(operands, 1)?)?)
        }
    };
    Ok(value)
}

fn operand(operands: &[Value], index: usize) -> EvalResult<&Value> {
    operands
        .get(index)
        .ok_or_else(|| EvalError::malformed(format!("missing operand {}", index)))
}

fn number_at(operands: &[Value], index: usize) -> EvalResult<Rational> {
    operand(operands, index)?.as_number().cloned()
}

fn curve_at(operands: &[Value], index: usize) -> EvalResult<&Curve> {
    operand(operands, index)?.as_curve().map(|curve| curve.as_ref())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn q(v: i64) -> Rational {
        Rational::from_integer(v)
    }

    fn n(v: i64) -> Value {
        Value::Number(q(v))
    }

    #[test]
    fn test_scalar_operations() {
        assert_eq!(Operation::Sum.apply(&[n(3), n(4)]).unwrap(), n(7));
        assert_eq!(Operation::Least.apply(&[n(3), n(4)]).unwrap(), n(3));
        assert_eq!(
            Operation::Quotient.apply(&[n(3), n(4)]).unwrap(),
            Value::Number(Rational::new(3, 4).unwrap())
        );
        assert_eq!(Operation::Opposite.apply(&[n(2)]).unwrap(), n(-2));
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        assert!(matches!(
            Operation::Quotient.apply(&[n(1), n(0)]),
            Err(EvalError::Curve(_))
        ));
        let curve = Value::function(Curve::zero());
        assert!(Operation::InverseScale.apply(&[curve, n(0)]).is_err());
    }

    #[test]
    fn test_curve_operations() {
        let beta = Value::function(Curve::rate_latency(q(2), q(1)).unwrap());
        let scaled = Operation::Scale.apply(&[beta.clone(), n(3)]).unwrap();
        let expected = Curve::rate_latency(q(6), q(1)).unwrap();
        assert!(scaled.as_curve().unwrap().equivalent(&expected));

        let halved = Operation::InverseScale.apply(&[beta, n(2)]).unwrap();
        let expected = Curve::rate_latency(q(1), q(1)).unwrap();
        assert!(halved.as_curve().unwrap().equivalent(&expected));
    }

    #[test]
    fn test_builtin_and_value_at() {
        let stair = Operation::Builtin(Builtin::Stair)
            .apply(&[n(0), n(60), n(12)])
            .unwrap();
        assert_eq!(Operation::ValueAt(Limit::Exact).apply(&[stair.clone(), n(60)]).unwrap(), n(12));
        assert_eq!(Operation::ValueAt(Limit::Right).apply(&[stair, n(60)]).unwrap(), n(24));
    }

    #[test]
    fn test_operand_type_checked() {
        assert!(matches!(
            Operation::Convolution.apply(&[n(1), n(2)]),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_result_tags() {
        assert_eq!(Operation::Builtin(Builtin::HorizontalDeviation).result_tag(), ValueTag::Number);
        assert_eq!(Operation::Builtin(Builtin::Zero).result_tag(), ValueTag::Function);
        assert_eq!(Operation::ValueAt(Limit::Left).result_tag(), ValueTag::Number);
        assert_eq!(Operation::Scale.result_tag(), ValueTag::Function);
    }
}
