//! # Operator Dispatch
//!
//! MPPG spells several operators the same for curves and numbers. Once both
//! operand types are known, these tables pick the operation and say which
//! operand, if any, is promoted to a constant curve.
//!
//! | spelling | F, F | F, N | N, F | N, N |
//! |---|---|---|---|---|
//! | `+ - /\ \/` | curve op | promote right | promote left | scalar op |
//! | `*` | convolution | scale | scale | product |
//! | `/` | deconvolution | scale by inverse | invalid | quotient |
//! | `*_ *^ /_ /^` | curve op | promote right | promote left | invalid |
//!
//! ## Example
//!
//! ```rust
//! use mppg_eval::expression::dispatch::{dispatch_binary, BinaryOperator, BinaryRule};
//! use mppg_eval::expression::Operation;
//! use mppg_eval::value::ValueTag::{Function, Number};
//!
//! let plan = dispatch_binary(BinaryOperator::Star, BinaryRule::Function, Number, Function).unwrap();
//! assert_eq!(plan.operation, Operation::Scale);
//! assert!(plan.swap);
//! ```

use super::operation::{Limit, Operation};
use crate::error::EvalResult;
use crate::value::{Value, ValueTag};
use mppg_parser::{Builtin, NodeKind, ParameterKind};
use std::cmp::Ordering;

use ValueTag::{Function as F, Number as N};

// =============================================================================
// BINARY OPERATORS
// =============================================================================

/// A binary operator spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `*`
    Star,
    /// `*_`
    StarUnderscore,
    /// `*^`
    StarCaret,
    /// `/`
    Slash,
    /// `/_`
    SlashUnderscore,
    /// `/^`
    SlashCaret,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `/\`
    Meet,
    /// `\/`
    Join,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let operator = match symbol {
            "*" => Self::Star,
            "*_" => Self::StarUnderscore,
            "*^" => Self::StarCaret,
            "/" => Self::Slash,
            "/_" => Self::SlashUnderscore,
            "/^" => Self::SlashCaret,
            "+" => Self::Plus,
            "-" => Self::Minus,
            "/\\" => Self::Meet,
            "\\/" => Self::Join,
            _ => return None,
        };
        Some(operator)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Star => "*",
            Self::StarUnderscore => "*_",
            Self::StarCaret => "*^",
            Self::Slash => "/",
            Self::SlashUnderscore => "/_",
            Self::SlashCaret => "/^",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Meet => "/\\",
            Self::Join => "\\/",
        }
    }

    /// Only defined between curves.
    pub fn is_strict(&self) -> bool {
        matches!(
            self,
            Self::StarUnderscore | Self::StarCaret | Self::SlashUnderscore | Self::SlashCaret
        )
    }

    fn curve_operation(&self) -> Operation {
        match self {
            Self::Star | Self::StarUnderscore => Operation::Convolution,
            Self::StarCaret => Operation::MaxPlusConvolution,
            Self::Slash | Self::SlashUnderscore => Operation::Deconvolution,
            Self::SlashCaret => Operation::MaxPlusDeconvolution,
            Self::Plus => Operation::Addition,
            Self::Minus => Operation::Subtraction,
            Self::Meet => Operation::Minimum,
            Self::Join => Operation::Maximum,
        }
    }

    fn scalar_operation(&self) -> Option<Operation> {
        match self {
            Self::Star => Some(Operation::Product),
            Self::Slash => Some(Operation::Quotient),
            Self::Plus => Some(Operation::Sum),
            Self::Minus => Some(Operation::Difference),
            Self::Meet => Some(Operation::Least),
            Self::Join => Some(Operation::Greatest),
            _ => None,
        }
    }
}

/// Grammar rule that matched a binary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryRule {
    Function,
    Number,
}

impl BinaryRule {
    pub fn from_kind(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::FunctionBinary => Some(Self::Function),
            NodeKind::NumberBinary => Some(Self::Number),
            _ => None,
        }
    }
}

/// Operand promoted to a constant curve before the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    None,
    Left,
    Right,
}

/// Outcome of binary dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryPlan {
    pub operation: Operation,
    pub promotion: Promotion,
    /// Operands are reordered so the curve comes first.
    pub swap: bool,
    /// The chosen family differs from the one the grammar rule suggested.
    pub reinterpreted: bool,
}

/// Pick the operation for `left operator right`, or `None` when no
/// operation accepts these operand types.
pub fn dispatch_binary(
    operator: BinaryOperator,
    rule: BinaryRule,
    left: ValueTag,
    right: ValueTag,
) -> Option<BinaryPlan> {
    let plan = |operation, promotion, swap| BinaryPlan {
        operation,
        promotion,
        swap,
        reinterpreted: false,
    };

    let mut plan = match (operator, left, right) {
        (_, F, F) => plan(operator.curve_operation(), Promotion::None, false),
        (_, N, N) => plan(operator.scalar_operation()?, Promotion::None, false),
        (BinaryOperator::Star, F, N) => plan(Operation::Scale, Promotion::None, false),
        (BinaryOperator::Star, N, F) => plan(Operation::Scale, Promotion::None, true),
        (BinaryOperator::Slash, F, N) => plan(Operation::InverseScale, Promotion::None, false),
        (BinaryOperator::Slash, N, F) => return None,
        (_, F, N) => plan(operator.curve_operation(), Promotion::Right, false),
        (_, N, F) => plan(operator.curve_operation(), Promotion::Left, false),
    };
    let scalar = plan.operation.result_tag() == N;
    plan.reinterpreted = scalar != (rule == BinaryRule::Number);
    Some(plan)
}

// =============================================================================
// UNARY, CALLS AND VALUE-AT
// =============================================================================

/// Negation of a number or of a curve.
pub fn dispatch_negation(operand: ValueTag) -> Operation {
    match operand {
        N => Operation::Opposite,
        F => Operation::Negation,
    }
}

/// For each argument, whether it is promoted to a constant curve.
///
/// `None` when the arity differs or a curve is passed for a number.
pub fn dispatch_call(builtin: Builtin, arguments: &[ValueTag]) -> Option<Vec<bool>> {
    let parameters = builtin.parameters();
    if parameters.len() != arguments.len() {
        return None;
    }
    parameters
        .iter()
        .zip(arguments)
        .map(|(parameter, argument)| match (parameter, argument) {
            (ParameterKind::Function, F) | (ParameterKind::Number, N) => Some(false),
            (ParameterKind::Function, N) => Some(true),
            (ParameterKind::Number, F) => None,
        })
        .collect()
}

/// `f(t)` needs a curve variable and a number time.
pub fn dispatch_value_at(limit: Limit, function: ValueTag, time: ValueTag) -> Option<Operation> {
    (function == F && time == N).then_some(Operation::ValueAt(limit))
}

// =============================================================================
// COMPARISONS
// =============================================================================

/// Assertion comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl ComparisonOperator {
    /// Accepts ASCII and Unicode spellings.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let operator = match symbol {
            "=" => Self::Equal,
            "!=" | "≠" => Self::NotEqual,
            "<" => Self::Less,
            "<=" | "≤" => Self::LessOrEqual,
            ">" => Self::Greater,
            ">=" | "≥" => Self::GreaterOrEqual,
            _ => return None,
        };
        Some(operator)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }

    /// Compare two values of the same type.
    ///
    /// Curves are partially ordered: `f < g` holds when `f <= g` everywhere
    /// and the two are not equivalent.
    pub fn compare(&self, left: &Value, right: &Value) -> EvalResult<bool> {
        if left.tag() == N && right.tag() == N {
            let ordering = left.as_number()?.cmp(right.as_number()?);
            return Ok(self.holds(ordering));
        }
        let (left, right) = (left.as_curve()?, right.as_curve()?);
        let result = match self {
            Self::Equal => left.equivalent(right),
            Self::NotEqual => !left.equivalent(right),
            Self::LessOrEqual => left.less_or_equal(right),
            Self::GreaterOrEqual => right.less_or_equal(left),
            Self::Less => left.less_or_equal(right) && !left.equivalent(right),
            Self::Greater => right.less_or_equal(left) && !left.equivalent(right),
        };
        Ok(result)
    }

    fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Equal => ordering.is_eq(),
            Self::NotEqual => ordering.is_ne(),
            Self::Less => ordering.is_lt(),
            Self::LessOrEqual => ordering.is_le(),
            Self::Greater => ordering.is_gt(),
            Self::GreaterOrEqual => ordering.is_ge(),
        }
    }
}

/// Promotion needed before comparing operands of these types.
pub fn dispatch_comparison(left: ValueTag, right: ValueTag) -> Promotion {
    match (left, right) {
        (N, F) => Promotion::Left,
        (F, N) => Promotion::Right,
        _ => Promotion::None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nc_curves::{Curve, Rational};

    const ALL: [BinaryOperator; 10] = [
        BinaryOperator::Star,
        BinaryOperator::StarUnderscore,
        BinaryOperator::StarCaret,
        BinaryOperator::Slash,
        BinaryOperator::SlashUnderscore,
        BinaryOperator::SlashCaret,
        BinaryOperator::Plus,
        BinaryOperator::Minus,
        BinaryOperator::Meet,
        BinaryOperator::Join,
    ];

    fn operation(operator: &str, left: ValueTag, right: ValueTag) -> Option<Operation> {
        let operator = BinaryOperator::from_symbol(operator).unwrap();
        dispatch_binary(operator, BinaryRule::Function, left, right).map(|plan| plan.operation)
    }

    #[test]
    fn test_symbols_round_trip() {
        for operator in ALL {
            assert_eq!(BinaryOperator::from_symbol(operator.symbol()), Some(operator));
        }
    }

    #[test]
    fn test_star_is_convolution_scaling_or_product() {
        assert_eq!(operation("*", F, F), Some(Operation::Convolution));
        assert_eq!(operation("*", F, N), Some(Operation::Scale));
        assert_eq!(operation("*", N, F), Some(Operation::Scale));
        assert_eq!(operation("*", N, N), Some(Operation::Product));
    }

    #[test]
    fn test_slash_rejects_number_over_curve() {
        assert_eq!(operation("/", F, F), Some(Operation::Deconvolution));
        assert_eq!(operation("/", F, N), Some(Operation::InverseScale));
        assert_eq!(operation("/", N, F), None);
        assert_eq!(operation("/", N, N), Some(Operation::Quotient));
    }

    #[test]
    fn test_strict_operators_reject_two_numbers() {
        for operator in ALL.iter().filter(|o| o.is_strict()) {
            assert_eq!(operation(operator.symbol(), N, N), None);
            let plan = dispatch_binary(*operator, BinaryRule::Function, N, F).unwrap();
            assert_eq!(plan.promotion, Promotion::Left);
        }
    }

    #[test]
    fn test_mixed_pointwise_operators_promote() {
        for symbol in ["+", "-", "/\\", "\\/"] {
            let operator = BinaryOperator::from_symbol(symbol).unwrap();
            let plan = dispatch_binary(operator, BinaryRule::Function, F, N).unwrap();
            assert_eq!(plan.promotion, Promotion::Right);
            assert_eq!(plan.operation.result_tag(), F);
        }
    }

    #[test]
    fn test_reinterpretation_flag() {
        let plan = dispatch_binary(BinaryOperator::Plus, BinaryRule::Function, N, N).unwrap();
        assert!(plan.reinterpreted);
        let plan = dispatch_binary(BinaryOperator::Plus, BinaryRule::Number, N, N).unwrap();
        assert!(!plan.reinterpreted);
    }

    #[test]
    fn test_call_promotes_number_arguments() {
        assert_eq!(dispatch_call(Builtin::Composition, &[N, F]), Some(vec![true, false]));
        assert_eq!(dispatch_call(Builtin::RateLatency, &[F, N]), None);
        assert_eq!(dispatch_call(Builtin::Delay, &[N, N]), None);
        assert_eq!(dispatch_call(Builtin::Zero, &[]), Some(vec![]));
    }

    #[test]
    fn test_value_at_types() {
        assert_eq!(dispatch_value_at(Limit::Left, F, N), Some(Operation::ValueAt(Limit::Left)));
        assert_eq!(dispatch_value_at(Limit::Exact, N, N), None);
        assert_eq!(dispatch_value_at(Limit::Exact, F, F), None);
    }

    #[test]
    fn test_number_comparisons() {
        let two = Value::Number(Rational::from_integer(2));
        let three = Value::Number(Rational::from_integer(3));
        assert!(ComparisonOperator::Less.compare(&two, &three).unwrap());
        assert!(ComparisonOperator::NotEqual.compare(&two, &three).unwrap());
        assert!(!ComparisonOperator::GreaterOrEqual.compare(&two, &three).unwrap());
        assert!(ComparisonOperator::from_symbol("≤").unwrap().compare(&two, &two).unwrap());
    }

    #[test]
    fn test_curve_comparisons_are_partial() {
        let q = Rational::from_integer;
        let slow = Value::function(Curve::rate_latency(q(1), q(2)).unwrap());
        let fast = Value::function(Curve::rate_latency(q(2), q(1)).unwrap());
        let bucket = Value::function(Curve::token_bucket(q(1), q(1)).unwrap());

        assert!(ComparisonOperator::Less.compare(&slow, &fast).unwrap());
        assert!(!ComparisonOperator::Less.compare(&slow, &slow).unwrap());
        assert!(ComparisonOperator::LessOrEqual.compare(&slow, &slow).unwrap());
        assert!(ComparisonOperator::Greater.compare(&fast, &slow).unwrap());
        // neither below the other
        assert!(!ComparisonOperator::LessOrEqual.compare(&fast, &bucket).unwrap());
        assert!(!ComparisonOperator::GreaterOrEqual.compare(&fast, &bucket).unwrap());
    }

    #[test]
    fn test_comparison_promotion() {
        assert_eq!(dispatch_comparison(N, F), Promotion::Left);
        assert_eq!(dispatch_comparison(F, N), Promotion::Right);
        assert_eq!(dispatch_comparison(N, N), Promotion::None);
    }
}
