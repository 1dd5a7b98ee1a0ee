//! # Expression Emitter
//!
//! Renders a resolved expression as a Rust expression over `nc_curves`.
//! The resolver has already picked every operation, so emission is a plain
//! bottom-up walk with no type decisions left.
//!
//! Each expression can be written three ways:
//!
//! - owned: a fresh `Curve` or `Rational` value
//! - borrowed: a reference, for arguments taken by `&`
//! - receiver: something a method can be called on
//!
//! Variables are only cloned where an owned value is required.

use crate::error::{CodegenError, CodegenResult};
use mppg_eval::expression::dispatch::ComparisonOperator;
use mppg_eval::expression::{ExpressionKind, Limit, Operation};
use mppg_eval::{Expression, Value, ValueTag};
use mppg_parser::Builtin;
use nc_curves::{Curve, Element, Rational};

/// Rust type holding values of `tag`.
pub fn rust_type(tag: ValueTag) -> &'static str {
    match tag {
        ValueTag::Function => "Curve",
        ValueTag::Number => "Rational",
    }
}

/// MPPG names as Rust identifiers.
///
/// Keywords become raw identifiers; the few that cannot be raw get a
/// trailing underscore.
pub fn rust_identifier(name: &str) -> String {
    const RESERVED: &[&str] = &[
        "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
        "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
        "where", "while", "abstract", "become", "box", "do", "final", "macro", "override",
        "priv", "try", "typeof", "unsized", "virtual", "yield",
    ];
    match name {
        "self" | "Self" | "super" | "crate" => format!("{}_", name),
        _ if RESERVED.contains(&name) => format!("r#{}", name),
        _ => name.to_string(),
    }
}

// =============================================================================
// LITERALS
// =============================================================================

/// A rational constant.
///
/// ## Example
///
/// ```rust
/// use mppg_codegen::emitter::rational_literal;
/// use nc_curves::Rational;
///
/// assert_eq!(rational_literal(&Rational::from_integer(-4)), "Rational::from_integer(-4)");
/// assert_eq!(rational_literal(&Rational::new(3, 2).unwrap()), "Rational::new(3, 2)?");
/// assert_eq!(rational_literal(&Rational::PlusInfinity), "Rational::PlusInfinity");
/// ```
pub fn rational_literal(number: &Rational) -> String {
    match number {
        Rational::PlusInfinity => "Rational::PlusInfinity".to_string(),
        Rational::MinusInfinity => "Rational::MinusInfinity".to_string(),
        finite => match finite.to_i64_pair() {
            Some((numer, 1)) => format!("Rational::from_integer({})", numer),
            Some((numer, denom)) => format!("Rational::new({}, {})?", numer, denom),
            None => format!("{:?}.parse::<Rational>()?", finite.to_string()),
        },
    }
}

/// A normalized curve, rebuilt from its elements and pseudo-period.
pub fn curve_literal(curve: &Curve) -> String {
    let elements: Vec<String> = curve
        .base()
        .elements()
        .iter()
        .map(element_literal)
        .collect();
    format!(
        "Curve::from_elements(vec![{}], {}, {}, {})?",
        elements.join(", "),
        rational_literal(curve.pseudo_period_start()),
        rational_literal(curve.pseudo_period_length()),
        rational_literal(curve.pseudo_period_height())
    )
}

fn element_literal(element: &Element) -> String {
    match element {
        Element::Point { time, value } => format!(
            "Element::point({}, {})",
            rational_literal(time),
            rational_literal(value)
        ),
        Element::Segment {
            start,
            end,
            start_value,
            slope,
        } => format!(
            "Element::segment({}, {}, {}, {})",
            rational_literal(start),
            rational_literal(end),
            rational_literal(start_value),
            rational_literal(slope)
        ),
    }
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// An owned value of the expression's type.
pub fn owned(expression: &Expression) -> CodegenResult<String> {
    let (operation, operands) = match expression.kind() {
        ExpressionKind::Literal(Value::Number(number)) => return Ok(rational_literal(number)),
        ExpressionKind::Literal(Value::Function(curve)) => return Ok(curve_literal(curve)),
        ExpressionKind::Variable { name, .. } => {
            return Ok(format!("{}.clone()", rust_identifier(name)))
        }
        ExpressionKind::Apply {
            operation,
            operands,
        } => (operation, operands.as_slice()),
    };
    let operand = |index: usize| {
        operands
            .get(index)
            .map(|operand| operand.as_ref())
            .ok_or_else(|| CodegenError::unsupported(format!("{:?} without operand {}", operation, index)))
    };

    let code = match operation {
        Operation::Sum => arithmetic(operand(0)?, "+", operand(1)?)?,
        Operation::Difference => arithmetic(operand(0)?, "-", operand(1)?)?,
        Operation::Product => arithmetic(operand(0)?, "*", operand(1)?)?,
        Operation::Quotient => method(operand(0)?, "try_div", &[operand(1)?])?,
        Operation::Least => format!("{}.min({})", owned(operand(0)?)?, owned(operand(1)?)?),
        Operation::Greatest => format!("{}.max({})", owned(operand(0)?)?, owned(operand(1)?)?),
        Operation::Opposite => format!("(-{})", owned(operand(0)?)?),

        Operation::Minimum => method(operand(0)?, "minimum", &[operand(1)?])?,
        Operation::Maximum => method(operand(0)?, "maximum", &[operand(1)?])?,
        Operation::Addition => method(operand(0)?, "addition", &[operand(1)?])?,
        Operation::Subtraction => method(operand(0)?, "subtraction", &[operand(1)?])?,
        Operation::Convolution => method(operand(0)?, "convolution", &[operand(1)?])?,
        Operation::MaxPlusConvolution => {
            method(operand(0)?, "max_plus_convolution", &[operand(1)?])?
        }
        Operation::Deconvolution => method(operand(0)?, "deconvolution", &[operand(1)?])?,
        Operation::MaxPlusDeconvolution => {
            method(operand(0)?, "max_plus_deconvolution", &[operand(1)?])?
        }
        Operation::Scale => method(operand(0)?, "scale", &[operand(1)?])?,
        Operation::InverseScale => format!(
            "{}.scale(&Rational::one().try_div({})?)?",
            receiver(operand(0)?)?,
            borrowed(operand(1)?)?
        ),
        Operation::Negation => method(operand(0)?, "negate", &[])?,
        Operation::Constant => format!("Curve::constant({})", owned(operand(0)?)?),

        Operation::Builtin(builtin) => builtin_call(*builtin, operands)?,
        Operation::ValueAt(limit) => {
            let name = match limit {
                Limit::Exact => "value_at",
                Limit::Left => "left_limit_at",
                Limit::Right => "right_limit_at",
            };
            method(operand(0)?, name, &[operand(1)?])?
        }
    };
    Ok(code)
}

/// A reference to the expression's value.
pub fn borrowed(expression: &Expression) -> CodegenResult<String> {
    match expression.kind() {
        ExpressionKind::Variable { name, .. } => Ok(format!("&{}", rust_identifier(name))),
        _ => Ok(format!("&{}", owned(expression)?)),
    }
}

/// The expression in method-receiver position.
pub fn receiver(expression: &Expression) -> CodegenResult<String> {
    match expression.kind() {
        ExpressionKind::Variable { name, .. } => Ok(rust_identifier(name)),
        _ => owned(expression),
    }
}

/// `bool`-valued comparison of two operands of the same type.
///
/// Curves are compared with `equivalent` and `less_or_equal`; strict
/// comparisons bind both sides once.
pub fn comparison(
    left: &Expression,
    operator: ComparisonOperator,
    right: &Expression,
) -> CodegenResult<String> {
    if left.tag() == ValueTag::Number && right.tag() == ValueTag::Number {
        let symbol = match operator {
            ComparisonOperator::Equal => "==",
            other => other.symbol(),
        };
        return Ok(format!("{} {} {}", borrowed(left)?, symbol, borrowed(right)?));
    }

    let (l, r) = (receiver(left)?, receiver(right)?);
    let (bl, br) = (borrowed(left)?, borrowed(right)?);
    let code = match operator {
        ComparisonOperator::Equal => format!("{}.equivalent({})", l, br),
        ComparisonOperator::NotEqual => format!("!{}.equivalent({})", l, br),
        ComparisonOperator::LessOrEqual => format!("{}.less_or_equal({})", l, br),
        ComparisonOperator::GreaterOrEqual => format!("{}.less_or_equal({})", r, bl),
        ComparisonOperator::Less => format!(
            "{{ let (left, right) = ({}, {}); left.less_or_equal(right) && !left.equivalent(right) }}",
            bl, br
        ),
        ComparisonOperator::Greater => format!(
            "{{ let (left, right) = ({}, {}); right.less_or_equal(left) && !left.equivalent(right) }}",
            bl, br
        ),
    };
    Ok(code)
}

fn arithmetic(left: &Expression, symbol: &str, right: &Expression) -> CodegenResult<String> {
    Ok(format!("({} {} {})", borrowed(left)?, symbol, borrowed(right)?))
}

/// `receiver.name(&arguments..)?`
fn method(target: &Expression, name: &str, arguments: &[&Expression]) -> CodegenResult<String> {
    let arguments = arguments
        .iter()
        .map(|argument| borrowed(argument))
        .collect::<CodegenResult<Vec<_>>>()?;
    Ok(format!("{}.{}({})?", receiver(target)?, name, arguments.join(", ")))
}

/// `Curve::name(owned arguments..)?`
fn constructor(name: &str, arguments: &[std::rc::Rc<Expression>]) -> CodegenResult<String> {
    let arguments = arguments
        .iter()
        .map(|argument| owned(argument))
        .collect::<CodegenResult<Vec<_>>>()?;
    Ok(format!("Curve::{}({})?", name, arguments.join(", ")))
}

fn builtin_call(builtin: Builtin, operands: &[std::rc::Rc<Expression>]) -> CodegenResult<String> {
    let first = || {
        operands
            .first()
            .map(|operand| operand.as_ref())
            .ok_or_else(|| CodegenError::unsupported(format!("{} without arguments", builtin.name())))
    };
    let rest: Vec<&Expression> = operands.iter().skip(1).map(|operand| operand.as_ref()).collect();

    let code = match builtin {
        Builtin::RateLatency => constructor("rate_latency", operands)?,
        Builtin::TokenBucket => constructor("token_bucket", operands)?,
        Builtin::Affine => constructor("affine", operands)?,
        Builtin::Step => constructor("step", operands)?,
        Builtin::Stair => constructor("stair", operands)?,
        Builtin::Delay => constructor("delay", operands)?,
        Builtin::Zero => "Curve::zero()".to_string(),
        Builtin::Epsilon => "Curve::plus_infinity()".to_string(),
        Builtin::SubadditiveClosure => method(first()?, "subadditive_closure", &[])?,
        Builtin::HorizontalShift => method(first()?, "horizontal_shift", &rest)?,
        Builtin::VerticalShift => method(first()?, "vertical_shift", &rest)?,
        Builtin::LowerPseudoInverse => method(first()?, "lower_pseudo_inverse", &[])?,
        Builtin::UpperPseudoInverse => method(first()?, "upper_pseudo_inverse", &[])?,
        Builtin::Composition => method(first()?, "composition", &rest)?,
        Builtin::UpperNonDecreasing => method(first()?, "to_upper_non_decreasing", &[])?,
        Builtin::NonNegativeUpperNonDecreasing => {
            method(first()?, "to_non_negative_upper_non_decreasing", &[])?
        }
        Builtin::LeftContinuous => method(first()?, "to_left_continuous", &[])?,
        Builtin::RightContinuous => method(first()?, "to_right_continuous", &[])?,
        Builtin::HorizontalDeviation => method(first()?, "horizontal_deviation", &rest)?,
        Builtin::VerticalDeviation => method(first()?, "vertical_deviation", &rest)?,
    };
    Ok(code)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mppg_eval::environment::{Environment, StorePermissions};
    use mppg_eval::expression::resolve;

    fn environment() -> Environment {
        let mut environment = Environment::new();
        let permissions = StorePermissions::default();
        let zero = Expression::apply(Operation::Builtin(Builtin::Zero), vec![]);
        environment.store("f", zero, permissions).unwrap();
        environment
            .store("x", Expression::number(Rational::from_integer(3)), permissions)
            .unwrap();
        environment
    }

    fn emit(source: &str) -> String {
        let cst = mppg_parser::parse(source);
        let expression = resolve(&cst.root.children[0].children[0], &environment()).unwrap();
        owned(&expression).unwrap()
    }

    #[test]
    fn test_rational_literals() {
        assert_eq!(emit("7"), "Rational::from_integer(7)");
        assert_eq!(emit("-1/3"), "(-Rational::new(1, 3)?)");
        assert_eq!(rational_literal(&Rational::MinusInfinity), "Rational::MinusInfinity");
        let huge = "123456789012345678901234567890".parse::<Rational>().unwrap();
        assert_eq!(
            rational_literal(&huge),
            "\"123456789012345678901234567890\".parse::<Rational>()?"
        );
    }

    #[test]
    fn test_shared_operator_spellings() {
        assert_eq!(emit("f * x"), "f.scale(&x)?");
        assert_eq!(emit("x * f"), "f.scale(&x)?");
        assert_eq!(emit("f * f"), "f.convolution(&f)?");
        assert_eq!(emit("x * x"), "(&x * &x)");
        assert_eq!(emit("f / 2"), "f.scale(&Rational::one().try_div(&Rational::from_integer(2))?)?");
        assert_eq!(emit("x / 2"), "x.try_div(&Rational::from_integer(2))?");
    }

    #[test]
    fn test_promotion_and_nesting() {
        assert_eq!(
            emit("f + 1"),
            "f.addition(&Curve::constant(Rational::from_integer(1)))?"
        );
        assert_eq!(
            emit("(f /\\ f) *_ f"),
            "f.minimum(&f)?.convolution(&f)?"
        );
        assert_eq!(emit("-x"), "(-x.clone())");
        assert_eq!(emit("x /\\ 1"), "x.clone().min(Rational::from_integer(1))");
    }

    #[test]
    fn test_builtins() {
        assert_eq!(
            emit("ratency(x, 2)"),
            "Curve::rate_latency(x.clone(), Rational::from_integer(2))?"
        );
        assert_eq!(emit("epsilon"), "Curve::plus_infinity()");
        assert_eq!(emit("star(f)"), "f.subadditive_closure()?");
        assert_eq!(emit("hshift(f, x)"), "f.horizontal_shift(&x)?");
        assert_eq!(emit("hdev(f, zero)"), "f.horizontal_deviation(&Curve::zero())?");
        assert_eq!(emit("f(x^+)"), "f.right_limit_at(&x)?");
    }

    #[test]
    fn test_curve_literal_is_normalized() {
        let code = emit("uaf([0, 0] ](0, 0) 2 (+inf, +inf)[)");
        assert!(code.starts_with("Curve::from_elements(vec![Element::point("), "{}", code);
        assert!(code.ends_with(")?"), "{}", code);
    }

    #[test]
    fn test_comparisons() {
        let q = Rational::from_integer;
        let f = Expression::variable("f", Expression::literal(Value::function(Curve::zero())));
        let g = Expression::variable("g", Expression::literal(Value::function(Curve::zero())));
        let x = Expression::variable("x", Expression::number(q(1)));
        assert_eq!(comparison(&x, ComparisonOperator::Equal, &x).unwrap(), "&x == &x");
        assert_eq!(
            comparison(&f, ComparisonOperator::GreaterOrEqual, &g).unwrap(),
            "g.less_or_equal(&f)"
        );
        assert_eq!(
            comparison(&f, ComparisonOperator::Less, &g).unwrap(),
            "{ let (left, right) = (&f, &g); left.less_or_equal(right) && !left.equivalent(right) }"
        );
    }

    #[test]
    fn test_keywords_become_raw_identifiers() {
        assert_eq!(rust_identifier("type"), "r#type");
        assert_eq!(rust_identifier("self"), "self_");
        assert_eq!(rust_identifier("beta"), "beta");
    }
}
