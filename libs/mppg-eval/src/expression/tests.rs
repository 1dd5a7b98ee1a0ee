//! Tests for resolution, forcing and canonical rendering.

use super::*;
use crate::environment::{Environment, StorePermissions};
use nc_curves::Curve;

fn q(v: i64) -> Rational {
    Rational::from_integer(v)
}

fn frac(n: i64, d: i64) -> Rational {
    Rational::new(n, d).unwrap()
}

/// Resolve the first expression-command line of `source`.
fn resolve_in(source: &str, environment: &Environment) -> EvalResult<Rc<Expression>> {
    let cst = mppg_parser::parse(source);
    assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
    resolve(&cst.root.children[0].children[0], environment)
}

fn evaluate(source: &str, environment: &Environment) -> Value {
    resolve_in(source, environment).unwrap().force().unwrap()
}

fn with(bindings: &[(&str, &str)]) -> Environment {
    let mut environment = Environment::new();
    for (name, source) in bindings {
        let expression = resolve_in(source, &environment).unwrap();
        environment
            .store(name, expression, StorePermissions::default())
            .unwrap();
    }
    environment
}

// =============================================================================
// NUMBERS
// =============================================================================

#[test]
fn test_number_arithmetic() {
    let environment = Environment::new();
    assert_eq!(evaluate("3/2 + 1/2", &environment), Value::Number(q(2)));
    assert_eq!(evaluate("2 * 3 - 1", &environment), Value::Number(q(5)));
    assert_eq!(evaluate("1 / 3", &environment), Value::Number(frac(1, 3)));
    assert_eq!(evaluate("-(2 /\\ 5)", &environment), Value::Number(q(-2)));
}

#[test]
fn test_number_variables_stay_numbers() {
    let environment = with(&[("x", "4"), ("y", "x * x")]);
    assert_eq!(environment.tag_of("y"), Some(ValueTag::Number));
    assert_eq!(evaluate("y", &environment), Value::Number(q(16)));
}

#[test]
fn test_division_by_zero_fails_on_force_only() {
    let environment = Environment::new();
    let expression = resolve_in("1 / 0", &environment).unwrap();
    assert!(expression.force().is_err());
    assert!(!expression.is_forced());
}

// =============================================================================
// CURVES
// =============================================================================

#[test]
fn test_star_disambiguation() {
    let environment = with(&[("f", "ratency(1, 2)"), ("x", "3")]);

    let scaled = evaluate("f * x", &environment);
    let expected = Curve::rate_latency(q(3), q(2)).unwrap();
    assert!(scaled.as_curve().unwrap().equivalent(&expected));

    let convolved = evaluate("f * f", &environment);
    let expected = Curve::rate_latency(q(1), q(4)).unwrap();
    assert!(convolved.as_curve().unwrap().equivalent(&expected));

    assert_eq!(evaluate("x * x", &environment), Value::Number(q(9)));
}

#[test]
fn test_number_operand_promoted_to_constant() {
    let environment = with(&[("f", "ratency(1, 2)")]);
    let shifted = evaluate("f + 1", &environment);
    assert_eq!(shifted.as_curve().unwrap().value_at(&q(5)).unwrap(), q(4));

    let capped = evaluate("2 /\\ f", &environment);
    assert_eq!(capped.as_curve().unwrap().value_at(&q(10)).unwrap(), q(2));
}

#[test]
fn test_builtin_number_arguments_promoted() {
    let environment = with(&[("f", "ratency(2, 1)")]);
    let composed = evaluate("comp(3, f)", &environment);
    assert!(composed.as_curve().unwrap().equivalent(&Curve::constant(q(3))));
}

#[test]
fn test_value_at_and_deviations() {
    let environment = with(&[("a", "bucket(1, 4)"), ("b", "ratency(2, 3)")]);
    assert_eq!(evaluate("a(2)", &environment), Value::Number(q(6)));
    assert_eq!(evaluate("a(0^+)", &environment), Value::Number(q(4)));
    assert_eq!(evaluate("hdev(a, b)", &environment), Value::Number(q(5)));
    assert_eq!(evaluate("vdev(a, b)", &environment), Value::Number(q(7)));
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_unknown_variable() {
    let err = resolve_in("g + 1", &Environment::new()).unwrap_err();
    assert_eq!(err, EvalError::VariableNotFound { name: "g".into() });
}

#[test]
fn test_invalid_operand_combinations() {
    let environment = with(&[("f", "zero()"), ("x", "2")]);
    for source in ["x / f", "x *_ x", "ratency(f, 1)", "x(3)", "f(f)"] {
        let err = resolve_in(source, &environment).unwrap_err();
        assert!(
            matches!(err, EvalError::InvalidExpression { .. }),
            "{}: {:?}",
            source,
            err
        );
    }
}

// =============================================================================
// LAZINESS AND SNAPSHOTS
// =============================================================================

#[test]
fn test_force_is_memoized() {
    let environment = with(&[("f", "ratency(1, 2)")]);
    let expression = resolve_in("f *_ f", &environment).unwrap();
    assert!(!expression.is_forced());
    let first = expression.force().unwrap();
    assert!(expression.is_forced());
    let second = expression.force().unwrap();
    let (Value::Function(first), Value::Function(second)) = (first, second) else {
        panic!("expected curves");
    };
    assert!(Rc::ptr_eq(&first, &second));
}

#[test]
fn test_variables_bind_at_resolution() {
    let mut environment = with(&[("x", "1"), ("y", "x + 1")]);
    let replacement = resolve_in("10", &environment).unwrap();
    environment
        .store("x", replacement, StorePermissions::default())
        .unwrap();
    assert_eq!(evaluate("y", &environment), Value::Number(q(2)));
    assert_eq!(evaluate("x + 1", &environment), Value::Number(q(11)));
}

#[test]
fn test_strategy_settle() {
    let environment = Environment::new();
    let expression = resolve_in("2 * 3", &environment).unwrap();
    EvaluationStrategy::Lazy.settle(&expression).unwrap();
    assert!(!expression.is_forced());
    EvaluationStrategy::Eager.settle(&expression).unwrap();
    assert!(expression.is_forced());
}

#[test]
fn test_expression_node_tag() {
    let cst = mppg_parser::parse("ratency(1, 1) + 2");
    let node = ExpressionNode::new(&cst.root.children[0].children[0]);
    assert_eq!(node.tag(), crate::value::NodeTag::Undetermined);
    let first = node.resolve(&Environment::new()).unwrap();
    assert_eq!(node.tag(), crate::value::NodeTag::Function);
    assert!(Rc::ptr_eq(&first, &node.resolve(&Environment::new()).unwrap()));
}

// =============================================================================
// CANONICAL FORM
// =============================================================================

#[test]
fn test_canonical_form() {
    let environment = with(&[("f", "ratency(1, 2)"), ("x", "3")]);
    let cases = [
        ("f * x", "f * x"),
        ("x * f", "f * x"),
        ("f * 3/2", "f * 3/2"),
        ("f * f", "f *_ f"),
        ("(f + 1) /\\ f", "(f + 1) /\\ f"),
        ("-f", "-f"),
        ("f(x^-)", "f(x^-)"),
        ("star(f) \\/ zero()", "star(f) \\/ zero()"),
    ];
    for (source, expected) in cases {
        let expression = resolve_in(source, &environment).unwrap();
        assert_eq!(expression.to_string(), expected, "{}", source);
    }
}

#[test]
fn test_canonical_form_reparses_to_same_value() {
    let environment = with(&[("f", "ratency(1, 2)"), ("g", "bucket(1, 1)")]);
    for source in ["(f + 2) *_ g", "f \\/ -g", "hshift(f, 1/2) - 3", "3 * f / 2"] {
        let expression = resolve_in(source, &environment).unwrap();
        let reparsed = resolve_in(&expression.to_string(), &environment).unwrap();
        let (original, again) = (expression.force().unwrap(), reparsed.force().unwrap());
        assert!(
            original
                .as_curve()
                .unwrap()
                .equivalent(again.as_curve().unwrap()),
            "{} -> {}",
            source,
            expression
        );
    }
}
