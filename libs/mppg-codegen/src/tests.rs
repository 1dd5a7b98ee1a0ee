//! Tests for whole-program generation.

use super::*;
use mppg_eval::EvalError;

/// Lines of the body of `main`, unindented.
fn body(source: &str) -> Vec<String> {
    let program = Program::from_text(source);
    cleanup(&Generator::new().program(&program).unwrap())
}

// =============================================================================
// DECLARATIONS
// =============================================================================

#[test]
fn test_same_name_twice_declares_once() {
    let lines = body("x := 1\ny := x\nx := 2");
    let declarations = lines.iter().filter(|line| line.starts_with("let mut x")).count();
    let reassignments = lines.iter().filter(|line| line.starts_with("x = ")).count();
    assert_eq!((declarations, reassignments), (1, 1));
    assert_eq!(
        lines,
        [
            "let mut x: Rational = Rational::from_integer(1);",
            "let mut y: Rational = x.clone();",
            "x = Rational::from_integer(2);",
        ]
    );
}

#[test]
fn test_type_change_shadows() {
    let lines = body("v := 1\nv := zero\nv := zero\nv := 2");
    assert_eq!(
        lines,
        [
            "let mut v: Rational = Rational::from_integer(1);",
            "let mut v: Curve = Curve::zero();",
            "v = Curve::zero();",
            "let mut v: Rational = Rational::from_integer(2);",
        ]
    );
}

#[test]
fn test_self_reference_reassigns() {
    let lines = body("x := 1\nx := x + 1");
    assert_eq!(lines[1], "x = (&x + &Rational::from_integer(1));");
}

// =============================================================================
// STATEMENTS
// =============================================================================

#[test]
fn test_prints_and_assertions() {
    let lines = body(
        "f := ratency(1, 2)\nf *_ f\nhdev(bucket(1, 1), f)\nassert(f <= f)\nassert(1 < 2)\nprintExpression(f)",
    );
    assert_eq!(lines[1], "println!(\"{}\", f.convolution(&f)?);");
    assert_eq!(
        lines[2],
        "println!(\"{}\", Curve::token_bucket(Rational::from_integer(1), Rational::from_integer(1))?.horizontal_deviation(&f)?);"
    );
    assert_eq!(lines[3], "println!(\"{}\", f.less_or_equal(&f));");
    assert_eq!(
        lines[4],
        "println!(\"{}\", &Rational::from_integer(1) < &Rational::from_integer(2));"
    );
    assert_eq!(lines[5], "println!(\"{}\", \"f := ratency(1, 2)\");");
}

#[test]
fn test_assertion_promotes_numbers() {
    let lines = body("f := zero\nassert(f >= 0)");
    assert_eq!(
        lines[1],
        "println!(\"{}\", Curve::constant(Rational::from_integer(0)).less_or_equal(&f));"
    );
}

#[test]
fn test_comments_pass_through() {
    let lines = body("// arrival\nf := zero // none yet\n\nplot(f, f + 1, main=\"x\")");
    assert_eq!(lines[0], "// arrival");
    assert_eq!(lines[1], "let mut f: Curve = Curve::zero(); // none yet");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "// plot f, f + 1");
}

#[test]
fn test_wrapped_program() {
    let lines = generate("x := 1").unwrap();
    assert_eq!(
        lines,
        [
            "use nc_curves::{Curve, Element, Rational};",
            "",
            "fn main() -> Result<(), Box<dyn std::error::Error>> {",
            "    let mut x: Rational = Rational::from_integer(1);",
            "    Ok(())",
            "}",
        ]
    );
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_syntax_errors_abort() {
    let err = generate("x := 1\ny := (\nz := 2").unwrap_err();
    let CodegenError::Syntax { diagnostics } = err else {
        panic!("expected syntax error, got {:?}", err);
    };
    assert_eq!(diagnostics[0].line, 2);
}

#[test]
fn test_unresolved_statement_names_line() {
    let err = generate("x := 1\ny := g + x").unwrap_err();
    assert_eq!(
        err,
        CodegenError::Statement {
            line: 2,
            source: EvalError::VariableNotFound { name: "g".into() },
        }
    );
}

#[test]
fn test_never_forces() {
    // division by zero is only detected when the value is computed
    let lines = body("x := 1 / 0\nx");
    assert_eq!(lines[0], "let mut x: Rational = Rational::from_integer(1).try_div(&Rational::from_integer(0))?;");
}
