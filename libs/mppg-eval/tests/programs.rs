//! End-to-end program behaviour.

use config::constants::ExecutionConfig;
use mppg_eval::{
    execute, ErrorPolicy, EvaluationStrategy, Program, StatementOutput, TranscriptFormatter,
    ValueTag,
};

/// A network-calculus session touching every statement kind.
const SESSION: &str = "\
// tandem of two servers
beta1 := ratency(10, 2)
beta2 := ratency(20, 1)
beta := beta1 *_ beta2
alpha := bucket(5, 20)
printExpression(beta)
d := hdev(alpha, beta)
b := vdev(alpha, beta)
d
b
assert(beta = ratency(10, 3))
assert(alpha <= 20 + 5 * ratency(1, 0))
output := alpha /_ beta
output(0)
plot(alpha, beta, main=\"tandem\")
tail := uaf([0, 0] ](0, 0) (3, 0)] ](3, 0) 2 (+inf, +inf)[)
periodic := upp([0, 0] ](0, 0) (1, 0)[, period([1, 1] ](1, 1) (3, 1)[), 1)
periodic(4)
assert(star(periodic) <= periodic)
shifted := hshift(tail, 1)
shifted(5)
";

fn explicit_prints(source: &str, strategy: EvaluationStrategy) -> Vec<String> {
    let mut formatter = TranscriptFormatter::default();
    let outputs = Program::from_text(source)
        .run(&mut formatter, strategy, ErrorPolicy::Continue)
        .unwrap();
    outputs
        .iter()
        .filter(|output| output.is_explicit_print())
        .map(|output| output.text().to_string())
        .collect()
}

fn printed(source: &str) -> Vec<String> {
    explicit_prints(source, EvaluationStrategy::Eager)
}

#[test]
fn test_eager_and_lazy_print_the_same() {
    let programs = [
        SESSION,
        "x := 3/2\ny := x * x\nx := 10\ny\nprintExpression(y)",
        "f := ratency(1, 2)\ng := f\nf := zero\nassert(g = ratency(1, 2))\nprintExpression(g)",
        "a := stair(0, 60, 12)\nb := a /\\ bucket(1, 10)\nb(120)\nb(120^+)\nassert(b <= a)",
        "z := 0\nx := 1\nx := 1 / z\nx\nprintExpression(x)",
    ];
    for program in programs {
        assert_eq!(
            explicit_prints(program, EvaluationStrategy::Eager),
            explicit_prints(program, EvaluationStrategy::Lazy),
            "{}",
            program
        );
    }
}

#[test]
fn test_failed_lazy_reassignment_prints_old_value() {
    let program = "z := 0\nx := 1\nx := 1 / z\nx\nprintExpression(x)";
    assert_eq!(
        explicit_prints(program, EvaluationStrategy::Lazy),
        ["1", "x := 1"]
    );
}

#[test]
fn test_session_results() {
    let lines = printed(SESSION);
    assert_eq!(
        lines,
        [
            "beta := beta1 *_ beta2",
            "5",
            "35",
            "true",
            "true",
            "35",
            "2",
            "true",
            "2",
        ]
    );
}

#[test]
fn test_rational_sum() {
    assert_eq!(printed("3/2 + 1/2"), ["2"]);
}

#[test]
fn test_equivalence_assertions() {
    assert_eq!(
        printed("assert(ratency(1,2) = ratency(1,2))\nassert(zero != epsilon)"),
        ["true", "true"]
    );
}

#[test]
fn test_shared_production_dispatches_by_type() {
    let program = "f := ratency(1,2)\nx := 3/2\na := f * x\nb := f * f\nc := x * x\n\
                   printExpression(a)\nprintExpression(b)\nprintExpression(c)\nc";
    assert_eq!(
        printed(program),
        ["a := f * x", "b := f *_ f", "c := x * x", "9/4"]
    );
}

#[test]
fn test_reassignment_does_not_reach_captured_values() {
    let program = "T4 := 60\nA4 := stair(0, T4, 12)\nT4 := 1\nA4(60)\nA4(61)\nT4";
    assert_eq!(printed(program), ["12", "24", "1"]);
    assert_eq!(
        explicit_prints(program, EvaluationStrategy::Lazy),
        ["12", "24", "1"]
    );
}

#[test]
fn test_names_hold_one_type() {
    let program = "v := 1\nv := zero\nw := v\nv := 2";
    let outputs = execute(program, &ExecutionConfig::default()).unwrap();
    let mut program = Program::from_text(program);
    program
        .run(
            &mut TranscriptFormatter::default(),
            EvaluationStrategy::Eager,
            ErrorPolicy::Continue,
        )
        .unwrap();
    assert!(outputs.iter().all(|output| !output.is_error()));
    assert_eq!(program.environment().tag_of("v"), Some(ValueTag::Number));
    assert_eq!(program.environment().tag_of("w"), Some(ValueTag::Function));
    assert_eq!(program.environment().names().collect::<Vec<_>>(), ["v", "w"]);
}

#[test]
fn test_failed_assignment_leaves_environment_untouched() {
    let mut program = Program::from_text("x := 1\nx := x / zero\nx");
    let outputs = program
        .run(
            &mut TranscriptFormatter::default(),
            EvaluationStrategy::Eager,
            ErrorPolicy::Continue,
        )
        .unwrap();
    assert!(outputs[1].is_error());
    assert_eq!(outputs[2].text(), "1");
}

#[test]
fn test_config_drives_execution() {
    let config = ExecutionConfig {
        stop_on_error: true,
        allow_type_change: false,
        ..ExecutionConfig::default()
    };
    let err = execute("x := 1\nx := zero\nx", &config).unwrap_err();
    assert!(err.to_string().contains("changing it to a Function"), "{}", err);

    let config = ExecutionConfig {
        lazy: true,
        ..ExecutionConfig::default()
    };
    let outputs = execute("x := 1 / 0\n1", &config).unwrap();
    assert!(matches!(outputs[0], StatementOutput::Assignment { .. }));
    assert_eq!(outputs[1].text(), "1");
}
