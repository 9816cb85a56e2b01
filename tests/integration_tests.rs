//! Integration tests for end-to-end evaluation.
//!
//! These tests run source text through the whole pipeline: parsing, binding, lowering,
//! the return check and evaluation. Diagnostic tests mark the expected span with
//! `[` and `]` inside the source.

use std::{collections::HashMap, sync::Arc};

use moonwalk::{
    compilation::{Compilation, EvaluationResult},
    errors::errors::RuntimeError,
    evaluator::{BufferedHost, EvaluationOptions},
    parser::SyntaxTree,
    symbols::value::Value,
};
use pretty_assertions::assert_eq;

fn evaluate_with_host(source: &str, host: &mut BufferedHost) -> Result<EvaluationResult, RuntimeError> {
    let compilation = Compilation::new(vec![SyntaxTree::parse(source, None)]);
    let mut globals = HashMap::new();
    compilation.evaluate_with(&mut globals, host, EvaluationOptions { seed: Some(42) })
}

fn assert_value(source: &str, expected: impl Into<Value>) {
    let result = evaluate_with_host(source, &mut BufferedHost::new()).unwrap();
    assert!(result.diagnostics.is_empty(), "{source}: {:?}", result.diagnostics);
    assert_eq!(result.value, Some(expected.into()), "{source}");
}

/// Strips `[` and `]` from `annotated`, returning the plain text and the marked ranges.
fn annotate(annotated: &str) -> (String, Vec<(u32, u32)>) {
    let mut text = String::new();
    let mut starts = Vec::new();
    let mut spans = Vec::new();

    for c in annotated.chars() {
        match c {
            '[' => starts.push(text.len() as u32),
            ']' => {
                let start = starts.pop().expect("unbalanced ']'");
                spans.push((start, text.len() as u32));
            }
            _ => text.push(c),
        }
    }

    assert!(starts.is_empty(), "unbalanced '['");
    spans.sort();
    (text, spans)
}

fn assert_diagnostics(annotated: &str, expected: &[&str]) {
    let (text, spans) = annotate(annotated);
    let result = evaluate_with_host(&text, &mut BufferedHost::new()).unwrap();

    let messages: Vec<&str> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, expected.to_vec(), "{text}");
    assert_eq!(spans.len(), result.diagnostics.len(), "mark one span per diagnostic");

    for (diagnostic, (start, end)) in result.diagnostics.iter().zip(spans) {
        assert_eq!(
            (diagnostic.span.start.0, diagnostic.span.end.0),
            (start, end),
            "span of '{}'",
            diagnostic.message
        );
    }
}

#[test]
fn test_evaluates_expressions() {
    assert_value("1", 1);
    assert_value("+1", 1);
    assert_value("-1", -1);
    assert_value("~1", -2);
    assert_value("14 + 12", 26);
    assert_value("12 - 3", 9);
    assert_value("4 * 2", 8);
    assert_value("9 / 3", 3);
    assert_value("(10)", 10);
    assert_value("12 == 3", false);
    assert_value("3 == 3", true);
    assert_value("12 != 3", true);
    assert_value("3 < 4", true);
    assert_value("5 < 4", false);
    assert_value("4 <= 4", true);
    assert_value("4 > 3", true);
    assert_value("4 >= 5", false);
    assert_value("1 | 2", 3);
    assert_value("1 & 3", 1);
    assert_value("1 ^ 3", 2);
    assert_value("false == false", true);
    assert_value("true != false", true);
    assert_value("true && true", true);
    assert_value("false || false", false);
    assert_value("false | true", true);
    assert_value("true & false", false);
    assert_value("!true", false);
    assert_value("true", true);
    assert_value("\"test\"", "test");
    assert_value("\"test\" == \"test\"", true);
    assert_value("\"test\" != \"abc\"", true);
    assert_value("\"a\" + \"b\"", "ab");
}

#[test]
fn test_evaluates_statements() {
    assert_value("var a = 10", 10);
    assert_value("{ var a = 10 (a * a) }", 100);
    assert_value("{ var a = 0 (a = 10) * a }", 100);
    assert_value("{ var a = 0 if a == 0 a = 10 a }", 10);
    assert_value("{ var a = 0 if a == 4 a = 10 a }", 0);
    assert_value("{ var a = 0 if a == 0 a = 10 else a = 5 a }", 10);
    assert_value("{ var a = 0 if a == 4 a = 10 else a = 5 a }", 5);
    assert_value("{ var i = 10 var result = 0 while i > 0 { result = result + i i = i - 1 } result }", 55);
    assert_value("{ var result = 0 for i in 1..10 { result = result + i } result }", 55);
    assert_value("{ var a = 10 for i in 1..(a = a - 1) { } a }", 9);
    assert_value("{ var i = 0 while i < 5 { i = i + 1 if i == 5 continue } i }", 5);
    assert_value("{ var i = 0 while true { i = i + 1 if i == 3 break } i }", 3);
}

#[test]
fn test_evaluates_functions() {
    assert_value(
        "func max(a: int, b: int): int {\n    if a > b\n        return a\n    return b\n}\nmax(3, 8)",
        8,
    );
    assert_value(
        "func fact(n: int): int {\n    if n <= 1\n        return 1\n    return n * fact(n - 1)\n}\nfact(6)",
        720,
    );
    assert_value(
        "func isEven(n: int): bool {\n    if n == 0 return true\n    return isOdd(n - 1)\n}\nfunc isOdd(n: int): bool {\n    if n == 0 return false\n    return isEven(n - 1)\n}\nisEven(10)",
        true,
    );
}

#[test]
fn test_print_loop_output() {
    let mut host = BufferedHost::new();
    let source = "for i in 1..3 {\n    print(string(i * i))\n}";
    let result = evaluate_with_host(source, &mut host).unwrap();

    assert!(result.diagnostics.is_empty());
    assert_eq!(host.output, vec!["1", "4", "9"]);
}

#[test]
fn test_input_round_trip() {
    let mut host = BufferedHost::with_input(["20", "22"]);
    let source = "let a = int(input())\nlet b = int(input())\nprint(string(a + b))";
    evaluate_with_host(source, &mut host).unwrap();

    assert_eq!(host.output, vec!["42"]);
}

#[test]
fn test_runtime_faults() {
    let result = evaluate_with_host("{ var a = 0 10 / a }", &mut BufferedHost::new());
    assert!(matches!(result, Err(RuntimeError::DivisionByZero)));

    let result = evaluate_with_host("int(\"ten\")", &mut BufferedHost::new());
    assert!(matches!(result, Err(RuntimeError::InvalidConversion { .. })));
}

#[test]
fn test_repl_style_submissions() {
    let mut globals = HashMap::new();
    let mut host = BufferedHost::new();
    let options = EvaluationOptions { seed: Some(42) };

    let first = Arc::new(Compilation::new(vec![SyntaxTree::parse("var counter = 0", None)]));
    first.evaluate_with(&mut globals, &mut host, options).unwrap();

    let second = Arc::new(first.continue_with(SyntaxTree::parse(
        "func bump(): int {\n    counter = counter + 1\n    return counter\n}",
        None,
    )));
    second.evaluate_with(&mut globals, &mut host, options).unwrap();

    let third = second.continue_with(SyntaxTree::parse("bump() + bump()", None));
    let result = third.evaluate_with(&mut globals, &mut host, options).unwrap();

    assert_eq!(result.value, Some(Value::Int(3)));
}

#[test]
fn test_reports_redeclaration() {
    assert_diagnostics(
        "{ var x = 10 var y = 100 { var x = 10 } var [x] = 5 }",
        &["'x' is already declared."],
    );
}

#[test]
fn test_reports_undefined_names() {
    assert_diagnostics("[x] * 10", &["Variable 'x' doesn't exist."]);
    assert_diagnostics("[foo](42)", &["Function 'foo' doesn't exist."]);
    assert_diagnostics("[print] * 10", &["'print' is not a variable."]);
    assert_diagnostics("var x: [foo] = 1", &["Type 'foo' doesn't exist."]);
}

#[test]
fn test_reports_read_only_assignment() {
    assert_diagnostics(
        "{ let x = 10 x [=] 0 }",
        &["Variable 'x' is read-only and cannot be assigned to."],
    );
}

#[test]
fn test_reports_conversions() {
    assert_diagnostics(
        "{ var x = 10 x = [true] }",
        &["Cannot convert type 'bool' to 'int'. An explicit conversion exists (are you missing a cast?)"],
    );
    assert_diagnostics(
        "{ var x = 0 while [x] { } }",
        &["Cannot convert type 'int' to 'bool'. An explicit conversion exists (are you missing a cast?)"],
    );
    assert_diagnostics(
        "{ for i in [false]..10 { } }",
        &["Cannot convert type 'bool' to 'int'. An explicit conversion exists (are you missing a cast?)"],
    );
}

#[test]
fn test_reports_operators() {
    assert_diagnostics("[+]true", &["Unary operator '+' is not defined for type 'bool'."]);
    assert_diagnostics(
        "10 [*] false",
        &["Binary operator '*' is not defined for types 'int' and 'bool'."],
    );
}

#[test]
fn test_reports_call_arguments() {
    assert_diagnostics(
        "print(\"Hello\"[, \" \", \" world!\"])",
        &["Function 'print' requires 1 arguments but was given 3."],
    );
    assert_diagnostics(
        "rnd([)]",
        &["Function 'rnd' requires 1 arguments but was given 0."],
    );
    assert_diagnostics(
        "print([42])",
        &["Parameter 'text' requires a value of type 'string' but was given a value of type 'int'."],
    );
}

#[test]
fn test_reports_void_values() {
    assert_diagnostics(
        "var x = [print(\"a\")]",
        &["Expression must have a value."],
    );
}

#[test]
fn test_reports_control_flow() {
    assert_diagnostics(
        "[break]",
        &["The keyword 'break' can only be used inside of loops."],
    );
    assert_diagnostics(
        "[return]",
        &["The 'return' keyword can only be used inside of functions."],
    );
    assert_diagnostics(
        "func f() { return [1] }",
        &["Since the function 'f' does not return a value the 'return' keyword cannot be followed by an expression."],
    );
    assert_diagnostics(
        "func f(): int { [return] }",
        &["An expression of type 'int' is expected."],
    );
    assert_diagnostics(
        "func [f](n: int): bool { if n > 10 return true }",
        &["Not all code paths return a value."],
    );
}

#[test]
fn test_reports_duplicate_parameter() {
    assert_diagnostics(
        "func f(a: int, b: int, [b: string]) { }",
        &["A parameter with the name 'b' already exists."],
    );
}

#[test]
fn test_reports_syntax_error() {
    let result = evaluate_with_host("1 + )", &mut BufferedHost::new()).unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "Unexpected token <CloseParen>, expected an expression."
    );
    assert_eq!(result.diagnostics[0].span.start.0, 4);
    assert_eq!(result.value, None);

    let result = evaluate_with_host("\"open", &mut BufferedHost::new()).unwrap();
    assert_eq!(result.diagnostics[0].message, "Unterminated string literal.");
}
