use std::sync::Arc;

use crate::{
    diagnostics::DiagnosticBag,
    errors::errors::{Error, ErrorImpl},
    symbols::types::TypeSymbol,
    Position, Span,
};

fn span(start: u32, end: u32) -> Span {
    let file = Arc::new(String::from("test.mw"));
    Span {
        start: Position(start, Arc::clone(&file)),
        end: Position(end, file),
    }
}

#[test]
fn test_diagnostics_keep_order() {
    let mut bag = DiagnosticBag::new();
    bag.report_undefined_variable(&span(0, 1), "x");
    bag.report_not_a_function(&span(4, 9), "x");

    let messages: Vec<String> = bag.iter().map(|d| d.message.clone()).collect();
    assert_eq!(
        messages,
        vec![
            "Variable 'x' doesn't exist.".to_string(),
            "'x' is not a function.".to_string()
        ]
    );
    assert_eq!(bag.len(), 2);
}

#[test]
fn test_operator_messages() {
    let mut bag = DiagnosticBag::new();
    bag.report_undefined_unary_operator(&span(0, 1), "+", &TypeSymbol::Bool);
    bag.report_undefined_binary_operator(&span(0, 1), "+", &TypeSymbol::Int, &TypeSymbol::Bool);

    let diagnostics = bag.into_vec();
    assert_eq!(
        diagnostics[0].message,
        "Unary operator '+' is not defined for type 'bool'."
    );
    assert_eq!(
        diagnostics[1].message,
        "Binary operator '+' is not defined for types 'int' and 'bool'."
    );
}

#[test]
fn test_conversion_messages() {
    let mut bag = DiagnosticBag::new();
    bag.report_cannot_convert(&span(0, 1), &TypeSymbol::Bool, &TypeSymbol::Int);
    bag.report_cannot_convert_implicitly(&span(0, 1), &TypeSymbol::Bool, &TypeSymbol::Int);

    let diagnostics = bag.into_vec();
    assert_eq!(diagnostics[0].message, "Cannot convert type 'bool' to 'int'.");
    assert_eq!(
        diagnostics[1].message,
        "Cannot convert type 'bool' to 'int'. An explicit conversion exists (are you missing a cast?)"
    );
}

#[test]
fn test_argument_messages() {
    let mut bag = DiagnosticBag::new();
    bag.report_wrong_argument_count(&span(10, 16), "print", 1, 3);
    bag.report_wrong_argument_type(&span(4, 7), "n", &TypeSymbol::Int, &TypeSymbol::String);

    let diagnostics = bag.into_vec();
    assert_eq!(
        diagnostics[0].message,
        "Function 'print' requires 1 arguments but was given 3."
    );
    assert_eq!(diagnostics[0].span, span(10, 16));
    assert_eq!(
        diagnostics[1].message,
        "Parameter 'n' requires a value of type 'int' but was given a value of type 'string'."
    );
}

#[test]
fn test_syntax_error_becomes_diagnostic() {
    let mut bag = DiagnosticBag::new();
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(3, Arc::new(String::from("test.mw"))),
    );
    bag.report_syntax_error(&error);

    let diagnostic = bag.iter().next().unwrap();
    assert_eq!(diagnostic.message, "Bad character input: '@'.");
    assert_eq!(diagnostic.span.start.0, 3);
    assert_eq!(diagnostic.to_string(), "Bad character input: '@'.");
}
