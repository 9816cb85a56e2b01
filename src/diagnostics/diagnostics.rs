use std::fmt::Display;

use crate::{errors::errors::Error, symbols::types::TypeSymbol, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// An ordered, append-only list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        DiagnosticBag::default()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, span: &Span, message: String) {
        self.diagnostics.push(Diagnostic {
            span: span.clone(),
            message,
        });
    }

    pub fn report_syntax_error(&mut self, error: &Error) {
        let span = Span {
            start: error.get_position().clone(),
            end: error.get_position().clone(),
        };
        self.report(&span, error.to_string());
    }

    pub fn report_undefined_unary_operator(&mut self, span: &Span, operator: &str, operand: &TypeSymbol) {
        self.report(
            span,
            format!("Unary operator '{operator}' is not defined for type '{operand}'."),
        );
    }

    pub fn report_undefined_binary_operator(
        &mut self,
        span: &Span,
        operator: &str,
        left: &TypeSymbol,
        right: &TypeSymbol,
    ) {
        self.report(
            span,
            format!("Binary operator '{operator}' is not defined for types '{left}' and '{right}'."),
        );
    }

    pub fn report_parameter_already_declared(&mut self, span: &Span, name: &str) {
        self.report(span, format!("A parameter with the name '{name}' already exists."));
    }

    pub fn report_undefined_variable(&mut self, span: &Span, name: &str) {
        self.report(span, format!("Variable '{name}' doesn't exist."));
    }

    pub fn report_not_a_variable(&mut self, span: &Span, name: &str) {
        self.report(span, format!("'{name}' is not a variable."));
    }

    pub fn report_undefined_type(&mut self, span: &Span, name: &str) {
        self.report(span, format!("Type '{name}' doesn't exist."));
    }

    pub fn report_cannot_convert(&mut self, span: &Span, from: &TypeSymbol, to: &TypeSymbol) {
        self.report(span, format!("Cannot convert type '{from}' to '{to}'."));
    }

    pub fn report_cannot_convert_implicitly(&mut self, span: &Span, from: &TypeSymbol, to: &TypeSymbol) {
        self.report(
            span,
            format!(
                "Cannot convert type '{from}' to '{to}'. An explicit conversion exists (are you missing a cast?)"
            ),
        );
    }

    pub fn report_symbol_already_declared(&mut self, span: &Span, name: &str) {
        self.report(span, format!("'{name}' is already declared."));
    }

    pub fn report_cannot_assign(&mut self, span: &Span, name: &str) {
        self.report(
            span,
            format!("Variable '{name}' is read-only and cannot be assigned to."),
        );
    }

    pub fn report_undefined_function(&mut self, span: &Span, name: &str) {
        self.report(span, format!("Function '{name}' doesn't exist."));
    }

    pub fn report_not_a_function(&mut self, span: &Span, name: &str) {
        self.report(span, format!("'{name}' is not a function."));
    }

    pub fn report_wrong_argument_count(&mut self, span: &Span, name: &str, expected: usize, actual: usize) {
        self.report(
            span,
            format!("Function '{name}' requires {expected} arguments but was given {actual}."),
        );
    }

    pub fn report_wrong_argument_type(
        &mut self,
        span: &Span,
        name: &str,
        expected: &TypeSymbol,
        actual: &TypeSymbol,
    ) {
        self.report(
            span,
            format!(
                "Parameter '{name}' requires a value of type '{expected}' but was given a value of type '{actual}'."
            ),
        );
    }

    pub fn report_expression_must_have_value(&mut self, span: &Span) {
        self.report(span, String::from("Expression must have a value."));
    }

    pub fn report_invalid_break_or_continue(&mut self, span: &Span, text: &str) {
        self.report(
            span,
            format!("The keyword '{text}' can only be used inside of loops."),
        );
    }

    pub fn report_all_paths_must_return(&mut self, span: &Span) {
        self.report(span, String::from("Not all code paths return a value."));
    }

    pub fn report_invalid_return(&mut self, span: &Span) {
        self.report(
            span,
            String::from("The 'return' keyword can only be used inside of functions."),
        );
    }

    pub fn report_invalid_return_expression(&mut self, span: &Span, function: &str) {
        self.report(
            span,
            format!(
                "Since the function '{function}' does not return a value the 'return' keyword cannot be followed by an expression."
            ),
        );
    }

    pub fn report_missing_return_expression(&mut self, span: &Span, ty: &TypeSymbol) {
        self.report(span, format!("An expression of type '{ty}' is expected."));
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
