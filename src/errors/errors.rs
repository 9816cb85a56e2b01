use thiserror::Error;

use crate::{lexer::tokens::TokenKind, symbols::types::TypeSymbol, Position};

/// A failure raised while tokenizing or parsing, tied to the position it happened at.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Bad character input: '{token}'.")]
    UnrecognisedToken { token: String },
    #[error("Unterminated string literal.")]
    UnterminatedString,
    #[error("Unexpected token <{found}>.")]
    UnexpectedToken { found: TokenKind },
    #[error("Unexpected token <{found}>, expected <{expected}>.")]
    ExpectedToken { found: TokenKind, expected: TokenKind },
    #[error("Unexpected token <{found}>, expected an expression.")]
    ExpectedExpression { found: TokenKind },
    #[error("The number {token} isn't valid {}.", TypeSymbol::Int)]
    NumberParseError { token: String },
    #[error("Only a name can be assigned to.")]
    InvalidAssignmentTarget,
}

/// A fault raised while running a program.
///
/// Runtime faults are never reported as diagnostics: they stop evaluation at the point
/// of failure and are handed back to the caller as the error half of the result.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("attempt to divide by zero")]
    DivisionByZero,
    #[error("integer overflow in '{operation}'")]
    Overflow { operation: &'static str },
    #[error("cannot convert '{value}' to type '{target}'")]
    InvalidConversion { value: String, target: TypeSymbol },
    #[error("'{function}' was called with an invalid argument: {message}")]
    InvalidArgument { function: String, message: String },
    #[error("variable '{variable}' was read before it was assigned")]
    UnassignedVariable { variable: String },
    #[error("jump to undefined label '{label}'")]
    UndefinedLabel { label: String },
    #[error("call depth limit exceeded in '{function}'")]
    StackOverflow { function: String },
    #[error("function '{function}' has no body")]
    MissingFunctionBody { function: String },
    #[error("expression produced no value")]
    MissingValue,
    #[error("expected a value of type '{expected}' but found '{found}'")]
    TypeMismatch { expected: TypeSymbol, found: TypeSymbol },
    #[error("statement '{kind}' survived lowering")]
    UnloweredStatement { kind: &'static str },
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}
