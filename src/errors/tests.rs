//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, RuntimeError};
use crate::lexer::tokens::TokenKind;
use crate::symbols::types::TypeSymbol;
use crate::Position;
use std::sync::Arc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Arc::new("test.mw".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.to_string(), "Bad character input: '@'.");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Arc::new("test.mw".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            found: TokenKind::CloseParen,
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position(), &pos);
}

#[test]
fn test_expected_token_message() {
    let error = Error::new(
        ErrorImpl::ExpectedToken {
            found: TokenKind::CloseParen,
            expected: TokenKind::Identifier,
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "ExpectedToken");
    assert_eq!(
        error.to_string(),
        "Unexpected token <CloseParen>, expected <Identifier>."
    );
}

#[test]
fn test_number_parse_error_message() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert_eq!(error.to_string(), "The number 99999999999 isn't valid int.");
}

#[test]
fn test_unterminated_string_error() {
    let error = Error::new(ErrorImpl::UnterminatedString, Position::null());

    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.get_error(), &ErrorImpl::UnterminatedString);
}

#[test]
fn test_runtime_error_messages() {
    assert_eq!(
        RuntimeError::DivisionByZero.to_string(),
        "attempt to divide by zero"
    );
    assert_eq!(
        RuntimeError::InvalidConversion {
            value: "abc".to_string(),
            target: TypeSymbol::Int
        }
        .to_string(),
        "cannot convert 'abc' to type 'int'"
    );
}

#[test]
fn test_runtime_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed");
    let error: RuntimeError = io.into();

    assert!(matches!(error, RuntimeError::Io(_)));
}
