//! Unit tests for the lexer module.
//!
//! Covers keywords and identifiers, integer and string literals, operators,
//! comments, line tracking and the error cases.

use super::{lexer::tokenize, tokens::TokenKind};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.mw".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("var let func if else while for in break continue return true false"),
        vec![
            TokenKind::Var,
            TokenKind::Let,
            TokenKind::Func,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::In,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::Return,
            TokenKind::True,
            TokenKind::False,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _under variable", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_under");
    // Keyword prefixes do not split identifiers
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "variable");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 0 2147483647", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "2147483647");
}

#[test]
fn test_tokenize_number_overflow() {
    let error = tokenize("2147483648", None).unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::NumberParseError {
            token: "2147483648".to_string()
        }
    );
    assert_eq!(error.to_string(), "The number 2147483648 isn't valid int.");
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "multiple words" "say ""hi""""#, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].value, "say \"hi\"");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_string_span_includes_quotes() {
    let tokens = tokenize("x \"ab\"", None).unwrap();

    assert_eq!(tokens[1].span.start.0, 2);
    assert_eq!(tokens[1].span.end.0, 6);
}

#[test]
fn test_tokenize_unterminated_string() {
    let error = tokenize("print(\"abc", None).unwrap_err();

    assert_eq!(error.get_error(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position().0, 6);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / ! ~ & && | || ^ = == != < <= > >="),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Not,
            TokenKind::Tilde,
            TokenKind::Ampersand,
            TokenKind::AmpersandAmpersand,
            TokenKind::Pipe,
            TokenKind::PipePipe,
            TokenKind::Hat,
            TokenKind::Assignment,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } : , 1..10"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Number,
            TokenKind::DotDot,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("var x = 1 // trailing comment\n// whole line\nx"),
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_tracks_lines() {
    let tokens = tokenize("a\nb\n\n  c", None).unwrap();

    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[2].line, 4);
    assert_eq!(tokens[2].span.start.0, 7);
}

#[test]
fn test_tokenize_unrecognised_character() {
    let error = tokenize("1 @ 2", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 2);
    assert_eq!(error.to_string(), "Bad character input: '@'.");
}

#[test]
fn test_tokenize_file_name() {
    let tokens = tokenize("x", Some("main.mw".to_string())).unwrap();
    assert_eq!(tokens[0].span.start.1.as_str(), "main.mw");

    let tokens = tokenize("x", None).unwrap();
    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}
