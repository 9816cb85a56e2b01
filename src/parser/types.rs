//! Type clause parsing.
//!
//! Types are only ever written as `: name` after a parameter, a variable name or a
//! function signature, so there is no type expression grammar to drive. Whether the
//! name denotes a real type is decided by the binder.

use crate::{ast::types::TypeClause, errors::errors::Error, lexer::tokens::TokenKind, Span};

use super::parser::Parser;

/// Parses `: name`.
pub fn parse_type_clause(parser: &mut Parser) -> Result<TypeClause, Error> {
    let colon = parser.expect(TokenKind::Colon)?;
    let identifier = parser.expect(TokenKind::Identifier)?;

    Ok(TypeClause {
        span: Span::from_bounds(&colon.span, &identifier.span),
        identifier,
    })
}

/// Parses a type clause when the current token is `:`.
pub fn parse_optional_type_clause(parser: &mut Parser) -> Result<Option<TypeClause>, Error> {
    if parser.current_token_kind() != TokenKind::Colon {
        return Ok(None);
    }

    parse_type_clause(parser).map(Some)
}
