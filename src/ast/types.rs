use crate::{lexer::tokens::Token, Span};

/// Type Clause
/// `: name` after a parameter, variable or function signature.
#[derive(Debug, Clone)]
pub struct TypeClause {
    pub identifier: Token,
    pub span: Span,
}
