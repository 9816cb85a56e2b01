use crate::{lexer::tokens::Token, symbols::value::Value, Span};

use super::ast::Expr;

// LITERALS

/// Literal Expression
/// A number, string, `true` or `false`, with its value already decoded.
#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub token: Token,
    pub value: Value,
}

/// Name Expression
/// A bare identifier read as a variable.
#[derive(Debug, Clone)]
pub struct NameExpr {
    pub identifier: Token,
}

// COMPLEX

/// Assignment Expression
/// `name = value`. The target is always a plain name.
#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub identifier: Token,
    pub equals: Token,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: Token,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Call Expression
/// `name(arg, ...)`. The separators are kept so diagnostics can point between arguments.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub identifier: Token,
    pub arguments: Vec<Expr>,
    pub separators: Vec<Token>,
    pub close_paren: Token,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ParenthesizedExpr {
    pub expression: Box<Expr>,
    pub span: Span,
}
