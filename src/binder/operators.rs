use crate::{lexer::tokens::TokenKind, symbols::types::TypeSymbol};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
    OnesComplement,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BoundUnaryOperator {
    pub token: TokenKind,
    pub kind: BoundUnaryOperatorKind,
    pub operand: TypeSymbol,
    pub result: TypeSymbol,
}

impl BoundUnaryOperator {
    const fn new(token: TokenKind, kind: BoundUnaryOperatorKind, operand: TypeSymbol) -> Self {
        BoundUnaryOperator {
            token,
            kind,
            operand,
            result: operand,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BoundBinaryOperator {
    pub token: TokenKind,
    pub kind: BoundBinaryOperatorKind,
    pub left: TypeSymbol,
    pub right: TypeSymbol,
    pub result: TypeSymbol,
}

impl BoundBinaryOperator {
    const fn new(
        token: TokenKind,
        kind: BoundBinaryOperatorKind,
        operands: TypeSymbol,
        result: TypeSymbol,
    ) -> Self {
        BoundBinaryOperator {
            token,
            kind,
            left: operands,
            right: operands,
            result,
        }
    }
}

use BoundBinaryOperatorKind as B;
use BoundUnaryOperatorKind as U;

static UNARY_OPERATORS: [BoundUnaryOperator; 4] = [
    BoundUnaryOperator::new(TokenKind::Not, U::LogicalNegation, TypeSymbol::Bool),
    BoundUnaryOperator::new(TokenKind::Plus, U::Identity, TypeSymbol::Int),
    BoundUnaryOperator::new(TokenKind::Dash, U::Negation, TypeSymbol::Int),
    BoundUnaryOperator::new(TokenKind::Tilde, U::OnesComplement, TypeSymbol::Int),
];

static BINARY_OPERATORS: [BoundBinaryOperator; 23] = [
    BoundBinaryOperator::new(TokenKind::Plus, B::Addition, TypeSymbol::Int, TypeSymbol::Int),
    BoundBinaryOperator::new(TokenKind::Dash, B::Subtraction, TypeSymbol::Int, TypeSymbol::Int),
    BoundBinaryOperator::new(TokenKind::Star, B::Multiplication, TypeSymbol::Int, TypeSymbol::Int),
    BoundBinaryOperator::new(TokenKind::Slash, B::Division, TypeSymbol::Int, TypeSymbol::Int),
    BoundBinaryOperator::new(TokenKind::Ampersand, B::BitwiseAnd, TypeSymbol::Int, TypeSymbol::Int),
    BoundBinaryOperator::new(TokenKind::Pipe, B::BitwiseOr, TypeSymbol::Int, TypeSymbol::Int),
    BoundBinaryOperator::new(TokenKind::Hat, B::BitwiseXor, TypeSymbol::Int, TypeSymbol::Int),
    BoundBinaryOperator::new(TokenKind::Equals, B::Equals, TypeSymbol::Int, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::NotEquals, B::NotEquals, TypeSymbol::Int, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::Less, B::Less, TypeSymbol::Int, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::LessEquals, B::LessOrEquals, TypeSymbol::Int, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::Greater, B::Greater, TypeSymbol::Int, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::GreaterEquals, B::GreaterOrEquals, TypeSymbol::Int, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::AmpersandAmpersand, B::LogicalAnd, TypeSymbol::Bool, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::PipePipe, B::LogicalOr, TypeSymbol::Bool, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::Ampersand, B::BitwiseAnd, TypeSymbol::Bool, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::Pipe, B::BitwiseOr, TypeSymbol::Bool, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::Hat, B::BitwiseXor, TypeSymbol::Bool, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::Equals, B::Equals, TypeSymbol::Bool, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::NotEquals, B::NotEquals, TypeSymbol::Bool, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::Plus, B::Addition, TypeSymbol::String, TypeSymbol::String),
    BoundBinaryOperator::new(TokenKind::Equals, B::Equals, TypeSymbol::String, TypeSymbol::Bool),
    BoundBinaryOperator::new(TokenKind::NotEquals, B::NotEquals, TypeSymbol::String, TypeSymbol::Bool),
];

/// Resolves a prefix operator for an operand type.
pub fn bind_unary_operator(token: TokenKind, operand: TypeSymbol) -> Option<&'static BoundUnaryOperator> {
    UNARY_OPERATORS
        .iter()
        .find(|op| op.token == token && op.operand == operand)
}

/// Resolves an infix operator for a pair of operand types.
pub fn bind_binary_operator(
    token: TokenKind,
    left: TypeSymbol,
    right: TypeSymbol,
) -> Option<&'static BoundBinaryOperator> {
    BINARY_OPERATORS
        .iter()
        .find(|op| op.token == token && op.left == left && op.right == right)
}

/// Source text of an operator token, used when printing bound trees.
pub fn operator_text(token: TokenKind) -> &'static str {
    match token {
        TokenKind::Plus => "+",
        TokenKind::Dash => "-",
        TokenKind::Star => "*",
        TokenKind::Slash => "/",
        TokenKind::Not => "!",
        TokenKind::Tilde => "~",
        TokenKind::Ampersand => "&",
        TokenKind::AmpersandAmpersand => "&&",
        TokenKind::Pipe => "|",
        TokenKind::PipePipe => "||",
        TokenKind::Hat => "^",
        TokenKind::Equals => "==",
        TokenKind::NotEquals => "!=",
        TokenKind::Less => "<",
        TokenKind::LessEquals => "<=",
        TokenKind::Greater => ">",
        TokenKind::GreaterEquals => ">=",
        _ => "?",
    }
}
