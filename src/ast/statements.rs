use crate::{lexer::tokens::Token, Span};

use super::{
    ast::{Expr, Stmt},
    types::TypeClause,
};

/// Block Statement
/// Opens a new scope for the statements it holds.
#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

/// Variable Declaration Statement
/// `var`/`let` name [: type] = value. The keyword token decides mutability.
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub keyword: Token,
    pub identifier: Token,
    pub type_clause: Option<TypeClause>,
    pub initializer: Expr,
    pub span: Span,
}

impl VarDeclStmt {
    pub fn is_read_only(&self) -> bool {
        self.keyword.value == "let"
    }
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

/// For Statement
/// `for i in lower..upper body`; both bounds are inclusive.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub identifier: Token,
    pub lower_bound: Expr,
    pub upper_bound: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub keyword: Token,
}

#[derive(Debug, Clone)]
pub struct ContinueStmt {
    pub keyword: Token,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub identifier: Token,
    pub type_clause: TypeClause,
    pub span: Span,
}

/// Function Declaration
///
/// Shared through an `Arc` between the syntax tree and the function symbol that
/// declares it, so the body can be bound after every signature is known.
#[derive(Debug, Clone)]
pub struct FnDeclStmt {
    pub identifier: Token,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeClause>,
    pub body: BlockStmt,
    pub span: Span,
}
