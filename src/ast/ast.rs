use std::sync::Arc;

use crate::Span;

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, LiteralExpr, NameExpr, ParenthesizedExpr, PrefixExpr,
    },
    statements::{
        BlockStmt, BreakStmt, ContinueStmt, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt,
        ReturnStmt, VarDeclStmt, WhileStmt,
    },
};

/// The root of a parsed source file.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub members: Vec<Member>,
    pub span: Span,
}

/// A top-level item: a function declaration or a statement run in order.
#[derive(Debug, Clone)]
pub enum Member {
    Function(Arc<FnDeclStmt>),
    GlobalStatement(Stmt),
}

impl Member {
    pub fn get_span(&self) -> &Span {
        match self {
            Member::Function(function) => &function.span,
            Member::GlobalStatement(statement) => statement.get_span(),
        }
    }
}

/// Statement
#[derive(Debug, Clone)]
pub enum Stmt {
    Block(BlockStmt),
    VarDecl(VarDeclStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Block(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.keyword.span,
            Stmt::Continue(stmt) => &stmt.keyword.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Expression(stmt) => stmt.expression.get_span(),
        }
    }
}

/// Expression
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(LiteralExpr),
    Name(NameExpr),
    Assignment(AssignmentExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
    Parenthesized(ParenthesizedExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.token.span,
            Expr::Name(expr) => &expr.identifier.span,
            Expr::Assignment(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Parenthesized(expr) => &expr.span,
        }
    }
}
