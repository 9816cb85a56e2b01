//! Unit tests for the parser module.
//!
//! This module contains tests for parsing language constructs including:
//! - Variable declarations
//! - Function declarations
//! - Expressions and precedence
//! - Control flow statements
//! - Syntax errors

use std::sync::Arc;

use super::{parser::parse, SyntaxTree};
use crate::{
    ast::{
        ast::{CompilationUnit, Expr, Member, Stmt},
        expressions::BinaryExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

fn parse_source(source: &str) -> Result<CompilationUnit, Error> {
    let tokens = tokenize(source, Some("test.mw".to_string())).unwrap();
    parse(tokens, Arc::new("test.mw".to_string()))
}

fn single_expression(source: &str) -> Expr {
    let unit = parse_source(source).unwrap();
    assert_eq!(unit.members.len(), 1);
    match &unit.members[0] {
        Member::GlobalStatement(Stmt::Expression(stmt)) => stmt.expression.clone(),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn as_binary(expr: &Expr) -> &BinaryExpr {
    match expr {
        Expr::Binary(binary) => binary,
        other => panic!("expected a binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let unit = parse_source("var x = 42").unwrap();

    match &unit.members[0] {
        Member::GlobalStatement(Stmt::VarDecl(decl)) => {
            assert_eq!(decl.identifier.value, "x");
            assert!(!decl.is_read_only());
            assert!(decl.type_clause.is_none());
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_let_with_type_clause() {
    let unit = parse_source("let name: string = \"moon\"").unwrap();

    match &unit.members[0] {
        Member::GlobalStatement(Stmt::VarDecl(decl)) => {
            assert!(decl.is_read_only());
            let clause = decl.type_clause.as_ref().unwrap();
            assert_eq!(clause.identifier.value, "string");
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    let unit = parse_source("func add(a: int, b: int): int { return a + b }").unwrap();

    match &unit.members[0] {
        Member::Function(function) => {
            assert_eq!(function.identifier.value, "add");
            assert_eq!(function.parameters.len(), 2);
            assert_eq!(function.parameters[1].identifier.value, "b");
            assert_eq!(
                function.return_type.as_ref().unwrap().identifier.value,
                "int"
            );
            assert_eq!(function.body.body.len(), 1);
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_parse_function_without_return_type() {
    let unit = parse_source("func hi() { print(\"hi\") }").unwrap();

    match &unit.members[0] {
        Member::Function(function) => {
            assert!(function.parameters.is_empty());
            assert!(function.return_type.is_none());
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = single_expression("1 + 2 * 3");
    let binary = as_binary(&expr);

    assert_eq!(binary.operator.kind, TokenKind::Plus);
    assert_eq!(as_binary(&binary.right).operator.kind, TokenKind::Star);
}

#[test]
fn test_binary_operators_are_left_associative() {
    let expr = single_expression("1 - 2 - 3");
    let binary = as_binary(&expr);

    assert_eq!(binary.operator.kind, TokenKind::Dash);
    assert_eq!(as_binary(&binary.left).operator.kind, TokenKind::Dash);
    assert!(matches!(*binary.right, Expr::Literal(_)));
}

#[test]
fn test_logical_precedence() {
    // && binds tighter than ||, comparisons tighter than both
    let expr = single_expression("a || b && c == d");
    let binary = as_binary(&expr);

    assert_eq!(binary.operator.kind, TokenKind::PipePipe);
    let right = as_binary(&binary.right);
    assert_eq!(right.operator.kind, TokenKind::AmpersandAmpersand);
    assert_eq!(as_binary(&right.right).operator.kind, TokenKind::Equals);
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let expr = single_expression("-1 + 2");
    let binary = as_binary(&expr);

    assert_eq!(binary.operator.kind, TokenKind::Plus);
    assert!(matches!(*binary.left, Expr::Prefix(_)));
}

#[test]
fn test_assignment_is_right_associative() {
    let expr = single_expression("a = b = 5");

    match expr {
        Expr::Assignment(outer) => {
            assert_eq!(outer.identifier.value, "a");
            match *outer.value {
                Expr::Assignment(inner) => assert_eq!(inner.identifier.value, "b"),
                other => panic!("expected a nested assignment, got {:?}", other),
            }
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_assignment_requires_name() {
    let error = parse_source("1 + 2 = 3").unwrap_err();
    assert_eq!(error.get_error(), &ErrorImpl::InvalidAssignmentTarget);
}

#[test]
fn test_parse_call_keeps_separators() {
    let expr = single_expression("print(1, 2, 3)");

    match expr {
        Expr::Call(call) => {
            assert_eq!(call.identifier.value, "print");
            assert_eq!(call.arguments.len(), 3);
            assert_eq!(call.separators.len(), 2);
            assert_eq!(call.close_paren.kind, TokenKind::CloseParen);
            assert_eq!(call.span.start.0, 0);
            assert_eq!(call.span.end.0, 14);
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_parse_control_flow() {
    let unit = parse_source(
        "var x = 0\nwhile x < 10 { x = x + 1 }\nif x > 5 print(\"big\") else print(\"small\")\nfor i in 1..10 { break }",
    )
    .unwrap();

    assert_eq!(unit.members.len(), 4);
    assert!(matches!(unit.members[1], Member::GlobalStatement(Stmt::While(_))));
    match &unit.members[2] {
        Member::GlobalStatement(Stmt::If(stmt)) => assert!(stmt.else_body.is_some()),
        other => panic!("expected an if statement, got {:?}", other),
    }
    match &unit.members[3] {
        Member::GlobalStatement(Stmt::For(stmt)) => {
            assert_eq!(stmt.identifier.value, "i");
            assert!(matches!(*stmt.body, Stmt::Block(_)));
        }
        other => panic!("expected a for statement, got {:?}", other),
    }
}

#[test]
fn test_return_value_must_start_on_same_line() {
    let unit = parse_source("func f() {\n return\n 1\n}").unwrap();

    match &unit.members[0] {
        Member::Function(function) => {
            assert_eq!(function.body.body.len(), 2);
            match &function.body.body[0] {
                Stmt::Return(stmt) => assert!(stmt.value.is_none()),
                other => panic!("expected a return, got {:?}", other),
            }
        }
        other => panic!("expected a function, got {:?}", other),
    }

    let unit = parse_source("func g(): int { return 1 }").unwrap();
    match &unit.members[0] {
        Member::Function(function) => match &function.body.body[0] {
            Stmt::Return(stmt) => assert!(stmt.value.is_some()),
            other => panic!("expected a return, got {:?}", other),
        },
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_missing_close_paren() {
    let error = parse_source("(1 + 2").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::ExpectedToken {
            found: TokenKind::EOF,
            expected: TokenKind::CloseParen
        }
    );
}

#[test]
fn test_missing_expression() {
    let error = parse_source("var x = )").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::ExpectedExpression {
            found: TokenKind::CloseParen
        }
    );
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_syntax_tree_reports_first_error_only() {
    let tree = SyntaxTree::parse("var = 1\nvar = 2", Some("test.mw".to_string()));

    assert!(tree.root.members.is_empty());
    assert_eq!(tree.diagnostics.len(), 1);
    assert_eq!(
        tree.diagnostics[0].message,
        "Unexpected token <Assignment>, expected <Identifier>."
    );
}

#[test]
fn test_syntax_tree_reports_lexer_errors() {
    let tree = SyntaxTree::parse("1 $ 2", None);

    assert_eq!(tree.diagnostics.len(), 1);
    assert_eq!(tree.diagnostics[0].message, "Bad character input: '$'.");
    assert_eq!(tree.file.as_str(), "shell");
}

#[test]
fn test_syntax_tree_keeps_text() {
    let tree = SyntaxTree::parse("print(\"hi\")", None);

    assert!(tree.diagnostics.is_empty());
    assert_eq!(tree.text, "print(\"hi\")");
    assert_eq!(tree.root.members.len(), 1);
}
