use std::sync::Arc;

use super::control_flow_graph::{all_paths_return, ControlFlowGraph};
use crate::{
    binder::{
        binder::{bind_global_scope, bind_program},
        bound_tree::{BoundExpression, BoundLabel, BoundStatement},
    },
    parser::SyntaxTree,
    symbols::value::Value,
};

fn literal(value: impl Into<Value>) -> BoundExpression {
    BoundExpression::Literal(value.into())
}

/// Lowered body of the only function declared in `source`.
fn function_body(source: &str) -> Vec<BoundStatement> {
    let tree = SyntaxTree::parse(source, None);
    let scope = Arc::new(bind_global_scope(None, &[&tree.root]));
    let mut program = bind_program(&scope);
    program
        .functions
        .remove(&scope.functions[0])
        .expect("function body")
}

#[test]
fn test_if_without_else_does_not_return_everywhere() {
    let body = function_body("func f(n: int): bool { if n > 10 return true }");
    assert!(!all_paths_return(&body));

    let body = function_body("func f(n: int): bool { if n > 10 return true else return false }");
    assert!(all_paths_return(&body));
}

#[test]
fn test_empty_body_does_not_return() {
    assert!(!all_paths_return(&[]));
}

#[test]
fn test_return_after_loop() {
    let body = function_body("func f(): int { var i = 0 while i < 10 { i = i + 1 } return i }");
    assert!(all_paths_return(&body));

    let body = function_body("func f(): int { var i = 0 while i < 10 { return i } }");
    assert!(!all_paths_return(&body));
}

#[test]
fn test_unreachable_blocks_are_removed() {
    let statements = vec![
        BoundStatement::Return(Some(literal(1))),
        BoundStatement::Expression(literal(2)),
    ];
    let graph = ControlFlowGraph::create(&statements);

    assert_eq!(graph.blocks.len(), 3);
    assert!(graph.block(graph.start).is_some());
    assert!(graph.block(graph.end).is_some());
    assert_eq!(graph.incoming(graph.end).count(), 1);
    assert!(graph
        .blocks
        .iter()
        .all(|block| !block.statements.contains(&BoundStatement::Expression(literal(2)))));
    assert!(all_paths_return(&statements));
}

#[test]
fn test_conditional_branches() {
    let target = BoundLabel::new("Label1");
    let statements = vec![
        BoundStatement::ConditionalGoto {
            label: target.clone(),
            condition: literal(true),
            jump_if_true: true,
        },
        BoundStatement::Return(Some(literal(1))),
        BoundStatement::Label(target),
        BoundStatement::Return(Some(literal(2))),
    ];
    let graph = ControlFlowGraph::create(&statements);

    // Start, end and three body blocks
    assert_eq!(graph.blocks.len(), 5);

    let outgoing: Vec<_> = graph.outgoing(2).collect();
    assert_eq!(outgoing.len(), 2);
    assert_eq!(outgoing[0].to, 4);
    assert_eq!(outgoing[0].condition, Some(literal(true)));
    assert_eq!(outgoing[1].to, 3);
    assert_eq!(outgoing[1].condition, Some(literal(false)));

    assert_eq!(graph.incoming(graph.end).count(), 2);
    assert!(all_paths_return(&statements));
}

#[test]
fn test_write_dot() {
    let statements = vec![
        BoundStatement::Expression(literal(1)),
        BoundStatement::Return(None),
    ];
    let graph = ControlFlowGraph::create(&statements);

    let mut out = String::new();
    graph.write_dot(&mut out).unwrap();

    assert!(out.starts_with("digraph G {"));
    assert!(out.contains("N0 [label = \"<Start>\", shape = box]"));
    assert!(out.contains("N1 [label = \"<End>\", shape = box]"));
    assert!(out.contains("N0 -> N2"));
    assert!(out.contains("N2 -> N1"));
    assert!(out.trim_end().ends_with('}'));
}
