use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::lowerer::lower;
use crate::{
    binder::{
        binder::bind_global_scope,
        bound_tree::{BoundExpression, BoundLabel, BoundStatement},
    },
    parser::SyntaxTree,
    symbols::{symbols::VariableKind, value::Value},
};

fn literal(value: impl Into<Value>) -> BoundExpression {
    BoundExpression::Literal(value.into())
}

fn label(name: &str) -> BoundLabel {
    BoundLabel::new(name)
}

fn lower_source(source: &str) -> Vec<BoundStatement> {
    let tree = SyntaxTree::parse(source, None);
    let scope = Arc::new(bind_global_scope(None, &[&tree.root]));
    assert!(scope.diagnostics.is_empty(), "{:?}", scope.diagnostics);
    lower(BoundStatement::Block(scope.statements.clone()))
}

fn is_flat(statement: &BoundStatement) -> bool {
    matches!(
        statement,
        BoundStatement::VariableDeclaration { .. }
            | BoundStatement::Expression(_)
            | BoundStatement::Label(_)
            | BoundStatement::Goto(_)
            | BoundStatement::ConditionalGoto { .. }
            | BoundStatement::Return(_)
    )
}

#[test]
fn test_lower_if_without_else() {
    let lowered = lower(BoundStatement::If {
        condition: literal(true),
        then_statement: Box::new(BoundStatement::Expression(literal(1))),
        else_statement: None,
    });

    assert_eq!(
        lowered,
        vec![
            BoundStatement::ConditionalGoto {
                label: label("Label1"),
                condition: literal(true),
                jump_if_true: false,
            },
            BoundStatement::Expression(literal(1)),
            BoundStatement::Label(label("Label1")),
        ]
    );
}

#[test]
fn test_lower_if_with_else() {
    let lowered = lower(BoundStatement::If {
        condition: literal(false),
        then_statement: Box::new(BoundStatement::Expression(literal(1))),
        else_statement: Some(Box::new(BoundStatement::Expression(literal(2)))),
    });

    assert_eq!(
        lowered,
        vec![
            BoundStatement::ConditionalGoto {
                label: label("Label1"),
                condition: literal(false),
                jump_if_true: false,
            },
            BoundStatement::Expression(literal(1)),
            BoundStatement::Goto(label("Label2")),
            BoundStatement::Label(label("Label1")),
            BoundStatement::Expression(literal(2)),
            BoundStatement::Label(label("Label2")),
        ]
    );
}

#[test]
fn test_lower_while() {
    let lowered = lower(BoundStatement::While {
        condition: literal(true),
        body: Box::new(BoundStatement::Block(vec![BoundStatement::Goto(label("break1"))])),
        break_label: label("break1"),
        continue_label: label("continue1"),
    });

    assert_eq!(
        lowered,
        vec![
            BoundStatement::Label(label("continue1")),
            BoundStatement::ConditionalGoto {
                label: label("break1"),
                condition: literal(true),
                jump_if_true: false,
            },
            BoundStatement::Goto(label("break1")),
            BoundStatement::Goto(label("continue1")),
            BoundStatement::Label(label("break1")),
        ]
    );
}

#[test]
fn test_lower_for() {
    let lowered = lower_source("for i in 1..10 { continue }");

    let kinds: Vec<&str> = lowered.iter().map(|statement| statement.kind_name()).collect();
    assert_eq!(
        kinds,
        vec![
            "variable declaration",
            "variable declaration",
            "label",
            "conditional goto",
            "goto",
            "label",
            "expression",
            "goto",
            "label",
        ]
    );

    match &lowered[1] {
        BoundStatement::VariableDeclaration { variable, .. } => {
            assert_eq!(variable.name(), "upperBound");
            assert_eq!(variable.kind(), VariableKind::Local);
            assert!(variable.is_read_only());
        }
        other => panic!("expected the upper bound, got {:?}", other),
    }

    // The synthesized while gets a fresh continue label; the body's continue keeps
    // targeting the increment
    assert_eq!(lowered[2], BoundStatement::Label(label("Label1")));
    assert_eq!(lowered[4], BoundStatement::Goto(label("continue1")));
    assert_eq!(lowered[5], BoundStatement::Label(label("continue1")));
    assert_eq!(lowered[7], BoundStatement::Goto(label("Label1")));
    assert_eq!(lowered[8], BoundStatement::Label(label("break1")));
}

#[test]
fn test_lowered_output_is_flat() {
    let lowered = lower_source(
        "var x = 0\n{ while x < 10 { if x == 5 break else x = x + 1 } }\nfor i in 0..3 { { x = x + i } }",
    );

    assert!(lowered.iter().all(is_flat), "{:?}", lowered);
}

#[test]
fn test_labels_are_unique() {
    let lowered = lower_source("if true { 1 } else { 2 }\nif false { 3 }\nwhile false { }");

    let mut labels: Vec<&BoundLabel> = lowered
        .iter()
        .filter_map(|statement| match statement {
            BoundStatement::Label(label) => Some(label),
            _ => None,
        })
        .collect();
    let count = labels.len();
    labels.sort_by_key(|label| label.name().to_string());
    labels.dedup();

    assert_eq!(labels.len(), count);
}
