use std::collections::HashMap;

use crate::{
    binder::bound_tree::{BoundLabel, BoundStatement},
    errors::errors::RuntimeError,
    symbols::value::Value,
};

use super::{
    evaluator::Evaluator,
    expr::{eval_bool, eval_expression, eval_value},
};

fn jump(labels: &HashMap<&BoundLabel, usize>, label: &BoundLabel) -> Result<usize, RuntimeError> {
    labels
        .get(label)
        .copied()
        .ok_or_else(|| RuntimeError::UndefinedLabel {
            label: label.name().to_string(),
        })
}

/// Runs a lowered statement list until it returns or falls off the end.
///
/// Returns the value handed to `return`, or the last value produced when the body ends
/// without one.
pub fn run_body(evaluator: &mut Evaluator, body: &[BoundStatement]) -> Result<Option<Value>, RuntimeError> {
    let labels: HashMap<&BoundLabel, usize> = body
        .iter()
        .enumerate()
        .filter_map(|(index, statement)| match statement {
            BoundStatement::Label(label) => Some((label, index)),
            _ => None,
        })
        .collect();

    let mut index = 0;
    while index < body.len() {
        match &body[index] {
            BoundStatement::VariableDeclaration {
                variable,
                initializer,
            } => {
                let value = eval_value(evaluator, initializer)?;
                evaluator.last_value = Some(value.clone());
                evaluator.assign(variable, value);
                index += 1;
            }
            BoundStatement::Expression(expression) => {
                evaluator.last_value = eval_expression(evaluator, expression)?;
                index += 1;
            }
            BoundStatement::Label(_) => index += 1,
            BoundStatement::Goto(label) => index = jump(&labels, label)?,
            BoundStatement::ConditionalGoto {
                label,
                condition,
                jump_if_true,
            } => {
                if eval_bool(evaluator, condition)? == *jump_if_true {
                    index = jump(&labels, label)?;
                } else {
                    index += 1;
                }
            }
            BoundStatement::Return(expression) => {
                let value = match expression {
                    Some(expression) => Some(eval_value(evaluator, expression)?),
                    None => None,
                };
                evaluator.last_value = value.clone();
                return Ok(value);
            }
            other => {
                return Err(RuntimeError::UnloweredStatement {
                    kind: other.kind_name(),
                })
            }
        }
    }

    Ok(evaluator.last_value.clone())
}
