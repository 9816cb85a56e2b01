use std::collections::HashMap;

use crate::{
    binder::{
        bound_tree::BoundExpression,
        operators::{BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind},
    },
    errors::errors::RuntimeError,
    symbols::{builtins, symbols::FunctionSymbol, types::TypeSymbol, value::Value},
};

use super::{
    builtins::call_builtin,
    evaluator::{Evaluator, MAX_CALL_DEPTH},
    stmt::run_body,
};

fn expect_int(value: &Value) -> Result<i32, RuntimeError> {
    value.as_int().ok_or(RuntimeError::TypeMismatch {
        expected: TypeSymbol::Int,
        found: value.ty(),
    })
}

fn expect_bool(value: &Value) -> Result<bool, RuntimeError> {
    value.as_bool().ok_or(RuntimeError::TypeMismatch {
        expected: TypeSymbol::Bool,
        found: value.ty(),
    })
}

fn expect_str(value: &Value) -> Result<&str, RuntimeError> {
    value.as_str().ok_or(RuntimeError::TypeMismatch {
        expected: TypeSymbol::String,
        found: value.ty(),
    })
}

/// Evaluates an expression. Calls to `void` functions produce `None`.
pub fn eval_expression(evaluator: &mut Evaluator, expression: &BoundExpression) -> Result<Option<Value>, RuntimeError> {
    match expression {
        BoundExpression::Literal(value) => Ok(Some(value.clone())),
        BoundExpression::Variable(variable) => evaluator.lookup(variable).map(Some),
        BoundExpression::Assignment {
            variable,
            expression,
        } => {
            let value = eval_value(evaluator, expression)?;
            evaluator.assign(variable, value.clone());
            Ok(Some(value))
        }
        BoundExpression::Unary { op, operand } => {
            let operand = eval_value(evaluator, operand)?;
            eval_unary(op, &operand).map(Some)
        }
        BoundExpression::Binary { left, op, right } => eval_binary(evaluator, left, op, right).map(Some),
        BoundExpression::Call {
            function,
            arguments,
        } => eval_call(evaluator, function, arguments),
        BoundExpression::Conversion { ty, expression } => {
            let value = eval_value(evaluator, expression)?;
            convert(&value, *ty).map(Some)
        }
        BoundExpression::Error => Err(RuntimeError::MissingValue),
    }
}

/// Evaluates an expression that must produce a value.
pub fn eval_value(evaluator: &mut Evaluator, expression: &BoundExpression) -> Result<Value, RuntimeError> {
    eval_expression(evaluator, expression)?.ok_or(RuntimeError::MissingValue)
}

pub fn eval_bool(evaluator: &mut Evaluator, expression: &BoundExpression) -> Result<bool, RuntimeError> {
    let value = eval_value(evaluator, expression)?;
    expect_bool(&value)
}

fn eval_unary(op: &BoundUnaryOperator, operand: &Value) -> Result<Value, RuntimeError> {
    Ok(match op.kind {
        BoundUnaryOperatorKind::Identity => Value::Int(expect_int(operand)?),
        BoundUnaryOperatorKind::Negation => Value::Int(expect_int(operand)?.wrapping_neg()),
        BoundUnaryOperatorKind::LogicalNegation => Value::Bool(!expect_bool(operand)?),
        BoundUnaryOperatorKind::OnesComplement => Value::Int(!expect_int(operand)?),
    })
}

fn eval_binary(
    evaluator: &mut Evaluator,
    left: &BoundExpression,
    op: &BoundBinaryOperator,
    right: &BoundExpression,
) -> Result<Value, RuntimeError> {
    use BoundBinaryOperatorKind as B;

    let left = eval_value(evaluator, left)?;

    // && and || skip the right operand once the left decides the result
    match op.kind {
        B::LogicalAnd if !expect_bool(&left)? => return Ok(Value::Bool(false)),
        B::LogicalOr if expect_bool(&left)? => return Ok(Value::Bool(true)),
        _ => {}
    }

    let right = eval_value(evaluator, right)?;

    Ok(match (op.kind, op.left) {
        (B::Addition, TypeSymbol::String) => {
            let mut text = expect_str(&left)?.to_string();
            text.push_str(expect_str(&right)?);
            Value::String(text)
        }
        (B::Addition, _) => Value::Int(expect_int(&left)?.wrapping_add(expect_int(&right)?)),
        (B::Subtraction, _) => Value::Int(expect_int(&left)?.wrapping_sub(expect_int(&right)?)),
        (B::Multiplication, _) => Value::Int(expect_int(&left)?.wrapping_mul(expect_int(&right)?)),
        (B::Division, _) => {
            let (dividend, divisor) = (expect_int(&left)?, expect_int(&right)?);
            if divisor == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Value::Int(
                dividend
                    .checked_div(divisor)
                    .ok_or(RuntimeError::Overflow { operation: "/" })?,
            )
        }
        (B::BitwiseAnd, TypeSymbol::Bool) => Value::Bool(expect_bool(&left)? & expect_bool(&right)?),
        (B::BitwiseOr, TypeSymbol::Bool) => Value::Bool(expect_bool(&left)? | expect_bool(&right)?),
        (B::BitwiseXor, TypeSymbol::Bool) => Value::Bool(expect_bool(&left)? ^ expect_bool(&right)?),
        (B::BitwiseAnd, _) => Value::Int(expect_int(&left)? & expect_int(&right)?),
        (B::BitwiseOr, _) => Value::Int(expect_int(&left)? | expect_int(&right)?),
        (B::BitwiseXor, _) => Value::Int(expect_int(&left)? ^ expect_int(&right)?),
        (B::Equals, _) => Value::Bool(left == right),
        (B::NotEquals, _) => Value::Bool(left != right),
        (B::Less, _) => Value::Bool(expect_int(&left)? < expect_int(&right)?),
        (B::LessOrEquals, _) => Value::Bool(expect_int(&left)? <= expect_int(&right)?),
        (B::Greater, _) => Value::Bool(expect_int(&left)? > expect_int(&right)?),
        (B::GreaterOrEquals, _) => Value::Bool(expect_int(&left)? >= expect_int(&right)?),
        (B::LogicalAnd, _) => Value::Bool(expect_bool(&left)? && expect_bool(&right)?),
        (B::LogicalOr, _) => Value::Bool(expect_bool(&left)? || expect_bool(&right)?),
    })
}

/// Applies an explicit conversion. Parsing a string is the only conversion that can fail.
pub fn convert(value: &Value, target: TypeSymbol) -> Result<Value, RuntimeError> {
    let invalid = || RuntimeError::InvalidConversion {
        value: value.to_string(),
        target,
    };

    match (value, target) {
        (_, ty) if ty == value.ty() => Ok(value.clone()),
        (Value::Int(number), TypeSymbol::Bool) => Ok(Value::Bool(*number != 0)),
        (Value::Bool(flag), TypeSymbol::Int) => Ok(Value::Int(i32::from(*flag))),
        (Value::Int(_) | Value::Bool(_), TypeSymbol::String) => Ok(Value::String(value.to_string())),
        (Value::String(text), TypeSymbol::Int) => text.trim().parse::<i32>().map(Value::Int).map_err(|_| invalid()),
        (Value::String(text), TypeSymbol::Bool) => {
            let text = text.trim();
            if text.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}

fn eval_call(
    evaluator: &mut Evaluator,
    function: &FunctionSymbol,
    arguments: &[BoundExpression],
) -> Result<Option<Value>, RuntimeError> {
    let mut values = Vec::with_capacity(arguments.len());
    for argument in arguments {
        values.push(eval_value(evaluator, argument)?);
    }

    if builtins::all().contains(function) {
        return call_builtin(evaluator, function, &values);
    }

    let program = evaluator.program;
    let body = program
        .functions
        .get(function)
        .ok_or_else(|| RuntimeError::MissingFunctionBody {
            function: function.name().to_string(),
        })?;

    tracing::trace!(function = function.name(), arguments = values.len(), "call");

    // The first frame belongs to top-level code
    if evaluator.locals.len() > MAX_CALL_DEPTH {
        tracing::debug!(function = function.name(), "call depth exceeded");
        return Err(RuntimeError::StackOverflow {
            function: function.name().to_string(),
        });
    }

    let frame: HashMap<_, _> = function.parameters().iter().cloned().zip(values).collect();
    let saved_last = evaluator.last_value.take();

    evaluator.locals.push(frame);
    let result = run_body(evaluator, body);
    evaluator.locals.pop();

    evaluator.last_value = saved_last;

    let value = result?;
    if function.ty() == TypeSymbol::Void {
        Ok(None)
    } else {
        value.map(Some).ok_or(RuntimeError::MissingValue)
    }
}
