//! Text rendering of bound trees, used by `--show-program`, `#showProgram` and the
//! DOT output of control-flow graphs.

use std::fmt::{self, Display, Write};

use crate::symbols::value::Value;

use super::{
    bound_tree::{BoundExpression, BoundStatement},
    operators::operator_text,
};

const INDENT: &str = "    ";

fn write_nested(f: &mut impl Write, expression: &BoundExpression) -> fmt::Result {
    match expression {
        BoundExpression::Binary { .. } | BoundExpression::Assignment { .. } => {
            write!(f, "({expression})")
        }
        _ => write!(f, "{expression}"),
    }
}

impl Display for BoundExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundExpression::Literal(Value::String(text)) => {
                write!(f, "\"{}\"", text.replace('"', "\"\""))
            }
            BoundExpression::Literal(value) => write!(f, "{value}"),
            BoundExpression::Variable(variable) => write!(f, "{}", variable.name()),
            BoundExpression::Assignment {
                variable,
                expression,
            } => write!(f, "{} = {}", variable.name(), expression),
            BoundExpression::Unary { op, operand } => {
                write!(f, "{}", operator_text(op.token))?;
                write_nested(f, operand)
            }
            BoundExpression::Binary { left, op, right } => {
                write_nested(f, left)?;
                write!(f, " {} ", operator_text(op.token))?;
                write_nested(f, right)
            }
            BoundExpression::Call {
                function,
                arguments,
            } => {
                write!(f, "{}(", function.name())?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            }
            BoundExpression::Conversion { ty, expression } => write!(f, "{ty}({expression})"),
            BoundExpression::Error => write!(f, "?"),
        }
    }
}

fn write_statement(f: &mut impl Write, statement: &BoundStatement, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);

    match statement {
        BoundStatement::Block(statements) => {
            writeln!(f, "{indent}{{")?;
            for statement in statements {
                write_statement(f, statement, depth + 1)?;
            }
            writeln!(f, "{indent}}}")
        }
        BoundStatement::VariableDeclaration {
            variable,
            initializer,
        } => {
            let keyword = if variable.is_read_only() { "let" } else { "var" };
            writeln!(f, "{indent}{keyword} {} = {initializer}", variable.name())
        }
        BoundStatement::If {
            condition,
            then_statement,
            else_statement,
        } => {
            writeln!(f, "{indent}if {condition}")?;
            write_statement(f, then_statement, depth + 1)?;
            if let Some(else_statement) = else_statement {
                writeln!(f, "{indent}else")?;
                write_statement(f, else_statement, depth + 1)?;
            }
            Ok(())
        }
        BoundStatement::While {
            condition, body, ..
        } => {
            writeln!(f, "{indent}while {condition}")?;
            write_statement(f, body, depth + 1)
        }
        BoundStatement::For {
            variable,
            lower_bound,
            upper_bound,
            body,
            ..
        } => {
            writeln!(f, "{indent}for {} in {lower_bound}..{upper_bound}", variable.name())?;
            write_statement(f, body, depth + 1)
        }
        // Labels sit one level out so they stand apart from the statements they mark
        BoundStatement::Label(label) => {
            let outer = INDENT.repeat(depth.saturating_sub(1));
            writeln!(f, "{outer}{label}:")
        }
        BoundStatement::Goto(label) => writeln!(f, "{indent}goto {label}"),
        BoundStatement::ConditionalGoto {
            label,
            condition,
            jump_if_true,
        } => {
            let keyword = if *jump_if_true { "if" } else { "unless" };
            writeln!(f, "{indent}goto {label} {keyword} {condition}")
        }
        BoundStatement::Return(None) => writeln!(f, "{indent}return"),
        BoundStatement::Return(Some(expression)) => writeln!(f, "{indent}return {expression}"),
        BoundStatement::Expression(expression) => writeln!(f, "{indent}{expression}"),
    }
}

impl Display for BoundStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statement(f, self, 0)
    }
}

/// Writes a statement list, one statement per line, at the given depth.
pub fn write_body(f: &mut impl Write, statements: &[BoundStatement], depth: usize) -> fmt::Result {
    for statement in statements {
        write_statement(f, statement, depth)?;
    }
    Ok(())
}
