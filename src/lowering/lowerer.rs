use crate::{
    binder::{
        bound_tree::{BoundExpression, BoundLabel, BoundStatement},
        operators::bind_binary_operator,
    },
    lexer::tokens::TokenKind,
    symbols::{
        symbols::{VariableKind, VariableSymbol},
        types::TypeSymbol,
        value::Value,
    },
};

/// Rewrites structured control flow into labels and jumps.
#[derive(Debug, Default)]
pub struct Lowerer {
    label_count: usize,
}

impl Lowerer {
    pub fn new() -> Self {
        Lowerer::default()
    }

    fn generate_label(&mut self) -> BoundLabel {
        self.label_count += 1;
        BoundLabel::new(format!("Label{}", self.label_count))
    }

    /// Appends the flat form of `statement` to `out`.
    pub fn rewrite(&mut self, statement: BoundStatement, out: &mut Vec<BoundStatement>) {
        match statement {
            BoundStatement::Block(statements) => {
                for statement in statements {
                    self.rewrite(statement, out);
                }
            }
            BoundStatement::If {
                condition,
                then_statement,
                else_statement: None,
            } => {
                // gotoFalse <condition> end
                // <then>
                // end:
                let end_label = self.generate_label();
                out.push(BoundStatement::ConditionalGoto {
                    label: end_label.clone(),
                    condition,
                    jump_if_true: false,
                });
                self.rewrite(*then_statement, out);
                out.push(BoundStatement::Label(end_label));
            }
            BoundStatement::If {
                condition,
                then_statement,
                else_statement: Some(else_statement),
            } => {
                // gotoFalse <condition> else
                // <then>
                // goto end
                // else:
                // <else>
                // end:
                let else_label = self.generate_label();
                let end_label = self.generate_label();
                out.push(BoundStatement::ConditionalGoto {
                    label: else_label.clone(),
                    condition,
                    jump_if_true: false,
                });
                self.rewrite(*then_statement, out);
                out.push(BoundStatement::Goto(end_label.clone()));
                out.push(BoundStatement::Label(else_label));
                self.rewrite(*else_statement, out);
                out.push(BoundStatement::Label(end_label));
            }
            BoundStatement::While {
                condition,
                body,
                break_label,
                continue_label,
            } => {
                // continue:
                // gotoFalse <condition> break
                // <body>
                // goto continue
                // break:
                out.push(BoundStatement::Label(continue_label.clone()));
                out.push(BoundStatement::ConditionalGoto {
                    label: break_label.clone(),
                    condition,
                    jump_if_true: false,
                });
                self.rewrite(*body, out);
                out.push(BoundStatement::Goto(continue_label));
                out.push(BoundStatement::Label(break_label));
            }
            BoundStatement::For {
                variable,
                lower_bound,
                upper_bound,
                body,
                break_label,
                continue_label,
            } => {
                let block = self.rewrite_for(variable, lower_bound, upper_bound, *body, break_label, continue_label);
                self.rewrite(block, out);
            }
            other => out.push(other),
        }
    }

    /// {
    ///     var <var> = <lower>
    ///     let upperBound = <upper>
    ///     while <var> <= upperBound {
    ///         <body>
    ///         continue:
    ///         <var> = <var> + 1
    ///     }
    /// }
    fn rewrite_for(
        &mut self,
        variable: VariableSymbol,
        lower_bound: BoundExpression,
        upper_bound: BoundExpression,
        body: BoundStatement,
        break_label: BoundLabel,
        continue_label: BoundLabel,
    ) -> BoundStatement {
        let upper_bound_symbol = VariableSymbol::new("upperBound", VariableKind::Local, true, TypeSymbol::Int);

        let condition = match bind_binary_operator(TokenKind::LessEquals, TypeSymbol::Int, TypeSymbol::Int) {
            Some(op) => BoundExpression::Binary {
                left: Box::new(BoundExpression::Variable(variable.clone())),
                op,
                right: Box::new(BoundExpression::Variable(upper_bound_symbol.clone())),
            },
            None => BoundExpression::Error,
        };

        let increment = match bind_binary_operator(TokenKind::Plus, TypeSymbol::Int, TypeSymbol::Int) {
            Some(op) => BoundExpression::Assignment {
                variable: variable.clone(),
                expression: Box::new(BoundExpression::Binary {
                    left: Box::new(BoundExpression::Variable(variable.clone())),
                    op,
                    right: Box::new(BoundExpression::Literal(Value::Int(1))),
                }),
            },
            None => BoundExpression::Error,
        };

        let while_body = BoundStatement::Block(vec![
            body,
            BoundStatement::Label(continue_label),
            BoundStatement::Expression(increment),
        ]);

        BoundStatement::Block(vec![
            BoundStatement::VariableDeclaration {
                variable,
                initializer: lower_bound,
            },
            BoundStatement::VariableDeclaration {
                variable: upper_bound_symbol,
                initializer: upper_bound,
            },
            BoundStatement::While {
                condition,
                body: Box::new(while_body),
                break_label,
                continue_label: self.generate_label(),
            },
        ])
    }
}

/// Lowers one function body or the global statements into a flat statement list.
#[tracing::instrument(level = "trace", skip_all)]
pub fn lower(statement: BoundStatement) -> Vec<BoundStatement> {
    let mut lowerer = Lowerer::new();
    let mut out = Vec::new();
    lowerer.rewrite(statement, &mut out);
    out
}
