use std::{collections::HashMap, fmt::Display, sync::Arc};

use crate::{
    diagnostics::Diagnostic,
    symbols::{
        symbols::{FunctionSymbol, VariableSymbol},
        types::TypeSymbol,
        value::Value,
    },
};

use super::operators::{BoundBinaryOperator, BoundUnaryOperator};

/// A jump target. Names are unique within one function body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundLabel(pub String);

impl BoundLabel {
    pub fn new(name: impl Into<String>) -> Self {
        BoundLabel(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for BoundLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bound Statement
///
/// After lowering only `VariableDeclaration`, `Expression`, `Label`, `Goto`,
/// `ConditionalGoto` and `Return` remain.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundStatement {
    Block(Vec<BoundStatement>),
    VariableDeclaration {
        variable: VariableSymbol,
        initializer: BoundExpression,
    },
    If {
        condition: BoundExpression,
        then_statement: Box<BoundStatement>,
        else_statement: Option<Box<BoundStatement>>,
    },
    While {
        condition: BoundExpression,
        body: Box<BoundStatement>,
        break_label: BoundLabel,
        continue_label: BoundLabel,
    },
    For {
        variable: VariableSymbol,
        lower_bound: BoundExpression,
        upper_bound: BoundExpression,
        body: Box<BoundStatement>,
        break_label: BoundLabel,
        continue_label: BoundLabel,
    },
    Label(BoundLabel),
    Goto(BoundLabel),
    ConditionalGoto {
        label: BoundLabel,
        condition: BoundExpression,
        jump_if_true: bool,
    },
    Return(Option<BoundExpression>),
    Expression(BoundExpression),
}

impl BoundStatement {
    /// Name of the statement kind, used in logs and runtime faults.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundStatement::Block(_) => "block",
            BoundStatement::VariableDeclaration { .. } => "variable declaration",
            BoundStatement::If { .. } => "if",
            BoundStatement::While { .. } => "while",
            BoundStatement::For { .. } => "for",
            BoundStatement::Label(_) => "label",
            BoundStatement::Goto(_) => "goto",
            BoundStatement::ConditionalGoto { .. } => "conditional goto",
            BoundStatement::Return(_) => "return",
            BoundStatement::Expression(_) => "expression",
        }
    }
}

/// Bound Expression
///
/// Every variant has a type; `Error` stands in for an expression that already
/// produced a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpression {
    Literal(Value),
    Variable(VariableSymbol),
    Assignment {
        variable: VariableSymbol,
        expression: Box<BoundExpression>,
    },
    Unary {
        op: &'static BoundUnaryOperator,
        operand: Box<BoundExpression>,
    },
    Binary {
        left: Box<BoundExpression>,
        op: &'static BoundBinaryOperator,
        right: Box<BoundExpression>,
    },
    Call {
        function: FunctionSymbol,
        arguments: Vec<BoundExpression>,
    },
    Conversion {
        ty: TypeSymbol,
        expression: Box<BoundExpression>,
    },
    Error,
}

impl BoundExpression {
    pub fn ty(&self) -> TypeSymbol {
        match self {
            BoundExpression::Literal(value) => value.ty(),
            BoundExpression::Variable(variable) => variable.ty(),
            BoundExpression::Assignment { variable, .. } => variable.ty(),
            BoundExpression::Unary { op, .. } => op.result,
            BoundExpression::Binary { op, .. } => op.result,
            BoundExpression::Call { function, .. } => function.ty(),
            BoundExpression::Conversion { ty, .. } => *ty,
            BoundExpression::Error => TypeSymbol::Error,
        }
    }
}

/// The symbols and top-level statements of one submission, bound but not lowered.
#[derive(Debug)]
pub struct BoundGlobalScope {
    pub previous: Option<Arc<BoundGlobalScope>>,
    /// Includes the diagnostics of every previous submission, oldest first.
    pub diagnostics: Vec<Diagnostic>,
    pub functions: Vec<FunctionSymbol>,
    pub variables: Vec<VariableSymbol>,
    pub statements: Vec<BoundStatement>,
}

/// A fully bound and lowered program, ready to be evaluated.
#[derive(Debug)]
pub struct BoundProgram {
    pub diagnostics: Vec<Diagnostic>,
    pub functions: HashMap<FunctionSymbol, Vec<BoundStatement>>,
    pub statement: Vec<BoundStatement>,
}
