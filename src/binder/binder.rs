use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{CompilationUnit, Expr, Member, Stmt},
        expressions::{AssignmentExpr, BinaryExpr, CallExpr, NameExpr, PrefixExpr},
        statements::{
            BlockStmt, FnDeclStmt, ForStmt, IfStmt, ReturnStmt, VarDeclStmt, WhileStmt,
        },
        types::TypeClause,
    },
    cfg::control_flow_graph::all_paths_return,
    diagnostics::DiagnosticBag,
    lexer::tokens::Token,
    lowering::lowerer::lower,
    symbols::{
        builtins,
        symbols::{FunctionSymbol, Symbol, VariableKind, VariableSymbol},
        types::TypeSymbol,
    },
    Span,
};

use super::{
    bound_tree::{BoundExpression, BoundGlobalScope, BoundLabel, BoundProgram, BoundStatement},
    conversion::Conversion,
    operators::{bind_binary_operator, bind_unary_operator},
    scope::{Scope, ScopeChain},
};

/// The labels `break` and `continue` jump to inside the innermost loop.
#[derive(Debug, Clone)]
pub struct LoopLabels {
    pub break_label: BoundLabel,
    pub continue_label: BoundLabel,
}

pub struct Binder {
    scopes: ScopeChain,
    /// The function whose body is being bound, `None` for global statements.
    function: Option<FunctionSymbol>,
    diagnostics: DiagnosticBag,
    label_counter: usize,
}

impl Binder {
    pub fn new(parent: ScopeChain, function: Option<FunctionSymbol>) -> Self {
        let mut binder = Binder {
            scopes: parent,
            function,
            diagnostics: DiagnosticBag::new(),
            label_counter: 0,
        };
        binder.scopes.push();

        let parameters = binder
            .function
            .as_ref()
            .map(|function| function.parameters().to_vec())
            .unwrap_or_default();
        for parameter in parameters {
            binder.scopes.declare(Symbol::Variable(parameter));
        }

        binder
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    /// Runs `f` inside a fresh scope that is removed again afterwards.
    pub fn in_scope<T>(&mut self, f: impl FnOnce(&mut Binder) -> T) -> T {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn next_loop_labels(&mut self) -> LoopLabels {
        self.label_counter += 1;
        LoopLabels {
            break_label: BoundLabel::new(format!("break{}", self.label_counter)),
            continue_label: BoundLabel::new(format!("continue{}", self.label_counter)),
        }
    }

    fn bind_type_clause(&mut self, clause: Option<&TypeClause>) -> Option<TypeSymbol> {
        let clause = clause?;
        match TypeSymbol::lookup(&clause.identifier.value) {
            Some(ty) => Some(ty),
            None => {
                self.diagnostics
                    .report_undefined_type(&clause.identifier.span, &clause.identifier.value);
                Some(TypeSymbol::Error)
            }
        }
    }

    fn bind_variable(&mut self, identifier: &Token, is_read_only: bool, ty: TypeSymbol) -> VariableSymbol {
        let kind = if self.function.is_some() {
            VariableKind::Local
        } else {
            VariableKind::Global
        };
        let variable = VariableSymbol::new(identifier.value.clone(), kind, is_read_only, ty);

        if !self.scopes.declare(Symbol::Variable(variable.clone())) {
            self.diagnostics
                .report_symbol_already_declared(&identifier.span, &identifier.value);
        }

        variable
    }

    fn bind_variable_reference(&mut self, identifier: &Token) -> Option<VariableSymbol> {
        match self.scopes.lookup(&identifier.value) {
            Some(Symbol::Variable(variable)) => Some(variable),
            Some(_) => {
                self.diagnostics
                    .report_not_a_variable(&identifier.span, &identifier.value);
                None
            }
            None => {
                self.diagnostics
                    .report_undefined_variable(&identifier.span, &identifier.value);
                None
            }
        }
    }

    pub fn bind_function_declaration(&mut self, declaration: &Arc<FnDeclStmt>) {
        let mut parameters = Vec::new();
        let mut seen = HashSet::new();

        for parameter in &declaration.parameters {
            let name = &parameter.identifier.value;
            let ty = self
                .bind_type_clause(Some(&parameter.type_clause))
                .unwrap_or(TypeSymbol::Error);

            if !seen.insert(name.clone()) {
                self.diagnostics
                    .report_parameter_already_declared(&parameter.span, name);
            } else {
                parameters.push(VariableSymbol::new(name.clone(), VariableKind::Parameter, true, ty));
            }
        }

        let ty = self
            .bind_type_clause(declaration.return_type.as_ref())
            .unwrap_or(TypeSymbol::Void);

        let function = FunctionSymbol::new(
            declaration.identifier.value.clone(),
            parameters,
            ty,
            Some(Arc::clone(declaration)),
        );

        debug!(function = %function, "declared function");

        if !self.scopes.declare(Symbol::Function(function)) {
            self.diagnostics.report_symbol_already_declared(
                &declaration.identifier.span,
                &declaration.identifier.value,
            );
        }
    }
}

/// Builds the scope chain a submission is bound in: the built-ins at the root, then one
/// layer per previous submission, oldest first.
fn create_parent_scope(previous: Option<&Arc<BoundGlobalScope>>) -> ScopeChain {
    let mut submissions = Vec::new();
    let mut current = previous;
    while let Some(scope) = current {
        submissions.push(Arc::clone(scope));
        current = scope.previous.as_ref();
    }

    let mut root = Scope::new();
    for function in builtins::all() {
        root.try_declare(Symbol::Function(function));
    }

    let mut chain = ScopeChain::new(root);
    for submission in submissions.iter().rev() {
        chain.push();
        for function in &submission.functions {
            chain.declare(Symbol::Function(function.clone()));
        }
        for variable in &submission.variables {
            chain.declare(Symbol::Variable(variable.clone()));
        }
    }

    chain
}

/// Binds the signatures and global statements of one submission.
///
/// Every function signature is declared before any global statement is bound, so
/// functions can be called before their declaration.
#[tracing::instrument(level = "debug", skip_all)]
pub fn bind_global_scope(
    previous: Option<Arc<BoundGlobalScope>>,
    units: &[&CompilationUnit],
) -> BoundGlobalScope {
    let parent = create_parent_scope(previous.as_ref());
    let mut binder = Binder::new(parent, None);

    for unit in units {
        for member in &unit.members {
            if let Member::Function(declaration) = member {
                binder.bind_function_declaration(declaration);
            }
        }
    }

    let mut statements = Vec::new();
    for unit in units {
        for member in &unit.members {
            if let Member::GlobalStatement(statement) = member {
                statements.push(bind_stmt(&mut binder, statement, None));
            }
        }
    }

    let functions = binder.scopes.current().functions();
    let variables = binder.scopes.current().variables();

    let mut diagnostics = previous
        .as_ref()
        .map(|previous| previous.diagnostics.clone())
        .unwrap_or_default();
    diagnostics.extend(binder.diagnostics);

    debug!(
        functions = functions.len(),
        variables = variables.len(),
        diagnostics = diagnostics.len(),
        "bound global scope"
    );

    BoundGlobalScope {
        previous,
        diagnostics,
        functions,
        variables,
        statements,
    }
}

/// Binds and lowers every function body of the submission chain and lowers the global
/// statements of the newest submission.
///
/// Functions of previous submissions are bound again in the newest scope chain.
#[tracing::instrument(level = "debug", skip_all)]
pub fn bind_program(global_scope: &Arc<BoundGlobalScope>) -> BoundProgram {
    let mut diagnostics = DiagnosticBag::new();
    diagnostics.extend(global_scope.diagnostics.iter().cloned());

    let mut functions = HashMap::new();
    let mut current = Some(global_scope);

    while let Some(scope) = current {
        for function in &scope.functions {
            let declaration = match function.declaration() {
                Some(declaration) => Arc::clone(declaration),
                None => continue,
            };

            let mut binder = Binder::new(create_parent_scope(Some(global_scope)), Some(function.clone()));
            let body = bind_block_stmt(&mut binder, &declaration.body, None);
            let lowered = lower(body);

            if function.ty() != TypeSymbol::Void && !all_paths_return(&lowered) {
                binder
                    .diagnostics
                    .report_all_paths_must_return(&declaration.identifier.span);
            }

            trace!(function = function.name(), statements = lowered.len(), "lowered function body");

            diagnostics.extend(binder.diagnostics);
            functions.insert(function.clone(), lowered);
        }

        current = scope.previous.as_ref();
    }

    let statement = lower(BoundStatement::Block(global_scope.statements.clone()));

    BoundProgram {
        diagnostics: diagnostics.into_vec(),
        functions,
        statement,
    }
}

pub fn bind_stmt(binder: &mut Binder, stmt: &Stmt, loop_labels: Option<&LoopLabels>) -> BoundStatement {
    match stmt {
        Stmt::Block(block) => bind_block_stmt(binder, block, loop_labels),
        Stmt::VarDecl(decl) => bind_var_decl_stmt(binder, decl),
        Stmt::If(stmt) => bind_if_stmt(binder, stmt, loop_labels),
        Stmt::While(stmt) => bind_while_stmt(binder, stmt),
        Stmt::For(stmt) => bind_for_stmt(binder, stmt),
        Stmt::Break(stmt) => match loop_labels {
            Some(labels) => BoundStatement::Goto(labels.break_label.clone()),
            None => {
                binder
                    .diagnostics
                    .report_invalid_break_or_continue(&stmt.keyword.span, &stmt.keyword.value);
                BoundStatement::Expression(BoundExpression::Error)
            }
        },
        Stmt::Continue(stmt) => match loop_labels {
            Some(labels) => BoundStatement::Goto(labels.continue_label.clone()),
            None => {
                binder
                    .diagnostics
                    .report_invalid_break_or_continue(&stmt.keyword.span, &stmt.keyword.value);
                BoundStatement::Expression(BoundExpression::Error)
            }
        },
        Stmt::Return(stmt) => bind_return_stmt(binder, stmt),
        Stmt::Expression(stmt) => BoundStatement::Expression(bind_expr(binder, &stmt.expression, true)),
    }
}

fn bind_block_stmt(binder: &mut Binder, block: &BlockStmt, loop_labels: Option<&LoopLabels>) -> BoundStatement {
    binder.in_scope(|binder| {
        let statements = block
            .body
            .iter()
            .map(|stmt| bind_stmt(binder, stmt, loop_labels))
            .collect();
        BoundStatement::Block(statements)
    })
}

fn bind_var_decl_stmt(binder: &mut Binder, decl: &VarDeclStmt) -> BoundStatement {
    let declared_type = binder.bind_type_clause(decl.type_clause.as_ref());
    let initializer = bind_expr(binder, &decl.initializer, false);

    let ty = declared_type.unwrap_or_else(|| initializer.ty());
    let variable = binder.bind_variable(&decl.identifier, decl.is_read_only(), ty);
    let initializer = bind_conversion(binder, decl.initializer.get_span(), initializer, ty, false);

    BoundStatement::VariableDeclaration {
        variable,
        initializer,
    }
}

fn bind_if_stmt(binder: &mut Binder, stmt: &IfStmt, loop_labels: Option<&LoopLabels>) -> BoundStatement {
    let condition = bind_expr_as(binder, &stmt.condition, TypeSymbol::Bool);
    let then_statement = bind_stmt(binder, &stmt.then_body, loop_labels);
    let else_statement = stmt
        .else_body
        .as_ref()
        .map(|else_body| Box::new(bind_stmt(binder, else_body, loop_labels)));

    BoundStatement::If {
        condition,
        then_statement: Box::new(then_statement),
        else_statement,
    }
}

fn bind_while_stmt(binder: &mut Binder, stmt: &WhileStmt) -> BoundStatement {
    let condition = bind_expr_as(binder, &stmt.condition, TypeSymbol::Bool);
    let labels = binder.next_loop_labels();
    let body = bind_stmt(binder, &stmt.body, Some(&labels));

    BoundStatement::While {
        condition,
        body: Box::new(body),
        break_label: labels.break_label,
        continue_label: labels.continue_label,
    }
}

fn bind_for_stmt(binder: &mut Binder, stmt: &ForStmt) -> BoundStatement {
    let lower_bound = bind_expr_as(binder, &stmt.lower_bound, TypeSymbol::Int);
    let upper_bound = bind_expr_as(binder, &stmt.upper_bound, TypeSymbol::Int);

    binder.in_scope(|binder| {
        let variable = binder.bind_variable(&stmt.identifier, true, TypeSymbol::Int);
        let labels = binder.next_loop_labels();
        let body = bind_stmt(binder, &stmt.body, Some(&labels));

        BoundStatement::For {
            variable,
            lower_bound,
            upper_bound,
            body: Box::new(body),
            break_label: labels.break_label,
            continue_label: labels.continue_label,
        }
    })
}

fn bind_return_stmt(binder: &mut Binder, stmt: &ReturnStmt) -> BoundStatement {
    let mut expression = stmt
        .value
        .as_ref()
        .map(|value| bind_expr(binder, value, false));

    match binder.function.clone() {
        None => binder.diagnostics.report_invalid_return(&stmt.keyword.span),
        Some(function) if function.ty() == TypeSymbol::Void => {
            if let Some(value) = &stmt.value {
                binder
                    .diagnostics
                    .report_invalid_return_expression(value.get_span(), function.name());
            }
        }
        Some(function) => match (expression.take(), &stmt.value) {
            (Some(bound), Some(value)) => {
                expression = Some(bind_conversion(binder, value.get_span(), bound, function.ty(), false));
            }
            _ => binder
                .diagnostics
                .report_missing_return_expression(&stmt.keyword.span, &function.ty()),
        },
    }

    BoundStatement::Return(expression)
}

/// Binds an expression. A `void` result is reported unless `can_be_void` is set.
pub fn bind_expr(binder: &mut Binder, expr: &Expr, can_be_void: bool) -> BoundExpression {
    let result = bind_expr_internal(binder, expr);

    if !can_be_void && result.ty() == TypeSymbol::Void {
        binder
            .diagnostics
            .report_expression_must_have_value(expr.get_span());
        return BoundExpression::Error;
    }

    result
}

/// Binds an expression and converts it implicitly to `ty`.
fn bind_expr_as(binder: &mut Binder, expr: &Expr, ty: TypeSymbol) -> BoundExpression {
    let bound = bind_expr(binder, expr, false);
    bind_conversion(binder, expr.get_span(), bound, ty, false)
}

fn bind_expr_internal(binder: &mut Binder, expr: &Expr) -> BoundExpression {
    match expr {
        Expr::Literal(literal) => BoundExpression::Literal(literal.value.clone()),
        Expr::Name(name) => bind_name_expr(binder, name),
        Expr::Assignment(assignment) => bind_assignment_expr(binder, assignment),
        Expr::Prefix(prefix) => bind_prefix_expr(binder, prefix),
        Expr::Binary(binary) => bind_binary_expr(binder, binary),
        Expr::Call(call) => bind_call_expr(binder, call),
        Expr::Parenthesized(parenthesized) => bind_expr(binder, &parenthesized.expression, false),
    }
}

fn bind_name_expr(binder: &mut Binder, name: &NameExpr) -> BoundExpression {
    match binder.bind_variable_reference(&name.identifier) {
        Some(variable) => BoundExpression::Variable(variable),
        None => BoundExpression::Error,
    }
}

fn bind_assignment_expr(binder: &mut Binder, assignment: &AssignmentExpr) -> BoundExpression {
    let expression = bind_expr(binder, &assignment.value, false);

    let variable = match binder.bind_variable_reference(&assignment.identifier) {
        Some(variable) => variable,
        None => return BoundExpression::Error,
    };

    if variable.is_read_only() {
        binder
            .diagnostics
            .report_cannot_assign(&assignment.equals.span, variable.name());
    }

    let expression = bind_conversion(binder, assignment.value.get_span(), expression, variable.ty(), false);

    BoundExpression::Assignment {
        variable,
        expression: Box::new(expression),
    }
}

fn bind_prefix_expr(binder: &mut Binder, prefix: &PrefixExpr) -> BoundExpression {
    let operand = bind_expr(binder, &prefix.operand, false);

    if operand.ty() == TypeSymbol::Error {
        return BoundExpression::Error;
    }

    match bind_unary_operator(prefix.operator.kind, operand.ty()) {
        Some(op) => BoundExpression::Unary {
            op,
            operand: Box::new(operand),
        },
        None => {
            binder.diagnostics.report_undefined_unary_operator(
                &prefix.operator.span,
                &prefix.operator.value,
                &operand.ty(),
            );
            BoundExpression::Error
        }
    }
}

fn bind_binary_expr(binder: &mut Binder, binary: &BinaryExpr) -> BoundExpression {
    let left = bind_expr(binder, &binary.left, false);
    let right = bind_expr(binder, &binary.right, false);

    if left.ty() == TypeSymbol::Error || right.ty() == TypeSymbol::Error {
        return BoundExpression::Error;
    }

    match bind_binary_operator(binary.operator.kind, left.ty(), right.ty()) {
        Some(op) => BoundExpression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        None => {
            binder.diagnostics.report_undefined_binary_operator(
                &binary.operator.span,
                &binary.operator.value,
                &left.ty(),
                &right.ty(),
            );
            BoundExpression::Error
        }
    }
}

fn bind_call_expr(binder: &mut Binder, call: &CallExpr) -> BoundExpression {
    // `int(x)`, `bool(x)` and `string(x)` are explicit conversions, not calls
    if call.arguments.len() == 1 {
        if let Some(ty) = TypeSymbol::lookup(&call.identifier.value) {
            let argument = &call.arguments[0];
            let bound = bind_expr(binder, argument, false);
            return bind_conversion(binder, argument.get_span(), bound, ty, true);
        }
    }

    let arguments: Vec<BoundExpression> = call
        .arguments
        .iter()
        .map(|argument| bind_expr(binder, argument, false))
        .collect();

    let function = match binder.scopes.lookup(&call.identifier.value) {
        Some(Symbol::Function(function)) => function,
        Some(_) => {
            binder
                .diagnostics
                .report_not_a_function(&call.identifier.span, &call.identifier.value);
            return BoundExpression::Error;
        }
        None => {
            binder
                .diagnostics
                .report_undefined_function(&call.identifier.span, &call.identifier.value);
            return BoundExpression::Error;
        }
    };

    let expected = function.parameters().len();
    if call.arguments.len() != expected {
        let span = if call.arguments.len() > expected {
            // From the separator after the last accepted argument to the end of the last one
            let first = if expected > 0 {
                &call.separators[expected - 1].span
            } else {
                call.arguments[0].get_span()
            };
            let last = call.arguments[call.arguments.len() - 1].get_span();
            Span::from_bounds(first, last)
        } else {
            call.close_paren.span.clone()
        };

        binder.diagnostics.report_wrong_argument_count(
            &span,
            function.name(),
            expected,
            call.arguments.len(),
        );
        return BoundExpression::Error;
    }

    let mut has_errors = false;
    let mut converted = Vec::with_capacity(arguments.len());

    for ((argument, syntax), parameter) in arguments
        .into_iter()
        .zip(&call.arguments)
        .zip(function.parameters())
    {
        match Conversion::classify(argument.ty(), parameter.ty()) {
            Conversion::Identity => converted.push(argument),
            _ => {
                if argument.ty() != TypeSymbol::Error {
                    binder.diagnostics.report_wrong_argument_type(
                        syntax.get_span(),
                        parameter.name(),
                        &parameter.ty(),
                        &argument.ty(),
                    );
                }
                has_errors = true;
            }
        }
    }

    if has_errors {
        return BoundExpression::Error;
    }

    BoundExpression::Call {
        function,
        arguments: converted,
    }
}

/// Converts `expression` to `ty`, reporting when no conversion exists or when an
/// explicit one is needed but not allowed.
fn bind_conversion(
    binder: &mut Binder,
    span: &Span,
    expression: BoundExpression,
    ty: TypeSymbol,
    allow_explicit: bool,
) -> BoundExpression {
    let from = expression.ty();
    let conversion = Conversion::classify(from, ty);

    if !conversion.exists() {
        if from != TypeSymbol::Error && ty != TypeSymbol::Error {
            binder.diagnostics.report_cannot_convert(span, &from, &ty);
        }
        return BoundExpression::Error;
    }

    if !allow_explicit && conversion.is_explicit() {
        binder
            .diagnostics
            .report_cannot_convert_implicitly(span, &from, &ty);
        return BoundExpression::Error;
    }

    if conversion.is_identity() {
        return expression;
    }

    BoundExpression::Conversion {
        ty,
        expression: Box::new(expression),
    }
}
