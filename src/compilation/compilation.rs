use std::{
    collections::{HashMap, HashSet},
    fmt::Write,
    sync::{Arc, OnceLock},
};

use tracing::debug;

use crate::{
    ast::ast::CompilationUnit,
    binder::{
        binder::{bind_global_scope, bind_program},
        bound_tree::{BoundGlobalScope, BoundProgram},
        printer::write_body,
    },
    cfg::control_flow_graph::ControlFlowGraph,
    diagnostics::Diagnostic,
    errors::errors::RuntimeError,
    evaluator::{EvaluationOptions, Evaluator, Host, StdHost},
    parser::SyntaxTree,
    symbols::{
        builtins,
        symbols::{FunctionSymbol, Symbol, VariableSymbol},
        types::TypeSymbol,
        value::Value,
    },
    Span,
};

/// Outcome of `Compilation::evaluate`. `value` is only set when there are no
/// diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub value: Option<Value>,
}

/// One submission: a set of syntax trees bound on top of the previous submission.
///
/// The bound global scope is computed on first use and shared by every later caller.
#[derive(Debug)]
pub struct Compilation {
    pub previous: Option<Arc<Compilation>>,
    pub syntax_trees: Vec<SyntaxTree>,
    global_scope: OnceLock<Arc<BoundGlobalScope>>,
}

impl Compilation {
    pub fn new(syntax_trees: Vec<SyntaxTree>) -> Self {
        Compilation {
            previous: None,
            syntax_trees,
            global_scope: OnceLock::new(),
        }
    }

    /// Starts a new submission that sees every symbol declared by `self` and its
    /// predecessors.
    pub fn continue_with(self: &Arc<Self>, syntax_tree: SyntaxTree) -> Compilation {
        Compilation {
            previous: Some(Arc::clone(self)),
            syntax_trees: vec![syntax_tree],
            global_scope: OnceLock::new(),
        }
    }

    pub fn global_scope(&self) -> Arc<BoundGlobalScope> {
        let scope = self.global_scope.get_or_init(|| {
            let previous = self.previous.as_ref().map(|previous| previous.global_scope());
            let units: Vec<&CompilationUnit> = self.syntax_trees.iter().map(|tree| &tree.root).collect();
            Arc::new(bind_global_scope(previous, &units))
        });
        Arc::clone(scope)
    }

    /// Functions declared by this submission.
    pub fn functions(&self) -> Vec<FunctionSymbol> {
        self.global_scope().functions.clone()
    }

    /// Variables declared at the top level of this submission.
    pub fn variables(&self) -> Vec<VariableSymbol> {
        self.global_scope().variables.clone()
    }

    /// Every symbol visible to a new submission, newest first. A name shadowed by a
    /// later submission is only reported once.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut seen = HashSet::new();
        let mut symbols = Vec::new();
        let mut push = |symbol: Symbol| {
            if seen.insert(symbol.name().to_string()) {
                symbols.push(symbol);
            }
        };

        let mut submission = Some(self);
        while let Some(compilation) = submission {
            let scope = compilation.global_scope();
            scope.functions.iter().cloned().for_each(|f| push(Symbol::Function(f)));
            scope.variables.iter().cloned().for_each(|v| push(Symbol::Variable(v)));
            submission = compilation.previous.as_deref();
        }

        builtins::all().into_iter().for_each(|f| push(Symbol::Function(f)));
        [TypeSymbol::Bool, TypeSymbol::Int, TypeSymbol::String]
            .into_iter()
            .for_each(|ty| push(Symbol::Type(ty)));

        symbols
    }

    /// The syntax tree, in this submission or an earlier one, whose text `span` points into.
    /// Diagnostics from rebinding earlier function bodies point into older submissions.
    pub fn syntax_tree_at(&self, span: &Span) -> Option<&SyntaxTree> {
        let mut submission = Some(self);
        while let Some(compilation) = submission {
            if let Some(tree) = compilation
                .syntax_trees
                .iter()
                .find(|tree| Arc::ptr_eq(&tree.file, &span.start.1))
            {
                return Some(tree);
            }
            submission = compilation.previous.as_deref();
        }
        None
    }

    fn program(&self) -> BoundProgram {
        bind_program(&self.global_scope())
    }

    /// Binds and runs the submission against the process console.
    pub fn evaluate(&self, globals: &mut HashMap<VariableSymbol, Value>) -> Result<EvaluationResult, RuntimeError> {
        self.evaluate_with(globals, &mut StdHost, EvaluationOptions::default())
    }

    /// Binds and runs the submission.
    ///
    /// Syntax and binding problems come back as diagnostics and nothing runs. A fault
    /// while running is returned as `Err`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate_with(
        &self,
        globals: &mut HashMap<VariableSymbol, Value>,
        host: &mut dyn Host,
        options: EvaluationOptions,
    ) -> Result<EvaluationResult, RuntimeError> {
        let global_scope = self.global_scope();

        let diagnostics: Vec<Diagnostic> = self
            .syntax_trees
            .iter()
            .flat_map(|tree| tree.diagnostics.iter().cloned())
            .chain(global_scope.diagnostics.iter().cloned())
            .collect();
        if !diagnostics.is_empty() {
            debug!(diagnostics = diagnostics.len(), "skipping evaluation");
            return Ok(EvaluationResult {
                diagnostics,
                value: None,
            });
        }

        let program = bind_program(&global_scope);
        if !program.diagnostics.is_empty() {
            debug!(diagnostics = program.diagnostics.len(), "skipping evaluation");
            return Ok(EvaluationResult {
                diagnostics: program.diagnostics,
                value: None,
            });
        }

        let mut evaluator = Evaluator::new(&program, globals, host, options);
        let value = evaluator.evaluate()?;

        Ok(EvaluationResult {
            diagnostics: vec![],
            value,
        })
    }

    /// Writes the lowered top-level statements, or the lowered functions of this
    /// submission when there are no top-level statements.
    pub fn emit_tree(&self, out: &mut impl Write) -> std::fmt::Result {
        let program = self.program();

        if !program.statement.is_empty() {
            return write_body(out, &program.statement, 0);
        }

        for function in &self.global_scope().functions {
            if let Some(body) = program.functions.get(function) {
                writeln!(out, "{function}")?;
                write_body(out, body, 1)?;
            }
        }

        Ok(())
    }

    /// Writes the signature and lowered body of one function.
    pub fn emit_function_tree(&self, function: &FunctionSymbol, out: &mut impl Write) -> std::fmt::Result {
        let program = self.program();

        writeln!(out, "{function}")?;
        match program.functions.get(function) {
            Some(body) => write_body(out, body, 1),
            None => Ok(()),
        }
    }

    /// Renders the control-flow graph of a function as Graphviz DOT. Returns `Ok(false)`
    /// when the submission chain has no function with that name.
    pub fn emit_control_flow_graph(&self, name: &str, out: &mut impl Write) -> Result<bool, std::fmt::Error> {
        let program = self.program();

        let function = self.symbols().into_iter().find_map(|symbol| match symbol {
            Symbol::Function(function) if function.name() == name => Some(function),
            _ => None,
        });
        let body = function.as_ref().and_then(|function| program.functions.get(function));

        match body {
            Some(body) => {
                ControlFlowGraph::create(body).write_dot(out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
