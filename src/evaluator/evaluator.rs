//! Main evaluator module.
//!
//! This module contains the Evaluator structure that runs a lowered program. It owns
//! the local frames and the random number generator, and borrows the program, the
//! global variable store and the console host from the caller.

use std::collections::HashMap;

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    binder::bound_tree::BoundProgram,
    errors::errors::RuntimeError,
    symbols::{
        symbols::{VariableKind, VariableSymbol},
        value::Value,
    },
};

use super::{host::Host, stmt::run_body};

/// Deepest chain of nested user function calls before `StackOverflow` is reported.
pub const MAX_CALL_DEPTH: usize = 256;

/// Settings for one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Seed for `rnd`. Without one the generator is seeded from the operating system.
    pub seed: Option<u64>,
}

/// The evaluator state for one run of a program.
pub struct Evaluator<'a> {
    /// The program being run
    pub program: &'a BoundProgram,
    /// Values of global variables; survives between REPL submissions
    pub globals: &'a mut HashMap<VariableSymbol, Value>,
    /// Local frames, innermost last. The first frame holds locals of top-level code.
    pub locals: Vec<HashMap<VariableSymbol, Value>>,
    /// Generator behind `rnd`, seeded once per evaluator
    pub rng: StdRng,
    /// Console used by `print` and `input`
    pub host: &'a mut dyn Host,
    /// Value of the most recent expression statement or variable declaration
    pub last_value: Option<Value>,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        program: &'a BoundProgram,
        globals: &'a mut HashMap<VariableSymbol, Value>,
        host: &'a mut dyn Host,
        options: EvaluationOptions,
    ) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Evaluator {
            program,
            globals,
            locals: vec![HashMap::new()],
            rng,
            host,
            last_value: None,
        }
    }

    /// Runs the top-level statements and returns the value of the last expression
    /// statement or variable declaration, if any.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(&mut self) -> Result<Option<Value>, RuntimeError> {
        let program = self.program;
        let result = run_body(self, &program.statement);

        if let Err(error) = &result {
            tracing::debug!(%error, "evaluation failed");
        }

        result
    }

    fn frame_mut(&mut self) -> &mut HashMap<VariableSymbol, Value> {
        if self.locals.is_empty() {
            self.locals.push(HashMap::new());
        }
        let last = self.locals.len() - 1;
        &mut self.locals[last]
    }

    /// Stores `value` in the global map or the current frame, depending on the
    /// variable's kind.
    pub fn assign(&mut self, variable: &VariableSymbol, value: Value) {
        match variable.kind() {
            VariableKind::Global => {
                self.globals.insert(variable.clone(), value);
            }
            VariableKind::Local | VariableKind::Parameter => {
                self.frame_mut().insert(variable.clone(), value);
            }
        }
    }

    pub fn lookup(&self, variable: &VariableSymbol) -> Result<Value, RuntimeError> {
        let value = match variable.kind() {
            VariableKind::Global => self.globals.get(variable),
            VariableKind::Local | VariableKind::Parameter => {
                self.locals.last().and_then(|frame| frame.get(variable))
            }
        };

        value.cloned().ok_or_else(|| RuntimeError::UnassignedVariable {
            variable: variable.name().to_string(),
        })
    }
}
