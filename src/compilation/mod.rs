//! Submissions and their evaluation.
//!
//! A `Compilation` ties syntax trees to the binder, lowerer and evaluator. Submissions
//! can be chained so a REPL keeps the functions and variables of earlier lines.

pub mod compilation;

pub use compilation::{Compilation, EvaluationResult};
