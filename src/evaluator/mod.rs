//! Direct evaluation of lowered programs.
//!
//! This module runs a `BoundProgram` without any further compilation step. It handles:
//!
//! - Label-following execution of lowered statement lists
//! - Global variables in a caller-owned map, locals in a stack of frames
//! - Operators, conversions and user function calls
//! - The built-in `print`, `input` and `rnd` functions through a `Host`

pub mod builtins;
pub mod evaluator;
pub mod expr;
pub mod host;
pub mod stmt;

pub use evaluator::{EvaluationOptions, Evaluator};
pub use host::{BufferedHost, Host, StdHost};
