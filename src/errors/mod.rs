//! Error types for the front end and the runtime.
//!
//! This module defines:
//!
//! - `Error`, a positioned lexer/parser failure built from an `ErrorImpl` variant
//! - `RuntimeError`, the faults that abort evaluation (division by zero, failed
//!   string conversions, console I/O)
//!
//! Semantic problems found by the binder are not errors; they are collected as
//! diagnostics (see `crate::diagnostics`).

pub mod errors;

#[cfg(test)]
mod tests;
