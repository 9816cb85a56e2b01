//! Diagnostics reported while parsing and binding.
//!
//! A diagnostic is a span plus a message. Diagnostics are collected in order into a
//! `DiagnosticBag`; evaluation only happens when a compilation produced none.

pub mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticBag};

#[cfg(test)]
mod tests;
