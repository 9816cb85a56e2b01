//! Lowering of bound trees.
//!
//! Turns `if`, `while`, `for` and nested blocks into a flat list of variable
//! declarations, expression statements, labels, jumps and returns. Lowering never
//! reports diagnostics.

pub mod lowerer;

#[cfg(test)]
mod tests;
