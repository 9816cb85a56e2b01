//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `CompilationUnit`. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Member parsing (function declarations and global statements)
//! - Statement parsing (variable declarations, blocks, control flow)
//! - Expression parsing (assignment, binary and prefix ops, calls, literals)
//! - Type clauses on parameters, variables and functions
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.
//! `SyntaxTree` wraps the whole pipeline from text and turns the first
//! syntax error into a diagnostic.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod syntax_tree;
pub mod types;

pub use syntax_tree::SyntaxTree;

#[cfg(test)]
mod tests;
