//! Name resolution and type checking.
//!
//! The binder turns syntax trees into bound trees: every name is resolved to a symbol,
//! every expression gets a type, and problems are collected as diagnostics instead of
//! stopping the pass. Binding runs in two steps:
//!
//! - `bind_global_scope` declares all function signatures of a submission and binds its
//!   global statements
//! - `bind_program` binds and lowers every function body and checks that non-void
//!   functions return on all paths

pub mod binder;
pub mod bound_tree;
pub mod conversion;
pub mod operators;
pub mod printer;
pub mod scope;
