//! Symbols, types and runtime values.
//!
//! Symbols are immutable once created and compare by identity: two variables with the
//! same name declared in different scopes are different symbols.

pub mod builtins;
pub mod symbols;
pub mod types;
pub mod value;

pub use symbols::{FunctionSymbol, Symbol, SymbolKind, VariableKind, VariableSymbol};
pub use types::TypeSymbol;
pub use value::Value;
