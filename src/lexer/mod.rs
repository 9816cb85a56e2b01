//! Lexical analysis.
//!
//! Converts source text into a token stream for the parser. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Keywords, identifiers, integer and string literals, operators
//! - Span and line tracking for diagnostics
//! - Comments and whitespace

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
