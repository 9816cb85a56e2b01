#![allow(clippy::module_inception)]

use std::sync::Arc;

pub mod ast;
pub mod binder;
pub mod cfg;
pub mod compilation;
pub mod diagnostics;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod lowering;
pub mod macros;
pub mod parser;
pub mod symbols;

extern crate regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Arc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Arc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Builds a span running from the start of `first` to the end of `last`.
    pub fn from_bounds(first: &Span, last: &Span) -> Self {
        Span {
            start: first.start.clone(),
            end: last.end.clone(),
        }
    }

    pub fn len(&self) -> u32 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Finds the line holding `position` inside `source`.
///
/// Returns the 1-based line number, the line text (without its line break) and the
/// offset of `position` inside that line, or `None` when the position is past the end.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            let text = line.trim_end_matches(['\n', '\r']).to_string();
            return Some((line_number, text, line_pos));
        }

        start = end;
        line_number += 1;
    }

    // End of input: point just past the final line
    let last = source.split_inclusive('\n').last().unwrap_or("");
    let text = last.trim_end_matches(['\n', '\r']).to_string();
    Some((line_number.saturating_sub(1).max(1), text.clone(), text.len()))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nsecond\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 30).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position("abc", 10).is_none());

        let (line_number, line, line_pos) = super::get_line_at_position("abc", 3).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "abc");
        assert_eq!(line_pos, 3);
    }
}
