use std::sync::Arc;

use crate::{
    ast::ast::CompilationUnit,
    diagnostics::{Diagnostic, DiagnosticBag},
    lexer::lexer::tokenize,
    Position, Span,
};

use super::parser::parse;

/// A parsed source file together with the text it came from.
///
/// Parsing stops at the first syntax error; in that case the root is empty and the
/// error is the only diagnostic.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub file: Arc<String>,
    pub text: String,
    pub root: CompilationUnit,
    pub diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    #[tracing::instrument(level = "debug", skip(text))]
    pub fn parse(text: &str, file: Option<String>) -> SyntaxTree {
        let file = Arc::new(file.unwrap_or_else(|| String::from("shell")));
        let mut diagnostics = DiagnosticBag::new();

        let root = match tokenize(text, Some(file.to_string()))
            .and_then(|tokens| parse(tokens, Arc::clone(&file)))
        {
            Ok(root) => root,
            Err(error) => {
                tracing::debug!(error = %error, "syntax error");
                diagnostics.report_syntax_error(&error);
                CompilationUnit {
                    members: vec![],
                    span: Span {
                        start: Position(0, Arc::clone(&file)),
                        end: Position(0, Arc::clone(&file)),
                    },
                }
            }
        };

        SyntaxTree {
            file,
            text: text.to_string(),
            root,
            diagnostics: diagnostics.into_vec(),
        }
    }
}
