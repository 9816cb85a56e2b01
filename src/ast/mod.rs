/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the syntax tree produced by the parser
///
/// Submodules:
/// - ast: The compilation unit, members and the `Stmt`/`Expr` enums
/// - expressions: Definitions for the expression node kinds
/// - statements: Definitions for the statement node kinds and function declarations
/// - types: Type clauses as written in source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
