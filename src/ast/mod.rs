/// AST (Abstract Syntax Tree) module
/// Contains the syntax tree handed to the type checker by the parser
///
/// Submodules:
/// - ast: The `Stmt` and `Expr` sum types and their kind tags
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
/// - types: Type annotations as written in the source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
