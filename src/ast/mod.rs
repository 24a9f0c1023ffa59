/// AST (Abstract Syntax Tree) module
/// Contains the untyped tree handed from the parser to semantic analysis
///
/// Submodules:
/// - ast: Classes, features and formals
/// - expressions: The expression variants
/// - types: Names of the built-in classes
pub mod ast;
pub mod expressions;
pub mod types;
