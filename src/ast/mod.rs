/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root and the declaration/member/body-item sums
/// - declarations: Types, methods, parameters and variables
/// - statements: Statements, blocks and `if`
/// - expressions: Arithmetic chains, calls and boolean logic
/// - generics: Concepts, constraints and generic parameters
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod generics;
pub mod statements;
