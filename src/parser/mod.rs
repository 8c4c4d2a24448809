//! Parser module for building the concrete parse tree.
//!
//! This module contains the parser that transforms a stream of tokens into
//! a tree of grammar-rule nodes, and the walker that replays that tree as
//! rule entry/exit events. It handles:
//!
//! - Declaration parsing (types, methods, concepts, variables)
//! - Statement parsing (expression statements, blocks, `if`)
//! - Expression and boolean-logic parsing, one rule per precedence level
//! - Type names with generic arguments
//!
//! The parser rejects invalid syntax before any event is delivered.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod tree;
pub mod types;
pub mod walker;
