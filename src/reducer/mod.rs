//! Reduction of parse events into the AST.
//!
//! - operand: the typed entries of the reducer's operand stack
//! - reducer: the `ParseListener` that assembles nodes on that stack

pub mod operand;
pub mod reducer;

#[cfg(test)]
mod tests;
