//! Error types and error handling for the front end.
//!
//! This module defines the error types used from tokenization through AST
//! reduction. It includes:
//!
//! - Error structures with source position information
//! - Input errors raised by the lexer and parser
//! - Structural errors raised when the reducer and grammar disagree

pub mod errors;
