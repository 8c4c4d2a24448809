//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for simple tokens
//! - `POP_OPERAND!` - Pops a typed operand off the reducer stack

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a default lexer handler for simple single-token patterns.
///
/// Generates a handler function that creates a token with the given kind
/// and advances the lexer position by the token's length.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let span = lexer.span_of($value.len());
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            lexer.advance_n($value.len());
        }
    };
}

/// Pops the top operand and unwraps the expected variant.
///
/// Evaluates to `Result<T, Error>`: an empty stack or a different variant is
/// reported as a structural error against `$rule`.
///
/// # Example
///
/// ```ignore
/// let block = POP_OPERAND!(self, node, Operand::Block)?;
/// ```
#[macro_export]
macro_rules! POP_OPERAND {
    ($reducer:expr, $node:expr, Operand::$variant:ident) => {
        match $reducer.pop($node) {
            Ok(Operand::$variant(value)) => Ok(value),
            Ok(other) => Err($crate::reducer::reducer::unexpected_operand(
                $node,
                stringify!($variant),
                &other,
            )),
            Err(error) => Err(error),
        }
    };
}
