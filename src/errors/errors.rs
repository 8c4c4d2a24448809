use std::fmt::Display;

use thiserror::Error;

use crate::{parser::tree::Rule, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::SerializeError { .. } => "SerializeError",
            ErrorImpl::EmptyOperandStack { .. } => "EmptyOperandStack",
            ErrorImpl::UnexpectedOperand { .. } => "UnexpectedOperand",
            ErrorImpl::MissingChild { .. } => "MissingChild",
            ErrorImpl::UnbalancedStack { .. } => "UnbalancedStack",
        }
    }

    /// Structural errors come from the reducer, not from the input text.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::EmptyOperandStack { .. }
                | ErrorImpl::UnexpectedOperand { .. }
                | ErrorImpl::MissingChild { .. }
                | ErrorImpl::UnbalancedStack { .. }
        )
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Blocks, groups, calls and type arguments may nest at most {} levels deep",
                limit
            )),
            ErrorImpl::SerializeError { .. } => ErrorTip::None,
            ErrorImpl::EmptyOperandStack { rule } => ErrorTip::Suggestion(format!(
                "Operand stack was empty while reducing `{}`, the grammar and reducer disagree",
                rule
            )),
            ErrorImpl::UnexpectedOperand {
                rule,
                expected,
                found,
            } => ErrorTip::Suggestion(format!(
                "Reducing `{}` expected {} on the operand stack, found {}",
                rule, expected, found
            )),
            ErrorImpl::MissingChild { rule, child } => {
                ErrorTip::Suggestion(format!("`{}` has no `{}` child", rule, child))
            }
            ErrorImpl::UnbalancedStack { remaining } => ErrorTip::Suggestion(format!(
                "Walk finished with {} operands instead of a single program",
                remaining
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("failed to serialize program: {message}")]
    SerializeError { message: String },
    #[error("operand stack empty while reducing {rule}")]
    EmptyOperandStack { rule: Rule },
    #[error("unexpected operand while reducing {rule}: expected {expected}, found {found}")]
    UnexpectedOperand {
        rule: Rule,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{rule} is missing its {child}")]
    MissingChild { rule: Rule, child: &'static str },
    #[error("walk finished with {remaining} operands on the stack")]
    UnbalancedStack { remaining: usize },
}
