//! Error types for expression parsing.

use thiserror::Error;

/// Errors that can occur while compiling an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unexpected token at a specific position.
    #[error("Unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    #[error("Invalid expression syntax: {message}")]
    InvalidSyntax { message: String },
}
