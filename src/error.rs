//! Error taxonomy for decoding, evaluation and output.
//!
//! Each stage owns a typed error; [`Error`] joins them for the stream
//! evaluator, which reports failures for the smallest evaluation unit that
//! could not complete. Expression compile errors live in
//! [`crate::expression::ParseError`].

use crate::expression::ParseError;
use std::io;
use thiserror::Error;

/// Malformed or unreadable document content.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The YAML text is not well formed.
    #[error("{message} at line {line} column {column}")]
    Syntax {
        message: String,
        /// Line in the whole stream, starting at 1
        line: usize,
        column: usize,
    },

    /// Well formed YAML that the node model cannot represent.
    #[error("unsupported document structure: {0}")]
    Unsupported(String),

    /// The input could not be read or was not UTF-8.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Failure raised by an operator while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The operands have types the operation cannot combine.
    #[error("cannot {operation} {lhs} and {rhs}")]
    IncompatibleTypes {
        operation: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// The expression tree lacks an operand the operation needs.
    #[error("{operation} requires a {side} operand")]
    MissingOperand {
        operation: &'static str,
        side: &'static str,
    },

    /// An operator routine was dispatched for a node it does not handle.
    #[error("operator for {expected} received a {found} node")]
    UnexpectedOperation {
        expected: &'static str,
        found: &'static str,
    },
}

/// Failure reported by a result sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write results: {0}")]
    Write(#[from] io::Error),
}

/// Any failure of a stream evaluation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to decode '{filename}'")]
    Decode {
        filename: String,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to open '{filename}'")]
    Open {
        filename: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_eval_error_messages() {
        let err = EvalError::IncompatibleTypes {
            operation: "add",
            lhs: "mapping",
            rhs: "string",
        };
        assert_eq!(err.to_string(), "cannot add mapping and string");

        let err = EvalError::MissingOperand {
            operation: "assign",
            side: "right",
        };
        assert_eq!(err.to_string(), "assign requires a right operand");
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let err = Error::Decode {
            filename: "data.yaml".to_string(),
            source: DecodeError::Unsupported("complex key".to_string()),
        };
        assert_eq!(err.to_string(), "failed to decode 'data.yaml'");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("unsupported document structure: complex key")
        );
    }
}
