//! Expression language: compiles query and update expressions into
//! operator trees.
//!
//! # Example
//!
//! ```
//! use yamlsmith::expression::{compile, Operation};
//!
//! let tree = compile(".a = .b").unwrap();
//! assert_eq!(tree.operation(), &Operation::Assign);
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{ExpressionNode, Literal, Operation, PathKey};
pub use error::ParseError;
pub use parser::Parser;

/// Compiles an expression string into an operator tree.
pub fn compile(text: &str) -> Result<ExpressionNode, ParseError> {
    Parser::parse(text)
}
