//! yamlsmith - query and update YAML document streams.
//!
//! An expression is compiled into an operator tree
//! ([`expression::compile`]), evaluated by a [`navigator::TreeNavigator`]
//! against candidate nodes that point into decoded documents, and the
//! matches are handed to a [`printer::Printer`]. [`stream::StreamEvaluator`]
//! ties these together for standard input and files.

pub mod candidate;
pub mod config;
pub mod document;
pub mod error;
pub mod expression;
pub mod file;
pub mod navigator;
pub mod printer;
pub mod stream;

pub use error::{Error, Result};
