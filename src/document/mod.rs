//! YAML documents: the node model, decoding and encoding.

pub mod encoder;
pub mod node;
pub mod parser;
mod scan;
