//! Input streams for the stream evaluator.
//!
//! This module opens the named inputs documents are read from: standard
//! input for `-`, plain files, and gzip-compressed files.

pub mod loader;
