//! Result sinks.
//!
//! The stream evaluator hands each evaluation unit's matches to a
//! [`Printer`]. [`YamlPrinter`] encodes them as YAML onto any writer.

use crate::candidate::CandidateNode;
use crate::document::encoder::{encode, EncoderOptions};
use crate::document::node::YamlValue;
use crate::error::SinkError;
use std::io::Write;

/// Consumer of evaluation results, called once per evaluation unit.
///
/// An implementation should make a unit's output visible before returning,
/// since the next unit may not arrive for a while.
pub trait Printer {
    fn print_results(&mut self, matches: &[CandidateNode]) -> Result<(), SinkError>;
}

/// Output settings for [`YamlPrinter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterOptions {
    pub encoder: EncoderOptions,
    /// Print string results as raw text instead of YAML scalars
    pub unwrap_scalar: bool,
    /// Write `---` when a match comes from another document than the
    /// previous one
    pub print_document_separators: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            encoder: EncoderOptions::default(),
            unwrap_scalar: true,
            print_document_separators: true,
        }
    }
}

/// Writes matches as YAML, flushing the writer after each evaluation unit.
///
/// # Example
///
/// ```
/// use yamlsmith::candidate::CandidateNode;
/// use yamlsmith::document::parser::parse_documents;
/// use yamlsmith::printer::{Printer, PrinterOptions, YamlPrinter};
///
/// let root = parse_documents("a: 1\n").unwrap().remove(0);
/// let mut printer = YamlPrinter::new(Vec::new(), PrinterOptions::default());
/// printer.print_results(&[CandidateNode::new(root, 0, "-")]).unwrap();
/// assert_eq!(printer.into_inner(), b"a: 1\n");
/// ```
pub struct YamlPrinter<W: Write> {
    writer: W,
    options: PrinterOptions,
    /// Source of the last printed match
    previous: Option<(String, usize)>,
}

impl<W: Write> YamlPrinter<W> {
    pub fn new(writer: W, options: PrinterOptions) -> Self {
        Self {
            writer,
            options,
            previous: None,
        }
    }

    /// Flushes the writer. A failure is logged, not returned.
    pub fn finish(&mut self) {
        if let Err(err) = self.writer.flush() {
            tracing::error!(error = %err, "failed to flush output");
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, candidate: &CandidateNode) -> String {
        let node = candidate.node.borrow();
        if self.options.unwrap_scalar {
            if let YamlValue::String(text) = node.value() {
                let mut raw = text.clone();
                if !raw.ends_with('\n') {
                    raw.push('\n');
                }
                return raw;
            }
        }
        encode(&node, &self.options.encoder)
    }
}

impl<W: Write> Printer for YamlPrinter<W> {
    fn print_results(&mut self, matches: &[CandidateNode]) -> Result<(), SinkError> {
        for candidate in matches {
            let source = (candidate.filename.clone(), candidate.document);
            if self.options.print_document_separators
                && self.previous.as_ref().is_some_and(|previous| *previous != source)
            {
                self.writer.write_all(b"---\n")?;
            }
            self.previous = Some(source);

            let text = self.render(candidate);
            self.writer.write_all(text.as_bytes())?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
