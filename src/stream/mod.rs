//! Stream evaluation: decode documents, evaluate an expression, print.
//!
//! All modes run the same loop over batches of candidates:
//!
//! - [`StreamEvaluator::evaluate_stream`]: one batch per document of a
//!   single input, printed before the next document is decoded.
//! - [`StreamEvaluator::evaluate_file_streams_sequence`]: the per-document
//!   loop for each file in turn; document indices restart per file.
//! - [`StreamEvaluator::evaluate_all_file_streams`]: every document of every
//!   file in one batch, evaluated once. Nothing is printed if any input
//!   fails to open or decode.
//!
//! # Example
//!
//! ```
//! use yamlsmith::expression::compile;
//! use yamlsmith::navigator::NavigationPrefs;
//! use yamlsmith::printer::{PrinterOptions, YamlPrinter};
//! use yamlsmith::stream::StreamEvaluator;
//!
//! let evaluator = StreamEvaluator::new(NavigationPrefs::default());
//! let mut printer = YamlPrinter::new(Vec::new(), PrinterOptions::default());
//! let expr = compile(".a = . + 1").unwrap();
//!
//! evaluator
//!     .evaluate_stream("-", "a: 1\n---\na: 2\n".as_bytes(), &expr, &mut printer)
//!     .unwrap();
//! assert_eq!(printer.into_inner(), b"a: 2\n---\na: 3\n");
//! ```

use crate::candidate::CandidateNode;
use crate::document::parser::{DocumentDecoder, YamlDecoder};
use crate::error::{Error, Result};
use crate::expression::{compile, ExpressionNode};
use crate::file::loader::{open_stream, InputStream};
use crate::navigator::{NavigationPrefs, TreeNavigator};
use crate::printer::Printer;
use std::io::Read;

/// Runs expressions over document streams.
#[derive(Debug, Clone)]
pub struct StreamEvaluator {
    navigator: TreeNavigator,
}

impl StreamEvaluator {
    pub fn new(prefs: NavigationPrefs) -> Self {
        Self {
            navigator: TreeNavigator::new(prefs),
        }
    }

    pub fn navigator(&self) -> &TreeNavigator {
        &self.navigator
    }

    /// Evaluates `expr` against each document read from `reader`, printing
    /// the matches of a document before the next one is decoded.
    ///
    /// A decode error stops the stream; documents before it stay printed.
    pub fn evaluate_stream<R, P>(
        &self,
        filename: &str,
        reader: R,
        expr: &ExpressionNode,
        printer: &mut P,
    ) -> Result<()>
    where
        R: Read,
        P: Printer + ?Sized,
    {
        self.evaluate_decoder(filename, YamlDecoder::from_reader(reader), expr, printer)
    }

    /// Same as [`evaluate_stream`](Self::evaluate_stream) over any document
    /// source.
    pub fn evaluate_decoder<D, P>(
        &self,
        filename: &str,
        decoder: D,
        expr: &ExpressionNode,
        printer: &mut P,
    ) -> Result<()>
    where
        D: DocumentDecoder,
        P: Printer + ?Sized,
    {
        self.drive(DocumentBatches::new(decoder, filename), expr, printer)
    }

    /// Compiles `expression` once, then streams each file in order.
    ///
    /// Each input is closed before the next one is opened.
    pub fn evaluate_file_streams_sequence<S, P>(
        &self,
        expression: &str,
        filenames: &[S],
        printer: &mut P,
    ) -> Result<()>
    where
        S: AsRef<str>,
        P: Printer + ?Sized,
    {
        let expr = compile(expression)?;
        for filename in filenames {
            let filename = filename.as_ref();
            let input = open_input(filename)?;
            tracing::debug!(input = %filename, "evaluating input stream");
            self.evaluate_stream(filename, input, &expr, printer)?;
        }
        Ok(())
    }

    /// Compiles `expression` once, reads every document of every file, then
    /// evaluates and prints once.
    pub fn evaluate_all_file_streams<S, P>(
        &self,
        expression: &str,
        filenames: &[S],
        printer: &mut P,
    ) -> Result<()>
    where
        S: AsRef<str>,
        P: Printer + ?Sized,
    {
        let expr = compile(expression)?;
        let mut documents = Vec::new();
        for filename in filenames {
            let filename = filename.as_ref();
            let input = open_input(filename)?;
            documents.extend(read_documents(filename, YamlDecoder::from_reader(input))?);
        }
        tracing::debug!(
            inputs = filenames.len(),
            documents = documents.len(),
            "evaluating combined documents"
        );
        self.drive(std::iter::once(Ok(documents)), &expr, printer)
    }

    /// Evaluates and prints each batch in order, stopping at the first error.
    fn drive<I, P>(&self, batches: I, expr: &ExpressionNode, printer: &mut P) -> Result<()>
    where
        I: IntoIterator<Item = Result<Vec<CandidateNode>>>,
        P: Printer + ?Sized,
    {
        for batch in batches {
            let batch = batch?;
            let matches = self.navigator.get_matching_nodes(&batch, expr)?;
            tracing::trace!(
                inputs = batch.len(),
                matches = matches.len(),
                "evaluated batch"
            );
            printer.print_results(&matches)?;
        }
        Ok(())
    }
}

fn open_input(filename: &str) -> Result<InputStream> {
    open_stream(filename).map_err(|source| Error::Open {
        filename: filename.to_string(),
        source,
    })
}

/// Decodes every document of one input, tagged with its index.
fn read_documents<D: DocumentDecoder>(filename: &str, decoder: D) -> Result<Vec<CandidateNode>> {
    let mut documents = Vec::new();
    for batch in DocumentBatches::new(decoder, filename) {
        documents.extend(batch?);
    }
    Ok(documents)
}

/// One single-candidate batch per decoded document.
struct DocumentBatches<'a, D> {
    decoder: D,
    filename: &'a str,
    index: usize,
    done: bool,
}

impl<'a, D: DocumentDecoder> DocumentBatches<'a, D> {
    fn new(decoder: D, filename: &'a str) -> Self {
        Self {
            decoder,
            filename,
            index: 0,
            done: false,
        }
    }
}

impl<D: DocumentDecoder> Iterator for DocumentBatches<'_, D> {
    type Item = Result<Vec<CandidateNode>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decoder.decode_next() {
            Ok(Some(node)) => {
                let candidate = CandidateNode::new(node, self.index, self.filename);
                self.index += 1;
                Some(Ok(vec![candidate]))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(source) => {
                self.done = true;
                Some(Err(Error::Decode {
                    filename: self.filename.to_string(),
                    source,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::{NodeRef, YamlNode, YamlValue};
    use crate::error::{DecodeError, SinkError};
    use std::collections::VecDeque;

    /// Records every batch it is given.
    #[derive(Default)]
    struct RecordingPrinter {
        calls: Vec<Vec<(String, usize)>>,
    }

    impl Printer for RecordingPrinter {
        fn print_results(&mut self, matches: &[CandidateNode]) -> std::result::Result<(), SinkError> {
            self.calls.push(
                matches
                    .iter()
                    .map(|m| (m.filename.clone(), m.document))
                    .collect(),
            );
            Ok(())
        }
    }

    struct ScriptedDecoder {
        steps: VecDeque<std::result::Result<Option<NodeRef>, DecodeError>>,
    }

    impl DocumentDecoder for ScriptedDecoder {
        fn decode_next(&mut self) -> std::result::Result<Option<NodeRef>, DecodeError> {
            self.steps.pop_front().unwrap_or(Ok(None))
        }
    }

    fn null_doc() -> std::result::Result<Option<NodeRef>, DecodeError> {
        Ok(Some(YamlNode::new(YamlValue::Null).into_ref()))
    }

    #[test]
    fn test_batches_are_single_documents_with_rising_index() {
        let evaluator = StreamEvaluator::new(NavigationPrefs::default());
        let mut printer = RecordingPrinter::default();
        let decoder = ScriptedDecoder {
            steps: VecDeque::from(vec![null_doc(), null_doc(), null_doc()]),
        };
        evaluator
            .evaluate_decoder("in.yaml", decoder, &compile(".").unwrap(), &mut printer)
            .unwrap();
        assert_eq!(
            printer.calls,
            vec![
                vec![("in.yaml".to_string(), 0)],
                vec![("in.yaml".to_string(), 1)],
                vec![("in.yaml".to_string(), 2)],
            ]
        );
    }

    #[test]
    fn test_decode_error_after_first_document() {
        let evaluator = StreamEvaluator::new(NavigationPrefs::default());
        let mut printer = RecordingPrinter::default();
        let decoder = ScriptedDecoder {
            steps: VecDeque::from(vec![
                null_doc(),
                Err(DecodeError::Unsupported("broken".to_string())),
                null_doc(),
            ]),
        };
        let err = evaluator
            .evaluate_decoder("in.yaml", decoder, &compile(".").unwrap(), &mut printer)
            .unwrap_err();
        assert!(matches!(err, Error::Decode { ref filename, .. } if filename == "in.yaml"));
        assert_eq!(printer.calls.len(), 1);
    }

    #[test]
    fn test_empty_stream_prints_nothing() {
        let evaluator = StreamEvaluator::new(NavigationPrefs::default());
        let mut printer = RecordingPrinter::default();
        evaluator
            .evaluate_stream("-", "".as_bytes(), &compile(".").unwrap(), &mut printer)
            .unwrap();
        assert!(printer.calls.is_empty());
    }

    #[test]
    fn test_compile_error_before_any_input() {
        let evaluator = StreamEvaluator::new(NavigationPrefs::default());
        let mut printer = RecordingPrinter::default();
        let err = evaluator
            .evaluate_file_streams_sequence(".a =", &["/nonexistent.yaml"], &mut printer)
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let evaluator = StreamEvaluator::new(NavigationPrefs::default());
        let mut printer = RecordingPrinter::default();
        let err = evaluator
            .evaluate_all_file_streams(".", &["/nonexistent.yaml"], &mut printer)
            .unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
        assert!(printer.calls.is_empty());
    }
}
