//! YAML decoding with metadata preservation.
//!
//! `YamlDecoder` turns a YAML stream into one `NodeRef` tree per document.
//! It drives the yaml-rust2 event parser and keeps what a round trip needs:
//! scalar styles, tags, anchors, aliases and comments (the latter two with
//! help from [`SourceMap`]).
//!
//! # Example
//!
//! ```
//! use yamlsmith::document::parser::{DocumentDecoder, YamlDecoder};
//! use yamlsmith::document::node::YamlValue;
//!
//! let mut decoder = YamlDecoder::from_text("a: 1\n---\na: 2\n");
//! let first = decoder.decode_next().unwrap().unwrap();
//! assert!(first.borrow().value().is_mapping());
//! assert!(decoder.decode_next().unwrap().is_some());
//! assert!(decoder.decode_next().unwrap().is_none());
//! ```

use super::node::{Alias, NodeAttributes, NodeRef, NodeStyle, YamlNode, YamlNumber, YamlValue};
use super::scan::SourceMap;
use crate::error::DecodeError;
use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, BufReader, Read};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Source of decoded documents, one call per document.
pub trait DocumentDecoder {
    /// Returns the next document, `Ok(None)` once the input is exhausted.
    fn decode_next(&mut self) -> Result<Option<NodeRef>, DecodeError>;
}

/// Decodes a YAML stream into document trees, one document at a time.
///
/// Input is read line by line up to the next document marker (`---` or
/// `...` at column 0), so at most one document is buffered. Documents that
/// precede a syntax error are still handed out in order; the error is
/// reported by the call that would have returned the broken document.
pub struct YamlDecoder<R> {
    reader: BufReader<R>,
    /// Lines of the document being read
    pending: String,
    /// 0-based line number of the first pending line
    pending_start: usize,
    /// Whether the pending lines hold more than comments and directives
    pending_content: bool,
    lines_read: usize,
    documents: VecDeque<NodeRef>,
    failure: Option<DecodeError>,
    exhausted: bool,
}

impl<'a> YamlDecoder<&'a [u8]> {
    /// Decodes YAML text.
    pub fn from_text(text: &'a str) -> Self {
        Self::from_reader(text.as_bytes())
    }
}

impl<R: Read> YamlDecoder<R> {
    /// Decodes a UTF-8 stream. Read failures surface from `decode_next`.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pending: String::new(),
            pending_start: 0,
            pending_content: false,
            lines_read: 0,
            documents: VecDeque::new(),
            failure: None,
            exhausted: false,
        }
    }

    /// Reads lines until one document is complete, then parses it.
    fn read_document(&mut self) {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.exhausted = true;
                    self.flush();
                    return;
                }
                Ok(_) => {}
                Err(err) => {
                    self.exhausted = true;
                    self.failure = Some(DecodeError::Io(err));
                    return;
                }
            }
            let index = self.lines_read;
            self.lines_read += 1;

            match classify_line(&line) {
                LineKind::DocumentStart if self.pending_content => {
                    self.flush();
                    self.pending.push_str(&line);
                    self.pending_start = index;
                    self.pending_content = true;
                    return;
                }
                LineKind::DocumentEnd if self.pending_content => {
                    self.pending.push_str(&line);
                    self.flush();
                    self.pending_start = index + 1;
                    return;
                }
                LineKind::DocumentStart | LineKind::Content => {
                    self.pending.push_str(&line);
                    self.pending_content = true;
                }
                LineKind::DocumentEnd | LineKind::Other => self.pending.push_str(&line),
            }
        }
    }

    /// Parses the pending lines and queues their documents.
    fn flush(&mut self) {
        let text = std::mem::take(&mut self.pending);
        self.pending_content = false;
        if text.is_empty() {
            return;
        }
        let (documents, failure) = parse_text(&text, self.pending_start);
        self.documents.extend(documents);
        if failure.is_some() {
            self.failure = failure;
            self.exhausted = true;
        }
    }
}

impl<R: Read> DocumentDecoder for YamlDecoder<R> {
    fn decode_next(&mut self) -> Result<Option<NodeRef>, DecodeError> {
        loop {
            if let Some(document) = self.documents.pop_front() {
                return Ok(Some(document));
            }
            if let Some(err) = self.failure.take() {
                return Err(err);
            }
            if self.exhausted {
                return Ok(None);
            }
            self.read_document();
        }
    }
}

enum LineKind {
    DocumentStart,
    DocumentEnd,
    Content,
    /// Blank lines, comments and directives
    Other,
}

fn classify_line(line: &str) -> LineKind {
    let is_marker = |marker: &str| {
        line.strip_prefix(marker)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    };
    if is_marker("---") {
        return LineKind::DocumentStart;
    }
    if is_marker("...") {
        return LineKind::DocumentEnd;
    }
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') || line.starts_with('%') {
        LineKind::Other
    } else {
        LineKind::Content
    }
}

/// Parses a complete piece of YAML text. Syntax error lines are shifted by
/// `line_offset`, the number of stream lines before the text.
fn parse_text(text: &str, line_offset: usize) -> (VecDeque<NodeRef>, Option<DecodeError>) {
    let mut builder = TreeBuilder::new(SourceMap::new(text));
    let mut parser = Parser::new_from_str(text);
    let outcome = parser.load(&mut builder, true);

    let mut failure = builder.failure.take();
    if failure.is_none() {
        if let Err(err) = outcome {
            let marker = err.marker();
            failure = Some(DecodeError::Syntax {
                message: err.info().to_string(),
                line: marker.line() + line_offset,
                column: marker.col(),
            });
        }
    }
    (builder.documents, failure)
}

/// Parses every document of a YAML text.
///
/// # Example
///
/// ```
/// use yamlsmith::document::parser::parse_documents;
///
/// let docs = parse_documents("- a\n- b\n").unwrap();
/// assert_eq!(docs.len(), 1);
/// assert!(parse_documents("key: [unclosed\n").is_err());
/// ```
pub fn parse_documents(text: &str) -> Result<Vec<NodeRef>, DecodeError> {
    let mut decoder = YamlDecoder::from_text(text);
    let mut documents = Vec::new();
    while let Some(document) = decoder.decode_next()? {
        documents.push(document);
    }
    Ok(documents)
}

/// A collection under construction.
struct Frame {
    node: NodeRef,
    pending_key: Option<String>,
    pending_head: Option<String>,
    pending_line: Option<String>,
}

impl Frame {
    fn new(node: NodeRef) -> Self {
        Self {
            node,
            pending_key: None,
            pending_head: None,
            pending_line: None,
        }
    }

    fn expects_key(&self) -> bool {
        self.node.borrow().value().is_mapping() && self.pending_key.is_none()
    }
}

/// Event receiver assembling documents.
struct TreeBuilder {
    source: SourceMap,
    stack: Vec<Frame>,
    anchors: HashMap<usize, (String, NodeRef)>,
    root: Option<NodeRef>,
    last_line: usize,
    documents: VecDeque<NodeRef>,
    failure: Option<DecodeError>,
}

impl TreeBuilder {
    fn new(source: SourceMap) -> Self {
        Self {
            source,
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
            last_line: 0,
            documents: VecDeque::new(),
            failure: None,
        }
    }

    fn fail(&mut self, err: DecodeError) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    fn on_scalar(
        &mut self,
        text: String,
        style: TScalarStyle,
        anchor_id: usize,
        tag: Option<Tag>,
        line: usize,
    ) {
        let block = matches!(style, TScalarStyle::Literal | TScalarStyle::Folded);
        if block {
            let body_lines = text.lines().count().max(1);
            self.source.mask_lines(line + 1, line + body_lines);
        }

        if self.stack.last().is_some_and(Frame::expects_key) {
            let key = YamlNode::new(YamlValue::String(text.clone())).into_ref();
            self.register_anchor(anchor_id, &key);
            let head = self.source.claim_head_comment(line);
            let trailing = self.source.claim_line_comment(line);
            if let Some(frame) = self.stack.last_mut() {
                frame.pending_key = Some(text);
                frame.pending_head = head;
                frame.pending_line = trailing;
            }
            self.last_line = self.last_line.max(line);
            return;
        }

        let tag = tag.map(|t| render_tag(&t));
        let attributes = NodeAttributes {
            style: scalar_style(style),
            tag: tag.clone(),
            ..NodeAttributes::default()
        };
        let value = resolve_scalar(text, style, tag.as_deref());
        let node = YamlNode::with_attributes(value, attributes).into_ref();
        self.insert(node, anchor_id, line, false);
    }

    fn on_collection_start(
        &mut self,
        value: YamlValue,
        anchor_id: usize,
        tag: Option<Tag>,
        mark: &Marker,
    ) {
        if self.stack.last().is_some_and(Frame::expects_key) {
            self.fail(DecodeError::Unsupported(
                "collections as mapping keys".to_string(),
            ));
            return;
        }

        let line = self.source.line_of(mark.index());
        let flow = matches!(self.source.char_at(mark.index()), Some('[') | Some('{'));
        let attributes = NodeAttributes {
            style: if flow {
                NodeStyle::Flow
            } else {
                NodeStyle::Default
            },
            tag: tag.map(|t| render_tag(&t)),
            ..NodeAttributes::default()
        };
        let node = YamlNode::with_attributes(value, attributes).into_ref();
        self.insert(node.clone(), anchor_id, line, !flow);
        self.stack.push(Frame::new(node));
    }

    fn on_alias(&mut self, anchor_id: usize, line: usize) {
        let Some((name, target)) = self.anchors.get(&anchor_id).cloned() else {
            self.fail(DecodeError::Unsupported(format!(
                "alias to unknown anchor id {}",
                anchor_id
            )));
            return;
        };

        if self.stack.last().is_some_and(Frame::expects_key) {
            let key = target.borrow().value().scalar_text();
            match key {
                Some(key) => {
                    let head = self.source.claim_head_comment(line);
                    let trailing = self.source.claim_line_comment(line);
                    if let Some(frame) = self.stack.last_mut() {
                        frame.pending_key = Some(key);
                        frame.pending_head = head;
                        frame.pending_line = trailing;
                    }
                }
                None => self.fail(DecodeError::Unsupported(
                    "collections as mapping keys".to_string(),
                )),
            }
            return;
        }

        let node = YamlNode::new(YamlValue::Alias(Alias::new(name, target))).into_ref();
        self.insert(node, 0, line, false);
    }

    fn register_anchor(&mut self, anchor_id: usize, node: &NodeRef) {
        if anchor_id == 0 {
            return;
        }
        let name = self
            .source
            .next_anchor()
            .unwrap_or_else(|| format!("anchor{}", anchor_id));
        node.borrow_mut().attributes_mut().anchor = Some(name.clone());
        self.anchors.insert(anchor_id, (name, node.clone()));
    }

    /// Attaches comments to a new node and places it under its parent.
    fn insert(&mut self, node: NodeRef, anchor_id: usize, line: usize, block_collection: bool) {
        self.register_anchor(anchor_id, &node);

        let (head, trailing) = match self.stack.last_mut() {
            Some(frame) if frame.pending_key.is_some() => {
                let trailing = frame.pending_line.take();
                (frame.pending_head.take(), trailing)
            }
            _ => (self.source.claim_head_comment(line), None),
        };
        let trailing = match trailing {
            Some(comment) => Some(comment),
            None if !block_collection => self.source.claim_line_comment(line),
            None => None,
        };
        {
            let mut target = node.borrow_mut();
            let attributes = target.attributes_mut();
            attributes.head_comment = head;
            attributes.line_comment = trailing;
        }

        match self.stack.last_mut() {
            None => self.root = Some(node),
            Some(frame) => {
                let key = frame.pending_key.take();
                let mut parent = frame.node.borrow_mut();
                match (parent.value_mut(), key) {
                    (YamlValue::Mapping(map), Some(key)) => {
                        map.insert(key, node);
                    }
                    (YamlValue::Sequence(items), _) => items.push(node),
                    _ => {}
                }
            }
        }
        self.last_line = self.last_line.max(line);
    }

    fn end_document(&mut self, mark: &Marker) {
        self.stack.clear();
        if let Some(root) = self.root.take() {
            let end_line = self.source.line_of(mark.index());
            let foot = self
                .source
                .claim_comments_between(self.last_line + 1, end_line + 1);
            if foot.is_some() {
                root.borrow_mut().attributes_mut().foot_comment = foot;
            }
            self.documents.push_back(root);
        }
        self.last_line = 0;
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event, mark: Marker) {
        if self.failure.is_some() {
            return;
        }
        match event {
            Event::Scalar(text, style, anchor_id, tag) => {
                let line = self.source.line_of(mark.index());
                self.on_scalar(text, style, anchor_id, tag, line);
            }
            Event::SequenceStart(anchor_id, tag) => {
                self.on_collection_start(YamlValue::Sequence(Vec::new()), anchor_id, tag, &mark);
            }
            Event::MappingStart(anchor_id, tag) => {
                self.on_collection_start(
                    YamlValue::Mapping(IndexMap::new()),
                    anchor_id,
                    tag,
                    &mark,
                );
            }
            Event::SequenceEnd | Event::MappingEnd => {
                self.stack.pop();
            }
            Event::Alias(anchor_id) => {
                let line = self.source.line_of(mark.index());
                self.on_alias(anchor_id, line);
            }
            Event::DocumentEnd => self.end_document(&mark),
            _ => {}
        }
    }
}

fn scalar_style(style: TScalarStyle) -> NodeStyle {
    match style {
        TScalarStyle::DoubleQuoted => NodeStyle::DoubleQuoted,
        TScalarStyle::SingleQuoted => NodeStyle::SingleQuoted,
        TScalarStyle::Literal => NodeStyle::Literal,
        TScalarStyle::Folded => NodeStyle::Folded,
        _ => NodeStyle::Default,
    }
}

/// Renders a parser tag the way it is written in YAML source.
fn render_tag(tag: &Tag) -> String {
    match tag.handle.as_str() {
        "tag:yaml.org,2002:" | "!!" => format!("!!{}", tag.suffix),
        "" => format!("!<{}>", tag.suffix),
        handle => format!("{}{}", handle, tag.suffix),
    }
}

/// Types a scalar: core-schema tags first, then plain scalar resolution.
/// Quoted and block scalars are strings.
fn resolve_scalar(text: String, style: TScalarStyle, tag: Option<&str>) -> YamlValue {
    match tag {
        Some("!!str") => return YamlValue::String(text),
        Some("!!null") => return YamlValue::Null,
        Some("!!bool") => match text.to_ascii_lowercase().as_str() {
            "true" => return YamlValue::Boolean(true),
            "false" => return YamlValue::Boolean(false),
            _ => {}
        },
        Some("!!int") => {
            if let Some(i) = parse_integer(&text) {
                return YamlValue::Number(YamlNumber::Integer(i));
            }
        }
        Some("!!float") => {
            if let Some(f) = parse_float(&text).or_else(|| parse_integer(&text).map(|i| i as f64)) {
                return YamlValue::Number(YamlNumber::Float(f));
            }
        }
        _ => {}
    }
    match style {
        TScalarStyle::Plain => resolve_plain(text),
        _ => YamlValue::String(text),
    }
}

/// Resolves an untagged plain scalar with YAML 1.2 core schema rules.
///
/// # Example
///
/// ```
/// use yamlsmith::document::parser::resolve_plain;
/// use yamlsmith::document::node::{YamlNumber, YamlValue};
///
/// assert_eq!(resolve_plain("~".to_string()), YamlValue::Null);
/// assert_eq!(resolve_plain("0x1F".to_string()), YamlValue::Number(YamlNumber::Integer(31)));
/// assert_eq!(resolve_plain("yes".to_string()), YamlValue::String("yes".to_string()));
/// ```
pub fn resolve_plain(text: String) -> YamlValue {
    match text.as_str() {
        "" | "~" | "null" | "Null" | "NULL" => return YamlValue::Null,
        "true" | "True" | "TRUE" => return YamlValue::Boolean(true),
        "false" | "False" | "FALSE" => return YamlValue::Boolean(false),
        _ => {}
    }
    if let Some(i) = parse_integer(&text) {
        return YamlValue::Number(YamlNumber::Integer(i));
    }
    if let Some(f) = parse_float(&text) {
        return YamlValue::Number(YamlNumber::Float(f));
    }
    YamlValue::String(text)
}

fn parse_integer(text: &str) -> Option<i64> {
    if let Some(hex) = text.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(octal) = text.strip_prefix("0o") {
        return i64::from_str_radix(octal, 8).ok();
    }
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_float(text: &str) -> Option<f64> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => return Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => return Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return Some(f64::NAN),
        _ => {}
    }
    let looks_numeric = text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if looks_numeric {
        text.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(text: &str) -> NodeRef {
        let mut docs = parse_documents(text).unwrap();
        assert_eq!(docs.len(), 1, "expected a single document");
        docs.remove(0)
    }

    #[test]
    fn test_parse_scalar_types() {
        let root = single("s: hello\ni: 42\nf: 1.5\nb: true\nn: null\nq: \"42\"\n");
        let root = root.borrow();

        let get = |key: &str| root.get(key).unwrap().borrow().value().clone();
        assert_eq!(get("s"), YamlValue::String("hello".to_string()));
        assert_eq!(get("i"), YamlValue::Number(YamlNumber::Integer(42)));
        assert_eq!(get("f"), YamlValue::Number(YamlNumber::Float(1.5)));
        assert_eq!(get("b"), YamlValue::Boolean(true));
        assert_eq!(get("n"), YamlValue::Null);
        assert_eq!(get("q"), YamlValue::String("42".to_string()));
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let root = single("zeta: 1\nalpha: 2\nmid: 3\n");
        match root.borrow().value() {
            YamlValue::Mapping(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
            }
            _ => panic!("Expected mapping"),
        };
    }

    #[test]
    fn test_parse_scalar_styles() {
        let root = single("a: \"dq\"\nb: 'sq'\nc: |\n  line1\n  line2\nd: plain\n");
        let root = root.borrow();
        let style = |key: &str| root.get(key).unwrap().borrow().attributes().style;
        assert_eq!(style("a"), NodeStyle::DoubleQuoted);
        assert_eq!(style("b"), NodeStyle::SingleQuoted);
        assert_eq!(style("c"), NodeStyle::Literal);
        assert_eq!(style("d"), NodeStyle::Default);
        assert_eq!(
            root.get("c").unwrap().borrow().value(),
            &YamlValue::String("line1\nline2\n".to_string())
        );
    }

    #[test]
    fn test_parse_flow_collections() {
        let root = single("seq: [1, 2]\nmap: {a: b}\nblock:\n  - x\n");
        let root = root.borrow();
        let style = |key: &str| root.get(key).unwrap().borrow().attributes().style;
        assert_eq!(style("seq"), NodeStyle::Flow);
        assert_eq!(style("map"), NodeStyle::Flow);
        assert_eq!(style("block"), NodeStyle::Default);
    }

    #[test]
    fn test_parse_custom_tag() {
        let root = single("a: !custom value\n");
        let a = root.borrow().get("a").unwrap();
        assert_eq!(a.borrow().attributes().tag.as_deref(), Some("!custom"));
        assert_eq!(a.borrow().value(), &YamlValue::String("value".to_string()));
    }

    #[test]
    fn test_parse_anchor_and_alias() {
        let root = single("base: &b\n  x: 1\nother: *b\n");
        let root = root.borrow();
        let base = root.get("base").unwrap();
        assert_eq!(base.borrow().anchor(), Some("b"));

        let other = root.get("other").unwrap();
        match other.borrow().value() {
            YamlValue::Alias(alias) => {
                assert_eq!(alias.name(), "b");
                assert!(std::rc::Rc::ptr_eq(alias.target(), &base));
            }
            _ => panic!("Expected alias"),
        };
    }

    #[test]
    fn test_parse_line_and_head_comments() {
        let root = single("# about a\na: 1 # one\nb: 2\n");
        let root = root.borrow();
        let a = root.get("a").unwrap();
        let a = a.borrow();
        assert_eq!(a.attributes().line_comment.as_deref(), Some("# one"));
        // the document's first comment belongs to the root
        assert_eq!(root.attributes().head_comment.as_deref(), Some("# about a"));
    }

    #[test]
    fn test_parse_multiple_documents() {
        let docs = parse_documents("a: 1\n---\na: 2\n---\na: 3\n").unwrap();
        assert_eq!(docs.len(), 3);
        let third = docs[2].borrow().get("a").unwrap();
        assert_eq!(
            third.borrow().value(),
            &YamlValue::Number(YamlNumber::Integer(3))
        );
    }

    #[test]
    fn test_empty_input_has_no_documents() {
        assert!(parse_documents("").unwrap().is_empty());
    }

    #[test]
    fn test_documents_before_error_are_yielded() {
        let mut decoder = YamlDecoder::from_text("a: 1\n---\nb: [1, 2\n");
        assert!(decoder.decode_next().unwrap().is_some());
        assert!(matches!(
            decoder.decode_next(),
            Err(DecodeError::Syntax { .. })
        ));
        assert!(decoder.decode_next().unwrap().is_none());
    }

    /// Serves one chunk per `read` call and counts the calls.
    struct ChunkedReader {
        chunks: VecDeque<&'static [u8]>,
        reads: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl Read for ChunkedReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let Some(chunk) = self.chunks.pop_front() else {
                return Ok(0);
            };
            self.reads.set(self.reads.get() + 1);
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_decoder_reads_one_document_at_a_time() {
        let reads = std::rc::Rc::new(std::cell::Cell::new(0));
        let reader = ChunkedReader {
            chunks: VecDeque::from(vec![
                &b"a: 1\n---\n"[..],
                &b"a: 2\n---\n"[..],
                &b"a: 3\n"[..],
            ]),
            reads: reads.clone(),
        };
        let mut decoder = YamlDecoder::from_reader(reader);

        assert!(decoder.decode_next().unwrap().is_some());
        assert_eq!(reads.get(), 1);
        assert!(decoder.decode_next().unwrap().is_some());
        assert_eq!(reads.get(), 2);
        assert!(decoder.decode_next().unwrap().is_some());
        assert!(decoder.decode_next().unwrap().is_none());
        assert_eq!(reads.get(), 3);
    }

    #[test]
    fn test_syntax_error_line_counts_earlier_documents() {
        let mut decoder = YamlDecoder::from_text("a: 1\nb: 2\n---\nc: [1, 2\n");
        assert!(decoder.decode_next().unwrap().is_some());
        match decoder.decode_next() {
            Err(DecodeError::Syntax { line, .. }) => assert!(line >= 4, "line {}", line),
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_marker_lookalikes_stay_in_document() {
        let root = single("a: |\n  ---\n  ...\nb: '--- x'\n");
        let root = root.borrow();
        assert_eq!(
            root.get("a").unwrap().borrow().value(),
            &YamlValue::String("---\n...\n".to_string())
        );
        assert_eq!(
            root.get("b").unwrap().borrow().value(),
            &YamlValue::String("--- x".to_string())
        );
    }

    #[test]
    fn test_explicit_end_and_empty_documents() {
        let docs = parse_documents("a: 1\n...\n---\n---\nb: 2\n").unwrap();
        assert_eq!(docs.len(), 3);
        assert!(docs[0].borrow().value().is_mapping());
        assert_eq!(docs[1].borrow().value(), &YamlValue::Null);
        assert!(docs[2].borrow().value().is_mapping());
    }

    #[test]
    fn test_resolve_plain_numbers() {
        assert_eq!(
            resolve_plain("-7".to_string()),
            YamlValue::Number(YamlNumber::Integer(-7))
        );
        assert_eq!(
            resolve_plain("1e3".to_string()),
            YamlValue::Number(YamlNumber::Float(1000.0))
        );
        assert_eq!(
            resolve_plain("inf".to_string()),
            YamlValue::String("inf".to_string())
        );
        assert_eq!(
            resolve_plain("1.2.3".to_string()),
            YamlValue::String("1.2.3".to_string())
        );
    }
}
