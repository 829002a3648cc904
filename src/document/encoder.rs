//! YAML encoding for node trees.
//!
//! Renders block YAML with a configurable indent. Scalar styles, flow
//! collections, tags, anchors, aliases and comments are written back the
//! way they were decoded; plain strings that would read back as another
//! type are double quoted.

use super::node::{NodeStyle, YamlNode, YamlValue};
use super::parser::resolve_plain;

/// Settings for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Spaces per nesting level, at least 2
    pub indent: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Renders a node as a YAML document body, newline terminated.
///
/// # Example
///
/// ```
/// use yamlsmith::document::encoder::{encode, EncoderOptions};
/// use yamlsmith::document::parser::parse_documents;
///
/// let root = parse_documents("a:\n  - 1\n  - two # note\nb: \"3\"\n").unwrap().remove(0);
/// let text = encode(&root.borrow(), &EncoderOptions::default());
/// assert_eq!(text, "a:\n  - 1\n  - two # note\nb: \"3\"\n");
/// ```
pub fn encode(node: &YamlNode, options: &EncoderOptions) -> String {
    let mut encoder = Encoder::new(options.indent.max(2));
    encoder.write_document(node);
    encoder.out
}

struct Encoder {
    out: String,
    indent: usize,
}

impl Encoder {
    fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            indent,
        }
    }

    fn write_document(&mut self, node: &YamlNode) {
        let attributes = node.attributes();
        self.write_comment_lines(attributes.head_comment.as_deref(), 0);

        if is_block_collection(node) {
            let props = properties(node);
            if !props.is_empty() {
                self.out.push_str(&props);
                self.out.push('\n');
            }
            self.write_block_body(node, 0);
        } else if let Some(text) = block_scalar_text(node) {
            let props = properties(node);
            if !props.is_empty() {
                self.out.push_str(&props);
                self.out.push(' ');
            }
            self.write_block_scalar(text, node.attributes().style, self.indent);
        } else {
            self.out.push_str(&inline_text(node, false));
            self.write_line_comment(node);
            self.out.push('\n');
        }

        self.write_comment_lines(attributes.foot_comment.as_deref(), 0);
    }

    fn write_block_body(&mut self, node: &YamlNode, level: usize) {
        match node.value() {
            YamlValue::Mapping(map) => {
                for (key, child) in map {
                    let child = child.borrow();
                    self.write_comment_lines(child.attributes().head_comment.as_deref(), level);
                    self.pad(level);
                    self.out.push_str(&key_text(key, false));
                    self.out.push(':');
                    self.write_nested(&child, level + self.indent);
                }
            }
            YamlValue::Sequence(items) => {
                for item in items {
                    let item = item.borrow();
                    self.write_comment_lines(item.attributes().head_comment.as_deref(), level);
                    self.write_sequence_item(&item, level);
                }
            }
            _ => {}
        }
    }

    /// Writes `-` and the item. Collections without properties start on
    /// the dash line.
    fn write_sequence_item(&mut self, item: &YamlNode, level: usize) {
        let child_level = level + self.indent;
        self.pad(level);
        self.out.push('-');

        let compact = is_block_collection(item)
            && properties(item).is_empty()
            && item.attributes().line_comment.is_none();
        if compact {
            let mut nested = Encoder::new(self.indent);
            nested.write_block_body(item, child_level);
            nested.write_comment_lines(item.attributes().foot_comment.as_deref(), child_level);
            self.out.push_str(&" ".repeat(self.indent - 1));
            self.out.push_str(nested.out.get(child_level..).unwrap_or(&nested.out));
        } else {
            self.out.push_str(&" ".repeat(self.indent - 2));
            self.write_nested(item, child_level);
        }
    }

    /// Writes the rest of a line after `key:` or `-`, plus any nested body
    /// at `child_level`.
    fn write_nested(&mut self, node: &YamlNode, child_level: usize) {
        let props = properties(node);
        if is_block_collection(node) {
            if !props.is_empty() {
                self.out.push(' ');
                self.out.push_str(&props);
            }
            self.write_line_comment(node);
            self.out.push('\n');
            self.write_block_body(node, child_level);
            self.write_comment_lines(node.attributes().foot_comment.as_deref(), child_level);
        } else if let Some(text) = block_scalar_text(node) {
            self.out.push(' ');
            if !props.is_empty() {
                self.out.push_str(&props);
                self.out.push(' ');
            }
            self.write_block_scalar_with_comment(node, text, child_level);
        } else {
            self.out.push(' ');
            self.out.push_str(&inline_text(node, false));
            self.write_line_comment(node);
            self.out.push('\n');
        }
    }

    fn write_block_scalar_with_comment(&mut self, node: &YamlNode, text: &str, level: usize) {
        let (header, body) = block_scalar_parts(text, node.attributes().style, self.indent);
        self.out.push_str(&header);
        self.write_line_comment(node);
        self.out.push('\n');
        self.write_block_lines(body, level);
    }

    fn write_block_scalar(&mut self, text: &str, style: NodeStyle, level: usize) {
        let (header, body) = block_scalar_parts(text, style, self.indent);
        self.out.push_str(&header);
        self.out.push('\n');
        self.write_block_lines(body, level);
    }

    fn write_block_lines(&mut self, body: &str, level: usize) {
        for line in body.split('\n') {
            if !line.is_empty() {
                self.pad(level);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    fn write_line_comment(&mut self, node: &YamlNode) {
        if let Some(comment) = node.attributes().line_comment.as_deref() {
            self.out.push(' ');
            self.out.push_str(comment);
        }
    }

    fn write_comment_lines(&mut self, comment: Option<&str>, level: usize) {
        for line in comment.into_iter().flat_map(str::lines) {
            self.pad(level);
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    fn pad(&mut self, level: usize) {
        self.out.extend(std::iter::repeat(' ').take(level));
    }
}

fn is_block_collection(node: &YamlNode) -> bool {
    let non_empty = match node.value() {
        YamlValue::Mapping(map) => !map.is_empty(),
        YamlValue::Sequence(items) => !items.is_empty(),
        _ => false,
    };
    non_empty && node.attributes().style != NodeStyle::Flow
}

/// Text of a string that should be written as a `|` or `>` block.
fn block_scalar_text(node: &YamlNode) -> Option<&str> {
    let block_style = matches!(
        node.attributes().style,
        NodeStyle::Literal | NodeStyle::Folded
    );
    match node.value() {
        YamlValue::String(text)
            if block_style
                && !text.trim().is_empty()
                && !text.chars().any(|c| c.is_control() && c != '\n' && c != '\t') =>
        {
            Some(text)
        }
        _ => None,
    }
}

/// Header (`|`, `>-`, `|+2`...) and body of a block scalar.
fn block_scalar_parts(text: &str, style: NodeStyle, indent: usize) -> (String, &str) {
    let content = text.strip_suffix('\n').unwrap_or(text);
    // folding would join the lines again
    let indicator = if style == NodeStyle::Folded && !content.contains('\n') {
        '>'
    } else {
        '|'
    };
    let chomping = if !text.ends_with('\n') {
        "-"
    } else if text.ends_with("\n\n") {
        "+"
    } else {
        ""
    };
    let mut header = indicator.to_string();
    if content.starts_with(' ') {
        header.push_str(&indent.to_string());
    }
    header.push_str(chomping);
    (header, content)
}

/// Anchor and tag, space separated.
fn properties(node: &YamlNode) -> String {
    let attributes = node.attributes();
    let mut props = Vec::new();
    if let Some(anchor) = attributes.anchor.as_deref() {
        props.push(format!("&{}", anchor));
    }
    if let Some(tag) = attributes.tag.as_deref() {
        props.push(tag.to_string());
    }
    props.join(" ")
}

/// Single-line rendering of a node, flow style for collections.
fn inline_text(node: &YamlNode, flow: bool) -> String {
    let body = match node.value() {
        YamlValue::Alias(alias) => return format!("*{}", alias.name()),
        YamlValue::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, child)| format!("{}: {}", key_text(key, true), inline_text(&child.borrow(), true)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        YamlValue::Sequence(items) => {
            let entries: Vec<String> = items
                .iter()
                .map(|item| inline_text(&item.borrow(), true))
                .collect();
            format!("[{}]", entries.join(", "))
        }
        YamlValue::String(text) => string_text(text, node.attributes().style, flow),
        YamlValue::Number(number) => number.to_string(),
        YamlValue::Boolean(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
    };
    let props = properties(node);
    if props.is_empty() {
        body
    } else {
        format!("{} {}", props, body)
    }
}

fn string_text(text: &str, style: NodeStyle, flow: bool) -> String {
    match style {
        NodeStyle::SingleQuoted if !text.chars().any(char::is_control) => {
            format!("'{}'", text.replace('\'', "''"))
        }
        NodeStyle::Default | NodeStyle::Flow if !plain_is_ambiguous(text, flow) => text.to_string(),
        _ => double_quote(text),
    }
}

fn key_text(key: &str, flow: bool) -> String {
    if key_needs_quotes(key, flow) {
        double_quote(key)
    } else {
        key.to_string()
    }
}

/// Whether a plain scalar would read back as something else.
fn plain_is_ambiguous(text: &str, flow: bool) -> bool {
    key_needs_quotes(text, flow) || !matches!(resolve_plain(text.to_string()), YamlValue::String(_))
}

fn key_needs_quotes(text: &str, flow: bool) -> bool {
    text.is_empty()
        || text != text.trim()
        || text.starts_with([
            '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
            '@', '`',
        ])
        || text.contains(": ")
        || text.contains(" #")
        || text.ends_with(':')
        || text.chars().any(char::is_control)
        || (flow && text.contains([',', '[', ']', '{', '}']))
}

fn double_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c.is_control() => quoted.push_str(&format!("\\x{:02X}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_documents;
    use rstest::rstest;

    fn round_trip(yaml: &str) -> String {
        let root = parse_documents(yaml).unwrap().remove(0);
        let text = encode(&root.borrow(), &EncoderOptions::default());
        text
    }

    #[rstest]
    #[case("a: 1\nb: text\n")]
    #[case("a:\n  b:\n    c: true\n")]
    #[case("list:\n  - 1\n  - 2\n")]
    #[case("- a: 1\n  b: 2\n- c: 3\n")]
    #[case("- - x\n  - y\n")]
    #[case("seq: [1, two]\nmap: {a: b}\n")]
    #[case("s: 'single'\nd: \"double\"\n")]
    #[case("tagged: !custom value\n")]
    #[case("base: &b\n  x: 1\nref: *b\n")]
    #[case("empty: []\nnone: {}\n")]
    #[case("text: |\n  line1\n  line2\n")]
    #[case("text: |-\n  no newline\nnext: 1\n")]
    #[case("# head\na: 1 # line\n# foot\n")]
    fn test_round_trip(#[case] yaml: &str) {
        assert_eq!(round_trip(yaml), yaml);
    }

    #[rstest]
    #[case("123", "\"123\"")]
    #[case("true", "\"true\"")]
    #[case("null", "\"null\"")]
    #[case("", "\"\"")]
    #[case("a: b", "\"a: b\"")]
    #[case("- item", "\"- item\"")]
    #[case("line\nbreak", "\"line\\nbreak\"")]
    #[case("plain words", "plain words")]
    fn test_plain_strings_are_quoted_when_ambiguous(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(string_text(text, NodeStyle::Default, false), expected);
    }

    #[test]
    fn test_indent_option() {
        let root = parse_documents("a:\n  b: 1\n  c:\n    - x\n").unwrap().remove(0);
        let text = encode(&root.borrow(), &EncoderOptions { indent: 4 });
        assert_eq!(text, "a:\n    b: 1\n    c:\n        -   x\n");
    }

    #[test]
    fn test_single_quote_escaping() {
        assert_eq!(string_text("it's", NodeStyle::SingleQuoted, false), "'it''s'");
    }

    #[test]
    fn test_root_scalar() {
        let root = parse_documents("hello\n").unwrap().remove(0);
        assert_eq!(encode(&root.borrow(), &EncoderOptions::default()), "hello\n");
    }
}
