//! YAML node representation with presentation metadata.
//!
//! Every document decoded by yamlsmith is a tree of `YamlNode`s. Each node
//! separates its *content* (`YamlValue`: the scalar value or the structural
//! children) from its *attributes* (`NodeAttributes`: style, tag, anchor and
//! comments). Operators rely on that split: a full assignment replaces both,
//! an attribute assignment only the latter.
//!
//! Nodes are shared through `NodeRef` (`Rc<RefCell<YamlNode>>`), so a
//! mutation made through one handle is visible through every other handle to
//! the same subtree, including the owning document.
//!
//! # Example
//!
//! ```
//! use yamlsmith::document::node::{NodeStyle, YamlNode, YamlNumber, YamlValue};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), YamlNode::new(YamlValue::String("yamlsmith".to_string())).into_ref());
//! map.insert("version".to_string(), YamlNode::new(YamlValue::Number(YamlNumber::Integer(1))).into_ref());
//! let root = YamlNode::new(YamlValue::Mapping(map)).into_ref();
//!
//! // Mutate through a second handle and observe it through the first.
//! let name = root.borrow().get("name").unwrap();
//! name.borrow_mut().attributes_mut().style = NodeStyle::DoubleQuoted;
//! assert_eq!(
//!     root.borrow().get("name").unwrap().borrow().attributes().style,
//!     NodeStyle::DoubleQuoted
//! );
//! ```

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable handle to a node inside a document tree.
pub type NodeRef = Rc<RefCell<YamlNode>>;

/// How a node is rendered.
///
/// Scalar styles and the flow style for collections live in one enum, the
/// same way YAML libraries keep a single style field per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeStyle {
    /// Plain scalars, block collections
    #[default]
    Default,
    DoubleQuoted,
    SingleQuoted,
    /// `|` block scalar
    Literal,
    /// `>` block scalar
    Folded,
    /// `[a, b]` / `{a: b}` collections
    Flow,
}

/// Presentation metadata attached to a node.
///
/// Comments are stored with their `#` marker, one comment line per text
/// line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeAttributes {
    pub style: NodeStyle,
    /// Explicit tag as written in the source (`!custom`, `!!str`)
    pub tag: Option<String>,
    pub anchor: Option<String>,
    pub head_comment: Option<String>,
    pub line_comment: Option<String>,
    pub foot_comment: Option<String>,
}

/// Represents YAML numbers (integer or float)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YamlNumber {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for YamlNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YamlNumber::Integer(i) => write!(f, "{}", i),
            YamlNumber::Float(fl) if fl.is_nan() => write!(f, ".nan"),
            YamlNumber::Float(fl) if fl.is_infinite() && *fl > 0.0 => write!(f, ".inf"),
            YamlNumber::Float(fl) if fl.is_infinite() => write!(f, "-.inf"),
            YamlNumber::Float(fl) => {
                let text = fl.to_string();
                if text.contains(['.', 'e', 'E']) {
                    write!(f, "{}", text)
                } else {
                    // keep the float readable as a float
                    write!(f, "{}.0", text)
                }
            }
        }
    }
}

impl YamlNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            YamlNumber::Integer(i) => *i as f64,
            YamlNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, YamlNumber::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, YamlNumber::Float(_))
    }

    /// Adds two numbers, staying integral while both sides are integers and
    /// the sum fits.
    pub fn add(self, other: YamlNumber) -> YamlNumber {
        match (self, other) {
            (YamlNumber::Integer(a), YamlNumber::Integer(b)) => match a.checked_add(b) {
                Some(sum) => YamlNumber::Integer(sum),
                None => YamlNumber::Float(a as f64 + b as f64),
            },
            (a, b) => YamlNumber::Float(a.as_f64() + b.as_f64()),
        }
    }

    /// Numeric equality across integer and float representations.
    pub fn numeric_eq(&self, other: &YamlNumber) -> bool {
        match (self, other) {
            (YamlNumber::Integer(a), YamlNumber::Integer(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

/// A reference to an anchored node (`*name`).
#[derive(Clone)]
pub struct Alias {
    name: String,
    target: NodeRef,
}

impl Alias {
    pub fn new(name: impl Into<String>, target: NodeRef) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The anchored node this alias points at.
    pub fn target(&self) -> &NodeRef {
        &self.target
    }
}

// Aliases compare and print by name only: following the target could
// recurse through a self-referencing anchor.
impl PartialEq for Alias {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alias").field(&self.name).finish()
    }
}

/// The content of a YAML node.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    /// A YAML mapping; keys keep their document order
    Mapping(IndexMap<String, NodeRef>),
    /// A YAML sequence
    Sequence(Vec<NodeRef>),
    String(String),
    Number(YamlNumber),
    Boolean(bool),
    Null,
    Alias(Alias),
}

/// Coarse node kind, used for diagnostics and type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
    Alias,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
            NodeKind::Alias => "alias",
        };
        f.write_str(name)
    }
}

impl YamlValue {
    pub fn is_mapping(&self) -> bool {
        matches!(self, YamlValue::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, YamlValue::Sequence(_))
    }

    /// Returns true if this value is a container (mapping or sequence).
    pub fn is_container(&self) -> bool {
        matches!(self, YamlValue::Mapping(_) | YamlValue::Sequence(_))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            YamlValue::Mapping(_) => NodeKind::Mapping,
            YamlValue::Sequence(_) => NodeKind::Sequence,
            YamlValue::Alias(_) => NodeKind::Alias,
            _ => NodeKind::Scalar,
        }
    }

    /// Name of the value's type as shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            YamlValue::Mapping(_) => "mapping",
            YamlValue::Sequence(_) => "sequence",
            YamlValue::String(_) => "string",
            YamlValue::Number(_) => "number",
            YamlValue::Boolean(_) => "boolean",
            YamlValue::Null => "null",
            YamlValue::Alias(_) => "alias",
        }
    }

    /// Text of a scalar value, `None` for collections and aliases.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            YamlValue::String(s) => Some(s.clone()),
            YamlValue::Number(n) => Some(n.to_string()),
            YamlValue::Boolean(b) => Some(b.to_string()),
            YamlValue::Null => Some("null".to_string()),
            _ => None,
        }
    }
}

/// A YAML value wrapped with its presentation attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    pub(crate) value: YamlValue,
    pub(crate) attributes: NodeAttributes,
}

impl YamlNode {
    /// Creates a node with default attributes.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlsmith::document::node::{NodeStyle, YamlNode, YamlValue};
    ///
    /// let node = YamlNode::new(YamlValue::Boolean(true));
    /// assert_eq!(node.attributes().style, NodeStyle::Default);
    /// assert!(node.attributes().tag.is_none());
    /// ```
    pub fn new(value: YamlValue) -> Self {
        Self {
            value,
            attributes: NodeAttributes::default(),
        }
    }

    pub fn with_attributes(value: YamlValue, attributes: NodeAttributes) -> Self {
        Self { value, attributes }
    }

    /// Moves the node behind a shared handle.
    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    pub fn value(&self) -> &YamlValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut YamlValue {
        &mut self.value
    }

    pub fn set_value(&mut self, value: YamlValue) {
        self.value = value;
    }

    pub fn attributes(&self) -> &NodeAttributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut NodeAttributes {
        &mut self.attributes
    }

    /// Returns the anchor name if this node has one.
    pub fn anchor(&self) -> Option<&str> {
        self.attributes.anchor.as_deref()
    }

    pub fn kind(&self) -> NodeKind {
        self.value.kind()
    }

    /// Looks up a mapping entry by key. Returns `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<NodeRef> {
        match &self.value {
            YamlValue::Mapping(map) => map.get(key).cloned(),
            _ => None,
        }
    }

    /// Looks up a sequence item by position. Returns `None` for non-sequences.
    pub fn item(&self, index: usize) -> Option<NodeRef> {
        match &self.value {
            YamlValue::Sequence(items) => items.get(index).cloned(),
            _ => None,
        }
    }

    /// `false` and `null` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self.value, YamlValue::Boolean(false) | YamlValue::Null)
    }

    /// Produces a structurally independent copy of this node.
    ///
    /// Every child gets a fresh cell; alias targets stay shared because they
    /// point outside the copied subtree.
    pub fn deep_copy(&self) -> YamlNode {
        let value = match &self.value {
            YamlValue::Mapping(map) => YamlValue::Mapping(
                map.iter()
                    .map(|(key, child)| (key.clone(), child.borrow().deep_copy().into_ref()))
                    .collect(),
            ),
            YamlValue::Sequence(items) => YamlValue::Sequence(
                items
                    .iter()
                    .map(|child| child.borrow().deep_copy().into_ref())
                    .collect(),
            ),
            other => other.clone(),
        };
        YamlNode {
            value,
            attributes: self.attributes.clone(),
        }
    }

    /// Compares content only, ignoring attributes at every level.
    pub fn content_eq(&self, other: &YamlNode) -> bool {
        match (&self.value, &other.value) {
            (YamlValue::Mapping(a), YamlValue::Mapping(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, child)| {
                        b.get(key)
                            .is_some_and(|theirs| child.borrow().content_eq(&theirs.borrow()))
                    })
            }
            (YamlValue::Sequence(a), YamlValue::Sequence(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|(x, y)| x.borrow().content_eq(&y.borrow()))
            }
            (YamlValue::Number(a), YamlValue::Number(b)) => a.numeric_eq(b),
            (YamlValue::Alias(a), YamlValue::Alias(b)) => a.name() == b.name(),
            (YamlValue::Alias(a), _) => a.target().borrow().content_eq(other),
            (_, YamlValue::Alias(b)) => self.content_eq(&b.target().borrow()),
            (a, b) => a == b,
        }
    }
}

/// Resolves an alias handle to the node it points at; other handles are
/// returned unchanged.
pub fn resolve_alias(node: &NodeRef) -> NodeRef {
    let target = match node.borrow().value() {
        YamlValue::Alias(alias) => Some(alias.target().clone()),
        _ => None,
    };
    match target {
        Some(target) => resolve_alias(&target),
        None => node.clone(),
    }
}
