//! Candidate nodes: located references into decoded documents.

use crate::document::node::{resolve_alias, NodeRef, YamlValue};
use std::fmt;
use std::rc::Rc;

/// One step of a candidate's location below its document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElement {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(key) => write!(f, ".{}", key),
            PathElement::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// A handle to a node in a document tree plus where it came from.
///
/// The handle is shared, never a copy: updating a candidate updates the
/// document it was found in. Candidates derived by operators keep the
/// document index and source name of the candidate they were computed from.
#[derive(Debug, Clone)]
pub struct CandidateNode {
    pub node: NodeRef,
    /// Position of the document in its input, from 0
    pub document: usize,
    /// Input the document was read from, `"-"` for standard input
    pub filename: String,
    pub path: Vec<PathElement>,
}

impl CandidateNode {
    /// Wraps the root of a decoded document.
    pub fn new(node: NodeRef, document: usize, filename: impl Into<String>) -> Self {
        Self {
            node,
            document,
            filename: filename.into(),
            path: Vec::new(),
        }
    }

    /// A candidate for a child of this node, one path step further down.
    pub fn child(&self, node: NodeRef, element: PathElement) -> Self {
        let mut path = self.path.clone();
        path.push(element);
        Self {
            node,
            document: self.document,
            filename: self.filename.clone(),
            path,
        }
    }

    /// A candidate for a computed node with the same provenance as this one.
    pub fn derive(&self, node: NodeRef) -> Self {
        Self {
            node,
            document: self.document,
            filename: self.filename.clone(),
            path: self.path.clone(),
        }
    }

    /// Renders the path from the document root, `.` for the root itself.
    ///
    /// ```
    /// use yamlsmith::candidate::{CandidateNode, PathElement};
    /// use yamlsmith::document::node::{YamlNode, YamlValue};
    ///
    /// let root = CandidateNode::new(YamlNode::new(YamlValue::Null).into_ref(), 0, "-");
    /// assert_eq!(root.path_string(), ".");
    /// let child = root
    ///     .child(root.node.clone(), PathElement::Key("items".to_string()))
    ///     .child(root.node.clone(), PathElement::Index(2));
    /// assert_eq!(child.path_string(), ".items[2]");
    /// ```
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            return ".".to_string();
        }
        self.path.iter().map(ToString::to_string).collect()
    }

    /// Whether both candidates reference the same node.
    pub fn is_same_node(&self, other: &CandidateNode) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    /// Replaces this node's content and attributes with a copy of `source`.
    ///
    /// The source is copied before this node is written, so a source inside
    /// this node's subtree (or containing it) is read in its original state.
    pub fn update_from(&self, source: &CandidateNode) {
        if self.is_same_node(source) {
            return;
        }
        let copy = source.node.borrow().deep_copy();
        if let YamlValue::Alias(alias) = copy.value() {
            if Rc::ptr_eq(&resolve_alias(alias.target()), &self.node) {
                return;
            }
        }
        *self.node.borrow_mut() = copy;
    }

    /// Copies style, tag, anchor and comments from `source`; content is
    /// left alone.
    pub fn update_attributes_from(&self, source: &CandidateNode) {
        if self.is_same_node(source) {
            return;
        }
        let attributes = source.node.borrow().attributes().clone();
        *self.node.borrow_mut().attributes_mut() = attributes;
    }
}
