//! Operator tree types for compiled expressions.

/// Selector applied by a traversal step.
#[derive(Debug, Clone, PartialEq)]
pub enum PathKey {
    /// Mapping key (.key or ."quoted key")
    Key(String),
    /// Sequence index (.[0], .[-1])
    Index(isize),
    /// All children (.[])
    Splat,
}

/// Constant value written in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

/// Operation tag of an operator tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Current node (.)
    SelfReference,
    /// Self and all descendants (..)
    RecursiveDescent,
    Traverse(PathKey),
    Literal(Literal),
    /// Index of the document a candidate came from (documentIndex, di)
    DocumentIndex,
    /// Name of the input a candidate came from
    Filename,
    Pipe,
    Union,
    Assign,
    AssignAttributes,
    Add,
    Equals,
    /// Filter; the condition is the right operand
    Select,
}

impl Operation {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SelfReference => "self",
            Operation::RecursiveDescent => "recursive descent",
            Operation::Traverse(_) => "traverse",
            Operation::Literal(_) => "literal",
            Operation::DocumentIndex => "documentIndex",
            Operation::Filename => "filename",
            Operation::Pipe => "pipe",
            Operation::Union => "union",
            Operation::Assign => "assign",
            Operation::AssignAttributes => "assign attributes",
            Operation::Add => "add",
            Operation::Equals => "equals",
            Operation::Select => "select",
        }
    }
}

/// A node of a compiled expression.
///
/// Operands are owned, so a tree is always finite and acyclic. The left
/// operand is resolved first; binary operators resolve the right operand
/// relative to the left one's matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionNode {
    operation: Operation,
    lhs: Option<Box<ExpressionNode>>,
    rhs: Option<Box<ExpressionNode>>,
}

impl ExpressionNode {
    /// Creates a node without operands.
    pub fn leaf(operation: Operation) -> Self {
        Self {
            operation,
            lhs: None,
            rhs: None,
        }
    }

    /// Creates a node with both operands.
    pub fn binary(operation: Operation, lhs: ExpressionNode, rhs: ExpressionNode) -> Self {
        Self {
            operation,
            lhs: Some(Box::new(lhs)),
            rhs: Some(Box::new(rhs)),
        }
    }

    /// Creates a node with only a right operand.
    pub fn unary(operation: Operation, rhs: ExpressionNode) -> Self {
        Self {
            operation,
            lhs: None,
            rhs: Some(Box::new(rhs)),
        }
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn lhs(&self) -> Option<&ExpressionNode> {
        self.lhs.as_deref()
    }

    pub fn rhs(&self) -> Option<&ExpressionNode> {
        self.rhs.as_deref()
    }
}
