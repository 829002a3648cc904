//! Tree navigator: evaluates operator trees against candidate lists.
//!
//! The navigator holds no state besides its preferences. Each call
//! dispatches on the operation of the given node; operators that need
//! sub-results call back into the navigator, so recursion is the only
//! control flow.
//!
//! # Example
//!
//! ```
//! use yamlsmith::candidate::CandidateNode;
//! use yamlsmith::document::parser::parse_documents;
//! use yamlsmith::expression::compile;
//! use yamlsmith::navigator::{NavigationPrefs, TreeNavigator};
//!
//! let root = parse_documents("a: {b: 1}\n").unwrap().remove(0);
//! let navigator = TreeNavigator::new(NavigationPrefs::default());
//! let nodes = vec![CandidateNode::new(root, 0, "-")];
//!
//! let matches = navigator.get_matching_nodes(&nodes, &compile(".a.b").unwrap()).unwrap();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].path_string(), ".a.b");
//! ```

pub mod operators;

use crate::candidate::CandidateNode;
use crate::error::EvalError;
use crate::expression::ExpressionNode;

/// Options controlling how paths are navigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationPrefs {
    /// Resolve aliases while traversing; key lookups also search `<<`
    /// merge sources.
    pub follow_alias: bool,
    /// Resolving the left operand of an assignment creates the missing
    /// keys along its path. Other lookups never change the document.
    pub auto_create: bool,
}

impl Default for NavigationPrefs {
    fn default() -> Self {
        Self {
            follow_alias: false,
            auto_create: true,
        }
    }
}

/// Evaluates expressions by dispatching each node to its operator.
#[derive(Debug, Clone, Copy)]
pub struct TreeNavigator {
    prefs: NavigationPrefs,
    /// Set only while resolving assignment targets
    creating: bool,
}

impl TreeNavigator {
    pub fn new(prefs: NavigationPrefs) -> Self {
        Self {
            prefs,
            creating: false,
        }
    }

    pub fn prefs(&self) -> &NavigationPrefs {
        &self.prefs
    }

    /// Navigator for assignment targets: creates missing keys when
    /// `auto_create` is set.
    pub(crate) fn creating_targets(&self) -> Self {
        Self {
            creating: self.prefs.auto_create,
            ..*self
        }
    }

    /// Navigator for values and conditions, which never create keys.
    pub(crate) fn read_only(&self) -> Self {
        Self {
            creating: false,
            ..*self
        }
    }

    pub(crate) fn creates_missing(&self) -> bool {
        self.creating
    }

    /// Evaluates `expr` against `nodes`, returning matches in order.
    pub fn get_matching_nodes(
        &self,
        nodes: &[CandidateNode],
        expr: &ExpressionNode,
    ) -> Result<Vec<CandidateNode>, EvalError> {
        let operation = expr.operation();
        tracing::trace!(
            operation = operation.name(),
            inputs = nodes.len(),
            "dispatching operator"
        );
        let handler = operation.handler();
        handler(self, nodes, expr)
    }

    /// Evaluates an optional operand; a missing one matches `nodes` as is.
    pub fn get_matching_operand(
        &self,
        nodes: &[CandidateNode],
        operand: Option<&ExpressionNode>,
    ) -> Result<Vec<CandidateNode>, EvalError> {
        match operand {
            Some(expr) => self.get_matching_nodes(nodes, expr),
            None => Ok(nodes.to_vec()),
        }
    }

    /// Evaluates an operand the operation cannot do without.
    pub(crate) fn get_required_operand(
        &self,
        nodes: &[CandidateNode],
        expr: &ExpressionNode,
        side: Side,
    ) -> Result<Vec<CandidateNode>, EvalError> {
        let operand = match side {
            Side::Left => expr.lhs(),
            Side::Right => expr.rhs(),
        };
        match operand {
            Some(operand) => self.get_matching_nodes(nodes, operand),
            None => Err(EvalError::MissingOperand {
                operation: expr.operation().name(),
                side: side.name(),
            }),
        }
    }
}

/// Operand position in a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}
