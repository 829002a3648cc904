//! Operator routines and the table that dispatches to them.

mod arithmetic;
mod assign;
mod combine;
mod compare;
mod traverse;
mod value;

use super::TreeNavigator;
use crate::candidate::CandidateNode;
use crate::error::EvalError;
use crate::expression::{ExpressionNode, Operation};

/// Uniform signature of every operator routine.
pub type OperatorFn = fn(
    &TreeNavigator,
    &[CandidateNode],
    &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError>;

impl Operation {
    /// Routine implementing this operation.
    pub fn handler(&self) -> OperatorFn {
        match self {
            Operation::SelfReference => combine::self_reference,
            Operation::Pipe => combine::pipe,
            Operation::Union => combine::union,
            Operation::Traverse(_) => traverse::traverse,
            Operation::RecursiveDescent => traverse::recursive_descent,
            Operation::Assign => assign::assign,
            Operation::AssignAttributes => assign::assign_attributes,
            Operation::Add => arithmetic::add,
            Operation::Equals => compare::equals,
            Operation::Select => compare::select,
            Operation::Literal(_) => value::literal,
            Operation::DocumentIndex => value::document_index,
            Operation::Filename => value::filename,
        }
    }
}

/// Evaluates `lhs` and `rhs` of `expr` for each context candidate on its
/// own and calls `combine` for every pair of their matches.
fn cross_product<F>(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
    mut combine: F,
) -> Result<Vec<CandidateNode>, EvalError>
where
    F: FnMut(&CandidateNode, &CandidateNode, &CandidateNode) -> Result<CandidateNode, EvalError>,
{
    use super::Side;

    let operands = navigator.read_only();
    let mut results = Vec::new();
    for context in nodes {
        let context_list = std::slice::from_ref(context);
        let lhs = operands.get_required_operand(context_list, expr, Side::Left)?;
        let rhs = operands.get_required_operand(context_list, expr, Side::Right)?;
        for left in &lhs {
            for right in &rhs {
                results.push(combine(context, left, right)?);
            }
        }
    }
    Ok(results)
}

#[cfg(test)]
mod test_support {
    use crate::candidate::CandidateNode;
    use crate::document::encoder::{encode, EncoderOptions};
    use crate::document::parser::parse_documents;
    use crate::expression::compile;
    use crate::navigator::{NavigationPrefs, TreeNavigator};

    pub(super) fn document(yaml: &str) -> CandidateNode {
        let root = parse_documents(yaml).unwrap().remove(0);
        CandidateNode::new(root, 0, "test.yaml")
    }

    pub(super) fn eval_with(
        prefs: NavigationPrefs,
        nodes: &[CandidateNode],
        expression: &str,
    ) -> Vec<CandidateNode> {
        let navigator = TreeNavigator::new(prefs);
        navigator
            .get_matching_nodes(nodes, &compile(expression).unwrap())
            .unwrap()
    }

    pub(super) fn eval(nodes: &[CandidateNode], expression: &str) -> Vec<CandidateNode> {
        eval_with(NavigationPrefs::default(), nodes, expression)
    }

    /// Encodes every match, one rendering per match.
    pub(super) fn render(matches: &[CandidateNode]) -> Vec<String> {
        matches
            .iter()
            .map(|m| {
                encode(&m.node.borrow(), &EncoderOptions::default())
                    .trim_end()
                    .to_string()
            })
            .collect()
    }
}
