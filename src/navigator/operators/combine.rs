//! Structural operators: self reference, pipe and union.

use crate::candidate::CandidateNode;
use crate::error::EvalError;
use crate::expression::ExpressionNode;
use crate::navigator::TreeNavigator;

pub(super) fn self_reference(
    _navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    _expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    Ok(nodes.to_vec())
}

/// Feeds the left operand's matches to the right operand.
pub(super) fn pipe(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    let lhs = navigator.get_matching_operand(nodes, expr.lhs())?;
    navigator.get_matching_operand(&lhs, expr.rhs())
}

/// Left operand's matches followed by the right operand's, same context.
pub(super) fn union(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    let mut results = navigator.get_matching_operand(nodes, expr.lhs())?;
    results.extend(navigator.get_matching_operand(nodes, expr.rhs())?);
    Ok(results)
}
