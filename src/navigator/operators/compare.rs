//! Equality and filtering.

use super::cross_product;
use crate::candidate::CandidateNode;
use crate::document::node::{YamlNode, YamlValue};
use crate::error::EvalError;
use crate::expression::ExpressionNode;
use crate::navigator::{Side, TreeNavigator};

/// Compares every left match with every right match by content.
pub(super) fn equals(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    cross_product(navigator, nodes, expr, |context, left, right| {
        let equal = left.node.borrow().content_eq(&right.node.borrow());
        Ok(context.derive(YamlNode::new(YamlValue::Boolean(equal)).into_ref()))
    })
}

/// Keeps the context candidates whose condition yields a truthy node.
pub(super) fn select(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    let condition = navigator.read_only();
    let mut results = Vec::new();
    for candidate in nodes {
        let matches =
            condition.get_required_operand(std::slice::from_ref(candidate), expr, Side::Right)?;
        if matches.iter().any(|m| m.node.borrow().is_truthy()) {
            results.push(candidate.clone());
        }
    }
    Ok(results)
}
