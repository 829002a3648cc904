//! Assignment operators.
//!
//! Both operators resolve the left operand once, then evaluate the right
//! operand separately for each left-hand match with that match as the only
//! context node. Only the left operand creates missing keys (see
//! [`NavigationPrefs::auto_create`](crate::navigator::NavigationPrefs)).
//! The first right-hand match is the update source; when the
//! right operand matches nothing the target is left unchanged. The context
//! list is returned as is so assignments chain with later operators.

use crate::candidate::CandidateNode;
use crate::error::EvalError;
use crate::expression::ExpressionNode;
use crate::navigator::TreeNavigator;

/// `lhs = rhs`: replaces content and attributes of every target.
pub(super) fn assign(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    assign_each(navigator, nodes, expr, CandidateNode::update_from)
}

/// `lhs @= rhs`: copies only style, tag, anchor and comments.
pub(super) fn assign_attributes(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    assign_each(navigator, nodes, expr, CandidateNode::update_attributes_from)
}

fn assign_each(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
    update: fn(&CandidateNode, &CandidateNode),
) -> Result<Vec<CandidateNode>, EvalError> {
    let targets = navigator
        .creating_targets()
        .get_matching_operand(nodes, expr.lhs())?;
    let values = navigator.read_only();
    for target in &targets {
        let sources = values.get_matching_operand(std::slice::from_ref(target), expr.rhs())?;
        match sources.first() {
            Some(source) => {
                tracing::trace!(
                    operation = expr.operation().name(),
                    target = %target.path_string(),
                    document = target.document,
                    "updating node"
                );
                update(target, source);
            }
            None => tracing::debug!(
                target = %target.path_string(),
                "right operand matched nothing, node left unchanged"
            ),
        }
    }
    Ok(nodes.to_vec())
}
