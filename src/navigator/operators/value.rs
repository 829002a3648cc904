//! Operators producing fresh scalar nodes.

use crate::candidate::CandidateNode;
use crate::document::node::{YamlNode, YamlNumber, YamlValue};
use crate::error::EvalError;
use crate::expression::{ExpressionNode, Literal, Operation};
use crate::navigator::TreeNavigator;

/// Produces one node for the literal, carrying the provenance of the first
/// context candidate.
pub(super) fn literal(
    _navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    let Operation::Literal(literal) = expr.operation() else {
        return Err(EvalError::UnexpectedOperation {
            expected: "literal",
            found: expr.operation().name(),
        });
    };
    let value = match literal {
        Literal::String(text) => YamlValue::String(text.clone()),
        Literal::Integer(i) => YamlValue::Number(YamlNumber::Integer(*i)),
        Literal::Float(f) => YamlValue::Number(YamlNumber::Float(*f)),
        Literal::Boolean(b) => YamlValue::Boolean(*b),
        Literal::Null => YamlValue::Null,
    };
    let node = YamlNode::new(value).into_ref();
    let candidate = match nodes.first() {
        Some(context) => context.derive(node),
        None => CandidateNode::new(node, 0, "-"),
    };
    Ok(vec![candidate])
}

pub(super) fn document_index(
    _navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    _expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    Ok(nodes
        .iter()
        .map(|candidate| {
            let index = YamlNumber::Integer(candidate.document as i64);
            candidate.derive(YamlNode::new(YamlValue::Number(index)).into_ref())
        })
        .collect())
}

pub(super) fn filename(
    _navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    _expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    Ok(nodes
        .iter()
        .map(|candidate| {
            let name = YamlValue::String(candidate.filename.clone());
            candidate.derive(YamlNode::new(name).into_ref())
        })
        .collect())
}
