//! The `+` operator.

use super::cross_product;
use crate::candidate::CandidateNode;
use crate::document::node::{resolve_alias, NodeRef, YamlNode, YamlValue};
use crate::error::EvalError;
use crate::expression::ExpressionNode;
use crate::navigator::TreeNavigator;
use indexmap::IndexMap;

/// Adds every left match to every right match, per context candidate.
///
/// The sum keeps the left node's attributes minus its anchor.
pub(super) fn add(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    cross_product(navigator, nodes, expr, |context, left, right| {
        let lhs = resolve_alias(&left.node);
        let rhs = resolve_alias(&right.node);
        let lhs = lhs.borrow();
        let rhs = rhs.borrow();

        let value = add_values(&lhs, &rhs)?;
        let mut attributes = lhs.attributes().clone();
        attributes.anchor = None;
        Ok(context.derive(YamlNode::with_attributes(value, attributes).into_ref()))
    })
}

fn add_values(lhs: &YamlNode, rhs: &YamlNode) -> Result<YamlValue, EvalError> {
    let value = match (lhs.value(), rhs.value()) {
        (_, YamlValue::Null) => lhs.deep_copy().value,
        (YamlValue::Null, _) => rhs.deep_copy().value,
        (YamlValue::Number(a), YamlValue::Number(b)) => YamlValue::Number(a.add(*b)),
        (YamlValue::String(a), other) if is_scalar(other) => {
            YamlValue::String(format!("{}{}", a, other.scalar_text().unwrap_or_default()))
        }
        (other, YamlValue::String(b)) if is_scalar(other) => {
            YamlValue::String(format!("{}{}", other.scalar_text().unwrap_or_default(), b))
        }
        (YamlValue::Sequence(a), YamlValue::Sequence(b)) => YamlValue::Sequence(
            a.iter()
                .chain(b)
                .map(|item| item.borrow().deep_copy().into_ref())
                .collect(),
        ),
        (YamlValue::Mapping(a), YamlValue::Mapping(b)) => {
            let mut merged: IndexMap<String, NodeRef> = a
                .iter()
                .map(|(key, child)| (key.clone(), child.borrow().deep_copy().into_ref()))
                .collect();
            for (key, child) in b {
                merged.insert(key.clone(), child.borrow().deep_copy().into_ref());
            }
            YamlValue::Mapping(merged)
        }
        (a, b) => {
            return Err(EvalError::IncompatibleTypes {
                operation: "add",
                lhs: a.type_name(),
                rhs: b.type_name(),
            })
        }
    };
    Ok(value)
}

fn is_scalar(value: &YamlValue) -> bool {
    matches!(
        value,
        YamlValue::String(_) | YamlValue::Number(_) | YamlValue::Boolean(_)
    )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{document, eval, render};
    use crate::error::EvalError;
    use crate::expression::compile;
    use crate::navigator::{NavigationPrefs, TreeNavigator};
    use rstest::rstest;

    #[rstest]
    #[case("1 + 2", "3")]
    #[case("1 + 0.5", "1.5")]
    #[case("\"a\" + \"b\"", "ab")]
    #[case("\"v\" + 2", "v2")]
    #[case("3 + \"_x\"", "3_x")]
    #[case("null + 4", "4")]
    #[case(".n + null", "7")]
    fn test_add_scalars(#[case] expression: &str, #[case] expected: &str) {
        let doc = document("n: 7\n");
        assert_eq!(render(&eval(&[doc], expression)), vec![expected]);
    }

    #[test]
    fn test_add_collections() {
        let doc = document("s: [1]\nt: [2]\nm: {a: 1, b: 2}\nn: {b: 3}\n");
        assert_eq!(render(&eval(&[doc.clone()], ".s + .t")), vec!["[1, 2]"]);
        assert_eq!(render(&eval(&[doc], ".m + .n")), vec!["{a: 1, b: 3}"]);
    }

    #[test]
    fn test_add_keeps_left_attributes() {
        let doc = document("a: \"x\"\n");
        assert_eq!(render(&eval(&[doc], ".a + \"y\"")), vec!["\"xy\""]);
    }

    #[test]
    fn test_add_cross_product() {
        let doc = document("a: [1, 2]\n");
        assert_eq!(render(&eval(&[doc], ".a[] + (10, 20)")), vec!["11", "21", "12", "22"]);
    }

    #[test]
    fn test_add_incompatible() {
        let doc = document("m: {a: 1}\n");
        let navigator = TreeNavigator::new(NavigationPrefs::default());
        let err = navigator
            .get_matching_nodes(&[doc], &compile(".m + 1").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::IncompatibleTypes {
                operation: "add",
                lhs: "mapping",
                rhs: "number",
            }
        );
    }
}
