//! Path traversal and recursive descent.

use crate::candidate::{CandidateNode, PathElement};
use crate::document::node::{resolve_alias, NodeRef, YamlNode, YamlValue};
use crate::error::EvalError;
use crate::expression::{ExpressionNode, Operation, PathKey};
use crate::navigator::TreeNavigator;
use indexmap::IndexMap;

const MERGE_KEY: &str = "<<";

/// Applies one path step to every candidate.
///
/// Mappings match by key, sequences by index or splat; anything else
/// yields nothing. While resolving an assignment target, a missing key is
/// inserted as `null` and matched, and a `null` node takes a key by
/// becoming a mapping.
pub(super) fn traverse(
    navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    let Operation::Traverse(key) = expr.operation() else {
        return Err(EvalError::UnexpectedOperation {
            expected: "traverse",
            found: expr.operation().name(),
        });
    };

    let prefs = navigator.prefs();
    let mut results = Vec::new();
    for candidate in nodes {
        let node = if prefs.follow_alias {
            resolve_alias(&candidate.node)
        } else {
            candidate.node.clone()
        };

        match key {
            PathKey::Key(name) => {
                let found = if prefs.follow_alias {
                    lookup_with_merge(&node, name)
                } else {
                    node.borrow().get(name)
                };
                match found {
                    Some(child) => {
                        results.push(candidate.child(child, PathElement::Key(name.clone())))
                    }
                    None if navigator.creates_missing() => {
                        if let Some(child) = create_key(&node, name) {
                            tracing::trace!(key = %name, path = %candidate.path_string(), "created missing key");
                            results.push(candidate.child(child, PathElement::Key(name.clone())));
                        }
                    }
                    None => {}
                }
            }
            PathKey::Index(index) => {
                let len = match node.borrow().value() {
                    YamlValue::Sequence(items) => items.len(),
                    _ => continue,
                };
                let position = if *index < 0 {
                    len.checked_sub(index.unsigned_abs())
                } else {
                    Some(*index as usize)
                };
                let item = position.and_then(|p| node.borrow().item(p).map(|item| (p, item)));
                if let Some((position, item)) = item {
                    results.push(candidate.child(item, PathElement::Index(position)));
                }
            }
            PathKey::Splat => results.extend(children(candidate, &node)),
        }
    }
    Ok(results)
}

/// Inserts `name` as `null` into a mapping, turning a `null` node into a
/// mapping first. Other nodes cannot take keys.
fn create_key(node: &NodeRef, name: &str) -> Option<NodeRef> {
    let mut node = node.borrow_mut();
    if matches!(node.value(), YamlValue::Null) {
        *node.value_mut() = YamlValue::Mapping(IndexMap::new());
    }
    match node.value_mut() {
        YamlValue::Mapping(map) => {
            let child = YamlNode::new(YamlValue::Null).into_ref();
            map.insert(name.to_string(), child.clone());
            Some(child)
        }
        _ => None,
    }
}

/// Matches each candidate and all of its descendants, in document order.
/// Aliases are not followed.
pub(super) fn recursive_descent(
    _navigator: &TreeNavigator,
    nodes: &[CandidateNode],
    _expr: &ExpressionNode,
) -> Result<Vec<CandidateNode>, EvalError> {
    let mut results = Vec::new();
    for candidate in nodes {
        walk(candidate, &mut results);
    }
    Ok(results)
}

fn walk(candidate: &CandidateNode, results: &mut Vec<CandidateNode>) {
    results.push(candidate.clone());
    for child in children(candidate, &candidate.node) {
        walk(&child, results);
    }
}

/// Direct children of `node` as candidates below `candidate`.
fn children(candidate: &CandidateNode, node: &NodeRef) -> Vec<CandidateNode> {
    match node.borrow().value() {
        YamlValue::Mapping(map) => map
            .iter()
            .map(|(key, child)| candidate.child(child.clone(), PathElement::Key(key.clone())))
            .collect(),
        YamlValue::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| candidate.child(item.clone(), PathElement::Index(index)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Key lookup that falls back to `<<` merge sources. Own keys win, then
/// merge sources in the order they are listed.
fn lookup_with_merge(node: &NodeRef, key: &str) -> Option<NodeRef> {
    let node = node.borrow();
    if let Some(found) = node.get(key) {
        return Some(found);
    }
    let merge = node.get(MERGE_KEY)?;
    let merge = resolve_alias(&merge);
    let sources: Vec<NodeRef> = match merge.borrow().value() {
        YamlValue::Sequence(items) => items.iter().map(resolve_alias).collect(),
        YamlValue::Mapping(_) => vec![merge.clone()],
        _ => Vec::new(),
    };
    sources
        .iter()
        .find_map(|source| lookup_with_merge(source, key))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{document, eval, eval_with, render};
    use crate::navigator::NavigationPrefs;

    #[test]
    fn test_traverse_key_and_index() {
        let doc = document("items:\n  - a\n  - b\n  - c\n");
        assert_eq!(render(&eval(&[doc.clone()], ".items[1]")), vec!["b"]);
        assert_eq!(render(&eval(&[doc.clone()], ".items[-1]")), vec!["c"]);
        assert!(eval(&[doc], ".items[5]").is_empty());
    }

    #[test]
    fn test_traverse_splat() {
        let doc = document("m:\n  x: 1\n  y: 2\n");
        let matches = eval(&[doc], ".m[]");
        assert_eq!(render(&matches), vec!["1", "2"]);
        assert_eq!(matches[1].path_string(), ".m.y");
    }

    #[test]
    fn test_traverse_scalar_yields_nothing() {
        let doc = document("a: 1\n");
        assert!(eval(&[doc], ".a.b").is_empty());
    }

    #[test]
    fn test_query_does_not_create_missing_key() {
        let doc = document("a: 1\n");
        assert!(eval(&[doc.clone()], ".b").is_empty());
        assert!(eval(&[doc.clone()], ".b.c").is_empty());
        assert!(doc.node.borrow().get("b").is_none());
    }

    #[test]
    fn test_assignment_target_creates_missing_path() {
        let doc = document("a: 1\n");
        eval(&[doc.clone()], ".b.c = 1");
        let b = doc.node.borrow().get("b").unwrap();
        assert!(b.borrow().value().is_mapping());
        assert_eq!(render(&eval(&[doc], ".b.c")), vec!["1"]);
    }

    #[test]
    fn test_missing_key_without_auto_create() {
        let doc = document("a: 1\n");
        let prefs = NavigationPrefs {
            auto_create: false,
            ..NavigationPrefs::default()
        };
        eval_with(prefs, &[doc.clone()], ".b = 1");
        assert!(doc.node.borrow().get("b").is_none());
    }

    #[test]
    fn test_follow_alias_and_merge() {
        let yaml = "base: &b\n  x: 1\nref: *b\nchild:\n  <<: *b\n  y: 2\n";
        let prefs = NavigationPrefs {
            follow_alias: true,
            auto_create: false,
        };
        let doc = document(yaml);
        assert_eq!(render(&eval_with(prefs, &[doc.clone()], ".ref.x")), vec!["1"]);
        assert_eq!(render(&eval_with(prefs, &[doc.clone()], ".child.x")), vec!["1"]);

        let no_follow = NavigationPrefs {
            follow_alias: false,
            auto_create: false,
        };
        assert!(eval_with(no_follow, &[doc], ".ref.x").is_empty());
    }

    #[test]
    fn test_recursive_descent_includes_self_in_order() {
        let doc = document("a:\n  b: 1\nc: [2]\n");
        let paths: Vec<String> = eval(&[doc], "..")
            .iter()
            .map(|m| m.path_string())
            .collect();
        assert_eq!(paths, vec![".", ".a", ".a.b", ".c", ".c[0]"]);
    }
}
