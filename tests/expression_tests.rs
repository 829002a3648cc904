//! Expression evaluation through the navigator.

use rstest::rstest;
use yamlsmith::candidate::CandidateNode;
use yamlsmith::document::encoder::{encode, EncoderOptions};
use yamlsmith::document::parser::parse_documents;
use yamlsmith::error::EvalError;
use yamlsmith::expression::{compile, ParseError};
use yamlsmith::navigator::{NavigationPrefs, TreeNavigator};

const DOC: &str = "\
name: demo
tags: [a, b, c]
servers:
  - host: alpha
    port: 80
  - host: beta
    port: 443
";

fn query(yaml: &str, expression: &str) -> Result<Vec<String>, EvalError> {
    let root = parse_documents(yaml).unwrap().remove(0);
    let navigator = TreeNavigator::new(NavigationPrefs {
        auto_create: false,
        ..NavigationPrefs::default()
    });
    let matches = navigator.get_matching_nodes(
        &[CandidateNode::new(root, 0, "doc.yaml")],
        &compile(expression).unwrap(),
    )?;
    Ok(matches
        .iter()
        .map(|m| {
            encode(&m.node.borrow(), &EncoderOptions::default())
                .trim_end()
                .to_string()
        })
        .collect())
}

#[rstest]
#[case(".name", &["demo"])]
#[case(".tags[0]", &["a"])]
#[case(".tags[-1]", &["c"])]
#[case(".tags[]", &["a", "b", "c"])]
#[case(".servers[].host", &["alpha", "beta"])]
#[case(".servers[1].port", &["443"])]
#[case(".servers[] | select(.port == 443) | .host", &["beta"])]
#[case(".name, .tags[1]", &["demo", "b"])]
#[case(".\"name\"", &["demo"])]
#[case(".missing", &[])]
#[case(".servers[0].port + 8000", &["8080"])]
#[case(".name == \"demo\"", &["true"])]
#[case("(.tags | .[0]) + .name", &["ademo"])]
fn test_queries(#[case] expression: &str, #[case] expected: &[&str]) {
    assert_eq!(query(DOC, expression).unwrap(), expected);
}

#[test]
fn test_recursive_descent_finds_all_hosts() {
    let hosts = query(DOC, ".. | select(. == \"alpha\" , . == \"beta\")").unwrap();
    assert_eq!(hosts, vec!["alpha", "beta"]);
}

#[test]
fn test_incompatible_add_fails() {
    let err = query(DOC, ".servers + .name").unwrap_err();
    assert_eq!(
        err,
        EvalError::IncompatibleTypes {
            operation: "add",
            lhs: "sequence",
            rhs: "string",
        }
    );
}

#[rstest]
#[case(".a ==")]
#[case(".[")]
#[case("select(.a")]
#[case("\"open")]
#[case(".a | | .b")]
fn test_malformed_expressions(#[case] expression: &str) {
    assert!(compile(expression).is_err());
}

#[test]
fn test_parse_error_position() {
    match compile(".a ? .b") {
        Err(ParseError::UnexpectedToken { position, found, .. }) => {
            assert_eq!(position, 3);
            assert_eq!(found, "?");
        }
        other => panic!("Expected unexpected token, got {:?}", other),
    }
}
