use super::{parse_document, parse_document_with_format, DocumentFormat, ParseError};
use xlint_core::{
    DocumentNode, FindingKind, NodeKind, NonFiniteNumber, Scalar, Severity, PARSE_ERROR_NAME,
};

#[test]
fn yaml_document_parses_into_tree_and_value() {
    let input = "openapi: 3.1.0\ninfo:\n  title: x\n  version: 1\n";
    let parsed = parse_document(input).expect("must parse");

    assert_eq!(parsed.tree().get("openapi").and_then(|node| node.as_str()), Some("3.1.0"));
    assert_eq!(
        parsed.tree().get("info").and_then(|info| info.get("version")).map(|node| node.kind()),
        Some(NodeKind::Number)
    );
    assert_eq!(parsed.value()["info"]["title"], serde_json::json!("x"));
}

#[test]
fn auto_format_detects_json() {
    let input = r#"{"openapi":"3.1.0","info":{"title":"x","version":"1"},"x-a":true}"#;
    let parsed = parse_document(input).expect("must parse");
    assert_eq!(parsed.tree().get("x-a").map(|node| node.kind()), Some(NodeKind::Boolean));
}

#[test]
fn unterminated_flow_mapping_is_a_parse_error() {
    let input = "openapi: 3.1.0\ninfo: {title: x\n";
    let err = parse_document(input).expect_err("must fail");
    assert!(matches!(err, ParseError::Yaml(_)));

    let finding = err.to_finding();
    assert_eq!(finding.kind, FindingKind::ParseError);
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.extension_name, PARSE_ERROR_NAME);
    assert!(finding.position.is_none());
    assert_eq!(finding.reference.as_deref(), Some("yaml.parse_error"));
}

#[test]
fn duplicate_yaml_keys_are_rejected() {
    let input = "openapi: 3.1.0\nopenapi: 3.0.0\n";
    assert!(matches!(parse_document(input), Err(ParseError::Yaml(_))));
}

#[test]
fn root_must_be_a_mapping() {
    assert_eq!(
        parse_document("- a\n- b\n").expect_err("must fail"),
        ParseError::NotAMapping(NodeKind::Array)
    );
    assert_eq!(parse_document("  \n").expect_err("must fail"), ParseError::Empty);
}

#[test]
fn numeric_response_codes_become_string_keys() {
    let input = "responses:\n  200:\n    description: ok\n";
    let parsed = parse_document_with_format(input, DocumentFormat::Yaml).expect("must parse");
    assert!(parsed.tree().get("responses").and_then(|node| node.get("200")).is_some());
}

#[test]
fn tags_are_unwrapped() {
    let input = "x-kind: !custom value\n";
    let parsed = parse_document(input).expect("must parse");
    assert_eq!(parsed.tree().get("x-kind").and_then(|node| node.as_str()), Some("value"));
}

#[test]
fn forced_json_format_reports_json_errors() {
    let err = parse_document_with_format("openapi: 3.1.0", DocumentFormat::Json)
        .expect_err("must fail");
    assert!(matches!(err, ParseError::Json(_)));
}

#[test]
fn non_finite_yaml_numbers_stay_numbers() {
    let input = "x-ratio: .inf\nx-floor: -.inf\nx-unset: .nan\nx-plain: 1.5\n";
    let parsed = parse_document(input).expect("must parse");

    for key in ["x-ratio", "x-floor", "x-unset", "x-plain"] {
        assert_eq!(parsed.tree().get(key).map(|node| node.kind()), Some(NodeKind::Number), "{key}");
    }
    assert_eq!(
        parsed.tree().get("x-ratio"),
        Some(&DocumentNode::Scalar(Scalar::NonFinite(NonFiniteNumber::Infinity)))
    );
    assert_eq!(parsed.value()["x-ratio"], serde_json::Value::Null);
    assert_eq!(parsed.value()["x-plain"], serde_json::json!(1.5));
}
