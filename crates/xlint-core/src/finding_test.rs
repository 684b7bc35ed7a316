use super::{Finding, FindingKind, Severity, SourcePosition, ValidationResult};
use crate::StructuralPath;

fn finding(severity: Severity, message: &str) -> Finding {
    Finding::new(
        FindingKind::ExtensionMissing,
        severity,
        "x-owner",
        "servers/0/x-owner".parse().expect("must parse"),
        message,
    )
}

#[test]
fn result_splits_by_severity_and_keeps_order() {
    let result = ValidationResult::from_findings(vec![
        finding(Severity::Warning, "w1"),
        finding(Severity::Error, "e1"),
        finding(Severity::Error, "e2"),
    ]);

    assert!(!result.is_valid());
    assert_eq!(result.errors().len(), 2);
    assert_eq!(result.errors()[0].message, "e1");
    assert_eq!(result.errors()[1].message, "e2");
    assert_eq!(result.warnings().len(), 1);
    assert_eq!(result.len(), 3);
}

#[test]
fn warnings_alone_keep_result_valid() {
    let result = ValidationResult::from_findings(vec![finding(Severity::Warning, "w1")]);
    assert!(result.is_valid());
    assert!(result.errors().is_empty());
}

#[test]
fn missing_position_falls_back_to_document_start() {
    let unresolved = finding(Severity::Error, "e1");
    assert_eq!(unresolved.position_or_start(), SourcePosition::new(1, 1));

    let resolved = unresolved.with_position(Some(SourcePosition::new(4, 5)));
    assert_eq!(resolved.position_or_start(), SourcePosition::new(4, 5));
}

#[test]
fn result_serializes_with_camel_case_fields() {
    let result = ValidationResult::from_findings(vec![Finding::new(
        FindingKind::ParseError,
        Severity::Error,
        "parse-error",
        StructuralPath::root(),
        "yaml parse failed",
    )]);
    let value = serde_json::to_value(&result).expect("serializable");
    assert_eq!(value["isValid"], serde_json::json!(false));
    assert_eq!(value["errors"][0]["kind"], serde_json::json!("parse_error"));
    assert_eq!(value["errors"][0]["extensionName"], serde_json::json!("parse-error"));
    assert_eq!(value["errors"][0]["path"], serde_json::json!("/"));
    assert!(value["errors"][0].get("position").is_none());
}
