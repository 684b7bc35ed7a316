use super::{ExtensionField, ExtensionLocation, ExtensionRule, ExtensionValueType};
use crate::{NodeKind, Severity};
use serde_json::json;

#[test]
fn rule_decodes_with_defaults() {
    let rule: ExtensionRule = serde_json::from_value(json!({
        "name": "x-owner",
        "location": "servers",
        "type": "string"
    }))
    .expect("must decode");

    assert_eq!(rule.location, ExtensionLocation::Servers);
    assert_eq!(rule.value_type(), &ExtensionValueType::String);
    assert!(rule.required());
    assert_eq!(rule.severity, Severity::Error);
    assert!(rule.has_extension_prefix());
}

#[test]
fn rule_decodes_nested_members_and_value_type_alias() {
    let rule: ExtensionRule = serde_json::from_value(json!({
        "name": "x-rate-limit",
        "location": "requestBody",
        "valueType": "object",
        "required": false,
        "severity": "warning",
        "description": "per-client limits",
        "properties": {
            "burst": {"type": "number"},
            "windows": {"type": "array", "items": {"type": "string"}}
        }
    }))
    .expect("must decode");

    assert_eq!(rule.location, ExtensionLocation::RequestBody);
    assert!(!rule.required());
    assert_eq!(rule.severity, Severity::Warning);
    let windows = rule.field.properties.get("windows").expect("windows declared");
    assert_eq!(
        windows.items.as_deref(),
        Some(&ExtensionField::new(ExtensionValueType::String))
    );
}

#[test]
fn unknown_type_is_kept_and_accepts_nothing() {
    let rule: ExtensionRule = serde_json::from_value(json!({
        "name": "x-when",
        "location": "root",
        "type": "date"
    }))
    .expect("must decode");

    assert_eq!(
        rule.value_type(),
        &ExtensionValueType::Unknown("date".to_string())
    );
    assert!(!rule.value_type().is_known());
    for kind in [
        NodeKind::Null,
        NodeKind::Boolean,
        NodeKind::Number,
        NodeKind::String,
        NodeKind::Object,
        NodeKind::Array,
    ] {
        assert!(!rule.value_type().accepts(kind));
    }
}

#[test]
fn known_types_accept_only_their_kind() {
    assert!(ExtensionValueType::Object.accepts(NodeKind::Object));
    assert!(!ExtensionValueType::Object.accepts(NodeKind::Array));
    assert!(!ExtensionValueType::Object.accepts(NodeKind::Null));
    assert!(ExtensionValueType::Array.accepts(NodeKind::Array));
    assert!(!ExtensionValueType::String.accepts(NodeKind::Number));
}

#[test]
fn unknown_location_is_rejected() {
    let result = serde_json::from_value::<ExtensionRule>(json!({
        "name": "x-owner",
        "location": "components",
        "type": "string"
    }));
    assert!(result.is_err());
}

#[test]
fn builder_matches_decoded_rule() {
    let built = ExtensionRule::new("x-env", ExtensionLocation::Servers, "number");
    let decoded: ExtensionRule = serde_json::from_value(json!({
        "name": "x-env",
        "location": "servers",
        "type": "number",
        "required": true
    }))
    .expect("must decode");
    assert_eq!(built, decoded);
}
