use xlint_core::{
    DocumentNode, ExtensionField, ExtensionRule, Finding, FindingKind, StructuralPath,
};

/// Checks `rule` against one target entry and appends what is wrong.
pub fn check_rule_on_entry(
    rule: &ExtensionRule,
    entry: &DocumentNode,
    entry_path: &StructuralPath,
    findings: &mut Vec<Finding>,
) {
    let value_path = entry_path.child_key(rule.name.as_str());
    // A non-mapping entry cannot carry the field, so it counts as absent.
    match entry.get(&rule.name) {
        None => {
            if rule.required() {
                findings.push(missing_extension(rule, entry_path, value_path));
            }
        }
        Some(value) => check_value(rule, &rule.field, value, &value_path, findings),
    }
}

fn check_value(
    rule: &ExtensionRule,
    field: &ExtensionField,
    value: &DocumentNode,
    path: &StructuralPath,
    findings: &mut Vec<Finding>,
) {
    let actual = value.kind();
    if !field.value_type.accepts(actual) {
        findings.push(type_mismatch(rule, field, path, actual.as_str()));
        return;
    }

    match value {
        DocumentNode::Mapping(mapping) => {
            for (name, member) in &field.properties {
                let member_path = path.child_key(name.as_str());
                match mapping.get(name) {
                    Some(member_value) => {
                        check_value(rule, member, member_value, &member_path, findings)
                    }
                    None if member.required => {
                        findings.push(missing_property(rule, name, member_path))
                    }
                    None => {}
                }
            }
        }
        DocumentNode::Sequence(items) => {
            if let Some(item_field) = &field.items {
                for (index, item) in items.iter().enumerate() {
                    check_value(rule, item_field, item, &path.child_index(index), findings);
                }
            }
        }
        DocumentNode::Scalar(_) => {}
    }
}

fn missing_extension(
    rule: &ExtensionRule,
    entry_path: &StructuralPath,
    value_path: StructuralPath,
) -> Finding {
    let message = if entry_path.is_root() {
        format!("Missing required custom extension: {}", rule.name)
    } else {
        format!(
            "Missing required custom extension: {} (in {})",
            rule.name, entry_path
        )
    };
    Finding::new(
        FindingKind::ExtensionMissing,
        rule.severity,
        rule.name.as_str(),
        value_path,
        message,
    )
    .with_reference("extension.missing")
}

fn missing_property(rule: &ExtensionRule, property: &str, path: StructuralPath) -> Finding {
    Finding::new(
        FindingKind::ExtensionMissing,
        rule.severity,
        rule.name.as_str(),
        path,
        format!(
            "Missing required property `{property}` in custom extension {}",
            rule.name
        ),
    )
    .with_reference("extension.property_missing")
}

fn type_mismatch(
    rule: &ExtensionRule,
    field: &ExtensionField,
    path: &StructuralPath,
    actual: &str,
) -> Finding {
    let expected = &field.value_type;
    let message = if expected.is_known() {
        format!(
            "Invalid type for custom extension {} at {path}: expected {expected}, got {actual}",
            rule.name
        )
    } else {
        format!(
            "Invalid type for custom extension {} at {path}: unsupported declared type `{expected}`, got {actual}",
            rule.name
        )
    };
    Finding::new(
        FindingKind::ExtensionTypeMismatch,
        rule.severity,
        rule.name.as_str(),
        path.clone(),
        message,
    )
    .with_reference("extension.type_mismatch")
}
