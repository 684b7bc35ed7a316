use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use xlint_core::{
    ExtensionField, ExtensionRule, ExtensionValueType, Finding, FindingKind, Severity,
    StructuralPath,
};

/// Extension names the location resolver can place in source text.
const LOCATABLE_NAME_PATTERN: &str = r"^x-[A-Za-z0-9_-]+$";

/// Rule configuration file: `{ customExtensions: [...] }` in YAML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    #[serde(default)]
    pub custom_extensions: Vec<ExtensionRule>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read validator config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("validator config parse failed: {0}")]
    Parse(String),
    #[error("validator config invalid: {}", summarize(.0))]
    Validation(Vec<Finding>),
}

/// Reads and decodes a config file without judging its rules.
pub fn read_validator_config(path: &Path) -> Result<ValidatorConfig, ConfigError> {
    let raw = read_config_text(path)?;
    parse_validator_config(raw.as_str(), path)
}

pub fn read_config_text(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

/// Decodes config text; the extension of `path` picks the decoder, anything else tries
/// YAML then JSON.
pub fn parse_validator_config(raw: &str, path: &Path) -> Result<ValidatorConfig, ConfigError> {
    let expanded = expand_env_placeholders(raw)?;
    let config: ValidatorConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(expanded.as_str())
            .map_err(|error| ConfigError::Parse(format!("json decode error: {error}")))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(expanded.as_str())
            .map_err(|error| ConfigError::Parse(format!("yaml decode error: {error}")))?,
        _ => serde_yaml::from_str(expanded.as_str())
            .or_else(|_| serde_json::from_str(expanded.as_str()))
            .map_err(|error| ConfigError::Parse(error.to_string()))?,
    };
    Ok(config)
}

/// Reads a config file and rejects it when any rule is an error; warnings are logged.
pub fn load_validator_config(path: &Path) -> Result<ValidatorConfig, ConfigError> {
    let config = read_validator_config(path)?;
    let findings = validate_validator_config(&config);
    for warning in findings.iter().filter(|finding| !finding.is_error()) {
        tracing::warn!(path = %warning.path, "{}", warning.message);
    }
    let errors = findings
        .into_iter()
        .filter(Finding::is_error)
        .collect::<Vec<_>>();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }
    tracing::debug!(
        config = %path.display(),
        rules = config.custom_extensions.len(),
        "loaded validator config"
    );
    Ok(config)
}

pub fn validate_validator_config(config: &ValidatorConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen = BTreeSet::new();
    let rules_path = StructuralPath::root().child_key("customExtensions");

    for (index, rule) in config.custom_extensions.iter().enumerate() {
        let rule_path = rules_path.child_index(index);
        if !rule.has_extension_prefix() {
            findings.push(config_finding(
                rule,
                Severity::Error,
                rule_path.child_key("name"),
                format!("extension name `{}` must start with `x-`", rule.name),
                "config.rule.name_prefix",
            ));
        } else if !is_locatable_name(rule.name.as_str()) {
            findings.push(config_finding(
                rule,
                Severity::Warning,
                rule_path.child_key("name"),
                format!(
                    "extension name `{}` has characters outside letters, digits, `_` and `-`; its findings will not carry a source position",
                    rule.name
                ),
                "config.rule.name_unlocatable",
            ));
        }
        if !seen.insert((rule.name.as_str(), rule.location)) {
            findings.push(config_finding(
                rule,
                Severity::Error,
                rule_path.clone(),
                format!(
                    "duplicate rule for `{}` at location `{}`",
                    rule.name, rule.location
                ),
                "config.rule.duplicate",
            ));
        }
        check_field(rule, &rule.field, &rule_path, &mut findings);
    }
    findings
}

fn check_field(
    rule: &ExtensionRule,
    field: &ExtensionField,
    field_path: &StructuralPath,
    findings: &mut Vec<Finding>,
) {
    if !field.value_type.is_known() {
        findings.push(config_finding(
            rule,
            Severity::Warning,
            field_path.child_key("type"),
            format!(
                "unsupported type `{}`; values will always be reported as mismatched",
                field.value_type
            ),
            "config.rule.unknown_type",
        ));
    }
    if !field.properties.is_empty() && field.value_type != ExtensionValueType::Object {
        findings.push(config_finding(
            rule,
            Severity::Warning,
            field_path.child_key("properties"),
            format!("`properties` is ignored for type `{}`", field.value_type),
            "config.rule.properties_ignored",
        ));
    }
    if field.items.is_some() && field.value_type != ExtensionValueType::Array {
        findings.push(config_finding(
            rule,
            Severity::Warning,
            field_path.child_key("items"),
            format!("`items` is ignored for type `{}`", field.value_type),
            "config.rule.items_ignored",
        ));
    }

    for (name, member) in &field.properties {
        let member_path = field_path.child_key("properties").child_key(name.as_str());
        check_field(rule, member, &member_path, findings);
    }
    if let Some(items) = &field.items {
        check_field(rule, items, &field_path.child_key("items"), findings);
    }
}

fn is_locatable_name(name: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(LOCATABLE_NAME_PATTERN).expect("valid regex"))
        .is_match(name)
}

fn config_finding(
    rule: &ExtensionRule,
    severity: Severity,
    path: StructuralPath,
    message: String,
    reference: &str,
) -> Finding {
    Finding::new(
        FindingKind::RuleConfig,
        severity,
        rule.name.as_str(),
        path,
        message,
    )
    .with_reference(reference)
}

fn summarize(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|finding| format!("{} ({})", finding.message, finding.path))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Replaces every `${NAME}` with the value of environment variable `NAME`.
fn expand_env_placeholders(raw: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some((before, after_open)) = rest.split_once("${") {
        expanded.push_str(before);
        let (name, after_close) = after_open.split_once('}').ok_or_else(|| {
            ConfigError::Parse("env placeholder `${` is never closed with `}`".to_string())
        })?;
        if name.is_empty() {
            return Err(ConfigError::Parse(
                "env placeholder `${}` names no variable".to_string(),
            ));
        }
        let value = std::env::var(name).map_err(|_| {
            ConfigError::Parse(format!(
                "environment variable `{name}` used by placeholder `${{{name}}}` is not set"
            ))
        })?;
        expanded.push_str(value.as_str());
        rest = after_close;
    }
    expanded.push_str(rest);
    Ok(expanded)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
