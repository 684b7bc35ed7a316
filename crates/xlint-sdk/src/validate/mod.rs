//! Document validation entry points.
//!
//! A call parses the text, runs the structural schema, then the extension rules, and
//! returns one [`ValidationResult`]. An unparsable document short-circuits to a single
//! parse-error finding; nothing else runs.

mod validator;

pub use validator::Validator;

use crate::extensions::{attach_position, check_extensions_with_index};
use crate::locate::LineIndex;
use crate::parse::{parse_document_with_format, DocumentFormat};
use serde_json::Value;
use xlint_core::{ExtensionRule, Finding, ValidationResult};
use xlint_schema::{schema_id_for_document, validate_schema_instance};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    pub format: DocumentFormat,
    /// Run the OpenAPI structural schema before the extension rules.
    pub check_schema: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            format: DocumentFormat::Auto,
            check_schema: true,
        }
    }
}

/// Validates `text` against the OpenAPI schema and `rules`.
///
/// Compiles the schema on every call; hold a [`Validator`] to reuse it.
pub fn validate(text: &str, rules: &[ExtensionRule]) -> ValidationResult {
    validate_with_options(text, rules, ValidateOptions::default())
}

pub fn validate_with_options(
    text: &str,
    rules: &[ExtensionRule],
    options: ValidateOptions,
) -> ValidationResult {
    run_validation(text, rules, options, |value| {
        validate_schema_instance(schema_id_for_document(value), value)
    })
}

pub(crate) fn run_validation(
    text: &str,
    rules: &[ExtensionRule],
    options: ValidateOptions,
    check_schema: impl FnOnce(&Value) -> Vec<Finding>,
) -> ValidationResult {
    let parsed = match parse_document_with_format(text, options.format) {
        Ok(parsed) => parsed,
        Err(error) => {
            tracing::debug!(error = %error, "document did not parse");
            return ValidationResult::from_findings(vec![error.to_finding()]);
        }
    };

    let index = LineIndex::new(text);
    let mut findings = Vec::new();
    if options.check_schema {
        findings.extend(
            check_schema(parsed.value())
                .into_iter()
                .map(|finding| attach_position(&index, finding)),
        );
    }
    let schema_count = findings.len();
    findings.extend(check_extensions_with_index(&index, parsed.tree(), rules));

    tracing::debug!(
        schema_findings = schema_count,
        extension_findings = findings.len() - schema_count,
        rules = rules.len(),
        "validated document"
    );
    ValidationResult::from_findings(findings)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
