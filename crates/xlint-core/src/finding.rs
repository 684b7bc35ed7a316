use crate::structural_path::StructuralPath;
use serde::{Deserialize, Serialize};

/// `extension_name` carried by the single finding of an unparsable document.
pub const PARSE_ERROR_NAME: &str = "parse-error";
/// `extension_name` carried by findings of the structural schema layer.
pub const SCHEMA_FINDING_NAME: &str = "openapi-schema";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    ParseError,
    SchemaViolation,
    ExtensionMissing,
    ExtensionTypeMismatch,
    RuleConfig,
}

/// 1-based line and column inside the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    pub extension_name: String,
    pub path: StructuralPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Finding {
    pub fn new(
        kind: FindingKind,
        severity: Severity,
        extension_name: impl Into<String>,
        path: StructuralPath,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            extension_name: extension_name.into(),
            path,
            position: None,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_position(mut self, position: Option<SourcePosition>) -> Self {
        self.position = position;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Position to report when the resolver could not place the finding.
    pub fn position_or_start(&self) -> SourcePosition {
        self.position.unwrap_or_else(SourcePosition::start)
    }
}

/// Outcome of one validation call. Built from findings only, so `is_valid` always
/// equals `errors.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl ValidationResult {
    pub fn from_findings(findings: impl IntoIterator<Item = Finding>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            findings.into_iter().partition(Finding::is_error);
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn valid() -> Self {
        Self::from_findings(Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// Errors first, then warnings, each in emission order.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "finding_test.rs"]
mod tests;
