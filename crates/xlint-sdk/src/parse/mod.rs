mod json;
mod yaml;

use serde_json::Value;
use xlint_core::{
    DocumentNode, Finding, FindingKind, NodeKind, Severity, StructuralPath, PARSE_ERROR_NAME,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Auto,
    Json,
    Yaml,
}

/// A parsed document in the two shapes the checkers consume: the tagged tree for the
/// extension rules and plain JSON for the structural schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    tree: DocumentNode,
    value: Value,
}

impl ParsedDocument {
    pub fn tree(&self) -> &DocumentNode {
        &self.tree
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("yaml parse failed: {0}")]
    Yaml(String),
    #[error("json parse failed: {0}")]
    Json(String),
    #[error("yaml-to-json conversion failed: {0}")]
    Conversion(String),
    #[error("document is empty")]
    Empty,
    #[error("document root must be a mapping, found {0}")]
    NotAMapping(NodeKind),
}

impl ParseError {
    pub fn reference(&self) -> &'static str {
        match self {
            ParseError::Yaml(_) => "yaml.parse_error",
            ParseError::Json(_) => "json.parse_error",
            ParseError::Conversion(_) => "yaml.to_json_error",
            ParseError::Empty => "parse.empty_document",
            ParseError::NotAMapping(_) => "parse.root_not_mapping",
        }
    }

    /// The single, position-less finding that stands for an unparsable document.
    pub fn to_finding(&self) -> Finding {
        Finding::new(
            FindingKind::ParseError,
            Severity::Error,
            PARSE_ERROR_NAME,
            StructuralPath::root(),
            self.to_string(),
        )
        .with_reference(self.reference())
    }
}

pub fn parse_document(input: &str) -> Result<ParsedDocument, ParseError> {
    parse_document_with_format(input, DocumentFormat::Auto)
}

pub fn parse_document_with_format(
    input: &str,
    format: DocumentFormat,
) -> Result<ParsedDocument, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let use_json = match format {
        DocumentFormat::Auto => looks_like_json(input),
        DocumentFormat::Json => true,
        DocumentFormat::Yaml => false,
    };
    let (tree, value) = if use_json {
        let value = json::parse_json(input)?;
        (DocumentNode::from(&value), value)
    } else {
        yaml::parse_yaml(input)?
    };

    match tree.kind() {
        NodeKind::Object => Ok(ParsedDocument { tree, value }),
        kind => Err(ParseError::NotAMapping(kind)),
    }
}

fn looks_like_json(input: &str) -> bool {
    let trimmed = input.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
