use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema, ValidationError};
use serde_json::Value;
use xlint_core::{Finding, FindingKind, Severity, StructuralPath, SCHEMA_FINDING_NAME};

use crate::registry::get_json_schema;
use crate::versions::{schema_id_for_document, SCHEMA_OPENAPI_3_0, SCHEMA_OPENAPI_3_1};

#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    #[error("unknown schema id: {0}")]
    UnknownSchema(String),
    #[error("embedded schema json parse failed for {id}: {source}")]
    InvalidEmbeddedJson {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("schema compile failed for {id}: {reason}")]
    Compile { id: String, reason: String },
}

/// A structural schema compiled once and reused for every document.
pub struct SchemaChecker {
    schema_id: &'static str,
    compiled: JSONSchema,
}

impl SchemaChecker {
    pub fn compile(schema_id: &str) -> Result<Self, SchemaLoadError> {
        let schema = get_json_schema(schema_id)
            .ok_or_else(|| SchemaLoadError::UnknownSchema(schema_id.to_string()))?;
        let schema_json: Value =
            serde_json::from_str(schema.json).map_err(|source| SchemaLoadError::InvalidEmbeddedJson {
                id: schema.id.to_string(),
                source,
            })?;
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_json)
            .map_err(|error| SchemaLoadError::Compile {
                id: schema.id.to_string(),
                reason: error.to_string(),
            })?;
        Ok(Self {
            schema_id: schema.id,
            compiled,
        })
    }

    pub fn schema_id(&self) -> &'static str {
        self.schema_id
    }

    /// Reports every violation in the order the validator emits them.
    pub fn check(&self, instance: &Value) -> Vec<Finding> {
        let mut findings = Vec::new();
        if let Err(errors) = self.compiled.validate(instance) {
            for error in errors {
                push_error_findings(&error, instance, &mut findings);
            }
        }
        findings
    }
}

impl std::fmt::Debug for SchemaChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaChecker")
            .field("schema_id", &self.schema_id)
            .finish_non_exhaustive()
    }
}

/// Both OpenAPI 3.x structural schemas, ready to check documents of either minor version.
#[derive(Debug)]
pub struct OpenApiSchemas {
    v3_0: SchemaChecker,
    v3_1: SchemaChecker,
}

impl OpenApiSchemas {
    pub fn load() -> Result<Self, SchemaLoadError> {
        Ok(Self {
            v3_0: SchemaChecker::compile(SCHEMA_OPENAPI_3_0)?,
            v3_1: SchemaChecker::compile(SCHEMA_OPENAPI_3_1)?,
        })
    }

    pub fn checker_for(&self, instance: &Value) -> &SchemaChecker {
        match schema_id_for_document(instance) {
            SCHEMA_OPENAPI_3_0 => &self.v3_0,
            _ => &self.v3_1,
        }
    }

    pub fn check_document(&self, instance: &Value) -> Vec<Finding> {
        self.checker_for(instance).check(instance)
    }
}

/// One-shot validation against a registered schema; compile failures come back as a
/// single finding instead of an error.
pub fn validate_schema_instance(schema_id: &str, instance: &Value) -> Vec<Finding> {
    match SchemaChecker::compile(schema_id) {
        Ok(checker) => checker.check(instance),
        Err(error) => vec![Finding::new(
            FindingKind::SchemaViolation,
            Severity::Error,
            SCHEMA_FINDING_NAME,
            StructuralPath::root(),
            error.to_string(),
        )
        .with_reference("schema_registry.load_failed")],
    }
}

fn push_error_findings(error: &ValidationError<'_>, instance: &Value, findings: &mut Vec<Finding>) {
    let path =
        StructuralPath::from_json_pointer_in(error.instance_path.to_string().as_str(), instance);
    let keyword = schema_keyword(error.schema_path.to_string().as_str());

    if let ValidationErrorKind::AdditionalProperties { unexpected } = &error.kind {
        for property in unexpected {
            findings.push(schema_finding(
                path.child_key(property.as_str()),
                format!("Property `{property}` is not allowed here"),
                keyword.as_str(),
            ));
        }
        return;
    }

    findings.push(schema_finding(path, error.to_string(), keyword.as_str()));
}

fn schema_finding(path: StructuralPath, message: String, keyword: &str) -> Finding {
    Finding::new(
        FindingKind::SchemaViolation,
        Severity::Error,
        SCHEMA_FINDING_NAME,
        path,
        message,
    )
    .with_reference(format!("json_schema.{keyword}"))
}

fn schema_keyword(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .find(|segment| !segment.is_empty() && !segment.bytes().all(|byte| byte.is_ascii_digit()))
        .unwrap_or("validation")
        .to_string()
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
