use serde_json::Value;

pub const SCHEMA_OPENAPI_3_0: &str = "openapi/3.0";
pub const SCHEMA_OPENAPI_3_1: &str = "openapi/3.1";

/// Picks the structural schema for a document from its `openapi` field.
///
/// Only `3.0.*` selects the 3.0 schema. Everything else, including a missing or
/// non-string field, is checked against 3.1, whose `openapi` pattern then reports
/// the unsupported version.
pub fn schema_id_for_document(instance: &Value) -> &'static str {
    let version = instance.get("openapi").and_then(Value::as_str);
    match version {
        Some(version) if version.starts_with("3.0.") => SCHEMA_OPENAPI_3_0,
        _ => SCHEMA_OPENAPI_3_1,
    }
}
