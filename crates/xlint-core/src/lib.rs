pub mod document;
pub mod finding;
pub mod rules;
pub mod structural_path;

pub use document::{
    is_extension_key, DocumentNode, MappingNode, NodeKind, NonFiniteNumber, Scalar,
};
pub use finding::{
    Finding, FindingKind, Severity, SourcePosition, ValidationResult, PARSE_ERROR_NAME,
    SCHEMA_FINDING_NAME,
};
pub use rules::{
    ExtensionField, ExtensionLocation, ExtensionRule, ExtensionValueType, EXTENSION_PREFIX,
};
pub use structural_path::{PathSegment, StructuralPath, StructuralPathParseError};
