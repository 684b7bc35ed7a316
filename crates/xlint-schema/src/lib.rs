pub mod embedded;
pub mod registry;
pub mod validate;
pub mod versions;

pub use embedded::EmbeddedSchema;
pub use registry::get_json_schema;
pub use validate::{validate_schema_instance, OpenApiSchemas, SchemaChecker, SchemaLoadError};
pub use versions::{schema_id_for_document, SCHEMA_OPENAPI_3_0, SCHEMA_OPENAPI_3_1};
