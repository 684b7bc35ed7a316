use crate::embedded::EmbeddedSchema;
use crate::versions::{SCHEMA_OPENAPI_3_0, SCHEMA_OPENAPI_3_1};

const OPENAPI_3_0_SCHEMA: &str = include_str!("../schemas/openapi-3.0.schema.json");
const OPENAPI_3_1_SCHEMA: &str = include_str!("../schemas/openapi-3.1.schema.json");

pub fn get_json_schema(schema_id: &str) -> Option<EmbeddedSchema> {
    match schema_id {
        SCHEMA_OPENAPI_3_0 => Some(EmbeddedSchema {
            id: SCHEMA_OPENAPI_3_0,
            json: OPENAPI_3_0_SCHEMA,
        }),
        SCHEMA_OPENAPI_3_1 => Some(EmbeddedSchema {
            id: SCHEMA_OPENAPI_3_1,
            json: OPENAPI_3_1_SCHEMA,
        }),
        _ => None,
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
