use super::ParseError;
use serde_json::Value;

pub fn parse_json(input: &str) -> Result<Value, ParseError> {
    serde_json::from_str::<Value>(input).map_err(|err| ParseError::Json(err.to_string()))
}
