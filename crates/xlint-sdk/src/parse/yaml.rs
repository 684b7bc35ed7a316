use super::ParseError;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use xlint_core::{DocumentNode, MappingNode, NonFiniteNumber, Scalar};

/// Parses YAML into the extension tree and its JSON copy for the schema check.
pub fn parse_yaml(input: &str) -> Result<(DocumentNode, Value), ParseError> {
    let yaml_value: YamlValue =
        serde_yaml::from_str(input).map_err(|err| ParseError::Yaml(err.to_string()))?;
    let tree = yaml_to_node(&yaml_value)?;
    let value = yaml_to_json(yaml_value)?;
    Ok((tree, value))
}

/// Builds the tree straight from YAML so `.inf` and `.nan` stay numbers.
fn yaml_to_node(value: &YamlValue) -> Result<DocumentNode, ParseError> {
    Ok(match value {
        YamlValue::Null => DocumentNode::Scalar(Scalar::Null),
        YamlValue::Bool(flag) => DocumentNode::Scalar(Scalar::Bool(*flag)),
        YamlValue::Number(number) => DocumentNode::Scalar(match convert_number(number) {
            Some(number) => Scalar::Number(number),
            None => Scalar::NonFinite(non_finite(number)?),
        }),
        YamlValue::String(text) => DocumentNode::Scalar(Scalar::String(text.clone())),
        YamlValue::Sequence(items) => DocumentNode::Sequence(
            items
                .iter()
                .map(yaml_to_node)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut node = MappingNode::new();
            for (key, item) in mapping {
                node.insert(mapping_key(key.clone())?, yaml_to_node(item)?);
            }
            DocumentNode::Mapping(node)
        }
        YamlValue::Tagged(tagged) => yaml_to_node(&tagged.value)?,
    })
}

/// Converts a YAML value into JSON, unwrapping tags and stringifying scalar keys.
/// Non-finite numbers have no JSON form and become `null`.
fn yaml_to_json(value: YamlValue) -> Result<Value, ParseError> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(flag) => Value::Bool(flag),
        YamlValue::Number(number) => convert_number(&number).map_or(Value::Null, Value::Number),
        YamlValue::String(text) => Value::String(text),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, item) in mapping {
                object.insert(mapping_key(key)?, yaml_to_json(item)?);
            }
            Value::Object(object)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn convert_number(number: &serde_yaml::Number) -> Option<Number> {
    if let Some(value) = number.as_i64() {
        return Some(Number::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Some(Number::from(value));
    }
    number.as_f64().and_then(Number::from_f64)
}

fn non_finite(number: &serde_yaml::Number) -> Result<NonFiniteNumber, ParseError> {
    number
        .as_f64()
        .and_then(NonFiniteNumber::from_f64)
        .ok_or_else(|| ParseError::Conversion(format!("number `{number}` has no JSON form")))
}

fn mapping_key(key: YamlValue) -> Result<String, ParseError> {
    match key {
        YamlValue::String(text) => Ok(text),
        YamlValue::Number(number) => Ok(number.to_string()),
        YamlValue::Bool(flag) => Ok(flag.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => mapping_key(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(ParseError::Conversion(
            "mapping keys must be scalars".to_string(),
        )),
    }
}
