use crate::document::NodeKind;
use crate::finding::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

pub const EXTENSION_PREFIX: &str = "x-";

/// Structural context a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionLocation {
    Root,
    Servers,
    Tags,
    Parameters,
    #[serde(alias = "request_body")]
    RequestBody,
}

impl ExtensionLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtensionLocation::Root => "root",
            ExtensionLocation::Servers => "servers",
            ExtensionLocation::Tags => "tags",
            ExtensionLocation::Parameters => "parameters",
            ExtensionLocation::RequestBody => "requestBody",
        }
    }
}

impl Display for ExtensionLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared value type. Names outside the known set are kept verbatim and never
/// accept any value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExtensionValueType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Unknown(String),
}

impl ExtensionValueType {
    pub fn as_str(&self) -> &str {
        match self {
            ExtensionValueType::String => "string",
            ExtensionValueType::Number => "number",
            ExtensionValueType::Boolean => "boolean",
            ExtensionValueType::Object => "object",
            ExtensionValueType::Array => "array",
            ExtensionValueType::Unknown(name) => name.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ExtensionValueType::Unknown(_))
    }

    pub fn accepts(&self, kind: NodeKind) -> bool {
        matches!(
            (self, kind),
            (ExtensionValueType::String, NodeKind::String)
                | (ExtensionValueType::Number, NodeKind::Number)
                | (ExtensionValueType::Boolean, NodeKind::Boolean)
                | (ExtensionValueType::Object, NodeKind::Object)
                | (ExtensionValueType::Array, NodeKind::Array)
        )
    }
}

impl From<String> for ExtensionValueType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "string" => ExtensionValueType::String,
            "number" => ExtensionValueType::Number,
            "boolean" => ExtensionValueType::Boolean,
            "object" => ExtensionValueType::Object,
            "array" => ExtensionValueType::Array,
            _ => ExtensionValueType::Unknown(value),
        }
    }
}

impl From<&str> for ExtensionValueType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ExtensionValueType> for String {
    fn from(value: ExtensionValueType) -> Self {
        value.as_str().to_string()
    }
}

impl Display for ExtensionValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type requirement for an extension value or one of its nested members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionField {
    #[serde(rename = "type", alias = "valueType")]
    pub value_type: ExtensionValueType,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ExtensionField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ExtensionField>>,
}

impl ExtensionField {
    pub fn new(value_type: impl Into<ExtensionValueType>) -> Self {
        Self {
            value_type: value_type.into(),
            required: true,
            description: None,
            properties: BTreeMap::new(),
            items: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, field: ExtensionField) -> Self {
        self.properties.insert(name.into(), field);
        self
    }

    pub fn with_items(mut self, field: ExtensionField) -> Self {
        self.items = Some(Box::new(field));
        self
    }
}

/// One declared custom extension requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRule {
    pub name: String,
    pub location: ExtensionLocation,
    #[serde(flatten)]
    pub field: ExtensionField,
    #[serde(default = "default_severity")]
    pub severity: Severity,
}

impl ExtensionRule {
    pub fn new(
        name: impl Into<String>,
        location: ExtensionLocation,
        value_type: impl Into<ExtensionValueType>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            field: ExtensionField::new(value_type),
            severity: Severity::Error,
        }
    }

    pub fn optional(mut self) -> Self {
        self.field.required = false;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.field.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, field: ExtensionField) -> Self {
        self.field.properties.insert(name.into(), field);
        self
    }

    pub fn with_items(mut self, field: ExtensionField) -> Self {
        self.field.items = Some(Box::new(field));
        self
    }

    pub fn value_type(&self) -> &ExtensionValueType {
        &self.field.value_type
    }

    pub fn required(&self) -> bool {
        self.field.required
    }

    pub fn has_extension_prefix(&self) -> bool {
        self.name.starts_with(EXTENSION_PREFIX)
    }
}

fn default_required() -> bool {
    true
}

fn default_severity() -> Severity {
    Severity::Error
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
