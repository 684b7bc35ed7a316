use crate::rules::EXTENSION_PREFIX;
use crate::structural_path::{PathSegment, StructuralPath};
use serde_json::{Number, Value};
use std::fmt::{Display, Formatter};

/// Parsed document tree. Carries no source positions; those are recovered from the
/// raw text by the location resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    Scalar(Scalar),
    Mapping(MappingNode),
    Sequence(Vec<DocumentNode>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    /// `.inf`, `-.inf` and `.nan`: valid YAML numbers that JSON cannot carry.
    NonFinite(NonFiniteNumber),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonFiniteNumber {
    Infinity,
    NegativeInfinity,
    NaN,
}

impl NonFiniteNumber {
    /// `None` for finite values.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(NonFiniteNumber::NaN)
        } else if value == f64::INFINITY {
            Some(NonFiniteNumber::Infinity)
        } else if value == f64::NEG_INFINITY {
            Some(NonFiniteNumber::NegativeInfinity)
        } else {
            None
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            NonFiniteNumber::Infinity => f64::INFINITY,
            NonFiniteNumber::NegativeInfinity => f64::NEG_INFINITY,
            NonFiniteNumber::NaN => f64::NAN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Boolean,
    Number,
    String,
    Object,
    Array,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Boolean => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Object => "object",
            NodeKind::Array => "array",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping with standard fields and `x-` extension fields kept in separate buckets.
/// Both buckets keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingNode {
    fields: Vec<(String, DocumentNode)>,
    extensions: Vec<(String, DocumentNode)>,
}

impl MappingNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`. Replacement keeps the original slot.
    pub fn insert(&mut self, key: impl Into<String>, value: DocumentNode) {
        let key = key.into();
        let bucket = if is_extension_key(&key) {
            &mut self.extensions
        } else {
            &mut self.fields
        };
        match bucket.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => bucket.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&DocumentNode> {
        let bucket = if is_extension_key(key) {
            &self.extensions
        } else {
            &self.fields
        };
        bucket
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &DocumentNode)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn extensions(&self) -> impl Iterator<Item = (&str, &DocumentNode)> {
        self.extensions.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.extensions.is_empty()
    }
}

impl DocumentNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            DocumentNode::Scalar(Scalar::Null) => NodeKind::Null,
            DocumentNode::Scalar(Scalar::Bool(_)) => NodeKind::Boolean,
            DocumentNode::Scalar(Scalar::Number(_) | Scalar::NonFinite(_)) => NodeKind::Number,
            DocumentNode::Scalar(Scalar::String(_)) => NodeKind::String,
            DocumentNode::Mapping(_) => NodeKind::Object,
            DocumentNode::Sequence(_) => NodeKind::Array,
        }
    }

    pub fn as_mapping(&self) -> Option<&MappingNode> {
        match self {
            DocumentNode::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DocumentNode]> {
        match self {
            DocumentNode::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocumentNode::Scalar(Scalar::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Field lookup on a mapping node; `None` for every other node kind.
    pub fn get(&self, key: &str) -> Option<&DocumentNode> {
        self.as_mapping().and_then(|mapping| mapping.get(key))
    }

    pub fn at(&self, path: &StructuralPath) -> Option<&DocumentNode> {
        let mut current = self;
        for segment in path.segments() {
            current = match segment {
                PathSegment::Key(key) => current.get(key)?,
                PathSegment::Index(index) => current.as_sequence()?.get(*index)?,
            };
        }
        Some(current)
    }
}

impl From<&Value> for DocumentNode {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => DocumentNode::Scalar(Scalar::Null),
            Value::Bool(flag) => DocumentNode::Scalar(Scalar::Bool(*flag)),
            Value::Number(number) => DocumentNode::Scalar(Scalar::Number(number.clone())),
            Value::String(text) => DocumentNode::Scalar(Scalar::String(text.clone())),
            Value::Array(items) => DocumentNode::Sequence(items.iter().map(Self::from).collect()),
            Value::Object(object) => {
                let mut mapping = MappingNode::new();
                for (key, item) in object {
                    mapping.insert(key.clone(), Self::from(item));
                }
                DocumentNode::Mapping(mapping)
            }
        }
    }
}

pub fn is_extension_key(key: &str) -> bool {
    key.starts_with(EXTENSION_PREFIX)
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
