use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Key(_) => None,
            PathSegment::Index(index) => Some(*index),
        }
    }
}

/// Ordered keys and indices locating a value inside a parsed document.
///
/// Rendered as `/`-joined segments (`servers/0/x-env`). Keys that contain `/` or `~`
/// are escaped the way JSON Pointer escapes them, so `paths/~1users/get` names the
/// `get` operation of the `/users` path item.
///
/// The string form does not mark which segments are indices. Parsing reads every
/// all-digit segment as an index, so a path through a numeric mapping key
/// (`responses/200/description`) renders but does not round-trip through `FromStr` or
/// serde.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StructuralPath {
    segments: Vec<PathSegment>,
}

impl StructuralPath {
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Converts a JSON Pointer (`/info/contact`, `/servers/0`) into a path.
    ///
    /// Without the document, all-digit segments are read as indices, so a numeric
    /// mapping key such as the `200` under `responses` comes back as `Index(200)`. Use
    /// [`StructuralPath::from_json_pointer_in`] when the document is at hand.
    pub fn from_json_pointer(pointer: &str) -> Self {
        Self::from_segments(pointer_segments(pointer).map(decode_segment).collect())
    }

    /// Converts a JSON Pointer, walking `instance` so an all-digit segment is an index
    /// only where the value it applies to is an array.
    pub fn from_json_pointer_in(pointer: &str, instance: &Value) -> Self {
        let mut current = Some(instance);
        let mut segments = Vec::new();
        for raw_segment in pointer_segments(pointer) {
            let segment = match current {
                Some(Value::Array(items)) => match raw_segment.parse::<usize>() {
                    Ok(index) => {
                        current = items.get(index);
                        PathSegment::Index(index)
                    }
                    Err(_) => {
                        current = None;
                        decode_segment(raw_segment)
                    }
                },
                Some(Value::Object(object)) => {
                    let key = unescape(raw_segment);
                    current = object.get(key.as_str());
                    PathSegment::Key(key)
                }
                _ => {
                    current = None;
                    decode_segment(raw_segment)
                }
            };
            segments.push(segment);
        }
        Self::from_segments(segments)
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.push_key(key);
        child
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut child = self.clone();
        child.push_index(index);
        child
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self::from_segments(rest.to_vec()))
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for StructuralPath {
    fn default() -> Self {
        Self::root()
    }
}

impl FromIterator<PathSegment> for StructuralPath {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        Self::from_segments(iter.into_iter().collect())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StructuralPathParseError {
    #[error("structural path contains an empty segment at position {0}")]
    EmptySegment(usize),
    #[error("invalid escape sequence in segment `{0}`")]
    InvalidEscape(String),
}

impl std::str::FromStr for StructuralPath {
    type Err = StructuralPathParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.strip_prefix('/').unwrap_or(input);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for (position, raw_segment) in trimmed.split('/').enumerate() {
            if raw_segment.is_empty() {
                return Err(StructuralPathParseError::EmptySegment(position));
            }
            if has_dangling_escape(raw_segment) {
                return Err(StructuralPathParseError::InvalidEscape(raw_segment.to_string()));
            }
            segments.push(decode_segment(raw_segment));
        }
        Ok(Self::from_segments(segments))
    }
}

impl Display for StructuralPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 {
                write!(f, "/")?;
            }
            match segment {
                PathSegment::Key(key) => write!(f, "{}", key.replace('~', "~0").replace('/', "~1"))?,
                PathSegment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

impl From<StructuralPath> for String {
    fn from(path: StructuralPath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for StructuralPath {
    type Error = StructuralPathParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn pointer_segments(pointer: &str) -> impl Iterator<Item = &str> {
    pointer
        .trim_start_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
}

fn decode_segment(raw_segment: &str) -> PathSegment {
    if !raw_segment.is_empty() && raw_segment.bytes().all(|byte| byte.is_ascii_digit()) {
        if let Ok(index) = raw_segment.parse::<usize>() {
            return PathSegment::Index(index);
        }
    }
    PathSegment::Key(unescape(raw_segment))
}

fn unescape(raw_segment: &str) -> String {
    raw_segment.replace("~1", "/").replace("~0", "~")
}

fn has_dangling_escape(raw_segment: &str) -> bool {
    let bytes = raw_segment.as_bytes();
    bytes.iter().enumerate().any(|(position, byte)| {
        *byte == b'~' && !matches!(bytes.get(position + 1), Some(b'0') | Some(b'1'))
    })
}

#[cfg(test)]
#[path = "structural_path_test.rs"]
mod tests;
