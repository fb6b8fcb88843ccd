//! Node payloads and the variant tag.

use std::fmt;

use indexmap::IndexMap;

use crate::value::Json;

/// The seven kinds of node a [`Json`] tree is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Object,
    Array,
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl JsonType {
    /// Lowercase name of the variant, e.g. `"object"`.
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Float => "float",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a node. Containers exclusively own their children.
///
/// Objects keep insertion order (`IndexMap`), which callers must still treat
/// as unspecified; it only makes output deterministic.
#[derive(Debug, PartialEq)]
pub(crate) enum Node {
    Object(IndexMap<String, Json>),
    Array(Vec<Json>),
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl Node {
    pub(crate) fn kind(&self) -> JsonType {
        match self {
            Node::Object(_) => JsonType::Object,
            Node::Array(_) => JsonType::Array,
            Node::String(_) => JsonType::String,
            Node::Integer(_) => JsonType::Integer,
            Node::Float(_) => JsonType::Float,
            Node::Boolean(_) => JsonType::Boolean,
            Node::Null => JsonType::Null,
        }
    }
}
