//! The DOM node type and its chainable accessors.
//!
//! Every [`Json`] owns its payload and carries one sticky error slot. The
//! chaining methods (`get`, `set`, `push_back`, `map_*`) never fail loudly:
//! an inapplicable or failed operation records a [`JsonError`] on the node it
//! was invoked against and hands back a still-usable node, so call sites read
//! as "operate, then drain":
//!
//! ```rust
//! use gcjson_core::{Json, JsonError};
//!
//! let mut doc = Json::parse(r#"{"name":"gc","tags":["a","b"]}"#, |_| {});
//! let mut name = String::new();
//! doc.get("name").map_string(|s| name = s.to_owned());
//! assert_eq!(name, "gc");
//!
//! let mut seen = None;
//! doc.get("missing").error(|err| seen = Some(err));
//! assert_eq!(seen, Some(JsonError::DoesNotExist));
//! assert!(!doc.has_error());
//! ```
//!
//! The `try_*`/`as_*` methods are the underlying primitives; they return an
//! explicit [`Result`] and leave the sticky slot alone.

use std::fmt;
use std::mem;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{JsonError, ParseError, Result};
use crate::parser::{Parser, DEFAULT_CONTEXT};
use crate::serializer;
use crate::types::{JsonType, Node};

/// A node of the JSON tree.
///
/// There is deliberately no `Clone`: a child has exactly one owner. Use
/// [`Json::take`] to move a child out of its slot.
#[derive(Debug, PartialEq)]
pub struct Json {
    pub(crate) node: Node,
    last_error: Option<JsonError>,
}

mod private {
    pub trait Sealed {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl Sealed for usize {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

/// A key or index usable with [`Json::get`] and [`Json::try_get`].
///
/// Implemented for `str`/`String` (object lookup) and `usize` (array lookup).
pub trait JsonIndex: private::Sealed {
    /// Position of the selected child inside `json`'s container.
    #[doc(hidden)]
    fn locate(&self, json: &Json) -> Result<usize>;
}

impl JsonIndex for str {
    fn locate(&self, json: &Json) -> Result<usize> {
        match &json.node {
            Node::Object(map) => map.get_index_of(self).ok_or(JsonError::DoesNotExist),
            _ => Err(JsonError::NotImplemented),
        }
    }
}

impl JsonIndex for String {
    fn locate(&self, json: &Json) -> Result<usize> {
        self.as_str().locate(json)
    }
}

impl JsonIndex for usize {
    fn locate(&self, json: &Json) -> Result<usize> {
        match &json.node {
            Node::Array(items) if *self < items.len() => Ok(*self),
            // Out of range is a miss, not undefined behaviour.
            Node::Array(_) => Err(JsonError::DoesNotExist),
            _ => Err(JsonError::NotImplemented),
        }
    }
}

impl<T: JsonIndex + ?Sized> JsonIndex for &T {
    fn locate(&self, json: &Json) -> Result<usize> {
        (**self).locate(json)
    }
}

impl Json {
    /// An empty object.
    pub fn new() -> Self {
        Self::object()
    }

    pub fn object() -> Self {
        Self::from_node(Node::Object(IndexMap::new()))
    }

    pub fn array() -> Self {
        Self::from_node(Node::Array(Vec::new()))
    }

    pub fn null() -> Self {
        Self::from_node(Node::Null)
    }

    pub(crate) fn from_node(node: Node) -> Self {
        Self {
            node,
            last_error: None,
        }
    }

    /// Parse `text` into a tree.
    ///
    /// Exactly one top-level value is parsed; anything after it is ignored.
    /// On a syntax error, `on_error` is invoked once with the parser (so the
    /// caller can read [`Parser::error_string`] and
    /// [`Parser::error_surroundings`]), and the returned root carries
    /// [`JsonError::ParseError`]. The partially built tree is still returned.
    ///
    /// Nesting depth is bounded only by the stack; see the [`parser`](crate::parser)
    /// module docs.
    pub fn parse<F>(text: &str, on_error: F) -> Json
    where
        F: FnOnce(&Parser<'_>),
    {
        let mut parser = Parser::new(text);
        let mut root = parser.parse();
        if parser.has_error() {
            on_error(&parser);
            root.last_error = Some(JsonError::ParseError);
        }
        root
    }

    /// Parse `text`, returning the syntax error instead of a partial tree.
    pub fn try_parse(text: &str) -> std::result::Result<Json, ParseError> {
        let mut parser = Parser::new(text);
        let root = parser.parse();
        match parser.failure(DEFAULT_CONTEXT) {
            Some(err) => Err(err),
            None => Ok(root),
        }
    }

    pub fn kind(&self) -> JsonType {
        self.node.kind()
    }

    /// Number of entries for containers, `1` for every primitive.
    pub fn size(&self) -> usize {
        match &self.node {
            Node::Object(map) => map.len(),
            Node::Array(items) => items.len(),
            _ => 1,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count_nodes(&self) -> usize {
        match &self.node {
            Node::Object(map) => 1 + map.values().map(Json::count_nodes).sum::<usize>(),
            Node::Array(items) => 1 + items.iter().map(Json::count_nodes).sum::<usize>(),
            _ => 1,
        }
    }

    /// Move this node out, leaving a `null` in its place.
    pub fn take(&mut self) -> Json {
        mem::replace(self, Json::null())
    }

    /// Serialize to compact JSON text. Never touches the sticky error.
    pub fn dump(&self) -> String {
        serializer::dump(self)
    }

    // ------------------------------------------------------------------
    // Explicit-result primitives
    // ------------------------------------------------------------------

    pub fn try_get<I: JsonIndex>(&self, index: I) -> Result<&Json> {
        let position = index.locate(self)?;
        Ok(match &self.node {
            Node::Object(map) => &map[position],
            Node::Array(items) => &items[position],
            _ => self,
        })
    }

    /// Insert `value` under `key`, replacing (and dropping) any previous child.
    pub fn try_set(&mut self, key: &str, value: Json) -> Result<()> {
        match &mut self.node {
            Node::Object(_) if key.is_empty() => Err(JsonError::EmptyAttributeKey),
            Node::Object(map) => {
                map.insert(key.to_owned(), value);
                Ok(())
            }
            _ => Err(JsonError::NotImplemented),
        }
    }

    pub fn try_push(&mut self, value: Json) -> Result<()> {
        match &mut self.node {
            Node::Array(items) => {
                items.push(value);
                Ok(())
            }
            _ => Err(JsonError::NotImplemented),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match &self.node {
            Node::String(s) => Ok(s),
            _ => Err(JsonError::NotImplemented),
        }
    }

    pub fn as_i64(&self) -> Result<i64> {
        match self.node {
            Node::Integer(n) => Ok(n),
            _ => Err(JsonError::NotImplemented),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        match self.node {
            Node::Float(f) => Ok(f),
            _ => Err(JsonError::NotImplemented),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self.node {
            Node::Boolean(b) => Ok(b),
            _ => Err(JsonError::NotImplemented),
        }
    }

    // ------------------------------------------------------------------
    // Chaining API (sticky error)
    // ------------------------------------------------------------------

    /// Child under `index`, or `self` with the sticky error set.
    ///
    /// A key on a non-object or an index on a non-array records
    /// [`JsonError::NotImplemented`]; a missing key or an out-of-range index
    /// records [`JsonError::DoesNotExist`]. With an error already pending,
    /// no lookup happens and `self` is returned unchanged.
    pub fn get<I: JsonIndex>(&mut self, index: I) -> &mut Json {
        if self.has_error() {
            return self;
        }
        match index.locate(self) {
            Ok(position) => self.child_at(position),
            Err(err) => {
                self.record(err);
                self
            }
        }
    }

    fn child_at(&mut self, position: usize) -> &mut Json {
        match self.node {
            Node::Object(ref mut map) => &mut map[position],
            Node::Array(ref mut items) => &mut items[position],
            _ => self,
        }
    }

    pub fn set<V: Into<Json>>(&mut self, key: &str, value: V) -> &mut Self {
        if let Err(err) = self.try_set(key, value.into()) {
            self.record(err);
        }
        self
    }

    pub fn push_back<V: Into<Json>>(&mut self, value: V) -> &mut Self {
        if let Err(err) = self.try_push(value.into()) {
            self.record(err);
        }
        self
    }

    /// Call `f` with the content if this is a String and no error is pending.
    ///
    /// The other scalar mappers follow the same rule for their variant.
    pub fn map_string<F: FnOnce(&str)>(&mut self, f: F) -> &mut Self {
        match self.as_str() {
            Ok(s) if self.last_error.is_none() => f(s),
            Ok(_) => {}
            Err(err) => self.record(err),
        }
        self
    }

    pub fn map_int<F: FnOnce(i64)>(&mut self, f: F) -> &mut Self {
        match self.as_i64() {
            Ok(n) if self.last_error.is_none() => f(n),
            Ok(_) => {}
            Err(err) => self.record(err),
        }
        self
    }

    pub fn map_float<F: FnOnce(f64)>(&mut self, f: F) -> &mut Self {
        match self.as_f64() {
            Ok(n) if self.last_error.is_none() => f(n),
            Ok(_) => {}
            Err(err) => self.record(err),
        }
        self
    }

    pub fn map_bool<F: FnOnce(bool)>(&mut self, f: F) -> &mut Self {
        match self.as_bool() {
            Ok(b) if self.last_error.is_none() => f(b),
            Ok(_) => {}
            Err(err) => self.record(err),
        }
        self
    }

    /// Call `f` on every element, in index order, unless an error is pending.
    pub fn map_array<F: FnMut(&mut Json)>(&mut self, mut f: F) -> &mut Self {
        let pending = self.last_error.is_some();
        match &mut self.node {
            Node::Array(items) => {
                if !pending {
                    for item in items.iter_mut() {
                        f(item);
                    }
                }
            }
            _ => self.record(JsonError::NotImplemented),
        }
        self
    }

    /// Call `f` on every `(key, child)` pair unless an error is pending.
    ///
    /// Iteration order is not part of the contract.
    pub fn map_object<F: FnMut(&str, &mut Json)>(&mut self, mut f: F) -> &mut Self {
        let pending = self.last_error.is_some();
        match &mut self.node {
            Node::Object(map) => {
                if !pending {
                    for (key, child) in map.iter_mut() {
                        f(key, child);
                    }
                }
            }
            _ => self.record(JsonError::NotImplemented),
        }
        self
    }

    /// Call `f` iff no error is pending.
    pub fn map<F: FnOnce()>(&mut self, f: F) -> &mut Self {
        if !self.has_error() {
            f();
        }
        self
    }

    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }

    pub fn last_error(&self) -> Option<JsonError> {
        self.last_error
    }

    /// If an error is pending, hand it to `f` and clear it.
    ///
    /// This is the only way the sticky slot is reset.
    pub fn error<F: FnOnce(JsonError)>(&mut self, f: F) -> &mut Self {
        if let Some(err) = self.last_error.take() {
            f(err);
        }
        self
    }

    fn record(&mut self, err: JsonError) {
        trace!(kind = %self.kind(), error = ?err, "recording sticky error");
        self.last_error = Some(err);
    }
}

impl Default for Json {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

impl FromStr for Json {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Json::try_parse(s)
    }
}

impl From<&str> for Json {
    fn from(s: &str) -> Self {
        Self::from_node(Node::String(s.to_owned()))
    }
}

impl From<String> for Json {
    fn from(s: String) -> Self {
        Self::from_node(Node::String(s))
    }
}

impl From<i64> for Json {
    fn from(n: i64) -> Self {
        Self::from_node(Node::Integer(n))
    }
}

impl From<i32> for Json {
    fn from(n: i32) -> Self {
        Self::from_node(Node::Integer(i64::from(n)))
    }
}

impl From<f64> for Json {
    fn from(f: f64) -> Self {
        Self::from_node(Node::Float(f))
    }
}

impl From<bool> for Json {
    fn from(b: bool) -> Self {
        Self::from_node(Node::Boolean(b))
    }
}
