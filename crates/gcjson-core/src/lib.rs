//! # gcjson-core
//!
//! A JSON DOM for environments where unwinding is not an option. Parsing,
//! lookups, and mutation never panic and never return early through the call
//! chain: a failure is recorded as a **sticky error** on the node the
//! operation was invoked against and drained explicitly by the caller.
//!
//! The parser accepts a superset of JSON (see [`parser`] for what is let
//! through), and the serializer writes compact text.
//!
//! ## Quick start
//!
//! ```rust
//! use gcjson_core::{Json, JsonType};
//!
//! let mut doc = Json::parse(r#"{"name":"Alice","scores":[95,87]}"#, |parser| {
//!     eprintln!("{}: {}", parser.error_string(), parser.error_surroundings(10));
//! });
//! assert!(!doc.has_error());
//! assert_eq!(doc.get("scores").size(), 2);
//!
//! // Mutate and serialize
//! doc.get("scores").push_back(77);
//! assert_eq!(doc.dump(), r#"{"name":"Alice","scores":[95,87,77]}"#);
//!
//! // Inapplicable operations are recorded, not thrown
//! doc.get("name").push_back(1).error(|err| eprintln!("{err}"));
//! assert_eq!(doc.get("name").kind(), JsonType::String);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the [`Json`] node type, accessors, and mutators
//! - [`parser`] — text → [`Json`]
//! - [`serializer`] — [`Json`] → text formatting rules
//! - [`error`] — sticky node errors and parser diagnostics
//! - [`types`] — the [`JsonType`] variant tag

pub mod error;
pub mod parser;
pub mod serializer;
pub mod types;
pub mod value;

pub use error::{JsonError, ParseError, ParseErrorKind, Result};
pub use parser::Parser;
pub use types::JsonType;
pub use value::{Json, JsonIndex};
