//! Error types for DOM operations and parsing.
//!
//! There are two taxonomies and they are kept apart on purpose:
//!
//! - [`JsonError`] is the sticky per-node flag. Any operation that is not
//!   applicable to a node, or fails for domain reasons, records one of these on
//!   the node it was invoked against.
//! - [`ParseErrorKind`] is the richer syntax diagnostic recorded by a single
//!   parse run. It is surfaced once through the parse callback (or as a
//!   [`ParseError`] from `Json::try_parse`) and collapses into
//!   [`JsonError::ParseError`] on the returned root.

use thiserror::Error;

/// Sticky error recorded on a [`Json`](crate::Json) node.
///
/// "No error" is represented by the absence of a value (`Option::None`).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonError {
    /// The operation is not applicable to the node's variant.
    #[error("operation not implemented for this json type")]
    NotImplemented,

    /// The key (or index) that was looked up does not exist.
    #[error("the requested key does not exist")]
    DoesNotExist,

    /// An object insert was attempted with an empty key.
    #[error("attribute keys of a json object must not be empty")]
    EmptyAttributeKey,

    /// The text this node was parsed from was malformed; the tree is partial.
    #[error("parsing failed, the returned json is incomplete")]
    ParseError,
}

/// Syntax error recorded by the parser.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    #[error("Expected ',' before the next attribute in Json::object.")]
    ExpectedCommaBeforeNextAttribute,

    #[error("Expected ',' before next item in the Json::array")]
    ExpectedCommaBeforeNextArrayItem,

    #[error("Expected next attribute but got ',' instead.")]
    ExpectedAttributeButGotComma,

    #[error("Expected string attribute key but could not find string or the string was empty.")]
    ExpectedStringAttributeKey,

    #[error("Expected closing quotes but got end of string instead.")]
    ExpectedClosingQuoteButGotEos,

    #[error("Expected beginning of new json type either, string, int, bool, array, null, float or object, but got something else.")]
    ExpectedBeginningOfValue,

    #[error("Expected colon after Json::object attribute key but got different character instead.")]
    ExpectedColonButGotDifferentCharacterInstead,

    #[error("Expected double or integer but got different character.")]
    ExpectedIntOrDouble,
}

/// A failed parse, returned by the explicit-result entry point.
///
/// Carries the byte offset of the parser cursor at the time of failure and a
/// window of the input around it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (at byte {position}, near `{context}`)")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
    pub context: String,
}

/// Convenience alias used by the explicit-result accessors.
pub type Result<T> = std::result::Result<T, JsonError>;
