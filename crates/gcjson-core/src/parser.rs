//! Recursive-descent parser: text → [`Json`] tree.
//!
//! There is no tokenizer. The parser walks the input byte by byte with a single
//! cursor and dispatches on the first non-whitespace byte of each value to one
//! sub-parser per construct. Every sub-parser leaves the cursor on the first
//! byte it did not consume.
//!
//! # Key design decisions
//!
//! - **Superset grammar**: the parser accepts all well-formed JSON plus some
//!   malformed input. Trailing bytes after the top-level value are never read,
//!   an unterminated object or array at end of input is closed implicitly, and
//!   duplicate keys resolve to the last value written.
//! - **One error slot**: a syntax error stops the enclosing containers at once
//!   and the partial tree is still returned. A later error overwrites an
//!   earlier one, so the outermost construct that noticed the problem wins
//!   (e.g. a malformed key is reported as `ExpectedStringAttributeKey`).
//! - **Whitespace** is space, tab and newline only. Carriage return is not
//!   whitespace.
//! - **Strings** end at the first `"` not directly preceded by `\`. Escape
//!   sequences are not decoded; the content is kept verbatim.
//! - **Nesting depth** is not limited. Each nested object or array costs one
//!   recursion level, so deeply nested input can overflow the stack and abort
//!   the process. Callers parsing untrusted input must bound its size or
//!   nesting themselves.

use tracing::{debug, trace};

use crate::error::{ParseError, ParseErrorKind};
use crate::value::Json;

/// Bytes of context on each side of the cursor used for [`ParseError::context`].
pub const DEFAULT_CONTEXT: usize = 10;

/// Parser state for one run over an immutable input.
pub struct Parser<'a> {
    text: &'a str,
    pos: usize,
    error: Option<ParseErrorKind>,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            error: None,
        }
    }

    /// Parse one value starting at the cursor.
    pub fn parse(&mut self) -> Json {
        let value = self.parse_value();
        if let Some(kind) = self.error {
            debug!(error = ?kind, position = self.pos, "parse failed");
        }
        value
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn error(&self) -> Option<ParseErrorKind> {
        self.error
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Human-readable message for the recorded error.
    pub fn error_string(&self) -> String {
        match self.error {
            Some(kind) => kind.to_string(),
            None => "No error.".to_string(),
        }
    }

    /// Up to `distance` bytes of input on each side of the cursor.
    ///
    /// The window is clamped to the input and widened to the nearest UTF-8
    /// character boundaries.
    pub fn error_surroundings(&self, distance: usize) -> &'a str {
        let text = self.text;
        let mut start = self.pos.saturating_sub(distance);
        let mut end = self.pos.saturating_add(distance).min(text.len());
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        while !text.is_char_boundary(end) {
            end += 1;
        }
        &text[start..end]
    }

    /// The recorded error as a [`ParseError`], if any.
    pub fn failure(&self, distance: usize) -> Option<ParseError> {
        self.error.map(|kind| ParseError {
            kind,
            position: self.pos,
            context: self.error_surroundings(distance).to_string(),
        })
    }

    fn fail(&mut self, kind: ParseErrorKind) {
        trace!(error = ?kind, position = self.pos, "syntax error");
        self.error = Some(kind);
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn rest(&self) -> &'a [u8] {
        let text = self.text;
        text.as_bytes().get(self.pos..).unwrap_or_default()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n')) {
            self.pos += 1;
        }
    }

    /// Dispatch on the next non-whitespace byte.
    fn parse_value(&mut self) -> Json {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string(),
            Some(b't' | b'f') => self.parse_boolean(),
            Some(b'n') => self.parse_null(),
            Some(b'0'..=b'9' | b'-') => self.parse_number(),
            _ => {
                self.fail(ParseErrorKind::ExpectedBeginningOfValue);
                Json::new()
            }
        }
    }

    /// `{` already under the cursor.
    ///
    /// `expect_comma` is set once a full `key: value` pair has been read and
    /// cleared by the comma that follows it.
    fn parse_object(&mut self) -> Json {
        self.pos += 1;
        let mut object = Json::object();
        let mut key: Option<String> = None;
        let mut expect_comma = false;

        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\n' => self.pos += 1,
                b'}' => {
                    self.pos += 1;
                    break;
                }
                b',' => {
                    if !expect_comma {
                        self.fail(ParseErrorKind::ExpectedAttributeButGotComma);
                        break;
                    }
                    expect_comma = false;
                    self.pos += 1;
                }
                _ => match key.take() {
                    None => {
                        if expect_comma {
                            self.fail(ParseErrorKind::ExpectedCommaBeforeNextAttribute);
                            break;
                        }
                        let parsed = self.parse_value();
                        match parsed.as_str() {
                            Ok(name) if !name.is_empty() => key = Some(name.to_owned()),
                            _ => self.fail(ParseErrorKind::ExpectedStringAttributeKey),
                        }
                    }
                    Some(name) => {
                        if byte != b':' {
                            self.fail(ParseErrorKind::ExpectedColonButGotDifferentCharacterInstead);
                            break;
                        }
                        self.pos += 1;
                        let value = self.parse_value();
                        object.set(&name, value);
                        expect_comma = true;
                    }
                },
            }

            if self.error.is_some() {
                break;
            }
        }
        object
    }

    /// `[` already under the cursor. Same comma discipline as objects.
    fn parse_array(&mut self) -> Json {
        self.pos += 1;
        let mut array = Json::array();
        let mut expect_comma = false;

        loop {
            self.skip_whitespace();
            let Some(byte) = self.peek() else {
                break;
            };
            match byte {
                b']' => {
                    self.pos += 1;
                    break;
                }
                b',' => {
                    if !expect_comma {
                        self.fail(ParseErrorKind::ExpectedCommaBeforeNextArrayItem);
                        break;
                    }
                    expect_comma = false;
                    self.pos += 1;
                }
                _ => {
                    if expect_comma {
                        self.fail(ParseErrorKind::ExpectedCommaBeforeNextArrayItem);
                        break;
                    }
                    let item = self.parse_value();
                    array.push_back(item);
                    expect_comma = true;
                }
            }

            if self.error.is_some() {
                break;
            }
        }
        array
    }

    /// `"` already under the cursor.
    fn parse_string(&mut self) -> Json {
        self.pos += 1;
        let start = self.pos;
        let text = self.text;
        let bytes = text.as_bytes();

        while let Some(&byte) = bytes.get(self.pos) {
            if byte == b'"' && bytes[self.pos - 1] != b'\\' {
                let content = &text[start..self.pos];
                self.pos += 1;
                return Json::from(content);
            }
            self.pos += 1;
        }

        self.fail(ParseErrorKind::ExpectedClosingQuoteButGotEos);
        Json::from(&text[start..])
    }

    /// Scan `-`, `.` and digits, then convert the longest valid prefix.
    ///
    /// A `.` anywhere in the scanned run makes the value a float. Integers
    /// that do not fit saturate at `i64::MIN`/`i64::MAX`.
    fn parse_number(&mut self) -> Json {
        let start = self.pos;
        let mut is_float = false;
        while let Some(byte) = self.peek() {
            match byte {
                b'.' => is_float = true,
                b'-' | b'0'..=b'9' => {}
                _ => break,
            }
            self.pos += 1;
        }

        let token = &self.text[start..self.pos];
        let converted = if is_float {
            leading_float(token).map(Json::from)
        } else {
            leading_integer(token).map(Json::from)
        };

        converted.unwrap_or_else(|| {
            self.fail(ParseErrorKind::ExpectedIntOrDouble);
            if is_float {
                Json::from(0.0)
            } else {
                Json::from(0_i64)
            }
        })
    }

    fn parse_boolean(&mut self) -> Json {
        let rest = self.rest();
        if rest.starts_with(b"true") {
            self.pos += 4;
            Json::from(true)
        } else if rest.starts_with(b"false") {
            self.pos += 5;
            Json::from(false)
        } else {
            self.fail(ParseErrorKind::ExpectedBeginningOfValue);
            Json::from(false)
        }
    }

    fn parse_null(&mut self) -> Json {
        if self.rest().starts_with(b"null") {
            self.pos += 4;
        } else {
            self.fail(ParseErrorKind::ExpectedBeginningOfValue);
        }
        Json::null()
    }
}

/// `-?[0-9]+` at the start of `token`.
fn leading_integer(token: &str) -> Option<i64> {
    let negative = token.starts_with('-');
    let sign_len = usize::from(negative);
    let digits = token[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let literal = &token[..sign_len + digits];
    Some(literal.parse::<i64>().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

fn leading_float(token: &str) -> Option<f64> {
    (1..=token.len())
        .rev()
        .find_map(|end| token[..end].parse::<f64>().ok())
}
