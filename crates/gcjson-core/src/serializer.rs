//! Compact serializer: [`Json`] tree → text.
//!
//! Output has no inserted whitespace. The per-variant rules are part of the
//! compatibility contract:
//!
//! - Objects as `{"k":v,...}` in the map's iteration order, `{}` when empty
//! - Arrays as `[v,...]`, `[]` when empty
//! - Strings wrapped in `"` with **no escaping**; content that contains `"` or
//!   control characters does not produce valid JSON
//! - Floats in fixed notation with exactly six fractional digits (`2.500000`)
//!
//! # Example
//! ```
//! use gcjson_core::Json;
//! let mut doc = Json::new();
//! doc.set("pi", 3.25).set("ok", true);
//! assert_eq!(doc.dump(), r#"{"pi":3.250000,"ok":true}"#);
//! ```

use crate::types::Node;
use crate::value::Json;

pub(crate) fn dump(value: &Json) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Json, out: &mut String) {
    match &value.node {
        Node::Object(map) => {
            out.push('{');
            for (i, (key, child)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('"');
                out.push_str(key);
                out.push_str("\":");
                write_value(child, out);
            }
            out.push('}');
        }
        Node::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Node::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Node::Integer(n) => {
            out.push_str(&n.to_string());
        }
        Node::Float(f) => write_float(*f, out),
        Node::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Node::Null => out.push_str("null"),
    }
}

/// `%f`-style fixed notation.
fn write_float(f: f64, out: &mut String) {
    if f.is_nan() {
        out.push_str(if f.is_sign_negative() { "-nan" } else { "nan" });
    } else if f.is_infinite() {
        out.push_str(if f < 0.0 { "-inf" } else { "inf" });
    } else {
        out.push_str(&format!("{f:.6}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_text(f: f64) -> String {
        let mut out = String::new();
        write_float(f, &mut out);
        out
    }

    #[test]
    fn floats_use_six_fraction_digits() {
        assert_eq!(float_text(2.5), "2.500000");
        assert_eq!(float_text(-0.125), "-0.125000");
        assert_eq!(float_text(1.0 / 3.0), "0.333333");
        assert_eq!(float_text(1e20), "100000000000000000000.000000");
    }

    #[test]
    fn non_finite_floats_match_printf() {
        assert_eq!(float_text(f64::INFINITY), "inf");
        assert_eq!(float_text(f64::NEG_INFINITY), "-inf");
        assert_eq!(float_text(f64::NAN), "nan");
    }

    #[test]
    fn strings_are_not_escaped() {
        let value = Json::from("say \"hi\"\n");
        assert_eq!(value.dump(), "\"say \"hi\"\n\"");
    }
}
