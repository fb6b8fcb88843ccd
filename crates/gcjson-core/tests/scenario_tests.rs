//! End-to-end scenarios: parse, inspect, mutate, and serialize small documents
//! the way a caller would, checking both the tree and the sticky error state.

use gcjson_core::{Json, JsonError, JsonType};

/// Parse `text`, recording whether the error callback fired.
fn parse_tracking(text: &str) -> (Json, bool) {
    let mut set_err = false;
    let value = Json::parse(text, |_| set_err = true);
    (value, set_err)
}

#[test]
fn basic_string_member() {
    let (mut js, set_err) = parse_tracking(r#"{"key":"hallo"}"#);
    assert!(!set_err);
    assert_eq!(js.kind(), JsonType::Object);
    assert_eq!(js.size(), 1);
    assert_eq!(js.get("key").kind(), JsonType::String);

    let mut val = String::new();
    js.get("key").map_string(|v| val = v.to_owned());
    assert_eq!(val, "hallo");
}

#[test]
fn integer_member() {
    let (mut js, _) = parse_tracking(r#"{"key":100}"#);
    assert_eq!(js.get("key").kind(), JsonType::Integer);

    let mut x = 0;
    js.get("key").map_int(|y| x = y);
    assert_eq!(x, 100);
}

#[test]
fn malformed_trailing_comma_fires_callback() {
    let (js, set_err) = parse_tracking(r#"{"key":100,,}"#);
    assert!(set_err);
    assert_eq!(js.last_error(), Some(JsonError::ParseError));
}

#[test]
fn multi_level_member() {
    let (mut js, set_err) = parse_tracking(r#"{"key": {"tor":"hallo"}}"#);
    assert!(!set_err);
    assert_eq!(js.get("key").kind(), JsonType::Object);
    assert_eq!(js.get("key").get("tor").kind(), JsonType::String);

    let mut val = String::new();
    js.get("key").get("tor").map_string(|v| val = v.to_owned());
    assert_eq!(val, "hallo");
}

#[test]
fn int_and_float_mixing() {
    let (mut js, set_err) = parse_tracking(r#"{"key": 10, "loko": 2.5}"#);
    assert!(!set_err);
    assert_eq!(js.get("key").kind(), JsonType::Integer);
    assert_eq!(js.get("loko").kind(), JsonType::Float);
}

#[test]
fn empty_array() {
    let (js, set_err) = parse_tracking("[]");
    assert!(!set_err);
    assert_eq!(js.kind(), JsonType::Array);
    assert_eq!(js.size(), 0);
    assert_eq!(js.dump(), "[]");
}

#[test]
fn empty_object_add_attribute() {
    let (mut js, set_err) = parse_tracking("{}");
    assert!(!set_err);
    assert_eq!(js.size(), 0);
    js.set("Hello", "World");
    assert_eq!(js.kind(), JsonType::Object);
    assert_eq!(js.size(), 1);
    assert!(!js.has_error());
}

#[test]
fn nested_empty_arrays() {
    let (mut js, set_err) = parse_tracking("[[[[]]]]");
    assert!(!set_err);
    assert_eq!(js.size(), 1);
    assert_eq!(js.get(0).size(), 1);
    assert_eq!(js.get(0).get(0).size(), 1);
    assert_eq!(js.get(0).get(0).get(0).kind(), JsonType::Array);
    assert_eq!(js.get(0).get(0).get(0).size(), 0);
    assert_eq!(js.dump(), "[[[[]]]]");
    assert!(!js.has_error());
}

#[test]
fn illegal_set_on_array() {
    let (mut js, _) = parse_tracking("[10,21]");
    assert_eq!(js.kind(), JsonType::Array);
    assert_eq!(js.size(), 2);
    js.set("illegal", "fuchs").set("thor", false).set("ok", true);
    assert!(js.has_error());
    assert_eq!(js.size(), 2);
}

#[test]
fn nested_size_with_illegal_set() {
    let (mut js, set_err) = parse_tracking(r#"[10,21,{"nice":true}]"#);
    assert!(!set_err);
    assert_eq!(js.size(), 3);
    assert_eq!(js.get(2).kind(), JsonType::Object);
    js.set("illegal", "fuchs").set("thor", false).set("ok", true);
    assert!(js.has_error());
    assert_eq!(js.size(), 3);
}

#[test]
fn build_edit_and_drain() {
    let (mut js, _) = parse_tracking(r#"{"users":[{"name":"a"},{"name":"b"}]}"#);

    let mut names = Vec::new();
    js.get("users").map_array(|user| {
        user.get("name").map_string(|n| names.push(n.to_owned()));
    });
    assert_eq!(names, ["a", "b"]);

    js.get("users").get(1).set("admin", true);
    js.get("users").get(7).error(|err| assert_eq!(err, JsonError::DoesNotExist));
    assert!(!js.get("users").has_error());
    assert_eq!(
        js.dump(),
        r#"{"users":[{"name":"a"},{"name":"b","admin":true}]}"#
    );
}
