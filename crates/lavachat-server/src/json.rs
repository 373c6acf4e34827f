//! Defensive JSON Parsing
//!
//! Guards for untrusted request bodies. All failure is encoded in the
//! return value (`None`), never raised; callers turn the sentinel into a
//! 400 response.

use serde_json::{Map, Value};

/// Parse text as a JSON object.
///
/// `Some` iff the text is valid JSON whose top-level value is a non-null,
/// non-array object.
pub fn parse_json_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Parse text as a JSON array.
///
/// `Some` iff the text is valid JSON whose top-level value is an array.
pub fn parse_json_array(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str(text) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_guard_accepts_objects() {
        let map = parse_json_object(r#"{"a": 1, "b": {"c": []}}"#).unwrap();
        assert_eq!(map.get("a"), Some(&Value::from(1)));
    }

    #[test]
    fn test_object_guard_accepts_empty_object() {
        assert!(parse_json_object("{}").is_some());
    }

    #[test]
    fn test_object_guard_rejects_non_objects() {
        assert!(parse_json_object("[1, 2]").is_none());
        assert!(parse_json_object("null").is_none());
        assert!(parse_json_object("42").is_none());
        assert!(parse_json_object(r#""text""#).is_none());
        assert!(parse_json_object("true").is_none());
    }

    #[test]
    fn test_object_guard_rejects_malformed_input() {
        assert!(parse_json_object("").is_none());
        assert!(parse_json_object("{not json").is_none());
        assert!(parse_json_object("{\"a\":}").is_none());
    }

    #[test]
    fn test_array_guard_accepts_arrays() {
        let items = parse_json_array(r#"[1, "two", {}]"#).unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_array_guard_rejects_non_arrays() {
        assert!(parse_json_array("{}").is_none());
        assert!(parse_json_array("null").is_none());
        assert!(parse_json_array("\"[]\"").is_none());
        assert!(parse_json_array("not json").is_none());
    }
}
