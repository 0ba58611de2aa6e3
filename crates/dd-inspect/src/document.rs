//! Parsed JSON documents with typed, fail-fast accessors.

use crate::extract::{describe, JsonKind, JsonType};
use crate::{InspectError, Result};
use dd_sanitize::{RedactedEnvelope, Sanitizer, Value as DebugValue};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// An immutable decoded JSON document.
///
/// Most accessors expect the root to be an object. Nested access returns new
/// documents; the parent is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    root: Value,
}

impl ParsedDocument {
    /// Parse JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        debug!(
            bytes = text.len(),
            kind = %JsonKind::of(&root),
            "Parsed JSON document"
        );
        Ok(Self { root })
    }

    /// Parse raw bytes, which must be UTF-8 encoded JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Self::parse(text)
    }

    /// Wrap an already-decoded value.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The root value.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Consume the document, returning the root value.
    pub fn into_root(self) -> Value {
        self.root
    }

    /// Number of keys in the root object, or 0 if the root is not an object.
    pub fn top_level_key_count(&self) -> usize {
        self.root.as_object().map_or(0, Map::len)
    }

    /// Fetch `key` as `T`.
    ///
    /// # Errors
    ///
    /// `NotAMap` if the root is not an object, `MissingKey` if the key is
    /// absent, `TypeMismatch` if the value is not exactly a `T`.
    pub fn require<T: JsonType>(&self, key: &str) -> Result<T> {
        let value = self.lookup(key)?;
        T::extract(value).ok_or_else(|| InspectError::TypeMismatch {
            key: key.to_string(),
            expected: T::NAME.to_string(),
            actual: describe(value),
        })
    }

    /// Like [`require`](Self::require), but a missing key yields `None`.
    pub fn optional<T: JsonType>(&self, key: &str) -> Result<Option<T>> {
        match self.require(key) {
            Ok(value) => Ok(Some(value)),
            Err(InspectError::MissingKey(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch the object at `key` as a new document.
    pub fn require_nested_object(&self, key: &str) -> Result<ParsedDocument> {
        let nested: Map<String, Value> = self.require(key)?;
        Ok(Self::from_value(Value::Object(nested)))
    }

    /// Fetch the array at `key`.
    pub fn require_array(&self, key: &str) -> Result<Vec<Value>> {
        self.require(key)
    }

    /// Fetch the redaction envelope at `key`.
    pub fn require_redacted(&self, key: &str) -> Result<RedactedEnvelope> {
        let value = self.lookup(key)?;
        RedactedEnvelope::from_json(value).ok_or_else(|| InspectError::TypeMismatch {
            key: key.to_string(),
            expected: "RedactedEnvelope".to_string(),
            actual: describe(value),
        })
    }

    /// Count scalar values across the whole document.
    ///
    /// Strings, numbers, booleans and nulls count as one each; objects and
    /// arrays contribute the sum of their children.
    pub fn count_leaf_values(&self) -> usize {
        count_leaves(&self.root)
    }

    /// Pretty JSON rendering of the document.
    ///
    /// Object roots are re-rendered through the sanitizer; since decoded JSON
    /// holds no opaque values this only normalises layout (and, as with any
    /// sanitized payload, marks nulls as redacted). Other roots use their
    /// plain JSON text.
    pub fn debug_description(&self) -> String {
        match &self.root {
            Value::Object(map) => {
                let map = map
                    .iter()
                    .map(|(k, v)| (k.clone(), DebugValue::from(v.clone())))
                    .collect();
                Sanitizer::default().make_description(&map)
            }
            other => other.to_string(),
        }
    }

    fn lookup(&self, key: &str) -> Result<&Value> {
        let object = self.root.as_object().ok_or_else(|| InspectError::NotAMap {
            actual: JsonKind::of(&self.root).to_string(),
        })?;
        object
            .get(key)
            .ok_or_else(|| InspectError::MissingKey(key.to_string()))
    }
}

fn count_leaves(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.values().map(count_leaves).sum(),
        Value::Array(items) => items.iter().map(count_leaves).sum(),
        _ => 1,
    }
}

impl std::str::FromStr for ParsedDocument {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ParsedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug_description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ParsedDocument {
        ParsedDocument::from_value(value)
    }

    #[test]
    fn test_parse_flat_object() {
        let parsed = ParsedDocument::parse(
            r#"{
                "name": "Alice",
                "age": 30,
                "isAdmin": true
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.top_level_key_count(), 3);
        assert_eq!(parsed.require::<String>("name").unwrap(), "Alice");
        assert_eq!(parsed.require::<i64>("age").unwrap(), 30);
        assert!(parsed.require::<bool>("isAdmin").unwrap());
    }

    #[test]
    fn test_missing_key() {
        let parsed = ParsedDocument::parse("{}").unwrap();
        let err = parsed.require::<String>("x").unwrap_err();
        assert!(matches!(err, InspectError::MissingKey(ref k) if k == "x"));
        assert_eq!(err.to_string(), "missing required key: x");
    }

    #[test]
    fn test_malformed_json() {
        let err = ParsedDocument::parse("{not valid").unwrap_err();
        assert!(matches!(err, InspectError::Decode(_)));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = ParsedDocument::from_slice(&[b'{', 0xff, b'}']).unwrap_err();
        assert!(matches!(err, InspectError::InvalidEncoding(_)));
    }

    #[test]
    fn test_from_slice_valid() {
        let parsed = ParsedDocument::from_slice(br#"{"a": 1}"#).unwrap();
        assert_eq!(parsed.require::<i64>("a").unwrap(), 1);
    }

    #[test]
    fn test_non_object_root() {
        let parsed = ParsedDocument::parse("[1, 2, 3]").unwrap();
        assert_eq!(parsed.top_level_key_count(), 0);
        assert_eq!(parsed.count_leaf_values(), 3);

        let err = parsed.require::<i64>("a").unwrap_err();
        assert!(matches!(err, InspectError::NotAMap { ref actual } if actual == "array"));
    }

    #[test]
    fn test_type_mismatch_is_strict() {
        let parsed = doc(json!({"value": 3.14, "count": 3}));

        let err = parsed.require::<i64>("value").unwrap_err();
        match err {
            InspectError::TypeMismatch {
                key,
                expected,
                actual,
            } => {
                assert_eq!(key, "value");
                assert_eq!(expected, "Int");
                assert_eq!(actual, "float 3.14");
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }

        assert!(matches!(
            parsed.require::<f64>("count"),
            Err(InspectError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_nested_objects() {
        let parsed = doc(json!({"outer": {"inner": {"name": "Alice", "age": 42}}}));
        assert_eq!(parsed.top_level_key_count(), 1);
        assert_eq!(parsed.count_leaf_values(), 2);

        let inner = parsed
            .require_nested_object("outer")
            .unwrap()
            .require_nested_object("inner")
            .unwrap();
        assert_eq!(inner.require::<String>("name").unwrap(), "Alice");
        assert_eq!(inner.require::<i64>("age").unwrap(), 42);

        // parent untouched
        assert_eq!(parsed.top_level_key_count(), 1);
    }

    #[test]
    fn test_nested_object_wrong_type() {
        let parsed = doc(json!({"outer": [1]}));
        assert!(matches!(
            parsed.require_nested_object("outer"),
            Err(InspectError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_require_array() {
        let parsed = doc(json!({"values": [1, "two", true]}));
        let values = parsed.require_array("values").unwrap();
        assert_eq!(values, vec![json!(1), json!("two"), json!(true)]);

        assert!(matches!(
            doc(json!({"values": "x"})).require_array("values"),
            Err(InspectError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_optional() {
        let parsed = doc(json!({"a": 1}));
        assert_eq!(parsed.optional::<i64>("a").unwrap(), Some(1));
        assert_eq!(parsed.optional::<i64>("b").unwrap(), None);
        assert!(parsed.optional::<String>("a").is_err());
    }

    #[test]
    fn test_require_redacted() {
        let parsed = doc(json!({
            "token": {"value": "[REDACTED]", "type": "String", "isNilOrEmpty": false},
            "plain": "x"
        }));
        let envelope = parsed.require_redacted("token").unwrap();
        assert_eq!(envelope.type_tag, "String");
        assert_eq!(envelope.is_nil_or_empty, Some(false));

        assert!(matches!(
            parsed.require_redacted("plain"),
            Err(InspectError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_leaf_count_includes_nulls_and_skips_empty_containers() {
        let parsed = doc(json!({"a": null, "b": [], "c": {}, "d": [1, [2, {"e": false}]]}));
        assert_eq!(parsed.count_leaf_values(), 4);
    }

    #[test]
    fn test_scalar_root_counts_as_one_leaf() {
        assert_eq!(doc(json!("x")).count_leaf_values(), 1);
        assert_eq!(doc(json!(null)).count_leaf_values(), 1);
    }

    #[test]
    fn test_debug_description_object_root() {
        let parsed = doc(json!({"url": "https://example.com", "n": 1}));
        let text = parsed.debug_description();
        assert!(text.contains("\"url\": \"https://example.com\""));
        assert!(text.contains("\"n\": 1"));

        let reparsed = ParsedDocument::parse(&text).unwrap();
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn test_debug_description_keeps_large_unsigned_numeric() {
        let parsed = ParsedDocument::parse(r#"{"n": 18446744073709551615}"#).unwrap();
        let text = parsed.debug_description();
        assert!(text.contains("\"n\": 18446744073709551615"));

        let reparsed = ParsedDocument::parse(&text).unwrap();
        assert_eq!(reparsed.require::<u64>("n").unwrap(), u64::MAX);
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn test_debug_description_other_root() {
        assert_eq!(doc(json!([1, 2])).debug_description(), "[1,2]");
        assert_eq!(doc(json!([1, 2])).to_string(), "[1,2]");
    }

    #[test]
    fn test_from_str() {
        let parsed: ParsedDocument = r#"{"k": "v"}"#.parse().unwrap();
        assert_eq!(parsed.require::<String>("k").unwrap(), "v");
    }
}
