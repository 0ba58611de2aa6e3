//! Dynamic value model.
//!
//! `Value` is the boundary type: callers convert their native data into it
//! once, and the sanitizer only ever dispatches on its tag.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Map of string keys to values; the root shape of every debug payload.
pub type ValueMap = BTreeMap<String, Value>;

/// A loosely-typed value headed for debug output.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer too large for `Integer`.
    Unsigned(u64),
    /// Floating point number (may be non-finite).
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// String-keyed map; keys are unique.
    Map(ValueMap),
    /// Ordered sequence.
    Sequence(Vec<Value>),
    /// Point in time, rendered by the configured date formatter.
    Timestamp(DateTime<Utc>),
    /// Anything else, captured as text when it entered the model.
    Opaque {
        /// Textual description of the value.
        description: String,
        /// Short name of the value's type.
        type_name: String,
    },
}

impl Value {
    /// Capture an arbitrary value through its `Debug` rendering.
    pub fn opaque<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Value::Opaque {
            description: format!("{:?}", value),
            type_name: short_type_name::<T>(),
        }
    }

    /// Capture a value through its `Display` rendering.
    ///
    /// Suited to locators such as URLs and paths, whose display form is the
    /// text a reader expects to see.
    pub fn displayed<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Value::Opaque {
            description: value.to_string(),
            type_name: short_type_name::<T>(),
        }
    }

    /// Build a map value from key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Human-readable type tag, as used in redaction envelopes.
    pub fn kind_name(&self) -> &str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Integer(_) | Value::Unsigned(_) => "Int",
            Value::Float(_) => "Double",
            Value::String(_) => "String",
            Value::Map(_) => "Map",
            Value::Sequence(_) => "Sequence",
            Value::Timestamp(_) => "Timestamp",
            Value::Opaque { type_name, .. } => type_name,
        }
    }

    /// Whether this value has children.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Sequence(_))
    }
}

/// Render a float the way debug output shows it: always with a fractional
/// part or exponent (`30.0`, `3.14`, `1e21`).
pub(crate) fn float_text(value: f64) -> String {
    format!("{:?}", value)
}

/// Last path segment of a type name, generic arguments kept.
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let head_end = full.find('<').unwrap_or(full.len());
    let start = full[..head_end].rfind("::").map(|i| i + 2).unwrap_or(0);
    full[start..].to_string()
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Value::Unsigned(value), Value::Integer)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        // usize is at most 64 bits on every supported target
        Value::from(value as u64)
    }
}

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        // isize is at most 64 bits on every supported target
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(value: BTreeMap<String, T>) -> Self {
        Value::Map(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(value: HashMap<String, T>) -> Self {
        Value::Map(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Unsigned(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct NotEncodable;

    #[derive(Debug)]
    struct Wrapper<T>(T);

    #[test]
    fn test_opaque_uses_debug_and_short_type_name() {
        let value = Value::opaque(&NotEncodable);
        assert_eq!(
            value,
            Value::Opaque {
                description: "NotEncodable".to_string(),
                type_name: "NotEncodable".to_string(),
            }
        );
        assert_eq!(value.kind_name(), "NotEncodable");
    }

    #[test]
    fn test_short_type_name_keeps_generics() {
        let value = Value::opaque(&Wrapper(1u8));
        assert_eq!(value.kind_name(), "Wrapper<u8>");
    }

    #[test]
    fn test_displayed_uses_display_text() {
        let value = Value::displayed("https://example.com");
        match value {
            Value::Opaque { description, .. } => assert_eq!(description, "https://example.com"),
            other => panic!("expected opaque, got {:?}", other),
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind_name(), "Null");
        assert_eq!(Value::from(true).kind_name(), "Bool");
        assert_eq!(Value::from(42).kind_name(), "Int");
        assert_eq!(Value::from(3.14).kind_name(), "Double");
        assert_eq!(Value::from("x").kind_name(), "String");
        assert_eq!(Value::from(vec![1, 2]).kind_name(), "Sequence");
        assert_eq!(Value::map([("a", 1)]).kind_name(), "Map");
    }

    #[test]
    fn test_option_none_is_null() {
        let none: Option<i32> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }

    #[test]
    fn test_wide_unsigned_overflow_stays_numeric() {
        let value = Value::from(u64::MAX);
        assert_eq!(value, Value::Unsigned(u64::MAX));
        assert_eq!(value.kind_name(), "Int");
        assert_eq!(Value::from(7u64), Value::Integer(7));
        assert_eq!(Value::from(7usize), Value::Integer(7));
    }

    #[test]
    fn test_from_json_keeps_large_unsigned() {
        let value = Value::from(json!({"n": u64::MAX, "m": -1}));
        let Value::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(map["n"], Value::Unsigned(u64::MAX));
        assert_eq!(map["m"], Value::Integer(-1));
    }

    #[test]
    fn test_from_json_distinguishes_integers_and_floats() {
        let value = Value::from(json!({"i": 30, "f": 3.5, "list": [null, "x"]}));
        let Value::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(map["i"], Value::Integer(30));
        assert_eq!(map["f"], Value::Float(3.5));
        assert_eq!(
            map["list"],
            Value::Sequence(vec![Value::Null, Value::String("x".to_string())])
        );
    }

    #[test]
    fn test_float_text() {
        assert_eq!(float_text(30.0), "30.0");
        assert_eq!(float_text(3.14), "3.14");
        assert_eq!(float_text(1e21), "1e21");
    }
}
