//! Exact-type extraction from decoded JSON values.
//!
//! Matching is strict: an integer never satisfies a float request and a
//! float never satisfies an integer request. That strictness is what lets
//! the inspector catch shape regressions in sanitizer output.

use serde_json::{Map, Value};
use std::fmt;

/// Classification of a decoded JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Number without fraction or exponent.
    Integer,
    /// Any other number.
    Float,
    /// String.
    String,
    /// Array.
    Array,
    /// Object.
    Object,
}

impl JsonKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(n) if n.is_f64() => JsonKind::Float,
            Value::Number(_) => JsonKind::Integer,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }

    /// Whether values of this kind have no children.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, JsonKind::Array | JsonKind::Object)
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "bool",
            JsonKind::Integer => "integer",
            JsonKind::Float => "float",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        };
        write!(f, "{}", s)
    }
}

/// Describe a value for error messages: its kind plus its compact text.
pub fn describe(value: &Value) -> String {
    format!("{} {}", JsonKind::of(value), value)
}

/// Rust types that can be pulled out of a decoded JSON value.
pub trait JsonType: Sized {
    /// Name used in mismatch errors.
    const NAME: &'static str;

    /// Extract the value if, and only if, its runtime type matches exactly.
    fn extract(value: &Value) -> Option<Self>;
}

impl JsonType for String {
    const NAME: &'static str = "String";

    fn extract(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl JsonType for i64 {
    const NAME: &'static str = "Int";

    fn extract(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl JsonType for u64 {
    const NAME: &'static str = "UInt";

    fn extract(value: &Value) -> Option<Self> {
        value.as_u64()
    }
}

impl JsonType for f64 {
    const NAME: &'static str = "Double";

    fn extract(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) if n.is_f64() => n.as_f64(),
            _ => None,
        }
    }
}

impl JsonType for bool {
    const NAME: &'static str = "Bool";

    fn extract(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl JsonType for Vec<Value> {
    const NAME: &'static str = "Array";

    fn extract(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl JsonType for Map<String, Value> {
    const NAME: &'static str = "Dictionary";

    fn extract(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl JsonType for Value {
    const NAME: &'static str = "Any";

    fn extract(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}
