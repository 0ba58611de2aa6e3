//! The marker object substituted for redacted leaves.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// Literal placed in the `value` field of every envelope.
pub const REDACTED_MARKER: &str = "[REDACTED]";

/// Replacement for a redacted leaf.
///
/// Keeps the leaf's type classification so the output still says what kind
/// of value was hidden. `isNilOrEmpty` is only present for string and null
/// leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedEnvelope {
    /// Always [`REDACTED_MARKER`].
    pub value: String,

    /// Type tag of the hidden value.
    #[serde(rename = "type")]
    pub type_tag: String,

    /// Whether the hidden value was null or an empty string.
    #[serde(rename = "isNilOrEmpty", skip_serializing_if = "Option::is_none")]
    pub is_nil_or_empty: Option<bool>,
}

impl RedactedEnvelope {
    /// Envelope for a redacted non-string, non-null leaf.
    pub fn tagged(type_tag: impl Into<String>) -> Self {
        Self {
            value: REDACTED_MARKER.to_string(),
            type_tag: type_tag.into(),
            is_nil_or_empty: None,
        }
    }

    /// Envelope for a redacted string.
    pub fn string(original: &str) -> Self {
        Self {
            is_nil_or_empty: Some(original.is_empty()),
            ..Self::tagged("String")
        }
    }

    /// Envelope for a null leaf.
    pub fn null() -> Self {
        Self {
            is_nil_or_empty: Some(true),
            ..Self::tagged("Null")
        }
    }

    /// Build the JSON object for this envelope.
    pub fn into_json(self) -> Json {
        let mut map = Map::new();
        map.insert("value".to_string(), Json::String(self.value));
        map.insert("type".to_string(), Json::String(self.type_tag));
        if let Some(flag) = self.is_nil_or_empty {
            map.insert("isNilOrEmpty".to_string(), Json::Bool(flag));
        }
        Json::Object(map)
    }

    /// Recognise an envelope in decoded output.
    ///
    /// Requires the marker literal and a string `type`; extra keys are
    /// rejected so ordinary objects are never mistaken for envelopes.
    pub fn from_json(value: &Json) -> Option<Self> {
        let object = value.as_object()?;
        if object.get("value")?.as_str()? != REDACTED_MARKER {
            return None;
        }
        let type_tag = object.get("type")?.as_str()?.to_string();
        let is_nil_or_empty = match object.get("isNilOrEmpty") {
            Some(flag) => Some(flag.as_bool()?),
            None => None,
        };
        let expected_len = 2 + usize::from(is_nil_or_empty.is_some());
        if object.len() != expected_len {
            return None;
        }
        Some(Self {
            value: REDACTED_MARKER.to_string(),
            type_tag,
            is_nil_or_empty,
        })
    }
}
