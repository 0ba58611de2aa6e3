//! Debug descriptions for domain types.

use crate::{Sanitizer, Value, ValueMap};
use std::fmt;

/// Types that can describe themselves as a debug payload.
pub trait DebugDictionary {
    /// The payload to render.
    fn debug_dictionary(&self) -> ValueMap;

    /// Pretty JSON rendering of [`debug_dictionary`](Self::debug_dictionary),
    /// sanitized with the default sanitizer.
    fn debug_description(&self) -> String {
        Sanitizer::default().make_description(&self.debug_dictionary())
    }
}

/// Enum-like types backed by a raw value.
///
/// Types that are also `Display` get a [`DebugDictionary`] carrying
/// `rawValue` and `description`.
pub trait RawValueDescribe {
    /// The backing value.
    fn raw_value(&self) -> Value;
}

impl<T: RawValueDescribe + fmt::Display> DebugDictionary for T {
    fn debug_dictionary(&self) -> ValueMap {
        let mut map = ValueMap::new();
        map.insert("rawValue".to_string(), self.raw_value());
        map.insert("description".to_string(), Value::from(self.to_string()));
        map
    }
}
