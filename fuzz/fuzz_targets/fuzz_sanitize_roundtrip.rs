//! Fuzz target for the sanitize/parse round trip.
//!
//! Any JSON object fed through the sanitizer must render to text that
//! parses back with the same key count.

#![no_main]

use dd_inspect::ParsedDocument;
use dd_sanitize::{make_description, RedactionPolicy, Value, ValueMap};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(serde_json::Value::Object(object)) = serde_json::from_slice(data) else {
        return;
    };
    let map: ValueMap = object
        .into_iter()
        .map(|(k, v)| (k, Value::from(v)))
        .collect();

    let policy = RedactionPolicy::new(["secret"]);
    let text = make_description(&map, Some(&policy));
    let doc = ParsedDocument::parse(&text).expect("sanitized output must parse");
    assert_eq!(doc.top_level_key_count(), map.len());
});
