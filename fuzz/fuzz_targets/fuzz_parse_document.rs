//! Fuzz target for document parsing.
//!
//! Tests that parsing and querying handle arbitrary bytes without panicking.

#![no_main]

use dd_inspect::ParsedDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Should never panic, only return an error
    if let Ok(doc) = ParsedDocument::from_slice(data) {
        let _ = doc.top_level_key_count();
        let _ = doc.count_leaf_values();
        let _ = doc.require::<String>("value");
        let _ = doc.require_nested_object("value");
        let _ = doc.debug_description();
    }
});
