//! Typed inspection of parsed JSON documents.
//!
//! This crate parses JSON text into a [`ParsedDocument`] and exposes
//! fail-fast accessors for test assertions, most usefully against the output
//! of `dd_sanitize`.
//!
//! # Accessors
//!
//! - `require::<T>(key)`: exact-type lookup; integers never satisfy float
//!   requests and vice versa
//! - `require_nested_object(key)`: descend into an object
//! - `require_array(key)`: fetch an array
//! - `require_redacted(key)`: fetch a redaction envelope
//! - `count_leaf_values()`: count scalars across the document
//!
//! # Example
//!
//! ```
//! use dd_inspect::ParsedDocument;
//! use dd_sanitize::{make_description, Value, ValueMap};
//!
//! let mut payload = ValueMap::new();
//! payload.insert("name".to_string(), Value::from("Alice"));
//! payload.insert("age".to_string(), Value::from(30));
//!
//! let parsed = ParsedDocument::parse(&make_description(&payload, None)).unwrap();
//! assert_eq!(parsed.top_level_key_count(), 2);
//! assert_eq!(parsed.require::<String>("name").unwrap(), "Alice");
//! assert_eq!(parsed.require::<i64>("age").unwrap(), 30);
//! assert!(parsed.require::<f64>("age").is_err());
//! ```

pub mod document;
pub mod error;
pub mod extract;

pub use document::ParsedDocument;
pub use error::{InspectError, Result};
pub use extract::{JsonKind, JsonType};
