//! JSON-safe debug descriptions with optional redaction.
//!
//! This crate turns loosely-typed payloads (maps, sequences, primitives,
//! timestamps and opaque values) into JSON that can always be logged.
//!
//! # Key Features
//!
//! - **Total sanitizing**: every input degrades to a JSON-legal value; nothing
//!   on the logging path can fail.
//! - **Content-based redaction**: leaves whose text contains a configured
//!   fragment (case-insensitive) become `{"value": "[REDACTED]", "type": ...}`
//!   envelopes that keep the leaf's type.
//! - **Null is treated as sensitive**: with redaction enabled, `null` always
//!   becomes an envelope flagged `isNilOrEmpty`.
//! - **Explicit date formatting**: timestamps render through a formatter value
//!   passed to the sanitizer, never a process-wide instance.
//!
//! # Example
//!
//! ```
//! use dd_sanitize::{make_description, RedactionPolicy, Value, ValueMap};
//!
//! let mut payload = ValueMap::new();
//! payload.insert("user".to_string(), Value::from("alice"));
//! payload.insert("token".to_string(), Value::from("my_secret_value"));
//!
//! let policy = RedactionPolicy::new(["secret"]);
//! let json = make_description(&payload, Some(&policy));
//! assert!(json.contains("\"user\": \"alice\""));
//! assert!(!json.contains("my_secret_value"));
//! ```

pub mod config;
pub mod date;
pub mod describe;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod policy;
pub mod sanitize;
pub mod value;

pub use config::SanitizerConfig;
pub use date::{DateFormat, DateFormatter};
pub use describe::{DebugDictionary, RawValueDescribe};
pub use envelope::{RedactedEnvelope, REDACTED_MARKER};
pub use error::{Result, SanitizeError};
pub use policy::RedactionPolicy;
pub use sanitize::{make_description, Sanitizer};
pub use value::{Value, ValueMap};
