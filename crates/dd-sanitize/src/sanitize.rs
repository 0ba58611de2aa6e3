//! The sanitizer.
//!
//! Walks a [`Value`] tree depth-first and produces a JSON-legal tree,
//! swapping leaves that match the redaction policy for a
//! [`RedactedEnvelope`]. Sanitizing is total: anything that cannot be
//! represented in JSON degrades to a string.

use crate::{DateFormat, DateFormatter, RedactedEnvelope, RedactionPolicy, Value, ValueMap};
use serde_json::{Map, Number, Value as Json};
use tracing::{debug, trace, warn};

/// Converts value trees into JSON-safe, optionally redacted trees.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    /// Fragments that trigger redaction.
    policy: RedactionPolicy,

    /// Renders timestamps.
    dates: DateFormatter,

    /// When false, leaves pass through unredacted and null stays null.
    redaction_enabled: bool,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(RedactionPolicy::none())
    }
}

impl Sanitizer {
    /// Create a sanitizer with the given policy, fixed-format dates and
    /// redaction enabled.
    pub fn new(policy: RedactionPolicy) -> Self {
        Self {
            policy,
            dates: DateFormatter::default(),
            redaction_enabled: true,
        }
    }

    /// Use a different timestamp profile.
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.dates = DateFormatter::new(format);
        self
    }

    /// Enable or disable redaction entirely.
    pub fn with_redaction(mut self, enabled: bool) -> Self {
        self.redaction_enabled = enabled;
        self
    }

    /// The active policy.
    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    /// Whether redaction is enabled.
    pub fn redaction_enabled(&self) -> bool {
        self.redaction_enabled
    }

    /// Sanitize every value in a map, keeping all keys.
    pub fn sanitize_map(&self, map: &ValueMap) -> Map<String, Json> {
        map.iter()
            .map(|(key, value)| (key.clone(), self.sanitize(value)))
            .collect()
    }

    /// Sanitize a single value.
    pub fn sanitize(&self, value: &Value) -> Json {
        match value {
            Value::String(s) => {
                if self.should_redact(s) {
                    self.redacted(RedactedEnvelope::string(s))
                } else {
                    Json::String(s.clone())
                }
            }
            Value::Integer(i) => {
                if self.should_redact(&i.to_string()) {
                    self.redacted(RedactedEnvelope::tagged("Int"))
                } else {
                    Json::Number(Number::from(*i))
                }
            }
            Value::Unsigned(u) => {
                if self.should_redact(&u.to_string()) {
                    self.redacted(RedactedEnvelope::tagged("Int"))
                } else {
                    Json::Number(Number::from(*u))
                }
            }
            Value::Float(f) => {
                let text = crate::value::float_text(*f);
                if self.should_redact(&text) {
                    self.redacted(RedactedEnvelope::tagged("Double"))
                } else {
                    // NaN and infinities have no JSON form
                    Number::from_f64(*f).map_or(Json::String(text), Json::Number)
                }
            }
            Value::Bool(b) => {
                if self.should_redact(if *b { "true" } else { "false" }) {
                    self.redacted(RedactedEnvelope::tagged("Bool"))
                } else {
                    Json::Bool(*b)
                }
            }
            Value::Null => {
                if self.redaction_enabled {
                    self.redacted(RedactedEnvelope::null())
                } else {
                    Json::Null
                }
            }
            // Timestamps are never checked against the policy
            Value::Timestamp(ts) => Json::String(self.dates.format(ts)),
            Value::Map(map) => Json::Object(self.sanitize_map(map)),
            Value::Sequence(items) => {
                Json::Array(items.iter().map(|item| self.sanitize(item)).collect())
            }
            Value::Opaque {
                description,
                type_name,
            } => {
                if self.should_redact(description) {
                    self.redacted(RedactedEnvelope::tagged(type_name.as_str()))
                } else {
                    Json::String(description.clone())
                }
            }
        }
    }

    /// Sanitize a map and render it as pretty-printed JSON.
    ///
    /// Escaped forward slashes are unescaped for readability. If encoding
    /// fails, the `Debug` form of the sanitized tree is returned instead.
    pub fn make_description(&self, map: &ValueMap) -> String {
        let sanitized = Json::Object(self.sanitize_map(map));
        match serde_json::to_string_pretty(&sanitized) {
            Ok(json) => {
                let json = unescape_slashes(&json);
                debug!(keys = map.len(), bytes = json.len(), "Rendered debug description");
                json
            }
            Err(e) => {
                warn!(error = %e, "JSON encoding failed, using plain description");
                format!("{:?}", sanitized)
            }
        }
    }

    fn should_redact(&self, text: &str) -> bool {
        self.redaction_enabled && self.policy.matches(text)
    }

    fn redacted(&self, envelope: RedactedEnvelope) -> Json {
        trace!(type_tag = %envelope.type_tag, "Redacted leaf");
        envelope.into_json()
    }
}

/// Sanitize `map` with an optional policy and render it as JSON text.
pub fn make_description(map: &ValueMap, policy: Option<&RedactionPolicy>) -> String {
    let policy = policy.cloned().unwrap_or_default();
    Sanitizer::new(policy).make_description(map)
}

/// Replace `\/` escapes with `/`, leaving escaped backslashes intact.
///
/// serde_json never escapes `/`; this only matters for text produced by
/// other encoders.
fn unescape_slashes(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut chars = json.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('/') => out.push('/'),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
