//! Sanitizer configuration.
//!
//! Supports configuration via:
//! - JSON files (`load`/`save`)
//! - Environment variables (DD_REDACT, DD_REDACTION, DD_DATE_FORMAT)

use crate::{DateFormat, RedactionPolicy, SanitizeError, Sanitizer};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable settings for building a [`Sanitizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizerConfig {
    /// Whether redaction envelopes are produced at all.
    #[serde(default = "default_true")]
    pub redaction_enabled: bool,

    /// Case-insensitive fragments that trigger redaction.
    #[serde(default)]
    pub redact_fragments: Vec<String>,

    /// Timestamp rendering profile.
    #[serde(default)]
    pub date_format: DateFormat,
}

fn default_true() -> bool {
    true
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            redaction_enabled: true,
            redact_fragments: Vec::new(),
            date_format: DateFormat::Fixed,
        }
    }
}

impl SanitizerConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load config from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save config to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> crate::Result<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup.
    ///
    /// `DD_REDACT` is a comma-separated fragment list, `DD_REDACTION` is
    /// `on`/`off`, and `DD_DATE_FORMAT` names a [`DateFormat`].
    pub fn with_overrides<F>(mut self, lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DD_REDACT") {
            self.redact_fragments = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(val) = lookup("DD_REDACTION") {
            self.redaction_enabled = match val.to_lowercase().as_str() {
                "on" | "true" | "1" | "yes" => true,
                "off" | "false" | "0" | "no" => false,
                other => {
                    return Err(SanitizeError::Config(format!(
                        "DD_REDACTION must be on or off, got '{}'",
                        other
                    )))
                }
            };
        }

        if let Some(val) = lookup("DD_DATE_FORMAT") {
            self.date_format = val.parse().map_err(SanitizeError::Config)?;
        }

        Ok(self)
    }

    /// The policy described by this config.
    pub fn policy(&self) -> RedactionPolicy {
        RedactionPolicy::new(self.redact_fragments.iter().cloned())
    }

    /// Build a sanitizer from this config.
    pub fn build(&self) -> Sanitizer {
        Sanitizer::new(self.policy())
            .with_date_format(self.date_format)
            .with_redaction(self.redaction_enabled)
    }
}
