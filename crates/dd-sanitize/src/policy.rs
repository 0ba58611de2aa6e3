//! Redaction policy.
//!
//! A policy is a set of text fragments. A leaf is redacted when its natural
//! string form contains any fragment, compared case-insensitively.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Case-insensitive substring redaction policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionPolicy {
    /// Fragments to look for in rendered values.
    #[serde(default)]
    pub fragments: BTreeSet<String>,
}

impl RedactionPolicy {
    /// Create a policy from any collection of fragments.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that matches nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Load policy from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let policy: RedactionPolicy = serde_json::from_str(&content)?;
        Ok(policy)
    }

    /// Save policy to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Add a fragment.
    pub fn insert(&mut self, fragment: impl Into<String>) {
        self.fragments.insert(fragment.into());
    }

    /// Whether the policy has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Whether `text` contains any fragment, ignoring case.
    ///
    /// Numbers are matched against their Rust rendering, so large floats
    /// read `1e21` (no `+` in the exponent).
    pub fn matches(&self, text: &str) -> bool {
        if self.fragments.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.fragments
            .iter()
            .any(|fragment| lowered.contains(&fragment.to_lowercase()))
    }
}

impl<S: Into<String>> FromIterator<S> for RedactionPolicy {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
