//! Source value object
//!
//! A [`Source`] identifies the logical endpoint a repository resolves
//! capabilities against. It is an immutable value object: the repository
//! holds it for its whole lifetime and exposes it read-only to providers
//! during factory calls.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Logical endpoint identity and configuration
///
/// The registry core never interprets the fields beyond equality and
/// display; they exist for providers, which typically need the URL (and any
/// endpoint-specific settings) to know which endpoint to target.
///
/// # Example
///
/// ```
/// use capreg::Source;
///
/// let source = Source::new("internal", "https://feed.example.com/v3")
///     .with_setting("timeout_secs", "30");
///
/// assert_eq!(source.setting("timeout_secs"), Some("30"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Human-readable source name
    pub name: String,
    /// Endpoint URL or locator
    pub url: String,
    /// Endpoint-specific settings; providers use what they need and ignore
    /// the rest
    #[serde(default)]
    pub settings: HashMap<String, String>,
}

impl Source {
    /// Create a new source with the given name and URL
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            settings: HashMap::new(),
        }
    }

    /// Add an endpoint-specific setting
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Look up an endpoint-specific setting
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
