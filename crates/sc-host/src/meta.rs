//! Addon metadata, status and persisted configuration.

use serde::{Deserialize, Serialize};

/// Addon error.
#[derive(Debug, thiserror::Error)]
pub enum AddonError {
    /// A required metadata field is blank.
    #[error("addon must have valid metadata: missing {0}")]
    MissingMeta(&'static str),
    /// An addon with the same key is already registered.
    #[error("addon already registered: {0}")]
    AlreadyRegistered(String),
    /// No addon is registered under the key.
    #[error("addon not registered: {0}")]
    NotRegistered(String),
    /// A lifecycle hook failed.
    #[error("addon hook failed: {0}")]
    Hook(String),
}

/// Identity of an addon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Author name.
    #[serde(default)]
    pub author: String,
    /// Author homepage.
    #[serde(default)]
    pub author_url: String,
    /// Addon version.
    #[serde(default)]
    pub version: String,
}

impl Meta {
    /// Create metadata from its four parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        author_url: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            author_url: author_url.into(),
            version: version.into(),
        }
    }
}

/// Enable/disable status of an addon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Addon is active.
    Enabled,
    /// Addon is installed but inactive.
    #[default]
    Disabled,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enabled => f.write_str("enabled"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}

/// Persisted addon configuration.
///
/// Stored as JSON under the addon key:
///
/// ```json
/// {"meta": {"name": "...", "author": "...", "author_url": "...", "version": "..."}, "status": "enabled"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonConfig {
    /// Addon identity.
    #[serde(default)]
    pub meta: Meta,
    /// Current status; absent means disabled.
    #[serde(default)]
    pub status: Status,
}

impl AddonConfig {
    /// Create a configuration.
    #[must_use]
    pub fn new(meta: Meta, status: Status) -> Self {
        Self { meta, status }
    }

    /// Decode a stored configuration payload.
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Encode for storage.
    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Whether the addon is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.status == Status::Enabled
    }
}

/// Derive the storage key of an addon from its metadata.
///
/// Name, author and version are trimmed, must be non-empty, and have `:`
/// removed so the `name:author:version` layout stays unambiguous.
pub fn key_from_meta(meta: &Meta) -> Result<String, AddonError> {
    let part = |value: &str, field: &'static str| {
        let value = value.trim();
        if value.is_empty() {
            Err(AddonError::MissingMeta(field))
        } else {
            Ok(value.replace(':', ""))
        }
    };

    let name = part(&meta.name, "name")?;
    let author = part(&meta.author, "author")?;
    let version = part(&meta.version, "version")?;

    Ok(format!("{name}:{author}:{version}"))
}
