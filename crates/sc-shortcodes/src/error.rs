//! Error types for the shortcodes addon.

use sc_host::AddonError;
use sc_storage::StorageError;

/// Failure to load the addon configuration or the shortcode records.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Addon metadata does not yield a storage key.
    #[error(transparent)]
    Key(#[from] AddonError),
    /// Storage read failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Stored configuration is not valid JSON for its type.
    #[error("invalid configuration: {0}")]
    Decode(#[from] serde_json::Error),
    /// A stored record is not a valid shortcode.
    #[error("invalid record #{index}: {source}")]
    Record {
        /// Position of the record in storage iteration order.
        index: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned by [`Shortcodes::replace`](crate::Shortcodes::replace).
///
/// On every variant the input buffer is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum ReplaceError {
    /// The addon configuration could not be read or decoded.
    #[error("Shortcodes addon: could not obtain configuration: {0}")]
    Config(#[source] LoadError),
    /// The addon is not enabled. Expected whenever the addon is switched
    /// off; callers should treat it as "nothing to do".
    #[error("Addon {name} is not enabled")]
    Disabled {
        /// Addon name from the stored configuration.
        name: String,
    },
    /// The shortcode records could not be read or decoded.
    #[error("Shortcodes addon: could not obtain shortcodes: {0}")]
    Shortcodes(#[source] LoadError),
}

impl ReplaceError {
    /// Whether this is the expected "addon disabled" signal rather than a failure.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled { .. })
    }
}

#[cfg(test)]
mod tests {
    use sc_storage::StorageErrorKind;

    use super::*;

    #[test]
    fn test_disabled_message() {
        let err = ReplaceError::Disabled {
            name: "Shortcodes".to_owned(),
        };

        assert_eq!(err.to_string(), "Addon Shortcodes is not enabled");
        assert!(err.is_disabled());
    }

    #[test]
    fn test_config_message_includes_cause() {
        let err = ReplaceError::Config(LoadError::Storage(
            StorageError::not_found("key").with_backend("Mock"),
        ));

        assert_eq!(
            err.to_string(),
            "Shortcodes addon: could not obtain configuration: [Mock] Not found (key: key)"
        );
        assert!(!err.is_disabled());
    }

    #[test]
    fn test_record_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ReplaceError::Shortcodes(LoadError::Record { index: 2, source });

        assert!(
            err.to_string()
                .starts_with("Shortcodes addon: could not obtain shortcodes: invalid record #2:")
        );
    }

    #[test]
    fn test_storage_kind_preserved() {
        let err = LoadError::from(StorageError::new(StorageErrorKind::Unavailable));

        assert!(matches!(err, LoadError::Storage(ref e) if e.kind() == StorageErrorKind::Unavailable));
    }
}
