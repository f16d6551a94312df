//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for reading addon configuration and
//! content records, along with [`StorageError`] for unified error handling
//! across backends.
//!
//! # Payload Convention
//!
//! Both reads return raw bytes. Backends never decode them: every payload is
//! a JSON document and decoding belongs to the consumer, which knows the
//! concrete type it expects.

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid key or item type name.
    InvalidKey,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    key: Option<String>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            key: None,
            backend: None,
            source: None,
        }
    }

    /// Attach key context (addon key or item type).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Key context, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Backend identifier, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Create a not found error with key.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_key(key)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, key: Option<&str>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted => {
                StorageErrorKind::Unavailable
            }
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(k) = key {
            error = error.with_key(k);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (key: Shortcode)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidKey => "Invalid key",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read access to the host's persistent stores.
///
/// Implementations are synchronous. Callers treat every read as a black box
/// and reload on each use; backends must not assume results are cached
/// upstream.
pub trait Storage: Send + Sync {
    /// Read the raw configuration of an addon.
    ///
    /// # Arguments
    ///
    /// * `key` - Storage key derived from the addon's metadata
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if no
    /// configuration was ever stored under `key`, or another kind if the
    /// backend fails.
    fn addon(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Read every stored record of a content type.
    ///
    /// A type with no records yields an empty list, not an error. Records
    /// are returned in the backend's iteration order.
    ///
    /// # Arguments
    ///
    /// * `item_type` - Registered item type name (e.g., "Shortcode")
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails to list or read records.
    fn content_all(&self, item_type: &str) -> Result<Vec<Vec<u8>>, StorageError>;
}
