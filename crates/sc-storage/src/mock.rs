//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without a host database.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores addon configurations and content records in memory. Use the
/// builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use sc_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_addon("Shortcodes:Author:0.1.0", r#"{"status":"enabled"}"#)
///     .with_record("Shortcode", r#"{"tag":"year","replacement":"2024","active":true}"#);
///
/// let records = storage.content_all("Shortcode").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    addons: RwLock<HashMap<String, Vec<u8>>>,
    records: RwLock<HashMap<String, Vec<Vec<u8>>>>,
    failures: RwLock<HashMap<String, StorageErrorKind>>,
    addon_reads: AtomicUsize,
    content_reads: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an addon configuration payload under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_addon(self, key: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.set_addon(key, payload);
        self
    }

    /// Append a record payload for `item_type`.
    ///
    /// Records are returned in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_record(self, item_type: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.records
            .write()
            .unwrap()
            .entry(item_type.into())
            .or_default()
            .push(payload.into());
        self
    }

    /// Make every read of `key` (addon key or item type) fail with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, key: impl Into<String>, kind: StorageErrorKind) -> Self {
        self.failures.write().unwrap().insert(key.into(), kind);
        self
    }

    /// Replace the addon configuration stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_addon(&self, key: impl Into<String>, payload: impl Into<Vec<u8>>) {
        self.addons
            .write()
            .unwrap()
            .insert(key.into(), payload.into());
    }

    /// Number of `addon()` calls served so far.
    pub fn addon_reads(&self) -> usize {
        self.addon_reads.load(Ordering::SeqCst)
    }

    /// Number of `content_all()` calls served so far.
    pub fn content_reads(&self) -> usize {
        self.content_reads.load(Ordering::SeqCst)
    }

    fn injected_failure(&self, key: &str) -> Option<StorageError> {
        self.failures.read().unwrap().get(key).map(|kind| {
            StorageError::new(*kind)
                .with_key(key)
                .with_backend("Mock")
        })
    }
}

impl Storage for MockStorage {
    fn addon(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.addon_reads.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.injected_failure(key) {
            return Err(err);
        }
        self.addons
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key).with_backend("Mock"))
    }

    fn content_all(&self, item_type: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        self.content_reads.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.injected_failure(item_type) {
            return Err(err);
        }
        Ok(self
            .records
            .read()
            .unwrap()
            .get(item_type)
            .cloned()
            .unwrap_or_default())
    }
}
