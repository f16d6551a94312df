//! Filesystem storage implementation for the shortcodes addon.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](sc_storage::Storage) trait. Payloads are JSON files under a data
//! directory:
//!
//! ```text
//! data/
//! ├── addons/
//! │   └── Shortcodes%3AAuthor%3A0.1.0.json   # addon config, key percent-encoded
//! └── content/
//!     └── Shortcode/
//!         ├── 1.json                          # one record per file
//!         └── 2.json
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use sc_storage::Storage;
//! use sc_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("data"));
//! let records = storage.content_all("Shortcode")?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sc_storage::{Storage, StorageError, StorageErrorKind};
use uuid::Uuid;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Directory holding addon configurations.
const ADDONS_DIR: &str = "addons";

/// Directory holding one sub-directory of records per item type.
const CONTENT_DIR: &str = "content";

/// Extension of every payload file.
const PAYLOAD_EXT: &str = "json";

/// Characters kept verbatim in addon key file names: A-Z a-z 0-9 - . _
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Filesystem-backed storage.
///
/// Reads are uncached: every call hits the disk so edits made by the host
/// (or by hand) are visible on the next read.
#[derive(Debug, Clone)]
pub struct FsStorage {
    data_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `data_dir`.
    ///
    /// The directory does not need to exist yet; missing directories read as
    /// empty stores.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Root data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Persist an addon configuration payload under `key`.
    ///
    /// The write goes through a temporary file and a rename so readers never
    /// observe a partially written configuration.
    pub fn write_addon(&self, key: &str, payload: &[u8]) -> Result<(), StorageError> {
        let path = self.addon_path(key)?;
        write_atomic(&path, payload).map_err(|e| StorageError::io(e, Some(key)).with_backend(BACKEND))?;
        tracing::debug!(key, path = %path.display(), "Wrote addon configuration");
        Ok(())
    }

    /// Persist a record of `item_type` under the file stem `id`.
    pub fn write_record(
        &self,
        item_type: &str,
        id: &str,
        payload: &[u8],
    ) -> Result<(), StorageError> {
        let dir = self.content_dir(item_type)?;
        Self::validate_name(id)?;
        let path = dir.join(format!("{id}.{PAYLOAD_EXT}"));
        write_atomic(&path, payload)
            .map_err(|e| StorageError::io(e, Some(item_type)).with_backend(BACKEND))?;
        tracing::debug!(item_type, id, "Wrote content record");
        Ok(())
    }

    /// Read every record of `item_type` with its id (the file stem), in id order.
    ///
    /// A missing type directory reads as empty.
    pub fn records(&self, item_type: &str) -> Result<Vec<(String, Vec<u8>)>, StorageError> {
        let dir = self.content_dir(item_type)?;
        if !dir.is_dir() {
            tracing::debug!(item_type, "No content directory, treating as empty");
            return Ok(Vec::new());
        }
        let io_err = |e: std::io::Error| StorageError::io(e, Some(item_type)).with_backend(BACKEND);

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_payload = path.is_file()
                && path.extension().is_some_and(|ext| ext == PAYLOAD_EXT)
                && !is_hidden(&path);
            if is_payload {
                paths.push(path);
            }
        }
        // Stable iteration order: file name.
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in &paths {
            let id = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            records.push((id, fs::read(path).map_err(io_err)?));
        }

        tracing::debug!(item_type, record_count = records.len(), "Loaded content records");
        Ok(records)
    }

    /// Resolve the configuration file for an addon key.
    fn addon_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.trim().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidKey)
                .with_key(key)
                .with_backend(BACKEND));
        }
        let file_name = format!("{}.{PAYLOAD_EXT}", utf8_percent_encode(key, KEY_ENCODE_SET));
        Ok(self.data_dir.join(ADDONS_DIR).join(file_name))
    }

    /// Resolve the record directory for an item type.
    fn content_dir(&self, item_type: &str) -> Result<PathBuf, StorageError> {
        Self::validate_name(item_type)?;
        Ok(self.data_dir.join(CONTENT_DIR).join(item_type))
    }

    /// Item types and record ids become path components; only plain names are allowed.
    fn validate_name(name: &str) -> Result<(), StorageError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(StorageError::new(StorageErrorKind::InvalidKey)
                .with_key(name)
                .with_backend(BACKEND))
        }
    }
}

impl Storage for FsStorage {
    fn addon(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.addon_path(key)?;
        fs::read(&path).map_err(|e| StorageError::io(e, Some(key)).with_backend(BACKEND))
    }

    fn content_all(&self, item_type: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        Ok(self
            .records(item_type)?
            .into_iter()
            .map(|(_, payload)| payload)
            .collect())
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Write `payload` to `path` via a uniquely named sibling temporary file and rename.
fn write_atomic(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let tmp = parent.join(format!(".{file_name}-{}.tmp", Uuid::new_v4()));
    fs::write(&tmp, payload)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}
