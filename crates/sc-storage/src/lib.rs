//! Storage abstraction for the shortcodes addon.
//!
//! This crate provides a [`Storage`] trait describing the two reads the addon
//! needs from its host: the persisted addon configuration and the raw records
//! of a content type. Keeping them behind a trait enables:
//!
//! - **Unit testing** without a host database
//! - **Backend flexibility** (JSON files on disk, an embedded database, a remote store)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `addon()` and `content_all()` methods
//! - [`StorageError`] with semantic [`StorageErrorKind`] categories
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use sc_storage::Storage;
//!
//! let records = storage.content_all("Shortcode")?;
//! for record in records {
//!     let shortcode: Shortcode = serde_json::from_slice(&record)?;
//! }
//! ```

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
