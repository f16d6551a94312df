//! Shortcode substitution addon.
//!
//! Admins maintain [`Shortcode`] records: a lowercase tag plus replacement
//! text. [`Shortcodes::replace`] finds `[tag]` tokens in a content buffer and
//! substitutes the replacement text of every active record, sanitized so the
//! result is safe both as HTML and as a fragment of an already JSON-encoded
//! value.
//!
//! # Flow
//!
//! ```text
//! content bytes
//!   -> load addon config (storage, by key_from_meta)   -- error: Config
//!   -> check status enabled                            -- error: Disabled
//!   -> scan for [a-z]+ tags                            -- none: unchanged
//!   -> load active Shortcode records (storage)         -- error: Shortcodes
//!   -> replace every [tag] with escaped replacement
//! ```
//!
//! Configuration and records are reloaded on every call.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sc_host::{AddonRegistry, TypeRegistry};
//! use sc_shortcodes::Shortcodes;
//!
//! let addon = Arc::new(Shortcodes::new(storage, Arc::new(TypeRegistry::new())));
//! addon.register(&AddonRegistry::new())?;
//!
//! let output = addon.replace(b"Copyright [year].")?;
//! ```

mod active;
mod addon;
mod error;
mod replacements;
mod sanitize;
mod scan;
mod shortcode;

pub use active::ActiveShortcodes;
pub use addon::Shortcodes;
pub use error::{LoadError, ReplaceError};
pub use sanitize::make_safe_to_output;
pub use scan::{is_valid_tag, scan_tags};
pub use shortcode::{ITEM_TYPE, Shortcode, ShortcodeFactory, ValidationError};
