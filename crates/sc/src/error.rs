//! CLI error types.

use sc_config::ConfigError;
use sc_editor::EditorError;
use sc_host::{AddonError, ItemError};
use sc_shortcodes::{LoadError, ReplaceError, ValidationError};
use sc_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Addon(#[from] AddonError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Replace(#[from] ReplaceError),

    #[error("{0}")]
    Item(#[from] ItemError),

    #[error("{0}")]
    Editor(#[from] EditorError),

    #[error("{0}")]
    Shortcode(#[from] ValidationError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
