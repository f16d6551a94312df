//! CLI command implementations.

mod add;
mod editor;
mod list;
mod replace;
mod status;

use std::sync::Arc;

use sc_config::Config;
use sc_host::{AddonRegistry, TypeRegistry};
use sc_shortcodes::Shortcodes;
use sc_storage::Storage;
use sc_storage_fs::FsStorage;

use crate::error::CliError;

pub(crate) use add::AddArgs;
pub(crate) use editor::EditorArgs;
pub(crate) use list::list;
pub(crate) use replace::ReplaceArgs;
pub(crate) use status::{disable, enable, status};

/// Host objects shared by the commands.
///
/// Plays the part of the CMS: owns the registries and the filesystem store,
/// and has the addon registered with them.
pub(crate) struct Context {
    storage: Arc<FsStorage>,
    addons: AddonRegistry,
    types: Arc<TypeRegistry>,
    addon: Arc<Shortcodes>,
    key: String,
}

impl Context {
    /// Open the store named by `config` and register the addon.
    pub(crate) fn open(config: &Config) -> Result<Self, CliError> {
        let storage = Arc::new(FsStorage::new(config.storage_resolved.data_dir.clone()));
        tracing::info!(data_dir = %storage.data_dir().display(), "Opened filesystem storage");

        let types = Arc::new(TypeRegistry::new());
        let addon = Arc::new(Shortcodes::new(
            Arc::clone(&storage) as Arc<dyn Storage>,
            Arc::clone(&types),
        ));
        let addons = AddonRegistry::new();
        let key = addon.register(&addons)?;

        Ok(Self {
            storage,
            addons,
            types,
            addon,
            key,
        })
    }
}
