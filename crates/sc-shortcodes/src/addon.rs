//! The shortcodes addon: configuration gating, replacement and lifecycle hooks.

use std::borrow::Cow;
use std::sync::Arc;

use sc_host::{
    Addon, AddonConfig, AddonError, AddonRegistry, HookRequest, HookResponse, Meta, TypeRegistry,
    key_from_meta,
};
use sc_storage::Storage;

use crate::active::ActiveShortcodes;
use crate::error::{LoadError, ReplaceError};
use crate::replacements::Replacements;
use crate::sanitize::make_safe_to_output;
use crate::scan::scan_tags;
use crate::shortcode::{ITEM_TYPE, ShortcodeFactory};

const ADDON_NAME: &str = "Shortcodes";
const ADDON_AUTHOR: &str = "Ollie Phillips";
const ADDON_AUTHOR_URL: &str = "https://slippytrumpet.io";
/// Part of the storage key; bumping it orphans the stored configuration.
const ADDON_VERSION: &str = "0.1.0";

/// The shortcodes addon.
///
/// Holds handles to the host collaborators it needs; it keeps no state of
/// its own between calls.
pub struct Shortcodes {
    storage: Arc<dyn Storage>,
    types: Arc<TypeRegistry>,
}

impl Shortcodes {
    /// Create the addon over the host's storage and type registry.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, types: Arc<TypeRegistry>) -> Self {
        Self { storage, types }
    }

    /// Metadata the addon registers with.
    #[must_use]
    pub fn meta() -> Meta {
        Meta::new(
            ADDON_NAME,
            ADDON_AUTHOR,
            ADDON_AUTHOR_URL,
            ADDON_VERSION,
        )
    }

    /// Storage key of the addon configuration.
    pub fn key() -> Result<String, AddonError> {
        key_from_meta(&Self::meta())
    }

    /// Register with the host.
    ///
    /// Adds the addon to `addons` and, when the stored configuration says it
    /// is enabled, contributes the [`Shortcode`](crate::Shortcode) item type.
    /// A missing or unreadable configuration leaves the type unregistered.
    ///
    /// Returns the addon key.
    pub fn register(self: &Arc<Self>, addons: &AddonRegistry) -> Result<String, AddonError> {
        let key = addons.register(&Self::meta(), Arc::clone(self) as Arc<dyn Addon>)?;

        match self.config() {
            Ok(config) if config.is_enabled() => {
                self.types.insert(Arc::new(ShortcodeFactory));
            }
            Ok(config) => {
                tracing::debug!(key = %key, status = %config.status, "Item type not registered");
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Item type not registered");
            }
        }

        Ok(key)
    }

    /// Load the current addon configuration from storage.
    pub fn config(&self) -> Result<AddonConfig, LoadError> {
        let key = Self::key()?;
        let payload = self.storage.addon(&key)?;
        Ok(AddonConfig::from_slice(&payload)?)
    }

    /// Load the active shortcodes from storage.
    pub fn active_shortcodes(&self) -> Result<ActiveShortcodes, LoadError> {
        let records = self.storage.content_all(ITEM_TYPE)?;
        ActiveShortcodes::from_records(&records)
    }

    /// Substitute active shortcodes in `content`.
    ///
    /// Configuration and records are loaded fresh on every call. Returns the
    /// input borrowed when nothing was substituted. On error `content` is
    /// untouched; [`ReplaceError::Disabled`] is the normal outcome while the
    /// addon is switched off.
    pub fn replace<'a>(&self, content: &'a [u8]) -> Result<Cow<'a, [u8]>, ReplaceError> {
        let config = self.config().map_err(ReplaceError::Config)?;

        if !config.is_enabled() {
            let name = if config.meta.name.is_empty() {
                ADDON_NAME.to_owned()
            } else {
                config.meta.name
            };
            return Err(ReplaceError::Disabled { name });
        }

        let tags = scan_tags(content);
        if tags.is_empty() {
            return Ok(Cow::Borrowed(content));
        }

        let active = self
            .active_shortcodes()
            .map_err(ReplaceError::Shortcodes)?;

        let mut replacements = Replacements::with_capacity(tags.len());
        for tag in tags {
            if let Some(shortcode) = active.get(tag) {
                replacements.add(
                    format!("[{tag}]"),
                    make_safe_to_output(&shortcode.replacement),
                );
            }
        }

        if replacements.is_empty() {
            return Ok(Cow::Borrowed(content));
        }
        Ok(Cow::Owned(replacements.apply(content)))
    }

    /// Content hook adapter: substitute shortcodes, falling back to the
    /// original content on any error.
    pub fn process<'a>(&self, content: &'a [u8]) -> Cow<'a, [u8]> {
        match self.replace(content) {
            Ok(output) => output,
            Err(e) if e.is_disabled() => {
                tracing::debug!(error = %e, "Shortcode substitution skipped");
                Cow::Borrowed(content)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Shortcode substitution failed");
                Cow::Borrowed(content)
            }
        }
    }
}

impl Addon for Shortcodes {
    fn after_enable(&self, _req: &HookRequest, _res: &mut HookResponse) -> Result<(), AddonError> {
        self.types.insert(Arc::new(ShortcodeFactory));
        Ok(())
    }

    fn after_disable(
        &self,
        _req: &HookRequest,
        _res: &mut HookResponse,
    ) -> Result<(), AddonError> {
        self.types.remove(ITEM_TYPE);
        Ok(())
    }
}
