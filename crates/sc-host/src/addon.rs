//! Addon registry and lifecycle hooks.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::meta::{AddonError, Meta, key_from_meta};

/// HTTP-style request context handed to lifecycle hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookRequest {
    /// Request method (e.g., "POST").
    pub method: String,
    /// Request path of the admin action that triggered the hook.
    pub path: String,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
}

impl HookRequest {
    /// Create a request without headers.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
        }
    }
}

/// HTTP-style response a hook may write to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookResponse {
    /// Status code.
    pub status: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Default for HookResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }
}

/// Lifecycle hooks an addon may implement.
///
/// The host calls them after it has persisted the new status. Both default
/// to doing nothing.
pub trait Addon: Send + Sync {
    /// Runs after the addon is enabled.
    fn after_enable(&self, _req: &HookRequest, _res: &mut HookResponse) -> Result<(), AddonError> {
        Ok(())
    }

    /// Runs after the addon is disabled.
    fn after_disable(
        &self,
        _req: &HookRequest,
        _res: &mut HookResponse,
    ) -> Result<(), AddonError> {
        Ok(())
    }
}

/// Host-owned registry of installed addons, keyed by [`key_from_meta`].
#[derive(Default)]
pub struct AddonRegistry {
    addons: RwLock<BTreeMap<String, Arc<dyn Addon>>>,
}

impl AddonRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an addon under its metadata.
    ///
    /// Returns the derived storage key.
    pub fn register(&self, meta: &Meta, addon: Arc<dyn Addon>) -> Result<String, AddonError> {
        let key = key_from_meta(meta)?;
        let mut addons = self.addons.write().unwrap_or_else(PoisonError::into_inner);
        if addons.contains_key(&key) {
            return Err(AddonError::AlreadyRegistered(key));
        }
        tracing::info!(key = %key, version = %meta.version, "Registered addon");
        addons.insert(key.clone(), addon);
        Ok(key)
    }

    /// Look up an addon by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<dyn Addon>> {
        self.addons
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(Arc::clone)
    }

    /// All registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.addons
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Run the `after_enable` hook of the addon registered under `key`.
    pub fn after_enable(
        &self,
        key: &str,
        req: &HookRequest,
        res: &mut HookResponse,
    ) -> Result<(), AddonError> {
        let addon = self
            .get(key)
            .ok_or_else(|| AddonError::NotRegistered(key.to_owned()))?;
        addon.after_enable(req, res)?;
        tracing::info!(key, "Addon enabled");
        Ok(())
    }

    /// Run the `after_disable` hook of the addon registered under `key`.
    pub fn after_disable(
        &self,
        key: &str,
        req: &HookRequest,
        res: &mut HookResponse,
    ) -> Result<(), AddonError> {
        let addon = self
            .get(key)
            .ok_or_else(|| AddonError::NotRegistered(key.to_owned()))?;
        addon.after_disable(req, res)?;
        tracing::info!(key, "Addon disabled");
        Ok(())
    }
}

impl std::fmt::Debug for AddonRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddonRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(AddonRegistry: Send, Sync);

    #[derive(Default)]
    struct CountingAddon {
        enabled: AtomicUsize,
        disabled: AtomicUsize,
    }

    impl Addon for CountingAddon {
        fn after_enable(&self, _req: &HookRequest, res: &mut HookResponse) -> Result<(), AddonError> {
            self.enabled.fetch_add(1, Ordering::SeqCst);
            res.status = 204;
            Ok(())
        }

        fn after_disable(
            &self,
            _req: &HookRequest,
            _res: &mut HookResponse,
        ) -> Result<(), AddonError> {
            self.disabled.fetch_add(1, Ordering::SeqCst);
            Err(AddonError::Hook("cleanup failed".to_owned()))
        }
    }

    struct NoopAddon;

    impl Addon for NoopAddon {}

    fn meta(name: &str) -> Meta {
        Meta::new(name, "Author", "https://example.com", "1.0.0")
    }

    #[test]
    fn test_register_returns_key() {
        let registry = AddonRegistry::new();

        let key = registry.register(&meta("Alpha"), Arc::new(NoopAddon)).unwrap();

        assert_eq!(key, "Alpha:Author:1.0.0");
        assert!(registry.get(&key).is_some());
        assert_eq!(registry.keys(), vec![key]);
    }

    #[test]
    fn test_register_duplicate_rejected() {
        let registry = AddonRegistry::new();
        registry.register(&meta("Alpha"), Arc::new(NoopAddon)).unwrap();

        let err = registry
            .register(&meta("Alpha"), Arc::new(NoopAddon))
            .unwrap_err();

        assert!(matches!(err, AddonError::AlreadyRegistered(ref key) if key == "Alpha:Author:1.0.0"));
    }

    #[test]
    fn test_register_invalid_meta() {
        let registry = AddonRegistry::new();

        let err = registry
            .register(&Meta::default(), Arc::new(NoopAddon))
            .unwrap_err();

        assert!(matches!(err, AddonError::MissingMeta("name")));
        assert!(registry.keys().is_empty());
    }

    #[test]
    fn test_keys_sorted() {
        let registry = AddonRegistry::new();
        registry.register(&meta("Beta"), Arc::new(NoopAddon)).unwrap();
        registry.register(&meta("Alpha"), Arc::new(NoopAddon)).unwrap();

        assert_eq!(
            registry.keys(),
            vec!["Alpha:Author:1.0.0".to_owned(), "Beta:Author:1.0.0".to_owned()]
        );
    }

    #[test]
    fn test_hooks_dispatch() {
        let registry = AddonRegistry::new();
        let addon = Arc::new(CountingAddon::default());
        let key = registry
            .register(&meta("Alpha"), Arc::clone(&addon) as Arc<dyn Addon>)
            .unwrap();
        let req = HookRequest::new("POST", "/admin/addons");
        let mut res = HookResponse::default();

        registry.after_enable(&key, &req, &mut res).unwrap();
        let disable = registry.after_disable(&key, &req, &mut res);

        assert_eq!(addon.enabled.load(Ordering::SeqCst), 1);
        assert_eq!(addon.disabled.load(Ordering::SeqCst), 1);
        assert_eq!(res.status, 204);
        assert_eq!(
            disable.unwrap_err().to_string(),
            "addon hook failed: cleanup failed"
        );
    }

    #[test]
    fn test_hooks_unknown_key() {
        let registry = AddonRegistry::new();
        let mut res = HookResponse::default();

        let err = registry
            .after_enable("missing", &HookRequest::default(), &mut res)
            .unwrap_err();

        assert!(matches!(err, AddonError::NotRegistered(_)));
    }

    #[test]
    fn test_default_hooks_succeed() {
        let addon = NoopAddon;
        let mut res = HookResponse::default();

        addon.after_enable(&HookRequest::default(), &mut res).unwrap();
        addon.after_disable(&HookRequest::default(), &mut res).unwrap();

        assert_eq!(res, HookResponse::default());
    }
}
