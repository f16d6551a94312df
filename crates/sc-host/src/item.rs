//! Item types and the host's type registry.
//!
//! The registry maps a type name to a typed factory. The host uses it to
//! create blank instances for its admin editor and to decode stored records
//! without knowing their concrete types.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use sc_editor::Editable;

/// A content type managed generically by the host.
pub trait Item: Editable + fmt::Display + Send + Sync {
    /// Registered type name.
    fn item_type(&self) -> &'static str;

    /// Overwrite this instance with a stored JSON record.
    fn load_json(&mut self, payload: &[u8]) -> Result<(), serde_json::Error>;

    /// Concrete value, for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Creates fresh instances of one item type.
pub trait ItemFactory: Send + Sync {
    /// Type name the factory is registered under.
    fn item_type(&self) -> &'static str;

    /// A new blank instance.
    fn new_instance(&self) -> Box<dyn Item>;
}

/// Item decoding error.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// No factory registered for the type.
    #[error("unknown item type: {0}")]
    UnknownType(String),
    /// Stored record is not valid for the type.
    #[error("failed to decode {item_type} record: {source}")]
    Decode {
        /// Item type being decoded.
        item_type: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Host-owned registry of item types.
///
/// Addons add their types when enabled and remove them when disabled.
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<BTreeMap<&'static str, Arc<dyn ItemFactory>>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under its type name, replacing any previous one.
    ///
    /// Returns `true` if the type was not registered before.
    pub fn insert(&self, factory: Arc<dyn ItemFactory>) -> bool {
        let name = factory.item_type();
        let previous = self
            .types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, factory);
        tracing::debug!(item_type = name, replaced = previous.is_some(), "Registered item type");
        previous.is_none()
    }

    /// Remove a type. Returns `true` if it was registered.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self
            .types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some();
        if removed {
            tracing::debug!(item_type = name, "Removed item type");
        }
        removed
    }

    /// Whether a type is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }

    /// A blank instance of a registered type.
    #[must_use]
    pub fn new_instance(&self, name: &str) -> Option<Box<dyn Item>> {
        let factory = self
            .types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(Arc::clone)?;
        Some(factory.new_instance())
    }

    /// Decode a stored record of a registered type.
    pub fn decode(&self, name: &str, payload: &[u8]) -> Result<Box<dyn Item>, ItemError> {
        let mut item = self
            .new_instance(name)
            .ok_or_else(|| ItemError::UnknownType(name.to_owned()))?;
        item.load_json(payload).map_err(|source| ItemError::Decode {
            item_type: name.to_owned(),
            source,
        })?;
        Ok(item)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sc_editor::{EditorError, Field, Form};
    use serde::Deserialize;

    use super::*;

    static_assertions::assert_impl_all!(TypeRegistry: Send, Sync);

    #[derive(Debug, Default, Deserialize)]
    struct Note {
        #[serde(default)]
        title: String,
    }

    impl fmt::Display for Note {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Note: {}", self.title)
        }
    }

    impl Editable for Note {
        fn marshal_editor(&self) -> Result<Vec<u8>, EditorError> {
            Form::new("Note")
                .field(Field::input("title", &self.title))
                .render()
        }
    }

    impl Item for Note {
        fn item_type(&self) -> &'static str {
            "Note"
        }

        fn load_json(&mut self, payload: &[u8]) -> Result<(), serde_json::Error> {
            *self = serde_json::from_slice(payload)?;
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct NoteFactory;

    impl ItemFactory for NoteFactory {
        fn item_type(&self) -> &'static str {
            "Note"
        }

        fn new_instance(&self) -> Box<dyn Item> {
            Box::new(Note::default())
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = TypeRegistry::new();

        assert!(registry.names().is_empty());
        assert!(!registry.contains("Note"));
        assert!(registry.new_instance("Note").is_none());
    }

    #[test]
    fn test_insert_and_remove() {
        let registry = TypeRegistry::new();

        assert!(registry.insert(Arc::new(NoteFactory)));
        assert!(!registry.insert(Arc::new(NoteFactory)));
        assert!(registry.contains("Note"));
        assert_eq!(registry.names(), vec!["Note"]);

        assert!(registry.remove("Note"));
        assert!(!registry.remove("Note"));
        assert!(!registry.contains("Note"));
    }

    #[test]
    fn test_new_instance_is_fresh() {
        let registry = TypeRegistry::new();
        registry.insert(Arc::new(NoteFactory));

        let item = registry.new_instance("Note").unwrap();

        assert_eq!(item.item_type(), "Note");
        assert_eq!(item.to_string(), "Note: ");
    }

    #[test]
    fn test_decode() {
        let registry = TypeRegistry::new();
        registry.insert(Arc::new(NoteFactory));

        let item = registry.decode("Note", br#"{"title":"Hello"}"#).unwrap();

        assert_eq!(item.to_string(), "Note: Hello");
        let note = item.as_any().downcast_ref::<Note>().unwrap();
        assert_eq!(note.title, "Hello");
        assert!(item.marshal_editor().is_ok());
    }

    #[test]
    fn test_decode_unknown_type() {
        let registry = TypeRegistry::new();

        let err = registry.decode("Note", b"{}").err().unwrap();

        assert!(matches!(err, ItemError::UnknownType(ref name) if name == "Note"));
    }

    #[test]
    fn test_decode_invalid_payload() {
        let registry = TypeRegistry::new();
        registry.insert(Arc::new(NoteFactory));

        let err = registry.decode("Note", b"[1, 2]").err().unwrap();

        assert!(matches!(err, ItemError::Decode { .. }));
        assert!(err.to_string().starts_with("failed to decode Note record"));
    }
}
