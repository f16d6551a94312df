//! The `Shortcode` content type.

use std::any::Any;
use std::fmt;

use sc_editor::{Editable, EditorError, Field, Form};
use sc_host::{Item, ItemFactory};
use serde::{Deserialize, Serialize};

use crate::scan::is_valid_tag;

/// Name the type is registered under in the host's type registry.
pub const ITEM_TYPE: &str = "Shortcode";

/// A tag and the text substituted for it.
///
/// Unknown fields in stored records (host bookkeeping such as ids or
/// timestamps) are ignored when decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shortcode {
    /// Name used inside brackets, e.g. `year` for `[year]`.
    pub tag: String,
    /// Admin-facing description.
    pub description: String,
    /// Text substituted for the tag.
    pub replacement: String,
    /// Only active records take part in substitution.
    pub active: bool,
}

/// Shortcode write-time validation error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Tag would never be matched by the scanner.
    #[error("tag {0:?} must be one or more lowercase ASCII letters")]
    InvalidTag(String),
    /// Another active record already uses the tag.
    #[error("tag {0:?} is already used by another active shortcode")]
    DuplicateTag(String),
}

impl Shortcode {
    /// Create an active shortcode.
    #[must_use]
    pub fn new(
        tag: impl Into<String>,
        description: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            description: description.into(),
            replacement: replacement.into(),
            active: true,
        }
    }

    /// Check that the tag can be matched in content.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_valid_tag(&self.tag) {
            Ok(())
        } else {
            Err(ValidationError::InvalidTag(self.tag.clone()))
        }
    }

    /// Reject saving this record if it is active and another active record
    /// uses the same tag.
    ///
    /// `others` must not contain the record being saved.
    pub fn check_unique_tag<'a>(
        &self,
        others: impl IntoIterator<Item = &'a Shortcode>,
    ) -> Result<(), ValidationError> {
        if !self.active {
            return Ok(());
        }
        if others
            .into_iter()
            .any(|other| other.active && other.tag == self.tag)
        {
            return Err(ValidationError::DuplicateTag(self.tag.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for Shortcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] - {}", self.tag, self.description)
    }
}

impl Editable for Shortcode {
    fn marshal_editor(&self) -> Result<Vec<u8>, EditorError> {
        Form::new(ITEM_TYPE)
            .field(
                Field::input("tag", &self.tag)
                    .label("Tag")
                    .placeholder("Enter the name of shortcode tag"),
            )
            .field(
                Field::input("description", &self.description)
                    .label("Description")
                    .placeholder("Provide a brief description of shortcode behaviour"),
            )
            .field(
                Field::textarea("replacement", &self.replacement)
                    .label("Replacement")
                    .placeholder("Enter the replacement text"),
            )
            .field(Field::checkbox("active", self.active, [("true", "Yes")]).label("Active"))
            .render()
            .map_err(|e| EditorError::render_failed(ITEM_TYPE, e))
    }
}

impl Item for Shortcode {
    fn item_type(&self) -> &'static str {
        ITEM_TYPE
    }

    fn load_json(&mut self, payload: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(payload)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Creates blank [`Shortcode`]s for the host's type registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcodeFactory;

impl ItemFactory for ShortcodeFactory {
    fn item_type(&self) -> &'static str {
        ITEM_TYPE
    }

    fn new_instance(&self) -> Box<dyn Item> {
        Box::new(Shortcode::default())
    }
}
