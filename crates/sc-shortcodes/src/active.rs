//! Lookup of active shortcodes by tag.

use std::collections::BTreeMap;

use crate::error::LoadError;
use crate::shortcode::Shortcode;

/// Active shortcodes keyed by tag.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActiveShortcodes {
    by_tag: BTreeMap<String, Shortcode>,
}

impl ActiveShortcodes {
    /// Decode raw records and keep the active ones.
    ///
    /// Records are processed in the given order. When two active records
    /// share a tag the later one wins and a warning is logged. Any record
    /// that fails to decode aborts the whole load.
    pub fn from_records<R: AsRef<[u8]>>(records: &[R]) -> Result<Self, LoadError> {
        let mut by_tag = BTreeMap::new();
        for (index, payload) in records.iter().enumerate() {
            let shortcode: Shortcode = serde_json::from_slice(payload.as_ref())
                .map_err(|source| LoadError::Record { index, source })?;
            if !shortcode.active {
                continue;
            }
            if let Some(previous) = by_tag.insert(shortcode.tag.clone(), shortcode) {
                tracing::warn!(
                    tag = %previous.tag,
                    index,
                    "Duplicate active shortcode tag, last loaded record wins"
                );
            }
        }
        Ok(Self { by_tag })
    }

    /// Active shortcode for `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Shortcode> {
        self.by_tag.get(tag)
    }

    /// Number of distinct active tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// Whether no shortcode is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Active shortcodes ordered by tag.
    pub fn iter(&self) -> impl Iterator<Item = &Shortcode> {
        self.by_tag.values()
    }
}
