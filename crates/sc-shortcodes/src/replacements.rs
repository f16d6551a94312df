//! Sequential byte-string replacement.
//!
//! Collects `[tag]` → sanitized text pairs, then applies them in order over
//! the content buffer.

use memchr::memmem;

/// Collects literal replacements and applies them in registration order.
///
/// Each pair replaces every occurrence of `from` in the buffer produced by
/// the previous pairs, so text inserted by an earlier pair is visible to
/// later ones.
#[derive(Debug, Default)]
pub(crate) struct Replacements {
    items: Vec<(Vec<u8>, Vec<u8>)>,
}

impl Replacements {
    /// Create a collector with pre-allocated capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Register a replacement: all occurrences of `from` will be replaced with `to`.
    pub(crate) fn add(&mut self, from: impl Into<Vec<u8>>, to: impl Into<Vec<u8>>) {
        self.items.push((from.into(), to.into()));
    }

    /// Check if there are any replacements registered.
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply all registered replacements to a copy of `content`.
    pub(crate) fn apply(self, content: &[u8]) -> Vec<u8> {
        let mut buf = content.to_vec();
        for (from, to) in self.items {
            if let Some(replaced) = replace_all(&buf, &from, &to) {
                buf = replaced;
            }
        }
        buf
    }
}

/// Replace every non-overlapping occurrence of `from`.
///
/// Returns `None` when `from` does not occur (or is empty).
fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Option<Vec<u8>> {
    if from.is_empty() {
        return None;
    }

    let mut matches = memmem::find_iter(haystack, from).peekable();
    matches.peek()?;

    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    for pos in matches {
        out.extend_from_slice(&haystack[last..pos]);
        out.extend_from_slice(to);
        last = pos + from.len();
    }
    out.extend_from_slice(&haystack[last..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn apply(content: &str, pairs: &[(&str, &str)]) -> String {
        let mut replacements = Replacements::with_capacity(pairs.len());
        for (from, to) in pairs {
            replacements.add(*from, *to);
        }
        String::from_utf8(replacements.apply(content.as_bytes())).unwrap()
    }

    #[test]
    fn test_empty_replacements() {
        assert!(Replacements::default().is_empty());
        assert_eq!(apply("unchanged", &[]), "unchanged");
    }

    #[test]
    fn test_single_replacement() {
        assert_eq!(apply("hello [name]", &[("[name]", "world")]), "hello world");
    }

    #[test]
    fn test_multiple_occurrences() {
        assert_eq!(apply("[a] [a] [a]", &[("[a]", "b")]), "b b b");
    }

    #[test]
    fn test_replacement_not_found() {
        assert_eq!(apply("hello world", &[("[foo]", "bar")]), "hello world");
    }

    #[test]
    fn test_occurrence_at_start_and_end() {
        assert_eq!(apply("[a]mid[a]", &[("[a]", "x")]), "xmidx");
    }

    #[test]
    fn test_replacement_order() {
        // Later pairs see text inserted by earlier ones.
        assert_eq!(apply("[a]", &[("[a]", "[b]"), ("[b]", "c")]), "c");
    }

    #[test]
    fn test_replace_all_empty_needle() {
        assert!(replace_all(b"abc", b"", b"x").is_none());
    }

    #[test]
    fn test_replace_all_non_utf8() {
        assert_eq!(
            replace_all(b"\xff[a]\xfe", b"[a]", b"ok").unwrap(),
            b"\xffok\xfe".to_vec()
        );
    }
}
