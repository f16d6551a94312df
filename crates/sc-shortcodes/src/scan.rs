//! Bracket tag scanning.

use std::sync::LazyLock;

use regex::bytes::Regex;

/// `[tag]` where tag is one or more lowercase ASCII letters.
static SHORTCODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([a-z]+)\]").unwrap());

/// Distinct tags of all non-overlapping `[tag]` tokens, in order of first
/// appearance.
///
/// Matching is purely textual; brackets inside markup or code are matched
/// like any other text.
pub fn scan_tags(content: &[u8]) -> Vec<&str> {
    let mut tags: Vec<&str> = Vec::new();
    for caps in SHORTCODE_RE.captures_iter(content) {
        // The pattern only admits ASCII letters.
        let Some(tag) = caps.get(1).and_then(|m| std::str::from_utf8(m.as_bytes()).ok()) else {
            continue;
        };
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Whether `tag` can ever be matched by [`scan_tags`].
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_tags() {
        assert!(scan_tags(b"plain text without brackets").is_empty());
    }

    #[test]
    fn test_single_tag() {
        assert_eq!(scan_tags(b"Copyright [year]."), vec!["year"]);
    }

    #[test]
    fn test_distinct_in_first_appearance_order() {
        assert_eq!(
            scan_tags(b"[name] [year] [name] [year] [co]"),
            vec!["name", "year", "co"]
        );
    }

    #[test]
    fn test_rejected_shapes() {
        assert!(scan_tags(b"[Foo] [foo1] [foo-bar] [] [ foo ] [FOO]").is_empty());
    }

    #[test]
    fn test_nested_brackets_match_inner() {
        assert_eq!(scan_tags(b"[[foo]]"), vec!["foo"]);
    }

    #[test]
    fn test_adjacent_tags() {
        assert_eq!(scan_tags(b"[a][b]"), vec!["a", "b"]);
    }

    #[test]
    fn test_tags_inside_markup() {
        assert_eq!(
            scan_tags(br#"<p data-x="[attr]">&lt;[body]&gt;</p>"#),
            vec!["attr", "body"]
        );
    }

    #[test]
    fn test_non_utf8_content() {
        assert_eq!(scan_tags(b"\xff\xfe [year] \xc3"), vec!["year"]);
    }

    #[test]
    fn test_is_valid_tag() {
        assert!(is_valid_tag("year"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("Year"));
        assert!(!is_valid_tag("year2"));
        assert!(!is_valid_tag("my-year"));
        assert!(!is_valid_tag("ÿear"));
    }
}
