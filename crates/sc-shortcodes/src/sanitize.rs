//! Replacement text sanitization.
//!
//! Replacement text is spliced into content that may already be part of a
//! JSON-encoded value, so it is escaped twice: first as HTML, then as the
//! inside of a JSON string. The JSON step also escapes `<`, `>`, `&`, U+2028
//! and U+2029 as `\uXXXX` so the fragment stays safe when the JSON ends up in
//! a `<script>` block.

/// Make replacement text safe to splice into encoded content.
///
/// JSON-decoding `"` + result + `"` yields exactly the HTML-escaped text,
/// with quotes as numeric references (`&#34;`, `&#39;`).
pub fn make_safe_to_output(text: &str) -> String {
    escape_json_fragment(&escape_html_text(text))
}

/// Escape `&`, `'`, `<`, `>` and `"`, using numeric references for quotes.
fn escape_html_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape `s` for use between the quotes of a JSON string.
fn escape_json_fragment(s: &str) -> String {
    let quoted = serde_json::Value::from(s).to_string();
    let inner = quoted
        .strip_prefix('"')
        .and_then(|q| q.strip_suffix('"'))
        .unwrap_or(&quoted);

    let mut out = String::with_capacity(inner.len());
    for c in inner.chars() {
        match c {
            '<' | '>' | '&' | '\u{2028}' | '\u{2029}' => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out
}
