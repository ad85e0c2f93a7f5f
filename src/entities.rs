//! Named character reference decoding for serialized output.
//!
//! Only the references the serializer itself produces (plus `&quot;` and
//! apostrophe forms that other producers emit) are decoded. `&amp;` is
//! always decoded last: decoding it first would turn `&amp;lt;` into `&lt;`
//! and then into `<`, changing text the author typed literally.

/// Replacements applied in order. `&amp;` must stay last.
const DECODE_ORDER: [(&str, &str); 7] = [
    ("&nbsp;", "\u{a0}"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

/// Decode the fixed set of named references in `html`.
///
/// # Example
///
/// ```rust
/// use rs_cleanpaste::entities::decode_entities;
///
/// assert_eq!(decode_entities("a&nbsp;&lt;b&gt;"), "a\u{a0}<b>");
/// assert_eq!(decode_entities("&amp;lt;b&amp;gt;"), "&lt;b&gt;");
/// ```
#[must_use]
pub fn decode_entities(html: &str) -> String {
    if !html.contains('&') {
        return html.to_string();
    }
    DECODE_ORDER
        .iter()
        .fold(html.to_string(), |acc, &(entity, literal)| acc.replace(entity, literal))
}
