//! Clipboard payload decoding.
//!
//! Raw `text/html` clipboard data is not always clean UTF-8 markup. It may
//! start with a byte order mark, declare a legacy charset in a `<meta>` tag,
//! or (on Windows) be wrapped in the `CF_HTML` format: a plain-text header
//! of byte offsets followed by a full document whose copied part sits
//! between `<!--StartFragment-->` and `<!--EndFragment-->` comments.
//! [`decode_clipboard_html`] turns all of these into the markup to clean.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

use crate::patterns::{CF_HTML_HEADER_FIELD, FRAGMENT_MARKERS};

/// Match `<meta charset="...">` or the `charset=` parameter of a
/// `<meta http-equiv="Content-Type" content="...">` tag.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>]+)"#).expect("valid regex")
});

/// How far into the payload charset declarations are looked for.
const SNIFF_LIMIT: usize = 1024;

/// Detect the character encoding of clipboard HTML bytes.
///
/// A byte order mark wins, then a `<meta>` charset declaration within the
/// first kilobyte; UTF-8 otherwise.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_LIMIT)]);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode clipboard bytes to UTF-8, replacing invalid sequences with U+FFFD.
#[must_use]
pub fn transcode_to_utf8(bytes: &[u8]) -> String {
    let encoding = detect_encoding(bytes);
    // `decode` strips a matching BOM itself.
    let (decoded, _encoding_used, _had_errors) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Decode a clipboard `text/html` payload into the markup to clean.
///
/// # Example
///
/// ```rust
/// use rs_cleanpaste::encoding::decode_clipboard_html;
///
/// let payload = b"Version:0.9\r\nStartHTML:0000000105\r\nEndHTML:0000000199\r\n\
/// StartFragment:0000000141\r\nEndFragment:0000000163\r\n\
/// <html><body><!--StartFragment--><b>Hi</b><!--EndFragment--></body></html>";
/// assert_eq!(decode_clipboard_html(payload), "<b>Hi</b>");
/// ```
#[must_use]
pub fn decode_clipboard_html(bytes: &[u8]) -> String {
    let html = transcode_to_utf8(bytes);
    let body = strip_cf_html_header(&html);
    extract_fragment(body).to_string()
}

/// Skip the `CF_HTML` header lines, if present.
#[must_use]
pub fn strip_cf_html_header(html: &str) -> &str {
    if !html.starts_with("Version:") {
        return html;
    }
    let mut rest = html;
    while let Some(line_end) = rest.find('\n') {
        let line = &rest[..=line_end];
        if !CF_HTML_HEADER_FIELD.is_match(line.trim_end_matches('\n')) {
            break;
        }
        rest = &rest[line_end + 1..];
    }
    rest
}

/// The part between fragment marker comments, or the whole input.
#[must_use]
pub fn extract_fragment(html: &str) -> &str {
    FRAGMENT_MARKERS
        .captures(html)
        .and_then(|c| c.get(1))
        .map_or(html, |m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_utf8_bom() {
        let bytes = b"\xEF\xBB\xBF<p>x</p>";
        assert_eq!(detect_encoding(bytes), UTF_8);
        assert_eq!(transcode_to_utf8(bytes), "<p>x</p>");
    }

    #[test]
    fn detect_utf16le_bom() {
        let bytes = b"\xFF\xFE<\x00p\x00>\x00";
        assert_eq!(detect_encoding(bytes).name(), "UTF-16LE");
        assert_eq!(transcode_to_utf8(bytes), "<p>");
    }

    #[test]
    fn detect_meta_charset() {
        let html = br#"<meta charset="windows-1252"><p>x</p>"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn detect_content_type_charset() {
        let html = br#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=ISO-8859-1">"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn default_to_utf8() {
        assert_eq!(detect_encoding(b"<p>plain</p>"), UTF_8);
    }

    #[test]
    fn transcode_windows1252_smart_quotes() {
        let html = b"<meta charset=\"windows-1252\"><p>\x93Hi\x94</p>";
        assert!(transcode_to_utf8(html).contains("\u{201C}Hi\u{201D}"));
    }

    #[test]
    fn invalid_utf8_does_not_panic() {
        let out = transcode_to_utf8(b"<p>ok \xFF\xFE ok</p>");
        assert!(out.starts_with("<p>ok"));
        assert!(out.contains('\u{FFFD}'));
    }

    #[test]
    fn strip_header_and_extract_fragment() {
        let payload = "Version:0.9\r\nStartHTML:0000000097\r\nEndHTML:0000000170\r\nStartFragment:0000000133\r\nEndFragment:0000000150\r\nSourceURL:https://docs.google.com/document/d/x\r\n<html><body>\r\n<!--StartFragment--><p>hi</p><!--EndFragment-->\r\n</body></html>";
        let body = strip_cf_html_header(payload);
        assert!(body.starts_with("<html>"));
        assert_eq!(extract_fragment(body), "<p>hi</p>");
    }

    #[test]
    fn plain_markup_passes_through() {
        let html = "<p>Version: 2</p>";
        assert_eq!(strip_cf_html_header(html), html);
        assert_eq!(extract_fragment(html), html);
        assert_eq!(decode_clipboard_html(html.as_bytes()), html);
    }
}
