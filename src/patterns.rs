//! Compiled regex patterns.
//!
//! All patterns are compiled once at first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Inline Style Patterns
// =============================================================================

/// One `property: value` declaration inside a `style` attribute.
///
/// Values stop at `;`. Quoted values containing `;` (rare in pasted markup,
/// and only seen in `font-family`) are split, which is harmless because
/// only weight, style and decoration are read.
pub static STYLE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([a-z-]+)\s*:\s*([^;]*)").expect("STYLE_DECLARATION regex")
});

/// Trailing `!important` flag on a declaration value.
pub static IMPORTANT_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*!\s*important\s*$").expect("IMPORTANT_FLAG regex")
});

/// Numeric `font-weight` value (`700`, `600.5`).
pub static NUMERIC_WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(?:\.\d+)?$").expect("NUMERIC_WEIGHT regex")
});

// =============================================================================
// Clipboard Payload Patterns
// =============================================================================

/// Windows `CF_HTML` header field, e.g. `StartFragment:0000000157`.
pub static CF_HTML_HEADER_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(Version|StartHTML|EndHTML|StartFragment|EndFragment|StartSelection|EndSelection|SourceURL):\S*\r?$")
        .expect("CF_HTML_HEADER_FIELD regex")
});

/// Fragment markers that bracket the copied content in a clipboard document.
pub static FRAGMENT_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--\s*StartFragment\s*-->(.*)<!--\s*EndFragment\s*-->")
        .expect("FRAGMENT_MARKERS regex")
});
