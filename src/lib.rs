//! # rs-cleanpaste
//!
//! Strip Google Docs style paste markup down to minimal, semantic HTML.
//!
//! Rich text copied from Google Docs (and similar editors) arrives wrapped in
//! vendor containers, with emphasis expressed as inline `font-weight` and
//! `font-style` declarations on spans. This library rewrites such a fragment
//! into a small vocabulary of tags that plain editors paste cleanly.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_cleanpaste::clean_html;
//!
//! let html = r#"<b id="docs-internal-guid-1" style="font-weight:normal;">
//! <p dir="ltr"><span style="font-weight:700;">Hello</span> world</p></b>"#;
//!
//! let result = clean_html(html)?;
//! assert_eq!(result.html, "\n<p><strong>Hello</strong> world</p>");
//! assert_eq!(result.text, "Hello world");
//! # Ok::<(), rs_cleanpaste::Error>(())
//! ```
//!
//! ## Passes
//!
//! - **Vendor wrappers**: `docs-*` ids and marker classes are unwrapped
//! - **Normalization**: presentational attributes go, styled spans become
//!   `strong`/`em`/`u`, `b`/`i` are canonicalized, unknown tags unwrapped
//! - **Pruning**: elements with no text, `<br>` or `<img>` are removed
//! - **Break collapsing** (optional): `<br>` spacers between paragraphs go
//! - **Entity decoding** (optional): applied to the serialized string

mod clean;
mod error;
mod options;
mod patterns;
mod result;

/// Boundary between markup and the owned tree (parsing and serialization).
pub mod dom;

/// Owned, arena-backed element tree.
pub mod tree;

/// Canonical tag enumeration and tag lists.
pub mod tags;

/// Style inspection and formatting inference.
pub mod style;

/// Vendor wrapper stripping.
pub mod vendor;

/// Element normalization walk.
pub mod normalize;

/// Empty element pruning.
pub mod prune;

/// Inter-paragraph line break collapsing.
pub mod collapse;

/// Output entity decoding.
pub mod entities;

/// Plain-text rendering.
pub mod text;

/// Clipboard fallback cascade.
pub mod clipboard;

/// Clipboard payload decoding (charset, CF_HTML).
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use result::{CleanResult, CleanStats};
pub use style::{InlineStyleInspector, StyleInspector};
pub use tags::{Tag, TagSet};
pub use tree::{NodeId, Tree};

/// Cleans an HTML fragment using default (base variant) options.
///
/// # Arguments
///
/// * `html` - The pasted markup
///
/// # Returns
///
/// The cleaned markup and its plain-text rendering. Returns
/// `Error::EmptyInput` if `html` is empty or whitespace-only.
///
/// # Example
///
/// ```rust
/// use rs_cleanpaste::clean_html;
///
/// let result = clean_html("<p></p><p>text</p>")?;
/// assert_eq!(result.html, "<p>text</p>");
/// # Ok::<(), rs_cleanpaste::Error>(())
/// ```
pub fn clean_html(html: &str) -> Result<CleanResult> {
    clean_html_with_options(html, &Options::default())
}

/// Cleans an HTML fragment with custom options.
///
/// # Example
///
/// ```rust
/// use rs_cleanpaste::{clean_html_with_options, Options};
///
/// let options = Options {
///     collapse_paragraph_breaks: true,
///     ..Options::default()
/// };
/// let result = clean_html_with_options("<p>a</p><br><p>b</p>", &options)?;
/// assert_eq!(result.html, "<p>a</p><p>b</p>");
/// # Ok::<(), rs_cleanpaste::Error>(())
/// ```
pub fn clean_html_with_options(html: &str, options: &Options) -> Result<CleanResult> {
    clean::clean_markup(html, options)
}

/// Cleans raw clipboard `text/html` bytes using default options.
///
/// The payload's charset is detected (BOM, then `<meta>`), and a Windows
/// `CF_HTML` header and fragment markers are removed before cleaning.
pub fn clean_bytes(bytes: &[u8]) -> Result<CleanResult> {
    clean_bytes_with_options(bytes, &Options::default())
}

/// Cleans raw clipboard `text/html` bytes with custom options.
pub fn clean_bytes_with_options(bytes: &[u8], options: &Options) -> Result<CleanResult> {
    let html = encoding::decode_clipboard_html(bytes);
    clean_html_with_options(&html, options)
}

/// Runs every tree pass in place on a caller-owned tree.
///
/// Formatting is inferred from `style` attributes, with inheritance from
/// styled ancestors when `options.use_computed_style` is set.
///
/// # Example
///
/// ```rust
/// use rs_cleanpaste::{dom, normalize_tree, Options};
///
/// let mut tree = dom::parse_fragment(r#"<span style="font-weight:700">Hi</span>"#);
/// normalize_tree(&mut tree, &Options::default());
/// assert_eq!(dom::serialize(&tree), "<strong>Hi</strong>");
/// ```
pub fn normalize_tree(tree: &mut Tree, options: &Options) -> CleanStats {
    clean::clean_tree(tree, options)
}

/// Runs every tree pass in place, asking `inspector` for styles.
///
/// Use this when the host can supply real computed styles.
pub fn normalize_tree_with_inspector<S: StyleInspector + ?Sized>(
    tree: &mut Tree,
    options: &Options,
    inspector: &S,
) -> CleanStats {
    clean::clean_tree_with_inspector(tree, options, inspector)
}
