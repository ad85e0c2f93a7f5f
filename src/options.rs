//! Configuration options for cleaning.
//!
//! The `Options` struct selects the allow-list, the vendor markers and the
//! optional passes. Both historical variants of the cleaner are presets of
//! the same struct: [`Options::default`] (base) and [`Options::extended`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tags::{TagSet, DROP_CONTENT_TAGS};

/// Configuration options for cleaning.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for the base variant.
///
/// # Example
///
/// ```rust
/// use rs_cleanpaste::Options;
///
/// // Base variant
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     collapse_paragraph_breaks: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Tags that may remain in the output. Anything else is unwrapped.
    ///
    /// Default: p, br, strong, em, u, a, ul, ol, li, div
    pub allowed_tags: TagSet,

    /// Elements whose `id` starts with one of these prefixes are vendor
    /// wrappers and get unwrapped before normalization.
    ///
    /// Default: `["docs-"]`
    pub vendor_id_prefixes: Vec<String>,

    /// Elements carrying one of these class tokens are vendor wrappers.
    ///
    /// Default: `["c", "lst-"]`
    pub vendor_classes: Vec<String>,

    /// Remove `<br>` elements that only space out two paragraphs, and empty
    /// out paragraphs made solely of line breaks.
    ///
    /// Default: `false`
    pub collapse_paragraph_breaks: bool,

    /// Decode `&nbsp;`, `&lt;`, `&gt;`, `&quot;`, `&#39;` and `&amp;` in the
    /// serialized output.
    ///
    /// Default: `false`
    pub decode_entities: bool,

    /// Consult the inspector's effective (inherited) style in addition to
    /// the element's own `style` attribute.
    ///
    /// Default: `true`
    pub use_computed_style: bool,

    /// Elements removed together with their content instead of unwrapped.
    ///
    /// Default: script, style, noscript, template, head, title, meta, link
    pub drop_content_tags: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allowed_tags: TagSet::base(),
            vendor_id_prefixes: vec!["docs-".to_string()],
            vendor_classes: vec!["c".to_string(), "lst-".to_string()],
            collapse_paragraph_breaks: false,
            decode_entities: false,
            use_computed_style: true,
            drop_content_tags: DROP_CONTENT_TAGS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl Options {
    /// Extended variant: headings and block quotes are kept, inter-paragraph
    /// breaks are collapsed and entities are decoded on output.
    #[must_use]
    pub fn extended() -> Self {
        Self {
            allowed_tags: TagSet::extended(),
            collapse_paragraph_breaks: true,
            decode_entities: true,
            ..Self::default()
        }
    }

    /// Load options from a JSON document. Missing fields take their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rs_cleanpaste::{Options, Tag};
    ///
    /// let options = Options::from_json(r#"{ "allowed_tags": ["p", "h2"] }"#)?;
    /// assert!(options.allowed_tags.contains(Tag::H2));
    /// assert!(!options.allowed_tags.contains(Tag::Div));
    /// # Ok::<(), rs_cleanpaste::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Whether `tag` is removed together with its subtree.
    #[must_use]
    pub fn drops_content(&self, tag: &str) -> bool {
        self.drop_content_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
