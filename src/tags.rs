//! Tag vocabulary for the cleaning passes.
//!
//! Allowed output tags form a closed enumeration, [`Tag`]. String tag names
//! from the tree are mapped to it with [`Tag::from_name`] and back with
//! [`Tag::as_str`]; allow-list and canonicalization decisions only go
//! through the enum. Structural passes look elements up by name via
//! [`Tag::as_str`], and the plain-text renderer keeps its own block name
//! lists since it also sees custom allow-lists. Input-side synonyms (`b`,
//! `i`, ...) are kept as name lists because they never survive into the
//! output.

use std::fmt;

/// Canonical tags that may remain in cleaned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    P,
    Br,
    Strong,
    Em,
    U,
    A,
    Ul,
    Ol,
    Li,
    Div,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Blockquote,
}

impl Tag {
    /// Every canonical tag, in declaration order.
    pub const ALL: [Tag; 17] = [
        Tag::P,
        Tag::Br,
        Tag::Strong,
        Tag::Em,
        Tag::U,
        Tag::A,
        Tag::Ul,
        Tag::Ol,
        Tag::Li,
        Tag::Div,
        Tag::H1,
        Tag::H2,
        Tag::H3,
        Tag::H4,
        Tag::H5,
        Tag::H6,
        Tag::Blockquote,
    ];

    /// Map a tag name (any case) to its canonical tag.
    ///
    /// Synonyms such as `b` or `i` are not canonical and map to `None`;
    /// use [`canonical_formatting`] for those.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Tag> {
        let lower = name.to_ascii_lowercase();
        Tag::ALL.into_iter().find(|t| t.as_str() == lower)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::P => "p",
            Tag::Br => "br",
            Tag::Strong => "strong",
            Tag::Em => "em",
            Tag::U => "u",
            Tag::A => "a",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::Div => "div",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::Blockquote => "blockquote",
        }
    }

    const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allow-list of canonical tags.
///
/// Serialized as a list of tag names so it can be written in config files.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct TagSet(u32);

impl TagSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Tags kept by default: paragraphs, breaks, emphasis, links, lists, divs.
    #[must_use]
    pub fn base() -> Self {
        BASE_ALLOWED_TAGS.iter().copied().collect()
    }

    /// [`TagSet::base`] plus headings and block quotes.
    #[must_use]
    pub fn extended() -> Self {
        let mut set = Self::base();
        set.extend(EXTENDED_EXTRA_TAGS.iter().copied());
        set
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, tag: Tag) -> bool {
        self.0 & tag.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, tag: Tag) {
        self.0 |= tag.bit();
    }

    #[inline]
    pub fn remove(&mut self, tag: Tag) {
        self.0 &= !tag.bit();
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Tag> {
        Tag::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl fmt::Debug for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl Extend<Tag> for TagSet {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}

impl TryFrom<Vec<String>> for TagSet {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names
            .iter()
            .map(|name| Tag::from_name(name.trim()).ok_or_else(|| format!("unknown tag `{name}`")))
            .collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl serde::Serialize for TagSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(Tag::as_str))
    }
}

impl<'de> serde::Deserialize<'de> for TagSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        TagSet::try_from(names).map_err(serde::de::Error::custom)
    }
}

// === Tag Lists ===

/// Minimum allow-list.
pub static BASE_ALLOWED_TAGS: [Tag; 10] = [
    Tag::P,
    Tag::Br,
    Tag::Strong,
    Tag::Em,
    Tag::U,
    Tag::A,
    Tag::Ul,
    Tag::Ol,
    Tag::Li,
    Tag::Div,
];

/// Added on top of the base list by the extended preset.
pub static EXTENDED_EXTRA_TAGS: [Tag; 7] = [
    Tag::H1,
    Tag::H2,
    Tag::H3,
    Tag::H4,
    Tag::H5,
    Tag::H6,
    Tag::Blockquote,
];

/// Names rewritten to `strong`.
pub static BOLD_TAGS: [&str; 2] = ["b", "strong"];

/// Names rewritten to `em`.
pub static ITALIC_TAGS: [&str; 2] = ["i", "em"];

/// A span containing any of these keeps its structure for the allow-list
/// step instead of being reclassified from its style.
pub static FORMATTING_TAGS: [&str; 6] = ["b", "strong", "i", "em", "u", "a"];

/// Descendants that keep an otherwise empty element alive.
pub static STRUCTURAL_VOID_TAGS: [&str; 2] = ["br", "img"];

/// Elements whose content is never rendered text; removed with their subtree.
pub static DROP_CONTENT_TAGS: [&str; 8] = [
    "script", "style", "noscript", "template", "head", "title", "meta", "link",
];

/// Void elements, serialized without a closing tag.
pub static VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Canonical replacement for a bold or italic synonym.
#[must_use]
pub fn canonical_formatting(name: &str) -> Option<Tag> {
    if BOLD_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t)) {
        Some(Tag::Strong)
    } else if ITALIC_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t)) {
        Some(Tag::Em)
    } else {
        None
    }
}

#[inline]
#[must_use]
pub fn is_formatting_tag(name: &str) -> bool {
    FORMATTING_TAGS.contains(&name)
}

#[inline]
#[must_use]
pub fn is_void_tag(name: &str) -> bool {
    VOID_TAGS.contains(&name)
}
