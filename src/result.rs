//! Result types for cleaning output.

use serde::{Deserialize, Serialize};

/// Per-pass counters for one cleaning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanStats {
    /// Vendor wrappers unwrapped before normalization.
    pub vendor_wrappers: usize,
    /// Spans and synonyms replaced by `strong`, `em` or `u`.
    pub rewritten: usize,
    /// Disallowed or unformatted elements unwrapped.
    pub unwrapped: usize,
    /// Elements removed with their content (`script`, `style`, ...).
    pub dropped: usize,
    /// Empty elements pruned.
    pub pruned: usize,
    /// `<br>` elements removed by the collapsing pass.
    pub collapsed_breaks: usize,
}

/// Output of a cleaning run: the clipboard pair plus counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanResult {
    /// Cleaned markup (`text/html` flavour).
    pub html: String,

    /// Plain-text rendering of the cleaned tree (`text/plain` flavour).
    pub text: String,

    /// What each pass did.
    #[serde(default)]
    pub stats: CleanStats,
}
