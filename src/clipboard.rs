//! Clipboard boundary.
//!
//! Writing to the clipboard is the host's job; this module fixes the order
//! in which strategies are tried and the feedback shown to the user. A rich
//! copy (HTML plus plain text) is attempted first, then a plain-text copy,
//! then a selection-based copy. There is no automatic retry: the user
//! triggers the copy again.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::result::CleanResult;

/// Feedback after a successful rich or selection copy.
pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

/// Feedback after falling back to a plain-text copy.
pub const COPIED_PLAIN_MESSAGE: &str = "Copied as plain text!";

/// Feedback when every strategy failed.
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy. Please select and copy manually.";

/// Failure reported by a single clipboard strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ClipboardError(pub String);

/// Host clipboard operations, one per strategy.
pub trait ClipboardWriter {
    /// Write `text/html` and `text/plain` flavours together.
    fn write_rich(&mut self, html: &str, text: &str) -> std::result::Result<(), ClipboardError>;

    /// Write only `text/plain`.
    fn write_plain(&mut self, text: &str) -> std::result::Result<(), ClipboardError>;

    /// Select the rendered output and issue a copy command.
    fn copy_selection(&mut self, html: &str, text: &str) -> std::result::Result<(), ClipboardError>;
}

/// Which strategy ended up writing the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Rich,
    PlainText,
    Selection,
}

impl CopyOutcome {
    /// User-facing feedback for this outcome.
    #[must_use]
    pub fn feedback(self) -> &'static str {
        match self {
            CopyOutcome::Rich | CopyOutcome::Selection => COPIED_MESSAGE,
            CopyOutcome::PlainText => COPIED_PLAIN_MESSAGE,
        }
    }
}

/// Copy a cleaning result, falling back rich -> plain -> selection.
///
/// Returns [`Error::ClipboardUnavailable`] carrying the last failure when
/// no strategy succeeds; show [`COPY_FAILED_MESSAGE`] to the user then.
pub fn copy_with_fallback<W: ClipboardWriter + ?Sized>(
    writer: &mut W,
    result: &CleanResult,
) -> Result<CopyOutcome> {
    match writer.write_rich(&result.html, &result.text) {
        Ok(()) => return Ok(CopyOutcome::Rich),
        Err(e) => debug!(target: "cleanpaste::clipboard", "rich copy failed: {e}"),
    }

    match writer.write_plain(&result.text) {
        Ok(()) => return Ok(CopyOutcome::PlainText),
        Err(e) => debug!(target: "cleanpaste::clipboard", "plain-text copy failed: {e}"),
    }

    writer
        .copy_selection(&result.html, &result.text)
        .map(|()| CopyOutcome::Selection)
        .map_err(|e| {
            warn!(target: "cleanpaste::clipboard", "all clipboard strategies failed: {e}");
            Error::ClipboardUnavailable(e.0)
        })
}
