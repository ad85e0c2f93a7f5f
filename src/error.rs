//! Error types for rs-cleanpaste.
//!
//! The cleaning passes themselves are total; errors only arise at the edges:
//! input validation, configuration loading and the clipboard boundary.

/// Error type for cleaning operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was empty or contained only whitespace.
    #[error("No content to clean: input is empty or whitespace-only")]
    EmptyInput,

    /// A configuration document could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Every clipboard strategy failed.
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, Error>;
