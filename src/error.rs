//! Error types.
//!
//! Rejecting an edit over the length cap is not an error; it is the `false`
//! verdict of the pre-change hook. These cover the host and terminal layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    /// Edit range does not address the current content.
    #[error("invalid range {start}..{end} for text of {len} chars")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// Opt-in config validation failed.
    #[error("invalid field config: {0}")]
    InvalidConfig(String),

    /// Overlay layout computation failed.
    #[error("layout failed: {0}")]
    Layout(String),

    #[error("terminal I/O: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FieldError>;
