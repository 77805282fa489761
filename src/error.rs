//! Error types

use crate::assistant::AssistError;
use std::io;
use thiserror::Error;

/// Errors from the crate's fallible edges (files, settings, assistant)
///
/// Pagination itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed settings file or unserializable output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Assistant error: {0}")]
    Assist(#[from] AssistError),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;
