//! Error types for Ghostscript invocation.

use std::path::PathBuf;
use thiserror::Error;

use pdfpress_models::UnknownPreset;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while preparing or running a conversion.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error(transparent)]
    InvalidPreset(#[from] UnknownPreset),

    #[error("no input file set")]
    MissingInput,

    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Ghostscript not found in PATH")]
    GhostscriptNotFound,

    #[error("Ghostscript failed: {message}")]
    GsFailed {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("no output file produced at {0}")]
    OutputMissing(PathBuf),

    #[error("output file is empty: {0}")]
    OutputEmpty(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create a Ghostscript failure error.
    pub fn gs_failed(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::GsFailed {
            message: message.into(),
            exit_code,
        }
    }
}
