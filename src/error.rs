//! Error types for the conversion pipeline.
//!
//! Every variant aborts the current conversion; no partial canvas is ever
//! returned. Glyph-level rasterization failures are not errors (they score
//! zero brightness instead).

use std::path::PathBuf;

/// Errors surfaced by a conversion call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The charset is unusable (e.g. empty after deduplication).
    #[error("Invalid charset: {0}")]
    Configuration(String),

    /// A numeric parameter is out of range.
    #[error("Invalid parameter: {0}")]
    Validation(String),

    /// The font file could not be opened or parsed.
    #[error("Failed to load font '{}': {reason}", path.display())]
    FontLoad {
        /// Font path as requested
        path: PathBuf,
        /// Human-readable cause
        reason: String,
    },

    /// The source image could not be read, downloaded or decoded.
    #[error("Failed to load image '{source_name}': {reason}")]
    ImageLoad {
        /// Path, URL or `-` for stdin
        source_name: String,
        /// Human-readable cause
        reason: String,
    },
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn image_load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Error::ImageLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn font_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::FontLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
