// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/error.rs
//
// Error types for crop extraction and export.

use thiserror::Error;

/// Result type alias for crop operations.
pub type CropResult<T> = std::result::Result<T, CropError>;

/// Errors that can occur while producing or encoding a crop.
#[derive(Debug, Error)]
pub enum CropError {
    /// The final pixel buffer could not be produced. No partial buffer exists.
    #[error("Extraction failed: {reason}")]
    ExtractionFailed { reason: String },

    /// No source image is loaded.
    #[error("No image loaded")]
    NoImage,

    /// The file is not a supported image kind.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Unknown drag target in a gesture or handle name.
    #[error("Unknown drag target: {0}")]
    UnknownHandle(String),

    /// Encoding the cropped buffer failed.
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CropError {
    pub(crate) fn extraction(reason: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            reason: reason.into(),
        }
    }
}
