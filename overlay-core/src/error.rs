//! Error types for editor operations.
//!
//! Every variant is a user-visible notice: hosts display the `Display` text
//! as-is.

use thiserror::Error;

use crate::AssetSlot;

/// Result type for editor operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Errors that can occur while editing or exporting.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// The selected file is not PNG, JPEG or WebP.
    #[error("Please upload PNG, JPG, or WebP images only (got {mime:?})")]
    UnsupportedFormat {
        /// MIME type (or extension) that was rejected.
        mime: String,
    },

    /// Export was requested before any background was loaded.
    #[error("Please upload a background image first.")]
    MissingBackground,

    /// The host could not decode an accepted upload.
    #[error("Could not decode the {slot} image: {reason}")]
    DecodeFailed {
        /// Which asset the upload was meant for.
        slot: AssetSlot,
        /// Decoder message.
        reason: String,
    },

    /// State or event JSON could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
