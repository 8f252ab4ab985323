//! Renderer error types.

use overlay_core::{AssetSlot, OverlayError};
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while decoding, rendering or exporting.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A user-visible editor notice.
    #[error(transparent)]
    Overlay(#[from] OverlayError),

    /// Image bytes could not be decoded.
    #[error("Failed to decode {slot} image: {reason}")]
    Decode {
        /// Slot the bytes were uploaded to.
        slot: AssetSlot,
        /// Decoder message.
        reason: String,
    },

    /// The plan needs an asset the caller did not provide.
    #[error("No decoded {0} image available")]
    MissingAsset(AssetSlot),

    /// An asset lifecycle event was sent outside an upload.
    #[error("{0} images change only through an upload")]
    AssetEvent(AssetSlot),

    /// Allocating or drawing into a raster failed.
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// Reading an image file failed.
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the output failed.
    #[error("Export failed: {0}")]
    Export(String),
}
