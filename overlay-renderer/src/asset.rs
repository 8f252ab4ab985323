//! Image intake: sniff, decode and keep the pixels next to the original bytes.
//!
//! The editor state only ever sees the [`AssetInfo`] of an upload; everything
//! pixel-shaped stays here.

use base64::Engine;
use overlay_core::{AssetInfo, AssetSlot, ImageFormat};

use crate::error::{RenderError, RenderResult};

/// A decoded upload.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// Slot the upload was made to.
    pub slot: AssetSlot,
    /// Format and native size.
    pub info: AssetInfo,
    /// Bytes as uploaded, kept for data URIs.
    pub bytes: Vec<u8>,
    /// Straight-alpha RGBA pixels.
    pub pixels: image::RgbaImage,
}

impl ImageAsset {
    /// Native width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Native height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.info.height
    }

    /// `data:` URI of the original bytes.
    #[must_use]
    pub fn data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{encoded}", self.info.format.mime())
    }

    /// Premultiplied copy of the pixels for tiny-skia.
    ///
    /// # Errors
    ///
    /// Returns an error if the image has a zero dimension.
    pub fn to_pixmap(&self) -> RenderResult<tiny_skia::Pixmap> {
        let (width, height) = self.pixels.dimensions();
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Raster(format!("cannot allocate {width}x{height} pixmap"))
        })?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(self.pixels.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(pixmap)
    }
}

/// Detect an accepted format from magic bytes.
#[must_use]
pub fn sniff_format(data: &[u8]) -> Option<ImageFormat> {
    // PNG: 89 50 4E 47
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some(ImageFormat::Png);
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageFormat::Jpeg);
    }

    // WebP: RIFF....WEBP
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return Some(ImageFormat::WebP);
    }

    None
}

fn codec(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::WebP => image::ImageFormat::WebP,
    }
}

/// Decode an upload whose MIME type already passed intake as `declared`.
///
/// The magic bytes win over the declared type when they disagree, the way a
/// browser image element ignores a wrong extension.
///
/// # Errors
///
/// Returns [`RenderError::Decode`] when the bytes are not a decodable PNG,
/// JPEG or WebP image.
pub fn decode_asset(
    slot: AssetSlot,
    declared: ImageFormat,
    bytes: Vec<u8>,
) -> RenderResult<ImageAsset> {
    let format = match sniff_format(&bytes) {
        Some(sniffed) if sniffed != declared => {
            tracing::debug!(%slot, ?declared, ?sniffed, "declared type differs from content");
            sniffed
        }
        Some(sniffed) => sniffed,
        None => declared,
    };

    let pixels = image::load_from_memory_with_format(&bytes, codec(format))
        .map_err(|e| RenderError::Decode {
            slot,
            reason: e.to_string(),
        })?
        .to_rgba8();

    let (width, height) = pixels.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::Decode {
            slot,
            reason: "image has no pixels".to_string(),
        });
    }

    tracing::info!(%slot, ?format, width, height, bytes = bytes.len(), "image decoded");

    Ok(ImageAsset {
        slot,
        info: AssetInfo::new(format, width, height),
        bytes,
        pixels,
    })
}

/// Encode RGBA pixels as PNG. Used for generated images.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn encode_png(pixels: &image::RgbaImage) -> RenderResult<Vec<u8>> {
    let mut buf = std::io::Cursor::new(Vec::new());
    pixels
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}
