//! Upload validation and the logo auto-fit rule.

use std::path::Path;

use crate::layout::{LOGO_FIT_BOX, MIN_LOGO_SIZE};
use crate::{ImageFormat, OverlayError, OverlayResult};

/// MIME types an upload may carry.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// File extensions offered by the file pickers.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Check an upload's MIME type.
///
/// # Errors
///
/// Returns [`OverlayError::UnsupportedFormat`] for anything other than PNG,
/// JPEG or WebP.
pub fn validate_mime(mime: &str) -> OverlayResult<ImageFormat> {
    ImageFormat::from_mime(mime).ok_or_else(|| {
        tracing::warn!(mime, "rejecting upload with unsupported type");
        OverlayError::UnsupportedFormat {
            mime: mime.to_string(),
        }
    })
}

/// MIME type for a file on disk, derived from its extension.
///
/// Used by hosts that have a path but no MIME metadata.
///
/// # Errors
///
/// Returns [`OverlayError::UnsupportedFormat`] when the extension is missing
/// or not one of [`ACCEPTED_EXTENSIONS`].
pub fn mime_for_path(path: &Path) -> OverlayResult<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    ImageFormat::from_extension(ext)
        .map(ImageFormat::mime)
        .ok_or_else(|| OverlayError::UnsupportedFormat {
            mime: if ext.is_empty() {
                path.display().to_string()
            } else {
                format!(".{ext}")
            },
        })
}

/// Fit a logo of native size `width × height` into the auto-size box,
/// preserving its aspect ratio.
///
/// The longer side becomes [`LOGO_FIT_BOX`]; the shorter side is rounded and
/// never drops below [`MIN_LOGO_SIZE`].
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn fit_logo(width: u32, height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (LOGO_FIT_BOX, LOGO_FIT_BOX);
    }
    let aspect = f64::from(width) / f64::from(height);
    let fit = f64::from(LOGO_FIT_BOX);
    let (w, h) = if width >= height {
        (LOGO_FIT_BOX, (fit / aspect).round() as u32)
    } else {
        ((fit * aspect).round() as u32, LOGO_FIT_BOX)
    };
    (w.max(MIN_LOGO_SIZE), h.max(MIN_LOGO_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_mime_accepts_supported() {
        for mime in ACCEPTED_MIME_TYPES {
            assert!(validate_mime(mime).is_ok(), "{mime} should be accepted");
        }
    }

    #[test]
    fn test_validate_mime_rejects_gif() {
        let err = validate_mime("image/gif").unwrap_err();
        assert!(matches!(err, OverlayError::UnsupportedFormat { ref mime } if mime == "image/gif"));
        assert!(err.to_string().contains("PNG, JPG, or WebP"));
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a/logo.PNG")).unwrap(), "image/png");
        assert_eq!(mime_for_path(Path::new("photo.jpeg")).unwrap(), "image/jpeg");
        assert!(mime_for_path(Path::new("anim.gif")).is_err());
        assert!(mime_for_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_fit_logo_landscape() {
        assert_eq!(fit_logo(400, 200), (100, 50));
        assert_eq!(fit_logo(300, 200), (100, 67));
    }

    #[test]
    fn test_fit_logo_portrait_and_square() {
        assert_eq!(fit_logo(200, 400), (50, 100));
        assert_eq!(fit_logo(512, 512), (100, 100));
    }

    #[test]
    fn test_fit_logo_extreme_aspect_keeps_floor() {
        assert_eq!(fit_logo(5000, 10), (100, MIN_LOGO_SIZE));
        assert_eq!(fit_logo(0, 10), (100, 100));
    }
}
