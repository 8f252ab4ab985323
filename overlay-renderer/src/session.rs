//! An editing session: the state machine plus the decoded images it refers to.

use std::path::Path;

use overlay_core::intake::mime_for_path;
use overlay_core::{
    AssetInfo, AssetSlot, DetachedHost, Editor, EditorEvent, EditorState, OverlayError,
    PreviewLayout, Transition,
};

use crate::asset::{decode_asset, ImageAsset};
use crate::error::{RenderError, RenderResult};
use crate::export::{CompositeExporter, ExportedImage};
use crate::preview::render_preview_svg;

/// Headless editor session.
///
/// Uploads go through the same two-phase flow a browser host uses: the MIME
/// check, then a decode whose outcome is fed back as an event.
#[derive(Debug)]
pub struct EditorSession {
    editor: Editor<DetachedHost>,
    background: Option<ImageAsset>,
    logo: Option<ImageAsset>,
    exporter: CompositeExporter,
}

impl EditorSession {
    /// Start an empty session.
    #[must_use]
    pub fn new(exporter: CompositeExporter) -> Self {
        Self {
            editor: Editor::new(DetachedHost),
            background: None,
            logo: None,
            exporter,
        }
    }

    /// Current editor state.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        self.editor.state()
    }

    /// Decoded image in `slot`, if any.
    #[must_use]
    pub fn asset(&self, slot: AssetSlot) -> Option<&ImageAsset> {
        match slot {
            AssetSlot::Background => self.background.as_ref(),
            AssetSlot::Logo => self.logo.as_ref(),
        }
    }

    /// Apply an editor event.
    ///
    /// Upload and decode events are refused: the session decodes its own
    /// uploads, and the state must describe the pixels it holds.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::AssetEvent`] for upload and decode events, and
    /// the editor's notice when the event is rejected.
    pub fn dispatch(&mut self, event: &EditorEvent) -> RenderResult<Transition> {
        match event {
            EditorEvent::UploadSelected { slot, .. }
            | EditorEvent::AssetDecoded { slot, .. }
            | EditorEvent::DecodeFailed { slot, .. } => {
                tracing::warn!(%slot, "asset event outside an upload ignored");
                Err(RenderError::AssetEvent(*slot))
            }
            _ => Ok(self.editor.dispatch(event)?),
        }
    }

    /// Upload `bytes` declared as `mime` into `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::UnsupportedFormat`] for rejected types and
    /// [`OverlayError::DecodeFailed`] when the bytes do not decode. The
    /// session is unchanged in both cases.
    pub fn upload(
        &mut self,
        slot: AssetSlot,
        mime: &str,
        bytes: Vec<u8>,
    ) -> RenderResult<AssetInfo> {
        let transition = self.editor.dispatch(&EditorEvent::UploadSelected {
            slot,
            mime: mime.to_string(),
        })?;
        let Some(request) = transition.decode else {
            return Err(OverlayError::UnsupportedFormat {
                mime: mime.to_string(),
            }
            .into());
        };

        let asset = match decode_asset(request.slot, request.format, bytes) {
            Ok(asset) => asset,
            Err(RenderError::Decode { slot, reason }) => {
                let event = EditorEvent::DecodeFailed {
                    slot,
                    reason: reason.clone(),
                };
                return Err(match self.editor.dispatch(&event) {
                    Err(notice) => notice.into(),
                    Ok(_) => RenderError::Decode { slot, reason },
                });
            }
            Err(other) => return Err(other),
        };

        let info = asset.info;
        self.editor
            .dispatch(&EditorEvent::AssetDecoded { slot, info })?;
        match slot {
            AssetSlot::Background => self.background = Some(asset),
            AssetSlot::Logo => self.logo = Some(asset),
        }
        Ok(info)
    }

    /// Upload an image file, taking its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Same as [`EditorSession::upload`], plus I/O errors.
    pub fn upload_file(&mut self, slot: AssetSlot, path: &Path) -> RenderResult<AssetInfo> {
        let mime = mime_for_path(path)?;
        let bytes = std::fs::read(path)?;
        tracing::debug!(%slot, path = %path.display(), mime, "uploading file");
        self.upload(slot, mime, bytes)
    }

    /// Preview layout for the current state.
    #[must_use]
    pub fn preview_layout(&self) -> Option<PreviewLayout> {
        PreviewLayout::compute(self.editor.state(), self.exporter.text())
    }

    /// Render the preview as SVG.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::MissingBackground`] before a background is
    /// uploaded.
    pub fn preview_svg(&self) -> RenderResult<String> {
        let background = self
            .background
            .as_ref()
            .ok_or(OverlayError::MissingBackground)?;
        let layout = self.preview_layout().ok_or(OverlayError::MissingBackground)?;
        Ok(render_preview_svg(
            &layout,
            background,
            self.logo.as_ref(),
            self.exporter.text(),
        ))
    }

    /// Export the composite.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::MissingBackground`] before a background is
    /// uploaded, or raster and encoding errors.
    pub fn export(&self) -> RenderResult<ExportedImage> {
        let background = self
            .background
            .as_ref()
            .ok_or(OverlayError::MissingBackground)?;
        self.exporter
            .export(self.editor.state(), background, self.logo.as_ref())
    }

    /// End the session, returning the final state.
    #[must_use]
    pub fn into_state(self) -> EditorState {
        self.editor.into_state()
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(CompositeExporter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::encode_png;

    fn png(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([0, 128, 255, 255]));
        encode_png(&img).expect("png")
    }

    #[test]
    fn test_upload_sets_state_and_asset() {
        let mut session = EditorSession::default();
        let info = session
            .upload(AssetSlot::Background, "image/png", png(400, 300))
            .expect("upload");
        assert_eq!((info.width, info.height), (400, 300));
        assert_eq!(session.state().background, Some(info));
        assert!(session.asset(AssetSlot::Background).is_some());
        assert!(session.asset(AssetSlot::Logo).is_none());
    }

    #[test]
    fn test_logo_upload_fits_to_box() {
        let mut session = EditorSession::default();
        session
            .upload(AssetSlot::Logo, "image/png", png(300, 150))
            .expect("upload");
        let t = session.state().transform;
        assert_eq!((t.width, t.height), (100, 50));
    }

    #[test]
    fn test_rejected_mime_leaves_session_unchanged() {
        let mut session = EditorSession::default();
        let before = session.state().clone();
        let err = session
            .upload(AssetSlot::Logo, "image/gif", png(10, 10))
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Overlay(OverlayError::UnsupportedFormat { .. })
        ));
        assert_eq!(session.state(), &before);
        assert!(session.asset(AssetSlot::Logo).is_none());
    }

    #[test]
    fn test_decode_failure_is_reported() {
        let mut session = EditorSession::default();
        let err = session
            .upload(AssetSlot::Background, "image/png", b"\x89PNG broken".to_vec())
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Overlay(OverlayError::DecodeFailed {
                slot: AssetSlot::Background,
                ..
            })
        ));
        assert!(session.state().background.is_none());
    }

    #[test]
    fn test_export_requires_background() {
        let session = EditorSession::default();
        let err = session.export().unwrap_err();
        assert!(matches!(
            err,
            RenderError::Overlay(OverlayError::MissingBackground)
        ));
        assert!(session.preview_svg().is_err());
    }

    #[test]
    fn test_asset_events_only_arrive_through_upload() {
        let mut session = EditorSession::default();
        session
            .upload(AssetSlot::Background, "image/png", png(400, 300))
            .expect("upload");
        let before = session.state().clone();

        let forged = [
            EditorEvent::AssetDecoded {
                slot: AssetSlot::Logo,
                info: AssetInfo::new(overlay_core::ImageFormat::Png, 50, 50),
            },
            EditorEvent::AssetDecoded {
                slot: AssetSlot::Background,
                info: AssetInfo::new(overlay_core::ImageFormat::Png, 1600, 1200),
            },
            EditorEvent::DecodeFailed {
                slot: AssetSlot::Background,
                reason: "truncated".to_string(),
            },
            EditorEvent::UploadSelected {
                slot: AssetSlot::Logo,
                mime: "image/png".to_string(),
            },
        ];
        for event in &forged {
            let err = session.dispatch(event).unwrap_err();
            assert!(matches!(err, RenderError::AssetEvent(_)));
        }
        assert_eq!(session.state(), &before);

        let exported = session.export().expect("export");
        assert_eq!((exported.width, exported.height), (400, 300));
    }

    #[test]
    fn test_upload_file_checks_extension() {
        let mut session = EditorSession::default();
        let err = session
            .upload_file(AssetSlot::Logo, Path::new("logo.gif"))
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Overlay(OverlayError::UnsupportedFormat { .. })
        ));
    }
}
