//! Composite export at the background's native resolution.
//!
//! Projects the editor state through a [`CompositePlan`], draws the
//! background and the rotated logo with tiny-skia, renders the size label
//! through resvg and encodes the result as PNG.

use overlay_core::{AssetSlot, CompositePlan, EditorState, LogoPlacement, EXPORT_FILE_NAME};
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::asset::ImageAsset;
use crate::error::{RenderError, RenderResult};
use crate::text::TextRenderer;

/// An encoded composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
    /// Suggested file name.
    pub file_name: String,
}

/// Rasterizes editor state into a composite image.
#[derive(Debug)]
pub struct CompositeExporter {
    text: TextRenderer,
}

impl CompositeExporter {
    /// Create an exporter drawing label text with `text`.
    #[must_use]
    pub fn new(text: TextRenderer) -> Self {
        Self { text }
    }

    /// Text renderer used for measuring and drawing the label.
    #[must_use]
    pub fn text(&self) -> &TextRenderer {
        &self.text
    }

    /// Export the composite as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`overlay_core::OverlayError::MissingBackground`] (wrapped)
    /// without a background, [`RenderError::MissingAsset`] when the state has
    /// a logo but `logo` is `None`, and raster or encoding errors.
    pub fn export(
        &self,
        state: &EditorState,
        background: &ImageAsset,
        logo: Option<&ImageAsset>,
    ) -> RenderResult<ExportedImage> {
        let pixmap = self.render(state, background, logo)?;
        let png = pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;

        tracing::info!(
            width = pixmap.width(),
            height = pixmap.height(),
            bytes = png.len(),
            "composite exported"
        );

        Ok(ExportedImage {
            width: pixmap.width(),
            height: pixmap.height(),
            png,
            file_name: EXPORT_FILE_NAME.to_string(),
        })
    }

    /// Rasterize the composite without encoding it.
    ///
    /// # Errors
    ///
    /// Same as [`CompositeExporter::export`], minus encoding.
    pub fn render(
        &self,
        state: &EditorState,
        background: &ImageAsset,
        logo: Option<&ImageAsset>,
    ) -> RenderResult<Pixmap> {
        let plan = CompositePlan::compute(state, &self.text)?;
        if (background.width(), background.height()) != (plan.width, plan.height) {
            tracing::warn!(
                asset_width = background.width(),
                asset_height = background.height(),
                plan_width = plan.width,
                plan_height = plan.height,
                "background asset does not match state; drawing at origin"
            );
        }

        let mut canvas = Pixmap::new(plan.width, plan.height).ok_or_else(|| {
            RenderError::Raster(format!(
                "cannot allocate {}x{} pixmap",
                plan.width, plan.height
            ))
        })?;

        let bg = background.to_pixmap()?;
        canvas.draw_pixmap(
            0,
            0,
            bg.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        if let Some(placement) = plan.logo {
            let logo = logo.ok_or(RenderError::MissingAsset(AssetSlot::Logo))?;
            draw_logo(&mut canvas, logo, placement)?;
        }

        if let Some(label) = &plan.label {
            self.text.draw_label(label, &mut canvas)?;
        }

        Ok(canvas)
    }
}

impl Default for CompositeExporter {
    fn default() -> Self {
        Self::new(TextRenderer::without_fonts())
    }
}

/// Transform mapping logo pixel space onto its placement: scale into the
/// rect, then rotate about the rect's centre.
#[allow(clippy::cast_precision_loss)]
fn logo_transform(placement: LogoPlacement, logo_width: u32, logo_height: u32) -> Transform {
    let r = placement.rect;
    let c = r.center();
    let degrees = placement.rotation.rem_euclid(360) as f32;
    Transform::from_rotate_at(degrees, c.x, c.y)
        .pre_translate(r.x, r.y)
        .pre_scale(r.width / logo_width as f32, r.height / logo_height as f32)
}

fn draw_logo(canvas: &mut Pixmap, logo: &ImageAsset, placement: LogoPlacement) -> RenderResult<()> {
    let pixmap = logo.to_pixmap()?;
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    let transform = logo_transform(placement, pixmap.width(), pixmap.height());
    tracing::debug!(
        x = placement.rect.x,
        y = placement.rect.y,
        width = placement.rect.width,
        height = placement.rect.height,
        rotation = placement.rotation,
        "drawing logo"
    );
    canvas.draw_pixmap(0, 0, pixmap.as_ref(), &paint, transform, None);
    Ok(())
}
