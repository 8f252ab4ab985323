//! Preview rendering: a [`PreviewLayout`] as an SVG document.
//!
//! The output mirrors the editor canvas: the background shown whole inside
//! the container, the alignment grid, the logo with its border and the size
//! label.

use std::fmt::Write;

use overlay_core::PreviewLayout;

use crate::asset::ImageAsset;
use crate::text::TextRenderer;

/// Grid line color.
pub const GRID_STROKE: &str = "#00ff00";
/// Logo border color.
pub const BORDER_IDLE: &str = "#3b82f6";
/// Logo border color while dragging.
pub const BORDER_DRAGGING: &str = "#1d4ed8";

/// Render the preview as a standalone SVG document.
///
/// `logo` is ignored when the layout has no logo placement.
#[must_use]
pub fn render_preview_svg(
    layout: &PreviewLayout,
    background: &ImageAsset,
    logo: Option<&ImageAsset>,
    text: &TextRenderer,
) -> String {
    let (w, h) = (layout.container.width, layout.container.height);
    let mut svg = String::with_capacity(background.bytes.len() * 4 / 3 + 4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
    );
    let _ = write!(svg, "<rect width=\"{w}\" height=\"{h}\" fill=\"#f9fafb\"/>");

    // Background, letterboxed like object-fit: contain.
    let _ = write!(
        svg,
        "<image x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" preserveAspectRatio=\"xMidYMid meet\" href=\"{}\"/>",
        background.data_uri(),
    );

    if let Some(grid) = &layout.grid {
        svg.push_str("<g stroke=\"");
        svg.push_str(GRID_STROKE);
        svg.push_str("\" stroke-width=\"0.5\" opacity=\"0.3\">");
        for x in &grid.vertical {
            let _ = write!(svg, "<line x1=\"{x}\" y1=\"0\" x2=\"{x}\" y2=\"{h}\"/>");
        }
        for y in &grid.horizontal {
            let _ = write!(svg, "<line x1=\"0\" y1=\"{y}\" x2=\"{w}\" y2=\"{y}\"/>");
        }
        svg.push_str("</g>");
    }

    if let (Some(placement), Some(logo)) = (layout.logo, logo) {
        let r = placement.rect;
        let c = r.center();
        let border = if layout.dragging {
            BORDER_DRAGGING
        } else {
            BORDER_IDLE
        };
        let _ = write!(
            svg,
            "<g transform=\"rotate({} {} {})\">",
            placement.rotation, c.x, c.y
        );
        let _ = write!(
            svg,
            "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\" href=\"{}\"/>",
            r.x,
            r.y,
            r.width,
            r.height,
            logo.data_uri(),
        );
        // 2 px border drawn inside the box.
        let _ = write!(
            svg,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{border}\" stroke-width=\"2\"/>",
            r.x + 1.0,
            r.y + 1.0,
            (r.width - 2.0).max(0.0),
            (r.height - 2.0).max(0.0),
        );
        svg.push_str("</g>");
    }

    if let Some(label) = &layout.label {
        svg.push_str(&text.label_svg(label, Some(500)));
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{decode_asset, encode_png};
    use overlay_core::{AssetSlot, EditorEvent, EditorState, ImageFormat};

    fn asset(slot: AssetSlot, w: u32, h: u32) -> ImageAsset {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        decode_asset(slot, ImageFormat::Png, encode_png(&img).expect("png")).expect("decode")
    }

    fn layout(state: &EditorState, text: &TextRenderer) -> PreviewLayout {
        PreviewLayout::compute(state, text).expect("layout")
    }

    #[test]
    fn test_preview_contains_all_layers() {
        let bg = asset(AssetSlot::Background, 160, 90);
        let logo = asset(AssetSlot::Logo, 20, 10);
        let mut state = EditorState::new();
        state
            .apply(&EditorEvent::AssetDecoded {
                slot: AssetSlot::Background,
                info: bg.info,
            })
            .expect("bg");
        state
            .apply(&EditorEvent::AssetDecoded {
                slot: AssetSlot::Logo,
                info: logo.info,
            })
            .expect("logo");
        state
            .apply(&EditorEvent::RotateBy { degrees: 90 })
            .expect("rotate");

        let text = TextRenderer::without_fonts();
        let svg = render_preview_svg(&layout(&state, &text), &bg, Some(&logo), &text);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"800\" height=\"450\""));
        assert!(svg.contains("stroke=\"#00ff00\" stroke-width=\"0.5\" opacity=\"0.3\""));
        assert!(svg.contains("<line x1=\"10\" y1=\"0\" x2=\"10\" y2=\"450\"/>"));
        assert!(svg.contains("rotate(90 100 75)"));
        assert!(svg.contains(BORDER_IDLE));
        assert!(svg.contains("100×50px"));
        assert_eq!(svg.matches("data:image/png;base64,").count(), 2);
    }

    #[test]
    fn test_preview_without_grid_or_logo() {
        let bg = asset(AssetSlot::Background, 100, 100);
        let mut state = EditorState::new();
        state
            .apply(&EditorEvent::AssetDecoded {
                slot: AssetSlot::Background,
                info: bg.info,
            })
            .expect("bg");
        state
            .apply(&EditorEvent::SetGrid { visible: false })
            .expect("grid");

        let text = TextRenderer::without_fonts();
        let svg = render_preview_svg(&layout(&state, &text), &bg, None, &text);
        assert!(!svg.contains("<line"));
        assert!(!svg.contains("rotate("));
        assert!(!svg.contains("<text"));
        assert!(svg.contains("width=\"800\" height=\"600\""));
    }

    #[test]
    fn test_dragging_border() {
        let bg = asset(AssetSlot::Background, 800, 600);
        let logo = asset(AssetSlot::Logo, 10, 10);
        let mut state = EditorState::new();
        for a in [&bg, &logo] {
            state
                .apply(&EditorEvent::AssetDecoded {
                    slot: a.slot,
                    info: a.info,
                })
                .expect("asset");
        }
        state
            .apply(&EditorEvent::PointerDown { x: 60.0, y: 60.0 })
            .expect("down");

        let text = TextRenderer::without_fonts();
        let svg = render_preview_svg(&layout(&state, &text), &bg, Some(&logo), &text);
        assert!(svg.contains(BORDER_DRAGGING));
    }
}
