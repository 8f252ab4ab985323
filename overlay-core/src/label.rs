//! The size label: its configuration, text, and placement next to the logo.
//!
//! Preview and export share [`place_label`]; the only thing that differs
//! between the two spaces is the [`Scale`] passed in.

use serde::{Deserialize, Serialize};

use crate::layout::{Point, Rect, Scale, Size, LABEL_MARGIN};

/// Horizontal padding inside the label box (preview pixels).
pub const LABEL_PADDING_X: f32 = 4.0;

/// Vertical padding inside the label box (preview pixels).
pub const LABEL_PADDING_Y: f32 = 2.0;

/// Corner radius of the label box (preview pixels).
pub const LABEL_CORNER_RADIUS: f32 = 3.0;

/// Where the label sits relative to the logo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    /// Centred under the logo.
    #[default]
    Below,
    /// Centred over the logo.
    Above,
    /// Vertically centred, left of the logo.
    Left,
    /// Vertically centred, right of the logo.
    Right,
    /// At the label's own coordinates, independent of the logo.
    Custom,
}

impl std::str::FromStr for AnchorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "below" => Ok(Self::Below),
            "above" => Ok(Self::Above),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "custom" => Ok(Self::Custom),
            other => Err(format!(
                "unknown anchor '{other}' (expected below, above, left, right or custom)"
            )),
        }
    }
}

/// Label styling, as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStyle {
    /// Font size in preview pixels.
    pub font_size: u32,
    /// Text color (CSS color string).
    pub color: String,
    /// Box fill (CSS color string, alpha allowed).
    pub background: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 14,
            color: "#000000".to_string(),
            background: "rgba(255, 255, 255, 0.8)".to_string(),
        }
    }
}

/// Size-label configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLabel {
    /// Whether the label is drawn at all.
    pub visible: bool,
    /// Anchor mode.
    pub anchor: AnchorMode,
    /// Custom X (preview space), used when `anchor` is [`AnchorMode::Custom`].
    pub custom_x: i32,
    /// Custom Y (preview space), used when `anchor` is [`AnchorMode::Custom`].
    pub custom_y: i32,
    /// Styling.
    pub style: LabelStyle,
}

impl Default for SizeLabel {
    fn default() -> Self {
        Self {
            visible: true,
            anchor: AnchorMode::Below,
            custom_x: 0,
            custom_y: 0,
            style: LabelStyle::default(),
        }
    }
}

/// Text of the label for a logo of the given preview size.
#[must_use]
pub fn label_text(width: u32, height: u32) -> String {
    format!("{width}×{height}px")
}

/// Measures single-line label text.
pub trait TextMeasurer {
    /// Width and line height of `text` set at `font_size` pixels.
    fn measure(&self, text: &str, font_size: f32) -> Size;
}

/// Font-free estimate: every glyph advances by a fixed fraction of the
/// font size. Close to a sans-serif face for digits.
#[derive(Debug, Clone, Copy)]
pub struct ApproxTextMeasurer {
    /// Average advance as a fraction of the font size.
    pub advance: f32,
}

impl Default for ApproxTextMeasurer {
    fn default() -> Self {
        Self { advance: 0.56 }
    }
}

impl TextMeasurer for ApproxTextMeasurer {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font_size: f32) -> Size {
        let glyphs = text.chars().count() as f32;
        Size::new(glyphs * font_size * self.advance, font_size)
    }
}

/// A laid-out label in some target space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelBox {
    /// Label text.
    pub text: String,
    /// Outer box, padding included.
    pub rect: Rect,
    /// Font size in the target space.
    pub font_size: f32,
    /// Horizontal padding in the target space.
    pub padding_x: f32,
    /// Vertical padding in the target space.
    pub padding_y: f32,
    /// Corner radius in the target space.
    pub corner_radius: f32,
    /// Text color.
    pub color: String,
    /// Box fill.
    pub background: String,
}

impl LabelBox {
    /// Top-left corner of the text line inside the box.
    #[must_use]
    pub fn text_origin(&self) -> Point {
        Point::new(self.rect.x + self.padding_x, self.rect.y + self.padding_y)
    }
}

/// Top-left corner of a label of size `label` anchored to `logo_bounds`.
///
/// `logo_bounds` and `label` are already in the target space; `custom` is in
/// preview space and is mapped through `scale`. The margin between logo and
/// label is [`LABEL_MARGIN`] preview pixels, scaled per axis, on every side.
#[must_use]
pub fn place_label(
    anchor: AnchorMode,
    custom: Point,
    logo_bounds: Rect,
    label: Size,
    scale: Scale,
) -> Point {
    let margin_x = LABEL_MARGIN * scale.x;
    let margin_y = LABEL_MARGIN * scale.y;
    let center = logo_bounds.center();
    match anchor {
        AnchorMode::Below => Point::new(
            center.x - label.width / 2.0,
            logo_bounds.bottom() + margin_y,
        ),
        AnchorMode::Above => Point::new(
            center.x - label.width / 2.0,
            logo_bounds.y - margin_y - label.height,
        ),
        AnchorMode::Left => Point::new(
            logo_bounds.x - margin_x - label.width,
            center.y - label.height / 2.0,
        ),
        AnchorMode::Right => Point::new(
            logo_bounds.right() + margin_x,
            center.y - label.height / 2.0,
        ),
        AnchorMode::Custom => Point::new(custom.x * scale.x, custom.y * scale.y),
    }
}

impl SizeLabel {
    /// Lay out the label for a logo of preview size `logo_size`, whose
    /// rotated bounds in the target space are `logo_bounds`.
    ///
    /// Returns `None` when the label is hidden.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn layout(
        &self,
        logo_size: (u32, u32),
        logo_bounds: Rect,
        scale: Scale,
        measurer: &dyn TextMeasurer,
    ) -> Option<LabelBox> {
        if !self.visible {
            return None;
        }

        let text = label_text(logo_size.0, logo_size.1);
        let font_size = self.style.font_size.max(1) as f32 * scale.x;
        let padding_x = LABEL_PADDING_X * scale.x;
        let padding_y = LABEL_PADDING_Y * scale.y;
        let measured = measurer.measure(&text, font_size);
        let outer = Size::new(
            measured.width + padding_x * 2.0,
            measured.height + padding_y * 2.0,
        );

        let custom = Point::new(self.custom_x as f32, self.custom_y as f32);
        let origin = place_label(self.anchor, custom, logo_bounds, outer, scale);

        Some(LabelBox {
            text,
            rect: Rect::new(origin.x, origin.y, outer.width, outer.height),
            font_size,
            padding_x,
            padding_y,
            corner_radius: LABEL_CORNER_RADIUS * scale.x.min(scale.y),
            color: self.style.color.clone(),
            background: self.style.background.clone(),
        })
    }
}
