//! Editor state and its transitions.

use serde::{Deserialize, Serialize};

use crate::drag::{DragSession, PointerCapture};
use crate::event::{DecodeRequest, EditorEvent, NumericField, Transition};
use crate::intake;
use crate::label::SizeLabel;
use crate::layout::{self, Point, Rect, Size};
use crate::{AssetInfo, AssetSlot, OverlayError, OverlayResult};

/// Logo position, size and rotation in preview space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoTransform {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width, at least [`layout::MIN_LOGO_SIZE`].
    pub width: u32,
    /// Height, at least [`layout::MIN_LOGO_SIZE`].
    pub height: u32,
    /// Rotation in degrees, clockwise, unconstrained.
    pub rotation: i32,
}

impl Default for LogoTransform {
    fn default() -> Self {
        Self {
            x: 50,
            y: 50,
            width: 100,
            height: 100,
            rotation: 0,
        }
    }
}

impl LogoTransform {
    /// Unrotated rectangle in preview space.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

/// The complete editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    /// Background image, once decoded.
    pub background: Option<AssetInfo>,
    /// Logo image, once decoded.
    pub logo: Option<AssetInfo>,
    /// Logo placement.
    pub transform: LogoTransform,
    /// Whether the grid overlay is shown.
    pub show_grid: bool,
    /// Size label configuration.
    pub label: SizeLabel,
    /// Client-space position of the preview container.
    pub container_origin: Point,
    /// Active drag, if any.
    #[serde(default)]
    drag: Option<DragSession>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// A fresh editor with no images.
    #[must_use]
    pub fn new() -> Self {
        Self {
            background: None,
            logo: None,
            transform: LogoTransform::default(),
            show_grid: true,
            label: SizeLabel::default(),
            container_origin: Point::default(),
            drag: None,
        }
    }

    /// Preview container size; only exists once a background is loaded.
    #[must_use]
    pub fn container(&self) -> Option<Size> {
        self.background
            .map(|bg| layout::preview_container(bg.width, bg.height))
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The active drag session.
    #[must_use]
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Current label text, e.g. `100×100px`.
    #[must_use]
    pub fn label_text(&self) -> String {
        crate::label::label_text(self.transform.width, self.transform.height)
    }

    /// Apply one input event.
    ///
    /// # Errors
    ///
    /// Returns a user-visible notice for rejected uploads and failed decodes.
    /// The state is unchanged whenever an error is returned.
    pub fn apply(&mut self, event: &EditorEvent) -> OverlayResult<Transition> {
        tracing::trace!(?event, "applying editor event");
        let transition = match event {
            EditorEvent::UploadSelected { slot, mime } => {
                let format = intake::validate_mime(mime)?;
                tracing::debug!(%slot, ?format, "upload accepted, decode requested");
                Transition {
                    decode: Some(DecodeRequest {
                        slot: *slot,
                        format,
                    }),
                    ..Transition::unchanged()
                }
            }
            EditorEvent::AssetDecoded { slot, info } => self.set_asset(*slot, *info),
            EditorEvent::DecodeFailed { slot, reason } => {
                tracing::warn!(%slot, reason = %reason, "image decode failed");
                return Err(OverlayError::DecodeFailed {
                    slot: *slot,
                    reason: reason.clone(),
                });
            }
            EditorEvent::ContainerMoved { x, y } => {
                self.container_origin = Point::new(*x, *y);
                Transition::changed()
            }
            EditorEvent::PointerDown { x, y } => self.pointer_down(Point::new(*x, *y)),
            EditorEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            EditorEvent::PointerUp | EditorEvent::PointerCancel => self.end_drag(),
            EditorEvent::SetNumber { field, raw } => self.set_number(*field, raw),
            EditorEvent::RotateBy { degrees } => {
                self.transform.rotation = self.transform.rotation.wrapping_add(*degrees);
                Transition::changed()
            }
            EditorEvent::ResetRotation => {
                self.transform.rotation = 0;
                Transition::changed()
            }
            EditorEvent::SetGrid { visible } => {
                self.show_grid = *visible;
                Transition::changed()
            }
            EditorEvent::SetLabelVisible { visible } => {
                self.label.visible = *visible;
                Transition::changed()
            }
            EditorEvent::SetLabelAnchor { anchor } => {
                self.label.anchor = *anchor;
                Transition::changed()
            }
            EditorEvent::SetLabelColor { color } => {
                self.label.style.color.clone_from(color);
                Transition::changed()
            }
            EditorEvent::SetLabelBackground { color } => {
                self.label.style.background.clone_from(color);
                Transition::changed()
            }
        };
        Ok(transition)
    }

    /// End any active drag. Safe to call when idle.
    pub fn end_drag(&mut self) -> Transition {
        if self.drag.take().is_some() {
            tracing::debug!(x = self.transform.x, y = self.transform.y, "drag ended");
            Transition {
                changed: true,
                capture: PointerCapture::Release,
                decode: None,
            }
        } else {
            Transition::unchanged()
        }
    }

    fn set_asset(&mut self, slot: AssetSlot, info: AssetInfo) -> Transition {
        tracing::info!(%slot, width = info.width, height = info.height, "asset loaded");
        match slot {
            AssetSlot::Background => self.background = Some(info),
            AssetSlot::Logo => {
                let (width, height) = intake::fit_logo(info.width, info.height);
                self.transform.width = width;
                self.transform.height = height;
                self.logo = Some(info);
            }
        }
        Transition::changed()
    }

    #[allow(clippy::cast_precision_loss)]
    fn pointer_down(&mut self, pointer: Point) -> Transition {
        if self.logo.is_none() || self.container().is_none() || self.drag.is_some() {
            return Transition::unchanged();
        }

        let origin = self.container_origin;
        let local = Point::new(pointer.x - origin.x, pointer.y - origin.y);
        if !self
            .transform
            .rect()
            .contains_rotated(local, self.transform.rotation)
        {
            return Transition::unchanged();
        }

        let top_left = Point::new(self.transform.x as f32, self.transform.y as f32);
        let session = DragSession::begin(pointer, origin, top_left);
        tracing::debug!(offset = ?session.offset, "drag started");
        self.drag = Some(session);
        Transition {
            changed: true,
            capture: PointerCapture::Acquire,
            decode: None,
        }
    }

    fn pointer_move(&mut self, pointer: Point) -> Transition {
        let (Some(session), Some(container)) = (self.drag, self.container()) else {
            return Transition::unchanged();
        };

        let target = session.target(pointer, self.container_origin);
        let max_x = layout::grid_limit(container.width, self.transform.width);
        let max_y = layout::grid_limit(container.height, self.transform.height);
        let x = layout::snap_to_grid(target.x).clamp(0, max_x);
        let y = layout::snap_to_grid(target.y).clamp(0, max_y);

        if (x, y) == (self.transform.x, self.transform.y) {
            return Transition::unchanged();
        }
        self.transform.x = x;
        self.transform.y = y;
        Transition::changed()
    }

    #[allow(clippy::cast_sign_loss)]
    fn set_number(&mut self, field: NumericField, raw: &str) -> Transition {
        let value = field.coerce(raw);
        match field {
            NumericField::PositionX => self.transform.x = value,
            NumericField::PositionY => self.transform.y = value,
            NumericField::Width => self.transform.width = value as u32,
            NumericField::Height => self.transform.height = value as u32,
            NumericField::Rotation => self.transform.rotation = value,
            NumericField::FontSize => self.label.style.font_size = value as u32,
            NumericField::LabelX => self.label.custom_x = value,
            NumericField::LabelY => self.label.custom_y = value,
        }
        Transition::changed()
    }
}
