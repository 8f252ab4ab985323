//! Layout constants and the 2D geometry shared by preview and export.
//!
//! Two coordinate systems exist. *Preview space* is the on-screen container
//! (800 px wide). *Native space* is the background image at full resolution.
//! [`Scale`] maps the former onto the latter.

use serde::{Deserialize, Serialize};

/// Width of the preview container in preview-space pixels.
pub const PREVIEW_WIDTH: f32 = 800.0;

/// Height cap of the preview container.
pub const PREVIEW_MAX_HEIGHT: f32 = 600.0;

/// Grid pitch for the overlay and for drag snapping.
pub const GRID_PITCH: i32 = 10;

/// Smallest logo width/height any input may produce.
pub const MIN_LOGO_SIZE: u32 = 10;

/// Box a freshly uploaded logo is fitted into.
pub const LOGO_FIT_BOX: u32 = 100;

/// Gap between the logo and an anchored size label (preview pixels).
pub const LABEL_MARGIN: f32 = 5.0;

/// A point in either coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Per-axis scale from preview space into a target space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Horizontal factor.
    pub x: f32,
    /// Vertical factor.
    pub y: f32,
}

impl Scale {
    /// Preview space onto itself.
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// Scale that maps `from` onto `to`, axis by axis.
    ///
    /// The two axes are independent; a container whose aspect ratio differs
    /// from the native image produces a non-uniform scale.
    #[must_use]
    pub fn between(from: Size, to: Size) -> Self {
        let ratio = |to: f32, from: f32| if from > 0.0 { to / from } else { 1.0 };
        Self {
            x: ratio(to.width, from.width),
            y: ratio(to.height, from.height),
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Map this rectangle into another space.
    #[must_use]
    pub fn scaled(&self, scale: Scale) -> Self {
        Self::new(
            self.x * scale.x,
            self.y * scale.y,
            self.width * scale.x,
            self.height * scale.y,
        )
    }

    /// Axis-aligned bounds of this rectangle rotated about its centre.
    #[must_use]
    pub fn rotated_bounds(&self, degrees: i32) -> Self {
        let (sin, cos) = sin_cos_degrees(degrees);
        let w = (self.width * cos).abs() + (self.height * sin).abs();
        let h = (self.width * sin).abs() + (self.height * cos).abs();
        let c = self.center();
        Self::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
    }

    /// Whether `point` lies inside this rectangle once rotated about its
    /// centre by `degrees` (clockwise).
    #[must_use]
    pub fn contains_rotated(&self, point: Point, degrees: i32) -> bool {
        let c = self.center();
        let (sin, cos) = sin_cos_degrees(degrees);
        // Undo the rotation: rotate the point counter-clockwise around the centre.
        let dx = point.x - c.x;
        let dy = point.y - c.y;
        let lx = dx * cos + dy * sin;
        let ly = -dx * sin + dy * cos;
        lx.abs() <= self.width / 2.0 && ly.abs() <= self.height / 2.0
    }
}

/// Sine and cosine of an integer angle, exact on the quarter turns.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sin_cos_degrees(degrees: i32) -> (f32, f32) {
    match degrees.rem_euclid(360) {
        0 => (0.0, 1.0),
        90 => (1.0, 0.0),
        180 => (0.0, -1.0),
        270 => (-1.0, 0.0),
        d => (d as f32).to_radians().sin_cos(),
    }
}

/// Preview container for a background of the given native size.
///
/// The container is always [`PREVIEW_WIDTH`] wide; its height follows the
/// background's aspect ratio, capped at [`PREVIEW_MAX_HEIGHT`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn preview_container(native_width: u32, native_height: u32) -> Size {
    let width = native_width.max(1) as f32;
    let height = native_height as f32 * PREVIEW_WIDTH / width;
    Size::new(PREVIEW_WIDTH, height.min(PREVIEW_MAX_HEIGHT))
}

/// Round a coordinate to the nearest grid line. Halves round up.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn snap_to_grid(value: f32) -> i32 {
    grid_steps((value / GRID_PITCH as f32) + 0.5) * GRID_PITCH
}

/// Whole grid steps in `steps`, saturating so the pixel value fits an `i32`.
#[allow(clippy::cast_possible_truncation)]
fn grid_steps(steps: f32) -> i32 {
    let limit = i32::MAX / GRID_PITCH;
    (steps.floor() as i32).clamp(-limit, limit)
}

/// Largest on-grid coordinate that keeps an extent of `extent` inside
/// `available`. Zero when the extent does not fit at all.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn grid_limit(available: f32, extent: u32) -> i32 {
    let room = available - extent as f32;
    if room <= 0.0 {
        return 0;
    }
    grid_steps(room / GRID_PITCH as f32) * GRID_PITCH
}
