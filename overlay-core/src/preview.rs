//! Live preview layout: a pure function of [`EditorState`].
//!
//! Everything here is in preview space. Turning the layout into something
//! visible (SVG, DOM, a GPU frame) is the host's job.

use serde::{Deserialize, Serialize};

use crate::label::{LabelBox, TextMeasurer};
use crate::layout::{Rect, Scale, Size, GRID_PITCH};
use crate::EditorState;

/// Grid overlay lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridOverlay {
    /// Distance between lines.
    pub pitch: f32,
    /// X of every vertical line, from 0 up to the container width.
    pub vertical: Vec<f32>,
    /// Y of every horizontal line, from 0 up to the container height.
    pub horizontal: Vec<f32>,
}

impl GridOverlay {
    /// Lines covering a container of `size`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn covering(size: Size) -> Self {
        let pitch = GRID_PITCH as f32;
        let lines = |extent: f32| {
            (0..)
                .map(|i| i as f32 * pitch)
                .take_while(|v| *v <= extent)
                .collect::<Vec<_>>()
        };
        Self {
            pitch,
            vertical: lines(size.width),
            horizontal: lines(size.height),
        }
    }
}

/// Where the logo is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogoPlacement {
    /// Unrotated rectangle.
    pub rect: Rect,
    /// Clockwise rotation in degrees about the rectangle's centre.
    pub rotation: i32,
}

impl LogoPlacement {
    /// Axis-aligned bounds after rotation.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.rect.rotated_bounds(self.rotation)
    }
}

/// Everything the preview shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewLayout {
    /// Container size.
    pub container: Size,
    /// Grid lines, when the grid is enabled.
    pub grid: Option<GridOverlay>,
    /// Logo, when one is loaded.
    pub logo: Option<LogoPlacement>,
    /// Size label, when visible and a logo is loaded.
    pub label: Option<LabelBox>,
    /// Whether the logo is being dragged (hosts highlight its border).
    pub dragging: bool,
}

impl PreviewLayout {
    /// Lay out the preview. `None` until a background is loaded: without one
    /// there is no container to show.
    #[must_use]
    pub fn compute(state: &EditorState, measurer: &dyn TextMeasurer) -> Option<Self> {
        let container = state.container()?;

        let logo = state.logo.map(|_| LogoPlacement {
            rect: state.transform.rect(),
            rotation: state.transform.rotation,
        });

        let label = logo.and_then(|placement| {
            state.label.layout(
                (state.transform.width, state.transform.height),
                placement.bounds(),
                Scale::IDENTITY,
                measurer,
            )
        });

        Some(Self {
            container,
            grid: state.show_grid.then(|| GridOverlay::covering(container)),
            logo,
            label,
            dragging: state.is_dragging(),
        })
    }
}
