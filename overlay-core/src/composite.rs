//! Export geometry: where everything lands on the native-resolution canvas.

use serde::{Deserialize, Serialize};

use crate::label::{LabelBox, TextMeasurer};
use crate::layout::{Scale, Size};
use crate::preview::LogoPlacement;
use crate::{EditorState, OverlayError, OverlayResult};

/// Default file name of an exported composite.
pub const EXPORT_FILE_NAME: &str = "composite-image.png";

/// Native-space layout of one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositePlan {
    /// Output width, equal to the background's native width.
    pub width: u32,
    /// Output height, equal to the background's native height.
    pub height: u32,
    /// Preview → native scale.
    pub scale: Scale,
    /// Logo in native space.
    pub logo: Option<LogoPlacement>,
    /// Size label in native space.
    pub label: Option<LabelBox>,
}

impl CompositePlan {
    /// Project the editor state onto the background's native resolution.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::MissingBackground`] when no background is
    /// loaded.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(state: &EditorState, measurer: &dyn TextMeasurer) -> OverlayResult<Self> {
        let background = state.background.ok_or(OverlayError::MissingBackground)?;
        let container = state.container().ok_or(OverlayError::MissingBackground)?;
        let native = Size::new(background.width as f32, background.height as f32);
        let scale = Scale::between(container, native);

        let logo = state.logo.map(|_| LogoPlacement {
            rect: state.transform.rect().scaled(scale),
            rotation: state.transform.rotation,
        });

        let label = logo.and_then(|placement| {
            state.label.layout(
                (state.transform.width, state.transform.height),
                placement.bounds(),
                scale,
                measurer,
            )
        });

        tracing::debug!(
            width = background.width,
            height = background.height,
            scale_x = scale.x,
            scale_y = scale.y,
            "composite planned"
        );

        Ok(Self {
            width: background.width,
            height: background.height,
            scale,
            logo,
            label,
        })
    }
}
